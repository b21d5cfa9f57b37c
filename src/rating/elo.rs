//! Elo rating engine
//!
//! Wraps the `skillratings` Elo implementation with the ladder's integer
//! rating semantics: ratings are whole numbers, updates truncate toward zero,
//! and no rating ever drops below zero.

use chrono::NaiveDate;
use skillratings::elo::{elo, expected_score as elo_expected_score, EloConfig, EloRating};
use skillratings::Outcomes;
use tracing::debug;

use crate::config::RatingConfig;
use crate::error::{LadderError, Result};
use crate::types::{decide_outcome, Player, PlayerId, RatingUpdate};
use crate::utils::days_inactive;

/// Result of rating a single match: both players' updates plus the derived
/// outcome, returned together so the caller can persist them atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub player1_update: RatingUpdate,
    pub player2_update: RatingUpdate,
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
}

/// Elo rating calculator for two-player matches
#[derive(Debug, Clone)]
pub struct EloEngine {
    config: RatingConfig,
}

impl EloEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: RatingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Rating assigned to new players
    pub fn default_rating(&self) -> i32 {
        self.config.default_rating
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Probability in [0, 1] that a player at `rating` beats an opponent at
    /// `opponent_rating`. Symmetric: the opponent's expectation is the
    /// complement.
    pub fn expected_score(&self, rating: i32, opponent_rating: i32) -> f64 {
        let (expected, _) = elo_expected_score(
            &EloRating {
                rating: rating as f64,
            },
            &EloRating {
                rating: opponent_rating as f64,
            },
        );
        expected
    }

    /// Compute both players' new ratings from their pre-match ratings and the
    /// score line. Both expectations are evaluated against the original
    /// ratings; neither side sees the other's update.
    pub fn rate_match(
        &self,
        rating1: i32,
        rating2: i32,
        score1: i32,
        score2: i32,
    ) -> (i32, i32) {
        let outcome = if score1 > score2 {
            Outcomes::WIN
        } else if score1 < score2 {
            Outcomes::LOSS
        } else {
            Outcomes::DRAW
        };

        let (new1, new2) = elo(
            &EloRating {
                rating: rating1 as f64,
            },
            &EloRating {
                rating: rating2 as f64,
            },
            &outcome,
            &EloConfig {
                k: self.config.k_factor,
            },
        );

        // Truncate toward zero, then clamp at the floor
        let new1 = (new1.rating as i32).max(0);
        let new2 = (new2.rating as i32).max(0);

        debug!(
            rating1,
            rating2, score1, score2, new1, new2, "rated match"
        );

        (new1, new2)
    }

    /// Rate a match between two players, returning both updates and the
    /// derived winner/loser. Nothing is persisted; the result is the caller's
    /// atomic write set.
    pub fn apply_match(
        &self,
        player1: &Player,
        player2: &Player,
        score1: i32,
        score2: i32,
    ) -> Result<MatchOutcome> {
        if player1.id == player2.id {
            return Err(LadderError::InternalError {
                message: format!("Player {} cannot play against themselves", player1.id),
            }
            .into());
        }

        let (new1, new2) = self.rate_match(player1.rating, player2.rating, score1, score2);
        let (winner_id, loser_id) = decide_outcome(player1.id, player2.id, score1, score2);

        Ok(MatchOutcome {
            player1_update: RatingUpdate {
                player_id: player1.id,
                old_rating: player1.rating,
                new_rating: new1,
            },
            player2_update: RatingUpdate {
                player_id: player2.id,
                old_rating: player2.rating,
                new_rating: new2,
            },
            winner_id,
            loser_id,
        })
    }

    /// Decay the ratings of players inactive longer than the configured
    /// threshold. Returns updates only for players that decayed.
    ///
    /// Each invocation applies one decay step to every inactive player;
    /// spacing invocations one period apart is the scheduler's contract.
    pub fn apply_decay(&self, players: &[Player], today: NaiveDate) -> Vec<RatingUpdate> {
        players
            .iter()
            .filter_map(|player| {
                let last_active = player.last_active_date?;
                if days_inactive(last_active, today) <= self.config.inactivity_threshold_days {
                    return None;
                }

                let new_rating = (player.rating as f64 * self.config.decay_factor) as i32;
                debug!(
                    player_id = player.id,
                    old_rating = player.rating,
                    new_rating,
                    "applied rating decay"
                );
                Some(RatingUpdate {
                    player_id: player.id,
                    old_rating: player.rating,
                    new_rating,
                })
            })
            .collect()
    }

    /// Soft reset: pull every rating halfway toward the default, keeping some
    /// of each player's standing across seasons. Integer division.
    pub fn apply_regression(&self, players: &[Player]) -> Vec<RatingUpdate> {
        players
            .iter()
            .map(|player| RatingUpdate {
                player_id: player.id,
                old_rating: player.rating,
                new_rating: (player.rating + self.config.default_rating) / 2,
            })
            .collect()
    }

    /// Hard reset: set every rating back to the default
    pub fn apply_hard_reset(&self, players: &[Player]) -> Vec<RatingUpdate> {
        players
            .iter()
            .map(|player| RatingUpdate {
                player_id: player.id,
                old_rating: player.rating,
                new_rating: self.config.default_rating,
            })
            .collect()
    }
}

impl Default for EloEngine {
    fn default() -> Self {
        Self {
            config: RatingConfig::default(),
        }
    }
}
