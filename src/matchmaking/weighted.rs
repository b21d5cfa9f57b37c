//! Weighted-adjacent pairing strategy

use std::cmp::Ordering;

use tracing::debug;

use crate::config::RatingConfig;
use crate::error::Result;
use crate::matchmaking::strategy::{ensure_enough_players, PairingStrategy};
use crate::rating::weighted_score;
use crate::types::{MatchRecord, Pairing, Player};

/// Sorts the pool by weighted score, best first, and pairs consecutive
/// players: 1st with 2nd, 3rd with 4th, and so on. An odd player at the end
/// is left unpaired.
#[derive(Debug, Clone)]
pub struct WeightedAdjacentStrategy {
    config: RatingConfig,
}

impl WeightedAdjacentStrategy {
    pub fn new(config: RatingConfig) -> Self {
        Self { config }
    }
}

impl PairingStrategy for WeightedAdjacentStrategy {
    fn name(&self) -> &'static str {
        "weighted-adjacent"
    }

    fn pair_players(&self, pool: &[Player], history: &[MatchRecord]) -> Result<Vec<Pairing>> {
        ensure_enough_players(pool)?;

        let mut scored: Vec<(f64, &Player)> = pool
            .iter()
            .map(|p| (weighted_score(p, history, &self.config), p))
            .collect();
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.id.cmp(&b.1.id))
        });

        let pairs: Vec<Pairing> = scored
            .chunks_exact(2)
            .map(|pair| {
                debug!(
                    player1 = pair[0].1.id,
                    player2 = pair[1].1.id,
                    "matched adjacent players by weighted score"
                );
                Pairing::new(pair[0].1.id, pair[1].1.id)
            })
            .collect();

        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{decide_outcome, PlayerId};
    use chrono::Utc;

    fn strategy() -> WeightedAdjacentStrategy {
        WeightedAdjacentStrategy::new(RatingConfig::default())
    }

    fn player(id: PlayerId, rating: i32, matches_played: u64) -> Player {
        let mut p = Player::new(id, format!("player{id}")).with_rating(rating);
        p.matches_played = matches_played;
        p.signed_in = true;
        p.division_id = Some(1);
        p
    }

    fn record(id: u64, p1: PlayerId, p2: PlayerId, s1: i32, s2: i32) -> MatchRecord {
        let (winner_id, loser_id) = decide_outcome(p1, p2, s1, s2);
        MatchRecord {
            id,
            player1_id: p1,
            player2_id: p2,
            player1_score: s1,
            player2_score: s2,
            player1_rating_before: 1500,
            player2_rating_before: 1500,
            player1_rating_after: 1500,
            player2_rating_after: 1500,
            winner_id,
            loser_id,
            played_at: Utc::now(),
        }
    }

    #[test]
    fn test_rejects_small_pools() {
        let strategy = strategy();
        assert!(strategy.pair_players(&[], &[]).is_err());
        assert!(strategy.pair_players(&[player(1, 1500, 0)], &[]).is_err());
    }

    #[test]
    fn test_pairs_adjacent_by_weighted_score() {
        let strategy = strategy();
        let pool = vec![
            player(1, 1000, 0),
            player(2, 1600, 0),
            player(3, 1200, 0),
            player(4, 1550, 0),
        ];

        // Descending weighted order: 2, 4, 3, 1
        let pairs = strategy.pair_players(&pool, &[]).unwrap();
        assert_eq!(pairs, vec![Pairing::new(2, 4), Pairing::new(3, 1)]);
    }

    #[test]
    fn test_experience_breaks_rating_parity() {
        let strategy = strategy();
        // Same ratings, very different experience: the veterans pair up
        let pool = vec![
            player(1, 1500, 0),
            player(2, 1500, 500),
            player(3, 1500, 480),
            player(4, 1500, 10),
        ];

        let pairs = strategy.pair_players(&pool, &[]).unwrap();
        assert_eq!(pairs, vec![Pairing::new(2, 3), Pairing::new(1, 4)]);
    }

    #[test]
    fn test_recent_form_feeds_the_ranking() {
        let strategy = strategy();
        let pool = vec![player(1, 1500, 0), player(2, 1500, 0), player(3, 1500, 0)];
        // Player 3 on a winning streak outranks its rating peers
        let history = vec![
            record(1, 3, 4, 10, 2),
            record(2, 3, 4, 10, 2),
            record(3, 3, 4, 10, 2),
        ];

        let pairs = strategy.pair_players(&pool, &history).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].player1_id, 3);
    }

    #[test]
    fn test_odd_pool_drops_last_player() {
        let strategy = strategy();
        let pool = vec![player(1, 1600, 0), player(2, 1500, 0), player(3, 1400, 0)];

        let pairs = strategy.pair_players(&pool, &[]).unwrap();
        assert_eq!(pairs, vec![Pairing::new(1, 2)]);
    }

    #[test]
    fn test_ties_broken_by_id() {
        let strategy = strategy();
        let pool = vec![
            player(4, 1500, 0),
            player(2, 1500, 0),
            player(3, 1500, 0),
            player(1, 1500, 0),
        ];

        let pairs = strategy.pair_players(&pool, &[]).unwrap();
        assert_eq!(pairs, vec![Pairing::new(1, 2), Pairing::new(3, 4)]);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let strategy = strategy();
        let pool = vec![
            player(5, 1300, 12),
            player(2, 1450, 3),
            player(8, 1450, 3),
            player(1, 1205, 40),
        ];
        let history = vec![record(1, 5, 2, 3, 8), record(2, 8, 1, 4, 6)];

        let first = strategy.pair_players(&pool, &history).unwrap();
        let second = strategy.pair_players(&pool, &history).unwrap();
        assert_eq!(first, second);
    }
}
