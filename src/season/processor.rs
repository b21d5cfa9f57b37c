//! End-of-season processing
//!
//! Promotion and demotion between ranked divisions, followed by the
//! league-wide soft reset. The processor computes reassignments and rating
//! updates from the snapshots passed in; the caller persists them.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::SeasonConfig;
use crate::error::{LadderError, Result};
use crate::rating::EloEngine;
use crate::types::{
    Division, DivisionId, DivisionMove, League, MoveDirection, Player, RatingUpdate,
};

/// Everything a season transition produces: division reassignments plus the
/// regression updates for every player in the league
#[derive(Debug, Clone)]
pub struct SeasonOutcome {
    pub moves: Vec<DivisionMove>,
    pub regressions: Vec<RatingUpdate>,
}

/// Computes season transitions for one league at a time
#[derive(Debug, Clone)]
pub struct SeasonProcessor {
    engine: EloEngine,
    config: SeasonConfig,
}

impl SeasonProcessor {
    pub fn new(engine: EloEngine, config: SeasonConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { engine, config })
    }

    /// Process the end of a season for a league.
    ///
    /// Divisions are handled strictly in rank order (rank 1 first). Each
    /// division's cohort is sized from its own pre-transition snapshot:
    /// `player count / cohort divisor`, so a division under the divisor moves
    /// nobody. The top division never promotes and the bottom never demotes.
    /// Regression runs over every player afterwards, whether or not they
    /// moved. A league with a single division still regresses.
    pub fn process_season_end(
        &self,
        league: &League,
        divisions: &[Division],
        players_by_division: &HashMap<DivisionId, Vec<Player>>,
    ) -> Result<SeasonOutcome> {
        if divisions.is_empty() {
            return Err(LadderError::InvalidDivisionConfiguration {
                league_id: league.id,
                reason: "league has no divisions".to_string(),
            }
            .into());
        }

        let mut ordered: Vec<&Division> = divisions.iter().collect();
        ordered.sort_by_key(|d| d.rank);

        info!(league_id = league.id, divisions = ordered.len(), "processing end of season");

        let mut moves = Vec::new();
        let mut league_players = Vec::new();

        for (index, division) in ordered.iter().enumerate() {
            let mut players = players_by_division
                .get(&division.id)
                .cloned()
                .unwrap_or_default();
            players.sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.id.cmp(&b.id)));

            let cohort_size = players.len() / self.config.cohort_divisor;

            if index > 0 {
                let higher = ordered[index - 1];
                for player in &players[..cohort_size] {
                    debug!(
                        player_id = player.id,
                        from = division.id,
                        to = higher.id,
                        "promoting player"
                    );
                    moves.push(DivisionMove {
                        player_id: player.id,
                        from_division_id: division.id,
                        to_division_id: higher.id,
                        direction: MoveDirection::Promotion,
                    });
                }
            }

            if index + 1 < ordered.len() {
                let lower = ordered[index + 1];
                for player in &players[players.len() - cohort_size..] {
                    debug!(
                        player_id = player.id,
                        from = division.id,
                        to = lower.id,
                        "demoting player"
                    );
                    moves.push(DivisionMove {
                        player_id: player.id,
                        from_division_id: division.id,
                        to_division_id: lower.id,
                        direction: MoveDirection::Demotion,
                    });
                }
            }

            league_players.extend(players);
        }

        let regressions = self.engine.apply_regression(&league_players);

        info!(
            league_id = league.id,
            moves = moves.len(),
            regressions = regressions.len(),
            "completed end of season"
        );

        Ok(SeasonOutcome { moves, regressions })
    }
}
