//! Optimal-greedy pairing strategy

use std::cmp::Ordering;

use tracing::debug;

use crate::config::RatingConfig;
use crate::error::Result;
use crate::matchmaking::strategy::{ensure_enough_players, PairingStrategy};
use crate::rating::{compatibility_penalty, weighted_score};
use crate::types::{MatchRecord, Pairing, Player};

/// Default pairing strategy: sort the pool by weighted score, then for each
/// unpaired player in order pick the remaining candidate with the smallest
/// weighted-score gap plus rematch penalty.
///
/// The scan is greedy per the outer iteration order, O(n^2), and not a
/// minimum-weight perfect matching; the exact pairing for a given pool is
/// part of the observable contract and must not change.
#[derive(Debug, Clone)]
pub struct OptimalGreedyStrategy {
    config: RatingConfig,
}

impl OptimalGreedyStrategy {
    pub fn new(config: RatingConfig) -> Self {
        Self { config }
    }
}

impl PairingStrategy for OptimalGreedyStrategy {
    fn name(&self) -> &'static str {
        "optimal-greedy"
    }

    fn pair_players(&self, pool: &[Player], history: &[MatchRecord]) -> Result<Vec<Pairing>> {
        ensure_enough_players(pool)?;

        let mut scored: Vec<(f64, &Player)> = pool
            .iter()
            .map(|p| (weighted_score(p, history, &self.config), p))
            .collect();
        scored.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.id.cmp(&b.1.id))
        });

        let mut used = vec![false; scored.len()];
        let mut pairs = Vec::with_capacity(scored.len() / 2);

        for i in 0..scored.len() {
            if used[i] {
                continue;
            }

            let mut best_difference = f64::MAX;
            let mut best_index = None;

            for j in (i + 1)..scored.len() {
                if used[j] {
                    continue;
                }

                let difference = (scored[i].0 - scored[j].0).abs()
                    + compatibility_penalty(history, scored[i].1.id, scored[j].1.id, &self.config);

                // Strict improvement only: ties keep the earliest candidate
                if difference < best_difference {
                    best_difference = difference;
                    best_index = Some(j);
                }
            }

            if let Some(j) = best_index {
                used[i] = true;
                used[j] = true;
                debug!(
                    player1 = scored[i].1.id,
                    player2 = scored[j].1.id,
                    difference = best_difference,
                    "matched players greedily by weighted score"
                );
                pairs.push(Pairing::new(scored[i].1.id, scored[j].1.id));
            }
        }

        Ok(pairs)
    }
}
