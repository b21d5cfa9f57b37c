//! Nearest-rating pairing strategy

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::RatingConfig;
use crate::error::Result;
use crate::matchmaking::strategy::{ensure_enough_players, PairingStrategy};
use crate::rating::compatibility_penalty;
use crate::types::{MatchRecord, Pairing, Player, PlayerId};

/// Pairs players by rating proximity.
///
/// The pool lives in an ordered set keyed `(rating, id)`. Each step removes
/// the lowest-rated remaining player and pairs it with whichever neighbor
/// minimizes `(rating difference)^2` plus the rematch penalty. The
/// predecessor wins only on a strictly smaller difference; exact ties go to
/// the successor. An odd pool leaves the last player unpaired.
#[derive(Debug, Clone)]
pub struct NearestRatingStrategy {
    config: RatingConfig,
}

impl NearestRatingStrategy {
    pub fn new(config: RatingConfig) -> Self {
        Self { config }
    }

    fn neighbor_cost(
        &self,
        player: (i32, PlayerId),
        neighbor: (i32, PlayerId),
        history: &[MatchRecord],
    ) -> f64 {
        let rating_gap = (player.0 - neighbor.0) as f64;
        rating_gap * rating_gap + compatibility_penalty(history, player.1, neighbor.1, &self.config)
    }
}

impl PairingStrategy for NearestRatingStrategy {
    fn name(&self) -> &'static str {
        "nearest-rating"
    }

    fn pair_players(&self, pool: &[Player], history: &[MatchRecord]) -> Result<Vec<Pairing>> {
        ensure_enough_players(pool)?;

        let mut ordered: BTreeSet<(i32, PlayerId)> =
            pool.iter().map(|p| (p.rating, p.id)).collect();
        let mut pairs = Vec::with_capacity(pool.len() / 2);

        while ordered.len() > 1 {
            let lowest = *ordered.iter().next().unwrap();
            ordered.remove(&lowest);

            let predecessor = ordered.range(..lowest).next_back().copied();
            let successor = ordered.range(lowest..).next().copied();

            let partner = match (predecessor, successor) {
                (None, None) => None,
                (Some(p), None) => Some(p),
                (None, Some(s)) => Some(s),
                (Some(p), Some(s)) => {
                    let lower_diff = self.neighbor_cost(lowest, p, history);
                    let higher_diff = self.neighbor_cost(lowest, s, history);
                    Some(if lower_diff < higher_diff { p } else { s })
                }
            };

            if let Some(partner) = partner {
                ordered.remove(&partner);
                debug!(
                    player1 = lowest.1,
                    player2 = partner.1,
                    "matched players by rating proximity"
                );
                pairs.push(Pairing::new(lowest.1, partner.1));
            }
        }

        Ok(pairs)
    }
}
