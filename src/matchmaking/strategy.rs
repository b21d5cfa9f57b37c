//! Pairing strategy trait and selection

use std::str::FromStr;

use crate::config::RatingConfig;
use crate::error::{LadderError, Result};
use crate::matchmaking::{NearestRatingStrategy, OptimalGreedyStrategy, WeightedAdjacentStrategy};
use crate::types::{MatchRecord, Pairing, Player};

/// A pairing strategy turns a pool of eligible players and their match
/// history into a set of disjoint pairs for one round.
///
/// Strategies are pure over their inputs: the same pool and history always
/// produce the same pairing. An odd pool leaves exactly one player unpaired.
pub trait PairingStrategy: Send + Sync {
    /// Strategy name for logging and selection
    fn name(&self) -> &'static str;

    /// Produce disjoint pairs from the pool.
    ///
    /// Fails with `NotEnoughPlayers` when the pool has fewer than two
    /// members; callers distinguish that from an empty pairing list.
    fn pair_players(&self, pool: &[Player], history: &[MatchRecord]) -> Result<Vec<Pairing>>;
}

/// Guard shared by all strategies: a round needs at least two players.
pub(crate) fn ensure_enough_players(pool: &[Player]) -> Result<()> {
    if pool.len() < 2 {
        return Err(LadderError::NotEnoughPlayers {
            division_id: pool.first().and_then(|p| p.division_id).unwrap_or(0),
            available: pool.len(),
        }
        .into());
    }
    Ok(())
}

/// Selectable pairing strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Pair by closest rating using an ordered pool
    NearestRating,
    /// Sort by weighted score and pair adjacent players
    WeightedAdjacent,
    /// Greedy minimum-difference pairing on weighted score (default)
    OptimalGreedy,
}

impl StrategyKind {
    /// Instantiate the strategy with the given rating configuration
    pub fn build(&self, config: RatingConfig) -> Box<dyn PairingStrategy> {
        match self {
            StrategyKind::NearestRating => Box::new(NearestRatingStrategy::new(config)),
            StrategyKind::WeightedAdjacent => Box::new(WeightedAdjacentStrategy::new(config)),
            StrategyKind::OptimalGreedy => Box::new(OptimalGreedyStrategy::new(config)),
        }
    }
}

impl Default for StrategyKind {
    fn default() -> Self {
        StrategyKind::OptimalGreedy
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::NearestRating => write!(f, "nearest-rating"),
            StrategyKind::WeightedAdjacent => write!(f, "weighted-adjacent"),
            StrategyKind::OptimalGreedy => write!(f, "optimal-greedy"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "nearest-rating" | "nearest" => Ok(StrategyKind::NearestRating),
            "weighted-adjacent" | "weighted" => Ok(StrategyKind::WeightedAdjacent),
            "optimal-greedy" | "greedy" => Ok(StrategyKind::OptimalGreedy),
            other => Err(LadderError::ConfigurationError {
                message: format!("Unknown pairing strategy: {}", other),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_kind_parsing() {
        assert_eq!(
            "nearest-rating".parse::<StrategyKind>().unwrap(),
            StrategyKind::NearestRating
        );
        assert_eq!(
            "weighted".parse::<StrategyKind>().unwrap(),
            StrategyKind::WeightedAdjacent
        );
        assert_eq!(
            "greedy".parse::<StrategyKind>().unwrap(),
            StrategyKind::OptimalGreedy
        );
        assert!("round-robin".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_default_strategy_is_greedy() {
        assert_eq!(StrategyKind::default(), StrategyKind::OptimalGreedy);
    }

    #[test]
    fn test_build_names() {
        let config = RatingConfig::default();
        assert_eq!(
            StrategyKind::NearestRating.build(config.clone()).name(),
            "nearest-rating"
        );
        assert_eq!(
            StrategyKind::WeightedAdjacent.build(config.clone()).name(),
            "weighted-adjacent"
        );
        assert_eq!(
            StrategyKind::OptimalGreedy.build(config).name(),
            "optimal-greedy"
        );
    }

    #[test]
    fn test_ensure_enough_players() {
        assert!(ensure_enough_players(&[]).is_err());
        assert!(ensure_enough_players(&[Player::new(1, "solo")]).is_err());
        assert!(ensure_enough_players(&[Player::new(1, "a"), Player::new(2, "b")]).is_ok());
    }
}
