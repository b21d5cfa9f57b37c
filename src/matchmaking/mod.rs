//! Player pairing for match rounds
//!
//! Three interchangeable strategies produce disjoint pairings from a pool of
//! signed-in division members; the matchmaker orchestrates pool fetching,
//! strategy dispatch, and result recording.

pub mod greedy;
pub mod matchmaker;
pub mod nearest;
pub mod strategy;
pub mod weighted;

pub use greedy::OptimalGreedyStrategy;
pub use matchmaker::Matchmaker;
pub use nearest::NearestRatingStrategy;
pub use strategy::{PairingStrategy, StrategyKind};
pub use weighted::WeightedAdjacentStrategy;
