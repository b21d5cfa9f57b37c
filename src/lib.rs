//! Rank Ladder - Matchmaking and rating engine for competitive ladders
//!
//! This crate pairs signed-in division members for matches, updates Elo
//! ratings from results, and handles season transitions with promotion,
//! demotion, and rating regression.

pub mod config;
pub mod error;
pub mod matchmaking;
pub mod rating;
pub mod season;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LadderError, Result};
pub use types::*;

// Re-export key components
pub use matchmaking::{Matchmaker, PairingStrategy, StrategyKind};
pub use rating::EloEngine;
pub use season::SeasonProcessor;
pub use store::{MemoryStore, PlayerStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
