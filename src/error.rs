//! Error types for the ladder engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

use crate::types::{DivisionId, LeagueId, PlayerId};

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific ladder scenarios
#[derive(Debug, thiserror::Error)]
pub enum LadderError {
    #[error(
        "Not enough players signed in for matchmaking in division {division_id}: {available} available"
    )]
    NotEnoughPlayers {
        division_id: DivisionId,
        available: usize,
    },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: PlayerId },

    #[error("Division not found: {division_id}")]
    DivisionNotFound { division_id: DivisionId },

    #[error("League not found: {league_id}")]
    LeagueNotFound { league_id: LeagueId },

    #[error("Invalid division configuration for league {league_id}: {reason}")]
    InvalidDivisionConfiguration { league_id: LeagueId, reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal engine error: {message}")]
    InternalError { message: String },
}
