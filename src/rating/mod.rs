//! Rating system for the ladder
//!
//! The Elo engine computes expected scores, post-match ratings, inactivity
//! decay, and seasonal regression. The form module derives the recent-form
//! and weighted-score metrics the matchmaker ranks players by.

pub mod elo;
pub mod form;

pub use elo::{EloEngine, MatchOutcome};
pub use form::{compatibility_penalty, recent_performance, rematch_count, weighted_score};
