//! Season transitions and division roster management
//!
//! The processor computes end-of-season promotion/demotion cohorts and the
//! league-wide rating regression; the roster module keeps division ranks
//! contiguous and seeds leagues by distributing players across divisions.

pub mod processor;
pub mod roster;

pub use processor::{SeasonOutcome, SeasonProcessor};
pub use roster::{distribute_players, next_rank, remove_division, DivisionAssignment};
