//! Common types used throughout the ladder engine

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for players
pub type PlayerId = u64;

/// Unique identifier for divisions
pub type DivisionId = u64;

/// Unique identifier for leagues
pub type LeagueId = u64;

/// Unique identifier for recorded matches. Ids are assigned in creation
/// order; the recent-form metric depends on that ordering.
pub type MatchId = u64;

/// Baseline rating assigned to new players and targeted by regression
pub const DEFAULT_RATING: i32 = 1500;

/// A player on the ladder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Current skill rating; never negative
    pub rating: i32,
    /// Lifetime number of recorded matches
    pub matches_played: u64,
    pub last_active_date: Option<NaiveDate>,
    /// Division membership; `None` until distributed
    pub division_id: Option<DivisionId>,
    pub league_id: Option<LeagueId>,
    /// Gate for matchmaking eligibility
    pub signed_in: bool,
}

impl Player {
    /// Create a player with the default rating and no assignments
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            rating: DEFAULT_RATING,
            matches_played: 0,
            last_active_date: None,
            division_id: None,
            league_id: None,
            signed_in: false,
        }
    }

    /// Builder-style rating override, mostly useful in tests and seeds
    pub fn with_rating(mut self, rating: i32) -> Self {
        self.rating = rating;
        self
    }
}

/// A ranked tier inside a league
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Division {
    pub id: DivisionId,
    pub league_id: LeagueId,
    pub name: String,
    /// Position within the league: contiguous from 1, where 1 is the top tier
    pub rank: u32,
}

/// A grouping of divisions and players; carries no behavior of its own
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
}

/// A recorded match between two players, immutable once stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub player1_score: i32,
    pub player2_score: i32,
    pub player1_rating_before: i32,
    pub player2_rating_before: i32,
    pub player1_rating_after: i32,
    pub player2_rating_after: i32,
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    pub played_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Whether the given player took part in this match
    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.player1_id == player_id || self.player2_id == player_id
    }

    /// Whether this match was played between the two given players,
    /// in either seat order
    pub fn is_between(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.player1_id == a && self.player2_id == b)
            || (self.player1_id == b && self.player2_id == a)
    }
}

/// Derive winner and loser from a score line. Draws are not representable:
/// the higher score wins, and an exact tie falls to the second seat.
pub fn decide_outcome(
    player1_id: PlayerId,
    player2_id: PlayerId,
    player1_score: i32,
    player2_score: i32,
) -> (PlayerId, PlayerId) {
    if player1_score > player2_score {
        (player1_id, player2_id)
    } else {
        (player2_id, player1_id)
    }
}

/// An ephemeral pairing produced by the matchmaker for a single round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
}

impl Pairing {
    pub fn new(player1_id: PlayerId, player2_id: PlayerId) -> Self {
        Self {
            player1_id,
            player2_id,
        }
    }

    /// Whether the given player is one of the pair
    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.player1_id == player_id || self.player2_id == player_id
    }
}

/// Rating change computed by the engine for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub player_id: PlayerId,
    pub old_rating: i32,
    pub new_rating: i32,
}

/// Direction of a season-boundary division change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    Promotion,
    Demotion,
}

impl std::fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveDirection::Promotion => write!(f, "promotion"),
            MoveDirection::Demotion => write!(f, "demotion"),
        }
    }
}

/// A division reassignment computed by the season processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionMove {
    pub player_id: PlayerId,
    pub from_division_id: DivisionId,
    pub to_division_id: DivisionId,
    pub direction: MoveDirection,
}
