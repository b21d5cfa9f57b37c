//! Store trait the engine consumes
//!
//! Keyed lookups plus the handful of filtered queries the engine needs.
//! Implementations own transaction boundaries and per-player write ordering;
//! the engine treats each returned snapshot as immutable for the duration of
//! one computation.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::Result;
use crate::types::{
    Division, DivisionId, League, LeagueId, MatchId, MatchRecord, Player, PlayerId,
};

/// A match to be recorded; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewMatch {
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

/// Persistence collaborator for players, divisions, leagues, and matches
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Fetch a single player
    async fn player(&self, player_id: PlayerId) -> Result<Option<Player>>;

    /// Fetch every player, for population-wide sweeps
    async fn all_players(&self) -> Result<Vec<Player>>;

    /// Players assigned to a division
    async fn players_in_division(&self, division_id: DivisionId) -> Result<Vec<Player>>;

    /// Players assigned to a division, ordered by rating descending
    async fn players_in_division_by_rating(&self, division_id: DivisionId)
        -> Result<Vec<Player>>;

    /// Signed-in players in a division: the matchmaking pool
    async fn signed_in_players_in_division(&self, division_id: DivisionId)
        -> Result<Vec<Player>>;

    /// Players assigned to a league
    async fn players_in_league(&self, league_id: LeagueId) -> Result<Vec<Player>>;

    /// Fetch a league
    async fn league(&self, league_id: LeagueId) -> Result<Option<League>>;

    /// Divisions belonging to a league, in no particular order
    async fn divisions_in_league(&self, league_id: LeagueId) -> Result<Vec<Division>>;

    /// Insert or update a division
    async fn upsert_division(&self, division: Division) -> Result<()>;

    /// Delete a division; players keep their assignment until reassigned
    async fn delete_division(&self, division_id: DivisionId) -> Result<()>;

    /// Every recorded match, in creation order
    async fn all_matches(&self) -> Result<Vec<MatchRecord>>;

    /// Matches involving a player, in creation order
    async fn matches_for_player(&self, player_id: PlayerId) -> Result<Vec<MatchRecord>>;

    /// Persist a new match record, assigning its id
    async fn record_match(&self, new_match: NewMatch) -> Result<MatchRecord>;

    /// Delete a match record
    async fn delete_match(&self, match_id: MatchId) -> Result<bool>;

    /// Write back a player's rating
    async fn update_rating(&self, player_id: PlayerId, new_rating: i32) -> Result<()>;

    /// Bump a player's lifetime match counter
    async fn increment_matches_played(&self, player_id: PlayerId) -> Result<()>;

    /// Reassign a player's division
    async fn assign_division(
        &self,
        player_id: PlayerId,
        division_id: Option<DivisionId>,
    ) -> Result<()>;

    /// Reassign a player's league
    async fn assign_league(&self, player_id: PlayerId, league_id: Option<LeagueId>)
        -> Result<()>;

    /// Mark a player signed in and refresh their activity date
    async fn sign_in(&self, player_id: PlayerId, date: NaiveDate) -> Result<()>;

    /// Mark a player signed out
    async fn sign_out(&self, player_id: PlayerId) -> Result<()>;
}
