//! In-memory store implementation
//!
//! Backs the integration tests and the demo daemon. Ids are handed out
//! sequentially and collections iterate in key order, so every query is
//! deterministic for a given insertion sequence.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{LadderError, Result};
use crate::store::provider::{NewMatch, PlayerStore};
use crate::types::{
    Division, DivisionId, League, LeagueId, MatchId, MatchRecord, Player, PlayerId,
};

#[derive(Debug, Default)]
struct Inner {
    players: BTreeMap<PlayerId, Player>,
    divisions: BTreeMap<DivisionId, Division>,
    leagues: BTreeMap<LeagueId, League>,
    matches: Vec<MatchRecord>,
    next_player_id: PlayerId,
    next_division_id: DivisionId,
    next_league_id: LeagueId,
    next_match_id: MatchId,
}

/// Mutex-guarded in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Lock poisoning only happens if a panic escaped a store method
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a new player with the given starting rating
    pub fn insert_player(&self, name: impl Into<String>, rating: i32) -> Player {
        let mut inner = self.lock();
        inner.next_player_id += 1;
        let player = Player::new(inner.next_player_id, name).with_rating(rating);
        inner.players.insert(player.id, player.clone());
        player
    }

    /// Create a league
    pub fn insert_league(&self, name: impl Into<String>) -> League {
        let mut inner = self.lock();
        inner.next_league_id += 1;
        let league = League {
            id: inner.next_league_id,
            name: name.into(),
        };
        inner.leagues.insert(league.id, league.clone());
        league
    }

    /// Create a division in a league at the given rank
    pub fn insert_division(
        &self,
        league_id: LeagueId,
        name: impl Into<String>,
        rank: u32,
    ) -> Division {
        let mut inner = self.lock();
        inner.next_division_id += 1;
        let division = Division {
            id: inner.next_division_id,
            league_id,
            name: name.into(),
            rank,
        };
        inner.divisions.insert(division.id, division.clone());
        division
    }

    /// Put a player into a division and its league in one step
    pub fn place_player(&self, player_id: PlayerId, division: &Division) -> Result<()> {
        let mut inner = self.lock();
        let player = inner
            .players
            .get_mut(&player_id)
            .ok_or(LadderError::PlayerNotFound { player_id })?;
        player.division_id = Some(division.id);
        player.league_id = Some(division.league_id);
        Ok(())
    }
}

#[async_trait]
impl PlayerStore for MemoryStore {
    async fn player(&self, player_id: PlayerId) -> Result<Option<Player>> {
        Ok(self.lock().players.get(&player_id).cloned())
    }

    async fn all_players(&self) -> Result<Vec<Player>> {
        Ok(self.lock().players.values().cloned().collect())
    }

    async fn players_in_division(&self, division_id: DivisionId) -> Result<Vec<Player>> {
        Ok(self
            .lock()
            .players
            .values()
            .filter(|p| p.division_id == Some(division_id))
            .cloned()
            .collect())
    }

    async fn players_in_division_by_rating(
        &self,
        division_id: DivisionId,
    ) -> Result<Vec<Player>> {
        let mut players = self.players_in_division(division_id).await?;
        players.sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.id.cmp(&b.id)));
        Ok(players)
    }

    async fn signed_in_players_in_division(
        &self,
        division_id: DivisionId,
    ) -> Result<Vec<Player>> {
        Ok(self
            .lock()
            .players
            .values()
            .filter(|p| p.division_id == Some(division_id) && p.signed_in)
            .cloned()
            .collect())
    }

    async fn players_in_league(&self, league_id: LeagueId) -> Result<Vec<Player>> {
        Ok(self
            .lock()
            .players
            .values()
            .filter(|p| p.league_id == Some(league_id))
            .cloned()
            .collect())
    }

    async fn league(&self, league_id: LeagueId) -> Result<Option<League>> {
        Ok(self.lock().leagues.get(&league_id).cloned())
    }

    async fn divisions_in_league(&self, league_id: LeagueId) -> Result<Vec<Division>> {
        Ok(self
            .lock()
            .divisions
            .values()
            .filter(|d| d.league_id == league_id)
            .cloned()
            .collect())
    }

    async fn upsert_division(&self, division: Division) -> Result<()> {
        self.lock().divisions.insert(division.id, division);
        Ok(())
    }

    async fn delete_division(&self, division_id: DivisionId) -> Result<()> {
        let removed = self.lock().divisions.remove(&division_id);
        if removed.is_none() {
            return Err(LadderError::DivisionNotFound { division_id }.into());
        }
        Ok(())
    }

    async fn all_matches(&self) -> Result<Vec<MatchRecord>> {
        Ok(self.lock().matches.clone())
    }

    async fn matches_for_player(&self, player_id: PlayerId) -> Result<Vec<MatchRecord>> {
        Ok(self
            .lock()
            .matches
            .iter()
            .filter(|m| m.involves(player_id))
            .cloned()
            .collect())
    }

    async fn record_match(&self, new_match: NewMatch) -> Result<MatchRecord> {
        let mut inner = self.lock();
        inner.next_match_id += 1;
        let record = MatchRecord {
            id: inner.next_match_id,
            player1_id: new_match.player1_id,
            player2_id: new_match.player2_id,
            player1_score: new_match.player1_score,
            player2_score: new_match.player2_score,
            player1_rating_before: new_match.player1_rating_before,
            player2_rating_before: new_match.player2_rating_before,
            player1_rating_after: new_match.player1_rating_after,
            player2_rating_after: new_match.player2_rating_after,
            winner_id: new_match.winner_id,
            loser_id: new_match.loser_id,
            played_at: new_match.played_at,
        };
        inner.matches.push(record.clone());
        Ok(record)
    }

    async fn delete_match(&self, match_id: MatchId) -> Result<bool> {
        let mut inner = self.lock();
        let before = inner.matches.len();
        inner.matches.retain(|m| m.id != match_id);
        Ok(inner.matches.len() < before)
    }

    async fn update_rating(&self, player_id: PlayerId, new_rating: i32) -> Result<()> {
        let mut inner = self.lock();
        let player = inner
            .players
            .get_mut(&player_id)
            .ok_or(LadderError::PlayerNotFound { player_id })?;
        player.rating = new_rating;
        Ok(())
    }

    async fn increment_matches_played(&self, player_id: PlayerId) -> Result<()> {
        let mut inner = self.lock();
        let player = inner
            .players
            .get_mut(&player_id)
            .ok_or(LadderError::PlayerNotFound { player_id })?;
        player.matches_played += 1;
        Ok(())
    }

    async fn assign_division(
        &self,
        player_id: PlayerId,
        division_id: Option<DivisionId>,
    ) -> Result<()> {
        let mut inner = self.lock();
        let player = inner
            .players
            .get_mut(&player_id)
            .ok_or(LadderError::PlayerNotFound { player_id })?;
        player.division_id = division_id;
        Ok(())
    }

    async fn assign_league(
        &self,
        player_id: PlayerId,
        league_id: Option<LeagueId>,
    ) -> Result<()> {
        let mut inner = self.lock();
        let player = inner
            .players
            .get_mut(&player_id)
            .ok_or(LadderError::PlayerNotFound { player_id })?;
        player.league_id = league_id;
        Ok(())
    }

    async fn sign_in(&self, player_id: PlayerId, date: NaiveDate) -> Result<()> {
        let mut inner = self.lock();
        let player = inner
            .players
            .get_mut(&player_id)
            .ok_or(LadderError::PlayerNotFound { player_id })?;
        player.signed_in = true;
        player.last_active_date = Some(date);
        Ok(())
    }

    async fn sign_out(&self, player_id: PlayerId) -> Result<()> {
        let mut inner = self.lock();
        let player = inner
            .players
            .get_mut(&player_id)
            .ok_or(LadderError::PlayerNotFound { player_id })?;
        player.signed_in = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::current_date;

    #[tokio::test]
    async fn test_player_registration_and_lookup() {
        let store = MemoryStore::new();
        let alice = store.insert_player("alice", 1500);
        let bob = store.insert_player("bob", 1400);

        assert_ne!(alice.id, bob.id);
        let fetched = store.player(alice.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "alice");
        assert!(store.player(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_division_queries_filter_and_order() {
        let store = MemoryStore::new();
        let league = store.insert_league("main");
        let division = store.insert_division(league.id, "gold", 1);

        let a = store.insert_player("a", 1200);
        let b = store.insert_player("b", 1600);
        let c = store.insert_player("c", 1400);
        let outsider = store.insert_player("d", 2000);
        for p in [&a, &b, &c] {
            store.place_player(p.id, &division).unwrap();
        }

        let by_rating = store
            .players_in_division_by_rating(division.id)
            .await
            .unwrap();
        let ids: Vec<_> = by_rating.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![b.id, c.id, a.id]);
        assert!(!by_rating.iter().any(|p| p.id == outsider.id));
    }

    #[tokio::test]
    async fn test_sign_in_gates_matchmaking_pool() {
        let store = MemoryStore::new();
        let league = store.insert_league("main");
        let division = store.insert_division(league.id, "gold", 1);
        let a = store.insert_player("a", 1200);
        let b = store.insert_player("b", 1300);
        store.place_player(a.id, &division).unwrap();
        store.place_player(b.id, &division).unwrap();

        assert!(store
            .signed_in_players_in_division(division.id)
            .await
            .unwrap()
            .is_empty());

        store.sign_in(a.id, current_date()).await.unwrap();
        let pool = store
            .signed_in_players_in_division(division.id)
            .await
            .unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].id, a.id);
        assert!(pool[0].last_active_date.is_some());

        store.sign_out(a.id).await.unwrap();
        assert!(store
            .signed_in_players_in_division(division.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_match_ids_follow_creation_order() {
        let store = MemoryStore::new();
        let a = store.insert_player("a", 1500);
        let b = store.insert_player("b", 1500);

        let new_match = |s1: i32, s2: i32| NewMatch {
            player1_id: a.id,
            player2_id: b.id,
            player1_score: s1,
            player2_score: s2,
            player1_rating_before: 1500,
            player2_rating_before: 1500,
            player1_rating_after: 1500,
            player2_rating_after: 1500,
            winner_id: if s1 > s2 { a.id } else { b.id },
            loser_id: if s1 > s2 { b.id } else { a.id },
            played_at: chrono::Utc::now(),
        };

        let first = store.record_match(new_match(10, 5)).await.unwrap();
        let second = store.record_match(new_match(3, 7)).await.unwrap();
        assert!(second.id > first.id);

        let history = store.matches_for_player(a.id).await.unwrap();
        assert_eq!(history.len(), 2);

        assert!(store.delete_match(first.id).await.unwrap());
        assert!(!store.delete_match(first.id).await.unwrap());
        assert_eq!(store.all_matches().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_writes_to_unknown_player_fail() {
        let store = MemoryStore::new();
        assert!(store.update_rating(42, 1500).await.is_err());
        assert!(store.increment_matches_played(42).await.is_err());
        assert!(store.sign_in(42, current_date()).await.is_err());
    }
}
