//! Matchmaker orchestration
//!
//! Fetches the eligible pool and history from the store, delegates pairing to
//! the configured strategy, and records match results through the rating
//! engine. The engine output is persisted as one write set per match.

use std::sync::Arc;

use tracing::info;

use crate::error::{LadderError, Result};
use crate::matchmaking::strategy::PairingStrategy;
use crate::rating::EloEngine;
use crate::store::{NewMatch, PlayerStore};
use crate::types::{DivisionId, MatchRecord, Pairing, PlayerId};
use crate::utils::current_timestamp;

/// Pairs division members and records results
pub struct Matchmaker {
    store: Arc<dyn PlayerStore>,
    engine: EloEngine,
    strategy: Box<dyn PairingStrategy>,
}

impl Matchmaker {
    pub fn new(
        store: Arc<dyn PlayerStore>,
        engine: EloEngine,
        strategy: Box<dyn PairingStrategy>,
    ) -> Self {
        Self {
            store,
            engine,
            strategy,
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Produce one round of pairings for a division from its signed-in
    /// players. Fails with `NotEnoughPlayers` when fewer than two are
    /// signed in.
    pub async fn pair_division(&self, division_id: DivisionId) -> Result<Vec<Pairing>> {
        let pool = self
            .store
            .signed_in_players_in_division(division_id)
            .await?;
        if pool.len() < 2 {
            return Err(LadderError::NotEnoughPlayers {
                division_id,
                available: pool.len(),
            }
            .into());
        }

        let history = self.store.all_matches().await?;
        let pairs = self.strategy.pair_players(&pool, &history)?;

        info!(
            division_id,
            strategy = self.strategy.name(),
            pool_size = pool.len(),
            pair_count = pairs.len(),
            "completed matchmaking round"
        );

        Ok(pairs)
    }

    /// Record a finished match: capture pre-match ratings, compute both new
    /// ratings simultaneously, then persist ratings, match counters, and the
    /// match record. Fails fast with `PlayerNotFound` before any write.
    pub async fn record_result(
        &self,
        player1_id: PlayerId,
        player2_id: PlayerId,
        score1: i32,
        score2: i32,
    ) -> Result<MatchRecord> {
        let player1 = self
            .store
            .player(player1_id)
            .await?
            .ok_or(LadderError::PlayerNotFound {
                player_id: player1_id,
            })?;
        let player2 = self
            .store
            .player(player2_id)
            .await?
            .ok_or(LadderError::PlayerNotFound {
                player_id: player2_id,
            })?;

        let outcome = self.engine.apply_match(&player1, &player2, score1, score2)?;

        self.store
            .update_rating(player1.id, outcome.player1_update.new_rating)
            .await?;
        self.store
            .update_rating(player2.id, outcome.player2_update.new_rating)
            .await?;
        self.store.increment_matches_played(player1.id).await?;
        self.store.increment_matches_played(player2.id).await?;

        let record = self
            .store
            .record_match(NewMatch {
                player1_id: player1.id,
                player2_id: player2.id,
                player1_score: score1,
                player2_score: score2,
                player1_rating_before: outcome.player1_update.old_rating,
                player2_rating_before: outcome.player2_update.old_rating,
                player1_rating_after: outcome.player1_update.new_rating,
                player2_rating_after: outcome.player2_update.new_rating,
                winner_id: outcome.winner_id,
                loser_id: outcome.loser_id,
                played_at: current_timestamp(),
            })
            .await?;

        info!(
            match_id = record.id,
            winner_id = record.winner_id,
            loser_id = record.loser_id,
            "recorded match result"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RatingConfig;
    use crate::matchmaking::strategy::StrategyKind;
    use crate::store::MemoryStore;
    use crate::utils::current_date;

    async fn seeded_store(ratings: &[i32]) -> (Arc<MemoryStore>, DivisionId) {
        let store = Arc::new(MemoryStore::new());
        let league = store.insert_league("main");
        let division = store.insert_division(league.id, "gold", 1);
        for (i, rating) in ratings.iter().enumerate() {
            let player = store.insert_player(format!("player{}", i + 1), *rating);
            store.place_player(player.id, &division).unwrap();
            store.sign_in(player.id, current_date()).await.unwrap();
        }
        (store, division.id)
    }

    fn matchmaker(store: Arc<MemoryStore>, kind: StrategyKind) -> Matchmaker {
        let config = RatingConfig::default();
        Matchmaker::new(
            store,
            EloEngine::new(config.clone()).unwrap(),
            kind.build(config),
        )
    }

    #[tokio::test]
    async fn test_pair_division_produces_disjoint_pairs() {
        let (store, division_id) = seeded_store(&[1000, 1020, 1040, 1060, 1080, 1100]).await;
        let matchmaker = matchmaker(store, StrategyKind::OptimalGreedy);

        let pairs = matchmaker.pair_division(division_id).await.unwrap();
        assert_eq!(pairs.len(), 3);

        let mut seen = std::collections::HashSet::new();
        for pairing in &pairs {
            assert!(seen.insert(pairing.player1_id));
            assert!(seen.insert(pairing.player2_id));
        }
    }

    #[tokio::test]
    async fn test_pair_division_requires_two_players() {
        let (store, division_id) = seeded_store(&[1500]).await;
        let matchmaker = matchmaker(store, StrategyKind::NearestRating);

        let err = matchmaker.pair_division(division_id).await.unwrap_err();
        let ladder_err = err.downcast::<LadderError>().unwrap();
        assert!(matches!(
            ladder_err,
            LadderError::NotEnoughPlayers { available: 1, .. }
        ));
    }

    #[tokio::test]
    async fn test_signed_out_players_are_not_paired() {
        let (store, division_id) = seeded_store(&[1000, 1010, 1020, 1030]).await;
        // Sign out two of the four
        store.sign_out(1).await.unwrap();
        store.sign_out(4).await.unwrap();
        let matchmaker = matchmaker(store, StrategyKind::WeightedAdjacent);

        let pairs = matchmaker.pair_division(division_id).await.unwrap();
        assert_eq!(pairs, vec![Pairing::new(3, 2)]);
    }

    #[tokio::test]
    async fn test_record_result_persists_atomically_computed_ratings() {
        let (store, _) = seeded_store(&[1000, 1200]).await;
        let matchmaker = matchmaker(store.clone(), StrategyKind::OptimalGreedy);

        let record = matchmaker.record_result(1, 2, 10, 5).await.unwrap();
        assert_eq!(record.winner_id, 1);
        assert_eq!(record.player1_rating_before, 1000);
        assert_eq!(record.player1_rating_after, 1024);
        assert_eq!(record.player2_rating_after, 1175);

        let winner = store.player(1).await.unwrap().unwrap();
        let loser = store.player(2).await.unwrap().unwrap();
        assert_eq!(winner.rating, 1024);
        assert_eq!(loser.rating, 1175);
        assert_eq!(winner.matches_played, 1);
        assert_eq!(loser.matches_played, 1);
    }

    #[tokio::test]
    async fn test_record_result_fails_fast_on_unknown_player() {
        let (store, _) = seeded_store(&[1000]).await;
        let matchmaker = matchmaker(store.clone(), StrategyKind::OptimalGreedy);

        assert!(matchmaker.record_result(1, 99, 10, 5).await.is_err());

        // Nothing was written
        let player = store.player(1).await.unwrap().unwrap();
        assert_eq!(player.rating, 1000);
        assert_eq!(player.matches_played, 0);
        assert!(store.all_matches().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rounds_avoid_immediate_rematch() {
        let (store, division_id) = seeded_store(&[1000, 1005, 1010, 1015]).await;
        let matchmaker = matchmaker(store.clone(), StrategyKind::OptimalGreedy);

        let first_round = matchmaker.pair_division(division_id).await.unwrap();
        for pairing in &first_round {
            matchmaker
                .record_result(pairing.player1_id, pairing.player2_id, 10, 5)
                .await
                .unwrap();
        }

        // With ratings still close, the rematch penalty forces new opponents
        let second_round = matchmaker.pair_division(division_id).await.unwrap();
        for pairing in &second_round {
            assert!(!first_round.iter().any(|p| {
                p.contains(pairing.player1_id) && p.contains(pairing.player2_id)
            }));
        }
    }
}
