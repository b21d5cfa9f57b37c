//! Test fixtures for integration testing

use std::sync::Arc;

use rank_ladder::store::MemoryStore;
use rank_ladder::types::{Division, League, Player};
use rank_ladder::utils::current_date;
use rank_ladder::PlayerStore;

/// A seeded ladder: one league, ranked divisions, and signed-in players
pub struct TestLadder {
    pub store: Arc<MemoryStore>,
    pub league: League,
    pub divisions: Vec<Division>,
    pub players: Vec<Player>,
}

/// Seed a league with `divisions.len()` ranked divisions and the given
/// ratings per division, signing every player in. Ratings are assigned in
/// the order given; ids follow insertion order.
pub async fn seed_ladder(ratings_per_division: &[Vec<i32>]) -> TestLadder {
    let store = Arc::new(MemoryStore::new());
    let league = store.insert_league("test-league");

    let mut divisions = Vec::new();
    let mut players = Vec::new();

    for (index, ratings) in ratings_per_division.iter().enumerate() {
        let division = store.insert_division(
            league.id,
            format!("division-{}", index + 1),
            index as u32 + 1,
        );

        for rating in ratings {
            let player = store.insert_player(format!("player-{}", players.len() + 1), *rating);
            store.place_player(player.id, &division).unwrap();
            store.sign_in(player.id, current_date()).await.unwrap();
            players.push(store.player(player.id).await.unwrap().unwrap());
        }

        divisions.push(division);
    }

    TestLadder {
        store,
        league,
        divisions,
        players,
    }
}

/// Evenly spaced ratings starting at `base`, stepping by `step`
pub fn spread(base: i32, step: i32, count: usize) -> Vec<i32> {
    (0..count).map(|i| base + step * i as i32).collect()
}
