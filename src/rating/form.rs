//! Recent-form metrics derived from match history
//!
//! These functions rank players for matchmaking. They operate on history
//! snapshots passed in by the caller; nothing here touches storage.

use tracing::trace;

use crate::config::RatingConfig;
use crate::types::{MatchRecord, Player, PlayerId};

/// Form score over a player's most recent matches: points per win inside the
/// window, zero otherwise.
///
/// Recency is creation order (match id, newest first), not the recorded
/// timestamp. Fewer matches than the window means all of them count.
pub fn recent_performance(
    history: &[MatchRecord],
    player_id: PlayerId,
    config: &RatingConfig,
) -> i32 {
    let mut involved: Vec<&MatchRecord> = history
        .iter()
        .filter(|record| record.involves(player_id))
        .collect();
    involved.sort_by(|a, b| b.id.cmp(&a.id));

    let wins = involved
        .iter()
        .take(config.performance_window)
        .filter(|record| record.winner_id == player_id)
        .count() as i32;

    let performance = config.performance_points_per_win * wins;
    trace!(player_id, wins, performance, "computed recent performance");
    performance
}

/// Number of past matches between two players, in either seat order
pub fn rematch_count(history: &[MatchRecord], a: PlayerId, b: PlayerId) -> usize {
    history
        .iter()
        .filter(|record| record.is_between(a, b))
        .count()
}

/// Pairing penalty that grows with every previous meeting, discouraging
/// repeated rematches of the same two players
pub fn compatibility_penalty(
    history: &[MatchRecord],
    a: PlayerId,
    b: PlayerId,
    config: &RatingConfig,
) -> f64 {
    rematch_count(history, a, b) as f64 * config.rematch_penalty
}

/// Ranking key blending long-run skill, experience, and recent form.
///
/// Two players who have never met but differ in experience are not treated
/// as equally matched purely on rating.
pub fn weighted_score(player: &Player, history: &[MatchRecord], config: &RatingConfig) -> f64 {
    let performance = recent_performance(history, player.id, config);
    config.rating_weight * player.rating as f64
        + config.experience_weight * player.matches_played as f64
        + config.performance_weight * performance as f64
}
