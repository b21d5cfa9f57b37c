//! Division roster management
//!
//! Pure helpers for keeping division ranks contiguous and for seeding a
//! league by spreading its players across divisions. Callers persist the
//! returned divisions and assignments.

use tracing::info;

use crate::error::{LadderError, Result};
use crate::types::{Division, DivisionId, League, Player, PlayerId};

/// Rank for a division being added to a league: one past the current bottom
pub fn next_rank(divisions: &[Division]) -> u32 {
    divisions.iter().map(|d| d.rank).max().unwrap_or(0) + 1
}

/// Remove a division from a league's division list and re-pack the remaining
/// ranks into a contiguous run starting at 1
pub fn remove_division(divisions: &[Division], division_id: DivisionId) -> Result<Vec<Division>> {
    if !divisions.iter().any(|d| d.id == division_id) {
        return Err(LadderError::DivisionNotFound { division_id }.into());
    }

    let mut remaining: Vec<Division> = divisions
        .iter()
        .filter(|d| d.id != division_id)
        .cloned()
        .collect();
    remaining.sort_by_key(|d| d.rank);
    for (index, division) in remaining.iter_mut().enumerate() {
        division.rank = index as u32 + 1;
    }

    Ok(remaining)
}

/// A division assignment produced when seeding a league
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivisionAssignment {
    pub player_id: PlayerId,
    pub division_id: DivisionId,
}

/// Distribute a league's players across its divisions by rating: the best
/// players fill the top division first, and any remainder lands in the
/// bottom division.
pub fn distribute_players(
    league: &League,
    players: &[Player],
    divisions: &[Division],
) -> Result<Vec<DivisionAssignment>> {
    if divisions.is_empty() {
        return Err(LadderError::InvalidDivisionConfiguration {
            league_id: league.id,
            reason: "cannot distribute players without divisions".to_string(),
        }
        .into());
    }

    let mut ordered_divisions: Vec<&Division> = divisions.iter().collect();
    ordered_divisions.sort_by_key(|d| d.rank);

    let mut ordered_players: Vec<&Player> = players.iter().collect();
    ordered_players.sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.id.cmp(&b.id)));

    let division_size = ordered_players.len() / ordered_divisions.len();
    let mut assignments = Vec::with_capacity(ordered_players.len());
    let mut player_index = 0;

    for division in &ordered_divisions {
        for _ in 0..division_size {
            if player_index >= ordered_players.len() {
                break;
            }
            assignments.push(DivisionAssignment {
                player_id: ordered_players[player_index].id,
                division_id: division.id,
            });
            player_index += 1;
        }
    }

    // Leftovers go to the bottom division
    let bottom = ordered_divisions[ordered_divisions.len() - 1];
    while player_index < ordered_players.len() {
        assignments.push(DivisionAssignment {
            player_id: ordered_players[player_index].id,
            division_id: bottom.id,
        });
        player_index += 1;
    }

    info!(
        league_id = league.id,
        players = assignments.len(),
        divisions = ordered_divisions.len(),
        "distributed players across divisions"
    );

    Ok(assignments)
}
