// Optimal lineup scoring for a single week.
//
// Two strategies share the same candidate and slot preparation:
// - Greedy: fill slots most-restrictive-first with the best unused eligible
//   player. Matches the league tooling this board is compared against, but can
//   under-count layouts with several overlapping flex slots.
// - Optimal: maximum-weight bipartite matching of slots to players
//   (Kuhn-Munkres), which never scores below greedy.

use std::collections::HashMap;

use pathfinding::kuhn_munkres::kuhn_munkres;
use pathfinding::matrix::Matrix;
use serde::{Deserialize, Serialize};

use super::position::{classify_unlisted, starting_slots, Position, Slot};
use crate::league::PlayerDirectory;

/// How a week's lineup is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineupStrategy {
    #[default]
    Greedy,
    Optimal,
}

/// A scored player able to fill at least one kind of slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub player_id: String,
    pub position: Position,
    pub points: f64,
}

/// Build lineup candidates from a week's scores, sorted by descending points
/// (ties by player id so results do not depend on map iteration order).
///
/// Ids missing from the directory are kept only when they classify as a team
/// defense. Directory players without a scoreable position are dropped.
pub fn candidates(
    weekly_scores: &HashMap<String, f64>,
    players: &PlayerDirectory,
) -> Vec<Candidate> {
    let mut out: Vec<Candidate> = weekly_scores
        .iter()
        .filter_map(|(player_id, &points)| {
            let position = match players.get(player_id) {
                Some(player) => player.position.as_deref().and_then(Position::from_str_pos),
                None => classify_unlisted(player_id),
            }?;
            let points = if points.is_finite() { points } else { 0.0 };
            Some(Candidate {
                player_id: player_id.clone(),
                position,
                points,
            })
        })
        .collect();

    out.sort_by(|a, b| {
        b.points
            .partial_cmp(&a.points)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    out
}

/// Starting slots in greedy fill order. Equal priorities keep layout order.
pub fn slots_in_fill_order<S: AsRef<str>>(layout: &[S]) -> Vec<Slot> {
    let mut slots = starting_slots(layout);
    slots.sort_by_key(Slot::fill_priority);
    slots
}

/// Maximum points for one week under the greedy slot-priority assignment.
pub fn optimal_lineup_points<S: AsRef<str>>(
    weekly_scores: &HashMap<String, f64>,
    slot_layout: &[S],
    players: &PlayerDirectory,
) -> f64 {
    lineup_points(LineupStrategy::Greedy, weekly_scores, slot_layout, players)
}

/// Maximum points for one week under the chosen strategy.
pub fn lineup_points<S: AsRef<str>>(
    strategy: LineupStrategy,
    weekly_scores: &HashMap<String, f64>,
    slot_layout: &[S],
    players: &PlayerDirectory,
) -> f64 {
    if weekly_scores.is_empty() {
        return 0.0;
    }
    let pool = candidates(weekly_scores, players);
    let slots = slots_in_fill_order(slot_layout);
    match strategy {
        LineupStrategy::Greedy => greedy_total(&pool, &slots),
        LineupStrategy::Optimal => matched_total(&pool, &slots),
    }
}

fn greedy_total(pool: &[Candidate], slots: &[Slot]) -> f64 {
    let mut used = vec![false; pool.len()];
    let mut total = 0.0;

    for slot in slots {
        let best = pool
            .iter()
            .enumerate()
            .find(|(idx, c)| !used[*idx] && slot.accepts(c.position));
        if let Some((idx, candidate)) = best {
            used[idx] = true;
            total += candidate.points;
        }
    }

    total
}

// Points are matched in hundredths so the weights stay integral.
const WEIGHT_SCALE: f64 = 100.0;

fn matched_total(pool: &[Candidate], slots: &[Slot]) -> f64 {
    if slots.is_empty() || pool.is_empty() {
        return 0.0;
    }

    // One padding column per slot guarantees rows <= columns and lets any slot
    // stay empty at zero weight.
    let columns = pool.len() + slots.len();
    let weight = |slot: &Slot, column: usize| -> i64 {
        match pool.get(column) {
            Some(c) if slot.accepts(c.position) => (c.points * WEIGHT_SCALE).round() as i64,
            _ => 0,
        }
    };
    let weights = Matrix::from_fn(slots.len(), columns, |(row, column)| {
        weight(&slots[row], column)
    });

    let (_, assignment) = kuhn_munkres(&weights);

    assignment
        .iter()
        .enumerate()
        .filter_map(|(row, &column)| {
            let candidate = pool.get(column)?;
            (slots[row].accepts(candidate.position) && candidate.points > 0.0)
                .then_some(candidate.points)
        })
        .sum()
}
