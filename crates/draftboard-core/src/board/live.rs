// Live-draft overlay.
//
// Stateless: given the base board and the picks made so far it returns a new
// board. Callers that poll a live draft simply re-run it on every refresh.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::builder::{DraftBoard, PickedPlayer};
use crate::league::{DraftPickRecord, DraftType};

/// Mark made picks and the pick on the clock.
///
/// Made picks are matched to the board by (round, draft slot). The pick on
/// the clock is overall pick `made_picks.len() + 1`; in snake drafts even
/// rounds run from slot N down to slot 1.
pub fn overlay_live_picks(
    base: &DraftBoard,
    made_picks: &[DraftPickRecord],
    draft_type: DraftType,
) -> DraftBoard {
    let made: HashMap<(u32, u32), &DraftPickRecord> = made_picks
        .iter()
        .map(|record| ((record.round, record.draft_slot), record))
        .collect();

    let mut board = base.clone();
    let mut matched = 0usize;
    for pick in &mut board.picks {
        pick.on_the_clock = false;
        pick.picked_player = made.get(&(pick.round, pick.slot)).map(|record| {
            matched += 1;
            PickedPlayer {
                player_id: record.player_id.clone(),
                name: record.player_name(),
                position: record.metadata.position.clone(),
                team: record.metadata.team.clone(),
            }
        });
    }
    if matched < made.len() {
        warn!(
            made = made.len(),
            matched,
            "some made picks fall outside the board"
        );
    }

    let next = made_picks.len() as u32 + 1;
    let teams = board.teams() as u32;
    if let Some((round, slot)) = slot_for_overall_pick(next, teams, board.rounds, draft_type) {
        if let Some(pick) = board
            .picks
            .iter_mut()
            .find(|p| p.round == round && p.slot == slot)
        {
            pick.on_the_clock = true;
            debug!(pick = %pick.label(), overall = next, "on the clock");
        }
    }

    board
}

/// Board position (round, slot) of a 1-based overall pick number, or `None`
/// past the end of the draft.
pub fn slot_for_overall_pick(
    overall: u32,
    teams: u32,
    rounds: u32,
    draft_type: DraftType,
) -> Option<(u32, u32)> {
    if overall == 0 || teams == 0 || overall > teams * rounds {
        return None;
    }
    let round = (overall - 1) / teams + 1;
    let offset = (overall - 1) % teams;
    let slot = match draft_type {
        DraftType::Snake if round % 2 == 0 => teams - offset,
        _ => offset + 1,
    };
    Some((round, slot))
}
