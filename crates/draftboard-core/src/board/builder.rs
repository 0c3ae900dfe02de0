// Draft board construction: every (round, slot) pick with its original and
// current owner.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::ledger::PickLedger;
use crate::error::Result;
use crate::league::TradedPick;
use crate::standings::{fallback_name, roster_ids_by_position, TeamStanding};

/// Player already selected with a pick (live drafts only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickedPlayer {
    pub player_id: String,
    pub name: String,
    pub position: String,
    pub team: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPick {
    pub season: String,
    pub round: u32,
    /// Board column, 1..=N. Equals the original owner's draft position.
    pub slot: u32,
    pub original_owner: u32,
    pub current_owner: u32,
    pub original_owner_name: String,
    pub current_owner_name: String,
    pub is_traded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picked_player: Option<PickedPlayer>,
    #[serde(default)]
    pub on_the_clock: bool,
}

impl DraftPick {
    /// "round.slot" with a two-digit slot, e.g. `1.03`.
    pub fn label(&self) -> String {
        format!("{}.{:02}", self.round, self.slot)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftBoard {
    pub season: String,
    pub rounds: u32,
    /// Round-major, slot-minor.
    pub picks: Vec<DraftPick>,
}

impl DraftBoard {
    /// Teams per round.
    pub fn teams(&self) -> usize {
        if self.rounds == 0 {
            0
        } else {
            self.picks.len() / self.rounds as usize
        }
    }

    pub fn round(&self, round: u32) -> impl Iterator<Item = &DraftPick> {
        self.picks.iter().filter(move |p| p.round == round)
    }

    pub fn pick(&self, round: u32, slot: u32) -> Option<&DraftPick> {
        self.picks.iter().find(|p| p.round == round && p.slot == slot)
    }

    /// Picks currently owned by a roster, in board order.
    pub fn picks_owned_by(&self, roster_id: u32) -> impl Iterator<Item = &DraftPick> {
        self.picks
            .iter()
            .filter(move |p| p.current_owner == roster_id)
    }

    pub fn traded_picks(&self) -> impl Iterator<Item = &DraftPick> {
        self.picks.iter().filter(|p| p.is_traded)
    }
}

/// Build the board for `season` with `rounds` rounds.
///
/// Each team's draft position is its slot in every round. Fails if the
/// positions in `standings` are not exactly 1..N.
pub fn build_board(
    standings: &[TeamStanding],
    traded_picks: &[TradedPick],
    season: &str,
    rounds: u32,
) -> Result<DraftBoard> {
    let by_position = roster_ids_by_position(standings)?;
    let names: HashMap<u32, &str> = standings
        .iter()
        .map(|t| (t.roster_id, t.display_name.as_str()))
        .collect();
    let name_of = |roster_id: u32| {
        names
            .get(&roster_id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| fallback_name(roster_id))
    };

    let ledger = PickLedger::new(traded_picks, season);
    let mut picks = Vec::with_capacity(by_position.len() * rounds as usize);

    for round in 1..=rounds {
        for (idx, &original_owner) in by_position.iter().enumerate() {
            let current_owner = ledger.current_owner(round, original_owner);
            picks.push(DraftPick {
                season: ledger.season().to_string(),
                round,
                slot: idx as u32 + 1,
                original_owner,
                current_owner,
                original_owner_name: name_of(original_owner),
                current_owner_name: name_of(current_owner),
                is_traded: original_owner != current_owner,
                picked_player: None,
                on_the_clock: false,
            });
        }
    }

    info!(
        season,
        rounds,
        teams = by_position.len(),
        traded = ledger.traded_count(),
        "built draft board"
    );

    Ok(DraftBoard {
        season: ledger.season().to_string(),
        rounds,
        picks,
    })
}
