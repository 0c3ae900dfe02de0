// Pick ownership after trades.
//
// Traded-pick records already carry the final owner, so resolution is a
// lookup rather than a replay of the trade chain.

use std::collections::HashMap;

use tracing::warn;

use crate::league::TradedPick;

/// Current owner of the pick originally belonging to `original_owner`.
///
/// The first record matching (season, round, original owner) wins. With no
/// matching record the pick was never traded.
pub fn current_owner(
    traded_picks: &[TradedPick],
    season: &str,
    round: u32,
    original_owner: u32,
) -> u32 {
    traded_picks
        .iter()
        .find(|t| t.season == season && t.round == round && t.roster_id == original_owner)
        .map(|t| t.owner_id)
        .unwrap_or(original_owner)
}

/// Traded picks of one season indexed by (round, original owner).
#[derive(Debug, Clone, Default)]
pub struct PickLedger {
    season: String,
    owners: HashMap<(u32, u32), u32>,
}

impl PickLedger {
    pub fn new(traded_picks: &[TradedPick], season: &str) -> Self {
        let mut owners = HashMap::new();
        for pick in traded_picks.iter().filter(|t| t.season == season) {
            let key = (pick.round, pick.roster_id);
            if let Some(&kept) = owners.get(&key) {
                if kept != pick.owner_id {
                    warn!(
                        season,
                        round = pick.round,
                        original_owner = pick.roster_id,
                        kept,
                        ignored = pick.owner_id,
                        "conflicting traded-pick records, keeping the first"
                    );
                }
                continue;
            }
            owners.insert(key, pick.owner_id);
        }

        Self {
            season: season.to_string(),
            owners,
        }
    }

    pub fn season(&self) -> &str {
        &self.season
    }

    /// Number of picks in this season that changed hands.
    pub fn traded_count(&self) -> usize {
        self.owners
            .iter()
            .filter(|((_, original), owner)| original != *owner)
            .count()
    }

    pub fn current_owner(&self, round: u32, original_owner: u32) -> u32 {
        self.owners
            .get(&(round, original_owner))
            .copied()
            .unwrap_or(original_owner)
    }
}
