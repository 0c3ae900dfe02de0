// Team standings: the per-team record the draft order is derived from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::league::{Roster, User};

/// One team's season summary and its assigned draft position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub roster_id: u32,
    pub owner_id: Option<String>,
    pub display_name: String,
    pub team_name: Option<String>,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
    /// Max PF computed from weekly optimal lineups.
    pub max_pf: f64,
    /// Max PF as reported by the league.
    pub league_max_pf: f64,
    /// 1 = champion. `None` for non-playoff or unresolved teams.
    pub playoff_finish: Option<u32>,
    /// 1 = first pick.
    pub draft_position: u32,
}

impl TeamStanding {
    /// Record as "W-L" or "W-L-T" when there are ties.
    pub fn record(&self) -> String {
        if self.ties > 0 {
            format!("{}-{}-{}", self.wins, self.losses, self.ties)
        } else {
            format!("{}-{}", self.wins, self.losses)
        }
    }

    /// Computed minus league-reported Max PF.
    pub fn max_pf_difference(&self) -> f64 {
        self.max_pf - self.league_max_pf
    }
}

/// Owner display name for a roster: the user's display name, else their team
/// name, else "Team {roster_id}".
pub fn display_name(roster: &Roster, users: &[User]) -> String {
    owner(roster, users)
        .and_then(|user| {
            if user.display_name.is_empty() {
                user.team_name().map(str::to_string)
            } else {
                Some(user.display_name.clone())
            }
        })
        .unwrap_or_else(|| fallback_name(roster.roster_id))
}

pub fn fallback_name(roster_id: u32) -> String {
    format!("Team {roster_id}")
}

fn owner<'a>(roster: &Roster, users: &'a [User]) -> Option<&'a User> {
    let owner_id = roster.owner_id.as_deref()?;
    users.iter().find(|u| u.user_id == owner_id)
}

/// Unordered standings for every roster, draft positions not yet assigned.
pub fn base_standings(
    rosters: &[Roster],
    users: &[User],
    max_pf: &HashMap<u32, f64>,
    playoff_finish: &HashMap<u32, u32>,
) -> Vec<TeamStanding> {
    rosters
        .iter()
        .map(|roster| TeamStanding {
            roster_id: roster.roster_id,
            owner_id: roster.owner_id.clone(),
            display_name: display_name(roster, users),
            team_name: owner(roster, users)
                .and_then(User::team_name)
                .map(str::to_string),
            wins: roster.settings.wins,
            losses: roster.settings.losses,
            ties: roster.settings.ties,
            points_for: roster.settings.points_for(),
            max_pf: max_pf.get(&roster.roster_id).copied().unwrap_or(0.0),
            league_max_pf: roster.settings.league_max_pf(),
            playoff_finish: playoff_finish.get(&roster.roster_id).copied(),
            draft_position: 0,
        })
        .collect()
}

/// Assign draft positions 1..N in slice order.
pub fn assign_positions(standings: &mut [TeamStanding]) {
    for (idx, team) in standings.iter_mut().enumerate() {
        team.draft_position = idx as u32 + 1;
    }
}

/// Roster ids indexed by draft position (index 0 = position 1).
///
/// Fails unless the positions are exactly 1..N with no duplicates or gaps.
pub fn roster_ids_by_position(standings: &[TeamStanding]) -> Result<Vec<u32>> {
    let n = standings.len();
    let mut by_position: Vec<Option<u32>> = vec![None; n];

    for team in standings {
        let position = team.draft_position as usize;
        if position == 0 || position > n {
            return Err(EngineError::InvalidDraftOrder {
                message: format!(
                    "roster {} has draft position {} outside 1..={}",
                    team.roster_id, team.draft_position, n
                ),
            });
        }
        if let Some(existing) = by_position[position - 1].replace(team.roster_id) {
            return Err(EngineError::InvalidDraftOrder {
                message: format!(
                    "draft position {} is assigned to both roster {} and roster {}",
                    position, existing, team.roster_id
                ),
            });
        }
    }

    // n entries with no duplicates in 1..=n cannot leave a gap, but keep the
    // check local to this function's contract.
    by_position
        .into_iter()
        .enumerate()
        .map(|(idx, roster)| {
            roster.ok_or_else(|| EngineError::InvalidDraftOrder {
                message: format!("no team holds draft position {}", idx + 1),
            })
        })
        .collect()
}
