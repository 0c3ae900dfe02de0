// Draft order policies.
//
// Every policy produces the full standings list sorted by draft position
// (1 = first pick). Sorts are stable, so teams with equal keys keep roster
// input order.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{EngineError, Result};
use crate::league::{Draft, PlayoffMatchup, Roster, User};
use crate::playoffs::{participant_team_ids, resolve_finish};
use crate::standings::{assign_positions, base_standings, roster_ids_by_position, TeamStanding};

/// Finish rank used for playoff teams the bracket has not placed.
pub const UNRANKED_FINISH: u32 = 99;

/// How the draft order is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftOrderMethod {
    /// Worst record picks first; ties broken by lower points-for.
    Standings,
    /// Non-playoff teams by lowest Max PF, then playoff teams by worst finish.
    #[default]
    StandingsMaxPf,
    /// Order already set on the provider's draft.
    #[serde(alias = "external_draft")]
    SleeperDraft,
}

impl DraftOrderMethod {
    pub fn name(self) -> &'static str {
        match self {
            DraftOrderMethod::Standings => "standings",
            DraftOrderMethod::StandingsMaxPf => "standings_max_pf",
            DraftOrderMethod::SleeperDraft => "sleeper_draft",
        }
    }

    /// Human-readable description for reports.
    pub fn description(self) -> &'static str {
        match self {
            DraftOrderMethod::Standings => "Standings (worst record picks first)",
            DraftOrderMethod::StandingsMaxPf => {
                "Standings + Max PF (non-playoff teams by lowest Max PF, then playoff finish)"
            }
            DraftOrderMethod::SleeperDraft => "Draft order set on the league's draft",
        }
    }
}

impl fmt::Display for DraftOrderMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the policies may read. Which fields are required depends on
/// the method.
#[derive(Debug, Clone, Copy)]
pub struct OrderInputs<'a> {
    pub rosters: &'a [Roster],
    pub users: &'a [User],
    /// Computed Max PF per roster id. Missing rosters count as 0.
    pub max_pf: &'a HashMap<u32, f64>,
    pub bracket: Option<&'a [PlayoffMatchup]>,
    pub playoff_teams: Option<u32>,
    pub draft: Option<&'a Draft>,
}

/// Compute the draft order under `method`.
pub fn calculate_draft_order(
    method: DraftOrderMethod,
    inputs: &OrderInputs<'_>,
) -> Result<Vec<TeamStanding>> {
    let finish = inputs.bracket.map(resolve_finish).unwrap_or_default();
    let mut standings = base_standings(inputs.rosters, inputs.users, inputs.max_pf, &finish);

    match method {
        DraftOrderMethod::Standings => {
            sort_by_record(&mut standings);
            assign_positions(&mut standings);
        }
        DraftOrderMethod::StandingsMaxPf => {
            standings = order_by_max_pf(method, standings, inputs)?;
            assign_positions(&mut standings);
        }
        DraftOrderMethod::SleeperDraft => {
            apply_draft_slots(method, &mut standings, inputs.draft)?;
        }
    }

    info!(
        method = method.name(),
        teams = standings.len(),
        "calculated draft order"
    );
    Ok(standings)
}

fn sort_by_record(standings: &mut [TeamStanding]) {
    standings.sort_by(|a, b| {
        a.wins.cmp(&b.wins).then(
            a.points_for
                .partial_cmp(&b.points_for)
                .unwrap_or(Ordering::Equal),
        )
    });
}

fn order_by_max_pf(
    method: DraftOrderMethod,
    standings: Vec<TeamStanding>,
    inputs: &OrderInputs<'_>,
) -> Result<Vec<TeamStanding>> {
    let policy = method.name();
    let bracket = inputs.bracket.ok_or(EngineError::MissingPolicyInput {
        policy,
        field: "a winners bracket",
    })?;
    match inputs.playoff_teams {
        Some(n) if n > 0 => {}
        _ => {
            return Err(EngineError::MissingPolicyInput {
                policy,
                field: "a playoff team count",
            })
        }
    }

    let participants: HashSet<u32> = participant_team_ids(bracket);
    let (mut playoff, mut non_playoff): (Vec<_>, Vec<_>) = standings
        .into_iter()
        .partition(|team| participants.contains(&team.roster_id));

    non_playoff.sort_by(|a, b| a.max_pf.partial_cmp(&b.max_pf).unwrap_or(Ordering::Equal));
    // Worse finish (higher number) picks earlier; the champion picks last.
    playoff.sort_by_key(|team| std::cmp::Reverse(team.playoff_finish.unwrap_or(UNRANKED_FINISH)));

    debug!(
        non_playoff = non_playoff.len(),
        playoff = playoff.len(),
        "split teams by playoff participation"
    );

    non_playoff.extend(playoff);
    Ok(non_playoff)
}

fn apply_draft_slots(
    method: DraftOrderMethod,
    standings: &mut [TeamStanding],
    draft: Option<&Draft>,
) -> Result<()> {
    let policy = method.name();
    let draft = draft.ok_or(EngineError::MissingPolicyInput {
        policy,
        field: "a draft",
    })?;
    let slots = match &draft.slot_to_roster_id {
        Some(slots) if !slots.is_empty() => slots,
        _ => return Err(EngineError::DraftOrderNotSet { policy }),
    };

    if slots.len() != standings.len() {
        return Err(EngineError::InvalidDraftOrder {
            message: format!(
                "draft assigns {} slots but the league has {} rosters",
                slots.len(),
                standings.len()
            ),
        });
    }

    let mut slot_by_roster: HashMap<u32, u32> = HashMap::with_capacity(slots.len());
    for (slot, &roster_id) in slots {
        let slot: u32 = slot.parse().map_err(|_| EngineError::InvalidDraftOrder {
            message: format!("draft slot {slot:?} is not a number"),
        })?;
        if let Some(previous) = slot_by_roster.insert(roster_id, slot) {
            return Err(EngineError::InvalidDraftOrder {
                message: format!("roster {roster_id} holds both slot {previous} and slot {slot}"),
            });
        }
    }

    for team in standings.iter_mut() {
        team.draft_position = slot_by_roster.get(&team.roster_id).copied().ok_or_else(|| {
            EngineError::InvalidDraftOrder {
                message: format!("roster {} has no draft slot", team.roster_id),
            }
        })?;
    }

    // Slots must be exactly 1..N.
    let order = roster_ids_by_position(standings)?;
    standings.sort_by_key(|team| team.draft_position);
    debug!(?order, "applied draft slots");
    Ok(())
}
