// Provider data shapes: league, roster, user, matchup, player, bracket,
// traded pick, and draft snapshot.
//
// These mirror the fantasy provider's JSON responses closely enough to
// deserialize them directly. Unknown fields are ignored; fields the provider
// sometimes omits or nulls are defaulted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// League
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueSettings {
    #[serde(default)]
    pub num_teams: u32,
    #[serde(default)]
    pub playoff_teams: u32,
    /// First week of the playoffs. 0 when the league does not report one.
    #[serde(default)]
    pub playoff_week_start: u32,
    #[serde(default)]
    pub draft_rounds: u32,
    /// 0 = redraft, 1 = keeper, 2 = dynasty.
    #[serde(default, rename = "type")]
    pub league_type: u32,
    #[serde(default)]
    pub last_scored_leg: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    pub league_id: String,
    pub name: String,
    pub season: String,
    #[serde(default)]
    pub status: String,
    /// Starting lineup shape plus bench slots, e.g. `["QB", "RB", "FLEX", "BN"]`.
    #[serde(default)]
    pub roster_positions: Vec<String>,
    #[serde(default)]
    pub settings: LeagueSettings,
    #[serde(default)]
    pub total_rosters: u32,
    #[serde(default)]
    pub previous_league_id: Option<String>,
    #[serde(default)]
    pub draft_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Rosters and users
// ---------------------------------------------------------------------------

/// Season totals for a roster. Points are split into a whole part and a
/// hundredths remainder by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterSettings {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
    #[serde(default)]
    pub fpts: f64,
    #[serde(default)]
    pub fpts_decimal: Option<f64>,
    #[serde(default)]
    pub fpts_against: Option<f64>,
    #[serde(default)]
    pub fpts_against_decimal: Option<f64>,
    /// League-reported potential points.
    #[serde(default)]
    pub ppts: Option<f64>,
    #[serde(default)]
    pub ppts_decimal: Option<f64>,
}

impl RosterSettings {
    /// Points-for as a single decimal value.
    pub fn points_for(&self) -> f64 {
        combine_decimal(self.fpts, self.fpts_decimal)
    }

    /// The league's own max potential points figure (0 when not reported).
    pub fn league_max_pf(&self) -> f64 {
        combine_decimal(self.ppts.unwrap_or(0.0), self.ppts_decimal)
    }
}

fn combine_decimal(whole: f64, hundredths: Option<f64>) -> f64 {
    whole + hundredths.unwrap_or(0.0) / 100.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub roster_id: u32,
    /// Owning user. Orphaned rosters have no owner.
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub settings: RosterSettings,
    #[serde(default)]
    pub players: Option<Vec<String>>,
    #[serde(default)]
    pub starters: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub metadata: Option<UserMetadata>,
}

impl User {
    pub fn team_name(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.team_name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Weekly matchups and players
// ---------------------------------------------------------------------------

/// One roster's result for one scoring week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matchup {
    pub roster_id: u32,
    #[serde(default)]
    pub matchup_id: Option<u32>,
    /// Player id -> points scored that week. Team defenses appear under their
    /// short team code (e.g. "PHI").
    #[serde(default)]
    pub players_points: HashMap<String, f64>,
    #[serde(default)]
    pub starters: Vec<String>,
    #[serde(default)]
    pub points: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub player_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Primary position as reported by the provider (e.g. "WR", "DEF").
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub fantasy_positions: Option<Vec<String>>,
    #[serde(default)]
    pub team: Option<String>,
}

/// Player directory keyed by player id.
pub type PlayerDirectory = HashMap<String, Player>;

/// Weekly results keyed by week number.
pub type MatchupsByWeek = HashMap<u32, Vec<Matchup>>;

// ---------------------------------------------------------------------------
// Playoffs and traded picks
// ---------------------------------------------------------------------------

/// Where a bracket slot's team came from: the winner or loser of a prior match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BracketSource {
    #[serde(default)]
    pub w: Option<u32>,
    #[serde(default)]
    pub l: Option<u32>,
}

/// One match of a playoff bracket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayoffMatchup {
    /// Round number.
    pub r: u32,
    /// Match number.
    pub m: u32,
    #[serde(default)]
    pub t1: Option<u32>,
    #[serde(default)]
    pub t2: Option<u32>,
    #[serde(default)]
    pub w: Option<u32>,
    #[serde(default)]
    pub l: Option<u32>,
    #[serde(default)]
    pub t1_from: Option<BracketSource>,
    #[serde(default)]
    pub t2_from: Option<BracketSource>,
    /// Winner finishes in place `p`, loser in `p + 1`.
    #[serde(default)]
    pub p: Option<u32>,
}

/// A future pick whose current owner differs from (or was reassigned from) its
/// original owner. Multi-hop trades are already collapsed by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradedPick {
    pub season: String,
    pub round: u32,
    /// Original owner's roster id.
    pub roster_id: u32,
    /// Current owner's roster id.
    pub owner_id: u32,
    #[serde(default)]
    pub previous_owner_id: Option<u32>,
}

// ---------------------------------------------------------------------------
// Draft snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftType {
    #[default]
    Linear,
    Snake,
    Auction,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftSettings {
    #[serde(default)]
    pub teams: u32,
    #[serde(default)]
    pub rounds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub draft_id: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "type")]
    pub draft_type: DraftType,
    /// User id -> draft slot.
    #[serde(default)]
    pub draft_order: Option<HashMap<String, u32>>,
    /// Draft slot (as a string key) -> roster id.
    #[serde(default)]
    pub slot_to_roster_id: Option<HashMap<String, u32>>,
    #[serde(default)]
    pub settings: DraftSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftPickMetadata {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub team: Option<String>,
}

/// A selection already made in a live draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftPickRecord {
    pub round: u32,
    /// Board column the pick belongs to (1-based).
    pub draft_slot: u32,
    /// Overall pick number (1-based).
    pub pick_no: u32,
    #[serde(default)]
    pub player_id: String,
    #[serde(default)]
    pub picked_by: String,
    #[serde(default)]
    pub metadata: DraftPickMetadata,
}

impl DraftPickRecord {
    pub fn player_name(&self) -> String {
        let first = self.metadata.first_name.trim();
        let last = self.metadata.last_name.trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{first} {last}"),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (true, true) => self.player_id.clone(),
        }
    }
}
