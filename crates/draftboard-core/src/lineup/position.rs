// Player positions, roster slots, and slot eligibility.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Football positions a scored player can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
    DefensiveLine,
    DefensiveEnd,
    DefensiveTackle,
    Linebacker,
    DefensiveBack,
    Cornerback,
    Safety,
}

impl Position {
    /// Parse a provider position string. Returns `None` for anything the
    /// lineup rules do not score (e.g. "OL", "LS", empty).
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" => Some(Position::Kicker),
            "DEF" => Some(Position::Defense),
            "DL" => Some(Position::DefensiveLine),
            "DE" => Some(Position::DefensiveEnd),
            "DT" => Some(Position::DefensiveTackle),
            "LB" => Some(Position::Linebacker),
            "DB" => Some(Position::DefensiveBack),
            "CB" => Some(Position::Cornerback),
            "S" => Some(Position::Safety),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DEF",
            Position::DefensiveLine => "DL",
            Position::DefensiveEnd => "DE",
            Position::DefensiveTackle => "DT",
            Position::Linebacker => "LB",
            Position::DefensiveBack => "DB",
            Position::Cornerback => "CB",
            Position::Safety => "S",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Classify a scored player id that has no directory entry.
///
/// Team defenses are keyed by their short team code ("PHI", "KC"), so an id of
/// one to three ASCII upper-case letters is a defense. Everything else is
/// unknown and contributes nothing, including short all-digit ids such as
/// "123" that a plain upper-case comparison would accept.
pub fn classify_unlisted(player_id: &str) -> Option<Position> {
    let is_team_code = (1..=3).contains(&player_id.len())
        && player_id.chars().all(|c| c.is_ascii_uppercase());
    is_team_code.then_some(Position::Defense)
}

// ---------------------------------------------------------------------------
// Roster slots
// ---------------------------------------------------------------------------

/// A starting-lineup (or bench) slot from the league's roster layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
    DefensiveLine,
    Linebacker,
    DefensiveBack,
    /// WR/TE.
    ReceiverFlex,
    /// WR/RB.
    WideRunningFlex,
    /// RB/WR/TE.
    Flex,
    /// DL/LB/DB.
    IdpFlex,
    /// QB/RB/WR/TE.
    SuperFlex,
    Bench,
}

const QB: &[Position] = &[Position::Quarterback];
const RB: &[Position] = &[Position::RunningBack];
const WR: &[Position] = &[Position::WideReceiver];
const TE: &[Position] = &[Position::TightEnd];
const K: &[Position] = &[Position::Kicker];
const DEF: &[Position] = &[Position::Defense];
const DL: &[Position] = &[
    Position::DefensiveLine,
    Position::DefensiveEnd,
    Position::DefensiveTackle,
];
const LB: &[Position] = &[Position::Linebacker];
const DB: &[Position] = &[
    Position::DefensiveBack,
    Position::Cornerback,
    Position::Safety,
];
const REC_FLEX: &[Position] = &[Position::WideReceiver, Position::TightEnd];
const WRRB_FLEX: &[Position] = &[Position::WideReceiver, Position::RunningBack];
const FLEX: &[Position] = &[
    Position::RunningBack,
    Position::WideReceiver,
    Position::TightEnd,
];
const IDP_FLEX: &[Position] = &[
    Position::DefensiveLine,
    Position::Linebacker,
    Position::DefensiveBack,
];
const SUPER_FLEX: &[Position] = &[
    Position::Quarterback,
    Position::RunningBack,
    Position::WideReceiver,
    Position::TightEnd,
];

impl Slot {
    /// Parse a roster layout label. Unknown labels (e.g. "IR", "TAXI") return
    /// `None` and are never filled.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_uppercase().as_str() {
            "QB" => Some(Slot::Quarterback),
            "RB" => Some(Slot::RunningBack),
            "WR" => Some(Slot::WideReceiver),
            "TE" => Some(Slot::TightEnd),
            "K" => Some(Slot::Kicker),
            "DEF" => Some(Slot::Defense),
            "DL" => Some(Slot::DefensiveLine),
            "LB" => Some(Slot::Linebacker),
            "DB" => Some(Slot::DefensiveBack),
            "REC_FLEX" => Some(Slot::ReceiverFlex),
            "WRRB_FLEX" => Some(Slot::WideRunningFlex),
            "FLEX" => Some(Slot::Flex),
            "IDP_FLEX" => Some(Slot::IdpFlex),
            "SUPER_FLEX" | "SUPERFLEX" => Some(Slot::SuperFlex),
            "BN" => Some(Slot::Bench),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Slot::Quarterback => "QB",
            Slot::RunningBack => "RB",
            Slot::WideReceiver => "WR",
            Slot::TightEnd => "TE",
            Slot::Kicker => "K",
            Slot::Defense => "DEF",
            Slot::DefensiveLine => "DL",
            Slot::Linebacker => "LB",
            Slot::DefensiveBack => "DB",
            Slot::ReceiverFlex => "REC_FLEX",
            Slot::WideRunningFlex => "WRRB_FLEX",
            Slot::Flex => "FLEX",
            Slot::IdpFlex => "IDP_FLEX",
            Slot::SuperFlex => "SUPER_FLEX",
            Slot::Bench => "BN",
        }
    }

    /// Positions allowed to fill this slot. Empty for the bench.
    pub fn eligible_positions(&self) -> &'static [Position] {
        match self {
            Slot::Quarterback => QB,
            Slot::RunningBack => RB,
            Slot::WideReceiver => WR,
            Slot::TightEnd => TE,
            Slot::Kicker => K,
            Slot::Defense => DEF,
            Slot::DefensiveLine => DL,
            Slot::Linebacker => LB,
            Slot::DefensiveBack => DB,
            Slot::ReceiverFlex => REC_FLEX,
            Slot::WideRunningFlex => WRRB_FLEX,
            Slot::Flex => FLEX,
            Slot::IdpFlex => IDP_FLEX,
            Slot::SuperFlex => SUPER_FLEX,
            Slot::Bench => &[],
        }
    }

    pub fn accepts(&self, position: Position) -> bool {
        self.eligible_positions().contains(&position)
    }

    /// Fill order for greedy assignment: most restrictive slots first.
    pub fn fill_priority(&self) -> u8 {
        match self {
            Slot::Quarterback | Slot::Kicker | Slot::Defense => 1,
            Slot::RunningBack
            | Slot::WideReceiver
            | Slot::TightEnd
            | Slot::DefensiveLine
            | Slot::Linebacker
            | Slot::DefensiveBack => 2,
            Slot::ReceiverFlex | Slot::WideRunningFlex => 3,
            Slot::Flex | Slot::IdpFlex => 4,
            Slot::SuperFlex => 5,
            Slot::Bench => 99,
        }
    }

    /// Whether this slot contributes to a lineup score.
    pub fn is_starting(&self) -> bool {
        !self.eligible_positions().is_empty()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parse a roster layout into its scoring slots, in layout order. Bench and
/// unrecognized labels are dropped.
pub fn starting_slots<S: AsRef<str>>(layout: &[S]) -> Vec<Slot> {
    layout
        .iter()
        .filter_map(|label| Slot::from_label(label.as_ref()))
        .filter(Slot::is_starting)
        .collect()
}
