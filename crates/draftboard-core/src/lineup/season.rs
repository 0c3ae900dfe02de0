// Season-long max potential points (Max PF).
//
// Sums each week's optimal lineup for a roster over a chosen set of weeks.
// Weeks where the roster has no recorded result (byes, missing data) add
// nothing.

use std::collections::HashMap;

use tracing::debug;

use super::optimizer::{lineup_points, LineupStrategy};
use crate::league::{LeagueSettings, MatchupsByWeek, PlayerDirectory};

/// Regular season length assumed when the league does not report a playoff
/// start week.
pub const DEFAULT_REGULAR_SEASON_WEEKS: u32 = 14;

/// Last week assumed to be scored when playoffs are included and the league
/// has not reported a later scored week.
pub const DEFAULT_FINAL_WEEK: u32 = 17;

/// Round to two decimal places, halves away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes Max PF for rosters of one league season.
#[derive(Debug, Clone, Copy)]
pub struct MaxPfCalculator<'a> {
    pub matchups_by_week: &'a MatchupsByWeek,
    pub slot_layout: &'a [String],
    pub players: &'a PlayerDirectory,
    pub strategy: LineupStrategy,
}

impl<'a> MaxPfCalculator<'a> {
    pub fn new(
        matchups_by_week: &'a MatchupsByWeek,
        slot_layout: &'a [String],
        players: &'a PlayerDirectory,
    ) -> Self {
        Self {
            matchups_by_week,
            slot_layout,
            players,
            strategy: LineupStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: LineupStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Max PF for one roster over `weeks`, rounded to cents.
    pub fn for_roster(&self, roster_id: u32, weeks: &[u32]) -> f64 {
        let mut total = 0.0;
        let mut scored_weeks = 0usize;

        for week in weeks {
            let Some(result) = self
                .matchups_by_week
                .get(week)
                .and_then(|results| results.iter().find(|m| m.roster_id == roster_id))
            else {
                continue;
            };
            total += lineup_points(
                self.strategy,
                &result.players_points,
                self.slot_layout,
                self.players,
            );
            scored_weeks += 1;
        }

        let total = round_to_cents(total);
        debug!(roster_id, scored_weeks, total, "computed max PF");
        total
    }

    /// Max PF for every roster. Each roster is computed independently.
    pub fn for_all(&self, roster_ids: &[u32], weeks: &[u32]) -> HashMap<u32, f64> {
        roster_ids
            .iter()
            .map(|&roster_id| (roster_id, self.for_roster(roster_id, weeks)))
            .collect()
    }
}

/// Max PF for one roster using greedy lineup assignment.
pub fn max_potential_points(
    roster_id: u32,
    matchups_by_week: &MatchupsByWeek,
    slot_layout: &[String],
    players: &PlayerDirectory,
    weeks: &[u32],
) -> f64 {
    MaxPfCalculator::new(matchups_by_week, slot_layout, players).for_roster(roster_id, weeks)
}

/// Max PF for every roster using greedy lineup assignment.
pub fn max_potential_points_for_all(
    roster_ids: &[u32],
    matchups_by_week: &MatchupsByWeek,
    slot_layout: &[String],
    players: &PlayerDirectory,
    weeks: &[u32],
) -> HashMap<u32, f64> {
    MaxPfCalculator::new(matchups_by_week, slot_layout, players).for_all(roster_ids, weeks)
}

/// The weeks that count toward Max PF.
///
/// The regular season runs up to the week before the playoffs start. Including
/// playoffs extends the range through the league's last scored week, or
/// through week 17 when the league has not scored past the regular season.
pub fn season_weeks(settings: &LeagueSettings, include_playoffs: bool) -> Vec<u32> {
    let regular_end = match settings.playoff_week_start {
        0 | 1 => DEFAULT_REGULAR_SEASON_WEEKS,
        start => start - 1,
    };

    let end = if include_playoffs {
        if settings.last_scored_leg > regular_end {
            settings.last_scored_leg
        } else {
            DEFAULT_FINAL_WEEK.max(regular_end)
        }
    } else {
        regular_end
    };

    (1..=end).collect()
}
