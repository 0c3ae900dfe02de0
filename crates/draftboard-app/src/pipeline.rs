// End-to-end run: snapshot -> Max PF -> draft order -> board -> live overlay.

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use draftboard_core::board::{build_board, overlay_live_picks, DraftBoard};
use draftboard_core::league::DraftType;
use draftboard_core::lineup::optimizer::LineupStrategy;
use draftboard_core::lineup::season::{season_weeks, MaxPfCalculator};
use draftboard_core::order::{calculate_draft_order, DraftOrderMethod, OrderInputs};
use draftboard_core::standings::TeamStanding;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::snapshot::{self, LeagueSnapshot};

/// Everything the report writers need.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub league_name: String,
    /// Season whose results set the order.
    pub standings_season: String,
    /// Season of the draft the board is for.
    pub draft_season: String,
    pub method: DraftOrderMethod,
    pub lineup_strategy: LineupStrategy,
    pub weeks: Vec<u32>,
    pub standings: Vec<TeamStanding>,
    pub board: DraftBoard,
    /// Whether made picks from a live draft were overlaid.
    pub live: bool,
}

/// Load the configured snapshot and build the report.
pub fn run(config: &Config) -> anyhow::Result<Report> {
    let snapshot = snapshot::load(config).with_context(|| {
        format!(
            "failed to load league snapshot from {}",
            config.snapshot.dir.display()
        )
    })?;
    build_report(config, &snapshot)
}

/// Build the report from an already loaded snapshot.
pub fn build_report(config: &Config, snapshot: &LeagueSnapshot) -> anyhow::Result<Report> {
    let standings_league = snapshot.standings_league();
    let method = config.draft_order.method;
    let strategy = config.max_pf.lineup_strategy;

    let weeks = match &config.max_pf.weeks {
        Some(weeks) => {
            let mut weeks = weeks.clone();
            weeks.sort_unstable();
            weeks.dedup();
            weeks
        }
        None => season_weeks(&standings_league.settings, config.max_pf.include_playoffs),
    };
    let missing: Vec<u32> = weeks
        .iter()
        .copied()
        .filter(|w| !snapshot.matchups.contains_key(w))
        .collect();
    if !missing.is_empty() {
        warn!(
            ?missing,
            available = ?snapshot.weeks_available(),
            "no saved matchups for some weeks, they add nothing to Max PF"
        );
    }

    let roster_ids: Vec<u32> = snapshot.rosters.iter().map(|r| r.roster_id).collect();
    let max_pf = MaxPfCalculator::new(
        &snapshot.matchups,
        &standings_league.roster_positions,
        &snapshot.players,
    )
    .with_strategy(strategy)
    .for_all(&roster_ids, &weeks);

    let inputs = OrderInputs {
        rosters: &snapshot.rosters,
        users: &snapshot.users,
        max_pf: &max_pf,
        bracket: snapshot.winners_bracket.as_deref(),
        playoff_teams: Some(standings_league.settings.playoff_teams),
        draft: snapshot.draft.as_ref(),
    };
    let standings = calculate_draft_order(method, &inputs)
        .with_context(|| format!("failed to calculate {method} draft order"))?;

    let rounds = draft_rounds(config, snapshot)?;
    let draft_season = snapshot.league.season.clone();
    let mut board = build_board(&standings, &snapshot.traded_picks, &draft_season, rounds)
        .context("failed to build draft board")?;

    let live = !snapshot.draft_picks.is_empty();
    if live {
        let draft_type = snapshot
            .draft
            .as_ref()
            .map(|d| d.draft_type)
            .unwrap_or_default();
        if draft_type == DraftType::Auction {
            warn!("auction draft: picks have no fixed slots, on-the-clock marker is approximate");
        }
        board = overlay_live_picks(&board, &snapshot.draft_picks, draft_type);
    }

    info!(
        league = %snapshot.league.name,
        method = method.name(),
        weeks = weeks.len(),
        rounds,
        live,
        "built draft report"
    );

    Ok(Report {
        generated_at: Utc::now(),
        league_name: snapshot.league.name.clone(),
        standings_season: standings_league.season.clone(),
        draft_season,
        method,
        lineup_strategy: strategy,
        weeks,
        standings,
        board,
        live,
    })
}

/// Board rounds: config override, then the league setting, then the draft's.
fn draft_rounds(config: &Config, snapshot: &LeagueSnapshot) -> anyhow::Result<u32> {
    let from_draft = snapshot.draft.as_ref().map(|d| d.settings.rounds);
    let rounds = config
        .board
        .rounds
        .or(Some(snapshot.league.settings.draft_rounds).filter(|&r| r > 0))
        .or(from_draft.filter(|&r| r > 0));
    match rounds {
        Some(rounds) => Ok(rounds),
        None => bail!("league reports no draft rounds; set board.rounds in the config"),
    }
}
