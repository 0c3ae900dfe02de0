// Report writers: plain-text table, JSON, and CSV board export.

use std::fmt::Write as _;
use std::io::Write as _;

use anyhow::Context;
use draftboard_core::board::{DraftBoard, DraftPick};
use draftboard_core::standings::TeamStanding;
use serde::Serialize;
use tracing::info;

use crate::config::{OutputConfig, OutputFormat};
use crate::pipeline::Report;

/// Render the report and write it to the configured path or stdout.
pub fn write_report(report: &Report, output: &OutputConfig) -> anyhow::Result<()> {
    let rendered = render(report, output.format)?;

    match &output.path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), format = ?output.format, "wrote report");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("failed to write report to stdout")?;
        }
    }
    Ok(())
}

pub fn render(report: &Report, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(report)),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(report).context("failed to serialize report")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Csv => render_csv(&report.board.picks),
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// "1st", "2nd", "3rd", "4th", ... "11th", "12th", "13th", "21st".
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

pub fn finish_label(finish: Option<u32>) -> String {
    match finish {
        Some(1) => "Champion".to_string(),
        Some(2) => "Runner-up".to_string(),
        Some(n) => ordinal(n),
        None => "-".to_string(),
    }
}

/// Signed difference with two decimals, e.g. `+12.50`, `-3.25`.
pub fn signed(diff: f64) -> String {
    if diff > 0.0 {
        format!("+{diff:.2}")
    } else {
        format!("{diff:.2}")
    }
}

fn week_range(weeks: &[u32]) -> String {
    match (weeks.first(), weeks.last()) {
        (Some(only), _) if weeks.len() == 1 => format!("week {only}"),
        (Some(first), Some(last))
            if last.checked_sub(*first).map(|span| span as usize + 1) == Some(weeks.len()) =>
        {
            format!("weeks {first}-{last}")
        }
        _ => {
            let list: Vec<String> = weeks.iter().map(u32::to_string).collect();
            format!("weeks {}", list.join(", "))
        }
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

fn render_table(report: &Report) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}: {} draft board",
        report.league_name, report.draft_season
    );
    let _ = writeln!(
        out,
        "Draft order: {} ({} results)",
        report.method.description(),
        report.standings_season
    );
    let _ = writeln!(
        out,
        "Max PF: {}, {:?} lineups",
        week_range(&report.weeks),
        report.lineup_strategy
    );
    let _ = writeln!(
        out,
        "Generated: {}",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    out.push('\n');

    write_standings(&mut out, &report.standings, &report.board);
    out.push('\n');
    write_board(&mut out, report);

    out
}

fn write_standings(out: &mut String, standings: &[TeamStanding], board: &DraftBoard) {
    let _ = writeln!(
        out,
        "{:>3}  {:<24} {:>7} {:>9} {:>9} {:>9} {:>8} {:>5}  {}",
        "Pos", "Team", "Record", "PF", "Max PF", "League", "Diff", "Picks", "Finish"
    );
    for team in standings {
        let name = match &team.team_name {
            Some(team_name) if team_name != &team.display_name => {
                format!("{} ({})", team.display_name, team_name)
            }
            _ => team.display_name.clone(),
        };
        let _ = writeln!(
            out,
            "{:>3}  {:<24} {:>7} {:>9.2} {:>9.2} {:>9.2} {:>8} {:>5}  {}",
            team.draft_position,
            truncate(&name, 24),
            team.record(),
            team.points_for,
            team.max_pf,
            team.league_max_pf,
            signed(team.max_pf_difference()),
            board.picks_owned_by(team.roster_id).count(),
            finish_label(team.playoff_finish),
        );
    }
}

fn write_board(out: &mut String, report: &Report) {
    let board = &report.board;
    for round in 1..=board.rounds {
        let _ = writeln!(out, "Round {round}");
        for pick in board.round(round) {
            let marker = if pick.on_the_clock { "*" } else { " " };
            let mut line = format!("{marker} {:<6} {}", pick.label(), pick.current_owner_name);
            if pick.is_traded {
                let _ = write!(line, " (from {})", pick.original_owner_name);
            }
            if let Some(player) = &pick.picked_player {
                let _ = write!(line, "  -> {} {}", player.name, player.position);
                if let Some(team) = &player.team {
                    let _ = write!(line, " {team}");
                }
            }
            let _ = writeln!(out, "{}", line.trim_end());
        }
    }
    if report.live {
        let _ = writeln!(out, "\n* on the clock");
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct PickRow<'a> {
    season: &'a str,
    pick: String,
    round: u32,
    slot: u32,
    original_owner_id: u32,
    original_owner: &'a str,
    current_owner_id: u32,
    current_owner: &'a str,
    traded: bool,
    player: Option<&'a str>,
    position: Option<&'a str>,
    team: Option<&'a str>,
    on_the_clock: bool,
}

impl<'a> From<&'a DraftPick> for PickRow<'a> {
    fn from(pick: &'a DraftPick) -> Self {
        let player = pick.picked_player.as_ref();
        Self {
            season: &pick.season,
            pick: pick.label(),
            round: pick.round,
            slot: pick.slot,
            original_owner_id: pick.original_owner,
            original_owner: &pick.original_owner_name,
            current_owner_id: pick.current_owner,
            current_owner: &pick.current_owner_name,
            traded: pick.is_traded,
            player: player.map(|p| p.name.as_str()),
            position: player.map(|p| p.position.as_str()),
            team: player.and_then(|p| p.team.as_deref()),
            on_the_clock: pick.on_the_clock,
        }
    }
}

fn render_csv(picks: &[DraftPick]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for pick in picks {
        writer
            .serialize(PickRow::from(pick))
            .context("failed to write CSV row")?;
    }
    let bytes = writer.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
