// Integration tests for the draft board pipeline.
//
// These run the full flow (snapshot loading, Max PF, draft order, board,
// live overlay, report rendering) against the fixture league in
// tests/fixtures/snapshot: four teams, two regular-season weeks, a one-game
// playoff between rosters 1 and 2, and a 2025 draft in progress.

use std::fs;
use std::path::PathBuf;

use draftboard_app::config::{
    load_config_from, BoardConfig, Config, DraftOrderConfig, MaxPfConfig, OutputConfig,
    OutputFormat, SnapshotConfig,
};
use draftboard_app::output::render;
use draftboard_app::pipeline::{build_report, run, Report};
use draftboard_app::snapshot::{load_from_dir, LeagueSnapshot};
use draftboard_core::lineup::optimizer::LineupStrategy;
use draftboard_core::order::DraftOrderMethod;

// ===========================================================================
// Test helpers
// ===========================================================================

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/snapshot")
}

fn config(method: DraftOrderMethod) -> Config {
    Config {
        draft_order: DraftOrderConfig { method },
        max_pf: MaxPfConfig::default(),
        board: BoardConfig::default(),
        snapshot: SnapshotConfig { dir: fixture_dir() },
        output: OutputConfig::default(),
    }
}

fn snapshot() -> LeagueSnapshot {
    load_from_dir(&fixture_dir()).expect("fixture snapshot should load")
}

fn order(report: &Report) -> Vec<u32> {
    report.standings.iter().map(|t| t.roster_id).collect()
}

fn team(report: &Report, roster_id: u32) -> &draftboard_core::standings::TeamStanding {
    report
        .standings
        .iter()
        .find(|t| t.roster_id == roster_id)
        .expect("roster should be in standings")
}

// ===========================================================================
// Draft order
// ===========================================================================

#[test]
fn max_pf_order_from_fixture() {
    let report = run(&config(DraftOrderMethod::StandingsMaxPf)).unwrap();

    // Non-playoff 3 (45.00) and 4 (64.75) by Max PF, then runner-up 1 and
    // champion 2.
    assert_eq!(order(&report), vec![3, 4, 1, 2]);
    assert_eq!(report.weeks, vec![1, 2]);
    assert_eq!(report.standings_season, "2024");
    assert_eq!(report.draft_season, "2025");

    assert_eq!(team(&report, 1).max_pf, 116.5);
    assert_eq!(team(&report, 2).max_pf, 75.5);
    assert_eq!(team(&report, 3).max_pf, 45.0);
    assert_eq!(team(&report, 4).max_pf, 64.75);

    assert_eq!(team(&report, 2).playoff_finish, Some(1));
    assert_eq!(team(&report, 1).playoff_finish, Some(2));
    assert_eq!(team(&report, 3).playoff_finish, None);
}

#[test]
fn standings_order_from_fixture() {
    let report = run(&config(DraftOrderMethod::Standings)).unwrap();
    // 4 (0 wins), then 3 and 2 (1 win, 200 < 220 PF), then 1.
    assert_eq!(order(&report), vec![4, 3, 2, 1]);
    // The bracket still fills finish for reporting.
    assert_eq!(team(&report, 2).playoff_finish, Some(1));
}

#[test]
fn draft_slot_order_from_fixture() {
    let report = run(&config(DraftOrderMethod::SleeperDraft)).unwrap();
    assert_eq!(order(&report), vec![4, 3, 1, 2]);
}

#[test]
fn draft_slot_order_without_draft_fails() {
    let mut snap = snapshot();
    snap.draft = None;
    let err = build_report(&config(DraftOrderMethod::SleeperDraft), &snap).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("sleeper_draft"), "{message}");
}

#[test]
fn max_pf_order_without_bracket_fails() {
    let mut snap = snapshot();
    snap.winners_bracket = None;
    let err = build_report(&config(DraftOrderMethod::StandingsMaxPf), &snap).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("winners bracket"), "{message}");
}

// ===========================================================================
// Max PF settings
// ===========================================================================

#[test]
fn including_playoffs_adds_scored_playoff_weeks() {
    let mut cfg = config(DraftOrderMethod::StandingsMaxPf);
    cfg.max_pf.include_playoffs = true;
    let report = run(&cfg).unwrap();

    assert_eq!(report.weeks, vec![1, 2, 3]);
    assert_eq!(team(&report, 1).max_pf, 146.5);
    assert_eq!(team(&report, 2).max_pf, 80.5);
    assert_eq!(team(&report, 3).max_pf, 45.0);
}

#[test]
fn explicit_weeks_override_season_range() {
    let mut cfg = config(DraftOrderMethod::StandingsMaxPf);
    cfg.max_pf.weeks = Some(vec![2]);
    let report = run(&cfg).unwrap();
    assert_eq!(report.weeks, vec![2]);
    assert_eq!(team(&report, 1).max_pf, 50.0);
    assert_eq!(team(&report, 4).max_pf, 22.25);
}

#[test]
fn unsorted_configured_weeks_are_normalized() {
    let mut cfg = config(DraftOrderMethod::StandingsMaxPf);
    cfg.max_pf.weeks = Some(vec![3, 1, 1]);
    let report = run(&cfg).unwrap();

    assert_eq!(report.weeks, vec![1, 3]);
    // Weeks 1-3 total 146.50 and week 2 alone is 50.00.
    assert_eq!(team(&report, 1).max_pf, 96.5);

    let text = render(&report, OutputFormat::Table).unwrap();
    assert!(text.contains("Max PF: weeks 1, 3,"), "{text}");
}

#[test]
fn optimal_strategy_matches_greedy_on_simple_layout() {
    let greedy = run(&config(DraftOrderMethod::StandingsMaxPf)).unwrap();
    let mut cfg = config(DraftOrderMethod::StandingsMaxPf);
    cfg.max_pf.lineup_strategy = LineupStrategy::Optimal;
    let optimal = run(&cfg).unwrap();

    for (g, o) in greedy.standings.iter().zip(&optimal.standings) {
        assert_eq!(g.roster_id, o.roster_id);
        assert_eq!(g.max_pf, o.max_pf);
    }
}

#[test]
fn league_reported_max_pf_and_names() {
    let report = run(&config(DraftOrderMethod::StandingsMaxPf)).unwrap();

    let alice = team(&report, 1);
    assert_eq!(alice.display_name, "alice");
    assert_eq!(alice.team_name.as_deref(), Some("Alice's Aces"));
    assert_eq!(alice.league_max_pf, 110.25);
    assert_eq!(alice.points_for, 250.5);

    assert_eq!(team(&report, 2).display_name, "Bravo Squad");
    assert_eq!(team(&report, 3).display_name, "carol");
    assert_eq!(team(&report, 4).display_name, "Team 4");
    assert_eq!(team(&report, 4).league_max_pf, 0.0);
}

// ===========================================================================
// Board
// ===========================================================================

#[test]
fn board_covers_every_round_with_trades() {
    let report = run(&config(DraftOrderMethod::StandingsMaxPf)).unwrap();
    let board = &report.board;

    assert_eq!(board.season, "2025");
    assert_eq!(board.rounds, 3);
    assert_eq!(board.picks.len(), 12);

    let first = board.pick(1, 1).unwrap();
    assert_eq!(first.original_owner, 3);
    assert_eq!(first.current_owner, 2);
    assert_eq!(first.original_owner_name, "carol");
    assert_eq!(first.current_owner_name, "Bravo Squad");
    assert!(first.is_traded);

    // The 2026 trade does not touch this board.
    assert_eq!(board.traded_picks().count(), 1);
    assert_eq!(board.pick(2, 1).unwrap().current_owner, 3);
}

#[test]
fn board_rounds_override() {
    let mut cfg = config(DraftOrderMethod::StandingsMaxPf);
    cfg.board.rounds = Some(1);
    let report = run(&cfg).unwrap();
    assert_eq!(report.board.picks.len(), 4);
}

#[test]
fn live_picks_are_overlaid() {
    let report = run(&config(DraftOrderMethod::StandingsMaxPf)).unwrap();
    assert!(report.live);

    let first = report.board.pick(1, 1).unwrap();
    let player = first.picked_player.as_ref().expect("1.01 has been made");
    assert_eq!(player.name, "Ashton Jeanty");
    assert_eq!(player.team.as_deref(), Some("LV"));

    let clock: Vec<String> = report
        .board
        .picks
        .iter()
        .filter(|p| p.on_the_clock)
        .map(|p| p.label())
        .collect();
    assert_eq!(clock, vec!["1.03"]);
}

#[test]
fn no_live_overlay_without_made_picks() {
    let mut snap = snapshot();
    snap.draft_picks.clear();
    let report = build_report(&config(DraftOrderMethod::StandingsMaxPf), &snap).unwrap();
    assert!(!report.live);
    assert!(report.board.picks.iter().all(|p| !p.on_the_clock));
}

// ===========================================================================
// Config files and output
// ===========================================================================

#[test]
fn config_file_drives_csv_export() {
    let tmp = std::env::temp_dir().join("draftboard_pipeline_csv");
    let _ = fs::remove_dir_all(&tmp);
    fs::create_dir_all(tmp.join("config")).unwrap();
    let toml_text = format!(
        concat!(
            "[draft_order]\nmethod = \"standings\"\n\n",
            "[snapshot]\ndir = {:?}\n\n",
            "[output]\nformat = \"csv\"\npath = \"out/board.csv\"\n",
        ),
        fixture_dir().display().to_string()
    );
    fs::write(tmp.join("config/draftboard.toml"), toml_text).unwrap();

    let cfg = load_config_from(&tmp).unwrap();
    assert_eq!(cfg.output.format, OutputFormat::Csv);
    let report = run(&cfg).unwrap();
    draftboard_app::output::write_report(&report, &cfg.output).unwrap();

    let csv_text = fs::read_to_string(tmp.join("out/board.csv")).unwrap();
    let mut lines = csv_text.lines();
    assert!(lines.next().unwrap().starts_with("season,pick,round,slot"));
    assert_eq!(lines.count(), 12);

    let _ = fs::remove_dir_all(&tmp);
}

#[test]
fn table_report_shows_order_comparison_and_board() {
    let report = run(&config(DraftOrderMethod::StandingsMaxPf)).unwrap();
    let text = render(&report, OutputFormat::Table).unwrap();

    assert!(text.starts_with("Gridiron Dynasty: 2025 draft board"));
    assert!(text.contains("(2024 results)"));
    assert!(text.contains("Champion"));
    assert!(text.contains("Runner-up"));
    assert!(text.contains("+6.25"), "alice computed 116.50 vs league 110.25");
    assert!(text.contains("1.01   Bravo Squad (from carol)  -> Ashton Jeanty RB LV"));
    assert!(text.contains("* 1.03"));
}

#[test]
fn json_report_is_machine_readable() {
    let report = run(&config(DraftOrderMethod::StandingsMaxPf)).unwrap();
    let text = render(&report, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["league_name"], "Gridiron Dynasty");
    assert_eq!(value["standings"].as_array().unwrap().len(), 4);
    assert_eq!(value["board"]["picks"][0]["on_the_clock"], false);
    assert!(value["generated_at"].is_string());
}

#[test]
fn missing_snapshot_dir_is_reported() {
    let mut cfg = config(DraftOrderMethod::Standings);
    cfg.snapshot.dir = std::env::temp_dir().join("draftboard_no_such_snapshot");
    let err = run(&cfg).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("failed to load league snapshot"), "{message}");
    assert!(message.contains("league.json"), "{message}");
}
