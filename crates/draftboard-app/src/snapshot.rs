// On-disk league snapshot: the provider's JSON responses saved to a directory.
//
// Layout:
//   league.json              current league (required)
//   previous_league.json     last season's league (optional)
//   rosters.json             rosters of the standings league
//   users.json               users of the standings league
//   players.json             player directory (id -> player)
//   traded_picks.json        traded picks of the current league
//   winners_bracket.json     standings league bracket (optional)
//   matchups/week_<n>.json   standings league results (optional per week)
//   draft.json               current league draft (optional)
//   draft_picks.json         picks made so far (optional)
//
// The standings league is `previous_league.json` when present, otherwise the
// current league.

use std::path::{Path, PathBuf};

use draftboard_core::league::{
    Draft, DraftPickRecord, League, Matchup, MatchupsByWeek, PlayerDirectory, PlayoffMatchup,
    Roster, TradedPick, User,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::Config;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("snapshot is missing required file {path}")]
    Missing { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LeagueSnapshot {
    pub league: League,
    pub previous_league: Option<League>,
    pub rosters: Vec<Roster>,
    pub users: Vec<User>,
    pub players: PlayerDirectory,
    pub traded_picks: Vec<TradedPick>,
    pub winners_bracket: Option<Vec<PlayoffMatchup>>,
    pub matchups: MatchupsByWeek,
    pub draft: Option<Draft>,
    pub draft_picks: Vec<DraftPickRecord>,
}

impl LeagueSnapshot {
    /// The league whose season results drive the draft order.
    pub fn standings_league(&self) -> &League {
        self.previous_league.as_ref().unwrap_or(&self.league)
    }

    /// Weeks with saved matchup results, ascending.
    pub fn weeks_available(&self) -> Vec<u32> {
        let mut weeks: Vec<u32> = self.matchups.keys().copied().collect();
        weeks.sort_unstable();
        weeks
    }
}

/// Load the snapshot configured in `config`.
pub fn load(config: &Config) -> Result<LeagueSnapshot, SnapshotError> {
    load_from_dir(&config.snapshot.dir)
}

/// Load a snapshot directory.
pub fn load_from_dir(dir: &Path) -> Result<LeagueSnapshot, SnapshotError> {
    let league: League = read_required(dir, "league.json")?;
    let previous_league: Option<League> = read_optional(dir, "previous_league.json")?;
    let rosters: Vec<Roster> = read_required(dir, "rosters.json")?;
    let users: Vec<User> = read_required(dir, "users.json")?;
    let players: PlayerDirectory = read_required(dir, "players.json")?;
    let traded_picks: Vec<TradedPick> = read_required(dir, "traded_picks.json")?;
    let winners_bracket: Option<Vec<PlayoffMatchup>> = read_optional(dir, "winners_bracket.json")?;
    let draft: Option<Draft> = read_optional(dir, "draft.json")?;
    let draft_picks: Vec<DraftPickRecord> =
        read_optional(dir, "draft_picks.json")?.unwrap_or_default();
    let matchups = read_matchups(&dir.join("matchups"))?;

    if let Some(previous) = &previous_league {
        if league.previous_league_id.as_deref() != Some(previous.league_id.as_str()) {
            warn!(
                current = %league.league_id,
                previous = %previous.league_id,
                "previous_league.json does not match the current league's previous_league_id"
            );
        }
    }

    info!(
        dir = %dir.display(),
        league = %league.name,
        season = %league.season,
        rosters = rosters.len(),
        players = players.len(),
        weeks = matchups.len(),
        traded_picks = traded_picks.len(),
        "loaded league snapshot"
    );

    Ok(LeagueSnapshot {
        league,
        previous_league,
        rosters,
        users,
        players,
        traded_picks,
        winners_bracket,
        matchups,
        draft,
        draft_picks,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_required<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T, SnapshotError> {
    let path = dir.join(name);
    if !path.is_file() {
        return Err(SnapshotError::Missing { path });
    }
    read_json(&path)
}

fn read_optional<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Option<T>, SnapshotError> {
    let path = dir.join(name);
    if !path.is_file() {
        debug!(path = %path.display(), "optional snapshot file absent");
        return Ok(None);
    }
    read_json(&path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let text = std::fs::read_to_string(path).map_err(|e| SnapshotError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| SnapshotError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Week number from a `week_<n>.json` file name.
fn week_number(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix("week_")?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

fn read_matchups(dir: &Path) -> Result<MatchupsByWeek, SnapshotError> {
    let mut by_week = MatchupsByWeek::new();
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "no matchups directory");
        return Ok(by_week);
    }

    let entries = std::fs::read_dir(dir).map_err(|e| SnapshotError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| SnapshotError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let Some(week) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(week_number)
        else {
            debug!(path = %path.display(), "skipping non-matchup file");
            continue;
        };
        let results: Vec<Matchup> = read_json(&path)?;
        by_week.insert(week, results);
    }

    Ok(by_week)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
