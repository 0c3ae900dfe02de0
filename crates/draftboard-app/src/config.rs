// Configuration loading and parsing (config/draftboard.toml).

use std::io::Write as _;
use std::path::{Path, PathBuf};

use draftboard_core::lineup::optimizer::LineupStrategy;
use draftboard_core::order::DraftOrderMethod;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Name of the config file inside `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "draftboard.toml";

/// Highest week number a league can score.
const MAX_WEEK: u32 = 18;

/// Upper bound on board rounds accepted from config.
const MAX_ROUNDS: u32 = 50;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// draftboard.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub draft_order: DraftOrderConfig,
    #[serde(default)]
    pub max_pf: MaxPfConfig,
    #[serde(default)]
    pub board: BoardConfig,
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftOrderConfig {
    #[serde(default)]
    pub method: DraftOrderMethod,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaxPfConfig {
    /// Count playoff weeks toward Max PF.
    #[serde(default)]
    pub include_playoffs: bool,
    #[serde(default)]
    pub lineup_strategy: LineupStrategy,
    /// Explicit week list. Overrides `include_playoffs` when set.
    #[serde(default)]
    pub weeks: Option<Vec<u32>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardConfig {
    /// Overrides the league's `draft_rounds`.
    #[serde(default)]
    pub rounds: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    /// Snapshot directory. Relative paths resolve against the base directory.
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Write the report here instead of stdout.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/draftboard.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()` for normal startup.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let mut config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    if config.snapshot.dir.is_relative() {
        config.snapshot.dir = base_dir.join(&config.snapshot.dir);
    }
    if let Some(out) = config.output.path.as_mut() {
        if out.is_relative() {
            *out = base_dir.join(&*out);
        }
    }

    validate(&config)?;

    Ok(config)
}

/// Install `defaults/draftboard.toml` as `config/draftboard.toml` when no
/// config exists yet. Returns the installed path, or `None` if the user
/// already has a config (it is never overwritten).
pub fn install_default_config(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.is_file() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let contents = std::fs::read(&source).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!(
            "{} is missing and {} cannot be read ({e}); run from the project root",
            target.display(),
            source.display()
        ),
    })?;

    let config_dir = base_dir.join("config");
    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create {}: {e}", config_dir.display()),
    })?;

    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(file) => file,
        // Another process installed it first.
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
        Err(e) => {
            return Err(ConfigError::DefaultsCopyError {
                message: format!("failed to create {}: {e}", target.display()),
            })
        }
    };
    file.write_all(&contents).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", target.display()),
    })?;

    info!(path = %target.display(), "installed default config");
    Ok(Some(target))
}

/// Load config relative to the current working directory, installing the
/// default config first if needed.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    install_default_config(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if let Some(weeks) = &config.max_pf.weeks {
        if weeks.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "max_pf.weeks".into(),
                message: "must list at least one week".into(),
            });
        }
        if let Some(bad) = weeks.iter().find(|w| !(1..=MAX_WEEK).contains(*w)) {
            return Err(ConfigError::ValidationError {
                field: "max_pf.weeks".into(),
                message: format!("week {bad} is outside 1..={MAX_WEEK}"),
            });
        }
    }

    if let Some(rounds) = config.board.rounds {
        if rounds == 0 || rounds > MAX_ROUNDS {
            return Err(ConfigError::ValidationError {
                field: "board.rounds".into(),
                message: format!("must be between 1 and {MAX_ROUNDS}, got {rounds}"),
            });
        }
    }

    if config.snapshot.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "snapshot.dir".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
