//! File-based configuration for the triage workspace.
//!
//! # Responsibility
//! - Deserialize `triage.toml` into typed sections with defaults.
//! - Resolve relative storage and log paths against the config file directory.
//!
//! # Invariants
//! - Every section is optional; a missing file path yields defaults.
//! - Advice windows are strictly positive and at most a century long.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE_NAME: &str = "triage.sqlite3";
const DEFAULT_RECENT_DAYS: i64 = 30;
const DEFAULT_TREND_MONTHS: i64 = 6;
const MAX_RECENT_DAYS: i64 = 36_500;
const MAX_TREND_MONTHS: i64 = 1_200;

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct TriageConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub advice: AdviceConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file holding the key-value record store.
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Directory for rolling log files. File logging is off when unset.
    pub dir: Option<PathBuf>,
    /// Mirror warnings and errors to stderr.
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
            stderr: false,
        }
    }
}

/// Time windows used by personalized advice and health insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    /// Visits newer than this count as recent (recurrence, high-risk penalty).
    pub recent_days: i64,
    /// Span of the risk trend series.
    pub trend_months: i64,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            recent_days: DEFAULT_RECENT_DAYS,
            trend_months: DEFAULT_TREND_MONTHS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    InvalidValue(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::InvalidValue(message) => write!(f, "invalid config value: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidValue(_) => None,
        }
    }
}

/// Loads configuration from `path`, or returns defaults when `path` is `None`.
///
/// # Errors
/// - `Io` when the file cannot be read.
/// - `Parse` when the TOML is malformed or has wrongly typed fields.
/// - `InvalidValue` when advice windows are not positive or exceed a century.
pub fn load_config(path: Option<&Path>) -> Result<TriageConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(TriageConfig::default());
    };

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = parse_config(&text).map_err(|err| match err {
        ConfigError::Parse { source, .. } => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    if let Some(base) = path.parent() {
        if config.storage.db_path.is_relative() {
            config.storage.db_path = base.join(&config.storage.db_path);
        }
        if let Some(dir) = config.logging.dir.as_mut().filter(|dir| dir.is_relative()) {
            *dir = base.join(&*dir);
        }
    }

    Ok(config)
}

/// Parses configuration text without touching the file system.
pub fn parse_config(text: &str) -> Result<TriageConfig, ConfigError> {
    let config: TriageConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: PathBuf::new(),
        source,
    })?;
    check_window("advice.recent_days", config.advice.recent_days, MAX_RECENT_DAYS)?;
    check_window("advice.trend_months", config.advice.trend_months, MAX_TREND_MONTHS)?;
    Ok(config)
}

fn check_window(name: &str, value: i64, max: i64) -> Result<(), ConfigError> {
    if !(1..=max).contains(&value) {
        return Err(ConfigError::InvalidValue(format!(
            "{name} must be within 1..={max}, got {value}"
        )));
    }
    Ok(())
}
