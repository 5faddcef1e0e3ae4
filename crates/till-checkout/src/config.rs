//! # Till Configuration
//!
//! Where the `till` binary reads prices and rules from, and how it logs.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TILL_SOURCE=sqlite                                                 │
//! │     TILL_DB_PATH=/var/lib/till/till.db                                 │
//! │     TILL_LOG=till_checkout=debug                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, else $TILL_CONFIG, else                             │
//! │     ~/.config/till/till.toml (Linux)                                   │
//! │     ~/Library/Application Support/dev.till.till/till.toml (macOS)      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     in-memory reference data, ./till_dev.db, "info"                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! source = "sqlite"   # memory | sqlite
//!
//! [database]
//! path = "./till_dev.db"
//! max_connections = 5
//!
//! [log]
//! filter = "info,till_core=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable naming the config file.
pub const ENV_CONFIG: &str = "TILL_CONFIG";
pub const ENV_SOURCE: &str = "TILL_SOURCE";
pub const ENV_DB_PATH: &str = "TILL_DB_PATH";
pub const ENV_LOG: &str = "TILL_LOG";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Source Kind
// =============================================================================

/// Which backend supplies prices and rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Built-in reference catalog and rules.
    #[default]
    Memory,

    /// The till-db SQLite tables.
    Sqlite,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Memory => write!(f, "memory"),
            SourceKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" | "reference" => Ok(SourceKind::Memory),
            "sqlite" | "db" => Ok(SourceKind::Sqlite),
            other => Err(ConfigError::InvalidValue(format!(
                "Unknown source: '{}'. Valid options: memory, sqlite",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// SQLite settings, used when `source = "sqlite"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./till_dev.db")
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directive string.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TillConfig {
    #[serde(default)]
    pub source: SourceKind,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub log: LogSettings,
}

impl TillConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, `TILL_CONFIG`, or the platform default)
    /// 3. Environment variables
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = TillConfig::default();

        let path = config_path
            .or_else(|| std::env::var_os(ENV_CONFIG).map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading till config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = TillConfig::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::InvalidValue("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, toml::to_string_pretty(self)?)?;

        info!(?path, "Till config saved");
        Ok(path)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        if self.source == SourceKind::Sqlite && self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue(
                "database.path is required for the sqlite source".into(),
            ));
        }

        if self.log.filter.trim().is_empty() {
            return Err(ConfigError::InvalidValue("log.filter must not be empty".into()));
        }

        Ok(())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup(ENV_SOURCE) {
            match source.parse() {
                Ok(parsed) => {
                    debug!(source = %source, "Overriding source from environment");
                    self.source = parsed;
                }
                Err(_) => warn!(source = %source, "Unknown source in environment"),
            }
        }

        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(filter) = lookup(ENV_LOG) {
            self.log.filter = filter;
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "till", "till")
            .map(|dirs| dirs.config_dir().join("till.toml"))
    }
}
