//! Configuration file and defaults.
//!
//! Every path the app touches comes from here (or from CLI flags layered on
//! top); nothing is resolved against the working directory implicitly.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

const APP_NAME: &str = "flashcards";
const CONFIG_FILENAME: &str = "config.toml";
const LOG_FILENAME: &str = "flashcards.log";
const DEFAULT_TOPIC_FILE: &str = "topic.json";

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory scanned for topic files.
    pub topics_dir: PathBuf,
    /// File loaded at startup. Relative paths are under `topics_dir`.
    pub default_file: PathBuf,
    /// Shuffle the prompts of each study run.
    pub shuffle: bool,
    /// Show topic files without their extension.
    pub strip_extensions: bool,
    pub log_level: LogLevel,
    /// Log destination. The terminal UI falls back to [`default_log_path`].
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            topics_dir: default_topics_dir(),
            default_file: PathBuf::from(DEFAULT_TOPIC_FILE),
            shuffle: true,
            strip_extensions: false,
            log_level: LogLevel::default(),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Full path of the startup topic file.
    pub fn default_file_path(&self) -> PathBuf {
        if self.default_file.is_absolute() {
            self.default_file.clone()
        } else {
            self.topics_dir.join(&self.default_file)
        }
    }
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join(APP_NAME)
}

/// `<config_dir>/flashcards/config.toml`
pub fn default_config_path() -> PathBuf {
    app_dir(dirs::config_dir()).join(CONFIG_FILENAME)
}

/// `<data_dir>/flashcards/topics`
pub fn default_topics_dir() -> PathBuf {
    app_dir(dirs::data_dir()).join("topics")
}

/// `<data_dir>/flashcards/flashcards.log`
pub fn default_log_path() -> PathBuf {
    app_dir(dirs::data_dir()).join(LOG_FILENAME)
}

/// Load configuration.
///
/// With an explicit path the file must exist. Without one, the default
/// location is tried and a missing file yields the defaults.
///
/// # Errors
/// `ConfigError::Read` / `ConfigError::Parse` on unreadable or invalid TOML.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = default_config_path();
            if !p.exists() {
                debug!(path = %p.display(), "No config file, using defaults");
                return Ok(AppConfig::default());
            }
            p
        }
    };

    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    parse_config(&text, &path)
}

/// Parse TOML text. Missing keys take their default values.
///
/// # Errors
/// `ConfigError::Parse` on invalid TOML or wrongly typed keys.
pub fn parse_config(text: &str, path: &Path) -> Result<AppConfig, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// TESTS
// ============================================================================
