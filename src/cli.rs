//! CLI command implementations for the Arctic wargame.

pub(crate) mod batch;
pub(crate) mod play;
pub(crate) mod run;

mod output;

use arctic_wargame::GameConfig;
use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `batch` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BatchFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<arctic_wargame::ConfigError> for CliError {
    fn from(e: arctic_wargame::ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<arctic_wargame::SnapshotError> for CliError {
    fn from(e: arctic_wargame::SnapshotError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<arctic_wargame::EngineError> for CliError {
    fn from(e: arctic_wargame::EngineError) -> Self {
        Self::new(e.to_string())
    }
}

/// Load the config file if given, else the defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<GameConfig, CliError> {
    match path {
        Some(path) => Ok(GameConfig::from_json_file(path)?),
        None => Ok(GameConfig::default()),
    }
}

/// The given seed, or one derived from the clock.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}
