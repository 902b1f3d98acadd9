// Error types for Executor module

use std::path::PathBuf;
use thiserror::Error;

/// Executor error types
///
/// None of these cross the `run` boundary; every executor collapses them to
/// `false`. They are kept typed so logs and `outcome()` callers can tell them apart.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to open output file {}: {source}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for '{0}': {1}")]
    WaitFailed(String, #[source] std::io::Error),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ExecutorError>;
