//! Error types for slowpoke
//!
//! Data-quality problems inside an event log are never errors; only the
//! conditions below are surfaced to callers.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or summarising a test event log
#[derive(Error, Debug)]
pub enum Error {
    /// No `testStart`/`testDone` pair resolved to a duration
    #[error("No test data found")]
    NoData,

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for slowpoke operations
pub type Result<T> = std::result::Result<T, Error>;
