//! Report configuration
//!
//! Values come from an optional TOML file and are then overridden by
//! command-line flags. None of them influence reconstruction or statistics.

use crate::error::{Error, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::path::Path;

/// Default slow-test threshold in milliseconds
pub const DEFAULT_SLOW_THRESHOLD_MS: u64 = 500;

/// Specifies whether to colorize output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Colorize when stdout is a terminal that supports it
    #[default]
    Auto,
    /// Always colorize
    Always,
    /// Never colorize
    Never,
}

impl Color {
    /// Whether stdout output should carry color codes
    pub fn should_colorize(self) -> bool {
        match self {
            Color::Auto => supports_color::on_cached(supports_color::Stream::Stdout).is_some(),
            Color::Always => true,
            Color::Never => false,
        }
    }
}

/// Configuration for the slow-test report
///
/// # Example
/// ```
/// use slowpoke::config::ReportConfig;
///
/// let config = ReportConfig::default();
/// assert_eq!(config.slow_threshold_ms, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Tests taking at least this many milliseconds are reported as slow
    pub slow_threshold_ms: u64,

    /// Show at most this many tests
    pub top: Option<usize>,

    /// Only list slow tests
    pub slow_only: bool,

    pub color: Color,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            slow_threshold_ms: DEFAULT_SLOW_THRESHOLD_MS,
            top: None,
            slow_only: false,
            color: Color::Auto,
        }
    }
}

impl ReportConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.top == Some(0) {
            return Err(Error::Config("top must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Whether a duration counts as slow
    pub fn is_slow(&self, duration_ms: i64) -> bool {
        duration_ms >= 0 && duration_ms as u64 >= self.slow_threshold_ms
    }
}
