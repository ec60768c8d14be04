//! CLI argument parsing for slowpoke

use crate::config::{Color, ReportConfig};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "slowpoke")]
#[command(version)]
#[command(
    about = "Find slow tests in a test runner's JSON event log",
    long_about = None
)]
pub struct Cli {
    /// Event log written by the JSON reporter ("-" reads stdin)
    #[arg(value_name = "LOG")]
    pub log: PathBuf,

    /// Tests taking at least this many milliseconds are highlighted (default: 500)
    #[arg(short = 't', long = "threshold", value_name = "MS")]
    pub threshold: Option<u64>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Show at most N tests
    #[arg(short = 'n', long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// Only list tests at or above the threshold
    #[arg(long = "slow-only")]
    pub slow_only: bool,

    /// Only include tests whose name matches this regex
    #[arg(short = 'f', long = "filter", value_name = "REGEX")]
    pub filter: Option<String>,

    /// When to colorize text output
    #[arg(long = "color", value_enum, value_name = "WHEN")]
    pub color: Option<Color>,

    /// Read report settings from a TOML file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Overlay command-line flags on top of file configuration
    pub fn apply_to(&self, config: &mut ReportConfig) {
        if let Some(threshold) = self.threshold {
            config.slow_threshold_ms = threshold;
        }
        if let Some(top) = self.top {
            config.top = Some(top);
        }
        if self.slow_only {
            config.slow_only = true;
        }
        if let Some(color) = self.color {
            config.color = color;
        }
    }
}
