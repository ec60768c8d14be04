//! Slowpoke - slow test finder for JSON test reporter logs
//!
//! This library pairs `testStart`/`testDone` events from a line-delimited
//! JSON event log into per-test durations, computes descriptive statistics
//! over them, and renders a report that highlights slow tests.
//!
//! # Example
//!
//! ```
//! let lines = [
//!     r#"{"type":"testStart","time":10,"test":{"id":1,"name":"adds"}}"#,
//!     r#"{"type":"testDone","time":130,"testID":1}"#,
//! ];
//! let durations = slowpoke::reconstruct::reconstruct(lines);
//! assert_eq!(durations["adds"], 120);
//!
//! let stats = slowpoke::stats::summarize(&durations).unwrap();
//! assert_eq!(stats.mean, 120.0);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod input;
pub mod reconstruct;
pub mod report;
pub mod stats;

pub use error::{Error, Result};
