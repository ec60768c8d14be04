//! Duration statistics over reconstructed test timings

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;

/// One resolved (name, milliseconds) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationSample {
    pub name: String,
    pub duration_ms: i64,
}

/// Descriptive statistics for a complete set of test durations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (divides by N)
    pub standard_dev: f64,
    pub p90: f64,
    pub p95: f64,
    pub total_duration: i64,
    pub slowest_test: i64,
    pub fastest_test: i64,
}

/// Calculate percentile from sorted data
///
/// Linear interpolation between the two closest ranks, so the 50th
/// percentile matches the median for both odd and even counts.
fn calculate_percentile(sorted_data: &[i64], percentile: f64) -> f64 {
    if sorted_data.len() == 1 {
        return sorted_data[0] as f64;
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower] as f64
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] as f64 * (1.0 - weight) + sorted_data[upper] as f64 * weight
    }
}

fn median(sorted: &[i64]) -> f64 {
    let len = sorted.len();
    if len % 2 == 0 {
        (sorted[len / 2 - 1] as f64 + sorted[len / 2] as f64) / 2.0
    } else {
        sorted[len / 2] as f64
    }
}

/// Compute statistics over a set of durations
///
/// Returns [`Error::NoData`] for an empty slice; there is no meaningful
/// snapshot of zero samples.
pub fn compute_statistics(durations: &[i64]) -> Result<Statistics> {
    if durations.is_empty() {
        return Err(Error::NoData);
    }

    let mut sorted = durations.to_vec();
    sorted.sort_unstable();

    let count = sorted.len();
    let total: i128 = sorted.iter().map(|&d| d as i128).sum();
    let total_duration = total.clamp(i64::MIN as i128, i64::MAX as i128) as i64;
    let mean = total as f64 / count as f64;
    let variance = sorted
        .iter()
        .map(|&d| {
            let deviation = d as f64 - mean;
            deviation * deviation
        })
        .sum::<f64>()
        / count as f64;

    Ok(Statistics {
        count,
        mean,
        median: median(&sorted),
        standard_dev: variance.sqrt(),
        p90: calculate_percentile(&sorted, 90.0),
        p95: calculate_percentile(&sorted, 95.0),
        total_duration,
        slowest_test: sorted[count - 1],
        fastest_test: sorted[0],
    })
}

/// Statistics over every duration in a name -> duration map
pub fn summarize(durations: &HashMap<String, i64>) -> Result<Statistics> {
    let values: Vec<i64> = durations.values().copied().collect();
    compute_statistics(&values)
}

/// Order tests slowest first, breaking ties by name
pub fn rank_durations(durations: &HashMap<String, i64>) -> Vec<DurationSample> {
    let mut ranked: Vec<DurationSample> = durations
        .iter()
        .map(|(name, &duration_ms)| DurationSample {
            name: name.clone(),
            duration_ms,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.duration_ms
            .cmp(&a.duration_ms)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked
}
