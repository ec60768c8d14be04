//! Slow-test report rendering
//!
//! Text output for terminals, plus JSON and CSV for machine consumption.

use crate::cli::OutputFormat;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::stats::{DurationSample, Statistics};
use owo_colors::{style, OwoColorize, Style};
use serde::Serialize;
use std::fmt::Write;

/// Styles used by the text report; plain unless colorized
#[derive(Debug, Default)]
pub struct ReportStyles {
    pub heading: Style,
    pub slow: Style,
    pub label: Style,
}

impl ReportStyles {
    pub fn colorize(&mut self) {
        self.heading = style().bold();
        self.slow = style().red().bold();
        self.label = style().cyan();
    }

    /// Styles matching the configured color choice
    pub fn for_config(config: &ReportConfig) -> Self {
        let mut styles = Self::default();
        if config.color.should_colorize() {
            styles.colorize();
        }
        styles
    }
}

/// Everything needed to print a report
#[derive(Debug)]
pub struct Report<'a> {
    /// All samples, slowest first
    pub ranked: &'a [DurationSample],
    pub statistics: &'a Statistics,
    pub config: &'a ReportConfig,
}

impl<'a> Report<'a> {
    pub fn new(
        ranked: &'a [DurationSample],
        statistics: &'a Statistics,
        config: &'a ReportConfig,
    ) -> Self {
        Self {
            ranked,
            statistics,
            config,
        }
    }

    /// Rows to display after applying `slow_only` and `top`
    pub fn visible_rows(&self) -> Vec<&'a DurationSample> {
        let rows = self
            .ranked
            .iter()
            .filter(|s| !self.config.slow_only || self.config.is_slow(s.duration_ms));
        match self.config.top {
            Some(top) => rows.take(top).collect(),
            None => rows.collect(),
        }
    }

    /// Number of tests at or above the threshold
    pub fn slow_count(&self) -> usize {
        self.ranked
            .iter()
            .filter(|s| self.config.is_slow(s.duration_ms))
            .count()
    }

    pub fn render(&self, format: OutputFormat, styles: &ReportStyles) -> Result<String> {
        Ok(match format {
            OutputFormat::Text => self.to_text(styles),
            OutputFormat::Json => self.to_json()?,
            OutputFormat::Csv => self.to_csv(),
        })
    }

    /// Render the human-readable table and summary
    pub fn to_text(&self, styles: &ReportStyles) -> String {
        let rows = self.visible_rows();
        let width = rows
            .iter()
            .map(|s| s.duration_ms.to_string().len())
            .max()
            .unwrap_or(1);
        let threshold = self.config.slow_threshold_ms;

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}",
            format!("Test durations (slowest first, slow >= {} ms)", threshold)
                .style(styles.heading)
        );
        let _ = writeln!(out);

        for sample in &rows {
            let duration = format!("{:>width$} ms", sample.duration_ms, width = width);
            if self.config.is_slow(sample.duration_ms) {
                let _ = writeln!(
                    out,
                    "  {}  {}  {}",
                    duration.style(styles.slow),
                    "SLOW".style(styles.slow),
                    sample.name
                );
            } else {
                let _ = writeln!(out, "  {}        {}", duration, sample.name);
            }
        }

        let hidden = self.ranked.len() - rows.len();
        if hidden > 0 {
            let _ = writeln!(out, "  ... {} more not shown", hidden);
        }

        let stats = self.statistics;
        let slow = self.slow_count();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Summary".style(styles.heading));
        let mut line = |label: &str, value: String| {
            let _ = writeln!(out, "  {}{}", format!("{:<12}", label).style(styles.label), value);
        };
        line("Tests:", stats.count.to_string());
        line(
            "Slow tests:",
            if slow > 0 {
                format!("{}", slow.style(styles.slow))
            } else {
                "0".to_string()
            },
        );
        line("Total:", format!("{} ms", stats.total_duration));
        line("Mean:", format!("{:.2} ms", stats.mean));
        line("Median:", format!("{:.2} ms", stats.median));
        line("Std dev:", format!("{:.2} ms", stats.standard_dev));
        line("P90:", format!("{:.2} ms", stats.p90));
        line("P95:", format!("{:.2} ms", stats.p95));
        line("Fastest:", format!("{} ms", stats.fastest_test));
        line("Slowest:", format!("{} ms", stats.slowest_test));

        out
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        let report = JsonReport {
            threshold_ms: self.config.slow_threshold_ms,
            tests: self
                .visible_rows()
                .into_iter()
                .map(|s| JsonTest {
                    name: &s.name,
                    duration_ms: s.duration_ms,
                    slow: self.config.is_slow(s.duration_ms),
                })
                .collect(),
            statistics: self.statistics,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    /// Render as CSV with a header row
    pub fn to_csv(&self) -> String {
        let mut out = String::from("name,duration_ms,slow\n");
        for sample in self.visible_rows() {
            let _ = writeln!(
                out,
                "{},{},{}",
                escape_field(&sample.name),
                sample.duration_ms,
                self.config.is_slow(sample.duration_ms)
            );
        }
        out
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    threshold_ms: u64,
    tests: Vec<JsonTest<'a>>,
    statistics: &'a Statistics,
}

#[derive(Serialize)]
struct JsonTest<'a> {
    name: &'a str,
    duration_ms: i64,
    slow: bool,
}

/// Escape CSV field (handle commas, quotes, line breaks)
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{compute_statistics, rank_durations};
    use std::collections::HashMap;

    fn sample_durations() -> HashMap<String, i64> {
        let mut durations = HashMap::new();
        durations.insert("renders widget".to_string(), 1200);
        durations.insert("parses, quickly".to_string(), 40);
        durations.insert("loads config".to_string(), 510);
        durations.insert("says \"hi\"".to_string(), 3);
        durations
    }

    fn stats_for(durations: &HashMap<String, i64>) -> Statistics {
        let values: Vec<i64> = durations.values().copied().collect();
        compute_statistics(&values).unwrap()
    }

    #[test]
    fn test_text_report_lists_slowest_first() {
        let durations = sample_durations();
        let ranked = rank_durations(&durations);
        let stats = stats_for(&durations);
        let config = ReportConfig::default();
        let text = Report::new(&ranked, &stats, &config).to_text(&ReportStyles::default());

        let slow = text.find("renders widget").unwrap();
        let fast = text.find("says \"hi\"").unwrap();
        assert!(slow < fast);
        assert!(text.contains("1200 ms  SLOW  renders widget"));
        assert!(text.contains("Slow tests: 2"));
        assert!(text.contains("Total:      1753 ms"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_colorized_text_has_escape_codes() {
        let durations = sample_durations();
        let ranked = rank_durations(&durations);
        let stats = stats_for(&durations);
        let config = ReportConfig::default();
        let mut styles = ReportStyles::default();
        styles.colorize();
        let text = Report::new(&ranked, &stats, &config).to_text(&styles);
        assert!(text.contains('\u{1b}'));
    }

    #[test]
    fn test_top_limits_rows_but_not_statistics() {
        let durations = sample_durations();
        let ranked = rank_durations(&durations);
        let stats = stats_for(&durations);
        let config = ReportConfig {
            top: Some(1),
            ..ReportConfig::default()
        };
        let report = Report::new(&ranked, &stats, &config);
        assert_eq!(report.visible_rows().len(), 1);

        let text = report.to_text(&ReportStyles::default());
        assert!(text.contains("... 3 more not shown"));
        assert!(text.contains("Tests:      4"));
    }

    #[test]
    fn test_slow_only() {
        let durations = sample_durations();
        let ranked = rank_durations(&durations);
        let stats = stats_for(&durations);
        let config = ReportConfig {
            slow_only: true,
            ..ReportConfig::default()
        };
        let names: Vec<&str> = Report::new(&ranked, &stats, &config)
            .visible_rows()
            .into_iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["renders widget", "loads config"]);
    }

    #[test]
    fn test_json_report() {
        let durations = sample_durations();
        let ranked = rank_durations(&durations);
        let stats = stats_for(&durations);
        let config = ReportConfig::default();
        let json = Report::new(&ranked, &stats, &config).to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["threshold_ms"], 500);
        assert_eq!(value["tests"][0]["name"], "renders widget");
        assert_eq!(value["tests"][0]["slow"], true);
        assert_eq!(value["tests"][3]["slow"], false);
        assert_eq!(value["statistics"]["total_duration"], 1753);
        assert_eq!(value["statistics"]["count"], 4);
    }

    #[test]
    fn test_csv_report_escapes_names() {
        let durations = sample_durations();
        let ranked = rank_durations(&durations);
        let stats = stats_for(&durations);
        let config = ReportConfig::default();
        let csv = Report::new(&ranked, &stats, &config).to_csv();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "name,duration_ms,slow");
        assert_eq!(lines[1], "renders widget,1200,true");
        assert_eq!(lines[3], "\"parses, quickly\",40,false");
        assert_eq!(lines[4], "\"says \"\"hi\"\"\",3,false");
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let durations = sample_durations();
        let ranked = rank_durations(&durations);
        let stats = stats_for(&durations);
        let config = ReportConfig::default();
        let report = Report::new(&ranked, &stats, &config);
        let styles = ReportStyles::default();

        assert!(report
            .render(OutputFormat::Csv, &styles)
            .unwrap()
            .starts_with("name,duration_ms,slow"));
        assert!(report
            .render(OutputFormat::Json, &styles)
            .unwrap()
            .starts_with('{'));
        assert!(report
            .render(OutputFormat::Text, &styles)
            .unwrap()
            .starts_with("Test durations"));
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(escape_field("carriage\rreturn"), "\"carriage\rreturn\"");
    }
}
