//! Per-test duration reconstruction from a reporter event log
//!
//! Start and completion events arrive interleaved and are paired by the
//! runner's numeric test id. Lines that are not events (headers, progress
//! markers, stray program output) are expected and skipped silently.

use crate::event::{LogEvent, TestDone, TestStart};
use std::collections::HashMap;

/// A test whose start has been seen
#[derive(Debug, Clone, PartialEq)]
pub struct InFlightTest {
    pub name: String,
    pub start_time: i64,
    pub group_ids: Vec<String>,
}

/// What happened to a single input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Changed reconstruction state
    Applied,
    /// Blank, marker, unrelated event, loading entry or orphan completion
    Ignored,
    /// Not JSON, or a start/done event with unusable fields
    Malformed,
}

/// Running tally of line outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub applied: usize,
    pub ignored: usize,
    pub malformed: usize,
    /// Completions that replaced an earlier duration with the same name
    pub overwritten: usize,
}

impl LineCounts {
    fn record(&mut self, outcome: LineOutcome) {
        match outcome {
            LineOutcome::Applied => self.applied += 1,
            LineOutcome::Ignored => self.ignored += 1,
            LineOutcome::Malformed => self.malformed += 1,
        }
    }

    /// Total lines seen
    pub fn total(&self) -> usize {
        self.applied + self.ignored + self.malformed
    }
}

/// Pairs `testStart`/`testDone` events into durations
///
/// Tests sharing a display name keep only the duration of whichever
/// completed last.
#[derive(Debug, Default)]
pub struct Reconstructor {
    in_flight: HashMap<i64, InFlightTest>,
    durations: HashMap<String, i64>,
    counts: LineCounts,
}

impl Reconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw line
    pub fn push_line(&mut self, line: &str) -> LineOutcome {
        let outcome = self.apply_line(line);
        self.counts.record(outcome);
        outcome
    }

    fn apply_line(&mut self, line: &str) -> LineOutcome {
        if line.is_empty() || line.starts_with('[') {
            return LineOutcome::Ignored;
        }

        match LogEvent::parse(line) {
            Ok(LogEvent::Start(start)) => self.apply_start(start),
            Ok(LogEvent::Done(done)) => self.apply_done(done),
            Ok(LogEvent::Other) => LineOutcome::Ignored,
            Err(e) => {
                tracing::trace!("skipping line: {}", e);
                LineOutcome::Malformed
            }
        }
    }

    fn apply_start(&mut self, start: TestStart) -> LineOutcome {
        if start.test.is_loading() {
            return LineOutcome::Ignored;
        }

        let group_ids = start.test.group_strings();
        self.in_flight.insert(
            start.test.id,
            InFlightTest {
                name: start.test.name,
                start_time: start.time,
                group_ids,
            },
        );
        LineOutcome::Applied
    }

    fn apply_done(&mut self, done: TestDone) -> LineOutcome {
        let Some(test) = self.in_flight.get(&done.test_id) else {
            tracing::trace!("testDone for unknown test id {}", done.test_id);
            return LineOutcome::Ignored;
        };

        let Some(duration) = done.time.checked_sub(test.start_time) else {
            tracing::trace!("duration of test id {} overflows", done.test_id);
            return LineOutcome::Malformed;
        };
        if let Some(previous) = self.durations.insert(test.name.clone(), duration) {
            tracing::warn!(
                "duplicate test name {:?}: {} ms replaces {} ms",
                test.name,
                duration,
                previous
            );
            self.counts.overwritten += 1;
        }
        LineOutcome::Applied
    }

    /// Look up a started test by id
    pub fn in_flight(&self, id: i64) -> Option<&InFlightTest> {
        self.in_flight.get(&id)
    }

    /// Durations resolved so far
    pub fn durations(&self) -> &HashMap<String, i64> {
        &self.durations
    }

    pub fn counts(&self) -> LineCounts {
        self.counts
    }

    /// Consume the reconstructor, yielding name -> duration in milliseconds
    pub fn finish(self) -> HashMap<String, i64> {
        tracing::debug!(
            "processed {} lines: {} applied, {} ignored, {} malformed, {} tests timed",
            self.counts.total(),
            self.counts.applied,
            self.counts.ignored,
            self.counts.malformed,
            self.durations.len()
        );
        self.durations
    }
}

/// Reconstruct test durations from a sequence of log lines
///
/// An empty map means no test ever completed; callers should report that
/// as "no data" rather than computing statistics.
pub fn reconstruct<I, S>(lines: I) -> HashMap<String, i64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut reconstructor = Reconstructor::new();
    for line in lines {
        reconstructor.push_line(line.as_ref());
    }
    reconstructor.finish()
}
