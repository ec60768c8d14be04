//! Test runner JSON reporter events
//!
//! Only the two event shapes needed to time tests are modelled. Every other
//! `type` is left undecoded.

use serde::Deserialize;
use std::fmt;

/// Event type that opens a test
pub const TEST_START: &str = "testStart";

/// Event type that closes a test
pub const TEST_DONE: &str = "testDone";

/// Name prefix the runner uses for suite-loading pseudo tests
pub const LOADING_PREFIX: &str = "loading ";

/// `{"type":"testStart","time":..,"test":{..}}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestStart {
    /// Milliseconds since the runner started
    pub time: i64,
    pub test: TestInfo,
}

/// The `test` object carried by a `testStart` event
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestInfo {
    pub id: i64,
    pub name: String,
    #[serde(rename = "groupIDs", default)]
    pub group_ids: Option<Vec<GroupId>>,
}

impl TestInfo {
    /// Whether this is a suite-loading entry rather than a real test
    pub fn is_loading(&self) -> bool {
        self.name.starts_with(LOADING_PREFIX)
    }

    /// Group ids coerced to strings, empty when the field is absent
    pub fn group_strings(&self) -> Vec<String> {
        self.group_ids
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

/// `{"type":"testDone","time":..,"testID":..}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestDone {
    pub time: i64,
    #[serde(rename = "testID")]
    pub test_id: i64,
}

/// A group identifier as it appears on the wire
///
/// Runners emit integers, but any JSON scalar is accepted and rendered in
/// its canonical string form, `null` included.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GroupId {
    Null,
    Number(serde_json::Number),
    Text(String),
    Bool(bool),
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupId::Null => f.write_str("null"),
            GroupId::Number(n) => write!(f, "{}", n),
            GroupId::Text(s) => f.write_str(s),
            GroupId::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// A decoded log line
#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    Start(TestStart),
    Done(TestDone),
    /// A JSON object whose `type` is missing or not one we act on
    Other,
}

/// Why a line could not be decoded into a [`LogEvent`]
#[derive(Debug)]
pub enum DecodeError {
    /// Not JSON at all, or not a JSON object
    Syntax(String),
    /// Recognised event type with missing or mistyped fields
    Shape {
        event_type: &'static str,
        source: serde_json::Error,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Syntax(msg) => write!(f, "not a JSON object: {}", msg),
            DecodeError::Shape { event_type, source } => {
                write!(f, "malformed {} event: {}", event_type, source)
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Syntax(_) => None,
            DecodeError::Shape { source, .. } => Some(source),
        }
    }
}

impl LogEvent {
    /// Decode one line of reporter output
    ///
    /// The caller is expected to have already discarded blank lines and
    /// `[`-prefixed marker lines.
    pub fn parse(line: &str) -> Result<Self, DecodeError> {
        let value: serde_json::Value =
            serde_json::from_str(line).map_err(|e| DecodeError::Syntax(e.to_string()))?;

        if !value.is_object() {
            return Err(DecodeError::Syntax("top-level value is not an object".into()));
        }

        let event_type = match value.get("type").and_then(serde_json::Value::as_str) {
            Some(TEST_START) => TEST_START,
            Some(TEST_DONE) => TEST_DONE,
            _ => return Ok(LogEvent::Other),
        };

        let decoded = if event_type == TEST_START {
            serde_json::from_value(value).map(LogEvent::Start)
        } else {
            serde_json::from_value(value).map(LogEvent::Done)
        };
        decoded.map_err(|source| DecodeError::Shape { event_type, source })
    }
}
