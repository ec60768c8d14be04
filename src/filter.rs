//! Test name filtering for -f/--filter expressions
//!
//! Patterns are regular expressions matched anywhere in the test name.

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashMap;

/// Filter that determines which tests are reported
#[derive(Debug, Clone)]
pub struct TestFilter {
    /// Pattern test names must match (None = all tests)
    pattern: Option<Regex>,
}

impl TestFilter {
    /// Create a filter that includes all tests
    pub fn all() -> Self {
        Self { pattern: None }
    }

    /// Parse a regular expression like `^widget` or `parser|lexer`
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("Invalid test name filter: {}", pattern))?;
        Ok(Self {
            pattern: Some(regex),
        })
    }

    /// Check if a test should be included
    pub fn should_include(&self, test_name: &str) -> bool {
        match &self.pattern {
            None => true,
            Some(regex) => regex.is_match(test_name),
        }
    }

    /// Drop durations for tests the filter excludes
    pub fn apply(&self, durations: &mut HashMap<String, i64>) {
        if self.pattern.is_some() {
            durations.retain(|name, _| self.should_include(name));
        }
    }
}
