//! Field-level validation utilities.
//!
//! Validation collects every failing field instead of stopping at the first,
//! so a form can highlight all invalid inputs in one pass.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

/// Basic email grammar: something, an `@`, a host with at least one dot.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Accumulator for field-level validation failures
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First message recorded for a field, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Collapse into a field -> messages map for display.
    pub fn into_field_map(self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in self.errors {
            map.entry(error.field).or_default().push(error.message);
        }
        map
    }
}

/// Common validation predicates
pub mod validators {
    use super::EMAIL_PATTERN;

    /// Check if a string is not empty after trimming
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a trimmed string meets a minimum length
    pub fn min_length(value: &str, min: usize) -> bool {
        value.trim().chars().count() >= min
    }

    /// Check if an email address matches the basic grammar
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_PATTERN.is_match(email.trim())
    }
}
