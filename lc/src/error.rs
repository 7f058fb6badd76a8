//! Error types for composition and parameter validation

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Errors raised by the composer
///
/// The only failure is a caller passing a value outside one of the closed
/// vocabularies, which is a contract violation rather than a runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("Invalid input: unknown {field} '{value}'")]
    InvalidInput { field: &'static str, value: String },
}

impl ComposeError {
    pub(crate) fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        ComposeError::InvalidInput {
            field,
            value: value.into(),
        }
    }
}

/// Per-field validation failures for an incoming parameter request
///
/// Keys are the wire field names (`grade`, `topic`, `learningObjectType`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Message recorded for a field, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<&'static str, String> {
        &self.fields
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.fields.values().map(String::as_str).collect();
        write!(f, "Invalid parameters: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
