//! Error types for building the extraction engine
//!
//! Detectors never fail on a document: missing markup degrades to missing
//! fields. The only failures are at construction time, when a selector table
//! contains a selector or pattern that does not compile.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Invalid CSS selector for '{field}': {selector} - {reason}")]
    InvalidSelector {
        field: String,
        selector: String,
        reason: String,
    },

    #[error("Invalid regex pattern for '{field}': {pattern} - {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String, field: String },
}

impl ParsingError {
    /// Create an invalid selector error for a selector table field
    pub fn invalid_selector(field: &str, selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            field: field.to_string(),
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid pattern error for a selector table field
    pub fn invalid_pattern(field: &str, pattern: &str, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            field: field.to_string(),
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn configuration(field: &str, message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            field: field.to_string(),
        }
    }

    /// Name of the selector table field the error refers to
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidSelector { field, .. }
            | Self::InvalidPattern { field, .. }
            | Self::ConfigurationError { field, .. } => field,
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
