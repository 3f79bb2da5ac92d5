//! error types shared across the crate

use thiserror::Error;

/// a query string that could not be parsed into a condition tree
#[derive(Debug, Clone, PartialEq, Error)]
#[error("at {position}: {message}")]
pub struct ParseError {
    pub message: String,
    /// byte offset into the query string
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// an environment value outside the domain of its field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvironmentError {
    #[error("invalid environment field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("invalid environment JSON: {0}")]
    Json(String),
}

impl EnvironmentError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EnvironmentError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// any error raised by the public entry points
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Environment(#[from] EnvironmentError),
}
