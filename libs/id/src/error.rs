//! Error types for identifier parameter parsing and validation.

use thiserror::Error;

/// Errors that can occur when parsing or validating identifier parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// A fixed-length code has the wrong length.
    #[error("invalid {field}: expected {expected} characters, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The year is not a four-digit non-negative integer.
    #[error("invalid year: '{0}'")]
    InvalidYear(String),
}

impl IdError {
    /// Name of the parameter that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            IdError::InvalidLength { field, .. } => field,
            IdError::InvalidYear(_) => "year",
        }
    }
}
