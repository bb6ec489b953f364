//! Error types for the core crate.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while constructing core domain values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Payment frequency outside the supported set.
    #[error("Invalid frequency: {value} - {reason}")]
    InvalidFrequency {
        /// The rejected periods-per-year value.
        value: i64,
        /// Reason for rejection.
        reason: String,
    },

    /// A textual value could not be parsed.
    #[error("Parse error: {reason}")]
    Parse {
        /// Description of the failure.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid frequency error.
    #[must_use]
    pub fn invalid_frequency(value: i64, reason: impl Into<String>) -> Self {
        Self::InvalidFrequency {
            value,
            reason: reason.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }
}
