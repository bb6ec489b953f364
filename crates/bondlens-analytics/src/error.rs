//! Error types for bond analytics.

use bondlens_core::CoreError;
use thiserror::Error;

/// Error type for schedule and sensitivity calculations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Bond terms are malformed (frequency, dates, coupon or face).
    #[error("invalid bond terms: {0}")]
    InvalidTerms(String),

    /// The bond has matured as of the settlement date.
    #[error("invalid schedule: settlement {settlement} is after maturity {maturity}")]
    InvalidSchedule {
        /// The settlement date that was provided.
        settlement: String,
        /// The maturity date of the instrument.
        maturity: String,
    },

    /// Invalid input parameter
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid date
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// General calculation failure
    #[error("calculation failed: {0}")]
    CalculationFailed(String),
}

impl AnalyticsError {
    /// Creates an invalid-terms error.
    #[must_use]
    pub fn invalid_terms(reason: impl Into<String>) -> Self {
        Self::InvalidTerms(reason.into())
    }

    /// Creates an invalid-input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl From<CoreError> for AnalyticsError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidFrequency { .. } => AnalyticsError::InvalidTerms(err.to_string()),
            CoreError::InvalidDate { message } => AnalyticsError::InvalidDate(message),
            CoreError::Parse { reason } => AnalyticsError::InvalidInput(reason),
        }
    }
}
