//! Row-level exclusion records.

use bondlens_analytics::AnalyticsError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a held row was left out of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// A required field was blank or could not be parsed.
    MissingField(String),
    /// The fields were present but do not form valid bond terms.
    InvalidTerms(String),
    /// Settlement is after the maturity date.
    Matured(String),
    /// The analytics could not be computed (e.g. zero present value).
    Calculation(String),
}

impl SkipReason {
    /// Shorthand for a missing column value.
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self::MissingField(field.to_string())
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing {field}"),
            Self::InvalidTerms(reason) => write!(f, "invalid terms: {reason}"),
            Self::Matured(maturity) => write!(f, "matured on {maturity}"),
            Self::Calculation(reason) => write!(f, "calculation failed: {reason}"),
        }
    }
}

impl From<AnalyticsError> for SkipReason {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::InvalidTerms(reason) => Self::InvalidTerms(reason),
            AnalyticsError::InvalidSchedule { maturity, .. } => Self::Matured(maturity),
            AnalyticsError::InvalidDate(reason) => Self::InvalidTerms(reason),
            AnalyticsError::InvalidInput(reason) | AnalyticsError::CalculationFailed(reason) => {
                Self::Calculation(reason)
            }
        }
    }
}

/// A row that was excluded, with its reference for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Row reference (ISIN or similar).
    pub reference: String,
    /// Why it was excluded.
    pub reason: SkipReason,
}

impl SkippedRow {
    /// Creates a new skipped row record.
    #[must_use]
    pub fn new(reference: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            reference: reference.into(),
            reason,
        }
    }
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reference, self.reason)
    }
}
