//! Error types for portfolio analytics.
//!
//! Problems with individual rows are not errors: they are recorded as
//! [`SkipReason`](crate::types::SkipReason) values on the summary. The
//! variants here cover requests that cannot be answered at all.

use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// No row carries a position column for the requested fund.
    #[error("Unknown fund '{fund}'")]
    UnknownFund {
        /// The fund that was requested.
        fund: String,
    },

    /// FX rate is zero, negative or not finite.
    #[error("Invalid FX rate: {rate}")]
    InvalidFxRate {
        /// The invalid rate value.
        rate: String,
    },

    /// Invalid request parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: String,
    },
}

impl PortfolioError {
    /// Create an unknown fund error.
    #[must_use]
    pub fn unknown_fund(fund: impl Into<String>) -> Self {
        Self::UnknownFund { fund: fund.into() }
    }

    /// Create an invalid FX rate error.
    #[must_use]
    pub fn invalid_fx_rate(rate: impl ToString) -> Self {
        Self::InvalidFxRate {
            rate: rate.to_string(),
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortfolioError::unknown_fund("NVPF");
        assert_eq!(err.to_string(), "Unknown fund 'NVPF'");

        let err = PortfolioError::invalid_fx_rate(-1.5);
        assert_eq!(err.to_string(), "Invalid FX rate: -1.5");

        let err = PortfolioError::invalid_input("no funds selected");
        assert!(err.to_string().contains("no funds selected"));
    }
}
