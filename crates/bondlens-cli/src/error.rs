//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid coupon rate.
    #[error("Invalid coupon rate: {0}. Must be between 0 and 100.")]
    InvalidCoupon(f64),

    /// Invalid yield.
    #[error("Invalid yield: {0}. Must be between -10 and 100.")]
    InvalidYield(f64),

    /// Fund not present in the holdings file.
    #[error("Unknown fund: {fund}. Available: {available}")]
    UnknownFund {
        /// Requested fund.
        fund: String,
        /// Funds found in the file.
        available: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
