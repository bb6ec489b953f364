//! Error types for file ingestion.

use thiserror::Error;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// File-level ingestion failures. Bad cells never produce these; they
/// become missing fields on the row.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV structure is malformed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header.
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// Name (or description) of the column.
        column: String,
    },

    /// FX rate is zero or negative.
    #[error("Invalid FX rate: {rate}")]
    InvalidFxRate {
        /// The rejected rate.
        rate: String,
    },
}

impl FileError {
    /// Create a missing column error.
    #[must_use]
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }
}
