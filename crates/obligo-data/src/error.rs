//! Error types for bond master data.

use obligo_core::ObligoError;
use thiserror::Error;

/// A specialized Result type for data operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised while loading or looking up bond master data.
#[derive(Error, Debug)]
pub enum DataError {
    /// Reading a bond file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV file is structurally malformed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The JSON file is structurally malformed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No bond with this series is loaded.
    #[error("Bond not found: {series}")]
    NotFound {
        /// The requested series.
        series: String,
    },

    /// The file extension is neither `.csv` nor `.json`.
    #[error("Unsupported bond file format: {path}")]
    UnsupportedFormat {
        /// The offending path.
        path: String,
    },

    /// A single record could not be finalized into a bond.
    #[error("Invalid record at row {row} ({series}): {reason}")]
    InvalidRecord {
        /// One-based data row number.
        row: usize,
        /// Series column of the row, possibly empty.
        series: String,
        /// Description of the problem.
        reason: String,
    },

    /// A holding code is not of the form `<SERIES><DD>`.
    #[error("Invalid holding code '{code}': {reason}")]
    InvalidHoldingCode {
        /// The code as given.
        code: String,
        /// Description of the problem.
        reason: String,
    },

    /// A core invariant was violated.
    #[error(transparent)]
    Core(#[from] ObligoError),
}

impl DataError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(series: impl Into<String>) -> Self {
        Self::NotFound {
            series: series.into(),
        }
    }

    /// Creates an invalid holding code error.
    #[must_use]
    pub fn invalid_code(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHoldingCode {
            code: code.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error means the series does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
