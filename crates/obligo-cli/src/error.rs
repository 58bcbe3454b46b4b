//! CLI error types.

use chrono::NaiveDate;
use obligo_core::ObligoError;
use obligo_data::DataError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Range end precedes its start.
    #[error("Invalid range: {to} is before {from}")]
    InvalidRange {
        /// First day of the range.
        from: NaiveDate,
        /// Last day of the range.
        to: NaiveDate,
    },

    /// Range spans more days than allowed.
    #[error("Date range spans {days} days; at most {max} are allowed")]
    RangeTooLong {
        /// Days between the range ends.
        days: i64,
        /// Configured limit.
        max: u32,
    },

    /// Valuation date precedes the purchase date.
    #[error("Valuation date {valuated_at} is before the purchase date {purchase_date} of {code}")]
    BeforePurchase {
        /// The holding code.
        code: String,
        /// The requested valuation date.
        valuated_at: NaiveDate,
        /// The holder's purchase date.
        purchase_date: NaiveDate,
    },

    /// No bond file was given.
    #[error("No bond file configured. Pass --bonds or set bonds_file in the configuration.")]
    NoBondsFile,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bond data error.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Calculation error.
    #[error("Calculation error: {0}")]
    Calculation(#[from] ObligoError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
