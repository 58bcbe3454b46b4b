//! Error types for the Obligo core.
//!
//! Every variant is fatal to the single calculation that raised it. Outcomes such as
//! "valuation before purchase" or "past the last documented period" are not errors; see
//! [`Valuation`](crate::types::Valuation).

use thiserror::Error;

/// A specialized Result type for Obligo core operations.
pub type ObligoResult<T> = Result<T, ObligoError>;

/// The main error type for period and accrual calculations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObligoError {
    /// The bond's payment frequency is the `Unknown` sentinel.
    #[error("Unknown payment frequency for bond {series}")]
    UnknownFrequency {
        /// Series of the offending bond.
        series: String,
    },

    /// Period index outside `[0, period_count)`.
    #[error("Invalid period index {index}: bond has {period_count} periods")]
    InvalidPeriodIndex {
        /// Requested index.
        index: usize,
        /// Number of coupon periods the bond has.
        period_count: u32,
    },

    /// Purchase day is zero or exceeds the length of the sale-start month.
    #[error("Invalid purchase day {day}: must be between 1 and {max_day}")]
    InvalidPurchaseDay {
        /// Requested day of month.
        day: u32,
        /// Last valid day of the sale-start month.
        max_day: u32,
    },

    /// A calendar date could not be constructed.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Local midnight does not exist in the calendar zone on this date.
    #[error("Local midnight of {date} does not exist in zone {zone}")]
    NonexistentLocalTime {
        /// The civil date.
        date: String,
        /// The IANA zone name.
        zone: String,
    },

    /// A coupon period has zero elapsed days and cannot be prorated.
    #[error("Coupon period {index} has zero length")]
    EmptyPeriod {
        /// Index of the degenerate period.
        index: usize,
    },

    /// The compounded price no longer fits in a decimal.
    #[error("Price overflowed while compounding period {index}")]
    ArithmeticOverflow {
        /// Index of the period being compounded.
        index: usize,
    },

    /// Invalid bond specification.
    #[error("Invalid bond specification: {reason}")]
    InvalidBondSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// Missing required field while building a bond.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// Unrecognised calendar zone name.
    #[error("Invalid calendar zone: {name}")]
    InvalidZone {
        /// The name that failed to parse.
        name: String,
    },
}

impl ObligoError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid bond specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidBondSpec {
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Returns true for errors caused by the calculation inputs
    /// (frequency, period index or purchase day).
    #[must_use]
    pub fn is_input_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownFrequency { .. }
                | Self::InvalidPeriodIndex { .. }
                | Self::InvalidPurchaseDay { .. }
        )
    }
}
