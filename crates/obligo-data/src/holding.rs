//! Holding codes: a series name followed by the two-digit purchase day.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{DataError, DataResult};

/// Shortest valid code: a three-letter family, at least one more character, and the day.
const MIN_CODE_LEN: usize = 6;

/// A holder's position in a series, e.g. `EDO083412` for `EDO0834` bought on the 12th.
///
/// Parsing only checks that the day could exist in some month; whether it exists in the
/// series' sale month is checked when the bond is valued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HoldingCode {
    series: String,
    purchase_day: u32,
}

impl HoldingCode {
    /// Creates a holding code from its parts.
    ///
    /// # Errors
    ///
    /// Returns `DataError::InvalidHoldingCode` if the day is outside `1..=31`.
    pub fn new(series: impl Into<String>, purchase_day: u32) -> DataResult<Self> {
        let series = series.into().trim().to_ascii_uppercase();
        if !(1..=31).contains(&purchase_day) {
            return Err(DataError::invalid_code(
                format!("{series}{purchase_day:02}"),
                "purchase day must be between 1 and 31",
            ));
        }
        Ok(Self {
            series,
            purchase_day,
        })
    }

    /// Parses a `<SERIES><DD>` code.
    pub fn parse(code: &str) -> DataResult<Self> {
        code.parse()
    }

    /// Returns the series part.
    #[must_use]
    pub fn series(&self) -> &str {
        &self.series
    }

    /// Returns the purchase day.
    #[must_use]
    pub fn purchase_day(&self) -> u32 {
        self.purchase_day
    }
}

impl FromStr for HoldingCode {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if !code.is_ascii() {
            return Err(DataError::invalid_code(code, "code must be ASCII"));
        }
        if code.len() < MIN_CODE_LEN {
            return Err(DataError::invalid_code(
                code,
                format!("code must have at least {MIN_CODE_LEN} characters"),
            ));
        }

        let (series, day) = code.split_at(code.len() - 2);
        if !day.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DataError::invalid_code(code, "last two characters must be digits"));
        }
        let purchase_day: u32 = day
            .parse()
            .map_err(|_| DataError::invalid_code(code, "last two characters must be digits"))?;

        Self::new(series, purchase_day).map_err(|_| {
            DataError::invalid_code(code, "purchase day must be between 1 and 31")
        })
    }
}

impl fmt::Display for HoldingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.series, self.purchase_day)
    }
}
