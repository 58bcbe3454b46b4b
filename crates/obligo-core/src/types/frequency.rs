//! Coupon payment frequency.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ObligoError;

/// Months in a calendar year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// How often interest is credited and compounded.
///
/// `Unknown` is a sentinel for data that could not be classified; it is never valid for
/// calculation and every projection returns `None` for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Interest compounds every month (12 periods per year).
    Monthly,
    /// Interest compounds once a year.
    Yearly,
    /// A single bullet period spanning the whole term.
    None,
    /// Unclassified; rejected by every calculation.
    #[default]
    Unknown,
}

impl Frequency {
    /// Returns the number of months in one coupon period.
    ///
    /// For [`Frequency::None`] the single period spans the whole term, so a zero-month term
    /// has no period at all.
    #[must_use]
    pub fn months_per_period(&self, months_to_maturity: u32) -> Option<u32> {
        match self {
            Frequency::Monthly => Some(1),
            Frequency::Yearly => Some(MONTHS_PER_YEAR),
            Frequency::None if months_to_maturity > 0 => Some(months_to_maturity),
            Frequency::None | Frequency::Unknown => Option::None,
        }
    }

    /// Returns the number of reachable coupon periods for a term.
    ///
    /// Remainder months that do not fill a whole period are never priced.
    #[must_use]
    pub fn period_count(&self, months_to_maturity: u32) -> Option<u32> {
        self.months_per_period(months_to_maturity)
            .map(|months| months_to_maturity / months)
    }

    /// Returns true unless this is the `Unknown` sentinel.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Frequency::Unknown)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
            Frequency::None => "None",
            Frequency::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Frequency {
    type Err = ObligoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "12" => Ok(Frequency::Monthly),
            "yearly" | "annual" | "1" => Ok(Frequency::Yearly),
            "none" | "bullet" => Ok(Frequency::None),
            other => Err(ObligoError::invalid_spec(format!(
                "unrecognised frequency '{other}'"
            ))),
        }
    }
}
