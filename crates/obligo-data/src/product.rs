//! Retail bond product families.

use obligo_core::Frequency;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A product family, identified by the first three letters of a series name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductKind {
    /// Three-month fixed-rate bullet.
    Ots,
    /// One-year variable-rate, monthly interest.
    Ror,
    /// Two-year variable-rate, monthly interest.
    Dor,
    /// Three-year fixed-rate, yearly capitalisation.
    Tos,
    /// Two-year fixed-rate, yearly capitalisation.
    Dos,
    /// Four-year inflation-indexed.
    Coi,
    /// Ten-year inflation-indexed, yearly capitalisation.
    Edo,
    /// Six-year family bond, inflation-indexed.
    Ros,
    /// Twelve-year family bond, inflation-indexed.
    Rod,
}

impl ProductKind {
    /// All supported families.
    pub const ALL: [ProductKind; 9] = [
        ProductKind::Ots,
        ProductKind::Ror,
        ProductKind::Dor,
        ProductKind::Tos,
        ProductKind::Dos,
        ProductKind::Coi,
        ProductKind::Edo,
        ProductKind::Ros,
        ProductKind::Rod,
    ];

    /// Returns the family of a series such as `EDO0834`.
    #[must_use]
    pub fn from_series(series: &str) -> Option<Self> {
        series.get(..3).and_then(|prefix| prefix.parse().ok())
    }

    /// Returns the three-letter prefix.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            ProductKind::Ots => "OTS",
            ProductKind::Ror => "ROR",
            ProductKind::Dor => "DOR",
            ProductKind::Tos => "TOS",
            ProductKind::Dos => "DOS",
            ProductKind::Coi => "COI",
            ProductKind::Edo => "EDO",
            ProductKind::Ros => "ROS",
            ProductKind::Rod => "ROD",
        }
    }

    /// Returns how interest is credited for this family.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        match self {
            ProductKind::Ots => Frequency::None,
            ProductKind::Ror | ProductKind::Dor => Frequency::Monthly,
            ProductKind::Tos
            | ProductKind::Dos
            | ProductKind::Coi
            | ProductKind::Edo
            | ProductKind::Ros
            | ProductKind::Rod => Frequency::Yearly,
        }
    }

    /// Returns true if one rate applies to every period of the term.
    ///
    /// Issuer tables list only the first-period rate for these families.
    #[must_use]
    pub fn is_fixed_rate(&self) -> bool {
        matches!(self, ProductKind::Tos | ProductKind::Dos)
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

impl FromStr for ProductKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductKind::ALL
            .into_iter()
            .find(|kind| kind.prefix().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unsupported product family '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_series() {
        assert_eq!(ProductKind::from_series("EDO0834"), Some(ProductKind::Edo));
        assert_eq!(ProductKind::from_series("tos1125"), Some(ProductKind::Tos));
        assert_eq!(ProductKind::from_series("XYZ0125"), None);
        assert_eq!(ProductKind::from_series("ED"), None);
    }

    #[test]
    fn test_frequency() {
        assert_eq!(ProductKind::Ror.frequency(), Frequency::Monthly);
        assert_eq!(ProductKind::Tos.frequency(), Frequency::Yearly);
        assert_eq!(ProductKind::Ots.frequency(), Frequency::None);
        assert!(ProductKind::ALL.iter().all(|kind| kind.frequency().is_known()));
    }

    #[test]
    fn test_fixed_rate_families() {
        let fixed: Vec<_> = ProductKind::ALL
            .into_iter()
            .filter(ProductKind::is_fixed_rate)
            .collect();
        assert_eq!(fixed, vec![ProductKind::Tos, ProductKind::Dos]);
    }
}
