//! Bond lookup by series.

use std::collections::{BTreeMap, HashMap};

use obligo_core::Bond;

use crate::error::{DataError, DataResult};

/// Read access to finalized bonds.
pub trait BondRepository {
    /// Returns the bond for a series.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NotFound` if the series is not loaded.
    fn lookup(&self, series: &str) -> DataResult<&Bond>;

    /// Returns all loaded series names, sorted.
    fn series(&self) -> Vec<&str>;

    /// Returns the number of loaded bonds.
    fn len(&self) -> usize;

    /// Returns true if no bonds are loaded.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory bond store keyed by series, with a secondary ISIN index.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    bonds: BTreeMap<String, Bond>,
    by_isin: HashMap<String, String>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a bond, returning the one it replaced.
    pub fn insert(&mut self, bond: Bond) -> Option<Bond> {
        let series = bond.series().to_string();
        let previous = self.bonds.remove(&series);
        if let Some(isin) = previous.as_ref().and_then(Bond::isin) {
            if self.by_isin.get(isin) == Some(&series) {
                self.by_isin.remove(isin);
            }
        }
        if let Some(isin) = bond.isin() {
            self.by_isin.insert(isin.to_string(), series.clone());
        }
        self.bonds.insert(series, bond);
        previous
    }

    /// Returns the bond with this ISIN, if any.
    #[must_use]
    pub fn find_by_isin(&self, isin: &str) -> Option<&Bond> {
        self.by_isin
            .get(isin)
            .and_then(|series| self.bonds.get(series))
    }

    /// Iterates over bonds in series order.
    pub fn iter(&self) -> impl Iterator<Item = &Bond> {
        self.bonds.values()
    }
}

impl FromIterator<Bond> for InMemoryRepository {
    fn from_iter<I: IntoIterator<Item = Bond>>(iter: I) -> Self {
        let mut repository = Self::new();
        for bond in iter {
            repository.insert(bond);
        }
        repository
    }
}

impl BondRepository for InMemoryRepository {
    fn lookup(&self, series: &str) -> DataResult<&Bond> {
        self.bonds
            .get(series)
            .ok_or_else(|| DataError::not_found(series))
    }

    fn series(&self) -> Vec<&str> {
        self.bonds.keys().map(String::as_str).collect()
    }

    fn len(&self) -> usize {
        self.bonds.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use obligo_core::Frequency;
    use rust_decimal_macros::dec;

    fn bond(series: &str, isin: &str) -> Bond {
        Bond::builder()
            .series(series)
            .isin(isin)
            .face_value(dec!(100))
            .rates(vec![dec!(0.0575)])
            .frequency(Frequency::Monthly)
            .months_to_maturity(12)
            .sale_window(
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_lookup() {
        let repo: InMemoryRepository =
            [bond("ROR0126", "PL1"), bond("DOR0127", "PL2")].into_iter().collect();
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.lookup("ROR0126").unwrap().isin(), Some("PL1"));
        assert!(repo.lookup("ROR0226").unwrap_err().is_not_found());
        assert_eq!(repo.series(), vec!["DOR0127", "ROR0126"]);
    }

    #[test]
    fn test_insert_replaces_and_reindexes() {
        let mut repo = InMemoryRepository::new();
        assert!(repo.insert(bond("ROR0126", "PL1")).is_none());
        let previous = repo.insert(bond("ROR0126", "PL9")).unwrap();
        assert_eq!(previous.isin(), Some("PL1"));
        assert_eq!(repo.len(), 1);
        assert!(repo.find_by_isin("PL1").is_none());
        assert_eq!(repo.find_by_isin("PL9").unwrap().series(), "ROR0126");
    }

    #[test]
    fn test_empty() {
        let repo = InMemoryRepository::new();
        assert!(repo.is_empty());
        assert!(repo.iter().next().is_none());
    }
}
