//! CLI command implementations.

pub mod bonds;
pub mod config;
pub mod historical;
pub mod periods;
pub mod valuation;

pub use bonds::BondsArgs;
pub use config::ConfigArgs;
pub use historical::HistoricalArgs;
pub use periods::PeriodsArgs;
pub use valuation::ValuationArgs;

use std::path::PathBuf;

use chrono::NaiveDate;
use obligo_core::{AccrualEngine, CalendarZone};
use obligo_data::{load_path, InMemoryRepository};
use tracing::info;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// State shared by all commands: the effective configuration and the calendar zone.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file.
    pub config_source: Option<PathBuf>,
    /// Bond file given on the command line.
    pub bonds_override: Option<PathBuf>,
    zone: CalendarZone,
}

impl Context {
    /// Creates a context, parsing the configured zone once.
    pub fn new(
        config: CliConfig,
        config_source: Option<PathBuf>,
        bonds_override: Option<PathBuf>,
    ) -> CliResult<Self> {
        let zone = config.zone()?;
        Ok(Self {
            config,
            config_source,
            bonds_override,
            zone,
        })
    }

    /// Returns the calendar zone.
    pub fn zone(&self) -> CalendarZone {
        self.zone
    }

    /// Returns an accrual engine in the configured zone.
    pub fn engine(&self) -> AccrualEngine {
        AccrualEngine::new(self.zone)
    }

    /// Returns the bond file in effect, command line first.
    pub fn bonds_file(&self) -> Option<&PathBuf> {
        self.bonds_override
            .as_ref()
            .or(self.config.bonds_file.as_ref())
    }

    /// Loads the bond repository.
    pub fn repository(&self) -> CliResult<InMemoryRepository> {
        let path = self.bonds_file().ok_or(CliError::NoBondsFile)?;
        info!(path = %path.display(), "loading bonds");
        Ok(load_path(path)?)
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| CliError::InvalidDate(s.to_string()))
}
