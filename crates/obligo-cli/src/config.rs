//! CLI configuration.
//!
//! Looked up in order: `--config`, `./obligo.toml`, `<config dir>/obligo/config.toml`.
//! Missing keys fall back to defaults, and so does a missing file.

use std::path::{Path, PathBuf};

use obligo_core::CalendarZone;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// File name looked up in the working directory.
const LOCAL_CONFIG: &str = "obligo.toml";

/// Configuration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// IANA zone used for all calendar math
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Bond master data file
    pub bonds_file: Option<PathBuf>,

    /// Currency label for prices
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Longest accepted historical range, in days
    #[serde(default = "default_max_range_days")]
    pub max_range_days: u32,
}

fn default_timezone() -> String {
    "Europe/Warsaw".to_string()
}

fn default_currency() -> String {
    "PLN".to_string()
}

fn default_max_range_days() -> u32 {
    366
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            bonds_file: None,
            currency: default_currency(),
            max_range_days: default_max_range_days(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from a TOML file.
    ///
    /// A relative `bonds_file` is resolved against the file's directory.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        let mut config: Self = toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;

        if let (Some(bonds), Some(dir)) = (config.bonds_file.as_ref(), path.parent()) {
            if bonds.is_relative() {
                config.bonds_file = Some(dir.join(bonds));
            }
        }
        Ok(config)
    }

    /// Loads the first configuration found, returning it with its source path.
    ///
    /// An explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> CliResult<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }

        for candidate in search_paths() {
            if candidate.is_file() {
                debug!(path = %candidate.display(), "loading configuration");
                return Ok((Self::from_file(&candidate)?, Some(candidate)));
            }
        }
        debug!("using default configuration");
        Ok((Self::default(), None))
    }

    /// Parses the configured calendar zone.
    pub fn zone(&self) -> CliResult<CalendarZone> {
        self.timezone
            .parse()
            .map_err(|e| CliError::Config(format!("{e}")))
    }
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("obligo").join("config.toml"));
    }
    paths
}
