//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{BondsArgs, ConfigArgs, HistoricalArgs, PeriodsArgs, ValuationArgs};

/// Obligo - Retail savings bond valuation CLI
#[derive(Parser)]
#[command(name = "obligo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "OBLIGO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Bond master data file (.csv or .json); overrides the configuration
    #[arg(short, long, global = true, env = "OBLIGO_BONDS")]
    pub bonds: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Value a holding on one date
    Valuation(ValuationArgs),

    /// Value a holding on every day of a date range
    Historical(HistoricalArgs),

    /// Show the coupon period schedule of a holding
    Periods(PeriodsArgs),

    /// List loaded bond series
    Bonds(BondsArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
