//! Obligo CLI - Command-line valuation of retail savings bonds.
//!
//! # Usage
//!
//! ```bash
//! # Value a holding today
//! obligo --bonds bonds.csv valuation EDO083412
//!
//! # Value a holding on a given date
//! obligo --bonds bonds.csv valuation EDO083412 --at 2025-12-06
//!
//! # Daily prices over a range, as JSON
//! obligo -f json historical EDO083412 --from 2025-01-01 --to 2025-12-31
//!
//! # Coupon schedule of a holding
//! obligo periods TOS112501
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;
use config::CliConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.quiet);

    let (config, config_source) = CliConfig::load(cli.config.as_deref())?;
    let context = Context::new(config, config_source, cli.bonds)?;
    let format = cli.format;

    match cli.command {
        Commands::Valuation(args) => commands::valuation::execute(args, &context, format)?,
        Commands::Historical(args) => commands::historical::execute(args, &context, format)?,
        Commands::Periods(args) => commands::periods::execute(args, &context, format)?,
        Commands::Bonds(args) => commands::bonds::execute(args, &context, format)?,
        Commands::Config(args) => commands::config::execute(args, &context, format)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays parseable.
fn init_logging(quiet: bool) {
    let default = if quiet { "error" } else { "warn,obligo=info" };
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
