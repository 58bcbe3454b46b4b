//! Config command implementation.
//!
//! Shows the effective configuration and where it came from.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_header, print_output, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show the configuration file in use
    Path,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, context: &Context, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(context, format),
        ConfigCommand::Path => {
            execute_path(context);
            Ok(())
        }
    }
}

fn execute_show(context: &Context, format: OutputFormat) -> Result<()> {
    let config = &context.config;
    let bonds_file = context
        .bonds_file()
        .map_or_else(|| "-".to_string(), |path| path.display().to_string());

    match format {
        OutputFormat::Json => {
            let mut effective = config.clone();
            effective.bonds_file = context.bonds_file().cloned();
            println!("{}", serde_json::to_string_pretty(&effective)?);
        }
        OutputFormat::Minimal => {
            println!("timezone={}", config.timezone);
            println!("bonds_file={bonds_file}");
            println!("currency={}", config.currency);
            println!("max_range_days={}", config.max_range_days);
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let rows = vec![
                KeyValue::new("timezone", &config.timezone),
                KeyValue::new("bonds_file", bonds_file),
                KeyValue::new("currency", &config.currency),
                KeyValue::new("max_range_days", config.max_range_days.to_string()),
            ];
            if format == OutputFormat::Table {
                print_header("Current Configuration");
            }
            print_output(&rows, format)?;
        }
    }

    Ok(())
}

fn execute_path(context: &Context) {
    match &context.config_source {
        Some(path) => println!("{}", path.display()),
        None => println!("(defaults, no configuration file found)"),
    }
}
