//! Periods command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use obligo_data::{BondRepository, HoldingCode};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_percent, print_header, print_output};

/// Arguments for the periods command.
#[derive(Args, Debug)]
pub struct PeriodsArgs {
    /// Holding code: series followed by the two-digit purchase day (e.g. EDO083412)
    pub code: String,
}

#[derive(Serialize, Tabled)]
struct PeriodRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Days")]
    days: i64,
    #[tabled(rename = "Rate")]
    rate: String,
}

/// Execute the periods command.
pub fn execute(args: PeriodsArgs, context: &Context, format: OutputFormat) -> Result<()> {
    let code = HoldingCode::parse(&args.code)?;
    let repository = context.repository()?;
    let bond = repository.lookup(code.series())?;

    let periods = context
        .engine()
        .calendar()
        .periods(bond, code.purchase_day())?;

    let rows: Vec<PeriodRow> = periods
        .iter()
        .zip(bond.rates())
        .map(|(period, rate)| PeriodRow {
            index: period.index() + 1,
            start: period.start_date().to_string(),
            end: period.end_date().to_string(),
            days: period.length_days(),
            rate: format_percent(*rate),
        })
        .collect();

    if format == OutputFormat::Table {
        print_header(&format!("Coupon Periods: {code}"));
    }
    print_output(&rows, format)?;

    Ok(())
}
