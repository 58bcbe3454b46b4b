//! Historical command implementation.
//!
//! Values one holding on every day of an inclusive date range.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;
use tracing::{debug, info};

use obligo_core::calendar::elapsed_days;
use obligo_core::{AccrualEngine, Bond, Valuation};
use obligo_data::{BondRepository, HoldingCode};

use crate::cli::OutputFormat;
use crate::commands::{parse_date, Context};
use crate::error::{CliError, CliResult};
use crate::output::{format_price, print_output};

/// Arguments for the historical command.
#[derive(Args, Debug)]
pub struct HistoricalArgs {
    /// Holding code: series followed by the two-digit purchase day (e.g. EDO083412)
    pub code: String,

    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,

    /// Last day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub to: String,
}

/// Price of a holding on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyValuation {
    pub date: NaiveDate,
    pub price: Decimal,
}

#[derive(Serialize, Tabled)]
struct HistoricalRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Price")]
    price: String,
}

#[derive(Serialize)]
struct HistoricalOutput {
    valuations: BTreeMap<String, Decimal>,
}

/// Values a holding on each day from `from` to `to` inclusive.
///
/// Days before the purchase date are left out. Days past the last documented
/// period are kept at their capped price. Any other error aborts the range.
pub fn value_range(
    engine: &AccrualEngine,
    bond: &Bond,
    purchase_day: u32,
    from: NaiveDate,
    to: NaiveDate,
    max_days: u32,
) -> CliResult<Vec<DailyValuation>> {
    if to < from {
        return Err(CliError::InvalidRange { from, to });
    }

    let zone = engine.zone();
    let days = elapsed_days(&zone.midnight(from)?, &zone.midnight(to)?);
    if days > i64::from(max_days) {
        return Err(CliError::RangeTooLong {
            days,
            max: max_days,
        });
    }

    let mut valuations = Vec::new();
    for date in from.iter_days().take_while(|date| *date <= to) {
        match engine.calculate(bond, purchase_day, date)? {
            Valuation::Accrued { price } | Valuation::AfterLastPeriod { price, .. } => {
                valuations.push(DailyValuation { date, price });
            }
            Valuation::BeforePurchase { .. } => {
                debug!(%date, "skipping day before purchase");
            }
        }
    }
    Ok(valuations)
}

/// Execute the historical command.
pub fn execute(args: HistoricalArgs, context: &Context, format: OutputFormat) -> Result<()> {
    let code = HoldingCode::parse(&args.code)?;
    let from = parse_date(&args.from)?;
    let to = parse_date(&args.to)?;

    let repository = context.repository()?;
    let bond = repository.lookup(code.series())?;
    let valuations = value_range(
        &context.engine(),
        bond,
        code.purchase_day(),
        from,
        to,
        context.config.max_range_days,
    )?;
    info!(code = %code, %from, %to, days = valuations.len(), "valuated range");

    match format {
        OutputFormat::Json => {
            let output = HistoricalOutput {
                valuations: valuations
                    .iter()
                    .map(|v| (v.date.to_string(), v.price))
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            for v in &valuations {
                println!("{} {}", v.date, format_price(v.price));
            }
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<HistoricalRow> = valuations
                .iter()
                .map(|v| HistoricalRow {
                    date: v.date.to_string(),
                    price: format_price(v.price),
                })
                .collect();
            print_output(&rows, format)?;
        }
    }

    Ok(())
}
