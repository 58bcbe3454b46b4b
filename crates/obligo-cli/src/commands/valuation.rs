//! Valuation command implementation.
//!
//! Values one holding on one date.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use obligo_core::Valuation;
use obligo_data::{BondRepository, HoldingCode};

use crate::cli::OutputFormat;
use crate::commands::{parse_date, Context};
use crate::error::CliError;
use crate::output::{format_price, print_header, print_output, print_single, print_warning, KeyValue};

/// Arguments for the valuation command.
#[derive(Args, Debug)]
pub struct ValuationArgs {
    /// Holding code: series followed by the two-digit purchase day (e.g. EDO083412)
    pub code: String,

    /// Valuation date (YYYY-MM-DD). Defaults to today in the configured zone.
    #[arg(short, long)]
    pub at: Option<String>,
}

/// Valuation result.
#[derive(Debug, Serialize)]
pub struct ValuationOutput {
    pub name: String,
    pub isin: Option<String>,
    pub valuated_at: NaiveDate,
    pub price: Decimal,
    pub currency: String,
    pub matured_on: Option<NaiveDate>,
}

/// Execute the valuation command.
pub fn execute(args: ValuationArgs, context: &Context, format: OutputFormat) -> Result<()> {
    let code = HoldingCode::parse(&args.code)?;
    let valuated_at = match args.at.as_deref() {
        Some(date) => parse_date(date)?,
        None => context.zone().today(),
    };

    let repository = context.repository()?;
    let bond = repository.lookup(code.series())?;
    let valuation = context
        .engine()
        .calculate(bond, code.purchase_day(), valuated_at)
        .map_err(CliError::from)?;

    let (price, matured_on) = match valuation {
        Valuation::Accrued { price } => (price, None),
        Valuation::AfterLastPeriod {
            price,
            last_period_end,
        } => (price, Some(last_period_end)),
        Valuation::BeforePurchase { purchase_date } => {
            info!(code = %code, %valuated_at, %purchase_date, "valuation date before purchase date");
            return Err(CliError::BeforePurchase {
                code: code.to_string(),
                valuated_at,
                purchase_date,
            }
            .into());
        }
    };
    info!(code = %code, %valuated_at, %price, outcome = %valuation.outcome(), "valuated bond");

    if let Some(matured_on) = matured_on {
        print_warning(&format!(
            "{code} reached its last documented period on {matured_on}; the price no longer accrues"
        ));
    }

    let output = ValuationOutput {
        name: code.to_string(),
        isin: bond.isin().map(str::to_string),
        valuated_at,
        price,
        currency: context.config.currency.clone(),
        matured_on,
    };

    match format {
        OutputFormat::Table => {
            let mut rows = vec![
                KeyValue::new("Holding", &output.name),
                KeyValue::new("ISIN", output.isin.as_deref().unwrap_or("-")),
                KeyValue::new("Valuated At", output.valuated_at.to_string()),
                KeyValue::new(
                    "Price",
                    format!("{} {}", format_price(output.price), output.currency),
                ),
            ];
            if let Some(matured_on) = output.matured_on {
                rows.push(KeyValue::new("Matured On", matured_on.to_string()));
            }
            print_header("Bond Valuation");
            print_output(&rows, format)?;
        }
        OutputFormat::Json | OutputFormat::Csv => print_single(&output, format)?,
        OutputFormat::Minimal => println!("{}", format_price(output.price)),
    }

    Ok(())
}
