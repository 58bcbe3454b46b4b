//! Bonds command implementation.
//!
//! Lists the series in the loaded master data.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use obligo_core::Bond;
use obligo_data::ProductKind;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_header, print_output};

/// Arguments for the bonds command.
#[derive(Args, Debug)]
pub struct BondsArgs {
    /// Only list one product family (e.g. EDO, ROR)
    #[arg(long)]
    pub family: Option<ProductKind>,
}

#[derive(Serialize, Tabled)]
struct BondRow {
    #[tabled(rename = "Series")]
    series: String,
    #[tabled(rename = "ISIN")]
    isin: String,
    #[tabled(rename = "Family")]
    family: String,
    #[tabled(rename = "Frequency")]
    frequency: String,
    #[tabled(rename = "Months")]
    months: u32,
    #[tabled(rename = "Rates")]
    rates: usize,
    #[tabled(rename = "Sale Window")]
    sale_window: String,
}

impl BondRow {
    fn from_bond(bond: &Bond) -> Self {
        Self {
            series: bond.series().to_string(),
            isin: bond.isin().unwrap_or("-").to_string(),
            family: ProductKind::from_series(bond.series())
                .map_or_else(|| "-".to_string(), |kind| kind.to_string()),
            frequency: bond.frequency().to_string(),
            months: bond.months_to_maturity(),
            rates: bond.rates().len(),
            sale_window: format!("{} .. {}", bond.sale_start(), bond.sale_end()),
        }
    }
}

/// Execute the bonds command.
pub fn execute(args: BondsArgs, context: &Context, format: OutputFormat) -> Result<()> {
    let repository = context.repository()?;

    let rows: Vec<BondRow> = repository
        .iter()
        .filter(|bond| {
            args.family.is_none() || ProductKind::from_series(bond.series()) == args.family
        })
        .map(BondRow::from_bond)
        .collect();

    if format == OutputFormat::Table {
        print_header("Bond Series");
    }
    print_output(&rows, format)?;

    Ok(())
}
