//! # Obligo Data
//!
//! Bond master data for the Obligo valuation engine.
//!
//! This crate turns issuer tables exported as CSV or JSON into finalized
//! [`Bond`](obligo_core::Bond) records:
//! - CSV and JSON record parsing with percent, price and date normalization
//! - Load-time finalization per product family
//! - An in-memory repository keyed by series
//! - Holding codes (`<SERIES><DD>`)

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod holding;
mod loader;
mod product;
mod record;
mod repository;

pub use error::{DataError, DataResult};
pub use holding::HoldingCode;
pub use loader::{
    finalize_record, load_csv, load_json, load_path, read_csv, read_json, sale_start_from_series,
};
pub use product::ProductKind;
pub use record::{parse_date, parse_percentage, parse_price, BondRecord};
pub use repository::{BondRepository, InMemoryRepository};
