//! Domain types for savings bond valuation.
//!
//! - [`Bond`]: finalized bond terms and its builder
//! - [`Frequency`]: payment schedule with a months-per-period projection
//! - [`Valuation`]: outcome-tagged price

mod bond;
mod frequency;
mod valuation;

pub use bond::{Bond, BondBuilder};
pub use frequency::{Frequency, MONTHS_PER_YEAR};
pub use valuation::{Valuation, ValuationOutcome};
