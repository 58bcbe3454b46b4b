//! # Obligo Core
//!
//! Coupon period calendar and accrual engine for retail savings bonds.
//!
//! Given a bond's fixed terms and the day of month a holder bought it, this crate computes
//! the holder's coupon period boundaries and the bond's accrued price on any later date:
//!
//! - **Calendar**: month arithmetic with month-end clamping, the civil [`CalendarZone`],
//!   and [`PeriodCalendar`] for period boundaries
//! - **Accrual**: [`AccrualEngine`], discrete per-period compounding with linear proration
//!   of the open period
//! - **Types**: [`Bond`], [`Frequency`] and the outcome-tagged [`Valuation`]
//!
//! ## Design Philosophy
//!
//! - **Pure**: no I/O, no logging, no shared state; every call depends only on its inputs
//! - **One zone**: the calendar zone is an explicit value threaded into both components
//! - **Outcomes over errors**: valuing before purchase or past maturity is a result, not a failure
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use obligo_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let bond = Bond::builder()
//!     .series("EDO0834")
//!     .face_value(dec!(100))
//!     .rates(vec![dec!(0.068), dec!(0.061)])
//!     .frequency(Frequency::Yearly)
//!     .months_to_maturity(120)
//!     .sale_window(
//!         NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 8, 31).unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let engine = AccrualEngine::new(CalendarZone::default());
//! let valuation = engine
//!     .calculate(&bond, 12, NaiveDate::from_ymd_opt(2025, 12, 6).unwrap())
//!     .unwrap();
//! assert_eq!(valuation.price(), Some(dec!(108.87)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::unused_self)]

pub mod accrual;
pub mod calendar;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::accrual::AccrualEngine;
    pub use crate::calendar::{CalendarZone, CouponPeriod, PeriodCalendar, YearMonth};
    pub use crate::error::{ObligoError, ObligoResult};
    pub use crate::types::{Bond, BondBuilder, Frequency, Valuation, ValuationOutcome};
}

// Re-export commonly used types at crate root
pub use accrual::AccrualEngine;
pub use calendar::{CalendarZone, PeriodCalendar};
pub use error::{ObligoError, ObligoResult};
pub use types::{Bond, Frequency, Valuation, ValuationOutcome};
