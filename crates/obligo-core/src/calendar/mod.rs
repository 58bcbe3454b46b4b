//! Calendar arithmetic for coupon periods.
//!
//! This module provides:
//! - [`YearMonth`]: month arithmetic and day clamping
//! - [`CalendarZone`]: the civil zone used for midnights and elapsed days
//! - [`PeriodCalendar`]: coupon period boundaries for a holder's purchase day

mod month;
mod period;
mod zone;

pub use month::{days_in_month, is_leap_year, YearMonth};
pub use period::{CouponPeriod, PeriodCalendar};
pub use zone::{elapsed_days, CalendarZone};
