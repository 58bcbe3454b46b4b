//! Accrued price of a holding.
//!
//! The engine walks a bond's coupon periods in order. A fully elapsed period compounds at its
//! whole-period rate regardless of its day count; the period containing the valuation instant
//! is prorated linearly by elapsed days. The price is rounded to cents once, at the end.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::calendar::{elapsed_days, CalendarZone, PeriodCalendar};
use crate::error::{ObligoError, ObligoResult};
use crate::types::{Bond, Valuation, MONTHS_PER_YEAR};

/// Decimal places of the final price.
const PRICE_DECIMALS: u32 = 2;

/// Computes accrued prices in one calendar zone.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use obligo_core::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let bond = Bond::builder()
///     .series("EDO0935")
///     .face_value(dec!(100))
///     .rates(vec![dec!(0.06)])
///     .frequency(Frequency::Yearly)
///     .months_to_maturity(120)
///     .sale_window(
///         NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
///     )
///     .build()
///     .unwrap();
///
/// let engine = AccrualEngine::new(CalendarZone::default());
/// let valuation = engine
///     .calculate(&bond, 2, NaiveDate::from_ymd_opt(2025, 12, 6).unwrap())
///     .unwrap();
/// assert_eq!(valuation.price(), Some(dec!(101.56)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccrualEngine {
    calendar: PeriodCalendar,
}

impl AccrualEngine {
    /// Creates an engine whose period calendar uses the same zone.
    #[must_use]
    pub fn new(zone: CalendarZone) -> Self {
        Self {
            calendar: PeriodCalendar::new(zone),
        }
    }

    /// Returns the period calendar the engine walks.
    #[must_use]
    pub fn calendar(&self) -> &PeriodCalendar {
        &self.calendar
    }

    /// Returns the calendar zone.
    #[must_use]
    pub fn zone(&self) -> CalendarZone {
        self.calendar.zone()
    }

    /// Values a holding on a civil date, taken at local midnight.
    ///
    /// # Errors
    ///
    /// Returns `ObligoError::NonexistentLocalTime` if midnight of `date` does not exist in the
    /// zone, and propagates the errors of [`AccrualEngine::calculate_at`].
    pub fn calculate(
        &self,
        bond: &Bond,
        purchase_day: u32,
        date: NaiveDate,
    ) -> ObligoResult<Valuation> {
        let at = self.zone().midnight(date)?;
        self.calculate_at(bond, purchase_day, at)
    }

    /// Values a holding at an instant.
    ///
    /// Returns [`Valuation::BeforePurchase`] if `at` precedes the purchase date and
    /// [`Valuation::AfterLastPeriod`] if it is strictly after the end of the last period with
    /// a documented rate. An instant equal to a period's end counts that period as fully
    /// elapsed.
    ///
    /// # Errors
    ///
    /// - `ObligoError::UnknownFrequency` if the bond's frequency is `Unknown`
    /// - `ObligoError::InvalidPurchaseDay` if the day does not exist in the sale-start month
    /// - `ObligoError::EmptyPeriod` if the open period is zero days long
    /// - `ObligoError::ArithmeticOverflow` if the compounded price leaves the decimal range
    pub fn calculate_at(
        &self,
        bond: &Bond,
        purchase_day: u32,
        at: DateTime<Tz>,
    ) -> ObligoResult<Valuation> {
        self.calendar.period_count(bond)?;
        let purchase = self.calendar.purchase_date(bond, purchase_day)?;
        let at = at.with_timezone(&self.zone().tz());
        if at < purchase {
            return Ok(Valuation::BeforePurchase {
                purchase_date: purchase.date_naive(),
            });
        }

        let months = self.months_per_period(bond)?;
        let rates = bond.rates();
        let mut price = bond.face_value();
        let mut matured_at = None;

        for (index, rate) in rates.iter().enumerate() {
            let period = self.calendar.period(bond, index, purchase_day)?;
            if at < period.start() {
                break;
            }

            let accrued = if at >= period.end() {
                period_accrual(*rate, months, 1, 1)
            } else {
                let length = period.length_days();
                if length == 0 {
                    return Err(ObligoError::EmptyPeriod { index });
                }
                period_accrual(*rate, months, elapsed_days(&period.start(), &at), length)
            };
            price = accrued
                .and_then(|accrued| Decimal::ONE.checked_add(accrued))
                .and_then(|growth| price.checked_mul(growth))
                .ok_or(ObligoError::ArithmeticOverflow { index })?;

            if index + 1 == rates.len() && at > period.end() {
                matured_at = Some(period.end_date());
            }
        }

        let price =
            price.round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        Ok(match matured_at {
            Some(last_period_end) => Valuation::AfterLastPeriod {
                price,
                last_period_end,
            },
            None => Valuation::Accrued { price },
        })
    }

    fn months_per_period(&self, bond: &Bond) -> ObligoResult<u32> {
        bond.months_per_period()
            .ok_or_else(|| ObligoError::UnknownFrequency {
                series: bond.series().to_string(),
            })
    }
}

/// Interest credited over `held` of `length` days of one period:
/// `rate × months / 12 × held / length`, with a single division.
fn period_accrual(rate: Decimal, months: u32, held: i64, length: i64) -> Option<Decimal> {
    let numerator = rate
        .checked_mul(Decimal::from(months))?
        .checked_mul(Decimal::from(held))?;
    let denominator = Decimal::from(MONTHS_PER_YEAR).checked_mul(Decimal::from(length))?;
    numerator.checked_div(denominator)
}
