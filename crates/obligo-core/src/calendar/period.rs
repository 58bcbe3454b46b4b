//! Coupon period boundaries.
//!
//! A holder's period lattice is anchored on the sale-start month and the day of month they
//! bought the bond. Period `i` runs from month `i * m` to month `(i + 1) * m` after the anchor,
//! where `m` is the bond's months-per-period. Each boundary lands on the purchase day, clamped
//! independently to the last day of its own month:
//!
//! | purchase day | anchor    | period 0                     |
//! |--------------|-----------|------------------------------|
//! | 1            | 2024-08   | `[2024-08-01, 2024-09-01)`   |
//! | 31           | 2024-08   | `[2024-08-31, 2024-09-30)`   |
//! | 29 (yearly)  | 2024-02   | `[2024-02-29, 2025-02-28)`   |
//!
//! Because clamping is per boundary, a period's length in days is not a fixed multiple of its
//! nominal month count.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;

use super::month::YearMonth;
use super::zone::{elapsed_days, CalendarZone};
use crate::error::{ObligoError, ObligoResult};
use crate::types::Bond;

/// The half-open interval `[start, end)` of one coupon period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CouponPeriod {
    index: usize,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl CouponPeriod {
    /// Returns the zero-based period index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the first instant of the period (local midnight).
    #[must_use]
    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    /// Returns the first instant after the period (local midnight).
    #[must_use]
    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    /// Returns the civil date the period starts on.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Returns the civil date the period ends on (exclusive).
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Returns true if `instant` lies in `[start, end)`.
    #[must_use]
    pub fn contains(&self, instant: &DateTime<Tz>) -> bool {
        self.start <= *instant && *instant < self.end
    }

    /// Returns the period length in whole days.
    #[must_use]
    pub fn length_days(&self) -> i64 {
        elapsed_days(&self.start, &self.end)
    }
}

/// Computes coupon period boundaries in one calendar zone.
///
/// Stateless apart from the zone; every call is a pure function of its inputs.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use obligo_core::calendar::{CalendarZone, PeriodCalendar};
/// use obligo_core::types::{Bond, Frequency};
/// use rust_decimal_macros::dec;
///
/// let bond = Bond::builder()
///     .series("ROR0825")
///     .face_value(dec!(100))
///     .rates(vec![dec!(0.0575)])
///     .frequency(Frequency::Monthly)
///     .months_to_maturity(12)
///     .sale_window(
///         NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 8, 31).unwrap(),
///     )
///     .build()
///     .unwrap();
///
/// let calendar = PeriodCalendar::new(CalendarZone::default());
/// let period = calendar.period(&bond, 0, 31).unwrap();
/// assert_eq!(period.start_date(), NaiveDate::from_ymd_opt(2024, 8, 31).unwrap());
/// assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2024, 9, 30).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodCalendar {
    zone: CalendarZone,
}

impl PeriodCalendar {
    /// Creates a period calendar for a zone.
    #[must_use]
    pub fn new(zone: CalendarZone) -> Self {
        Self { zone }
    }

    /// Returns the calendar zone.
    #[must_use]
    pub fn zone(&self) -> CalendarZone {
        self.zone
    }

    /// Returns the number of reachable coupon periods.
    ///
    /// # Errors
    ///
    /// Returns `ObligoError::UnknownFrequency` for a bond whose frequency is `Unknown`.
    pub fn period_count(&self, bond: &Bond) -> ObligoResult<u32> {
        if !bond.frequency().is_known() {
            return Err(ObligoError::UnknownFrequency {
                series: bond.series().to_string(),
            });
        }
        bond.period_count()
            .ok_or_else(|| ObligoError::invalid_spec("term is shorter than one coupon period"))
    }

    /// Checks that `purchase_day` exists in the bond's sale-start month.
    ///
    /// # Errors
    ///
    /// Returns `ObligoError::InvalidPurchaseDay` for day zero or a day past the month's end.
    pub fn validate_purchase_day(&self, bond: &Bond, purchase_day: u32) -> ObligoResult<()> {
        let max_day = bond.sale_month().days_in_month();
        if purchase_day < 1 || purchase_day > max_day {
            return Err(ObligoError::InvalidPurchaseDay {
                day: purchase_day,
                max_day,
            });
        }
        Ok(())
    }

    /// Returns the holder's purchase instant: `purchase_day` of the sale-start month at
    /// local midnight.
    ///
    /// # Errors
    ///
    /// Returns `ObligoError::InvalidPurchaseDay` if the day is out of range for the month.
    pub fn purchase_date(&self, bond: &Bond, purchase_day: u32) -> ObligoResult<DateTime<Tz>> {
        self.validate_purchase_day(bond, purchase_day)?;
        self.boundary(bond.sale_month(), 0, purchase_day)
    }

    /// Returns the `index`-th coupon period for a holder who bought on `purchase_day`.
    ///
    /// # Errors
    ///
    /// - `ObligoError::UnknownFrequency` if the bond's frequency is `Unknown`
    /// - `ObligoError::InvalidPeriodIndex` if `index` is not below the period count
    /// - `ObligoError::InvalidPurchaseDay` if the day does not exist in the sale-start month
    pub fn period(
        &self,
        bond: &Bond,
        index: usize,
        purchase_day: u32,
    ) -> ObligoResult<CouponPeriod> {
        let period_count = self.period_count(bond)?;
        let invalid_index = || ObligoError::InvalidPeriodIndex {
            index,
            period_count,
        };
        let position = u32::try_from(index).map_err(|_| invalid_index())?;
        if position >= period_count {
            return Err(invalid_index());
        }
        self.validate_purchase_day(bond, purchase_day)?;

        // Known frequency and a non-empty period range imply a months-per-period value.
        let months = bond.months_per_period().ok_or_else(invalid_index)?;
        let anchor = bond.sale_month();

        Ok(CouponPeriod {
            index,
            start: self.boundary(anchor, position * months, purchase_day)?,
            end: self.boundary(anchor, (position + 1) * months, purchase_day)?,
        })
    }

    /// Returns every period the bond has a documented rate for, in order.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`PeriodCalendar::period`].
    pub fn periods(&self, bond: &Bond, purchase_day: u32) -> ObligoResult<Vec<CouponPeriod>> {
        let period_count = self.period_count(bond)? as usize;
        (0..bond.rates().len().min(period_count))
            .map(|index| self.period(bond, index, purchase_day))
            .collect()
    }

    fn boundary(
        &self,
        anchor: YearMonth,
        months_after: u32,
        purchase_day: u32,
    ) -> ObligoResult<DateTime<Tz>> {
        let date = anchor.add_months(months_after).clamped_day(purchase_day)?;
        self.zone.midnight(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Frequency;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bond(sale: (i32, u32), frequency: Frequency, months: u32) -> Bond {
        let start = date(sale.0, sale.1, 1);
        let end = YearMonth::of(start).clamped_day(31).unwrap();
        Bond::builder()
            .series("TEST")
            .face_value(dec!(100))
            .rates(vec![dec!(0.05)])
            .frequency(frequency)
            .months_to_maturity(months)
            .sale_window(start, end)
            .build()
            .unwrap()
    }

    struct Case {
        name: &'static str,
        sale: (i32, u32),
        frequency: Frequency,
        months: u32,
        index: usize,
        purchase_day: u32,
        expected: Option<(NaiveDate, NaiveDate)>,
    }

    #[test]
    fn test_period_table() {
        let cases = [
            Case {
                name: "first period, bought on the first day",
                sale: (2024, 8),
                frequency: Frequency::Monthly,
                months: 12,
                index: 0,
                purchase_day: 1,
                expected: Some((date(2024, 8, 1), date(2024, 9, 1))),
            },
            Case {
                name: "first period, bought mid-month",
                sale: (2024, 8),
                frequency: Frequency::Monthly,
                months: 12,
                index: 0,
                purchase_day: 15,
                expected: Some((date(2024, 8, 15), date(2024, 9, 15))),
            },
            Case {
                name: "bought on the 31st, end clamps to September 30",
                sale: (2024, 8),
                frequency: Frequency::Monthly,
                months: 12,
                index: 0,
                purchase_day: 31,
                expected: Some((date(2024, 8, 31), date(2024, 9, 30))),
            },
            Case {
                name: "second period recovers the 31st in October",
                sale: (2024, 8),
                frequency: Frequency::Monthly,
                months: 12,
                index: 1,
                purchase_day: 31,
                expected: Some((date(2024, 9, 30), date(2024, 10, 31))),
            },
            Case {
                name: "January 31st clamps to leap February 29",
                sale: (2024, 1),
                frequency: Frequency::Monthly,
                months: 12,
                index: 0,
                purchase_day: 31,
                expected: Some((date(2024, 1, 31), date(2024, 2, 29))),
            },
            Case {
                name: "January 31st clamps to common February 28",
                sale: (2025, 1),
                frequency: Frequency::Monthly,
                months: 12,
                index: 0,
                purchase_day: 31,
                expected: Some((date(2025, 1, 31), date(2025, 2, 28))),
            },
            Case {
                name: "last monthly period crosses the year end",
                sale: (2024, 8),
                frequency: Frequency::Monthly,
                months: 12,
                index: 11,
                purchase_day: 31,
                expected: Some((date(2025, 7, 31), date(2025, 8, 31))),
            },
            Case {
                name: "yearly, leap day purchase clamps to February 28",
                sale: (2024, 2),
                frequency: Frequency::Yearly,
                months: 120,
                index: 0,
                purchase_day: 29,
                expected: Some((date(2024, 2, 29), date(2025, 2, 28))),
            },
            Case {
                name: "yearly, leap day comes back four years later",
                sale: (2024, 2),
                frequency: Frequency::Yearly,
                months: 120,
                index: 3,
                purchase_day: 29,
                expected: Some((date(2027, 2, 28), date(2028, 2, 29))),
            },
            Case {
                name: "yearly, second period",
                sale: (2024, 1),
                frequency: Frequency::Yearly,
                months: 120,
                index: 1,
                purchase_day: 31,
                expected: Some((date(2025, 1, 31), date(2026, 1, 31))),
            },
            Case {
                name: "bullet period spans the whole term",
                sale: (2017, 10),
                frequency: Frequency::None,
                months: 3,
                index: 0,
                purchase_day: 31,
                expected: Some((date(2017, 10, 31), date(2018, 1, 31))),
            },
            Case {
                name: "invalid period index",
                sale: (2025, 1),
                frequency: Frequency::Monthly,
                months: 12,
                index: 12,
                purchase_day: 31,
                expected: None,
            },
            Case {
                name: "invalid purchase day, February 30th",
                sale: (2024, 2),
                frequency: Frequency::Yearly,
                months: 120,
                index: 1,
                purchase_day: 30,
                expected: None,
            },
            Case {
                name: "invalid purchase day, zero",
                sale: (2024, 2),
                frequency: Frequency::Yearly,
                months: 120,
                index: 1,
                purchase_day: 0,
                expected: None,
            },
        ];

        let calendar = PeriodCalendar::default();
        for case in cases {
            let bond = bond(case.sale, case.frequency, case.months);
            let result = calendar.period(&bond, case.index, case.purchase_day);
            match case.expected {
                Some((start, end)) => {
                    let period = result.unwrap_or_else(|e| panic!("{}: {e}", case.name));
                    assert_eq!(period.start_date(), start, "{}", case.name);
                    assert_eq!(period.end_date(), end, "{}", case.name);
                    assert_eq!(period.index(), case.index, "{}", case.name);
                }
                None => assert!(result.is_err(), "{}: expected an error", case.name),
            }
        }
    }

    #[test]
    fn test_error_kinds() {
        let calendar = PeriodCalendar::default();
        let monthly = bond((2025, 1), Frequency::Monthly, 12);

        assert_eq!(
            calendar.period(&monthly, 12, 1).unwrap_err(),
            ObligoError::InvalidPeriodIndex {
                index: 12,
                period_count: 12
            }
        );
        assert_eq!(
            calendar.period(&monthly, 0, 32).unwrap_err(),
            ObligoError::InvalidPurchaseDay {
                day: 32,
                max_day: 31
            }
        );

        let unknown = bond((2025, 1), Frequency::Unknown, 12);
        assert!(matches!(
            calendar.period(&unknown, 0, 1),
            Err(ObligoError::UnknownFrequency { .. })
        ));
        assert!(matches!(
            calendar.period_count(&unknown),
            Err(ObligoError::UnknownFrequency { .. })
        ));
    }

    #[test]
    fn test_remainder_months_are_unreachable() {
        let calendar = PeriodCalendar::default();
        let bond = bond((2024, 1), Frequency::Yearly, 30);
        assert_eq!(calendar.period_count(&bond).unwrap(), 2);
        assert!(calendar.period(&bond, 1, 1).is_ok());
        assert!(calendar.period(&bond, 2, 1).is_err());
    }

    #[test]
    fn test_boundaries_are_local_midnight() {
        let calendar = PeriodCalendar::default();
        let bond = bond((2024, 8), Frequency::Monthly, 12);
        let period = calendar.period(&bond, 2, 1).unwrap();
        assert_eq!(period.start().to_rfc3339(), "2024-10-01T00:00:00+02:00");
        assert_eq!(period.end().to_rfc3339(), "2024-11-01T00:00:00+01:00");
        // 31 civil days, 745 hours across the October switch
        assert_eq!(period.length_days(), 31);
    }

    #[test]
    fn test_contains_is_half_open() {
        let calendar = PeriodCalendar::default();
        let bond = bond((2024, 8), Frequency::Monthly, 12);
        let period = calendar.period(&bond, 0, 1).unwrap();
        assert!(period.contains(&period.start()));
        assert!(!period.contains(&period.end()));
    }

    #[test]
    fn test_periods_follow_documented_rates() {
        let calendar = PeriodCalendar::default();
        let bond = Bond::builder()
            .series("EDO0834")
            .face_value(dec!(100))
            .rates(vec![dec!(0.068), dec!(0.061)])
            .frequency(Frequency::Yearly)
            .months_to_maturity(120)
            .sale_window(date(2024, 8, 1), date(2024, 8, 31))
            .build()
            .unwrap();
        let periods = calendar.periods(&bond, 12).unwrap();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[1].start_date(), date(2025, 8, 12));
        assert_eq!(periods[1].end_date(), date(2026, 8, 12));
    }

    #[test]
    fn test_purchase_date() {
        let calendar = PeriodCalendar::default();
        let bond = bond((2024, 2), Frequency::Yearly, 120);
        assert_eq!(
            calendar.purchase_date(&bond, 29).unwrap().date_naive(),
            date(2024, 2, 29)
        );
        assert!(calendar.purchase_date(&bond, 30).is_err());
    }
}
