//! Calendar month arithmetic.

use chrono::{Datelike, NaiveDate};

use crate::error::{ObligoError, ObligoResult};

/// A calendar month (year and 1-based month), the anchor unit of the period lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year-month.
    ///
    /// # Errors
    ///
    /// Returns `ObligoError::InvalidDate` if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> ObligoResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(ObligoError::invalid_date(format!(
                "month {month} out of range"
            )));
        }
        Ok(Self { year, month })
    }

    /// Returns the month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Moves forward by a number of whole months.
    #[must_use]
    pub fn add_months(&self, months: u32) -> Self {
        let total = i64::from(self.year) * 12 + i64::from(self.month - 1) + i64::from(months);
        Self {
            year: total.div_euclid(12) as i32,
            month: total.rem_euclid(12) as u32 + 1,
        }
    }

    /// Moves back by a number of whole months.
    #[must_use]
    pub fn sub_months(&self, months: u32) -> Self {
        let total = i64::from(self.year) * 12 + i64::from(self.month - 1) - i64::from(months);
        Self {
            year: total.div_euclid(12) as i32,
            month: total.rem_euclid(12) as u32 + 1,
        }
    }

    /// Returns the number of days in this month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Returns `day` in this month, clamped to the month's last valid day.
    ///
    /// # Errors
    ///
    /// Returns `ObligoError::InvalidDate` if `day` is zero or the year is outside
    /// chrono's supported range.
    pub fn clamped_day(&self, day: u32) -> ObligoResult<NaiveDate> {
        let clamped = day.min(self.days_in_month());
        NaiveDate::from_ymd_opt(self.year, self.month, clamped).ok_or_else(|| {
            ObligoError::invalid_date(format!("{}-{:02}-{clamped:02}", self.year, self.month))
        })
    }
}

/// Returns the number of days in a month of a given year.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        // YearMonth never holds an out-of-range month
        _ => 0,
    }
}

/// Checks if a year is a leap year in the proleptic Gregorian calendar.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
