//! The civil calendar zone used for all boundary and elapsed-time math.

use chrono::{DateTime, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ObligoError, ObligoResult};

/// Seconds in a nominal 24-hour day.
const SECONDS_PER_DAY: i64 = 86_400;

/// A civil calendar zone.
///
/// "First day of month", "last day of month" and "hours between two instants" are all
/// computed in one zone. The same value is handed to [`PeriodCalendar`](super::PeriodCalendar)
/// and [`AccrualEngine`](crate::accrual::AccrualEngine); nothing reads a process-wide zone.
///
/// # Example
///
/// ```rust
/// use obligo_core::calendar::CalendarZone;
///
/// let zone: CalendarZone = "Europe/Warsaw".parse().unwrap();
/// assert_eq!(zone, CalendarZone::default());
/// assert_eq!(zone.to_string(), "Europe/Warsaw");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarZone(Tz);

impl CalendarZone {
    /// Creates a calendar zone from a `chrono_tz` zone.
    #[must_use]
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Returns the underlying `chrono_tz` zone.
    #[must_use]
    pub fn tz(&self) -> Tz {
        self.0
    }

    /// Returns the IANA name of the zone.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Returns local midnight of `date` in this zone.
    ///
    /// If midnight is ambiguous (clocks fall back over it), the earlier instant is used.
    ///
    /// # Errors
    ///
    /// Returns `ObligoError::NonexistentLocalTime` if clocks skip over midnight on `date`.
    pub fn midnight(&self, date: NaiveDate) -> ObligoResult<DateTime<Tz>> {
        let nonexistent = || ObligoError::NonexistentLocalTime {
            date: date.to_string(),
            zone: self.name().to_string(),
        };
        let local = date.and_hms_opt(0, 0, 0).ok_or_else(nonexistent)?;
        match self.0.from_local_datetime(&local) {
            LocalResult::Single(instant) => Ok(instant),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest),
            LocalResult::None => Err(nonexistent()),
        }
    }

    /// Returns today's civil date in this zone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.0).date_naive()
    }
}

impl Default for CalendarZone {
    fn default() -> Self {
        Self(chrono_tz::Europe::Warsaw)
    }
}

impl fmt::Display for CalendarZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CalendarZone {
    type Err = ObligoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| ObligoError::InvalidZone { name: s.to_string() })
    }
}

impl From<Tz> for CalendarZone {
    fn from(tz: Tz) -> Self {
        Self(tz)
    }
}

/// Whole days elapsed from `start` to `end`.
///
/// The raw duration is rounded to the nearest whole day (halves away from zero) before it is
/// used, so a span crossing a daylight-saving switch (23 or 25 hours for one civil day) still
/// counts as exactly one day per civil day.
#[must_use]
pub fn elapsed_days(start: &DateTime<Tz>, end: &DateTime<Tz>) -> i64 {
    let seconds = end.signed_duration_since(*start).num_seconds();
    let half_day = SECONDS_PER_DAY / 2;
    if seconds >= 0 {
        (seconds + half_day) / SECONDS_PER_DAY
    } else {
        -((half_day - seconds) / SECONDS_PER_DAY)
    }
}
