//! Outcome-tagged valuation results.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// The tag of a [`Valuation`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationOutcome {
    /// The valuation date falls within the documented periods.
    Ok,
    /// The valuation date precedes the purchase date; there is no price.
    BeforePurchase,
    /// The valuation date is past the last documented period; the price stops accruing there.
    AfterLastPeriod,
}

impl fmt::Display for ValuationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValuationOutcome::Ok => "ok",
            ValuationOutcome::BeforePurchase => "before purchase",
            ValuationOutcome::AfterLastPeriod => "after last period",
        };
        write!(f, "{name}")
    }
}

/// Result of valuing one holding on one date.
///
/// None of the variants is an error. Callers branch on them explicitly: a range valuation
/// omits `BeforePurchase` days and keeps `AfterLastPeriod` prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Valuation {
    /// Price accrued up to the valuation date, rounded to cents.
    Accrued {
        /// Accrued price.
        price: Decimal,
    },
    /// The valuation date precedes the purchase date.
    BeforePurchase {
        /// The holder's purchase date.
        purchase_date: NaiveDate,
    },
    /// The valuation date is strictly after the end of the last documented period.
    AfterLastPeriod {
        /// Price accrued through the last documented period, rounded to cents.
        price: Decimal,
        /// End date of the last documented period.
        last_period_end: NaiveDate,
    },
}

impl Valuation {
    /// Returns the price, if the outcome carries one.
    #[must_use]
    pub fn price(&self) -> Option<Decimal> {
        match self {
            Valuation::Accrued { price } | Valuation::AfterLastPeriod { price, .. } => Some(*price),
            Valuation::BeforePurchase { .. } => None,
        }
    }

    /// Returns the outcome tag.
    #[must_use]
    pub fn outcome(&self) -> ValuationOutcome {
        match self {
            Valuation::Accrued { .. } => ValuationOutcome::Ok,
            Valuation::BeforePurchase { .. } => ValuationOutcome::BeforePurchase,
            Valuation::AfterLastPeriod { .. } => ValuationOutcome::AfterLastPeriod,
        }
    }

    /// Returns true if the outcome carries a usable price.
    #[must_use]
    pub fn is_priced(&self) -> bool {
        self.price().is_some()
    }
}
