//! Retail savings bond terms.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::Frequency;
use crate::calendar::YearMonth;
use crate::error::{ObligoError, ObligoResult};

/// A retail savings bond series, as finalized by the data loader.
///
/// The rate sequence holds one annual rate per coupon period, in period order. For fixed-rate
/// products it is already replicated to the full term; for variable-rate products it holds
/// the rates published so far. The core never extends it.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use obligo_core::types::{Bond, Frequency};
/// use rust_decimal_macros::dec;
///
/// let bond = Bond::builder()
///     .series("EDO0834")
///     .face_value(dec!(100))
///     .rates(vec![dec!(0.068), dec!(0.061)])
///     .frequency(Frequency::Yearly)
///     .months_to_maturity(120)
///     .sale_window(
///         NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 8, 31).unwrap(),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(bond.period_count(), Some(10));
/// ```
///
/// Bonds are only constructed through [`BondBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bond {
    series: String,
    isin: Option<String>,
    face_value: Decimal,
    exchange_price: Option<Decimal>,
    margin: Decimal,
    rates: Vec<Decimal>,
    frequency: Frequency,
    months_to_maturity: u32,
    sale_start: NaiveDate,
    sale_end: NaiveDate,
}

impl Bond {
    /// Creates a builder for a bond.
    #[must_use]
    pub fn builder() -> BondBuilder {
        BondBuilder::default()
    }

    /// Returns the series name (e.g. `EDO0834`).
    #[must_use]
    pub fn series(&self) -> &str {
        &self.series
    }

    /// Returns the ISIN, if known.
    #[must_use]
    pub fn isin(&self) -> Option<&str> {
        self.isin.as_deref()
    }

    /// Returns the face value paid at purchase.
    #[must_use]
    pub fn face_value(&self) -> Decimal {
        self.face_value
    }

    /// Returns the price for exchanging a maturing bond into this series, if offered.
    #[must_use]
    pub fn exchange_price(&self) -> Option<Decimal> {
        self.exchange_price
    }

    /// Returns the margin over the reference index for variable-rate products.
    #[must_use]
    pub fn margin(&self) -> Decimal {
        self.margin
    }

    /// Returns the per-period annual rates, one per coupon period.
    #[must_use]
    pub fn rates(&self) -> &[Decimal] {
        &self.rates
    }

    /// Returns the payment frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the total term in months.
    #[must_use]
    pub fn months_to_maturity(&self) -> u32 {
        self.months_to_maturity
    }

    /// Returns the first day of the sale window.
    #[must_use]
    pub fn sale_start(&self) -> NaiveDate {
        self.sale_start
    }

    /// Returns the last day of the sale window.
    #[must_use]
    pub fn sale_end(&self) -> NaiveDate {
        self.sale_end
    }

    /// Returns the calendar month the sale window falls in.
    #[must_use]
    pub fn sale_month(&self) -> YearMonth {
        YearMonth::of(self.sale_start)
    }

    /// Returns the number of months in one coupon period, if the frequency is known.
    #[must_use]
    pub fn months_per_period(&self) -> Option<u32> {
        self.frequency.months_per_period(self.months_to_maturity)
    }

    /// Returns the number of reachable coupon periods, if the frequency is known.
    #[must_use]
    pub fn period_count(&self) -> Option<u32> {
        self.frequency.period_count(self.months_to_maturity)
    }
}

/// Builder for [`Bond`].
#[derive(Debug, Clone, Default)]
pub struct BondBuilder {
    series: Option<String>,
    isin: Option<String>,
    face_value: Option<Decimal>,
    exchange_price: Option<Decimal>,
    margin: Option<Decimal>,
    rates: Vec<Decimal>,
    frequency: Option<Frequency>,
    months_to_maturity: Option<u32>,
    sale_start: Option<NaiveDate>,
    sale_end: Option<NaiveDate>,
}

impl BondBuilder {
    /// Sets the series name.
    #[must_use]
    pub fn series(mut self, series: impl Into<String>) -> Self {
        self.series = Some(series.into());
        self
    }

    /// Sets the ISIN.
    #[must_use]
    pub fn isin(mut self, isin: impl Into<String>) -> Self {
        self.isin = Some(isin.into());
        self
    }

    /// Sets the face value.
    #[must_use]
    pub fn face_value(mut self, face_value: Decimal) -> Self {
        self.face_value = Some(face_value);
        self
    }

    /// Sets the exchange price.
    #[must_use]
    pub fn exchange_price(mut self, price: Decimal) -> Self {
        self.exchange_price = Some(price);
        self
    }

    /// Sets the margin (as a decimal, 0.02 for 2%).
    #[must_use]
    pub fn margin(mut self, margin: Decimal) -> Self {
        self.margin = Some(margin);
        self
    }

    /// Sets the per-period annual rates (as decimals, 0.068 for 6.80%).
    #[must_use]
    pub fn rates(mut self, rates: Vec<Decimal>) -> Self {
        self.rates = rates;
        self
    }

    /// Sets the payment frequency.
    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Sets the term in months.
    #[must_use]
    pub fn months_to_maturity(mut self, months: u32) -> Self {
        self.months_to_maturity = Some(months);
        self
    }

    /// Sets the sale window.
    #[must_use]
    pub fn sale_window(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.sale_start = Some(start);
        self.sale_end = Some(end);
        self
    }

    /// Builds the bond, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns `ObligoError::MissingField` for absent required fields and
    /// `ObligoError::InvalidBondSpec` when the terms are inconsistent.
    pub fn build(self) -> ObligoResult<Bond> {
        let series = self
            .series
            .ok_or_else(|| ObligoError::missing_field("series"))?;
        let face_value = self
            .face_value
            .ok_or_else(|| ObligoError::missing_field("face_value"))?;
        let frequency = self
            .frequency
            .ok_or_else(|| ObligoError::missing_field("frequency"))?;
        let months_to_maturity = self
            .months_to_maturity
            .ok_or_else(|| ObligoError::missing_field("months_to_maturity"))?;
        let sale_start = self
            .sale_start
            .ok_or_else(|| ObligoError::missing_field("sale_start"))?;
        let sale_end = self
            .sale_end
            .ok_or_else(|| ObligoError::missing_field("sale_end"))?;

        if face_value <= Decimal::ZERO {
            return Err(ObligoError::invalid_spec("face_value must be positive"));
        }
        if months_to_maturity == 0 {
            return Err(ObligoError::invalid_spec("months_to_maturity must be positive"));
        }
        if self.rates.is_empty() {
            return Err(ObligoError::invalid_spec("at least one rate is required"));
        }
        if self.rates.iter().any(|rate| *rate < Decimal::ZERO) {
            return Err(ObligoError::invalid_spec("rates cannot be negative"));
        }
        if sale_end < sale_start {
            return Err(ObligoError::invalid_spec("sale_end is before sale_start"));
        }
        if YearMonth::of(sale_start) != YearMonth::of(sale_end) {
            return Err(ObligoError::invalid_spec(format!(
                "sale window {sale_start}..{sale_end} spans more than one month"
            )));
        }
        if let Some(period_count) = frequency.period_count(months_to_maturity) {
            if self.rates.len() > period_count as usize {
                return Err(ObligoError::invalid_spec(format!(
                    "{} rates supplied for {period_count} periods",
                    self.rates.len()
                )));
            }
        }

        Ok(Bond {
            series,
            isin: self.isin,
            face_value,
            exchange_price: self.exchange_price,
            margin: self.margin.unwrap_or(Decimal::ZERO),
            rates: self.rates,
            frequency,
            months_to_maturity,
            sale_start,
            sale_end,
        })
    }
}
