//! Raw bond records as they appear in issuer tables.
//!
//! Every field is kept as text until finalization so that CSV and JSON inputs share one
//! parsing path. Money columns are plain decimals, rate columns are percents (`6.80%` or
//! `6.80`), and dates are `YYYY-MM-DD` or the issuer's `D/MM/YYYY`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Marker the issuer uses for "no value".
const NOT_PROVIDED: &str = "-";

/// Accepted date layouts.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// One row of a bond file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BondRecord {
    /// Series name, e.g. `EDO0834`.
    #[serde(deserialize_with = "required_text")]
    pub series: String,
    /// ISIN code.
    #[serde(default, deserialize_with = "optional_text")]
    pub isin: Option<String>,
    /// Issue price.
    #[serde(default, deserialize_with = "optional_text")]
    pub face_value: Option<String>,
    /// Price when exchanging a maturing bond.
    #[serde(default, deserialize_with = "optional_text")]
    pub exchange_price: Option<String>,
    /// Margin over the reference index, in percent.
    #[serde(default, deserialize_with = "optional_text")]
    pub margin: Option<String>,
    /// Term in months.
    #[serde(default, deserialize_with = "optional_text")]
    pub months_to_maturity: Option<String>,
    /// Per-period rates in percent, in period order.
    #[serde(default, deserialize_with = "rate_list")]
    pub rates: Vec<String>,
    /// First day of the sale window.
    #[serde(default, deserialize_with = "optional_text")]
    pub sale_start: Option<String>,
    /// Last day of the sale window.
    #[serde(default, deserialize_with = "optional_text")]
    pub sale_end: Option<String>,
}

/// Parses a money amount. `-` and empty mean "not provided".
pub fn parse_price(cell: &str) -> Result<Option<Decimal>, String> {
    let cell = cell.trim();
    if cell.is_empty() || cell == NOT_PROVIDED {
        return Ok(None);
    }
    Decimal::from_str(&cell.replace(',', "."))
        .map(Some)
        .map_err(|e| format!("invalid amount '{cell}': {e}"))
}

/// Parses a percent into a fraction: `6.80%` and `6.80` both give `0.068`.
pub fn parse_percentage(cell: &str) -> Result<Decimal, String> {
    let cell = cell.trim();
    let number = cell.strip_suffix('%').unwrap_or(cell).trim();
    Decimal::from_str(&number.replace(',', "."))
        .map(|percent| percent / Decimal::ONE_HUNDRED)
        .map_err(|e| format!("invalid percentage '{cell}': {e}"))
}

/// Parses a date in any accepted layout.
pub fn parse_date(cell: &str) -> Result<NaiveDate, String> {
    let cell = cell.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cell, format).ok())
        .ok_or_else(|| format!("invalid date '{cell}'"))
}

// =============================================================================
// DESERIALIZERS
// =============================================================================

/// Accepts strings and numbers alike; CSV type inference hands numbers to the visitor.
struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let v = v.trim();
        Ok((!v.is_empty()).then(|| v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Err(E::invalid_type(de::Unexpected::Bool(v), &self))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(TextVisitor)
    }
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    deserializer.deserialize_any(TextVisitor)
}

fn required_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(deserializer.deserialize_any(TextVisitor)?.unwrap_or_default())
}

/// Accepts `"6.80%;6.10%"` or `["6.80%", 6.10]`.
struct RateListVisitor;

impl<'de> Visitor<'de> for RateListVisitor {
    type Value = Vec<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a ';'-separated string or a list of rates")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.split(';')
            .map(str::trim)
            .filter(|rate| !rate.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(vec![v.to_string()])
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(vec![v.to_string()])
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(vec![v.to_string()])
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut rates = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(rate) = seq.next_element::<RateCell>()? {
            rates.extend(rate.0);
        }
        Ok(rates)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(RateListVisitor)
    }
}

struct RateCell(Option<String>);

impl<'de> Deserialize<'de> for RateCell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TextVisitor).map(RateCell)
    }
}

fn rate_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    deserializer.deserialize_any(RateListVisitor)
}
