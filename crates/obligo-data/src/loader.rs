//! File-based bond loading and load-time finalization.
//!
//! A row becomes a [`Bond`] only after finalization fills in what the issuer tables leave
//! implicit: the frequency of its product family, a sale window derived from the series
//! name, and the full rate sequence of fixed-rate families. Rows that cannot be finalized are
//! logged and skipped; the load as a whole fails only on I/O or malformed files.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use obligo_core::calendar::YearMonth;
use obligo_core::Bond;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::{DataError, DataResult};
use crate::product::ProductKind;
use crate::record::{parse_date, parse_percentage, parse_price, BondRecord};
use crate::repository::{BondRepository, InMemoryRepository};

/// Loads bonds from a `.csv` or `.json` file.
pub fn load_path(path: impl AsRef<Path>) -> DataResult<InMemoryRepository> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => load_csv(path),
        Some("json") => load_json(path),
        _ => Err(DataError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// Loads bonds from a CSV file with a header row.
pub fn load_csv(path: impl AsRef<Path>) -> DataResult<InMemoryRepository> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading bond CSV");
    let file = fs::File::open(path)?;
    read_csv(file)
}

/// Reads bonds from CSV data with a header row.
pub fn read_csv<R: io::Read>(reader: R) -> DataResult<InMemoryRepository> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: BondRecord = result?;
        records.push(record);
    }
    Ok(finalize_all(records))
}

/// Loads bonds from a JSON file holding an array of records.
pub fn load_json(path: impl AsRef<Path>) -> DataResult<InMemoryRepository> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading bond JSON");
    let content = fs::read_to_string(path)?;
    read_json(&content)
}

/// Reads bonds from a JSON array of records.
pub fn read_json(content: &str) -> DataResult<InMemoryRepository> {
    let records: Vec<BondRecord> = serde_json::from_str(content)?;
    Ok(finalize_all(records))
}

fn finalize_all(records: Vec<BondRecord>) -> InMemoryRepository {
    let total = records.len();
    let mut repository = InMemoryRepository::new();

    for (index, record) in records.iter().enumerate() {
        let row = index + 1;
        match finalize_record(row, record) {
            Ok(bond) => {
                if repository.insert(bond).is_some() {
                    warn!(row, series = %record.series, "duplicate series, keeping the later row");
                }
            }
            Err(err) => {
                warn!(row, series = %record.series, error = %err, "skipping bond record");
            }
        }
    }

    let mut per_family: BTreeMap<ProductKind, usize> = BTreeMap::new();
    for bond in repository.iter() {
        if let Some(kind) = ProductKind::from_series(bond.series()) {
            *per_family.entry(kind).or_default() += 1;
        }
    }
    for (kind, count) in &per_family {
        info!(family = %kind, bonds = count, "loaded bonds");
    }
    info!(
        bonds = repository.len(),
        skipped = total - repository.len(),
        "bond master data loaded"
    );

    repository
}

/// Turns one raw record into a validated bond.
///
/// `row` is the one-based data row, used only for error reporting.
///
/// # Errors
///
/// Returns `DataError::InvalidRecord` describing the first problem found.
pub fn finalize_record(row: usize, record: &BondRecord) -> DataResult<Bond> {
    let invalid = |reason: String| DataError::InvalidRecord {
        row,
        series: record.series.clone(),
        reason,
    };
    let missing = |field: &str| invalid(format!("missing {field}"));

    let series = record.series.trim().to_ascii_uppercase();
    if series.is_empty() {
        return Err(missing("series"));
    }
    let kind = ProductKind::from_series(&series)
        .ok_or_else(|| invalid(format!("unsupported product family in '{series}'")))?;
    let frequency = kind.frequency();

    let face_value = match record.face_value.as_deref() {
        Some(cell) => parse_price(cell).map_err(invalid)?,
        None => None,
    }
    .ok_or_else(|| missing("face_value"))?;
    let exchange_price = match record.exchange_price.as_deref() {
        Some(cell) => parse_price(cell).map_err(invalid)?,
        None => None,
    };
    let margin = match record.margin.as_deref() {
        Some(cell) if cell.trim() != "-" => Some(parse_percentage(cell).map_err(invalid)?),
        _ => None,
    };

    let months_to_maturity: u32 = record
        .months_to_maturity
        .as_deref()
        .ok_or_else(|| missing("months_to_maturity"))?
        .parse()
        .map_err(|e| invalid(format!("invalid months_to_maturity: {e}")))?;
    if months_to_maturity == 0 {
        return Err(invalid("months_to_maturity must be positive".to_string()));
    }

    let mut rates = record
        .rates
        .iter()
        .map(|cell| parse_percentage(cell))
        .collect::<Result<Vec<Decimal>, _>>()
        .map_err(invalid)?;
    if kind.is_fixed_rate() {
        replicate_first_rate(&mut rates, frequency.period_count(months_to_maturity));
    }

    let sale_start = match record.sale_start.as_deref() {
        Some(cell) => parse_date(cell).map_err(invalid)?,
        None => sale_start_from_series(&series, months_to_maturity)
            .ok_or_else(|| invalid("missing sale_start and no MMYY suffix".to_string()))?,
    };
    let sale_end = match record.sale_end.as_deref() {
        Some(cell) => parse_date(cell).map_err(invalid)?,
        None => YearMonth::of(sale_start)
            .clamped_day(31)
            .map_err(|e| invalid(e.to_string()))?,
    };

    let mut builder = Bond::builder()
        .series(series)
        .face_value(face_value)
        .rates(rates)
        .frequency(frequency)
        .months_to_maturity(months_to_maturity)
        .sale_window(sale_start, sale_end);
    if let Some(isin) = record.isin.as_deref() {
        builder = builder.isin(isin);
    }
    if let Some(price) = exchange_price {
        builder = builder.exchange_price(price);
    }
    if let Some(margin) = margin {
        builder = builder.margin(margin);
    }
    builder.build().map_err(|e| invalid(e.to_string()))
}

/// Repeats the first rate until every period has one.
fn replicate_first_rate(rates: &mut Vec<Decimal>, period_count: Option<u32>) {
    if let (Some(&first), Some(count)) = (rates.first(), period_count) {
        let count = count as usize;
        if rates.len() < count {
            rates.resize(count, first);
        }
    }
}

/// Derives the sale start from the `MMYY` maturity suffix of a series name.
///
/// `EDO0834` matures in August 2034; a 120-month term puts its sale in August 2024.
#[must_use]
pub fn sale_start_from_series(series: &str, months_to_maturity: u32) -> Option<NaiveDate> {
    let suffix = series.get(series.len().checked_sub(4)?..)?;
    if !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month: u32 = suffix[..2].parse().ok()?;
    let year: i32 = suffix[2..].parse().ok()?;
    let maturity = YearMonth::new(2000 + year, month).ok()?;
    maturity
        .sub_months(months_to_maturity)
        .clamped_day(1)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use obligo_core::Frequency;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(series: &str, months: &str, rates: &[&str]) -> BondRecord {
        BondRecord {
            series: series.to_string(),
            face_value: Some("100.00".to_string()),
            months_to_maturity: Some(months.to_string()),
            rates: rates.iter().map(|r| (*r).to_string()).collect(),
            ..BondRecord::default()
        }
    }

    #[test]
    fn test_sale_start_from_series() {
        assert_eq!(sale_start_from_series("EDO0834", 120), Some(date(2024, 8, 1)));
        assert_eq!(sale_start_from_series("TOS1125", 36), Some(date(2022, 11, 1)));
        assert_eq!(sale_start_from_series("ROR0126", 12), Some(date(2025, 1, 1)));
        assert_eq!(sale_start_from_series("EDO13XX", 120), None);
        assert_eq!(sale_start_from_series("EDO1334", 120), None);
        assert_eq!(sale_start_from_series("ED1", 12), None);
    }

    #[test]
    fn test_fixed_rate_replication() {
        let bond = finalize_record(1, &record("TOS1125", "36", &["6.85%"])).unwrap();
        assert_eq!(bond.frequency(), Frequency::Yearly);
        assert_eq!(bond.rates(), &[dec!(0.0685), dec!(0.0685), dec!(0.0685)]);
        assert_eq!(bond.sale_start(), date(2022, 11, 1));
        assert_eq!(bond.sale_end(), date(2022, 11, 30));
    }

    #[test]
    fn test_variable_rate_is_not_extended() {
        let bond = finalize_record(1, &record("EDO0834", "120", &["6.80%", "6.10%"])).unwrap();
        assert_eq!(bond.rates().len(), 2);
        assert_eq!(bond.period_count(), Some(10));
    }

    #[test]
    fn test_bullet_family() {
        let mut ots = record("OTS0118", "3", &["3.00%"]);
        ots.sale_start = Some("1/10/2017".to_string());
        let bond = finalize_record(1, &ots).unwrap();
        assert_eq!(bond.frequency(), Frequency::None);
        assert_eq!(bond.period_count(), Some(1));
        assert_eq!(bond.sale_end(), date(2017, 10, 31));
    }

    #[test]
    fn test_optional_columns() {
        let mut row = record("ROR0126", "12", &["5.75%"]);
        row.isin = Some("PL0000117552".to_string());
        row.exchange_price = Some("99.90".to_string());
        row.margin = Some("-".to_string());
        let bond = finalize_record(1, &row).unwrap();
        assert_eq!(bond.isin(), Some("PL0000117552"));
        assert_eq!(bond.exchange_price(), Some(dec!(99.90)));
        assert_eq!(bond.margin(), Decimal::ZERO);
    }

    #[test]
    fn test_invalid_records() {
        let cases = [
            ("unsupported family", record("XYZ0125", "12", &["5%"])),
            ("no rates", record("ROR0126", "12", &[])),
            ("bad rate", record("ROR0126", "12", &["five"])),
            ("zero term", record("ROR0126", "0", &["5%"])),
            ("bad term", record("ROR0126", "a year", &["5%"])),
            ("missing series", record("", "12", &["5%"])),
        ];
        for (name, row) in cases {
            let err = finalize_record(7, &row).unwrap_err();
            assert!(
                matches!(err, DataError::InvalidRecord { row: 7, .. }),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn test_missing_face_value() {
        let mut row = record("ROR0126", "12", &["5%"]);
        row.face_value = Some("-".to_string());
        let err = finalize_record(1, &row).unwrap_err();
        assert!(err.to_string().contains("missing face_value"));
    }

    #[test]
    fn test_read_csv_skips_bad_rows_and_keeps_last_duplicate() {
        let data = "\
series,isin,face_value,exchange_price,margin,months_to_maturity,rates,sale_start,sale_end
ROR0126,PL1,100.00,99.90,-,12,5.75%,,
XYZ0126,PL2,100.00,,,12,5%,,
ROR0126,PL3,100.00,99.90,-,12,5.50%,2025-01-01,2025-01-31
";
        let repo = read_csv(data.as_bytes()).unwrap();
        assert_eq!(repo.len(), 1);
        let bond = repo.lookup("ROR0126").unwrap();
        assert_eq!(bond.isin(), Some("PL3"));
        assert_eq!(bond.rates(), &[dec!(0.055)]);
    }

    #[test]
    fn test_read_csv_structural_error_fails() {
        let data = "series,face_value\nROR0126,100,extra\n";
        assert!(matches!(read_csv(data.as_bytes()), Err(DataError::Csv(_))));
    }

    #[test]
    fn test_read_json() {
        let data = r#"[
            {"series": "EDO0834", "face_value": 100, "months_to_maturity": 120,
             "rates": ["6.80%", "6.10%"], "sale_start": "1/08/2024", "sale_end": "31/08/2024"}
        ]"#;
        let repo = read_json(data).unwrap();
        let bond = repo.lookup("EDO0834").unwrap();
        assert_eq!(bond.sale_end(), date(2024, 8, 31));
        assert_eq!(bond.rates(), &[dec!(0.068), dec!(0.061)]);
    }

    #[test]
    fn test_unsupported_format() {
        let err = load_path("bonds.xlsx").unwrap_err();
        assert!(matches!(err, DataError::UnsupportedFormat { .. }));
    }
}
