//! Integration tests against indicative prices.
//!
//! Fixture rows of kind `published` are the issuer's indicative prices, matched to the cent.
//! Rows of kind `derived` are computed by hand from the same terms and pin boundary cases:
//! the purchase day itself, the day before it, and a date past the last documented period.

use chrono::NaiveDate;
use obligo_core::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

/// Path to the reference valuation data
const REFERENCE_FILE: &str = "../../tests/fixtures/reference_valuations.json";

// ============================================================================
// JSON Structures for Test Data
// ============================================================================

#[derive(Debug, Deserialize)]
struct ReferenceSuite {
    metadata: Metadata,
    bonds: Vec<BondTerms>,
    valuations: Vec<ReferenceValuation>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)] // source is documentation only
struct Metadata {
    source: String,
    zone: String,
}

#[derive(Debug, Deserialize)]
struct BondTerms {
    series: String,
    frequency: Frequency,
    months_to_maturity: u32,
    sale_start: NaiveDate,
    sale_end: NaiveDate,
    rates: Vec<Decimal>,
}

#[derive(Debug, Deserialize)]
struct ReferenceValuation {
    series: String,
    purchase_day: u32,
    date: NaiveDate,
    outcome: String,
    price: Option<Decimal>,
    kind: String,
}

fn load_suite() -> ReferenceSuite {
    let content = fs::read_to_string(REFERENCE_FILE).expect("reference fixture is readable");
    serde_json::from_str(&content).expect("reference fixture parses")
}

fn build(terms: &BondTerms) -> Bond {
    Bond::builder()
        .series(terms.series.as_str())
        .face_value(dec!(100))
        .rates(terms.rates.clone())
        .frequency(terms.frequency)
        .months_to_maturity(terms.months_to_maturity)
        .sale_window(terms.sale_start, terms.sale_end)
        .build()
        .expect("reference bond terms are valid")
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_reference_valuations_match_to_the_cent() {
    let suite = load_suite();
    let zone: CalendarZone = suite.metadata.zone.parse().unwrap();
    let engine = AccrualEngine::new(zone);
    let bonds: HashMap<_, _> = suite
        .bonds
        .iter()
        .map(|terms| (terms.series.clone(), build(terms)))
        .collect();

    assert!(!suite.valuations.is_empty());
    for case in &suite.valuations {
        let bond = &bonds[&case.series];
        let valuation = engine
            .calculate(bond, case.purchase_day, case.date)
            .unwrap_or_else(|e| panic!("{} on {}: {e}", case.series, case.date));

        let outcome = serde_json::to_value(valuation.outcome()).unwrap();
        assert_eq!(
            outcome, case.outcome,
            "{} {} day {} on {}",
            case.kind, case.series, case.purchase_day, case.date
        );
        assert_eq!(
            valuation.price(),
            case.price,
            "{} {} day {} on {}",
            case.kind,
            case.series,
            case.purchase_day,
            case.date
        );
    }
}

#[test]
fn test_yearly_scenario_spanning_two_rates() {
    // Bought on the 8th, valued sixteen months later: one full year at 6.80%,
    // then 116 of 365 days at 6.10%
    let bond = Bond::builder()
        .series("EDO0834")
        .face_value(dec!(100))
        .rates(vec![dec!(0.068), dec!(0.061)])
        .frequency(Frequency::Yearly)
        .months_to_maturity(120)
        .sale_window(
            NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 8, 31).unwrap(),
        )
        .build()
        .unwrap();

    let engine = AccrualEngine::default();
    let date = NaiveDate::from_ymd_opt(2025, 12, 6).unwrap();
    let valuation = engine.calculate(&bond, 8, date).unwrap();
    assert_eq!(valuation, Valuation::Accrued { price: dec!(108.94) });

    let periods = engine.calendar().periods(&bond, 8).unwrap();
    assert_eq!(periods[1].length_days(), 365);
}

#[test]
fn test_published_rows_cover_every_bond() {
    let suite = load_suite();
    for terms in &suite.bonds {
        assert!(
            suite
                .valuations
                .iter()
                .any(|case| case.series == terms.series && case.kind == "published"),
            "{} has no published price",
            terms.series
        );
    }
}

#[test]
fn test_full_periods_compound_at_their_own_rates() {
    // Bought 2022-08-20: one full year at 6.75%, then 355 of 366 days at 12.75%
    // (the second period spans 2024-02-29)
    let bond = Bond::builder()
        .series("EDO0832")
        .face_value(dec!(100))
        .rates(vec![dec!(0.0675), dec!(0.1275)])
        .frequency(Frequency::Yearly)
        .months_to_maturity(120)
        .sale_window(
            NaiveDate::from_ymd_opt(2022, 8, 1).unwrap(),
            NaiveDate::from_ymd_opt(2022, 8, 31).unwrap(),
        )
        .build()
        .unwrap();

    let engine = AccrualEngine::default();
    let periods = engine.calendar().periods(&bond, 20).unwrap();
    assert_eq!(periods[1].length_days(), 366);

    let valuation = engine
        .calculate(&bond, 20, NaiveDate::from_ymd_opt(2024, 8, 9).unwrap())
        .unwrap();
    assert_eq!(valuation, Valuation::Accrued { price: dec!(119.95) });

    let first_anniversary = engine
        .calculate(&bond, 20, NaiveDate::from_ymd_opt(2023, 8, 20).unwrap())
        .unwrap();
    assert_eq!(first_anniversary.price(), Some(dec!(106.75)));
}

#[test]
fn test_dst_switch_day_counts_whole_days() {
    // Warsaw springs forward on 2023-03-26; both sides of the switch must
    // differ by exactly one day of proration
    let bond = Bond::builder()
        .series("TOS1125")
        .face_value(dec!(100))
        .rates(vec![dec!(0.0685); 3])
        .frequency(Frequency::Yearly)
        .months_to_maturity(36)
        .sale_window(
            NaiveDate::from_ymd_opt(2022, 11, 1).unwrap(),
            NaiveDate::from_ymd_opt(2022, 11, 30).unwrap(),
        )
        .build()
        .unwrap();

    let engine = AccrualEngine::default();
    let before = engine
        .calculate(&bond, 1, NaiveDate::from_ymd_opt(2023, 3, 26).unwrap())
        .unwrap();
    let after = engine
        .calculate(&bond, 1, NaiveDate::from_ymd_opt(2023, 3, 27).unwrap())
        .unwrap();
    assert_eq!(before.price(), Some(dec!(102.72)));
    assert_eq!(after.price(), Some(dec!(102.74)));
}

#[test]
fn test_valuation_before_purchase_has_no_price() {
    let suite = load_suite();
    let terms = suite
        .bonds
        .iter()
        .find(|terms| terms.series == "EDO0935")
        .unwrap();
    let bond = build(terms);

    let valuation = AccrualEngine::default()
        .calculate(&bond, 2, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())
        .unwrap();
    assert_eq!(valuation.outcome(), ValuationOutcome::BeforePurchase);
    assert_eq!(valuation.price(), None);
}

#[test]
fn test_period_index_out_of_range() {
    let suite = load_suite();
    let bond = build(&suite.bonds[0]);
    let calendar = PeriodCalendar::default();

    let err = calendar.period(&bond, 3, 1).unwrap_err();
    assert_eq!(
        err,
        ObligoError::InvalidPeriodIndex {
            index: 3,
            period_count: 3
        }
    );
}
