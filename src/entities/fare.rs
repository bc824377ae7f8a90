use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fare::format_fare;

/// Itemized components of a trip price, each rounded to cents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub base_fare: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub time_fare: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub distance_fare: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareCalculationResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub breakdown: FareBreakdown,
}

impl FareCalculationResult {
    // `total` is taken once and mirrored into the breakdown.
    pub(crate) fn new(
        base_fare: Decimal,
        time_fare: Decimal,
        distance_fare: Decimal,
        total: Decimal,
    ) -> Self {
        Self {
            total,
            breakdown: FareBreakdown {
                base_fare,
                time_fare,
                distance_fare,
                total,
            },
        }
    }
}

/// Display strings for a fare, as shown on a confirmation screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedFare {
    pub base_fare: String,
    pub time_fare: String,
    pub distance_fare: String,
    pub total: String,
}

impl From<&FareCalculationResult> for FormattedFare {
    fn from(result: &FareCalculationResult) -> Self {
        Self {
            base_fare: format_fare(result.breakdown.base_fare),
            time_fare: format_fare(result.breakdown.time_fare),
            distance_fare: format_fare(result.breakdown.distance_fare),
            total: format_fare(result.total),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareQuote {
    pub fare: FareCalculationResult,
    pub formatted: FormattedFare,
}

impl FareQuote {
    pub fn new(fare: FareCalculationResult) -> Self {
        let formatted = FormattedFare::from(&fare);

        Self { fare, formatted }
    }
}

#[test]
fn breakdown_total_mirrors_result_total() {
    use rust_decimal_macros::dec;

    let result = FareCalculationResult::new(dec!(2.33), dec!(3.20), dec!(5.30), dec!(10.83));

    assert_eq!(result.total, result.breakdown.total);
}

#[test]
fn fare_serializes_as_numbers() {
    use rust_decimal_macros::dec;

    let result = FareCalculationResult::new(dec!(2.33), dec!(3.20), dec!(5.30), dec!(10.83));
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["total"], serde_json::json!(10.83));
    assert_eq!(value["breakdown"]["time_fare"], serde_json::json!(3.2));
}

#[test]
fn quote_carries_display_strings() {
    use rust_decimal_macros::dec;

    let quote = FareQuote::new(FareCalculationResult::new(
        dec!(2.33),
        dec!(3.2),
        dec!(5.3),
        dec!(10.83),
    ));

    assert_eq!(quote.formatted.base_fare, "$2.33");
    assert_eq!(quote.formatted.time_fare, "$3.20");
    assert_eq!(quote.formatted.distance_fare, "$5.30");
    assert_eq!(quote.formatted.total, "$10.83");
}
