//! Fare calculation for the standard taxi tariff.
//!
//! Currency arithmetic runs on [`Decimal`] so that rates multiply exactly
//! (`10 * 0.32 == 3.20`). Every rounding step is half away from zero to two
//! decimal places, matching conventional `toFixed(2)` currency display.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::{
    entities::FareCalculationResult,
    error::{invalid_fare_input_error, invalid_input_error, Error},
};

/// Flat charge applied to every trip.
pub const BASE_FARE: Decimal = dec!(2.33);
pub const PER_MINUTE_RATE: Decimal = dec!(0.32);
pub const PER_KILOMETER_RATE: Decimal = dec!(1.06);

/// Largest duration (minutes) or distance (km) accepted by [`compute_fare`].
pub const MAX_METRIC: f64 = 1e12;

/// Largest magnitude accepted by [`format_amount`]. Beyond this an `f64`
/// no longer carries whole cents.
pub const MAX_AMOUNT: f64 = 1e15;

const CENTS: u32 = 2;

/// Prices a trip of `duration_minutes` over `distance_km`.
///
/// The total is rounded once from the unrounded components; each component
/// is then rounded independently for display. Displayed parts can therefore
/// sum to one cent away from the displayed total.
///
/// Negative, non-finite or arguments above [`MAX_METRIC`] are rejected.
pub fn compute_fare(duration_minutes: f64, distance_km: f64) -> Result<FareCalculationResult, Error> {
    let duration = metric_to_decimal(duration_minutes, "duration_minutes")?;
    let distance = metric_to_decimal(distance_km, "distance_km")?;

    let base_fare = BASE_FARE;
    let time_fare = duration
        .checked_mul(PER_MINUTE_RATE)
        .ok_or_else(|| invalid_fare_input_error("duration_minutes"))?;
    let distance_fare = distance
        .checked_mul(PER_KILOMETER_RATE)
        .ok_or_else(|| invalid_fare_input_error("distance_km"))?;

    let raw_total = base_fare
        .checked_add(time_fare)
        .and_then(|sum| sum.checked_add(distance_fare))
        .ok_or_else(|| invalid_fare_input_error("duration_minutes and distance_km"))?;

    Ok(FareCalculationResult::new(
        round_cents(base_fare),
        round_cents(time_fare),
        round_cents(distance_fare),
        round_cents(raw_total),
    ))
}

/// Renders `amount` as dollars with exactly two fractional digits.
pub fn format_fare(amount: Decimal) -> String {
    let cents = round_cents(amount);
    let sign = if cents.is_sign_negative() && !cents.is_zero() {
        "-"
    } else {
        ""
    };

    // Padded by hand: rescale() cannot reach two places on values with
    // 27 or more integer digits.
    let text = cents.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    format!("{}${}.{:0<2}", sign, whole, fraction)
}

/// [`format_fare`] for float amounts. `NaN`, infinities and magnitudes above
/// [`MAX_AMOUNT`] are an error.
pub fn format_amount(amount: f64) -> Result<String, Error> {
    if !amount.is_finite() || amount.abs() > MAX_AMOUNT {
        return Err(invalid_input_error());
    }

    let amount = Decimal::from_f64(amount).ok_or_else(invalid_input_error)?;

    Ok(format_fare(amount))
}

pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENTS, RoundingStrategy::MidpointAwayFromZero)
}

fn metric_to_decimal(value: f64, argument: &str) -> Result<Decimal, Error> {
    if !value.is_finite() || !(0.0..=MAX_METRIC).contains(&value) {
        return Err(invalid_fare_input_error(argument));
    }

    // abs() folds -0.0 into 0.0
    Decimal::from_f64(value.abs()).ok_or_else(|| invalid_fare_input_error(argument))
}

#[test]
fn base_fare_only() {
    let result = compute_fare(0.0, 0.0).unwrap();

    assert_eq!(result.total, dec!(2.33));
    assert_eq!(result.breakdown.base_fare, dec!(2.33));
    assert_eq!(result.breakdown.time_fare, Decimal::ZERO);
    assert_eq!(result.breakdown.distance_fare, Decimal::ZERO);
}

#[test]
fn ten_minutes_five_kilometers() {
    let result = compute_fare(10.0, 5.0).unwrap();

    assert_eq!(result.breakdown.time_fare, dec!(3.20));
    assert_eq!(result.breakdown.distance_fare, dec!(5.30));
    assert_eq!(result.total, dec!(10.83));
    assert_eq!(result.breakdown.total, dec!(10.83));
}

#[test]
fn totals_agree_and_stay_within_a_cent_of_the_parts() {
    let durations = [0.0, 1.0, 7.5, 12.25, 18.0, 33.3, 65.0, 0.390625, 144.7];
    let distances = [0.0, 0.4, 2.5, 5.0, 12.5, 13.37, 48.9, 0.015, 310.0];

    for &d in durations.iter() {
        for &k in distances.iter() {
            let result = compute_fare(d, k).unwrap();
            let parts = result.breakdown.base_fare
                + result.breakdown.time_fare
                + result.breakdown.distance_fare;

            assert_eq!(result.total, result.breakdown.total, "d={} k={}", d, k);
            assert!((result.total - parts).abs() <= dec!(0.01), "d={} k={}", d, k);
        }
    }
}

#[test]
fn midpoints_round_away_from_zero() {
    // 0.390625 * 0.32 == 0.125
    let result = compute_fare(0.390625, 0.0).unwrap();

    assert_eq!(result.breakdown.time_fare, dec!(0.13));
    assert_eq!(result.total, dec!(2.46));
}

#[test]
fn total_strictly_increases_with_duration_and_distance() {
    for fixed in [0.0, 3.0, 17.5] {
        for step in 0..120 {
            let step = step as f64;

            let shorter = compute_fare(step, fixed).unwrap();
            let longer = compute_fare(step + 1.0, fixed).unwrap();
            assert!(longer.total > shorter.total);

            let nearer = compute_fare(fixed, step).unwrap();
            let farther = compute_fare(fixed, step + 1.0).unwrap();
            assert!(farther.total > nearer.total);
        }
    }
}

#[test]
fn invalid_metrics_are_rejected() {
    assert_eq!(compute_fare(-1.0, 0.0).unwrap_err().code, 102);
    assert_eq!(compute_fare(0.0, -0.5).unwrap_err().code, 102);
    assert_eq!(compute_fare(f64::NAN, 1.0).unwrap_err().code, 102);
    assert_eq!(compute_fare(1.0, f64::INFINITY).unwrap_err().code, 102);
    assert_eq!(compute_fare(1e30, 1.0).unwrap_err().code, 102);

    let err = compute_fare(3.0, -2.0).unwrap_err();
    assert!(err.message.contains("distance_km"));
}

#[test]
fn negative_zero_is_zero() {
    let result = compute_fare(-0.0, -0.0).unwrap();

    assert_eq!(result.total, dec!(2.33));
    assert_eq!(format_fare(result.breakdown.time_fare), "$0.00");
}

#[test]
fn formats_two_fractional_digits() {
    assert_eq!(format_fare(dec!(12.5)), "$12.50");
    assert_eq!(format_fare(Decimal::ZERO), "$0.00");
    assert_eq!(format_fare(dec!(1234.5)), "$1234.50");
    assert_eq!(format_fare(dec!(10.83)), "$10.83");
    assert_eq!(format_fare(dec!(7)), "$7.00");
}

#[test]
fn formatting_rounds_half_away_from_zero() {
    assert_eq!(format_fare(dec!(0.125)), "$0.13");
    assert_eq!(format_fare(dec!(2.004)), "$2.00");
    assert_eq!(format_fare(dec!(-3)), "-$3.00");
    assert_eq!(format_fare(dec!(-0.001)), "$0.00");
}

#[test]
fn formatting_is_deterministic() {
    let first = format_fare(dec!(42.1));

    for _ in 0..10 {
        assert_eq!(format_fare(dec!(42.1)), first);
    }
}

#[test]
fn float_amounts() {
    assert_eq!(format_amount(12.5).unwrap(), "$12.50");
    assert_eq!(format_amount(0.0).unwrap(), "$0.00");
    assert_eq!(format_amount(1234.5).unwrap(), "$1234.50");

    assert_eq!(format_amount(f64::NAN).unwrap_err().code, 101);
    assert_eq!(format_amount(f64::NEG_INFINITY).unwrap_err().code, 101);
}

#[test]
fn metrics_are_bounded() {
    let result = compute_fare(MAX_METRIC, MAX_METRIC).unwrap();
    assert_eq!(result.total, dec!(1380000000002.33));
    assert_eq!(format_fare(result.total), "$1380000000002.33");

    assert_eq!(compute_fare(MAX_METRIC * 10.0, 0.0).unwrap_err().code, 102);
    assert_eq!(compute_fare(7e27, 0.0).unwrap_err().code, 102);
    assert_eq!(compute_fare(0.0, 7e27).unwrap_err().code, 102);
}

#[test]
fn oversized_metric_is_named() {
    let err = compute_fare(MAX_METRIC * 10.0, 1.0).unwrap_err();
    assert!(err.message.contains("duration_minutes"));
    assert!(!err.message.contains("distance_km"));

    let err = compute_fare(1.0, MAX_METRIC * 10.0).unwrap_err();
    assert!(err.message.contains("distance_km"));
}

#[test]
fn huge_amounts_keep_two_fractional_digits() {
    assert_eq!(format_fare(Decimal::MAX), "$79228162514264337593543950335.00");
    assert_eq!(format_fare(-Decimal::MAX), "-$79228162514264337593543950335.00");
    assert_eq!(
        format_fare(dec!(1000000000000000000000000000.5)),
        "$1000000000000000000000000000.50"
    );

    assert_eq!(format_amount(MAX_AMOUNT).unwrap(), "$1000000000000000.00");
    assert_eq!(format_amount(1e27).unwrap_err().code, 101);
    assert_eq!(format_amount(-5e28).unwrap_err().code, 101);
}
