use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, Error};

/// Duration and distance of a trip, already converted to minutes and
/// kilometers. Both values are finite and non-negative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub distance_text: String,
    pub duration_text: String,
}

impl RouteMetrics {
    pub fn new(distance_km: f64, duration_minutes: f64) -> Result<Self, Error> {
        let distance_text = format!("{} km", trim_float(distance_km));
        let duration_text = match duration_minutes {
            m if m == 1.0 => "1 min".to_string(),
            m => format!("{} mins", trim_float(m)),
        };

        Self::with_text(distance_km, duration_minutes, distance_text, duration_text)
    }

    /// Builds metrics from the numeric values of a directions leg.
    pub fn from_leg(
        distance_meters: u64,
        duration_seconds: u64,
        distance_text: String,
        duration_text: String,
    ) -> Result<Self, Error> {
        Self::with_text(
            distance_meters as f64 / 1000.0,
            duration_seconds as f64 / 60.0,
            distance_text,
            duration_text,
        )
    }

    /// Parses human-readable text such as `"12.5 km"` and `"1 hour 5 mins"`.
    #[tracing::instrument]
    pub fn parse(distance_text: &str, duration_text: &str) -> Result<Self, Error> {
        let distance_km = parse_distance_km(distance_text)?;
        let duration_minutes = parse_duration_minutes(duration_text)?;

        Self::with_text(
            distance_km,
            duration_minutes,
            distance_text.trim().to_string(),
            duration_text.trim().to_string(),
        )
    }

    fn with_text(
        distance_km: f64,
        duration_minutes: f64,
        distance_text: String,
        duration_text: String,
    ) -> Result<Self, Error> {
        if !is_valid_metric(distance_km) || !is_valid_metric(duration_minutes) {
            return Err(invalid_input_error());
        }

        Ok(Self {
            distance_km,
            duration_minutes,
            distance_text,
            duration_text,
        })
    }
}

fn is_valid_metric(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn trim_float(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn parse_distance_km(text: &str) -> Result<f64, Error> {
    sum_quantities(text, "km", |unit| match unit {
        "km" | "kms" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
            Some(Scale::Times(1.0))
        }
        "m" | "meter" | "meters" | "metre" | "metres" => Some(Scale::Per(1000.0)),
        "mi" | "mile" | "miles" => Some(Scale::Times(1.609344)),
        "ft" | "feet" | "foot" => Some(Scale::Times(0.0003048)),
        _ => None,
    })
}

pub fn parse_duration_minutes(text: &str) -> Result<f64, Error> {
    sum_quantities(text, "min", |unit| match unit {
        "day" | "days" | "d" => Some(Scale::Times(1440.0)),
        "hour" | "hours" | "hr" | "hrs" | "h" => Some(Scale::Times(60.0)),
        "min" | "mins" | "minute" | "minutes" | "m" => Some(Scale::Times(1.0)),
        "sec" | "secs" | "second" | "seconds" | "s" => Some(Scale::Per(60.0)),
        _ => None,
    })
}

// Conversion into the target unit. Sub-units divide so that e.g. 850 m is
// exactly 0.85 km.
#[derive(Clone, Copy, Debug)]
enum Scale {
    Times(f64),
    Per(f64),
}

impl Scale {
    fn apply(self, value: f64) -> f64 {
        match self {
            Scale::Times(factor) => value * factor,
            Scale::Per(divisor) => value / divisor,
        }
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Number(f64),
    Unit(String),
}

// Sums `<number> <unit>` pairs. A trailing number without a unit takes
// `default_unit`.
fn sum_quantities<F>(text: &str, default_unit: &str, scale: F) -> Result<f64, Error>
where
    F: Fn(&str) -> Option<Scale>,
{
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(invalid_input_error());
    }

    let mut total = 0.0;
    let mut iter = tokens.into_iter();

    while let Some(token) = iter.next() {
        let value = match token {
            Token::Number(value) => value,
            Token::Unit(_) => return Err(invalid_input_error()),
        };

        let unit = match iter.next() {
            Some(Token::Unit(unit)) => unit,
            Some(Token::Number(_)) => return Err(invalid_input_error()),
            None => default_unit.to_string(),
        };

        let scale = scale(&unit).ok_or_else(invalid_input_error)?;
        total += scale.apply(value);
    }

    Ok(total)
}

fn tokenize(text: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    let mut chars = text.trim().chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_digit() || c == '.' {
            let mut number = String::new();
            while let Some(&c) = chars.peek() {
                match c {
                    '0'..='9' | '.' => number.push(c),
                    // thousands separator
                    ',' => {}
                    _ => break,
                }
                chars.next();
            }
            let value = number.parse::<f64>().map_err(|_| invalid_input_error())?;
            tokens.push(Token::Number(value));
        } else if c.is_alphabetic() {
            let mut unit = String::new();
            while let Some(&c) = chars.peek() {
                if !c.is_alphabetic() {
                    break;
                }
                unit.extend(c.to_lowercase());
                chars.next();
            }
            tokens.push(Token::Unit(unit));
        } else {
            return Err(invalid_input_error());
        }
    }

    Ok(tokens)
}

#[test]
fn parses_directions_text() {
    let metrics = RouteMetrics::parse("12.5 km", "18 mins").unwrap();

    assert_eq!(metrics.distance_km, 12.5);
    assert_eq!(metrics.duration_minutes, 18.0);
    assert_eq!(metrics.distance_text, "12.5 km");
    assert_eq!(metrics.duration_text, "18 mins");
}

#[test]
fn parses_compound_durations() {
    assert_eq!(parse_duration_minutes("1 hour 5 mins").unwrap(), 65.0);
    assert_eq!(parse_duration_minutes("2 hours").unwrap(), 120.0);
    assert_eq!(parse_duration_minutes("1 day 2 hours").unwrap(), 1560.0);
    assert_eq!(parse_duration_minutes("1 min").unwrap(), 1.0);
    assert_eq!(parse_duration_minutes("90 secs").unwrap(), 1.5);
    assert_eq!(parse_duration_minutes("1h30m").unwrap(), 90.0);
}

#[test]
fn parses_distance_units() {
    assert_eq!(parse_distance_km("850 m").unwrap(), 0.85);
    assert_eq!(parse_distance_km("1,234 km").unwrap(), 1234.0);
    assert_eq!(parse_distance_km("12.5km").unwrap(), 12.5);
    assert!((parse_distance_km("3 mi").unwrap() - 4.828032).abs() < 1e-9);
}

#[test]
fn bare_numbers_use_default_units() {
    assert_eq!(parse_distance_km("7.2").unwrap(), 7.2);
    assert_eq!(parse_duration_minutes("25").unwrap(), 25.0);
}

#[test]
fn rejects_unparseable_text() {
    assert!(parse_distance_km("").is_err());
    assert!(parse_distance_km("   ").is_err());
    assert!(parse_distance_km("km").is_err());
    assert!(parse_distance_km("12 parsecs").is_err());
    assert!(parse_distance_km("1.2.3 km").is_err());
    assert!(parse_duration_minutes("-5 mins").is_err());
    assert!(parse_duration_minutes("5 10 mins").is_err());
}

#[test]
fn leg_values_are_converted() {
    let metrics = RouteMetrics::from_leg(12500, 1080, "12.5 km".into(), "18 mins".into()).unwrap();

    assert_eq!(metrics.distance_km, 12.5);
    assert_eq!(metrics.duration_minutes, 18.0);
}

#[test]
fn synthesizes_display_text() {
    let metrics = RouteMetrics::new(12.5, 18.0).unwrap();
    assert_eq!(metrics.distance_text, "12.5 km");
    assert_eq!(metrics.duration_text, "18 mins");

    let metrics = RouteMetrics::new(3.0, 1.0).unwrap();
    assert_eq!(metrics.distance_text, "3 km");
    assert_eq!(metrics.duration_text, "1 min");
}

#[test]
fn invalid_metrics_are_rejected() {
    assert!(RouteMetrics::new(-1.0, 5.0).is_err());
    assert!(RouteMetrics::new(1.0, f64::NAN).is_err());
}
