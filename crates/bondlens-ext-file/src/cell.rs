//! Lenient cell parsing for spreadsheet exports.
//!
//! Every parser returns `None` for blanks and unparseable text; callers
//! decide whether a missing value matters.

use bondlens_core::types::Date;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

const MISSING: &[&str] = &["", "-", "--", "nan", "n/a", "na", "null", "none", "#n/a"];

fn present(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if MISSING.contains(&trimmed.to_ascii_lowercase().as_str()) {
        None
    } else {
        Some(trimmed)
    }
}

/// Parses a number, accepting thousands separators and a trailing `%`.
pub fn decimal(raw: &str) -> Option<Decimal> {
    let text = present(raw)?;
    let (body, percent) = match text.strip_suffix('%') {
        Some(body) => (body.trim_end(), true),
        None => (text, false),
    };
    let cleaned: String = body.chars().filter(|c| *c != ',').collect();
    let value = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()?;
    Some(if percent {
        value / Decimal::ONE_HUNDRED
    } else {
        value
    })
}

/// Parses a floating-point number with the same rules as [`decimal`].
pub fn float(raw: &str) -> Option<f64> {
    decimal(raw)?.to_f64().filter(|v| v.is_finite())
}

/// Parses a date in any of the accepted layouts.
pub fn date(raw: &str) -> Option<Date> {
    Date::parse_flexible(present(raw)?).ok()
}

/// Parses a payments-per-year cell: `2`, `2.0`, or a name such as
/// `Semi-Annual` / `Quarterly`.
pub fn frequency(raw: &str) -> Option<i64> {
    let text = present(raw)?;
    let named = match text.to_ascii_lowercase().replace([' ', '-', '_'], "").as_str() {
        "annual" | "annually" | "yearly" => Some(1),
        "semiannual" | "semiannually" => Some(2),
        "triannual" => Some(3),
        "quarterly" => Some(4),
        "bimonthly" => Some(6),
        "monthly" => Some(12),
        _ => None,
    };
    if named.is_some() {
        return named;
    }
    let value = decimal(text)?;
    if value.fract().is_zero() {
        value.to_i64()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal() {
        assert_eq!(decimal("1,250,000.50"), Some(dec!(1250000.50)));
        assert_eq!(decimal(" 0.0625 "), Some(dec!(0.0625)));
        assert_eq!(decimal("6.25%"), Some(dec!(0.0625)));
        assert_eq!(decimal("1e3"), Some(dec!(1000)));
        assert_eq!(decimal("-"), None);
        assert_eq!(decimal("NaN"), None);
        assert_eq!(decimal("N/A"), None);
        assert_eq!(decimal("abc"), None);
    }

    #[test]
    fn test_float() {
        assert_eq!(float("0.05"), Some(0.05));
        assert_eq!(float(""), None);
    }

    #[test]
    fn test_date() {
        let expected = Date::from_ymd(2030, 3, 15).unwrap();
        assert_eq!(date("2030-03-15"), Some(expected));
        assert_eq!(date("03/15/2030"), Some(expected));
        assert_eq!(date("2030/03/15"), Some(expected));
        assert_eq!(date("2030-03-15 00:00:00"), Some(expected));
        assert_eq!(date("15th March"), None);
        assert_eq!(date(""), None);
    }

    #[test]
    fn test_frequency() {
        assert_eq!(frequency("2"), Some(2));
        assert_eq!(frequency("4.0"), Some(4));
        assert_eq!(frequency("Semi-Annual"), Some(2));
        assert_eq!(frequency("quarterly"), Some(4));
        assert_eq!(frequency("2.5"), None);
        assert_eq!(frequency("nan"), None);
    }
}
