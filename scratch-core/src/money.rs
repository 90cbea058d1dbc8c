//! Decimal-string money helpers.
//!
//! The platform API ships every amount as a decimal string (`"50"`, `"12.5"`,
//! `"10.0000"`). Amounts are parsed once at the boundary into integer cents and
//! only converted back for display or outgoing requests.

use num_traits::cast::cast;
use thiserror::Error;

/// Errors raised while parsing a decimal amount.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("amount is empty")]
    Empty,
    #[error("'{0}' is not a valid amount")]
    Malformed(String),
    #[error("'{0}' has more than two decimal places")]
    TooPrecise(String),
    #[error("'{0}' is out of range")]
    Overflow(String),
}

/// Parse a decimal string into cents.
///
/// Accepts an optional sign, an integer part, and up to two significant
/// fractional digits. Extra fractional digits are allowed only when they are
/// zeros, which is how fixed-scale database decimals arrive (`"10.0000"`).
///
/// # Errors
///
/// Returns [`MoneyError`] when the input is empty, malformed, carries a
/// non-zero third decimal, or does not fit in an `i64`.
pub fn parse_cents(input: &str) -> Result<i64, MoneyError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MoneyError::Empty);
    }
    let malformed = || MoneyError::Malformed(trimmed.to_string());
    let overflow = || MoneyError::Overflow(trimmed.to_string());

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (whole, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(malformed());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }
    if frac.len() > 2 && frac[2..].chars().any(|c| c != '0') {
        return Err(MoneyError::TooPrecise(trimmed.to_string()));
    }

    let whole_value: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };
    let mut frac_digits: String = frac.chars().take(2).collect();
    while frac_digits.len() < 2 {
        frac_digits.push('0');
    }
    let frac_value: i64 = frac_digits.parse().map_err(|_| malformed())?;

    let cents = whole_value
        .checked_mul(100)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(overflow)?;
    Ok(if negative { -cents } else { cents })
}

/// Parse an optional decimal string, treating absent or invalid input as `None`.
#[must_use]
pub fn parse_cents_opt(input: Option<&str>) -> Option<i64> {
    input.and_then(|raw| parse_cents(raw).ok())
}

/// Render cents as a plain decimal string with two places, e.g. `1234 -> "12.34"`.
///
/// This is the wire format used for outgoing requests.
#[must_use]
pub fn format_decimal(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Render cents for display with thousands separators, e.g. `123456 -> "1,234.56"`.
#[must_use]
pub fn format_display(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let whole = (abs / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{:02}", abs % 100)
}

/// Convert cents into a floating amount for UI effects that need a number.
#[must_use]
pub fn cents_to_f64(cents: i64) -> f64 {
    cast::<i64, f64>(cents).map_or(0.0, |v| v / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_api_shapes() {
        assert_eq!(parse_cents("50"), Ok(5_000));
        assert_eq!(parse_cents("12.5"), Ok(1_250));
        assert_eq!(parse_cents("0.07"), Ok(7));
        assert_eq!(parse_cents("10.0000"), Ok(1_000));
        assert_eq!(parse_cents(" -3.10 "), Ok(-310));
        assert_eq!(parse_cents(".5"), Ok(50));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_cents(""), Err(MoneyError::Empty));
        assert!(matches!(parse_cents("abc"), Err(MoneyError::Malformed(_))));
        assert!(matches!(parse_cents("1.2.3"), Err(MoneyError::Malformed(_))));
        assert!(matches!(parse_cents("."), Err(MoneyError::Malformed(_))));
        assert!(matches!(
            parse_cents("1.005"),
            Err(MoneyError::TooPrecise(_))
        ));
        assert!(matches!(
            parse_cents("99999999999999999999"),
            Err(MoneyError::Overflow(_))
        ));
    }

    #[test]
    fn formats_for_wire_and_display() {
        assert_eq!(format_decimal(1_234), "12.34");
        assert_eq!(format_decimal(-5), "-0.05");
        assert_eq!(format_display(123_456_789), "1,234,567.89");
        assert_eq!(format_display(99), "0.99");
        assert!((cents_to_f64(250) - 2.5).abs() < f64::EPSILON);
    }
}
