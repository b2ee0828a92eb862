//! Reusable field validators
//!
//! Each validator takes the field name and the raw value and either returns
//! the coerced value or a human-readable message. Schemas compose them and
//! collect the messages per field.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

const REQUIRED: &str = "Required";

fn received(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validator: field is a string (present, not null)
pub fn string() -> impl Fn(&str, &Value) -> Result<String, String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Err(REQUIRED.to_string()),
        other => Err(format!("Expected string, received {}", received(other))),
    }
}

/// Validator: field coerces to a decimal number
///
/// Strings are trimmed and parsed as plain or scientific notation; JSON
/// numbers are taken through their shortest decimal representation so `9.99`
/// stays `9.99`. Blank strings are rejected rather than read as zero, as are
/// `_` digit separators. Exponents too small to represent read as zero.
pub fn coerce_number() -> impl Fn(&str, &Value) -> Result<Decimal, String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value {
        Value::Null => Err(REQUIRED.to_string()),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Err("Expected number, received empty string".to_string());
            }
            parse_decimal(s)
        }
        Value::Number(n) => parse_decimal(&n.to_string()),
        other => Err(format!("Expected number, received {}", received(other))),
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, String> {
    let not_a_number = || format!("Expected number, received '{}'", s);
    if s.contains('_') {
        return Err(not_a_number());
    }
    if let Ok(value) = Decimal::from_str(s) {
        return Ok(value);
    }

    let (mantissa, exponent) = s.split_once(['e', 'E']).ok_or_else(not_a_number)?;
    Decimal::from_str(mantissa).map_err(|_| not_a_number())?;
    let exponent: i64 = exponent.parse().map_err(|_| not_a_number())?;

    match Decimal::from_scientific(s) {
        Ok(value) => Ok(value),
        Err(_) if exponent < 0 => Ok(Decimal::ZERO),
        Err(_) => Err(format!("Number {} is out of range", s)),
    }
}

/// Validator: number must not be negative
pub fn non_negative() -> impl Fn(&str, &Decimal) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Decimal| {
        if value.is_sign_negative() && !value.is_zero() {
            Err(format!("Number must be greater than or equal to 0 (value: {})", value))
        } else {
            Ok(())
        }
    }
}

/// Validator: value must be one of the allowed strings
pub fn one_of(
    allowed: &'static [&'static str],
) -> impl Fn(&str, &Value) -> Result<&'static str, String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value {
        Value::String(s) => allowed
            .iter()
            .find(|candidate| **candidate == s.as_str())
            .copied()
            .ok_or_else(|| {
                format!(
                    "Invalid enum value. Expected {}, received '{}'",
                    allowed
                        .iter()
                        .map(|a| format!("'{}'", a))
                        .collect::<Vec<_>>()
                        .join(" | "),
                    s
                )
            }),
        Value::Null => Err(REQUIRED.to_string()),
        other => Err(format!("Expected string, received {}", received(other))),
    }
}

/// Validator: string is a calendar date in the given format
pub fn date_format(
    format: &'static str,
) -> impl Fn(&str, &Value) -> Result<NaiveDate, String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        let s = string()(field, value)?;
        NaiveDate::parse_from_str(&s, format)
            .map_err(|_| format!("Expected date in format {} (received: '{}')", format, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).expect("valid decimal")
    }

    // === string() ===

    #[test]
    fn test_string_accepts_string() {
        assert_eq!(string()("customerId", &json!("c1")), Ok("c1".to_string()));
    }

    #[test]
    fn test_string_accepts_empty_string() {
        assert_eq!(string()("customerId", &json!("")), Ok(String::new()));
    }

    #[test]
    fn test_string_null_is_required() {
        assert_eq!(string()("customerId", &json!(null)), Err("Required".to_string()));
    }

    #[test]
    fn test_string_rejects_number() {
        let err = string()("customerId", &json!(7)).unwrap_err();
        assert!(err.contains("received number"));
    }

    // === coerce_number() ===

    #[test]
    fn test_coerce_number_from_string() {
        assert_eq!(coerce_number()("amount", &json!("50")), Ok(dec("50")));
        assert_eq!(coerce_number()("amount", &json!(" 9.99 ")), Ok(dec("9.99")));
    }

    #[test]
    fn test_coerce_number_scientific_notation() {
        assert_eq!(coerce_number()("amount", &json!("1e3")), Ok(dec("1000")));
    }

    #[test]
    fn test_coerce_number_from_json_number() {
        assert_eq!(coerce_number()("amount", &json!(9.99)), Ok(dec("9.99")));
        assert_eq!(coerce_number()("amount", &json!(10)), Ok(dec("10")));
    }

    #[test]
    fn test_coerce_number_rejects_garbage() {
        let err = coerce_number()("amount", &json!("abc")).unwrap_err();
        assert!(err.contains("Expected number"));
    }

    #[test]
    fn test_coerce_number_rejects_digit_separators() {
        for input in ["1_000", "1_0.5", "1e1_0"] {
            let err = coerce_number()("amount", &json!(input)).unwrap_err();
            assert!(err.contains("Expected number"), "{input}: {err}");
        }
    }

    #[test]
    fn test_coerce_number_tiny_exponent_is_zero() {
        assert_eq!(coerce_number()("amount", &json!("1e-400")), Ok(Decimal::ZERO));
        assert_eq!(coerce_number()("amount", &json!("2.5E-99")), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_coerce_number_huge_exponent_is_out_of_range() {
        let err = coerce_number()("amount", &json!("1e400")).unwrap_err();
        assert!(err.contains("out of range"));
        assert!(coerce_number()("amount", &json!("abce5")).is_err());
        assert!(coerce_number()("amount", &json!("1ee5")).is_err());
    }

    #[test]
    fn test_coerce_number_rejects_blank() {
        let err = coerce_number()("amount", &json!("   ")).unwrap_err();
        assert!(err.contains("empty string"));
    }

    #[test]
    fn test_coerce_number_null_is_required() {
        assert_eq!(coerce_number()("amount", &json!(null)), Err("Required".to_string()));
    }

    #[test]
    fn test_coerce_number_rejects_boolean() {
        assert!(coerce_number()("amount", &json!(true)).is_err());
    }

    // === non_negative() ===

    #[test]
    fn test_non_negative() {
        assert!(non_negative()("amount", &dec("0")).is_ok());
        assert!(non_negative()("amount", &dec("-0")).is_ok());
        assert!(non_negative()("amount", &dec("12.5")).is_ok());
        assert!(non_negative()("amount", &dec("-0.01")).is_err());
    }

    // === one_of() ===

    #[test]
    fn test_one_of_accepts_listed_value() {
        let v = one_of(&["pending", "paid"]);
        assert_eq!(v("status", &json!("paid")), Ok("paid"));
    }

    #[test]
    fn test_one_of_rejects_unlisted_value() {
        let v = one_of(&["pending", "paid"]);
        let err = v("status", &json!("overdue")).unwrap_err();
        assert!(err.contains("'pending' | 'paid'"));
        assert!(err.contains("overdue"));
    }

    #[test]
    fn test_one_of_is_case_sensitive() {
        let v = one_of(&["pending", "paid"]);
        assert!(v("status", &json!("PAID")).is_err());
    }

    // === date_format() ===

    #[test]
    fn test_date_format_valid() {
        let v = date_format("%Y-%m-%d");
        assert_eq!(
            v("date", &json!("2024-01-15")),
            Ok(NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"))
        );
    }

    #[test]
    fn test_date_format_invalid() {
        let v = date_format("%Y-%m-%d");
        assert!(v("date", &json!("15/01/2024")).is_err());
        assert_eq!(v("date", &json!(null)), Err("Required".to_string()));
    }
}
