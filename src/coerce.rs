//! Field coercion: one JSON value into one declared field kind.
//!
//! Each kind tries the most JSON-native reading first and falls back to
//! reparsing the value's text when that reading comes out as the zero value.
//! A JSON number `17` and a JSON string `"17"` both land in an integer field
//! as `17`. A genuine zero is reparsed from its default text and stays zero.
//!
//! | Kind     | Primary          | Fallback when          | Fallback                        |
//! |----------|------------------|------------------------|---------------------------------|
//! | unsigned | `must_u64`       | result is `0`          | text (default `"0"`) as base 10 |
//! | signed   | `must_i64`       | result is `0`          | text (default `"0"`) as base 10 |
//! | string   | `as_str`         | not a string           | `as_u64` formatted in decimal   |
//! | bool     | `must_bool`      | result is `false`      | text (default `"false"`)        |
//! | float    | `must_f64`       | result is `0.0`        | text (default `"0.0"`)          |
//! | time     | text with format | parse failure          | field left unchanged            |
//!
//! ```rust
//! use serde_lenient::coerce::{coerce_bool, coerce_string, coerce_unsigned};
//! use serde_lenient::Value;
//!
//! assert_eq!(coerce_unsigned(&Value::from("17")), 17);
//! assert!(coerce_bool(&Value::from("true")));
//! assert_eq!(coerce_string(&Value::from(42u64)).as_deref(), Some("42"));
//! assert_eq!(coerce_string(&Value::from(-1i64)), None);
//! ```

use crate::diagnostics::Diagnostic;
use crate::record::Slot;
use crate::{DecodeOptions, Value};
use chrono::{DateTime, Duration, Local, LocalResult, NaiveDateTime, TimeZone};
use std::num::IntErrorKind;

/// What happened to one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coercion {
    Written,
    /// Nothing written and nothing reported.
    Unchanged,
    /// Nothing written; a diagnostic went to the sink.
    Diagnosed,
}

/// Coerces `value` into `slot`, reporting through `options.sink` when the
/// field cannot be written. `key` is the JSON key the field matched.
pub fn coerce(value: &Value, slot: Slot<'_>, key: &str, options: &DecodeOptions) -> Coercion {
    match slot {
        Slot::Unsigned(field) => {
            field.set_u64(coerce_unsigned(value));
            Coercion::Written
        }
        Slot::Signed(field) => {
            field.set_i64(coerce_signed(value));
            Coercion::Written
        }
        Slot::Float(field) => {
            field.set_f64(coerce_float(value));
            Coercion::Written
        }
        Slot::Bool(field) => {
            *field = coerce_bool(value);
            Coercion::Written
        }
        Slot::String(field) => match coerce_string(value) {
            Some(text) => {
                *field = text;
                Coercion::Written
            }
            None => {
                options.report(Diagnostic::UnresolvedString {
                    key: key.to_string(),
                    value: value.to_string(),
                });
                Coercion::Diagnosed
            }
        },
        Slot::Time(field) => match coerce_time(value, &options.time_format) {
            Some(time) => {
                *field = time;
                Coercion::Written
            }
            None if options.report_time_failures => {
                options.report(Diagnostic::TimeParse {
                    key: key.to_string(),
                    value: value.to_string(),
                });
                Coercion::Diagnosed
            }
            None => Coercion::Unchanged,
        },
        Slot::Unrecognized { type_name } => {
            options.report(Diagnostic::UnsupportedKind {
                key: key.to_string(),
                type_name,
                value: value.to_string(),
            });
            Coercion::Diagnosed
        }
        Slot::ReadOnly => Coercion::Unchanged,
    }
}

#[must_use]
pub fn coerce_unsigned(value: &Value) -> u64 {
    match value.must_u64() {
        0 => parse_unsigned(value.must_str_or("0")),
        n => n,
    }
}

#[must_use]
pub fn coerce_signed(value: &Value) -> i64 {
    match value.must_i64() {
        0 => parse_signed(value.must_str_or("0")),
        n => n,
    }
}

#[must_use]
pub fn coerce_float(value: &Value) -> f64 {
    let n = value.must_f64();
    if n == 0.0 {
        parse_float(value.must_str_or("0.0"))
    } else {
        n
    }
}

#[must_use]
pub fn coerce_bool(value: &Value) -> bool {
    value.must_bool() || parse_bool(value.must_str_or("false"))
}

/// Text as-is, or an unsigned integer in decimal. `None` for anything else.
#[must_use]
pub fn coerce_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::to_string)
        .or_else(|| value.as_u64().map(|n| n.to_string()))
}

/// Parses the value's text as local wall-clock time.
///
/// An ambiguous local time resolves to the earlier instant. A time skipped by
/// a forward transition moves past it by the length of the gap, so
/// `02:30` on a spring-forward night becomes `03:30`.
#[must_use]
pub fn coerce_time(value: &Value, format: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(value.must_str_or(""), format).ok()?;
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(time) => Some(time),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => past_gap(&naive),
    }
}

/// Reads a skipped wall-clock time with the offset in force a day earlier.
fn past_gap(naive: &NaiveDateTime) -> Option<DateTime<Local>> {
    let before = naive.checked_sub_signed(Duration::days(1))?;
    let offset = Local.offset_from_local_datetime(&before).earliest()?;
    let utc = naive.checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))?;
    Some(Local.from_utc_datetime(&utc))
}

/// Base-10 unsigned parse. Out-of-range text saturates to `u64::MAX`; any
/// other failure is `0`.
#[must_use]
pub fn parse_unsigned(text: &str) -> u64 {
    // No sign of any kind on unsigned text.
    if text.starts_with('+') {
        return 0;
    }
    match text.parse::<u64>() {
        Ok(n) => n,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => u64::MAX,
        Err(_) => 0,
    }
}

/// Base-10 signed parse. Out-of-range text saturates to `i64::MAX` or
/// `i64::MIN`; any other failure is `0`.
#[must_use]
pub fn parse_signed(text: &str) -> i64 {
    match text.parse::<i64>() {
        Ok(n) => n,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}

#[must_use]
pub fn parse_float(text: &str) -> f64 {
    text.parse::<f64>().unwrap_or(0.0)
}

#[must_use]
pub fn parse_bool(text: &str) -> bool {
    matches!(text, "1" | "t" | "T" | "TRUE" | "true" | "True")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CollectingSink;
    use std::sync::Arc;

    fn json(text: &str) -> Value {
        Value::from_slice(text.as_bytes()).unwrap()
    }

    fn collecting() -> (Arc<CollectingSink>, DecodeOptions) {
        let sink = Arc::new(CollectingSink::new());
        let options = DecodeOptions::new().with_sink(sink.clone());
        (sink, options)
    }

    #[test]
    fn test_unsigned() {
        assert_eq!(coerce_unsigned(&json("42")), 42);
        assert_eq!(coerce_unsigned(&json(r#""17""#)), 17);
        assert_eq!(coerce_unsigned(&json("0")), 0);
        assert_eq!(coerce_unsigned(&json("-5")), 0);
        assert_eq!(coerce_unsigned(&json("3.5")), 0);
        assert_eq!(coerce_unsigned(&json(r#""+5""#)), 0);
        assert_eq!(coerce_unsigned(&json(r#""abc""#)), 0);
        assert_eq!(coerce_unsigned(&json(r#""99999999999999999999""#)), u64::MAX);
        assert_eq!(coerce_unsigned(&json("true")), 0);
    }

    #[test]
    fn test_signed() {
        assert_eq!(coerce_signed(&json("-42")), -42);
        assert_eq!(coerce_signed(&json(r#""-17""#)), -17);
        assert_eq!(coerce_signed(&json(r#""+17""#)), 17);
        assert_eq!(coerce_signed(&json("18446744073709551615")), 0);
        assert_eq!(coerce_signed(&json(r#""-99999999999999999999""#)), i64::MIN);
        assert_eq!(coerce_signed(&json(r#""99999999999999999999""#)), i64::MAX);
    }

    #[test]
    fn test_float() {
        assert_eq!(coerce_float(&json("2.5")), 2.5);
        assert_eq!(coerce_float(&json("7")), 7.0);
        assert_eq!(coerce_float(&json(r#""2.5""#)), 2.5);
        assert_eq!(coerce_float(&json(r#""1e3""#)), 1000.0);
        assert_eq!(coerce_float(&json(r#""x""#)), 0.0);
        assert!(coerce_float(&json(r#""inf""#)).is_infinite());
    }

    #[test]
    fn test_bool() {
        assert!(coerce_bool(&json("true")));
        assert!(!coerce_bool(&json("false")));
        for text in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(coerce_bool(&Value::from(text)), "{text}");
        }
        for text in ["0", "f", "no", "yes", ""] {
            assert!(!coerce_bool(&Value::from(text)), "{text}");
        }
        assert!(!coerce_bool(&json("1")));
    }

    #[test]
    fn test_string_fallback_is_unsigned_only() {
        assert_eq!(coerce_string(&json(r#""hi""#)).as_deref(), Some("hi"));
        assert_eq!(coerce_string(&json("123")).as_deref(), Some("123"));
        assert_eq!(coerce_string(&json("-1")), None);
        assert_eq!(coerce_string(&json("1.5")), None);
        assert_eq!(coerce_string(&json("true")), None);
        assert_eq!(coerce_string(&json("null")), None);
    }

    #[test]
    fn test_time_in_local_zone() {
        let expected = Local
            .from_local_datetime(
                &NaiveDateTime::parse_from_str("2021-03-05 10:00:00", "%Y-%m-%d %H:%M:%S")
                    .unwrap(),
            )
            .earliest();
        let parsed = coerce_time(&json(r#""2021-03-05 10:00:00""#), "%Y-%m-%d %H:%M:%S");
        assert!(parsed.is_some());
        assert_eq!(parsed, expected);
        assert_eq!(coerce_time(&json(r#""not-a-date""#), "%Y-%m-%d %H:%M:%S"), None);
        assert_eq!(coerce_time(&json("1614938400"), "%Y-%m-%d %H:%M:%S"), None);
    }

    #[test]
    fn test_unresolved_string_keeps_value_and_reports() {
        let (sink, options) = collecting();
        let mut field = "kept".to_string();
        let outcome = coerce(&json("[1,2]"), Slot::String(&mut field), "name", &options);
        assert_eq!(outcome, Coercion::Diagnosed);
        assert_eq!(field, "kept");
        assert_eq!(
            sink.diagnostics(),
            [Diagnostic::UnresolvedString {
                key: "name".to_string(),
                value: "[1,2]".to_string(),
            }]
        );
    }

    #[test]
    fn test_time_failure_is_silent_by_default() {
        let (sink, options) = collecting();
        let mut field = DateTime::<Local>::default();
        let outcome = coerce(&json(r#""junk""#), Slot::Time(&mut field), "at", &options);
        assert_eq!(outcome, Coercion::Unchanged);
        assert_eq!(field, DateTime::<Local>::default());
        assert!(sink.is_empty());

        let options = options.with_time_failure_reports(true);
        let outcome = coerce(&json(r#""junk""#), Slot::Time(&mut field), "at", &options);
        assert_eq!(outcome, Coercion::Diagnosed);
        assert_eq!(sink.keys(), ["at"]);
    }

    #[test]
    fn test_unrecognized_reports_type() {
        let (sink, options) = collecting();
        let slot = Slot::Unrecognized {
            type_name: "alloc::vec::Vec<u8>",
        };
        assert_eq!(coerce(&json("[1]"), slot, "bytes", &options), Coercion::Diagnosed);
        let diagnostics = sink.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].field_type(), "alloc::vec::Vec<u8>");
        assert_eq!(diagnostics[0].value(), "[1]");
    }

    #[test]
    fn test_custom_time_format() {
        let (_, options) = collecting();
        let options = options.with_time_format("%d/%m/%Y %H:%M");
        let mut field = DateTime::<Local>::default();
        let outcome = coerce(&json(r#""05/03/2021 10:00""#), Slot::Time(&mut field), "at", &options);
        assert_eq!(outcome, Coercion::Written);
        assert_eq!(field.format("%Y-%m-%d %H:%M").to_string(), "2021-03-05 10:00");
    }
}
