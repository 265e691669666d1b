//! Property-based tests for the coercion contract.
//!
//! Numbers written as JSON text must decode to the same value as the native
//! number, and short documents must never touch trailing records.

use proptest::prelude::*;
use serde_lenient::{decode_into_one, decode_into_sequence, record};

#[derive(Default, Debug, PartialEq, Clone)]
struct Reading {
    count: u64,
    delta: i64,
    ok: bool,
    label: String,
}

record!(Reading { count, delta, ok, label });

proptest! {
    #[test]
    fn prop_quoted_and_native_unsigned_agree(n in any::<u64>()) {
        let mut native = Reading::default();
        let mut quoted = Reading::default();
        decode_into_one(format!(r#"{{"count": {n}}}"#).as_bytes(), &mut native).unwrap();
        decode_into_one(format!(r#"{{"count": "{n}"}}"#).as_bytes(), &mut quoted).unwrap();
        prop_assert_eq!(native.count, n);
        prop_assert_eq!(quoted.count, n);
    }

    #[test]
    fn prop_quoted_and_native_signed_agree(n in any::<i64>()) {
        let mut native = Reading::default();
        let mut quoted = Reading::default();
        decode_into_one(format!(r#"{{"delta": {n}}}"#).as_bytes(), &mut native).unwrap();
        decode_into_one(format!(r#"{{"delta": "{n}"}}"#).as_bytes(), &mut quoted).unwrap();
        prop_assert_eq!(native.delta, n);
        prop_assert_eq!(quoted.delta, n);
    }

    #[test]
    fn prop_unsigned_into_string_field(n in any::<u64>()) {
        let mut reading = Reading::default();
        decode_into_one(format!(r#"{{"label": {n}}}"#).as_bytes(), &mut reading).unwrap();
        prop_assert_eq!(reading.label, n.to_string());
    }

    #[test]
    fn prop_bool_text(b in any::<bool>()) {
        let mut reading = Reading::default();
        decode_into_one(format!(r#"{{"ok": "{b}"}}"#).as_bytes(), &mut reading).unwrap();
        prop_assert_eq!(reading.ok, b);
    }

    #[test]
    fn prop_short_documents_leave_trailing_records(
        target_len in 0usize..8,
        counts in prop::collection::vec(1u64..1000, 0..8),
    ) {
        let body = format!(
            "[{}]",
            counts
                .iter()
                .map(|c| format!(r#"{{"count": {c}}}"#))
                .collect::<Vec<_>>()
                .join(",")
        );
        let mut readings = vec![Reading::default(); target_len];
        decode_into_sequence(body.as_bytes(), &mut readings).unwrap();

        prop_assert_eq!(readings.len(), target_len);
        for (i, reading) in readings.iter().enumerate() {
            let expected = counts.get(i).copied().unwrap_or_default();
            prop_assert_eq!(reading.count, expected);
        }
    }
}
