//! Local-time resolution around DST transitions.
//!
//! The zone comes from `TZ`, which is process-wide, so everything that depends
//! on it lives in the single test below.

use chrono::{DateTime, Local};
use serde_lenient::{decode_into_one, record};

#[derive(Default, Debug)]
struct Visit {
    at: DateTime<Local>,
}

record!(Visit { at });

fn decode_at(text: &str) -> String {
    let mut visit = Visit::default();
    let body = format!(r#"{{"at": "{text}"}}"#);
    decode_into_one(body.as_bytes(), &mut visit).unwrap();
    visit.at.to_rfc3339()
}

#[test]
fn test_transitions_in_new_york_rules() {
    // POSIX rule string, so no zoneinfo database is needed.
    std::env::set_var("TZ", "EST5EDT,M3.2.0,M11.1.0");

    assert_eq!(decode_at("2021-03-05 10:00:00"), "2021-03-05T10:00:00-05:00");
    assert_eq!(decode_at("2021-07-01 12:00:00"), "2021-07-01T12:00:00-04:00");

    // Skipped by spring-forward: moves past the gap.
    assert_eq!(decode_at("2021-03-14 02:30:00"), "2021-03-14T03:30:00-04:00");
    assert_eq!(decode_at("2021-03-14 02:00:00"), "2021-03-14T03:00:00-04:00");

    // Repeated by fall-back: the earlier instant.
    assert_eq!(decode_at("2021-11-07 01:30:00"), "2021-11-07T01:30:00-04:00");
}
