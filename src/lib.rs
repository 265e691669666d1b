//! # serde_lenient
//!
//! A lenient JSON-to-record decoder.
//!
//! Upstream producers are not always careful about types: the same field can
//! arrive as `17` or `"17"`, `true` or `"true"`, and timestamps often come as
//! formatted text. `serde_lenient` populates a target record from such a
//! document by matching JSON keys to field names (or explicit aliases) and
//! coercing across those representation boundaries instead of failing.
//!
//! ## Key Features
//!
//! - **Best effort per field**: missing keys and uncoercible values leave the
//!   field as it was; only a bad target or malformed JSON fails the call
//! - **Aliases**: a field can be matched under a different key than its name
//! - **Fallback coercion**: a zero-looking native value is re-read from its text
//! - **Local timestamps**: `%Y-%m-%d %H:%M:%S` text becomes `DateTime<Local>`
//! - **Injectable diagnostics**: degraded fields are reported to a sink
//!   (logged through `tracing` by default)
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{DateTime, Local};
//! use serde_lenient::{decode_into_one, record};
//!
//! #[derive(Default, Debug)]
//! struct User {
//!     user_id: u64,
//!     name: String,
//!     active: bool,
//!     score: f64,
//!     joined: DateTime<Local>,
//! }
//!
//! record!(User {
//!     user_id => "uid",
//!     name,
//!     active,
//!     score,
//!     joined,
//! });
//!
//! let body = br#"{
//!     "uid": "42",
//!     "name": "Alice",
//!     "active": "true",
//!     "score": "9.5",
//!     "joined": "2021-03-05 10:00:00"
//! }"#;
//!
//! let mut user = User::default();
//! decode_into_one(body, &mut user).unwrap();
//!
//! assert_eq!(user.user_id, 42);
//! assert!(user.active);
//! assert_eq!(user.score, 9.5);
//! assert_eq!(user.joined.format("%Y-%m-%d %H:%M:%S").to_string(), "2021-03-05 10:00:00");
//! ```
//!
//! ### Sequences
//!
//! ```rust
//! use serde_lenient::{decode_into_sequence, record};
//!
//! #[derive(Default)]
//! struct Point { x: i32, y: i32 }
//! record!(Point { x, y });
//!
//! let mut points = vec![Point::default(), Point::default()];
//! decode_into_sequence(br#"[{"x": 1, "y": "-2"}, {"x": "3", "y": 4}]"#, &mut points).unwrap();
//! assert_eq!((points[1].x, points[0].y), (3, -2));
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics in the public API
//! - A target is borrowed mutably for the whole call, so the same record can
//!   never be decoded into from two threads at once

pub mod coerce;
pub mod de;
pub mod diagnostics;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod record;
pub mod value;

pub use de::Decoder;
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use error::{Error, Result, TargetFault};
pub use map::Map;
pub use options::{DecodeOptions, DEFAULT_TIME_FORMAT};
pub use record::{
    Decodable, Field, FieldKind, FieldValue, FloatField, Record, Sequence, Shape, SignedField,
    Slot, UnsignedField,
};
pub use value::{Number, Value};

use std::io;

/// Parses bytes into a [`Value`] tree.
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the bytes are not a JSON document.
pub fn parse(bytes: &[u8]) -> Result<Value> {
    Value::from_slice(bytes)
}

/// Decodes a JSON object into a single record.
///
/// # Examples
///
/// ```rust
/// use serde_lenient::{decode_into_one, record};
///
/// #[derive(Default)]
/// struct Point { x: i32, y: i32 }
/// record!(Point { x, y });
///
/// let mut point = Point::default();
/// decode_into_one(br#"{"x": "1", "y": 2}"#, &mut point).unwrap();
/// assert_eq!((point.x, point.y), (1, 2));
/// ```
///
/// # Errors
///
/// Returns an error if `target` is not a record or `bytes` is not JSON.
pub fn decode_into_one<T>(bytes: &[u8], target: &mut T) -> Result<()>
where
    T: Decodable + ?Sized,
{
    decode_into_one_with_options(bytes, target, DecodeOptions::default())
}

/// Decodes a JSON object into a single record with custom options.
///
/// # Errors
///
/// Returns an error if `target` is not a record or `bytes` is not JSON.
pub fn decode_into_one_with_options<T>(
    bytes: &[u8],
    target: &mut T,
    options: DecodeOptions,
) -> Result<()>
where
    T: Decodable + ?Sized,
{
    Decoder::new(options).decode_into_one(bytes, target)
}

/// Decodes a JSON string into a single record.
///
/// # Errors
///
/// Returns an error if `target` is not a record or `s` is not JSON.
pub fn decode_str_into_one<T>(s: &str, target: &mut T) -> Result<()>
where
    T: Decodable + ?Sized,
{
    decode_into_one(s.as_bytes(), target)
}

/// Decodes a JSON array into a pre-sized sequence of records, or a JSON
/// object into a single record.
///
/// # Examples
///
/// ```rust
/// use serde_lenient::{decode_into_sequence, record, TargetFault};
///
/// #[derive(Default)]
/// struct Point { x: i32, y: i32 }
/// record!(Point { x, y });
///
/// let mut none: Option<Vec<Point>> = None;
/// let err = decode_into_sequence(b"[]", &mut none).unwrap_err();
/// assert_eq!(err.target_fault(), Some(TargetFault::Nil));
/// ```
///
/// # Errors
///
/// Returns an error if `target` is nil or a scalar, or `bytes` is not JSON.
pub fn decode_into_sequence<T>(bytes: &[u8], target: &mut T) -> Result<()>
where
    T: Decodable + ?Sized,
{
    decode_into_sequence_with_options(bytes, target, DecodeOptions::default())
}

/// Decodes into a sequence of records with custom options.
///
/// # Errors
///
/// Returns an error if `target` is nil or a scalar, or `bytes` is not JSON.
pub fn decode_into_sequence_with_options<T>(
    bytes: &[u8],
    target: &mut T,
    options: DecodeOptions,
) -> Result<()>
where
    T: Decodable + ?Sized,
{
    Decoder::new(options).decode_into_sequence(bytes, target)
}

/// Reads a JSON document from an I/O stream and decodes it into a sequence of
/// records.
///
/// ```rust
/// use serde_lenient::{decode_reader_into_sequence, record};
/// use std::io::Cursor;
///
/// #[derive(Default)]
/// struct Point { x: i32, y: i32 }
/// record!(Point { x, y });
///
/// let mut points = vec![Point::default()];
/// decode_reader_into_sequence(Cursor::new(br#"[{"x": 5}]"#), &mut points).unwrap();
/// assert_eq!(points[0].x, 5);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, `target` is nil or a scalar, or the
/// input is not JSON.
pub fn decode_reader_into_sequence<R, T>(mut reader: R, target: &mut T) -> Result<()>
where
    R: io::Read,
    T: Decodable + ?Sized,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    decode_into_sequence(&bytes, target)
}
