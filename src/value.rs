//! Dynamic value representation for parsed JSON documents.
//!
//! This module provides the [`Value`] enum, the navigable tree a document is
//! parsed into once per decode call. The tree is never mutated after parsing;
//! the decoder only reads from it.
//!
//! ## Two-tier accessors
//!
//! Every scalar kind has two entry points:
//!
//! - **Strict** accessors (`as_u64`, `as_str`, ...) return `None` when the value
//!   is not of the requested kind.
//! - **Lenient** accessors (`must_u64`, `must_str_or`, ...) never fail and return
//!   a sentinel default (`0`, `false`, `0.0`, or a caller-supplied string).
//!
//! ```rust
//! use serde_lenient::Value;
//!
//! let value = Value::from_slice(br#"{"id": "17", "count": 3}"#).unwrap();
//!
//! let id = value.get("id").unwrap();
//! assert_eq!(id.as_u64(), None);
//! assert_eq!(id.must_u64(), 0);
//! assert_eq!(id.must_str_or("0"), "17");
//!
//! let count = value.get("count").unwrap();
//! assert_eq!(count.must_u64(), 3);
//! assert_eq!(count.must_str_or("0"), "0");
//! ```
//!
//! ### Navigation
//!
//! ```rust
//! use serde_lenient::Value;
//!
//! let value = Value::from_slice(br#"[{"name": "Alice"}]"#).unwrap();
//!
//! assert_eq!(value.index(0).get("name").and_then(Value::as_str), Some("Alice"));
//! // Past the end of the array there is no value, never a panic.
//! assert!(value.index(5).is_null());
//! ```

use crate::{Error, Map, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

static NULL: Value = Value::Null;

/// A dynamically-typed representation of any valid JSON value.
///
/// # Examples
///
/// ```rust
/// use serde_lenient::{Number, Value};
///
/// let null = Value::Null;
/// let num = Value::Number(Number::PosInt(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

/// A JSON number, keeping the category its literal was written in.
///
/// Integer literals stay integers (`PosInt` for non-negative, `NegInt` for
/// negative). Anything with a fraction or exponent, or an integer too large for
/// 64 bits, is a `Float`.
///
/// # Examples
///
/// ```rust
/// use serde_lenient::Number;
///
/// assert_eq!(Number::PosInt(42).as_u64(), Some(42));
/// assert_eq!(Number::NegInt(-1).as_u64(), None);
/// assert_eq!(Number::Float(3.0).as_i64(), None);
/// assert_eq!(Number::NegInt(-1).as_f64(), -1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    PosInt(u64),
    NegInt(i64),
    Float(f64),
}

impl Number {
    /// Returns the number as a `u64` if it is a non-negative integer.
    #[inline]
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Number::PosInt(u) => Some(*u),
            _ => None,
        }
    }

    /// Returns the number as an `i64` if it is an integer within range.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::PosInt(u) => i64::try_from(*u).ok(),
            Number::NegInt(i) => Some(*i),
            Number::Float(_) => None,
        }
    }

    /// Converts this number to an `f64`. Always succeeds.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::PosInt(u) => *u as f64,
            Number::NegInt(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::PosInt(u) => write!(f, "{}", u),
            Number::NegInt(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl Value {
    /// Parses the first JSON document from UTF-8 bytes.
    ///
    /// Nesting depth is not limited. Anything after the first complete value
    /// is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] if the bytes do not start with a complete
    /// JSON document.
    ///
    /// ```rust
    /// use serde_lenient::Value;
    ///
    /// assert!(Value::from_slice(br#"{"a":"#).unwrap_err().is_syntax());
    /// assert!(Value::from_slice(br#"{"a": 1} {"b": 2}"#).unwrap().get("b").is_none());
    /// ```
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let mut json = serde_json::Deserializer::from_slice(bytes);
        json.disable_recursion_limit();
        // Grows the stack on demand while the visitor recurses.
        let stacked = serde_stacker::Deserializer::new(&mut json);
        Value::deserialize(stacked).map_err(Error::from)
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Looks up `key` if this value is an object.
    ///
    /// Returns `None` both when the key is absent and when the value is not an
    /// object at all.
    ///
    /// ```rust
    /// use serde_lenient::Value;
    ///
    /// let value = Value::from_slice(br#"{"a": 1}"#).unwrap();
    /// assert!(value.get("a").is_some());
    /// assert!(value.get("b").is_none());
    /// assert!(Value::Null.get("a").is_none());
    /// ```
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(obj) => obj.get(key),
            _ => None,
        }
    }

    /// Returns the array element at `index`, or [`Value::Null`] when this is
    /// not an array or the index is out of range.
    #[inline]
    #[must_use]
    pub fn index(&self, index: usize) -> &Value {
        match self {
            Value::Array(arr) => arr.get(index).unwrap_or(&NULL),
            _ => &NULL,
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// ```rust
    /// use serde_lenient::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42u64).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a non-negative integer, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    /// If the value is an integer within `i64` range, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is any number, returns it as `f64`. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Lenient [`as_u64`](Self::as_u64): `0` when the value is not a
    /// non-negative integer.
    #[inline]
    #[must_use]
    pub fn must_u64(&self) -> u64 {
        self.as_u64().unwrap_or_default()
    }

    /// Lenient [`as_i64`](Self::as_i64): `0` when the value is not an integer.
    #[inline]
    #[must_use]
    pub fn must_i64(&self) -> i64 {
        self.as_i64().unwrap_or_default()
    }

    /// Lenient [`as_f64`](Self::as_f64): `0.0` when the value is not a number.
    #[inline]
    #[must_use]
    pub fn must_f64(&self) -> f64 {
        self.as_f64().unwrap_or_default()
    }

    /// Lenient [`as_bool`](Self::as_bool): `false` when the value is not a boolean.
    #[inline]
    #[must_use]
    pub fn must_bool(&self) -> bool {
        self.as_bool().unwrap_or_default()
    }

    /// Lenient [`as_str`](Self::as_str): `default` when the value is not a string.
    #[inline]
    #[must_use]
    pub fn must_str_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.as_str().unwrap_or(default)
    }
}

/// Renders compact JSON.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::PosInt(u)) => serializer.serialize_u64(*u),
            Value::Number(Number::NegInt(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E> {
                Ok(match u64::try_from(value) {
                    Ok(u) => Value::Number(Number::PosInt(u)),
                    Err(_) => Value::Number(Number::NegInt(value)),
                })
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E> {
                Ok(Value::Number(Number::PosInt(value)))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E> {
                Ok(Value::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                // Duplicate keys: the last occurrence wins.
                let mut values = Map::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(Number::PosInt(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        match u64::try_from(value) {
            Ok(u) => Value::Number(Number::PosInt(u)),
            Err(_) => Value::Number(Number::NegInt(value)),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}
