//! Error types for lenient decoding.
//!
//! Only structural problems are errors. A target of the wrong shape or bytes
//! that are not JSON abort the whole call before any field is written.
//! Everything else (missing keys, unsupported field kinds, text that will not
//! coerce) degrades per field and is reported through a
//! [`DiagnosticSink`](crate::DiagnosticSink) instead.
//!
//! ## Error Categories
//!
//! - **Invalid targets**: nil indirections, scalars, or non-record targets
//! - **Syntax errors**: malformed JSON, with line/column information
//! - **I/O errors**: failures reading from an `io::Read` source
//!
//! ## Examples
//!
//! ```rust
//! use serde_lenient::{decode_into_one, Error};
//!
//! let mut count = 0u64;
//! let err = decode_into_one(br#"{"n": 1}"#, &mut count).unwrap_err();
//! assert!(err.is_invalid_target());
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error while reading the input
    #[error("IO error: {0}")]
    Io(String),

    /// The input is not a well-formed JSON document
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// The target cannot receive a decoded document
    #[error("Invalid decode target `{type_name}`: {fault}")]
    InvalidTarget {
        type_name: &'static str,
        fault: TargetFault,
    },
}

/// Why a target was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFault {
    /// The target is an empty indirection (`None`).
    Nil,
    /// The target is a scalar rather than a reference to a sequence or record.
    NotAPointer,
    /// A single record was required.
    NotARecord,
}

impl fmt::Display for TargetFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TargetFault::Nil => "target is nil",
            TargetFault::NotAPointer => "target must point to a sequence or a record",
            TargetFault::NotARecord => "target must be a record",
        })
    }
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// ```rust
    /// use serde_lenient::Error;
    ///
    /// let err = Error::syntax(1, 5, "EOF while parsing a value");
    /// assert!(err.to_string().contains("line 1"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an invalid target error.
    pub fn invalid_target(type_name: &'static str, fault: TargetFault) -> Self {
        Error::InvalidTarget { type_name, fault }
    }

    /// Creates an I/O error for reader failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for malformed JSON input.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. })
    }

    /// Returns `true` when the target shape was rejected.
    #[must_use]
    pub const fn is_invalid_target(&self) -> bool {
        matches!(self, Error::InvalidTarget { .. })
    }

    /// The target fault, if this is an invalid target error.
    #[must_use]
    pub const fn target_fault(&self) -> Option<TargetFault> {
        match self {
            Error::InvalidTarget { fault, .. } => Some(*fault),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        // serde_json appends " at line X column Y"; keep only the reason.
        let full = err.to_string();
        let msg = full
            .rsplit_once(" at line ")
            .map_or(full.as_str(), |(reason, _)| reason);
        Error::syntax(err.line(), err.column(), msg)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
