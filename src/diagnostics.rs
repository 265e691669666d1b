//! Non-fatal diagnostics raised while populating fields.
//!
//! A field that cannot be coerced does not fail the decode. Instead a
//! [`Diagnostic`] goes to the [`DiagnosticSink`] configured on
//! [`DecodeOptions`](crate::DecodeOptions). The default sink,
//! [`TracingSink`], logs at error level through `tracing`. Tests and callers
//! that want to inspect the outcome can install a [`CollectingSink`] or any
//! `Fn(&Diagnostic)` closure.
//!
//! ```rust
//! use serde_lenient::{record, CollectingSink, DecodeOptions, Decoder};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Tagged {
//!     tags: Vec<String>,
//! }
//! record!(Tagged { tags });
//!
//! let sink = Arc::new(CollectingSink::new());
//! let decoder = Decoder::new(DecodeOptions::new().with_sink(sink.clone()));
//!
//! let mut tagged = Tagged::default();
//! decoder.decode_into_one(br#"{"tags": ["a"]}"#, &mut tagged).unwrap();
//!
//! assert_eq!(sink.keys(), ["tags"]);
//! ```

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Something the decoder could not do for one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// The field's type has no coercion rule.
    UnsupportedKind {
        key: String,
        type_name: &'static str,
        value: String,
    },
    /// A string field received a value that is neither text nor an
    /// unsigned integer.
    UnresolvedString { key: String, value: String },
    /// A time field received text that does not match the time format.
    /// Only raised when time failure reports are enabled.
    TimeParse { key: String, value: String },
}

impl Diagnostic {
    /// The JSON key the field was matched under.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Diagnostic::UnsupportedKind { key, .. }
            | Diagnostic::UnresolvedString { key, .. }
            | Diagnostic::TimeParse { key, .. } => key,
        }
    }

    /// The offending JSON value, rendered compactly.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Diagnostic::UnsupportedKind { value, .. }
            | Diagnostic::UnresolvedString { value, .. }
            | Diagnostic::TimeParse { value, .. } => value,
        }
    }

    /// The declared type of the field.
    #[must_use]
    pub fn field_type(&self) -> &str {
        match self {
            Diagnostic::UnsupportedKind { type_name, .. } => type_name,
            Diagnostic::UnresolvedString { .. } => "string",
            Diagnostic::TimeParse { .. } => "time",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnsupportedKind { .. } => write!(
                f,
                "no coercion for field `{}` of type {}: {}",
                self.key(),
                self.field_type(),
                self.value()
            ),
            Diagnostic::UnresolvedString { .. } => write!(
                f,
                "string field `{}` got a non-text value: {}",
                self.key(),
                self.value()
            ),
            Diagnostic::TimeParse { .. } => write!(
                f,
                "time field `{}` does not match the time format: {}",
                self.key(),
                self.value()
            ),
        }
    }
}

/// Receives diagnostics from a decode pass.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Logs every diagnostic as a `tracing` error event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        tracing::error!(
            target: "serde_lenient",
            key = diagnostic.key(),
            field_type = diagnostic.field_type(),
            value = diagnostic.value(),
            "{}",
            diagnostic
        );
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything reported so far.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Keys of the reported fields, in report order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.lock().iter().map(|d| d.key().to_string()).collect()
    }

    /// Drains the collected diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.lock().push(diagnostic.clone());
    }
}
