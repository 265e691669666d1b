//! Configuration options for lenient decoding.
//!
//! ## Examples
//!
//! ```rust
//! use serde_lenient::{CollectingSink, DecodeOptions};
//! use std::sync::Arc;
//!
//! // Defaults: `%Y-%m-%d %H:%M:%S` in local time, silent time failures,
//! // diagnostics logged through `tracing`.
//! let options = DecodeOptions::new();
//! assert_eq!(options.time_format, "%Y-%m-%d %H:%M:%S");
//!
//! let options = DecodeOptions::new()
//!     .with_time_format("%d/%m/%Y %H:%M")
//!     .with_time_failure_reports(true)
//!     .with_sink(Arc::new(CollectingSink::new()));
//! assert!(options.report_time_failures);
//! ```

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use std::fmt;
use std::sync::Arc;

/// Layout time fields are parsed with unless configured otherwise.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration for a [`Decoder`](crate::Decoder).
#[derive(Clone)]
pub struct DecodeOptions {
    /// `chrono` format string for time fields, read as local wall-clock time.
    pub time_format: String,
    /// Report time fields whose text fails to parse. Off by default: such
    /// fields are left unchanged without a diagnostic.
    pub report_time_failures: bool,
    pub sink: Arc<dyn DiagnosticSink>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            report_time_failures: false,
            sink: Arc::new(TracingSink),
        }
    }
}

impl fmt::Debug for DecodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeOptions")
            .field("time_format", &self.time_format)
            .field("report_time_failures", &self.report_time_failures)
            .finish_non_exhaustive()
    }
}

impl DecodeOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `chrono` format string used for time fields.
    #[must_use]
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Enables or disables [`Diagnostic::TimeParse`] reports.
    #[must_use]
    pub fn with_time_failure_reports(mut self, enabled: bool) -> Self {
        self.report_time_failures = enabled;
        self
    }

    /// Routes diagnostics to `sink` instead of `tracing`.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub(crate) fn report(&self, diagnostic: Diagnostic) {
        self.sink.report(&diagnostic);
    }
}
