//! Seeing which fields could not be coerced.
//!
//! Run with: RUST_LOG=serde_lenient=debug cargo run --example diagnostics

use chrono::{DateTime, Local};
use serde_lenient::{
    decode_into_one, decode_into_one_with_options, record, CollectingSink, DecodeOptions,
};
use std::error::Error;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Event {
    id: u64,
    title: String,
    tags: Vec<String>,
    starts_at: DateTime<Local>,
}

record!(Event {
    id,
    title,
    tags,
    starts_at,
});

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let body = br#"{"id": "7", "title": ["not", "text"], "tags": ["a"], "starts_at": "tomorrow"}"#;

    // Default sink: diagnostics are logged through tracing.
    let mut event = Event::default();
    decode_into_one(body, &mut event)?;
    println!("decoded: {:?}", event);

    // Collecting sink, with time failures reported too.
    let sink = Arc::new(CollectingSink::new());
    let options = DecodeOptions::new()
        .with_sink(sink.clone())
        .with_time_failure_reports(true);
    let mut event = Event::default();
    decode_into_one_with_options(body, &mut event, options)?;

    for diagnostic in sink.diagnostics() {
        println!("degraded: {}", diagnostic);
    }

    Ok(())
}
