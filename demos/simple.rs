//! Decoding loosely-typed JSON into records.
//!
//! Run with: cargo run --example simple

use chrono::{DateTime, Local};
use serde_lenient::{decode_into_sequence, record};
use std::error::Error;

#[derive(Debug, Default)]
struct User {
    id: u64,
    name: String,
    email: String,
    verified: bool,
    created_at: DateTime<Local>,
}

record!(User {
    id => "user_id",
    name,
    email,
    verified,
    created_at,
});

fn main() -> Result<(), Box<dyn Error>> {
    // Same shape, different upstream habits: quoted ids and booleans.
    let body = br#"[
        {"user_id": 42, "name": "Alice Johnson", "email": "alice@example.com",
         "verified": true, "created_at": "2021-03-05 10:00:00"},
        {"user_id": "43", "name": "Bob Smith", "email": "bob@example.com",
         "verified": "true", "created_at": "2022-11-20 08:30:00"}
    ]"#;

    let mut users: Vec<User> = (0..2).map(|_| User::default()).collect();
    decode_into_sequence(body, &mut users)?;

    for user in &users {
        println!(
            "{} <{}> id={} verified={} created={}",
            user.name,
            user.email,
            user.id,
            user.verified,
            user.created_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    Ok(())
}
