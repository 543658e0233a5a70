//! Console input: prompting and pre-validation of raw strings.
//!
//! Everything past the prompt helper is a pure function, validated here
//! before the services ever see the value. The services re-check the
//! semantic ranges; these helpers only keep garbage out of the happy path.

use std::io::{self, Write};

/// Minimum id length accepted at registration.
pub const MIN_ID_LEN: usize = 3;

/// Prints `message` and reads one trimmed line from stdin.
pub fn prompt(message: &str) -> String {
    print!("{message}");
    let _ = io::stdout().flush();

    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

/// Whether `id` is an acceptable account id: alphanumeric, at least
/// [`MIN_ID_LEN`] characters.
pub fn is_valid_id(id: &str) -> bool {
    id.chars().count() >= MIN_ID_LEN && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Parses a non-negative integer.
pub fn parse_u32(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

/// Parses a strictly positive integer.
pub fn parse_positive_u32(input: &str) -> Option<u32> {
    match parse_u32(input) {
        Some(n) if n > 0 => Some(n),
        _ => None,
    }
}

/// Parses a strictly positive, finite amount of money.
pub fn parse_positive_amount(input: &str) -> Option<f64> {
    match input.trim().parse::<f64>() {
        Ok(v) if v > 0.0 && v.is_finite() => Some(v),
        _ => None,
    }
}
