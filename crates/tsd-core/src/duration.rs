//! Textual duration parsing for xuple-space retention policies.
//!
//! Accepts a sequence of decimal numbers each followed by a unit, as in
//! `90s`, `1.5h` or `1h30m`. Recognized units are `ns`, `us` (or `µs`),
//! `ms`, `s`, `m`, `h`, plus the extended `d` (86 400 s) and `w`
//! (604 800 s). The empty string and a bare `0` mean zero.

use crate::text::sanitize;
use crate::{Error, Limits, Result};
use std::time::Duration;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

fn unit_nanos(unit: &str) -> Option<f64> {
    let nanos = match unit {
        "ns" => 1.0,
        "us" | "\u{b5}s" | "\u{3bc}s" => 1_000.0,
        "ms" => 1_000_000.0,
        "s" => NANOS_PER_SECOND,
        "m" => 60.0 * NANOS_PER_SECOND,
        "h" => 3_600.0 * NANOS_PER_SECOND,
        "d" => 86_400.0 * NANOS_PER_SECOND,
        "w" => 604_800.0 * NANOS_PER_SECOND,
        _ => return None,
    };
    Some(nanos)
}

fn invalid(input: &str) -> Error {
    Error::XupleSpacePolicy(format!(
        "invalid duration '{}'",
        sanitize(input, Limits::DEFAULT_MAX_MESSAGE_LENGTH)
    ))
}

/// Parses a textual duration.
///
/// # Errors
/// Returns `XupleSpacePolicy` for negative values, unknown units, missing
/// units and values that do not fit a [`Duration`].
pub fn parse_duration(input: &str) -> Result<Duration> {
    if input.is_empty() {
        return Ok(Duration::ZERO);
    }
    if input.starts_with('-') {
        return Err(Error::XupleSpacePolicy(format!(
            "negative duration '{}' is not allowed",
            sanitize(input, Limits::DEFAULT_MAX_MESSAGE_LENGTH)
        )));
    }

    let body = input.strip_prefix('+').unwrap_or(input);
    if body == "0" {
        return Ok(Duration::ZERO);
    }
    if body.is_empty() {
        return Err(invalid(input));
    }

    let mut total_nanos = 0.0_f64;
    let mut rest = body;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        if number.is_empty() || number == "." || number.matches('.').count() > 1 {
            return Err(invalid(input));
        }
        let value: f64 = number.parse().map_err(|_| invalid(input))?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, remaining) = tail.split_at(unit_len);
        let nanos = unit_nanos(unit).ok_or_else(|| invalid(input))?;

        total_nanos += value * nanos;
        rest = remaining;
    }

    Duration::try_from_secs_f64(total_nanos / NANOS_PER_SECOND).map_err(|_| invalid(input))
}

/// Converts a number of seconds into a [`Duration`].
///
/// # Errors
/// Returns `XupleSpacePolicy` for negative or non-finite values.
pub fn duration_from_seconds(seconds: f64) -> Result<Duration> {
    if seconds < 0.0 {
        return Err(Error::XupleSpacePolicy(format!(
            "negative duration {seconds}s is not allowed"
        )));
    }
    Duration::try_from_secs_f64(seconds)
        .map_err(|_| Error::XupleSpacePolicy(format!("invalid duration {seconds}s")))
}
