//! Wait-duration literals in route files.
//!
//! Route files mark an explicit wait with a duration literal such as `90m`
//! or `1h30m`. The grammar is a signed sequence of `<decimal><unit>` groups:
//!
//! - units: `h`, `m`, `s`, `ms`, `us` (or `µs`), `ns`
//! - decimals may have a fractional part: `1.5h`
//! - the bare literal `0` is zero
//!
//! Anything that does not parse is not a wait, and route loading treats it as
//! a station name instead.

use chrono::Duration;

/// Error returned when a string is not a wait-duration literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid wait duration {input:?}: {reason}")]
pub struct InvalidWait {
    input: String,
    reason: &'static str,
}

impl InvalidWait {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

const NANOS_PER_MICRO: f64 = 1e3;
const NANOS_PER_MILLI: f64 = 1e6;
const NANOS_PER_SEC: f64 = 1e9;
const NANOS_PER_MIN: f64 = 60.0 * NANOS_PER_SEC;
const NANOS_PER_HOUR: f64 = 60.0 * NANOS_PER_MIN;

/// Parse a wait-duration literal.
///
/// # Examples
///
/// ```
/// use bahn_route::domain::parse_wait;
/// use chrono::Duration;
///
/// assert_eq!(parse_wait("90m").unwrap(), Duration::minutes(90));
/// assert_eq!(parse_wait("1h30m").unwrap(), Duration::minutes(90));
/// assert_eq!(parse_wait("1.5h").unwrap(), Duration::minutes(90));
/// assert_eq!(parse_wait("0").unwrap(), Duration::zero());
///
/// assert!(parse_wait("Hbf").is_err());
/// assert!(parse_wait("90").is_err());
/// assert!(parse_wait("").is_err());
/// ```
pub fn parse_wait(s: &str) -> Result<Duration, InvalidWait> {
    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    if body == "0" {
        return Ok(Duration::zero());
    }
    if body.is_empty() {
        return Err(InvalidWait::new(s, "empty"));
    }

    let mut total_nanos = 0.0_f64;
    let mut rest = body;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| InvalidWait::new(s, "missing unit"))?;
        if number_len == 0 {
            return Err(InvalidWait::new(s, "expected a number"));
        }

        let number = &rest[..number_len];
        if number == "." || number.matches('.').count() > 1 {
            return Err(InvalidWait::new(s, "malformed number"));
        }
        let value: f64 = number
            .parse()
            .map_err(|_| InvalidWait::new(s, "malformed number"))?;

        rest = &rest[number_len..];
        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_len] {
            "h" => NANOS_PER_HOUR,
            "m" => NANOS_PER_MIN,
            "s" => NANOS_PER_SEC,
            "ms" => NANOS_PER_MILLI,
            "us" | "µs" | "μs" => NANOS_PER_MICRO,
            "ns" => 1.0,
            "" => return Err(InvalidWait::new(s, "missing unit")),
            _ => return Err(InvalidWait::new(s, "unknown unit")),
        };
        rest = &rest[unit_len..];

        total_nanos += value * scale;
    }

    if !total_nanos.is_finite() || total_nanos > i64::MAX as f64 {
        return Err(InvalidWait::new(s, "out of range"));
    }

    let nanos = total_nanos.round() as i64;
    Ok(Duration::nanoseconds(if negative { -nanos } else { nanos }))
}
