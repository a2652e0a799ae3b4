// Duration parsing for command-line flags
//
// Accepts "500ms", "4s", "1.5s" and "2m". A bare number is read as seconds.

use anyhow::{Result, bail};
use std::time::Duration;

/// Parse a duration string into a Duration
///
/// # Examples
/// ```ignore
/// assert_eq!(parse_duration("500ms")?, Duration::from_millis(500));
/// assert_eq!(parse_duration("4s")?, Duration::from_secs(4));
/// assert_eq!(parse_duration("1.5s")?, Duration::from_millis(1500));
/// ```
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    if let Some(value_str) = s.strip_suffix("ms") {
        let ms: u64 = value_str.trim().parse()?;
        return Ok(Duration::from_millis(ms));
    }

    if let Some(value_str) = s.strip_suffix('m') {
        let minutes = parse_fraction(value_str)?;
        return Ok(Duration::try_from_secs_f64(minutes * 60.0)?);
    }

    let seconds = parse_fraction(s.strip_suffix('s').unwrap_or(s))?;
    Ok(Duration::try_from_secs_f64(seconds)?)
}

/// Parse a timeout flag value, rejecting zero
///
/// Used as a clap `value_parser`, hence the `String` error type.
pub fn parse_timeout(s: &str) -> std::result::Result<Duration, String> {
    match parse_duration(s) {
        Ok(d) if d.is_zero() => Err("timeout must be greater than zero".to_string()),
        Ok(d) => Ok(d),
        Err(e) => Err(format!("invalid duration '{}': {}", s, e)),
    }
}

fn parse_fraction(value: &str) -> Result<f64> {
    let value: f64 = value.trim().parse()?;
    if !value.is_finite() || value < 0.0 {
        bail!("duration must be a non-negative number");
    }
    Ok(value)
}
