use std::time::Duration;

use thiserror::Error;

/// Error returned for malformed interval strings.
#[derive(Debug, Error, PartialEq)]
pub enum IntervalParseError {
    #[error("Empty interval")]
    Empty,
    #[error("Invalid number in interval: {0}")]
    Number(String),
    #[error("Unknown interval unit in {0:?} (use ms, s, m or h)")]
    Unit(String),
}

/// Suffix to milliseconds multiplier (order matters: "ms" before "m" and "s")
const UNITS: &[(&str, f64)] = &[
    ("ms", 1.0),
    ("s", 1_000.0),
    ("m", 60_000.0),
    ("h", 3_600_000.0),
];

/// Parse interval strings like "10s", "500ms", "1.5m" or "2h".
///
/// A bare number is taken as seconds.
pub fn parse_interval(s: &str) -> Result<Duration, IntervalParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(IntervalParseError::Empty);
    }

    let (number, multiplier) = UNITS
        .iter()
        .find_map(|(suffix, multiplier)| s.strip_suffix(suffix).map(|n| (n, *multiplier)))
        .unwrap_or((s, 1_000.0));

    if number.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(IntervalParseError::Unit(s.to_string()));
    }

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| IntervalParseError::Number(s.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(IntervalParseError::Number(s.to_string()));
    }

    Ok(Duration::from_millis((value * multiplier).round() as u64))
}

/// Format an elapsed duration for the status bar ("4.2s", "3m 10s").
pub fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_interval("10s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_interval("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_interval("1.5m").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_interval("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_interval(" 5 ").unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_interval(""), Err(IntervalParseError::Empty));
        assert!(matches!(parse_interval("fast"), Err(IntervalParseError::Unit(_))));
        assert!(matches!(parse_interval("10d"), Err(IntervalParseError::Unit(_))));
        assert!(matches!(parse_interval("-1s"), Err(IntervalParseError::Number(_))));
        assert!(matches!(parse_interval("x.ys"), Err(IntervalParseError::Unit(_))));
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(4200)), "4.2s");
        assert_eq!(format_elapsed(Duration::from_secs(190)), "3m 10s");
        assert_eq!(format_elapsed(Duration::from_secs(3 * 3600 + 120)), "3h 2m");
    }
}
