//! String-token parsing into typed field values.
//!
//! Every failure here is a checked [`LogParserError::StringParse`] naming the
//! field and the offending token, so callers can skip a single record rather
//! than abort a batch.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

use lw_errors::{LogParserError, LogParserResult};

/// Parse a raw token into `T` via its `FromStr` impl.
pub fn parse_field<T>(field: &str, raw: &str) -> LogParserResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse::<T>().map_err(|e| {
        LogParserError::string_parse(format!("field '{field}': cannot parse '{raw}': {e}"))
    })
}

/// Check a raw token against the pattern expected for its field.
///
/// Returns the first capture group when the pattern has one, otherwise the
/// whole match.
pub fn parse_matching<'a>(field: &str, raw: &'a str, pattern: &Regex) -> LogParserResult<&'a str> {
    let caps = pattern.captures(raw).ok_or_else(|| {
        LogParserError::string_parse(format!(
            "field '{field}': '{raw}' does not match pattern {}",
            pattern.as_str()
        ))
    })?;
    let m = caps.get(1).or_else(|| caps.get(0));
    Ok(m.map(|m| m.as_str()).unwrap_or(raw))
}

/// Parse a timestamp token.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS[.f]`
/// (assumed UTC), and epoch seconds.
pub fn parse_timestamp(field: &str, raw: &str) -> LogParserResult<DateTime<Utc>> {
    let s = raw.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
                .ok()
                .map(|ndt| ndt.and_utc())
        })
        .or_else(|| {
            s.parse::<f64>()
                .ok()
                .filter(|secs| secs.is_finite())
                .and_then(|secs| {
                    // The fraction is a forward offset from the floored second.
                    let whole = secs.floor();
                    let nanos = (((secs - whole) * 1e9) as u32).min(999_999_999);
                    DateTime::from_timestamp(whole as i64, nanos)
                })
        })
        .ok_or_else(|| {
            LogParserError::string_parse(format!("field '{field}': '{raw}' is not a timestamp"))
        })
}
