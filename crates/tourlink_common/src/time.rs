// --- File: crates/tourlink_common/src/time.rs ---
//! Parsing of event timestamps coming from booking forms.
//!
//! Browsers send either a full RFC 3339 timestamp or a naive
//! `YYYY-MM-DDTHH:MM[:SS]` value from a `datetime-local` input. Naive values
//! are read in the calendar's configured time zone.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use thiserror::Error;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("'{0}' is not an ISO 8601 timestamp")]
    Malformed(String),
    #[error("'{0}' does not exist in time zone {1}")]
    NonexistentLocalTime(String, String),
    #[error("unknown time zone '{0}'")]
    UnknownTimeZone(String),
}

/// Parses an IANA zone name such as `Asia/Kolkata`.
pub fn parse_time_zone(name: &str) -> Result<Tz, TimeParseError> {
    Tz::from_str(name).map_err(|_| TimeParseError::UnknownTimeZone(name.to_string()))
}

/// Parses an event timestamp into an absolute instant.
///
/// Timestamps carrying an offset keep their instant unchanged; naive ones
/// are placed in `tz`. During a DST fold the earlier instant is used.
pub fn parse_event_time(value: &str, tz: Tz) -> Result<DateTime<Utc>, TimeParseError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| TimeParseError::Malformed(value.to_string()))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| TimeParseError::NonexistentLocalTime(value.to_string(), tz.name().to_string()))
}
