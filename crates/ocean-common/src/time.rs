//! Timestamp handling for requested windows and output points.
//!
//! Output timestamps are naive (no zone suffix) and second-truncated:
//! `YYYY-MM-DDTHH:MM:SS`. Inputs are more forgiving: a trailing `Z`, an
//! explicit offset, fractional seconds, a space separator or a bare date are
//! all accepted.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format used for every `time` field in serialized output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeParseError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),

    #[error("Empty time value")]
    Empty,
}

/// Parse an ISO-8601-like timestamp into a naive datetime.
///
/// Values with an explicit offset keep their wall-clock reading; a trailing
/// `Z` is dropped.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, TimeParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }

    let stripped = s.strip_suffix('Z').unwrap_or(s);

    for format in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(stripped, format) {
            return Ok(ndt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(stripped, "%Y-%m-%d") {
        if let Some(ndt) = date.and_hms_opt(0, 0, 0) {
            return Ok(ndt);
        }
    }

    Err(TimeParseError::InvalidFormat(s.to_string()))
}

/// Format a timestamp for output, dropping sub-second precision.
pub fn format_timestamp(t: &NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// A closed time interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Parse both ends; either failing fails the whole window.
    pub fn parse(start: &str, end: &str) -> Result<Self, TimeParseError> {
        Ok(Self {
            start: parse_timestamp(start)?,
            end: parse_timestamp(end)?,
        })
    }

    /// A window of `hours` beginning at `start`, cut at the last representable time.
    pub fn starting_at(start: NaiveDateTime, hours: i64) -> Self {
        let end = Duration::try_hours(hours)
            .and_then(|span| start.checked_add_signed(span))
            .unwrap_or(if hours < 0 { NaiveDateTime::MIN } else { NaiveDateTime::MAX });
        Self { start, end }
    }

    /// Signed duration in fractional hours (negative when end precedes start).
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 3_600_000.0
    }

    pub fn contains(&self, t: &NaiveDateTime) -> bool {
        t >= &self.start && t <= &self.end
    }
}
