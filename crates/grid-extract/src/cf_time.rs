//! Decoding of CF-convention time coordinates.
//!
//! Grid files store time as offsets with a `units` attribute such as
//! `hours since 1950-01-01 00:00:00` or `seconds since 1970-01-01T00:00:00Z`.

use chrono::{Duration, NaiveDateTime};
use ocean_common::parse_timestamp;

use crate::error::{GridError, Result};

/// Offsets at or beyond this many milliseconds cannot be represented.
const MAX_OFFSET_MILLIS: f64 = i64::MAX as f64;

/// Decode raw offsets into timestamps using a CF `units` string.
pub fn decode_cf_time(values: &[f64], units: &str) -> Result<Vec<NaiveDateTime>> {
    let (unit, reference) = units
        .split_once(" since ")
        .ok_or_else(|| GridError::load(format!("unsupported time units '{}'", units)))?;

    let millis_per_unit = match unit.trim().to_ascii_lowercase().as_str() {
        "seconds" | "second" | "secs" | "sec" | "s" => 1_000.0,
        "minutes" | "minute" | "mins" | "min" => 60_000.0,
        "hours" | "hour" | "hrs" | "hr" | "h" => 3_600_000.0,
        "days" | "day" | "d" => 86_400_000.0,
        other => {
            return Err(GridError::load(format!(
                "unsupported time unit '{}' in '{}'",
                other, units
            )))
        }
    };

    let reference = reference.trim();
    let reference = reference.strip_suffix(" UTC").unwrap_or(reference);
    let epoch = parse_timestamp(reference)
        .map_err(|e| GridError::load(format!("bad time reference in '{}': {}", units, e)))?;

    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return Err(GridError::schema(format!("non-finite time value {}", v)));
            }
            let millis = (v * millis_per_unit).round();
            if millis.abs() >= MAX_OFFSET_MILLIS {
                return Err(GridError::load(format!("time value {} out of range", v)));
            }
            Duration::try_milliseconds(millis as i64)
                .and_then(|offset| epoch.checked_add_signed(offset))
                .ok_or_else(|| GridError::load(format!("time value {} out of range", v)))
        })
        .collect()
}
