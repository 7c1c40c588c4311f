//! Output model: the retrieval result and its time series points.
//!
//! Serialized form:
//!
//! ```json
//! {"center": {"lat": .., "lon": ..},
//!  "bbox": {"min_lon": .., "max_lon": .., "min_lat": .., "max_lat": ..},
//!  "dataset_id": "..", "variables": [".."],
//!  "points": [{"time": "2024-01-15T00:00:00", "VHM0": 1.42, "zos": null}],
//!  "total_points": 1, "status": "success|hybrid|fallback", "note": ".."}
//! ```
//!
//! Numeric values can never serialize as NaN or Infinity: non-finite floats
//! are turned into `null` when a [`PointValue`] is built and again when it is
//! written out.

use chrono::NaiveDateTime;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::time::format_timestamp;
use crate::{BoundingBox, Coordinate, RegionConfig};

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// A single observed or synthesized value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointValue {
    Float(f64),
    Integer(i64),
}

impl PointValue {
    /// A float value, or `None` when the input is NaN or infinite.
    pub fn float(value: f64) -> Option<Self> {
        value.is_finite().then_some(PointValue::Float(value))
    }

    pub fn integer(value: i64) -> Self {
        PointValue::Integer(value)
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            PointValue::Float(v) => v,
            PointValue::Integer(v) => v as f64,
        }
    }
}

impl Serialize for PointValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            PointValue::Float(v) if v.is_finite() => serializer.serialize_f64(v),
            PointValue::Float(_) => serializer.serialize_none(),
            PointValue::Integer(v) => serializer.serialize_i64(v),
        }
    }
}

/// One timestamp with its per-variable values (`None` = missing).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub time: NaiveDateTime,
    values: BTreeMap<String, Option<PointValue>>,
}

impl TimeSeriesPoint {
    pub fn new(time: NaiveDateTime) -> Self {
        Self {
            time,
            values: BTreeMap::new(),
        }
    }

    /// Set a value; non-finite floats are stored as missing.
    pub fn set_float(&mut self, variable: impl Into<String>, value: Option<f64>) {
        self.values
            .insert(variable.into(), value.and_then(PointValue::float));
    }

    pub fn set_integer(&mut self, variable: impl Into<String>, value: i64) {
        self.values
            .insert(variable.into(), Some(PointValue::integer(value)));
    }

    pub fn set(&mut self, variable: impl Into<String>, value: Option<PointValue>) {
        let value = value.and_then(|v| match v {
            PointValue::Float(f) => PointValue::float(f),
            other => Some(other),
        });
        self.values.insert(variable.into(), value);
    }

    /// Builder-style [`set_float`](Self::set_float).
    pub fn with_float(mut self, variable: impl Into<String>, value: Option<f64>) -> Self {
        self.set_float(variable, value);
        self
    }

    /// `Some(None)` for a present-but-missing value, `None` for an absent variable.
    pub fn get(&self, variable: &str) -> Option<Option<PointValue>> {
        self.values.get(variable).copied()
    }

    /// Numeric reading of a present, non-missing value.
    pub fn get_f64(&self, variable: &str) -> Option<f64> {
        self.get(variable).flatten().map(|v| v.as_f64())
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.values.contains_key(variable)
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl Serialize for TimeSeriesPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("time", &format_timestamp(&self.time))?;
        for (name, value) in &self.values {
            if name == "time" {
                continue;
            }
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// How a result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalStatus {
    /// Produced by a single path without a failed attempt.
    Success,
    /// Real acquired values merged with synthetic backfill.
    Hybrid,
    /// Synthetic data after the real-data attempt failed.
    Fallback,
}

/// The document a run emits. Built once, then only read and serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalResult {
    center: Coordinate,
    bbox: BoundingBox,
    dataset_id: String,
    variables: Vec<String>,
    points: Vec<TimeSeriesPoint>,
    total_points: usize,
    status: RetrievalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl RetrievalResult {
    pub fn new(
        region: &RegionConfig,
        dataset_id: impl Into<String>,
        variables: Vec<String>,
        points: Vec<TimeSeriesPoint>,
        status: RetrievalStatus,
    ) -> Self {
        Self {
            center: region.center,
            bbox: region.bbox,
            dataset_id: dataset_id.into(),
            variables,
            total_points: points.len(),
            points,
            status,
            source: None,
            note: None,
        }
    }

    pub fn with_status(mut self, status: RetrievalStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn total_points(&self) -> usize {
        self.total_points
    }

    pub fn status(&self) -> RetrievalStatus {
        self.status
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}
