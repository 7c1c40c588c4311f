//! In-memory model of a gridded dataset.
//!
//! Coordinate axes and data variables are both addressed by name. A variable
//! stores its values flat in row-major order together with the names and
//! lengths of its dimensions, so the same logical variable can arrive as
//! `(time, latitude, longitude)` from one source and
//! `(time, depth, lon, lat)` from another.

use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use crate::error::{GridError, Result};

/// Values of a coordinate axis.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateAxis {
    /// Decoded timestamps.
    Time(Vec<NaiveDateTime>),
    /// Plain numeric coordinate (degrees, meters, ...).
    Numeric(Vec<f64>),
}

impl CoordinateAxis {
    pub fn len(&self) -> usize {
        match self {
            CoordinateAxis::Time(t) => t.len(),
            CoordinateAxis::Numeric(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A data variable indexed by named dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct GridVariable {
    dims: Vec<String>,
    shape: Vec<usize>,
    values: Vec<f64>,
}

impl GridVariable {
    /// Create a variable, checking that `values` fills `shape` exactly.
    pub fn new<S: AsRef<str>>(dims: &[S], shape: Vec<usize>, values: Vec<f64>) -> Result<Self> {
        if dims.len() != shape.len() {
            return Err(GridError::Shape(format!(
                "{} dimension names for {} dimension lengths",
                dims.len(),
                shape.len()
            )));
        }

        let expected: usize = shape.iter().product();
        if expected != values.len() {
            return Err(GridError::Shape(format!(
                "shape {:?} needs {} values, got {}",
                shape,
                expected,
                values.len()
            )));
        }

        Ok(Self {
            dims: dims.iter().map(|d| d.as_ref().to_string()).collect(),
            shape,
            values,
        })
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Position of a named dimension, if the variable has it.
    pub fn dim_position(&self, name: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == name)
    }

    pub fn has_dim(&self, name: &str) -> bool {
        self.dim_position(name).is_some()
    }

    /// Length of a named dimension.
    pub fn dim_len(&self, name: &str) -> Option<usize> {
        self.dim_position(name).map(|pos| self.shape[pos])
    }

    /// Read one value by per-dimension index. `None` if any index is out of range.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        if index.len() != self.shape.len() {
            return None;
        }

        let mut flat = 0usize;
        for (i, (&idx, &len)) in index.iter().zip(&self.shape).enumerate() {
            if idx >= len {
                return None;
            }
            flat = if i == 0 { idx } else { flat * len + idx };
        }

        self.values.get(flat).copied()
    }
}

/// A gridded dataset: named coordinate axes plus named variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GriddedDataset {
    coords: BTreeMap<String, CoordinateAxis>,
    variables: BTreeMap<String, GridVariable>,
}

impl GriddedDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style coordinate insertion.
    pub fn with_coord(mut self, name: impl Into<String>, axis: CoordinateAxis) -> Self {
        self.insert_coord(name, axis);
        self
    }

    /// Builder-style variable insertion.
    pub fn with_variable(mut self, name: impl Into<String>, variable: GridVariable) -> Self {
        self.insert_variable(name, variable);
        self
    }

    pub fn insert_coord(&mut self, name: impl Into<String>, axis: CoordinateAxis) {
        self.coords.insert(name.into(), axis);
    }

    pub fn insert_variable(&mut self, name: impl Into<String>, variable: GridVariable) {
        self.variables.insert(name.into(), variable);
    }

    pub fn coord(&self, name: &str) -> Option<&CoordinateAxis> {
        self.coords.get(name)
    }

    pub fn has_coord(&self, name: &str) -> bool {
        self.coords.contains_key(name)
    }

    /// Numeric coordinate values, `None` if absent or a time axis.
    pub fn numeric_axis(&self, name: &str) -> Option<&[f64]> {
        match self.coords.get(name)? {
            CoordinateAxis::Numeric(v) => Some(v),
            CoordinateAxis::Time(_) => None,
        }
    }

    /// Timestamp coordinate values, `None` if absent or numeric.
    pub fn time_axis(&self, name: &str) -> Option<&[NaiveDateTime]> {
        match self.coords.get(name)? {
            CoordinateAxis::Time(t) => Some(t),
            CoordinateAxis::Numeric(_) => None,
        }
    }

    pub fn variable(&self, name: &str) -> Option<&GridVariable> {
        self.variables.get(name)
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn coord_names(&self) -> impl Iterator<Item = &str> {
        self.coords.keys().map(String::as_str)
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }
}
