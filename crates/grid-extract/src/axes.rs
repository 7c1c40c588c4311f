//! Canonical axis-name resolution.
//!
//! Runs before any indexing so the rest of the extraction only deals with one
//! naming convention.

use crate::dataset::{CoordinateAxis, GriddedDataset};
use crate::error::{GridError, Result};

/// Name of the required time axis.
pub const TIME_AXIS: &str = "time";

/// Accepted latitude axis names, in order of preference.
pub const LATITUDE_NAMES: [&str; 2] = ["latitude", "lat"];

/// Accepted longitude axis names, in order of preference.
pub const LONGITUDE_NAMES: [&str; 2] = ["longitude", "lon"];

/// The axis names a particular dataset actually uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisNames {
    pub time: String,
    pub latitude: String,
    pub longitude: String,
}

/// Map a dataset onto canonical time/latitude/longitude axes.
///
/// Fails with [`GridError::Schema`] when the time axis is missing (or not a
/// time axis) or when neither name variant of a spatial axis is present.
pub fn resolve_axis_names(dataset: &GriddedDataset) -> Result<AxisNames> {
    match dataset.coord(TIME_AXIS) {
        Some(CoordinateAxis::Time(_)) => {}
        Some(CoordinateAxis::Numeric(_)) => {
            return Err(GridError::schema(format!(
                "axis '{}' is not a decoded time axis",
                TIME_AXIS
            )))
        }
        None => {
            return Err(GridError::schema(format!(
                "dataset has no '{}' axis",
                TIME_AXIS
            )))
        }
    }

    let latitude = find_numeric_axis(dataset, &LATITUDE_NAMES)?;
    let longitude = find_numeric_axis(dataset, &LONGITUDE_NAMES)?;

    Ok(AxisNames {
        time: TIME_AXIS.to_string(),
        latitude,
        longitude,
    })
}

fn find_numeric_axis(dataset: &GriddedDataset, candidates: &[&str]) -> Result<String> {
    for name in candidates {
        match dataset.coord(name) {
            Some(CoordinateAxis::Numeric(_)) => return Ok(name.to_string()),
            Some(CoordinateAxis::Time(_)) => {
                return Err(GridError::schema(format!("axis '{}' is not numeric", name)))
            }
            None => continue,
        }
    }

    Err(GridError::schema(format!(
        "dataset has none of the axes {:?} (found: {:?})",
        candidates,
        dataset.coord_names().collect::<Vec<_>>()
    )))
}
