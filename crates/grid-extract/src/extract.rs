//! Nearest-point reduction of gridded variables to time series.

use chrono::NaiveDateTime;
use ocean_common::Coordinate;
use std::collections::BTreeMap;
use tracing::debug;

use crate::axes::{resolve_axis_names, AxisNames};
use crate::dataset::{GridVariable, GriddedDataset};
use crate::error::{GridError, Result};
use crate::nearest::nearest_index;

/// Dimensions reduced to their first index when a variable carries them.
pub const DEFAULT_SINGLETON_DIMS: [&str; 2] = ["depth", "surface"];

/// The grid cell an extraction resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPoint {
    pub lat_index: usize,
    pub lon_index: usize,
    /// Latitude of the selected grid cell.
    pub lat: f64,
    /// Longitude of the selected grid cell.
    pub lon: f64,
}

/// Per-variable series aligned one-to-one with `times`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSeries {
    pub times: Vec<NaiveDateTime>,
    pub point: ResolvedPoint,
    series: BTreeMap<String, Vec<Option<f64>>>,
}

impl PointSeries {
    /// Number of time steps.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Full series for a variable, if it was extracted.
    pub fn values(&self, variable: &str) -> Option<&[Option<f64>]> {
        self.series.get(variable).map(Vec::as_slice)
    }

    /// Single value at time step `t`. `None` for missing data or unknown variables.
    pub fn value(&self, variable: &str, t: usize) -> Option<f64> {
        self.series.get(variable)?.get(t).copied().flatten()
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.series.contains_key(variable)
    }

    /// Names of the variables that were extracted.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }
}

/// Reduces a [`GriddedDataset`] to the series at the grid cell nearest a target.
#[derive(Debug, Clone)]
pub struct GridPointExtractor {
    singleton_dims: Vec<String>,
}

impl Default for GridPointExtractor {
    fn default() -> Self {
        Self {
            singleton_dims: DEFAULT_SINGLETON_DIMS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl GridPointExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also reduce `dim` to index 0 when a variable carries it.
    pub fn with_singleton_dim(mut self, dim: impl Into<String>) -> Self {
        self.singleton_dims.push(dim.into());
        self
    }

    /// Extract `variables` at the grid cell nearest `target`.
    ///
    /// Variables missing from the dataset are skipped; backfilling them is up
    /// to the caller. Non-finite values come back as `None`.
    pub fn extract(
        &self,
        dataset: &GriddedDataset,
        target: Coordinate,
        variables: &[String],
    ) -> Result<PointSeries> {
        let axes = resolve_axis_names(dataset)?;
        let times = dataset
            .time_axis(&axes.time)
            .ok_or_else(|| GridError::schema("time axis disappeared after resolution"))?
            .to_vec();

        let point = self.resolve_point(dataset, &axes, target)?;

        debug!(
            lat_index = point.lat_index,
            lon_index = point.lon_index,
            grid_lat = point.lat,
            grid_lon = point.lon,
            "Resolved nearest grid cell"
        );

        let mut series = BTreeMap::new();
        for name in variables {
            let Some(variable) = dataset.variable(name) else {
                debug!(variable = %name, "Variable not in dataset, skipping");
                continue;
            };
            let values = self.reduce(name, variable, &axes, &point, times.len())?;
            series.insert(name.clone(), values);
        }

        Ok(PointSeries {
            times,
            point,
            series,
        })
    }

    fn resolve_point(
        &self,
        dataset: &GriddedDataset,
        axes: &AxisNames,
        target: Coordinate,
    ) -> Result<ResolvedPoint> {
        let lats = dataset
            .numeric_axis(&axes.latitude)
            .ok_or_else(|| GridError::schema(format!("missing axis '{}'", axes.latitude)))?;
        let lons = dataset
            .numeric_axis(&axes.longitude)
            .ok_or_else(|| GridError::schema(format!("missing axis '{}'", axes.longitude)))?;

        let lat_index = nearest_index(lats, target.lat).ok_or_else(|| {
            GridError::schema(format!("axis '{}' has no usable values", axes.latitude))
        })?;
        let lon_index = nearest_index(lons, target.lon).ok_or_else(|| {
            GridError::schema(format!("axis '{}' has no usable values", axes.longitude))
        })?;

        Ok(ResolvedPoint {
            lat_index,
            lon_index,
            lat: lats[lat_index],
            lon: lons[lon_index],
        })
    }

    /// Index every non-time dimension of `variable` and read along time.
    fn reduce(
        &self,
        name: &str,
        variable: &GridVariable,
        axes: &AxisNames,
        point: &ResolvedPoint,
        n_times: usize,
    ) -> Result<Vec<Option<f64>>> {
        let time_pos = variable.dim_position(&axes.time).ok_or_else(|| {
            GridError::schema(format!(
                "variable '{}' has no '{}' dimension (dims: {:?})",
                name,
                axes.time,
                variable.dims()
            ))
        })?;

        let mut index = vec![0usize; variable.dims().len()];
        for (pos, (dim, &len)) in variable.dims().iter().zip(variable.shape()).enumerate() {
            if pos == time_pos {
                continue;
            }

            let selected = if *dim == axes.latitude {
                point.lat_index
            } else if *dim == axes.longitude {
                point.lon_index
            } else if self.singleton_dims.iter().any(|d| d == dim) || len == 1 {
                0
            } else {
                return Err(GridError::schema(format!(
                    "variable '{}' has dimension '{}' of length {} that cannot be reduced",
                    name, dim, len
                )));
            };

            if selected >= len {
                return Err(GridError::schema(format!(
                    "index {} out of range for dimension '{}' of '{}' (length {})",
                    selected, dim, name, len
                )));
            }
            index[pos] = selected;
        }

        let available = variable.shape()[time_pos];
        if available != n_times {
            debug!(
                variable = %name,
                variable_steps = available,
                axis_steps = n_times,
                "Variable time length differs from time axis"
            );
        }

        let mut values = Vec::with_capacity(n_times);
        for t in 0..n_times {
            if t >= available {
                values.push(None);
                continue;
            }
            index[time_pos] = t;
            values.push(variable.get(&index).filter(|v| v.is_finite()));
        }

        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CoordinateAxis;
    use chrono::{Duration, NaiveDate};

    fn times(n: usize) -> Vec<NaiveDateTime> {
        let t0 = NaiveDate::from_ymd_opt(2023, 4, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n).map(|i| t0 + Duration::hours(3 * i as i64)).collect()
    }

    #[test]
    fn test_time_only_variable() {
        let ds = GriddedDataset::new()
            .with_coord("time", CoordinateAxis::Time(times(3)))
            .with_coord("lat", CoordinateAxis::Numeric(vec![39.3]))
            .with_coord("lon", CoordinateAxis::Numeric(vec![-9.4]))
            .with_variable(
                "zos",
                GridVariable::new(&["time"], vec![3], vec![0.1, f64::NAN, 0.3]).unwrap(),
            );

        let series = GridPointExtractor::new()
            .extract(&ds, Coordinate::new(39.355, -9.381), &["zos".to_string()])
            .unwrap();

        assert_eq!(series.values("zos"), Some(&[Some(0.1), None, Some(0.3)][..]));
    }

    #[test]
    fn test_unreducible_dimension() {
        let ds = GriddedDataset::new()
            .with_coord("time", CoordinateAxis::Time(times(1)))
            .with_coord("lat", CoordinateAxis::Numeric(vec![39.3]))
            .with_coord("lon", CoordinateAxis::Numeric(vec![-9.4]))
            .with_variable(
                "thetao",
                GridVariable::new(&["time", "level"], vec![1, 2], vec![15.0, 14.0]).unwrap(),
            );

        let err = GridPointExtractor::new()
            .extract(&ds, Coordinate::new(39.355, -9.381), &["thetao".to_string()])
            .unwrap_err();
        assert!(matches!(err, GridError::Schema(_)));

        let series = GridPointExtractor::new()
            .with_singleton_dim("level")
            .extract(&ds, Coordinate::new(39.355, -9.381), &["thetao".to_string()])
            .unwrap();
        assert_eq!(series.value("thetao", 0), Some(15.0));
    }
}
