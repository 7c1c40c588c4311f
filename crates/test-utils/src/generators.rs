//! Test data generators for gridded ocean datasets.
//!
//! Values are predictable so tests can check that the right cell was read:
//! [`encoded_value`] packs the (time, lat, lon) indices into the number.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use grid_extract::{CoordinateAxis, GridVariable, GriddedDataset};

use crate::fixtures::{PENICHE_LATS, PENICHE_LONS};

/// `n` hourly timestamps starting at 2023-04-01T00:00:00.
pub fn hourly_times(n: usize) -> Vec<NaiveDateTime> {
    let t0 = NaiveDate::from_ymd_opt(2023, 4, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid fixed date");
    (0..n).map(|i| t0 + Duration::hours(i as i64)).collect()
}

/// Cell value for time step `t`, latitude index `y` and longitude index `x`.
///
/// ```
/// use test_utils::encoded_value;
///
/// assert_eq!(encoded_value(0, 1, 1), 0.11);
/// assert_eq!(encoded_value(2, 1, 3), 2.13);
/// ```
pub fn encoded_value(t: usize, y: usize, x: usize) -> f64 {
    (t * 100 + y * 10 + x) as f64 / 100.0
}

/// Which spatial axis names a generated grid uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridNaming {
    /// `latitude` / `longitude`
    Long,
    /// `lat` / `lon`
    Short,
}

impl GridNaming {
    pub fn axis_names(self) -> (&'static str, &'static str) {
        match self {
            GridNaming::Long => ("latitude", "longitude"),
            GridNaming::Short => ("lat", "lon"),
        }
    }
}

/// Values of a (time, lat, lon) variable over the Peniche axes.
pub fn grid_values(n_times: usize, cell: impl Fn(usize, usize, usize) -> f64) -> Vec<f64> {
    let mut values = Vec::with_capacity(n_times * PENICHE_LATS.len() * PENICHE_LONS.len());
    for t in 0..n_times {
        for y in 0..PENICHE_LATS.len() {
            for x in 0..PENICHE_LONS.len() {
                values.push(cell(t, y, x));
            }
        }
    }
    values
}

/// A Peniche grid carrying only `VHM0(time, lat, lon)` filled with [`encoded_value`].
pub fn wave_grid(naming: GridNaming, n_times: usize) -> GriddedDataset {
    let (lat, lon) = naming.axis_names();
    let shape = vec![n_times, PENICHE_LATS.len(), PENICHE_LONS.len()];

    GriddedDataset::new()
        .with_coord("time", CoordinateAxis::Time(hourly_times(n_times)))
        .with_coord(lat, CoordinateAxis::Numeric(PENICHE_LATS.to_vec()))
        .with_coord(lon, CoordinateAxis::Numeric(PENICHE_LONS.to_vec()))
        .with_variable(
            "VHM0",
            GridVariable::new(&["time", lat, lon], shape, grid_values(n_times, encoded_value))
                .expect("shape matches generated values"),
        )
}

/// A Peniche wave product with `VHM0`, `VTM02` and `VMDR`, like a real subset.
///
/// Wave heights are `1 + encoded_value` metres, periods `8 + t/10` seconds
/// and directions a constant 275 degrees.
pub fn wave_product(n_times: usize) -> GriddedDataset {
    let shape = vec![n_times, PENICHE_LATS.len(), PENICHE_LONS.len()];
    let dims = ["time", "latitude", "longitude"];
    let variable = |values: Vec<f64>| {
        GridVariable::new(&dims, shape.clone(), values).expect("shape matches generated values")
    };

    wave_grid(GridNaming::Long, n_times)
        .with_variable(
            "VHM0",
            variable(grid_values(n_times, |t, y, x| 1.0 + encoded_value(t, y, x))),
        )
        .with_variable(
            "VTM02",
            variable(grid_values(n_times, |t, _, _| 8.0 + t as f64 / 10.0)),
        )
        .with_variable("VMDR", variable(grid_values(n_times, |_, _, _| 275.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourly_times_are_consecutive() {
        let times = hourly_times(3);
        assert_eq!(times.len(), 3);
        assert_eq!(times[2] - times[0], Duration::hours(2));
    }

    #[test]
    fn test_wave_grid_layout() {
        let ds = wave_grid(GridNaming::Short, 2);
        assert!(ds.has_coord("lat"));
        assert!(ds.has_coord("lon"));
        let vhm0 = ds.variable("VHM0").unwrap();
        assert_eq!(vhm0.shape(), &[2, 3, 4]);
        assert_eq!(vhm0.get(&[1, 2, 3]), Some(encoded_value(1, 2, 3)));
    }

    #[test]
    fn test_wave_product_variables() {
        let ds = wave_product(4);
        let names: Vec<&str> = ds.variable_names().collect();
        assert_eq!(names, vec!["VHM0", "VMDR", "VTM02"]);
        assert_eq!(ds.variable("VMDR").unwrap().get(&[3, 0, 0]), Some(275.0));
    }
}
