//! Reduction of gridded ocean datasets to a single-point time series.
//!
//! Gridded sources disagree on coordinate naming (`latitude` vs `lat`), on
//! which dimensions a variable carries (some have `depth` or `surface`), and
//! on dimension order. Extraction therefore works by dimension *name*:
//!
//! 1. [`resolve_axis_names`] maps the dataset onto canonical time/lat/lon axes
//!    or fails with [`GridError::Schema`].
//! 2. [`nearest_index`] picks the closest grid index per spatial axis, once.
//! 3. [`GridPointExtractor::extract`] indexes every requested variable down to
//!    a 1-D series aligned with the time axis, turning NaN into `None`.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use grid_extract::{CoordinateAxis, GridPointExtractor, GridVariable, GriddedDataset};
//! use ocean_common::Coordinate;
//!
//! let t0 = NaiveDate::from_ymd_opt(2023, 4, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let dataset = GriddedDataset::new()
//!     .with_coord("time", CoordinateAxis::Time(vec![t0]))
//!     .with_coord("lat", CoordinateAxis::Numeric(vec![39.30, 39.40]))
//!     .with_coord("lon", CoordinateAxis::Numeric(vec![-9.40]))
//!     .with_variable(
//!         "VHM0",
//!         GridVariable::new(&["time", "lat", "lon"], vec![1, 2, 1], vec![1.1, 1.9]).unwrap(),
//!     );
//!
//! let series = GridPointExtractor::new()
//!     .extract(&dataset, Coordinate::new(39.38, -9.381), &["VHM0".to_string()])
//!     .unwrap();
//! assert_eq!(series.values("VHM0"), Some(&[Some(1.9)][..]));
//! ```

pub mod axes;
pub mod cf_time;
pub mod dataset;
pub mod error;
pub mod extract;
pub mod loader;
pub mod nearest;

#[cfg(feature = "netcdf")]
pub mod netcdf_loader;

pub use axes::{resolve_axis_names, AxisNames, LATITUDE_NAMES, LONGITUDE_NAMES, TIME_AXIS};
pub use cf_time::decode_cf_time;
pub use dataset::{CoordinateAxis, GridVariable, GriddedDataset};
pub use error::{GridError, Result};
pub use extract::{GridPointExtractor, PointSeries, ResolvedPoint};
pub use loader::{find_grid_files, GridLoader, UnsupportedLoader, GRID_FILE_EXTENSION};
pub use nearest::nearest_index;

#[cfg(feature = "netcdf")]
pub use netcdf_loader::NetCdfLoader;
