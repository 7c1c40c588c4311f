//! Common types shared by the ocean time-series crates.
//!
//! - [`BoundingBox`] and [`Coordinate`] describe the region of interest
//! - [`RegionConfig`] bundles them into the value object every component receives
//! - [`time`] parses and formats the naive timestamps used in the output
//! - [`series`] holds the result document every retrieval path produces

pub mod bbox;
pub mod region;
pub mod series;
pub mod time;

pub use bbox::BoundingBox;
pub use region::{Coordinate, RegionConfig, RegionConfigError};
pub use series::{round_to, PointValue, RetrievalResult, RetrievalStatus, TimeSeriesPoint};
pub use time::{format_timestamp, parse_timestamp, TimeParseError, TimeWindow};
