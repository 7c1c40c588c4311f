//! Common test fixtures for the Peniche region.
//!
//! The axes are deliberately coarse so the nearest cell to the region center
//! is easy to work out by hand: 39.355 -> 39.34 (index 1), -9.381 -> -9.40
//! (index 1).

use ocean_common::RegionConfig;

/// Region center as (lat, lon).
pub const PENICHE_CENTER: (f64, f64) = (39.355, -9.381);

/// Latitude axis of the generated grids.
pub const PENICHE_LATS: [f64; 3] = [39.30, 39.34, 39.40];

/// Longitude axis of the generated grids.
pub const PENICHE_LONS: [f64; 4] = [-9.45, -9.40, -9.35, -9.30];

/// Grid indices the region center resolves to: (lat_index, lon_index).
pub const PENICHE_NEAREST: (usize, usize) = (1, 1);

/// Dataset identifier used for the wave product in orchestrator tests.
pub const WAVE_DATASET_ID: &str = "cmems_mod_glo_wav_my_0.2deg_PT3H-i";

/// A 12-hour request window.
pub mod window {
    pub const START: &str = "2024-01-15T00:00:00";
    pub const END: &str = "2024-01-15T12:00:00";

    /// A window shorter than the minimum sample count.
    pub const SHORT_END: &str = "2024-01-15T02:00:00";

    /// A window longer than the maximum sample count.
    pub const LONG_END: &str = "2024-01-20T00:00:00";
}

/// Malformed timestamps that must never surface as an error.
pub const MALFORMED_TIMESTAMPS: &[&str] = &["", "yesterday", "2024-13-45T99:00:00", "15/01/2024"];

/// The default region.
pub fn peniche_region() -> RegionConfig {
    RegionConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_matches_default_region() {
        let region = peniche_region();
        assert_eq!((region.center.lat, region.center.lon), PENICHE_CENTER);
        for lat in PENICHE_LATS {
            assert!(lat >= region.bbox.min_lat && lat <= region.bbox.max_lat);
        }
        for lon in PENICHE_LONS {
            assert!(lon >= region.bbox.min_lon && lon <= region.bbox.max_lon);
        }
    }
}
