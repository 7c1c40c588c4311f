//! NetCDF loading, run with `--features netcdf`.

#![cfg(feature = "netcdf")]

use chrono::NaiveDate;
use grid_extract::{find_grid_files, CoordinateAxis, GridLoader, GridPointExtractor, NetCdfLoader};
use ocean_common::Coordinate;
use std::path::Path;

const MISSING: f64 = -999.0;

/// Two 3-hourly steps on a 2x2 grid, VHM0 packed with scale 0.01.
fn write_wave_file(path: &Path) {
    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("time", 2).unwrap();
    file.add_dimension("latitude", 2).unwrap();
    file.add_dimension("longitude", 2).unwrap();

    let mut time = file.add_variable::<f64>("time", &["time"]).unwrap();
    time.put_attribute("units", "hours since 1950-01-01 00:00:00").unwrap();
    time.put_values(&[642_072.0, 642_075.0], ..).unwrap();

    let mut lat = file.add_variable::<f64>("latitude", &["latitude"]).unwrap();
    lat.put_values(&[39.2, 39.4], ..).unwrap();

    let mut lon = file.add_variable::<f64>("longitude", &["longitude"]).unwrap();
    lon.put_values(&[-9.6, -9.4], ..).unwrap();

    let mut vhm0 = file
        .add_variable::<f64>("VHM0", &["time", "latitude", "longitude"])
        .unwrap();
    vhm0.put_attribute("scale_factor", 0.01f64).unwrap();
    vhm0.put_attribute("missing_value", MISSING).unwrap();
    vhm0.put_values(&[100.0, 110.0, 120.0, 130.0, 200.0, 210.0, 220.0, MISSING], ..)
        .unwrap();
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_decodes_time_and_coordinates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("waves.nc");
    write_wave_file(&path);

    let dataset = NetCdfLoader::new().load(&path).unwrap();

    let t0 = NaiveDate::from_ymd_opt(2023, 4, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(dataset.time_axis("time").unwrap()[0], t0);
    assert_eq!(dataset.time_axis("time").unwrap()[1], t0 + chrono::Duration::hours(3));
    assert!(matches!(dataset.coord("latitude"), Some(CoordinateAxis::Numeric(_))));
    assert!(dataset.variable("VHM0").is_some());
}

#[test]
fn test_unpacked_values_reach_the_series() {
    let dir = tempfile::tempdir().unwrap();
    write_wave_file(&dir.path().join("waves.nc"));

    let files = find_grid_files(dir.path()).unwrap();
    assert_eq!(files.len(), 1);

    let dataset = NetCdfLoader::new().load(&files[0]).unwrap();
    let series = GridPointExtractor::new()
        .extract(&dataset, Coordinate::new(39.355, -9.381), &["VHM0".to_string()])
        .unwrap();

    // nearest cell is (latitude 39.4, longitude -9.4)
    assert_eq!(series.point.lat_index, 1);
    assert_eq!(series.point.lon_index, 1);
    test_utils::assert_approx_eq!(series.value("VHM0", 0).unwrap(), 1.3, 1e-9);
    assert_eq!(series.value("VHM0", 1), None);
}

#[test]
fn test_unreadable_file_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.nc");
    std::fs::write(&path, b"not a netcdf file").unwrap();

    let err = NetCdfLoader::new().load(&path).unwrap_err();
    assert!(matches!(err, grid_extract::GridError::Load(_)));
}
