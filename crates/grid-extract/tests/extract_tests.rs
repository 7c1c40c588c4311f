//! Integration tests for nearest-point extraction over heterogeneous grids.

use grid_extract::{
    nearest_index, CoordinateAxis, GridError, GridPointExtractor, GridVariable, GriddedDataset,
};
use ocean_common::Coordinate;
use test_utils::{
    encoded_value, hourly_times, wave_grid, GridNaming, PENICHE_CENTER, PENICHE_LATS,
    PENICHE_LONS,
};

fn vars(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn peniche() -> Coordinate {
    Coordinate::new(PENICHE_CENTER.0, PENICHE_CENTER.1)
}

// ============================================================================
// Axis naming conventions
// ============================================================================

#[test]
fn test_extract_with_long_axis_names() {
    let ds = wave_grid(GridNaming::Long, 4);
    let series = GridPointExtractor::new()
        .extract(&ds, peniche(), &vars(&["VHM0"]))
        .unwrap();

    // 39.355 -> 39.34 (index 1), -9.381 -> -9.40 (index 1)
    assert_eq!(series.point.lat_index, 1);
    assert_eq!(series.point.lon_index, 1);
    assert_eq!(series.len(), 4);
    for t in 0..4 {
        assert_eq!(series.value("VHM0", t), Some(encoded_value(t, 1, 1)));
    }
}

#[test]
fn test_extract_with_short_axis_names() {
    let long = GridPointExtractor::new()
        .extract(&wave_grid(GridNaming::Long, 3), peniche(), &vars(&["VHM0"]))
        .unwrap();
    let short = GridPointExtractor::new()
        .extract(&wave_grid(GridNaming::Short, 3), peniche(), &vars(&["VHM0"]))
        .unwrap();

    assert_eq!(long.values("VHM0"), short.values("VHM0"));
    assert_eq!(long.point, short.point);
}

#[test]
fn test_missing_latitude_variants_is_schema_error() {
    let ds = GriddedDataset::new()
        .with_coord("time", CoordinateAxis::Time(hourly_times(2)))
        .with_coord("y", CoordinateAxis::Numeric(PENICHE_LATS.to_vec()))
        .with_coord("longitude", CoordinateAxis::Numeric(PENICHE_LONS.to_vec()));

    let err = GridPointExtractor::new()
        .extract(&ds, peniche(), &vars(&["VHM0"]))
        .unwrap_err();
    assert!(matches!(err, GridError::Schema(_)));
}

#[test]
fn test_missing_time_axis_is_schema_error() {
    let ds = GriddedDataset::new()
        .with_coord("latitude", CoordinateAxis::Numeric(PENICHE_LATS.to_vec()))
        .with_coord("longitude", CoordinateAxis::Numeric(PENICHE_LONS.to_vec()));

    let err = GridPointExtractor::new()
        .extract(&ds, peniche(), &vars(&["VHM0"]))
        .unwrap_err();
    assert!(matches!(err, GridError::Schema(_)));
}

// ============================================================================
// Dimension handling
// ============================================================================

#[test]
fn test_dimension_order_is_matched_by_name() {
    let times = hourly_times(2);
    let (n_lat, n_lon) = (PENICHE_LATS.len(), PENICHE_LONS.len());

    // Stored as (longitude, time, latitude) instead of (time, latitude, longitude)
    let mut values = Vec::new();
    for x in 0..n_lon {
        for t in 0..times.len() {
            for y in 0..n_lat {
                values.push(encoded_value(t, y, x));
            }
        }
    }

    let ds = wave_grid(GridNaming::Long, 2).with_variable(
        "VTM02",
        GridVariable::new(
            &["longitude", "time", "latitude"],
            vec![n_lon, times.len(), n_lat],
            values,
        )
        .unwrap(),
    );

    let series = GridPointExtractor::new()
        .extract(&ds, peniche(), &vars(&["VTM02"]))
        .unwrap();
    assert_eq!(series.value("VTM02", 0), Some(encoded_value(0, 1, 1)));
    assert_eq!(series.value("VTM02", 1), Some(encoded_value(1, 1, 1)));
}

#[test]
fn test_depth_and_surface_take_first_index() {
    let times = hourly_times(2);
    let (n_lat, n_lon) = (PENICHE_LATS.len(), PENICHE_LONS.len());

    // thetao(time, depth=2, latitude, longitude): depth 0 holds +0, depth 1 holds +1000
    let mut thetao = Vec::new();
    for t in 0..times.len() {
        for d in 0..2 {
            for y in 0..n_lat {
                for x in 0..n_lon {
                    thetao.push(encoded_value(t, y, x) + 1000.0 * d as f64);
                }
            }
        }
    }

    // zos(surface=1, time) with no spatial dims at all
    let ds = wave_grid(GridNaming::Long, 2)
        .with_variable(
            "thetao",
            GridVariable::new(
                &["time", "depth", "latitude", "longitude"],
                vec![times.len(), 2, n_lat, n_lon],
                thetao,
            )
            .unwrap(),
        )
        .with_variable(
            "zos",
            GridVariable::new(&["surface", "time"], vec![1, 2], vec![0.42, -0.37]).unwrap(),
        );

    let series = GridPointExtractor::new()
        .extract(&ds, peniche(), &vars(&["thetao", "zos"]))
        .unwrap();

    assert_eq!(series.value("thetao", 1), Some(encoded_value(1, 1, 1)));
    assert_eq!(series.values("zos"), Some(&[Some(0.42), Some(-0.37)][..]));
}

#[test]
fn test_variable_without_time_dimension_is_schema_error() {
    let ds = wave_grid(GridNaming::Long, 2).with_variable(
        "deptho",
        GridVariable::new(
            &["latitude", "longitude"],
            vec![PENICHE_LATS.len(), PENICHE_LONS.len()],
            vec![50.0; PENICHE_LATS.len() * PENICHE_LONS.len()],
        )
        .unwrap(),
    );

    let err = GridPointExtractor::new()
        .extract(&ds, peniche(), &vars(&["deptho"]))
        .unwrap_err();
    assert!(matches!(err, GridError::Schema(_)));
}

// ============================================================================
// Missing data
// ============================================================================

#[test]
fn test_absent_variables_are_skipped() {
    let ds = wave_grid(GridNaming::Long, 3);
    let series = GridPointExtractor::new()
        .extract(&ds, peniche(), &vars(&["VHM0", "zos", "VMDR"]))
        .unwrap();

    assert!(series.contains("VHM0"));
    assert!(!series.contains("zos"));
    assert!(!series.contains("VMDR"));
    assert_eq!(series.variables().collect::<Vec<_>>(), vec!["VHM0"]);
}

#[test]
fn test_nan_and_infinity_become_none() {
    let ds = GriddedDataset::new()
        .with_coord("time", CoordinateAxis::Time(hourly_times(4)))
        .with_coord("lat", CoordinateAxis::Numeric(vec![39.35]))
        .with_coord("lon", CoordinateAxis::Numeric(vec![-9.38]))
        .with_variable(
            "VHM0",
            GridVariable::new(
                &["time", "lat", "lon"],
                vec![4, 1, 1],
                vec![1.2, f64::NAN, f64::INFINITY, 1.5],
            )
            .unwrap(),
        );

    let series = GridPointExtractor::new()
        .extract(&ds, peniche(), &vars(&["VHM0"]))
        .unwrap();
    assert_eq!(
        series.values("VHM0"),
        Some(&[Some(1.2), None, None, Some(1.5)][..])
    );
}

#[test]
fn test_short_variable_is_padded_to_time_axis() {
    let ds = GriddedDataset::new()
        .with_coord("time", CoordinateAxis::Time(hourly_times(3)))
        .with_coord("lat", CoordinateAxis::Numeric(vec![39.35]))
        .with_coord("lon", CoordinateAxis::Numeric(vec![-9.38]))
        .with_variable(
            "VHM0",
            GridVariable::new(&["time"], vec![2], vec![0.9, 1.0]).unwrap(),
        );

    let series = GridPointExtractor::new()
        .extract(&ds, peniche(), &vars(&["VHM0"]))
        .unwrap();
    assert_eq!(series.values("VHM0"), Some(&[Some(0.9), Some(1.0), None][..]));
}

// ============================================================================
// Nearest index selection
// ============================================================================

#[test]
fn test_nearest_index_examples() {
    assert_eq!(nearest_index(&[39.30, 39.34, 39.40], 39.355), Some(1));
    assert_eq!(nearest_index(&[39.34, 39.37], 39.355), Some(0));
}

#[test]
fn test_resolved_point_reports_grid_coordinates() {
    let series = GridPointExtractor::new()
        .extract(&wave_grid(GridNaming::Short, 1), peniche(), &vars(&["VHM0"]))
        .unwrap();
    assert_eq!(series.point.lat, 39.34);
    assert_eq!(series.point.lon, -9.40);
}
