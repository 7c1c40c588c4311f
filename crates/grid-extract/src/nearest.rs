//! Nearest grid index lookup.

/// Index of the axis value closest to `target` by absolute difference.
///
/// Ties resolve to the lowest index. NaN axis entries are never selected.
/// Returns `None` for an empty axis, an all-NaN axis or a NaN target.
pub fn nearest_index(axis: &[f64], target: f64) -> Option<usize> {
    if target.is_nan() {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in axis.iter().enumerate() {
        let distance = (value - target).abs();
        if distance.is_nan() {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }

    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_wins() {
        // distances 0.055, 0.015, 0.045
        assert_eq!(nearest_index(&[39.30, 39.34, 39.40], 39.355), Some(1));
    }

    #[test]
    fn test_tie_resolves_to_first() {
        assert_eq!(nearest_index(&[39.34, 39.37], 39.355), Some(0));
        assert_eq!(nearest_index(&[1.0, 3.0], 2.0), Some(0));
        assert_eq!(nearest_index(&[5.0, 1.0, 3.0, 1.0], 2.0), Some(1));
    }

    #[test]
    fn test_descending_axis() {
        assert_eq!(nearest_index(&[40.0, 39.5, 39.0], 39.4), Some(1));
    }

    #[test]
    fn test_target_outside_axis_clamps_to_edge() {
        assert_eq!(nearest_index(&[-9.45, -9.40, -9.35], -20.0), Some(0));
        assert_eq!(nearest_index(&[-9.45, -9.40, -9.35], 0.0), Some(2));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(nearest_index(&[], 1.0), None);
        assert_eq!(nearest_index(&[f64::NAN, f64::NAN], 1.0), None);
        assert_eq!(nearest_index(&[f64::NAN, 4.0], 1.0), Some(1));
        assert_eq!(nearest_index(&[1.0], f64::NAN), None);
    }
}
