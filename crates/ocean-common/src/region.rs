//! Region of interest passed to every component call.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::BoundingBox;

/// A (latitude, longitude) point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Fixed description of the coastal region a run works on.
///
/// The center is expected to sit inside the bbox, but that is documentation of
/// intended use rather than something checked at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Human-readable region name, used in provenance text.
    #[serde(default = "default_name")]
    pub name: String,

    /// Point the gridded data is reduced to.
    #[serde(default = "default_center")]
    pub center: Coordinate,

    /// Extent requested from the acquisition collaborator.
    #[serde(default = "default_bbox")]
    pub bbox: BoundingBox,

    /// Dataset identifier reported on fully synthetic results.
    #[serde(default = "default_synthetic_dataset_id")]
    pub synthetic_dataset_id: String,
}

fn default_name() -> String {
    "Peniche".to_string()
}

fn default_center() -> Coordinate {
    Coordinate::new(39.355, -9.381)
}

fn default_bbox() -> BoundingBox {
    BoundingBox::new(-9.45, -9.30, 39.30, 39.40)
}

fn default_synthetic_dataset_id() -> String {
    "peniche_realistic_simulation".to_string()
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            center: default_center(),
            bbox: default_bbox(),
            synthetic_dataset_id: default_synthetic_dataset_id(),
        }
    }
}

impl RegionConfig {
    /// Parse a region from a YAML document. Missing keys take the Peniche defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RegionConfigError> {
        let region: Self = serde_yaml::from_str(yaml)?;
        region.validate()?;
        Ok(region)
    }

    /// Load a region from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RegionConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Reject non-finite numbers and inverted extents.
    pub fn validate(&self) -> Result<(), RegionConfigError> {
        let numbers = [
            self.center.lat,
            self.center.lon,
            self.bbox.min_lon,
            self.bbox.max_lon,
            self.bbox.min_lat,
            self.bbox.max_lat,
        ];
        if numbers.iter().any(|v| !v.is_finite()) {
            return Err(RegionConfigError::Invalid(
                "region coordinates must be finite".to_string(),
            ));
        }
        if !self.bbox.is_valid() {
            return Err(RegionConfigError::Invalid(format!(
                "bbox minimum exceeds maximum: {:?}",
                self.bbox
            )));
        }
        Ok(())
    }

    /// Whether the center lies inside the bbox.
    pub fn center_in_bbox(&self) -> bool {
        self.bbox.contains(self.center.lat, self.center.lon)
    }
}

/// Errors raised while loading a region definition.
#[derive(Debug, Error)]
pub enum RegionConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid region: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_region_is_peniche() {
        let region = RegionConfig::default();
        assert_eq!(region.center, Coordinate::new(39.355, -9.381));
        assert!(region.center_in_bbox());
        assert_eq!(region.synthetic_dataset_id, "peniche_realistic_simulation");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let region = RegionConfig::from_yaml_str("name: Nazare\ncenter: {lat: 39.6, lon: -9.08}\n")
            .unwrap();
        assert_eq!(region.name, "Nazare");
        assert_eq!(region.center.lat, 39.6);
        assert_eq!(region.bbox, RegionConfig::default().bbox);
    }

    #[test]
    fn test_inverted_bbox_rejected() {
        let yaml = "bbox: {min_lon: -9.3, max_lon: -9.45, min_lat: 39.3, max_lat: 39.4}\n";
        assert!(matches!(
            RegionConfig::from_yaml_str(yaml),
            Err(RegionConfigError::Invalid(_))
        ));
    }
}
