//! Configuration file loading.
//!
//! One YAML document with three optional sections:
//!
//! ```yaml
//! region:
//!   name: Peniche
//!   center: { lat: 39.355, lon: -9.381 }
//! synthesis:
//!   wave_base_m: 1.6
//! acquisition:
//!   max_points: 8
//! ```
//!
//! Missing sections take their defaults; a missing `acquisition` section is
//! read from the environment instead.

use std::path::Path;

use anyhow::{bail, Context, Result};
use ocean_common::{BoundingBox, Coordinate, RegionConfig};
use ocean_synth::{ProfileError, SynthesisProfile};
use retrieval::AcquisitionConfig;
use serde::Deserialize;
use tracing::{debug, info};

/// Everything a run is configured with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub region: RegionConfig,
    pub synthesis: SynthesisProfile,
    pub acquisition: AcquisitionConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    region: RegionConfig,
    synthesis: SynthesisProfile,
    acquisition: Option<AcquisitionConfig>,
}

impl AppConfig {
    /// Load from `path`, or from defaults and the environment when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                let config = Self::from_yaml(&content)
                    .with_context(|| format!("Invalid config file: {}", path.display()))?;
                info!(path = %path.display(), region = %config.region.name, "Loaded configuration");
                Ok(config)
            }
            None => {
                debug!("No config file given, using defaults");
                Ok(Self {
                    acquisition: AcquisitionConfig::from_env(),
                    ..Self::default()
                })
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content).context("Failed to parse YAML")?;
        let config = Self {
            region: file.region,
            synthesis: file.synthesis,
            acquisition: file.acquisition.unwrap_or_else(AcquisitionConfig::from_env),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.region.validate()?;
        self.synthesis.validate().context("Invalid synthesis profile")?;
        if self.acquisition.max_points == 0 {
            bail!("acquisition: max_points must be positive");
        }
        Ok(())
    }
}

/// Region values given on the command line; each one replaces its config value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionOverrides {
    pub center_lat: Option<f64>,
    pub center_lon: Option<f64>,
    pub min_lon: Option<f64>,
    pub max_lon: Option<f64>,
    pub min_lat: Option<f64>,
    pub max_lat: Option<f64>,
}

impl RegionOverrides {
    pub fn apply(&self, region: &RegionConfig) -> Result<RegionConfig> {
        let center = Coordinate::new(
            self.center_lat.unwrap_or(region.center.lat),
            self.center_lon.unwrap_or(region.center.lon),
        );
        let bbox = BoundingBox::new(
            self.min_lon.unwrap_or(region.bbox.min_lon),
            self.max_lon.unwrap_or(region.bbox.max_lon),
            self.min_lat.unwrap_or(region.bbox.min_lat),
            self.max_lat.unwrap_or(region.bbox.max_lat),
        );

        let updated = RegionConfig {
            center,
            bbox,
            ..region.clone()
        };
        updated.validate().context("Invalid region override")?;
        Ok(updated)
    }
}
