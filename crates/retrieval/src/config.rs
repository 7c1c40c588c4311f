//! Configuration of the real-data attempt.

use chrono::NaiveDateTime;
use ocean_common::{parse_timestamp, TimeWindow};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Wave product queried by the real-data attempt.
pub const DEFAULT_WAVE_DATASET_ID: &str = "cmems_mod_glo_wav_my_0.2deg_PT3H-i";

/// Which time window the real-data attempt asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionWindow {
    /// The window the caller asked for.
    #[default]
    Requested,
    /// A fixed window regardless of the request.
    Fixed {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl AcquisitionWindow {
    pub fn resolve(&self, requested: TimeWindow) -> TimeWindow {
        match self {
            AcquisitionWindow::Requested => requested,
            AcquisitionWindow::Fixed { start, end } => TimeWindow::new(*start, *end),
        }
    }
}

/// Settings for the hybrid real-data path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    pub wave_dataset_id: String,
    pub window: AcquisitionWindow,
    /// Most time steps kept from the acquired grid.
    pub max_points: usize,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            wave_dataset_id: DEFAULT_WAVE_DATASET_ID.to_string(),
            window: AcquisitionWindow::Requested,
            max_points: 12,
        }
    }
}

impl AcquisitionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparseable values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let wave_dataset_id = lookup("ACQUISITION_DATASET_ID")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.wave_dataset_id);

        let max_points = lookup("ACQUISITION_MAX_POINTS")
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.max_points);

        let window = match (
            lookup("ACQUISITION_WINDOW_START"),
            lookup("ACQUISITION_WINDOW_END"),
        ) {
            (Some(start), Some(end)) => match (parse_timestamp(&start), parse_timestamp(&end)) {
                (Ok(start), Ok(end)) => AcquisitionWindow::Fixed { start, end },
                _ => {
                    warn!(start = %start, end = %end, "Ignoring unparseable acquisition window");
                    AcquisitionWindow::Requested
                }
            },
            _ => AcquisitionWindow::Requested,
        };

        Self {
            wave_dataset_id,
            window,
            max_points,
        }
    }
}
