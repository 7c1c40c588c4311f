//! Tunable constants of the synthetic signals.
//!
//! Defaults describe the Peniche coast. A profile only changes magnitudes,
//! never which quantity depends on which.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Amplitudes, rates, noise levels and bounds for every synthesized quantity.
///
/// Rates are in radians per elapsed hour; heights and sea level in metres,
/// temperature in °C, periods in seconds, directions in degrees and
/// pressure in hPa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisProfile {
    /// Day of year the annual cycle crosses zero on its way up.
    pub seasonal_phase_day: f64,

    pub wave_base_m: f64,
    pub wave_seasonal_amplitude_m: f64,
    pub wave_diurnal_amplitude_m: f64,
    pub wave_diurnal_rate: f64,
    pub wave_noise_m: f64,
    pub wave_floor_m: f64,

    /// Principal lunar semidiurnal period.
    pub tide_period_hours: f64,
    pub tide_amplitude_m: f64,
    /// Amplitude of the double-frequency harmonic.
    pub tide_harmonic_amplitude_m: f64,
    pub tide_noise_m: f64,

    pub temp_mean_c: f64,
    pub temp_seasonal_amplitude_c: f64,
    pub temp_diurnal_amplitude_c: f64,
    /// Hour the diurnal term is referenced to.
    pub temp_reference_hour: f64,
    pub temp_noise_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,

    pub wind_base: f64,
    pub wind_amplitude: f64,
    pub wind_rate: f64,
    pub wind_noise: f64,

    pub period_base_s: f64,
    /// Seconds of period per metre of wave height.
    pub period_per_height_s: f64,
    pub period_noise_s: f64,
    pub period_min_s: f64,
    pub period_max_s: f64,

    pub direction_mean_deg: f64,
    pub direction_amplitude_deg: f64,
    pub direction_rate: f64,
    pub direction_noise_deg: f64,

    pub pressure_mean_hpa: f64,
    pub pressure_amplitude_hpa: f64,
    pub pressure_rate: f64,

    /// Fewest hourly samples a result carries.
    pub min_points: usize,
    /// Most hourly samples a result carries.
    pub max_points: usize,
    /// Window length used when the requested one cannot be parsed.
    pub default_window_hours: i64,
}

impl Default for SynthesisProfile {
    fn default() -> Self {
        Self {
            seasonal_phase_day: 60.0,

            wave_base_m: 1.4,
            wave_seasonal_amplitude_m: 0.3,
            wave_diurnal_amplitude_m: 0.4,
            wave_diurnal_rate: 0.4,
            wave_noise_m: 0.2,
            wave_floor_m: 0.3,

            tide_period_hours: 12.42,
            tide_amplitude_m: 1.3,
            tide_harmonic_amplitude_m: 0.4,
            tide_noise_m: 0.08,

            temp_mean_c: 17.0,
            temp_seasonal_amplitude_c: 3.0,
            temp_diurnal_amplitude_c: 1.2,
            temp_reference_hour: 14.0,
            temp_noise_c: 0.3,
            temp_min_c: 12.0,
            temp_max_c: 22.0,

            wind_base: 12.0,
            wind_amplitude: 6.0,
            wind_rate: 0.15,
            wind_noise: 2.0,

            period_base_s: 6.0,
            period_per_height_s: 1.5,
            period_noise_s: 0.5,
            period_min_s: 4.0,
            period_max_s: 15.0,

            direction_mean_deg: 250.0,
            direction_amplitude_deg: 40.0,
            direction_rate: 0.1,
            direction_noise_deg: 10.0,

            pressure_mean_hpa: 1013.0,
            pressure_amplitude_hpa: 10.0,
            pressure_rate: 0.1,

            min_points: 6,
            max_points: 24,
            default_window_hours: 12,
        }
    }
}

impl SynthesisProfile {
    /// Check bounds are ordered and the period still grows with wave height.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.min_points == 0 || self.min_points > self.max_points {
            return Err(ProfileError::PointBounds {
                min: self.min_points,
                max: self.max_points,
            });
        }
        if self.temp_min_c > self.temp_max_c {
            return Err(ProfileError::InvertedBounds {
                quantity: "temperature",
                min: self.temp_min_c,
                max: self.temp_max_c,
            });
        }
        if self.period_min_s > self.period_max_s {
            return Err(ProfileError::InvertedBounds {
                quantity: "wave period",
                min: self.period_min_s,
                max: self.period_max_s,
            });
        }
        if self.period_per_height_s <= 0.0 {
            return Err(ProfileError::NotPositive("period_per_height_s"));
        }
        if self.tide_period_hours <= 0.0 {
            return Err(ProfileError::NotPositive("tide_period_hours"));
        }
        if self.default_window_hours <= 0 {
            return Err(ProfileError::NotPositive("default_window_hours"));
        }
        Ok(())
    }

    /// Number of hourly samples for a window of `duration_hours`.
    ///
    /// ```
    /// use ocean_synth::SynthesisProfile;
    ///
    /// let profile = SynthesisProfile::default();
    /// assert_eq!(profile.point_count(12.0), 12);
    /// assert_eq!(profile.point_count(2.0), 6);
    /// assert_eq!(profile.point_count(72.0), 24);
    /// assert_eq!(profile.point_count(-5.0), 6);
    /// ```
    pub fn point_count(&self, duration_hours: f64) -> usize {
        let rounded = duration_hours.round();
        if !rounded.is_finite() || rounded <= self.min_points as f64 {
            return self.min_points;
        }
        if rounded >= self.max_points as f64 {
            return self.max_points;
        }
        rounded as usize
    }
}

/// A profile whose constants break a relationship between quantities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("point bounds must satisfy 0 < min_points <= max_points, got {min}..{max}")]
    PointBounds { min: usize, max: usize },

    #[error("{quantity} bounds inverted: {min} > {max}")]
    InvertedBounds {
        quantity: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{0} must be positive")]
    NotPositive(&'static str),
}
