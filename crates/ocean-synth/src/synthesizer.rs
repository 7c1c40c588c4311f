//! The synthetic ocean series generator.
//!
//! Every hourly sample `i` combines deterministic components (annual cycle
//! from the day of year, diurnal and tidal terms from `i`) with Gaussian
//! noise. The quantities are linked: the wave period is derived from the
//! unrounded wave height of the same sample.

use chrono::{Datelike, Duration, Local, NaiveDateTime};
use std::f64::consts::PI;
use tracing::{debug, warn};

use ocean_common::{
    round_to, PointValue, RegionConfig, RetrievalResult, RetrievalStatus, TimeSeriesPoint,
    TimeWindow,
};

use crate::noise::{EntropyNoise, NoiseSource};
use crate::profile::SynthesisProfile;
use crate::variables::Quantity;

const DAYS_PER_YEAR: f64 = 365.0;
const HOURS_PER_DAY: f64 = 24.0;

/// One hourly sample of the full linked bundle, already rounded for output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OceanSample {
    pub time: NaiveDateTime,
    /// Metres, 2 decimals.
    pub wave_height: f64,
    /// Metres, 2 decimals.
    pub sea_level: f64,
    /// °C, 1 decimal.
    pub water_temp: f64,
    /// 1 decimal.
    pub wind_speed: f64,
    /// Seconds, 1 decimal.
    pub wave_period: f64,
    /// Whole degrees in `[0, 360)`.
    pub wave_direction: i64,
    /// hPa, 1 decimal.
    pub pressure: f64,
}

impl OceanSample {
    pub fn value(&self, quantity: Quantity) -> PointValue {
        match quantity {
            Quantity::WaveHeight => PointValue::Float(self.wave_height),
            Quantity::SeaLevel => PointValue::Float(self.sea_level),
            Quantity::WaterTemp => PointValue::Float(self.water_temp),
            Quantity::WindSpeed => PointValue::Float(self.wind_speed),
            Quantity::WavePeriod => PointValue::Float(self.wave_period),
            Quantity::WaveDirection => PointValue::Integer(self.wave_direction),
            Quantity::Pressure => PointValue::Float(self.pressure),
        }
    }

    /// Value for a variable name, if the bundle carries it.
    pub fn value_of(&self, name: &str) -> Option<PointValue> {
        Quantity::from_name(name).map(|q| self.value(q))
    }

    /// Output point carrying every quantity under its own name.
    pub fn to_point(&self) -> TimeSeriesPoint {
        let mut point = TimeSeriesPoint::new(self.time);
        for quantity in Quantity::ALL {
            point.set(quantity.name(), Some(self.value(quantity)));
        }
        point
    }
}

/// Wave period for a given wave height and noise draw, clamped and rounded.
///
/// Non-decreasing in `wave_height` for a fixed noise draw.
///
/// ```
/// use ocean_synth::{wave_period_for, SynthesisProfile};
///
/// let profile = SynthesisProfile::default();
/// assert_eq!(wave_period_for(&profile, 2.0, 0.0), 9.0);
/// assert_eq!(wave_period_for(&profile, 20.0, 0.0), 15.0);
/// ```
pub fn wave_period_for(profile: &SynthesisProfile, wave_height: f64, noise: f64) -> f64 {
    let raw = profile.period_base_s + profile.period_per_height_s * wave_height + noise;
    round_to(raw.clamp(profile.period_min_s, profile.period_max_s), 1)
}

/// Whole-degree direction in `[0, 360)`, truncating the fraction.
fn whole_degrees(raw: f64) -> i64 {
    (raw.rem_euclid(360.0).trunc() as i64) % 360
}

/// Generates plausible ocean series when no real data can be had.
///
/// Never fails: malformed windows fall back to a default window starting now.
#[derive(Debug, Clone)]
pub struct SyntheticOceanSynthesizer<N = EntropyNoise> {
    profile: SynthesisProfile,
    noise: N,
}

impl SyntheticOceanSynthesizer<EntropyNoise> {
    /// Default profile with noise seeded from process entropy.
    pub fn from_entropy() -> Self {
        Self::new(SynthesisProfile::default(), EntropyNoise::from_entropy())
    }
}

impl<N: NoiseSource> SyntheticOceanSynthesizer<N> {
    pub fn new(profile: SynthesisProfile, noise: N) -> Self {
        Self { profile, noise }
    }

    /// Default profile with the given noise source.
    pub fn with_noise(noise: N) -> Self {
        Self::new(SynthesisProfile::default(), noise)
    }

    pub fn profile(&self) -> &SynthesisProfile {
        &self.profile
    }

    /// Parse the requested window, or use the default window starting at `now`.
    pub fn resolve_window(&self, start: &str, end: &str, now: NaiveDateTime) -> TimeWindow {
        match TimeWindow::parse(start, end) {
            Ok(window) if self.fits_series(&window) => window,
            Ok(window) => {
                warn!(
                    start = %window.start,
                    max_points = self.profile.max_points,
                    hours = self.profile.default_window_hours,
                    "Series would run past the last representable time, using default window"
                );
                TimeWindow::starting_at(now, self.profile.default_window_hours)
            }
            Err(e) => {
                warn!(
                    start = %start,
                    end = %end,
                    error = %e,
                    hours = self.profile.default_window_hours,
                    "Unparseable time window, using default window"
                );
                TimeWindow::starting_at(now, self.profile.default_window_hours)
            }
        }
    }

    /// Whether the longest series the profile allows can be stamped from `window.start`.
    fn fits_series(&self, window: &TimeWindow) -> bool {
        i64::try_from(self.profile.max_points)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|span| window.start.checked_add_signed(span))
            .is_some()
    }

    /// Sample `i` hours into the series, stamped at `time`.
    pub fn sample(&mut self, i: usize, time: NaiveDateTime) -> OceanSample {
        let p = &self.profile;
        let hour = i as f64;
        let annual =
            ((time.ordinal() as f64 - p.seasonal_phase_day) * 2.0 * PI / DAYS_PER_YEAR).sin();

        let wave_height = (p.wave_base_m
            + p.wave_seasonal_amplitude_m * annual
            + p.wave_diurnal_amplitude_m * (hour * p.wave_diurnal_rate).sin()
            + self.noise.gaussian(p.wave_noise_m))
        .max(p.wave_floor_m);

        let tidal_phase = hour / p.tide_period_hours * 2.0 * PI;
        let sea_level = p.tide_amplitude_m * tidal_phase.sin()
            + p.tide_harmonic_amplitude_m * (2.0 * tidal_phase).sin()
            + self.noise.gaussian(p.tide_noise_m);

        let water_temp = p.temp_mean_c
            + p.temp_seasonal_amplitude_c * annual
            + p.temp_diurnal_amplitude_c
                * ((hour - p.temp_reference_hour) * 2.0 * PI / HOURS_PER_DAY).sin()
            + self.noise.gaussian(p.temp_noise_c);

        let wind_speed = (p.wind_base
            + p.wind_amplitude * (hour * p.wind_rate).sin()
            + self.noise.gaussian(p.wind_noise))
        .max(0.0);

        let period_noise = self.noise.gaussian(p.period_noise_s);
        let wave_period = wave_period_for(p, wave_height, period_noise);

        let direction = p.direction_mean_deg
            + p.direction_amplitude_deg * (hour * p.direction_rate).sin()
            + self.noise.gaussian(p.direction_noise_deg);

        let pressure =
            p.pressure_mean_hpa + p.pressure_amplitude_hpa * (hour * p.pressure_rate).sin();

        OceanSample {
            time,
            wave_height: round_to(wave_height, 2),
            sea_level: round_to(sea_level, 2),
            water_temp: round_to(water_temp.clamp(p.temp_min_c, p.temp_max_c), 1),
            wind_speed: round_to(wind_speed, 1),
            wave_period,
            wave_direction: whole_degrees(direction),
            pressure: round_to(pressure, 1),
        }
    }

    /// Hourly samples from `window.start`, counted by the profile's point policy.
    pub fn series(&mut self, window: &TimeWindow) -> Vec<OceanSample> {
        let count = self.profile.point_count(window.duration_hours());
        let times: Vec<NaiveDateTime> = (0..count)
            .map_while(|i| {
                Duration::try_hours(i as i64).and_then(|h| window.start.checked_add_signed(h))
            })
            .collect();
        times
            .into_iter()
            .enumerate()
            .map(|(i, time)| self.sample(i, time))
            .collect()
    }

    /// Synthesize a complete result for the requested window.
    pub fn synthesize(
        &mut self,
        start: &str,
        end: &str,
        variables: &[String],
        region: &RegionConfig,
    ) -> RetrievalResult {
        self.synthesize_at(start, end, variables, region, Local::now().naive_local())
    }

    /// [`synthesize`](Self::synthesize) with an explicit "now" for the default window.
    pub fn synthesize_at(
        &mut self,
        start: &str,
        end: &str,
        variables: &[String],
        region: &RegionConfig,
        now: NaiveDateTime,
    ) -> RetrievalResult {
        let window = self.resolve_window(start, end, now);
        let points: Vec<TimeSeriesPoint> =
            self.series(&window).iter().map(OceanSample::to_point).collect();

        debug!(
            region = %region.name,
            start = %window.start,
            points = points.len(),
            "Synthesized ocean series"
        );

        RetrievalResult::new(
            region,
            region.synthetic_dataset_id.clone(),
            variables.to_vec(),
            points,
            RetrievalStatus::Success,
        )
        .with_source(format!("Simulated ocean data for {}", region.name))
        .with_note(format!("Based on typical patterns of the {} coast", region.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoNoise;
    use chrono::NaiveDate;

    fn jan15() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_whole_degrees() {
        assert_eq!(whole_degrees(250.7), 250);
        assert_eq!(whole_degrees(365.2), 5);
        assert_eq!(whole_degrees(-10.5), 349);
        assert_eq!(whole_degrees(-1e-17), 0);
    }

    #[test]
    fn test_noiseless_first_sample() {
        let mut synth = SyntheticOceanSynthesizer::with_noise(NoNoise);
        let s = synth.sample(0, jan15());

        // sin terms in i vanish at i = 0; the tide starts at zero
        assert_eq!(s.sea_level, 0.0);
        assert_eq!(s.wind_speed, 12.0);
        assert_eq!(s.pressure, 1013.0);
        assert_eq!(s.wave_direction, 250);
        // mid-January sits in the negative half of the annual cycle
        assert!(s.wave_height < 1.4 && s.wave_height > 1.0);
        assert!(s.water_temp < 17.0);
    }

    #[test]
    fn test_period_is_derived_from_height() {
        let mut synth = SyntheticOceanSynthesizer::with_noise(NoNoise);
        for i in 0..24 {
            let s = synth.sample(i, jan15() + Duration::hours(i as i64));
            let expected = wave_period_for(synth.profile(), s.wave_height, 0.0);
            assert!((s.wave_period - expected).abs() <= 0.1 + 1e-9);
        }
    }

    #[test]
    fn test_sample_point_carries_full_bundle() {
        let mut synth = SyntheticOceanSynthesizer::with_noise(NoNoise);
        let point = synth.sample(3, jan15()).to_point();
        for q in Quantity::ALL {
            assert!(point.get(q.name()).flatten().is_some(), "{} missing", q.name());
        }
        assert!(matches!(
            point.get("wave_direction").flatten(),
            Some(PointValue::Integer(_))
        ));
    }
}
