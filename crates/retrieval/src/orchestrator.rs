//! Real-data attempt with synthetic fallback.
//!
//! A run moves through three states:
//!
//! ```text
//! Attempting ──ok──▶ Hybrid    (status "hybrid")
//!     │
//!     ├─unavailable─▶ Fallback (status "success", fully simulated)
//!     └─any error───▶ Fallback (status "fallback", error text in the note)
//! ```
//!
//! Partial real data is discarded on failure; the fallback always covers the
//! caller's window and variables.

use chrono::{Local, NaiveDateTime};
use grid_extract::{GridLoader, GridPointExtractor, PointSeries};
use ocean_common::{round_to, RegionConfig, RetrievalResult, RetrievalStatus, TimeSeriesPoint};
use ocean_synth::variables::{MEAN_WAVE_DIRECTION, MEAN_WAVE_PERIOD, SEA_LEVEL, WAVE_HEIGHT};
use ocean_synth::{
    is_synthesizable, EntropyNoise, NoiseSource, OceanSample, SyntheticOceanSynthesizer,
};
use tracing::{debug, info, warn};

use crate::acquisition::{acquire_dataset, Acquirer, Availability, SubsetRequest};
use crate::config::AcquisitionConfig;
use crate::error::{Result, RetrievalError};
use crate::tide::inline_tide;

/// Variables the wave product can supply.
pub const WAVE_VARIABLES: [&str; 3] = [WAVE_HEIGHT, MEAN_WAVE_PERIOD, MEAN_WAVE_DIRECTION];

/// Requested wave variables, or just wave height when none were requested.
pub fn wave_variables(requested: &[String]) -> Vec<String> {
    let waves: Vec<String> = requested
        .iter()
        .filter(|v| WAVE_VARIABLES.contains(&v.as_str()))
        .cloned()
        .collect();
    if waves.is_empty() {
        vec![WAVE_HEIGHT.to_string()]
    } else {
        waves
    }
}

/// What the caller asked for. Timestamps stay raw so malformed input can
/// still be answered with the default window.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalRequest {
    pub start: String,
    pub end: String,
    pub variables: Vec<String>,
}

impl RetrievalRequest {
    pub fn new(start: impl Into<String>, end: impl Into<String>, variables: Vec<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            variables,
        }
    }

    /// Split a comma-separated variable list, dropping blanks.
    pub fn parse_variables(csv: &str) -> Vec<String> {
        csv.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Why the run ended in the fallback state.
#[derive(Debug)]
pub enum FallbackCause {
    /// The acquirer could not be tried at all.
    Unavailable(String),
    /// The real-data attempt failed.
    Failed(RetrievalError),
}

/// States of one retrieval run.
#[derive(Debug)]
pub enum RetrievalState {
    Attempting,
    Hybrid(RetrievalResult),
    Fallback(FallbackCause),
}

/// Sequences the real-data attempt and the synthetic fallback.
pub struct RetrievalOrchestrator<A, L, N = EntropyNoise> {
    region: RegionConfig,
    config: AcquisitionConfig,
    acquirer: A,
    loader: L,
    extractor: GridPointExtractor,
    synthesizer: SyntheticOceanSynthesizer<N>,
}

impl<A: Acquirer, L: GridLoader> RetrievalOrchestrator<A, L> {
    /// Orchestrator with a synthesizer seeded from process entropy.
    pub fn new(region: RegionConfig, config: AcquisitionConfig, acquirer: A, loader: L) -> Self {
        Self::with_synthesizer(
            region,
            config,
            acquirer,
            loader,
            SyntheticOceanSynthesizer::from_entropy(),
        )
    }
}

impl<A: Acquirer, L: GridLoader, N: NoiseSource> RetrievalOrchestrator<A, L, N> {
    pub fn with_synthesizer(
        region: RegionConfig,
        config: AcquisitionConfig,
        acquirer: A,
        loader: L,
        synthesizer: SyntheticOceanSynthesizer<N>,
    ) -> Self {
        Self {
            region,
            config,
            acquirer,
            loader,
            extractor: GridPointExtractor::new(),
            synthesizer,
        }
    }

    pub fn region(&self) -> &RegionConfig {
        &self.region
    }

    pub fn acquirer(&self) -> &A {
        &self.acquirer
    }

    /// Produce a result for `request`. Never fails.
    pub fn run(&mut self, request: &RetrievalRequest) -> RetrievalResult {
        self.run_at(request, Local::now().naive_local())
    }

    /// [`run`](Self::run) with an explicit "now" for the default window.
    pub fn run_at(&mut self, request: &RetrievalRequest, now: NaiveDateTime) -> RetrievalResult {
        let mut state = RetrievalState::Attempting;
        loop {
            state = match state {
                RetrievalState::Attempting => self.attempt(request, now),
                RetrievalState::Hybrid(result) => {
                    info!(
                        status = "hybrid",
                        dataset_id = %result.dataset_id(),
                        points = result.total_points(),
                        "Retrieval finished with real wave data"
                    );
                    return result;
                }
                RetrievalState::Fallback(cause) => return self.fallback(cause, request, now),
            };
        }
    }

    fn attempt(&mut self, request: &RetrievalRequest, now: NaiveDateTime) -> RetrievalState {
        if let Availability::Unavailable(reason) = self.acquirer.availability() {
            return RetrievalState::Fallback(FallbackCause::Unavailable(reason));
        }

        match self.hybrid(request, now) {
            Ok(result) => RetrievalState::Hybrid(result),
            Err(e) => {
                warn!(error = %e, "Real-data attempt failed");
                RetrievalState::Fallback(FallbackCause::Failed(e))
            }
        }
    }

    fn hybrid(
        &mut self,
        request: &RetrievalRequest,
        now: NaiveDateTime,
    ) -> Result<RetrievalResult> {
        let requested = self.synthesizer.resolve_window(&request.start, &request.end, now);
        let subset = SubsetRequest {
            dataset_id: self.config.wave_dataset_id.clone(),
            variables: wave_variables(&request.variables),
            bbox: self.region.bbox,
            window: self.config.window.resolve(requested),
        };

        let dataset = acquire_dataset(&self.acquirer, &self.loader, &subset)?;
        let series = self
            .extractor
            .extract(&dataset, self.region.center, &subset.variables)?;
        if series.is_empty() {
            return Err(RetrievalError::NoData(format!(
                "dataset '{}' has no time steps",
                subset.dataset_id
            )));
        }

        let steps = series.len().min(self.config.max_points);
        debug!(
            available = series.len(),
            kept = steps,
            lat = series.point.lat,
            lon = series.point.lon,
            "Merging real wave data"
        );
        let points: Vec<TimeSeriesPoint> = (0..steps)
            .map(|i| self.merge_point(&series, i, &request.variables))
            .collect();

        Ok(RetrievalResult::new(
            &self.region,
            subset.dataset_id,
            request.variables.clone(),
            points,
            RetrievalStatus::Hybrid,
        )
        .with_note("real wave data + simulated tide"))
    }

    /// Real values at step `i`, with still-missing requested variables backfilled.
    fn merge_point(
        &mut self,
        series: &PointSeries,
        i: usize,
        requested: &[String],
    ) -> TimeSeriesPoint {
        let time = series.times[i];
        let mut point = TimeSeriesPoint::new(time);
        for variable in series.variables() {
            point.set_float(variable, series.value(variable, i).map(|v| round_to(v, 2)));
        }

        let mut sample: Option<OceanSample> = None;
        for variable in requested {
            if point.contains(variable) {
                continue;
            }
            if variable == SEA_LEVEL {
                point.set_float(variable.as_str(), Some(inline_tide(i)));
            } else if is_synthesizable(variable) {
                let synthetic = *sample.get_or_insert_with(|| self.synthesizer.sample(i, time));
                point.set(variable.as_str(), synthetic.value_of(variable));
            } else {
                point.set(variable.as_str(), None);
            }
        }
        point
    }

    fn fallback(
        &mut self,
        cause: FallbackCause,
        request: &RetrievalRequest,
        now: NaiveDateTime,
    ) -> RetrievalResult {
        let result = self.synthesizer.synthesize_at(
            &request.start,
            &request.end,
            &request.variables,
            &self.region,
            now,
        );

        match cause {
            FallbackCause::Unavailable(reason) => {
                info!(
                    status = "success",
                    reason = %reason,
                    points = result.total_points(),
                    "Acquisition unavailable, returning simulated data"
                );
                result.with_note(format!(
                    "acquisition unavailable ({}) - fully simulated data",
                    reason
                ))
            }
            FallbackCause::Failed(err) => {
                info!(
                    status = "fallback",
                    points = result.total_points(),
                    "Returning simulated data after failed acquisition"
                );
                result
                    .with_status(RetrievalStatus::Fallback)
                    .with_note(format!("acquisition failed ({}) - using simulated data", err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_wave_variables() {
        assert_eq!(wave_variables(&vars(&["VHM0", "zos"])), vars(&["VHM0"]));
        assert_eq!(wave_variables(&vars(&["zos", "VMDR", "VTM02"])), vars(&["VMDR", "VTM02"]));
        assert_eq!(wave_variables(&vars(&["zos"])), vars(&["VHM0"]));
        assert_eq!(wave_variables(&[]), vars(&["VHM0"]));
    }

    #[test]
    fn test_parse_variables() {
        assert_eq!(RetrievalRequest::parse_variables("VHM0, zos,,"), vars(&["VHM0", "zos"]));
        assert!(RetrievalRequest::parse_variables(" , ").is_empty());
    }
}
