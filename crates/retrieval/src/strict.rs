//! Retrieval without a synthetic fallback.
//!
//! The caller's dataset, variables, bbox and window are used as given and the
//! extracted values are returned unrounded for every time step. Any failure
//! is returned to the caller.

use grid_extract::{GridLoader, GridPointExtractor};
use ocean_common::{RegionConfig, RetrievalResult, RetrievalStatus, TimeSeriesPoint};
use tracing::info;

use crate::acquisition::{acquire_dataset, Acquirer, Availability, SubsetRequest};
use crate::error::{Result, RetrievalError};

/// Fetch one subset and reduce it to the series at `region.center`.
///
/// Variables missing from the acquired grid are left out of the points.
pub fn fetch_timeseries<A, L>(
    acquirer: &A,
    loader: &L,
    region: &RegionConfig,
    request: &SubsetRequest,
) -> Result<RetrievalResult>
where
    A: Acquirer + ?Sized,
    L: GridLoader + ?Sized,
{
    if let Availability::Unavailable(reason) = acquirer.availability() {
        return Err(RetrievalError::Acquisition(format!(
            "acquisition unavailable: {}",
            reason
        )));
    }

    let dataset = acquire_dataset(acquirer, loader, request)?;
    let series = GridPointExtractor::new().extract(&dataset, region.center, &request.variables)?;

    let points: Vec<TimeSeriesPoint> = series
        .times
        .iter()
        .enumerate()
        .map(|(i, &time)| {
            let mut point = TimeSeriesPoint::new(time);
            for variable in series.variables() {
                point.set_float(variable, series.value(variable, i));
            }
            point
        })
        .collect();

    info!(
        dataset_id = %request.dataset_id,
        points = points.len(),
        variables = ?series.variables().collect::<Vec<_>>(),
        "Fetched time series"
    );

    Ok(RetrievalResult::new(
        region,
        request.dataset_id.clone(),
        request.variables.clone(),
        points,
        RetrievalStatus::Success,
    ))
}
