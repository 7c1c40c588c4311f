//! Ocean time series retrieval for a coastal region.
//!
//! - [`RetrievalOrchestrator`] tries real wave data first and always answers,
//!   falling back to [`ocean_synth::SyntheticOceanSynthesizer`]
//! - [`fetch_timeseries`] is the strict variant that reports failures instead
//! - [`Acquirer`] is the seam to the remote catalogue; [`CopernicusMarineCli`]
//!   drives the `copernicusmarine` command line tool

pub mod acquisition;
pub mod config;
pub mod copernicus;
pub mod error;
pub mod orchestrator;
pub mod strict;
pub mod tide;

pub use acquisition::{
    acquire_dataset, Acquirer, Availability, ScratchDir, SubsetRequest, SCRATCH_PREFIX,
};
pub use config::{AcquisitionConfig, AcquisitionWindow, DEFAULT_WAVE_DATASET_ID};
pub use copernicus::{CopernicusMarineCli, DEFAULT_PROGRAM};
pub use error::{Result, RetrievalError};
pub use orchestrator::{
    wave_variables, FallbackCause, RetrievalOrchestrator, RetrievalRequest, RetrievalState,
    WAVE_VARIABLES,
};
pub use strict::fetch_timeseries;
pub use tide::inline_tide;

/// Grid loader used for acquired subsets.
#[cfg(feature = "netcdf")]
pub type DefaultLoader = grid_extract::NetCdfLoader;

/// Grid loader used for acquired subsets.
#[cfg(not(feature = "netcdf"))]
pub type DefaultLoader = grid_extract::UnsupportedLoader;
