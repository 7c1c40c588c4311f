//! Synthetic coastal ocean time series.
//!
//! [`SyntheticOceanSynthesizer`] produces hourly samples of wave height, sea
//! level, water temperature, wind, wave period, wave direction and pressure
//! whose shapes follow the region's typical patterns. It is the terminal
//! fallback of a retrieval and always returns a well-formed result.
//!
//! ```
//! use ocean_common::RegionConfig;
//! use ocean_synth::{GaussianNoise, SynthesisProfile, SyntheticOceanSynthesizer};
//!
//! let mut synth = SyntheticOceanSynthesizer::new(SynthesisProfile::default(), GaussianNoise::seeded(7));
//! let result = synth.synthesize(
//!     "2024-01-15T00:00:00",
//!     "2024-01-15T12:00:00",
//!     &["VHM0".to_string(), "zos".to_string()],
//!     &RegionConfig::default(),
//! );
//! assert_eq!(result.total_points(), 12);
//! ```

pub mod noise;
pub mod profile;
pub mod synthesizer;
pub mod variables;

pub use noise::{EntropyNoise, GaussianNoise, NoNoise, NoiseSource};
pub use profile::{ProfileError, SynthesisProfile};
pub use synthesizer::{wave_period_for, OceanSample, SyntheticOceanSynthesizer};
pub use variables::{is_synthesizable, Quantity};
