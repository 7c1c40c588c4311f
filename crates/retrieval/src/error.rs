//! Error types for the retrieval paths.

use grid_extract::GridError;
use thiserror::Error;

/// Errors that end a real-data attempt.
///
/// The orchestrator turns every one of these into a synthetic fallback; only
/// the strict variant surfaces them to the caller.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// The acquired grid is missing an axis or has an unusable layout.
    #[error("Schema error: {0}")]
    Schema(String),

    /// The acquisition produced no grid files or no time steps.
    #[error("No data: {0}")]
    NoData(String),

    /// The acquisition tool failed, or its output could not be read.
    #[error("Acquisition failed: {0}")]
    Acquisition(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<GridError> for RetrievalError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::Schema(msg) | GridError::Shape(msg) => RetrievalError::Schema(msg),
            GridError::Load(msg) => RetrievalError::Acquisition(msg),
            GridError::Io(e) => RetrievalError::Io(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, RetrievalError>;
