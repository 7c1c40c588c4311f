//! Error types for grid extraction.

use thiserror::Error;

/// Errors that can occur while loading or reducing a gridded dataset.
#[derive(Error, Debug)]
pub enum GridError {
    /// The dataset lacks an expected axis or a variable cannot be reduced.
    #[error("schema error: {0}")]
    Schema(String),

    /// A variable's buffer does not match its declared shape.
    #[error("shape mismatch: {0}")]
    Shape(String),

    /// A grid file could not be opened or decoded.
    #[error("failed to load grid: {0}")]
    Load(String),

    /// Storage/IO error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GridError {
    /// Create a Schema error.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a Load error.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }
}

/// Result type for grid extraction operations.
pub type Result<T> = std::result::Result<T, GridError>;
