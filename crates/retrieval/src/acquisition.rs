//! The acquisition collaborator and the scratch area it writes into.
//!
//! An [`Acquirer`] writes zero or more grid files for a [`SubsetRequest`]
//! into a directory. [`acquire_dataset`] runs one acquisition inside a fresh
//! [`ScratchDir`], opens the first grid file with a [`GridLoader`] and
//! removes the directory again on every exit path.

use grid_extract::{find_grid_files, GridLoader, GriddedDataset};
use ocean_common::{format_timestamp, BoundingBox, TimeWindow};
use std::path::Path;
use tempfile::TempDir;
use tracing::{debug, info};

use crate::error::{Result, RetrievalError};

/// Prefix of every scratch directory.
pub const SCRATCH_PREFIX: &str = "cmems_";

/// Whether an acquirer can be tried at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available,
    /// A required capability is missing; the reason ends up in the note.
    Unavailable(String),
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

/// What to fetch from the remote catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetRequest {
    pub dataset_id: String,
    pub variables: Vec<String>,
    pub bbox: BoundingBox,
    pub window: TimeWindow,
}

/// External collaborator that materializes a dataset subset as grid files.
///
/// Calls are blocking with no timeout of their own.
pub trait Acquirer {
    fn availability(&self) -> Availability;

    /// Write the subset into `output_dir`. Writing nothing is not an error here.
    fn subset(&self, request: &SubsetRequest, output_dir: &Path) -> Result<()>;
}

impl<T: Acquirer + ?Sized> Acquirer for &T {
    fn availability(&self) -> Availability {
        (**self).availability()
    }

    fn subset(&self, request: &SubsetRequest, output_dir: &Path) -> Result<()> {
        (**self).subset(request, output_dir)
    }
}

impl<T: Acquirer + ?Sized> Acquirer for Box<T> {
    fn availability(&self) -> Availability {
        (**self).availability()
    }

    fn subset(&self, request: &SubsetRequest, output_dir: &Path) -> Result<()> {
        (**self).subset(request, output_dir)
    }
}

/// Per-invocation temporary directory, deleted when dropped.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir()?;
        debug!(path = %dir.path().display(), "Created scratch directory");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Acquire a subset and load its first grid file.
///
/// Zero grid files is a [`RetrievalError::NoData`].
pub fn acquire_dataset<A, L>(
    acquirer: &A,
    loader: &L,
    request: &SubsetRequest,
) -> Result<GriddedDataset>
where
    A: Acquirer + ?Sized,
    L: GridLoader + ?Sized,
{
    let scratch = ScratchDir::new()?;

    info!(
        dataset_id = %request.dataset_id,
        variables = ?request.variables,
        start = %format_timestamp(&request.window.start),
        end = %format_timestamp(&request.window.end),
        "Requesting dataset subset"
    );
    acquirer.subset(request, scratch.path())?;

    let files = find_grid_files(scratch.path())?;
    let first = files.first().ok_or_else(|| {
        RetrievalError::NoData(format!(
            "no grid files returned for dataset '{}'",
            request.dataset_id
        ))
    })?;
    if files.len() > 1 {
        debug!(files = files.len(), using = %first.display(), "Several grid files returned");
    }

    let dataset = loader.load(first)?;
    info!(
        dataset_id = %request.dataset_id,
        file = %first.display(),
        "Loaded acquired subset"
    );
    Ok(dataset)
}
