//! Scripted stand-ins for the acquisition tool and the grid file reader.
//!
//! [`FakeAcquirer`] writes empty placeholder `.nc` files (or fails) and
//! records every request; [`StaticLoader`] hands back a prepared dataset for
//! whatever file it is asked to read.

use grid_extract::{GridError, GridLoader, GriddedDataset};
use retrieval::{Acquirer, Availability, RetrievalError, SubsetRequest};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// What a [`FakeAcquirer`] does when asked for a subset.
#[derive(Debug, Clone)]
pub enum SubsetBehavior {
    /// Write this many placeholder grid files.
    WriteFiles(usize),
    /// Fail with an acquisition error carrying this message.
    Fail(String),
}

/// An [`Acquirer`] with scripted availability and subset outcome.
#[derive(Debug)]
pub struct FakeAcquirer {
    availability: Availability,
    behavior: SubsetBehavior,
    requests: RefCell<Vec<SubsetRequest>>,
    output_dirs: RefCell<Vec<PathBuf>>,
}

impl FakeAcquirer {
    fn new(availability: Availability, behavior: SubsetBehavior) -> Self {
        Self {
            availability,
            behavior,
            requests: RefCell::new(Vec::new()),
            output_dirs: RefCell::new(Vec::new()),
        }
    }

    /// Available, writes `n` files per subset.
    pub fn writing(n: usize) -> Self {
        Self::new(Availability::Available, SubsetBehavior::WriteFiles(n))
    }

    /// Available, but every subset fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(
            Availability::Available,
            SubsetBehavior::Fail(message.into()),
        )
    }

    /// Reports itself unavailable; subset must never be called.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(
            Availability::Unavailable(reason.into()),
            SubsetBehavior::Fail("subset called on unavailable acquirer".to_string()),
        )
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<SubsetRequest> {
        self.requests.borrow().clone()
    }

    /// Output directories handed to `subset` so far.
    pub fn output_dirs(&self) -> Vec<PathBuf> {
        self.output_dirs.borrow().clone()
    }
}

impl Acquirer for FakeAcquirer {
    fn availability(&self) -> Availability {
        self.availability.clone()
    }

    fn subset(&self, request: &SubsetRequest, output_dir: &Path) -> retrieval::Result<()> {
        self.requests.borrow_mut().push(request.clone());
        self.output_dirs.borrow_mut().push(output_dir.to_path_buf());

        match &self.behavior {
            SubsetBehavior::WriteFiles(n) => {
                for i in 0..*n {
                    std::fs::write(output_dir.join(format!("subset_{:02}.nc", i)), b"")?;
                }
                Ok(())
            }
            SubsetBehavior::Fail(message) => Err(RetrievalError::Acquisition(message.clone())),
        }
    }
}

/// A [`GridLoader`] that returns a fixed dataset, or a fixed load error.
#[derive(Debug)]
pub struct StaticLoader {
    dataset: Option<GriddedDataset>,
    loaded: RefCell<Vec<PathBuf>>,
}

impl StaticLoader {
    pub fn new(dataset: GriddedDataset) -> Self {
        Self {
            dataset: Some(dataset),
            loaded: RefCell::new(Vec::new()),
        }
    }

    /// Every load fails as if the file were corrupt.
    pub fn corrupt() -> Self {
        Self {
            dataset: None,
            loaded: RefCell::new(Vec::new()),
        }
    }

    /// Paths loaded so far.
    pub fn loaded(&self) -> Vec<PathBuf> {
        self.loaded.borrow().clone()
    }
}

impl GridLoader for StaticLoader {
    fn load(&self, path: &Path) -> grid_extract::Result<GriddedDataset> {
        self.loaded.borrow_mut().push(path.to_path_buf());
        self.dataset
            .clone()
            .ok_or_else(|| GridError::load(format!("corrupt grid file {}", path.display())))
    }
}
