//! Loading grid files written by an acquisition step.

use std::path::{Path, PathBuf};

use crate::dataset::GriddedDataset;
use crate::error::{GridError, Result};

/// Extension of the grid files an acquisition step produces.
pub const GRID_FILE_EXTENSION: &str = "nc";

/// Turns a grid file on disk into a [`GriddedDataset`].
pub trait GridLoader {
    fn load(&self, path: &Path) -> Result<GriddedDataset>;
}

impl<T: GridLoader + ?Sized> GridLoader for &T {
    fn load(&self, path: &Path) -> Result<GriddedDataset> {
        (**self).load(path)
    }
}

impl<T: GridLoader + ?Sized> GridLoader for Box<T> {
    fn load(&self, path: &Path) -> Result<GriddedDataset> {
        (**self).load(path)
    }
}

/// Loader for builds without any grid file format compiled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedLoader;

impl GridLoader for UnsupportedLoader {
    fn load(&self, path: &Path) -> Result<GriddedDataset> {
        Err(GridError::load(format!(
            "no grid file format support compiled in, cannot read {}",
            path.display()
        )))
    }
}

/// List grid files (`*.nc`) in a directory, recursively, sorted by path.
pub fn find_grid_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir).follow_links(false) {
        let entry =
            entry.map_err(|e| GridError::load(format!("cannot scan {}: {}", dir.display(), e)))?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(GRID_FILE_EXTENSION)
        {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
