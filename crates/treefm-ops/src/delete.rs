//! Deletion of files and whole directory trees.

use std::fs;
use std::path::Path;

use treefm_core::{FmError, FmResult};

/// Delete `path`; directories are removed with everything below them.
pub fn delete(path: &Path) -> FmResult<String> {
    let path = std::path::absolute(path).map_err(|e| FmError::io(path, e))?;
    let metadata = fs::symlink_metadata(&path).map_err(|e| FmError::io(&path, e))?;

    if metadata.is_dir() {
        fs::remove_dir_all(&path).map_err(|e| FmError::io(&path, e))?;
        tracing::info!(target: "ops", "Directory '{}' - deleted", path.display());
        Ok(format!("Directory '{}' deleted", path.display()))
    } else {
        fs::remove_file(&path).map_err(|e| FmError::io(&path, e))?;
        tracing::info!(target: "ops", "File '{}' - deleted", path.display());
        Ok(format!("File '{}' deleted", path.display()))
    }
}
