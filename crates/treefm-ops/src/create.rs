//! Directory creation.

use std::fs;
use std::path::Path;

use treefm_core::{FmError, FmResult};

use crate::rename::validate_filename;

/// Create the directory at `path`, including missing parents.
///
/// An already existing directory is not an error.
pub fn create_directory(path: &Path) -> FmResult<String> {
    let path = std::path::absolute(path).map_err(|e| FmError::io(path, e))?;

    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        validate_filename(name)?;
    }

    if path.is_dir() {
        tracing::info!(target: "ops", "Directory '{}' - already exists", path.display());
        return Ok(format!("Directory '{}' already exists", path.display()));
    }

    fs::create_dir_all(&path).map_err(|e| FmError::io(&path, e))?;
    tracing::info!(target: "ops", "Directory '{}' - created", path.display());
    Ok(format!("Directory '{}' created", path.display()))
}
