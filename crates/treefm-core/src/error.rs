//! Error types for listing and file operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across treefm crates.
pub type FmResult<T> = Result<T, FmError>;

/// Errors surfaced by top-level listing and file operations.
///
/// Per-item faults inside a scan or a transfer are logged and skipped;
/// they never become an `FmError`.
#[derive(Debug, Error)]
pub enum FmError {
    /// A parameter is outside its accepted range.
    #[error("{message}")]
    Validation { message: String },

    /// A selection number is outside the current listing.
    #[error("Selection must be in range [1..{count}]")]
    Range { count: usize },

    /// Path does not exist.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Path exists but is not part of the current listing.
    #[error("File or folder '{path}' is not found in the list.")]
    NotInListing { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copy or move of an item onto itself or into its own subtree.
    #[error("It is not possible to copy or move '{path}' onto itself")]
    SelfOperation { path: PathBuf },
}

impl FmError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
