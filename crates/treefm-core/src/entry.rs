//! Listing entry types.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// What a listing row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum EntryKind {
    /// A storage volume (only listed when no root directory is set).
    Drive,
    /// A directory.
    Directory,
    /// A file (anything that is not a directory).
    File,
}

/// Position of an entry among its siblings, used to draw tree lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PositionTag {
    /// First of several siblings.
    First,
    /// Neither first nor last.
    #[default]
    Middle,
    /// Last of several siblings.
    Last,
    /// The only entry of its sibling run.
    Only,
}

impl PositionTag {
    /// Tag for the entry at `index` within a sibling run of `len` entries.
    pub fn for_position(index: usize, len: usize) -> Self {
        let first = index == 0;
        let last = index + 1 >= len;
        match (first, last) {
            (true, true) => Self::Only,
            (true, false) => Self::First,
            (false, true) => Self::Last,
            (false, false) => Self::Middle,
        }
    }

    /// Whether this entry opens its sibling run.
    pub fn is_first(self) -> bool {
        matches!(self, Self::First | Self::Only)
    }

    /// Whether this entry closes its sibling run.
    pub fn is_last(self) -> bool {
        matches!(self, Self::Last | Self::Only)
    }
}

/// One row of a listing snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Kind of file system object.
    pub kind: EntryKind,
    /// Display name (leaf component, or the mount point for drives).
    pub name: CompactString,
    /// Absolute path; unique within one snapshot.
    pub path: PathBuf,
    /// Nesting level below the listing root, in `0..=2`.
    pub depth: usize,
    /// Position among siblings.
    pub tag: PositionTag,
}

impl Entry {
    /// Create a new entry.
    pub fn new(
        kind: EntryKind,
        name: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        depth: usize,
        tag: PositionTag,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            path: path.into(),
            depth,
            tag,
        }
    }

    /// Check whether this entry refers to `path`, ignoring ASCII and Unicode case.
    pub fn matches_path(&self, path: &Path) -> bool {
        same_path(&self.path, path)
    }
}

/// Compare two paths component by component, case-insensitively.
pub fn same_path(a: &Path, b: &Path) -> bool {
    let mut left = a.components();
    let mut right = b.components();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(l), Some(r)) => {
                let l = l.as_os_str().to_string_lossy();
                let r = r.as_os_str().to_string_lossy();
                if l != r && l.to_lowercase() != r.to_lowercase() {
                    return false;
                }
            }
            _ => return false,
        }
    }
}
