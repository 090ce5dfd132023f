//! Per-transfer counters and their summary.

use serde::{Deserialize, Serialize};

/// Which transfer was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum TransferKind {
    Copy,
    Move,
}

/// Outcome counters of one copy or move.
///
/// The counters are diagnostic: skipped and failed items lower the
/// processed counts but never turn the transfer into an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSummary {
    /// Copy or move.
    pub kind: TransferKind,
    /// Directories encountered.
    pub total_dirs: usize,
    /// Directories fully handled (for a move: the source was removed).
    pub processed_dirs: usize,
    /// Files encountered.
    pub total_files: usize,
    /// Files copied (and, for a move, whose copy succeeded).
    pub processed_files: usize,
}

impl TransferSummary {
    /// Create zeroed counters for a transfer.
    pub fn new(kind: TransferKind) -> Self {
        Self {
            kind,
            total_dirs: 0,
            processed_dirs: 0,
            total_files: 0,
            processed_files: 0,
        }
    }

    /// Check if every encountered item was processed.
    pub fn is_complete(&self) -> bool {
        self.processed_dirs == self.total_dirs && self.processed_files == self.total_files
    }
}

impl std::fmt::Display for TransferSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} complete.", self.kind)?;
        writeln!(
            f,
            "  processed directories: {} from {}",
            self.processed_dirs, self.total_dirs
        )?;
        write!(
            f,
            "        processed files: {} from {}",
            self.processed_files, self.total_files
        )
    }
}
