//! File operations engine for treefm.
//!
//! This crate provides the recursive transfer engine (copy and move, with
//! an interactive overwrite policy shared across one whole traversal) and
//! the single-entity operations (create directory, rename, delete).
//!
//! All operations are synchronous. Per-item failures are logged through
//! `tracing` and counted; only failures that make the whole operation
//! impossible are returned as errors.

mod conflict;
mod create;
mod delete;
mod rename;
mod summary;
mod transfer;

pub use conflict::{ConflictResolver, FixedResolver, OverwritePolicy, ScriptedResolver};
pub use create::create_directory;
pub use delete::delete;
pub use rename::{rename, validate_filename};
pub use summary::{TransferKind, TransferSummary};
pub use transfer::{copy, copy_or_move, move_to, resolve_target};
