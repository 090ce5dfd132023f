//! Core types for treefm.
//!
//! This crate provides the data structures shared by the listing model,
//! the transfer engine, and the command shell: listing entries and their
//! tree position tags, the error taxonomy, and persisted session settings.

mod entry;
mod error;
mod settings;

pub use entry::{same_path, Entry, EntryKind, PositionTag};
pub use error::{FmError, FmResult};
pub use settings::Settings;
