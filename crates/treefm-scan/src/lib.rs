//! Directory scanning and listing model for treefm.
//!
//! # Overview
//!
//! `treefm-scan` turns a directory (or the set of mounted volumes) into an
//! ordered, tree-shaped snapshot of [`Entry`] rows and keeps the session
//! state that goes with it:
//!
//! - **Bounded scan**: pre-order, directories before files, never deeper
//!   than [`MAX_SCAN_DEPTH`] levels below the root
//! - **Position tags** computed once per sibling run for tree drawing
//! - **Pagination** and **selection** that survive reloads and root changes
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use treefm_scan::Listing;
//!
//! let mut listing = Listing::new();
//! listing.set_root(Some(Path::new("/srv/data"))).unwrap();
//! listing.set_selection(3).unwrap();
//!
//! for (number, entry) in listing.page_entries() {
//!     println!("{number:>3}. {}{}", "  ".repeat(entry.depth), entry.name);
//! }
//! ```

mod listing;
mod scanner;
mod volumes;

pub use listing::{Listing, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use scanner::{scan_root, MAX_SCAN_DEPTH};
pub use volumes::{FixedVolumes, SystemVolumes, VolumeSource};

// Re-export core types for convenience
pub use treefm_core::{Entry, EntryKind, FmError, FmResult, PositionTag, Settings};
