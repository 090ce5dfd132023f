//! Paginated listing with selection tracking.

use std::path::{Path, PathBuf};

use treefm_core::{same_path, Entry, FmError, FmResult, Settings};

use crate::scanner::scan_root;
use crate::volumes::{SystemVolumes, VolumeSource};

/// Page size used until the user or saved settings pick another.
pub const DEFAULT_PAGE_SIZE: usize = 22;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: usize = 100;

/// Session state for the current listing: snapshot, root, page, selection.
///
/// The snapshot is replaced wholesale on every scan. The selection is an
/// index into the current snapshot and is re-resolved by path whenever the
/// root changes.
pub struct Listing {
    entries: Vec<Entry>,
    root: Option<PathBuf>,
    page_size: usize,
    page_number: usize,
    selected: Option<usize>,
    volumes: Box<dyn VolumeSource>,
}

impl std::fmt::Debug for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listing")
            .field("root", &self.root)
            .field("entries", &self.entries.len())
            .field("page_size", &self.page_size)
            .field("page_number", &self.page_number)
            .field("selected", &self.selected)
            .finish()
    }
}

impl Default for Listing {
    fn default() -> Self {
        Self::new()
    }
}

impl Listing {
    /// Create an empty listing that enumerates the system's volumes.
    pub fn new() -> Self {
        Self::with_volumes(Box::new(SystemVolumes))
    }

    /// Create an empty listing with a custom volume source.
    ///
    /// Nothing is scanned until [`set_root`](Self::set_root) or
    /// [`reload`](Self::reload) is called.
    pub fn with_volumes(volumes: Box<dyn VolumeSource>) -> Self {
        Self {
            entries: Vec::new(),
            root: None,
            page_size: DEFAULT_PAGE_SIZE,
            page_number: 1,
            selected: None,
            volumes,
        }
    }

    /// Restore a session from saved settings and load its listing.
    ///
    /// Out-of-range values are ignored, a folder that no longer exists
    /// falls back to the drive listing, and a saved selection that is still
    /// present moves the view to its page.
    pub fn from_settings(settings: &Settings, volumes: Box<dyn VolumeSource>) -> Self {
        let mut listing = Self::with_volumes(volumes);

        if let Some(size) = settings.page_size.filter(|n| (1..=MAX_PAGE_SIZE).contains(n)) {
            listing.page_size = size;
        }
        if let Some(page) = settings.page_number.filter(|n| *n > 0) {
            listing.page_number = page;
        }

        listing.root = settings.folder.as_ref().filter(|f| f.is_dir()).cloned();
        if let Some(dir) = &listing.root {
            if let Err(e) = std::env::set_current_dir(dir) {
                tracing::warn!(target: "listing", "cannot enter {}: {e}", dir.display());
            }
        }

        if let Err(e) = listing.reload() {
            tracing::warn!(target: "listing", "falling back to drive list: {e}");
            listing.root = None;
            if let Err(e) = listing.reload() {
                tracing::warn!(target: "listing", "drive list unavailable: {e}");
            }
        }

        if let Some(index) = settings
            .selected
            .as_deref()
            .and_then(|path| listing.position_of(path))
        {
            listing.selected = Some(index);
            listing.page_number = index / listing.page_size + 1;
        }

        listing
    }

    /// Capture the session for persistence.
    pub fn to_settings(&self) -> Settings {
        Settings {
            page_size: Some(self.page_size),
            page_number: Some(self.page_number),
            folder: self.root.clone(),
            selected: self.selected_path().map(Path::to_path_buf),
        }
    }

    /// Change the listing root and rescan.
    ///
    /// `None` (or an empty path) lists drives. On failure the snapshot,
    /// root, page, and selection are left untouched. On success the process
    /// working directory follows the new root.
    pub fn set_root(&mut self, path: Option<&Path>) -> FmResult<()> {
        let root = match path {
            Some(p) if !p.as_os_str().is_empty() => {
                Some(std::path::absolute(p).map_err(|e| FmError::io(p, e))?)
            }
            _ => None,
        };

        let entries = scan_root(root.as_deref(), self.volumes.as_ref())?;

        if let Some(dir) = &root {
            std::env::set_current_dir(dir).map_err(|e| FmError::io(dir, e))?;
        }

        let changed = match (&self.root, &root) {
            (None, None) => false,
            (Some(old), Some(new)) => !same_path(old, new),
            _ => true,
        };
        let previous = self.selected_path().map(Path::to_path_buf);

        self.entries = entries;
        self.root = root;
        self.selected = previous.and_then(|p| self.position_of(&p));

        if changed {
            self.page_number = 1;
        } else {
            self.clamp_page();
        }

        tracing::debug!(
            target: "listing",
            root = ?self.root,
            entries = self.entries.len(),
            "root set"
        );
        Ok(())
    }

    /// Rescan the current root.
    ///
    /// The page only moves when it falls past the new last page, and a
    /// selection past the end of the new snapshot is cleared.
    pub fn reload(&mut self) -> FmResult<()> {
        let entries = scan_root(self.root.as_deref(), self.volumes.as_ref())?;
        self.entries = entries;

        if self.selected.is_some_and(|i| i >= self.entries.len()) {
            self.selected = None;
        }
        self.clamp_page();

        tracing::debug!(target: "listing", entries = self.entries.len(), "reloaded");
        Ok(())
    }

    /// Set the 1-based selection; `0` clears it without changing page.
    ///
    /// A valid selection moves the view to the page containing it.
    pub fn set_selection(&mut self, number: usize) -> FmResult<()> {
        if number == 0 {
            self.selected = None;
            return Ok(());
        }

        let index = number - 1;
        if index >= self.entries.len() {
            return Err(FmError::Range {
                count: self.entries.len(),
            });
        }

        self.selected = Some(index);
        self.page_number = index / self.page_size + 1;
        Ok(())
    }

    /// Select the entry at `path`, returning its 1-based number.
    pub fn select_path(&mut self, path: &Path) -> FmResult<usize> {
        match self.find_by_path(path) {
            0 => Err(FmError::NotInListing {
                path: path.to_path_buf(),
            }),
            number => {
                self.set_selection(number)?;
                Ok(number)
            }
        }
    }

    /// 1-based position of `path` in the snapshot, or `0` when absent.
    pub fn find_by_path(&self, path: &Path) -> usize {
        self.position_of(path).map_or(0, |i| i + 1)
    }

    /// Set the number of entries per page, in `1..=MAX_PAGE_SIZE`.
    pub fn set_page_size(&mut self, size: usize) -> FmResult<()> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(FmError::validation(format!(
                "Invalid page size value: {size} (expected 1..{MAX_PAGE_SIZE})"
            )));
        }

        self.page_size = size;
        self.clamp_page();
        Ok(())
    }

    /// Show page `number`, clamped to the available pages.
    pub fn set_page(&mut self, number: usize) {
        self.page_number = number.clamp(1, self.page_count());
    }

    /// Entries on the current page with their 1-based numbers.
    pub fn page_entries(&self) -> impl Iterator<Item = (usize, &Entry)> {
        let start = (self.page_number - 1) * self.page_size;
        self.entries
            .iter()
            .enumerate()
            .skip(start)
            .take(self.page_size)
            .map(|(i, e)| (i + 1, e))
    }

    /// All entries of the current snapshot.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Current root, or `None` for the drive listing.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Number of entries in the snapshot.
    pub fn total_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of pages; at least one, even for an empty listing.
    pub fn page_count(&self) -> usize {
        self.entries.len().div_ceil(self.page_size).max(1)
    }

    /// Entries per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current 1-based page.
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// 1-based selection, or `0` when nothing is selected.
    pub fn selection(&self) -> usize {
        self.selected_index().map_or(0, |i| i + 1)
    }

    /// 0-based index of the selected entry.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.filter(|i| *i < self.entries.len())
    }

    /// The selected entry.
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.selected_index().map(|i| &self.entries[i])
    }

    /// Full path of the selected entry.
    pub fn selected_path(&self) -> Option<&Path> {
        self.selected_entry().map(|e| e.path.as_path())
    }

    fn position_of(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|e| e.matches_path(path))
    }

    fn clamp_page(&mut self) {
        self.page_number = self.page_number.clamp(1, self.page_count());
    }
}
