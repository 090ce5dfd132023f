//! Drawing the listing page and the info panel.
//!
//! Both renderers queue crossterm commands on any [`Write`] and leave the
//! flushing to the caller.

use std::io::{self, Write};
use std::time::SystemTime;

use crossterm::queue;
use crossterm::style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor};

use treefm_core::{Entry, EntryKind, PositionTag};
use treefm_scan::{Listing, MAX_SCAN_DEPTH};

use crate::theme::Theme;

/// Tracks which tree levels still have siblings further down, so each row
/// can draw the vertical lines of its ancestors.
#[derive(Debug, Clone)]
pub struct TreeLines {
    open: [bool; MAX_SCAN_DEPTH + 1],
}

impl Default for TreeLines {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeLines {
    /// State before the first row of a listing.
    pub fn new() -> Self {
        let mut open = [false; MAX_SCAN_DEPTH + 1];
        open[0] = true;
        Self { open }
    }

    /// State after drawing `entries`, used to start a later page.
    pub fn after<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Self {
        let mut lines = Self::new();
        for entry in entries {
            lines.prefix(entry);
        }
        lines
    }

    /// Tree glyphs in front of `entry`'s name, e.g. `"│ ├─"`.
    pub fn prefix(&mut self, entry: &Entry) -> String {
        let depth = entry.depth.min(MAX_SCAN_DEPTH);
        let mut out = String::with_capacity(depth * 2 + 2);

        for open in &self.open[..depth] {
            out.push(if *open { '│' } else { ' ' });
            out.push(' ');
        }

        let glyph = match entry.tag {
            PositionTag::Last => '└',
            PositionTag::Only if depth == 0 => ' ',
            PositionTag::Only => '└',
            PositionTag::Middle => '├',
            PositionTag::First if depth == 0 => '┬',
            PositionTag::First => '├',
        };
        self.open[depth] = matches!(entry.tag, PositionTag::First | PositionTag::Middle);

        out.push(glyph);
        out.push('─');
        out
    }
}

/// Fit `name` into `width` characters, ending in `...` when cut.
pub fn truncate_name(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let keep = width.saturating_sub(4);
    let mut out: String = name.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Draw the page header and one row per slot of the current page.
///
/// Slots past the end of the listing are drawn as blank rows so the page
/// keeps its height.
pub fn render_listing<W: Write>(
    out: &mut W,
    listing: &Listing,
    theme: &Theme,
    width: u16,
) -> io::Result<()> {
    let width = usize::from(width);
    let rule = "═".repeat(width);

    queue!(
        out,
        SetForegroundColor(theme.frame),
        Print(format!(
            "Page {} / {}, Total items: {}\r\n",
            listing.page_number(),
            listing.page_count(),
            listing.total_count()
        )),
        Print(format!("{rule}\r\n")),
        ResetColor
    )?;

    let start = (listing.page_number() - 1) * listing.page_size();
    let last_slot = start + listing.page_size();
    let digits = last_slot.to_string().len();
    let mut lines = TreeLines::after(listing.entries().iter().take(start));
    let selected = listing.selection();

    let mut drawn = 0;
    for (number, entry) in listing.page_entries() {
        let prefix = lines.prefix(entry);
        queue!(
            out,
            SetForegroundColor(theme.frame),
            Print(format!("{number:>digits$}. {prefix}")),
            ResetColor
        )?;

        let room = width.saturating_sub(digits + 1 + entry.depth * 2 + 5);
        if room > 5 {
            let name = truncate_name(&entry.name, room);
            if number == selected {
                queue!(
                    out,
                    SetForegroundColor(theme.selected_fg),
                    SetBackgroundColor(theme.selected_bg)
                )?;
            } else {
                queue!(out, SetForegroundColor(theme.kind_color(entry.kind)))?;
            }
            queue!(out, Print(format!(" {name:<room$}")), ResetColor)?;
        }
        queue!(out, Print("\r\n"))?;
        drawn += 1;
    }

    for _ in drawn..listing.page_size() {
        queue!(out, Print("\r\n"))?;
    }
    Ok(())
}

/// Draw details of the selected entry, or `- no selection -`.
pub fn render_info<W: Write>(
    out: &mut W,
    listing: &Listing,
    theme: &Theme,
    width: u16,
) -> io::Result<()> {
    let rule = "═".repeat(usize::from(width));
    queue!(
        out,
        SetForegroundColor(theme.frame),
        Print(format!("{rule}\r\n")),
        ResetColor
    )?;

    let Some(entry) = listing.selected_entry() else {
        queue!(out, Print("\r\n- no selection -\r\n\r\n"))?;
        return Ok(());
    };

    let page = listing.selection().saturating_sub(1) / listing.page_size() + 1;
    for line in info_lines(entry, page) {
        queue!(out, Print(line), Print("\r\n"))?;
    }
    Ok(())
}

fn info_lines(entry: &Entry, page: usize) -> Vec<String> {
    let mut lines = vec![format!(
        "{}: {} (see page {page})",
        entry.kind,
        entry.path.display()
    )];

    let metadata = match std::fs::metadata(&entry.path) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!(target: "listing", "no metadata for {}: {e}", entry.path.display());
            lines.push("  (details unavailable)".into());
            return lines;
        }
    };

    let modified = metadata.modified().ok().map_or_else(|| "-".into(), format_time);
    match entry.kind {
        EntryKind::File => {
            lines.push(format!(
                "  Size: {} ({} bytes)",
                humansize::format_size(metadata.len(), humansize::BINARY),
                metadata.len()
            ));
            lines.push(format!("  Modified: {modified}"));
        }
        EntryKind::Directory | EntryKind::Drive => {
            lines.push(format!("  Modified: {modified}"));
            if metadata.permissions().readonly() {
                lines.push("  Read-only".into());
            }
        }
    }
    lines
}

fn format_time(time: SystemTime) -> String {
    chrono::DateTime::<chrono::Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
