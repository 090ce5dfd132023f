//! Console colors.

use crossterm::style::Color;

use treefm_core::EntryKind;

/// Colors used when drawing the listing and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Foreground of the selected row.
    pub selected_fg: Color,
    /// Background of the selected row.
    pub selected_bg: Color,
    pub drive: Color,
    pub directory: Color,
    pub file: Color,
    /// Tree lines, numbers, and frame.
    pub frame: Color,
    /// Prompts and confirmations.
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            selected_fg: Color::Grey,
            selected_bg: Color::DarkBlue,
            drive: Color::DarkMagenta,
            directory: Color::DarkYellow,
            file: Color::DarkCyan,
            frame: Color::DarkGrey,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

impl Theme {
    /// Foreground for an unselected row of `kind`.
    pub fn kind_color(&self, kind: EntryKind) -> Color {
        match kind {
            EntryKind::Drive => self.drive,
            EntryKind::Directory => self.directory,
            EntryKind::File => self.file,
        }
    }
}
