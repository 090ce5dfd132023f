//! Command execution against a listing.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};

use treefm_core::FmResult;
use treefm_ops::{copy, create_directory, delete, move_to, rename, ConflictResolver};
use treefm_scan::Listing;

use crate::commands::{parse_command, Command};
use crate::help::help_text;
use crate::prompt::{confirm, wait_for_key, TerminalResolver};
use crate::render::{render_info, render_listing};
use crate::theme::Theme;

/// Answers a yes/no question.
pub type Confirm = Box<dyn FnMut(&str) -> bool>;

/// Holds the screen after a transfer so its log lines can be read.
pub type Pause = Box<dyn FnMut()>;

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Keep going, showing the message if there is one.
    Continue(Option<String>),
    /// Leave the command loop.
    Quit,
}

/// Executes command lines against a [`Listing`].
///
/// Relative path arguments are taken relative to the listing root.
/// Commands that change the file system reload the listing afterwards.
pub struct Shell {
    listing: Listing,
    resolver: Box<dyn ConflictResolver>,
    confirm: Confirm,
    pause: Pause,
    theme: Theme,
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("listing", &self.listing)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl Shell {
    /// Create a shell with custom conflict and confirmation handling.
    pub fn new(listing: Listing, resolver: Box<dyn ConflictResolver>, confirm: Confirm) -> Self {
        Self {
            listing,
            resolver,
            confirm,
            pause: Box::new(|| {}),
            theme: Theme::default(),
        }
    }

    /// Create a shell that asks questions on the terminal.
    pub fn interactive(listing: Listing) -> Self {
        Self::new(
            listing,
            Box::new(TerminalResolver::default()),
            Box::new(confirm),
        )
        .with_pause(Box::new(wait_for_key))
    }

    /// Run `pause` after each copy or move that went ahead.
    pub fn with_pause(mut self, pause: Pause) -> Self {
        self.pause = pause;
        self
    }

    /// Use `theme` for drawing.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// The listing being shown.
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Mutable access to the listing, e.g. to change the root directly.
    pub fn listing_mut(&mut self) -> &mut Listing {
        &mut self.listing
    }

    /// Give back the listing, e.g. to persist it.
    pub fn into_listing(self) -> Listing {
        self.listing
    }

    /// Execute one command line.
    pub fn execute(&mut self, line: &str) -> Flow {
        let command = parse_command(line);
        tracing::debug!(target: "shell", ?command, "execute");

        if command == Command::Quit {
            return Flow::Quit;
        }
        match self.run(command) {
            Ok(message) => Flow::Continue(message),
            Err(e) => Flow::Continue(Some(e.to_string())),
        }
    }

    /// Draw, read a line, execute; until `quit` or end of input.
    ///
    /// `greeting` is shown below the first screen.
    pub fn run_loop<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
        greeting: Option<String>,
    ) -> io::Result<()> {
        let mut message = greeting;
        let mut lines = input.lines();

        loop {
            self.draw(out, message.take())?;
            let Some(line) = lines.next().transpose()? else {
                break;
            };
            match self.execute(line.trim()) {
                Flow::Continue(m) => message = m,
                Flow::Quit => break,
            }
        }
        Ok(())
    }

    /// Draw the listing, the info panel, an optional message, and the prompt.
    pub fn draw<W: Write>(&self, out: &mut W, message: Option<String>) -> io::Result<()> {
        let width = terminal::size().map(|(w, _)| w).unwrap_or(80);

        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        render_listing(out, &self.listing, &self.theme, width)?;
        render_info(out, &self.listing, &self.theme, width)?;
        if let Some(message) = message {
            queue!(out, Print("\r\n"), Print(message.replace('\n', "\r\n")), Print("\r\n"))?;
        }
        queue!(out, Print("\r\n> "))?;
        out.flush()
    }

    fn run(&mut self, command: Command) -> FmResult<Option<String>> {
        match command {
            Command::Empty | Command::Quit => Ok(None),
            Command::Help(topic) => Ok(Some(help_text(topic.as_deref()))),
            Command::Unknown(name) => Ok(Some(help_text(Some(&name)))),
            Command::MissingParams => Ok(Some("params expected".into())),
            Command::Reload => self.listing.reload().map(|()| None),
            Command::List { dir, page } => self.list(dir, page),
            Command::Select(arg) => self.select(arg),
            Command::PageSize(arg) => self.page_size(arg),
            Command::Copy { source, target } => self.transfer(source, &target, false),
            Command::Move { source, target } => self.transfer(source, &target, true),
            Command::MakeDir(path) => {
                let path = self.resolve(&path);
                let result = create_directory(&path);
                self.refresh();
                result.map(Some)
            }
            Command::Rename { source, new_name } => self.rename(source, &new_name),
            Command::Delete(path) => self.delete(path),
        }
    }

    fn list(&mut self, dir: Option<String>, page: Option<usize>) -> FmResult<Option<String>> {
        match (dir, page) {
            (None, None) => self.listing.set_root(None)?,
            (None, Some(page)) => self.listing.set_page(page),
            (Some(dir), page) => {
                let path = self.resolve(&dir);
                if !path.is_dir() {
                    return Ok(Some(format!("Directory \"{}\" is not found", path.display())));
                }
                self.listing.set_root(Some(&path))?;
                if let Some(page) = page {
                    self.listing.set_page(page);
                }
            }
        }
        Ok(None)
    }

    fn select(&mut self, arg: Option<String>) -> FmResult<Option<String>> {
        match arg {
            None => self.listing.set_selection(0)?,
            Some(arg) => match arg.parse::<usize>() {
                Ok(number) => self.listing.set_selection(number)?,
                Err(_) => {
                    let path = self.resolve(&arg);
                    self.listing.select_path(&path)?;
                }
            },
        }
        Ok(None)
    }

    fn page_size(&mut self, arg: Option<String>) -> FmResult<Option<String>> {
        let Some(arg) = arg else {
            return Ok(Some("Expected page size value".into()));
        };
        match arg.parse::<usize>() {
            Ok(size) => self.listing.set_page_size(size).map(|()| None),
            Err(_) => Ok(Some("Invalid page size value".into())),
        }
    }

    fn transfer(
        &mut self,
        source: Option<String>,
        target: &str,
        remove_source: bool,
    ) -> FmResult<Option<String>> {
        let Some(source) = self.source_or_selection(source) else {
            return Ok(Some("selection expected".into()));
        };

        let target = Path::new(target);
        let result = if remove_source {
            move_to(&source, target, &mut *self.resolver)
        } else {
            copy(&source, target, &mut *self.resolver)
        };
        if result.is_ok() {
            (self.pause)();
        }
        self.refresh();
        result.map(|summary| Some(summary.to_string()))
    }

    fn rename(&mut self, source: Option<String>, new_name: &str) -> FmResult<Option<String>> {
        let Some(source) = self.source_or_selection(source) else {
            return Ok(Some("There is no selected file or directory".into()));
        };
        let was_selected = self
            .listing
            .selected_path()
            .is_some_and(|p| treefm_core::same_path(p, &source));

        let result = rename(&source, new_name);
        self.refresh();

        if result.is_ok() && was_selected {
            if let Some(parent) = source.parent() {
                let renamed = parent.join(new_name);
                if let Err(e) = self.listing.select_path(&renamed) {
                    tracing::debug!(
                        target: "shell",
                        "cannot reselect '{}': {e}",
                        renamed.display()
                    );
                }
            }
        }
        result.map(Some)
    }

    fn delete(&mut self, path: Option<String>) -> FmResult<Option<String>> {
        let Some(path) = self.source_or_selection(path) else {
            return Ok(Some("There is no selection.".into()));
        };
        if !(self.confirm)(&format!("Are you sure to delete '{}'?", path.display())) {
            return Ok(None);
        }

        let result = delete(&path);
        self.refresh();
        result.map(Some)
    }

    fn source_or_selection(&self, arg: Option<String>) -> Option<PathBuf> {
        match arg {
            Some(arg) => Some(self.resolve(&arg)),
            None => self.listing.selected_path().map(Path::to_path_buf),
        }
    }

    /// Resolve a path argument against the listing root.
    fn resolve(&self, arg: &str) -> PathBuf {
        let path = Path::new(arg);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.listing.root() {
            Some(root) => root.join(path),
            None => std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
        }
    }

    /// Reload after a file system change; a vanished root falls back to drives.
    fn refresh(&mut self) {
        if let Err(e) = self.listing.reload() {
            tracing::warn!(target: "shell", "reload failed: {e}");
            if let Err(e) = self.listing.set_root(None) {
                tracing::warn!(target: "shell", "drive list unavailable: {e}");
            }
        }
    }
}
