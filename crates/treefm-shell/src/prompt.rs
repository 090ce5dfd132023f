//! Interactive questions answered with a single key press.

use std::io::{self, Write};
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::{execute, terminal};

use treefm_ops::{ConflictResolver, OverwritePolicy};

use crate::theme::Theme;

/// Asks on the terminal what to do with each existing target file.
#[derive(Debug, Clone, Default)]
pub struct TerminalResolver {
    theme: Theme,
}

impl TerminalResolver {
    /// Create a resolver drawing its prompt with `theme`.
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl ConflictResolver for TerminalResolver {
    fn resolve(&mut self, target: &Path) -> OverwritePolicy {
        let question = format!(
            "File '{}' already exists.\r\n\
             [i] - ignore, [I] - ignore all, [r] - replace, [R] - replace all >> ",
            target.display()
        );

        match ask(&self.theme, &question, |c| matches!(c, 'i' | 'I' | 'r' | 'R')) {
            Ok(Some('I')) => OverwritePolicy::IgnoreAll,
            Ok(Some('r')) => OverwritePolicy::OverwriteFile,
            Ok(Some('R')) => OverwritePolicy::OverwriteAll,
            Ok(_) => OverwritePolicy::IgnoreFile,
            Err(e) => {
                tracing::warn!(target: "transfer", "conflict prompt failed: {e}");
                OverwritePolicy::IgnoreFile
            }
        }
    }
}

/// Ask a yes/no question; anything but `y` (including Esc) means no.
pub fn confirm(question: &str) -> bool {
    let question = format!("{question}\r\n[y] - YES, [n] - NO >> ");
    match ask(&Theme::default(), &question, |c| matches!(c, 'y' | 'Y' | 'n' | 'N')) {
        Ok(answer) => matches!(answer, Some('y' | 'Y')),
        Err(e) => {
            tracing::warn!(target: "ops", "confirmation failed: {e}");
            false
        }
    }
}

/// Wait for any key press before the screen is redrawn.
pub fn wait_for_key() {
    if let Err(e) = wait_any_key() {
        tracing::warn!(target: "shell", "pause failed: {e}");
    }
}

fn wait_any_key() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Print("\r\nPress any key to continue..."))?;
    {
        let _raw = RawMode::enable()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    break;
                }
            }
        }
    }
    writeln!(stdout)?;
    stdout.flush()
}

/// Print `question` and wait for an accepted key; `None` on Esc.
fn ask(theme: &Theme, question: &str, accept: impl Fn(char) -> bool) -> io::Result<Option<char>> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        SetForegroundColor(theme.warning),
        Print(question),
        ResetColor
    )?;

    let answer = {
        let _raw = RawMode::enable()?;
        read_key(&accept)?
    };

    let echo = answer.map_or_else(|| "[Esc]".to_string(), |c| format!("[{c}]"));
    writeln!(stdout, "{echo}")?;
    stdout.flush()?;
    Ok(answer)
}

fn read_key(accept: &impl Fn(char) -> bool) -> io::Result<Option<char>> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char(c) if accept(c) => return Ok(Some(c)),
                KeyCode::Esc => return Ok(None),
                _ => {}
            }
        }
    }
}

/// Raw mode for the lifetime of the guard.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!("failed to leave raw mode: {e}");
        }
    }
}
