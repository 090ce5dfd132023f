//! Command line shell for treefm.
//!
//! Turns typed command lines into listing and file operations, and draws
//! the current page of the listing as a tree together with an info panel
//! for the selected entry.
//!
//! # Example
//!
//! ```no_run
//! use treefm_scan::Listing;
//! use treefm_shell::{Flow, Shell};
//!
//! let mut shell = Shell::interactive(Listing::new());
//! if let Flow::Continue(Some(message)) = shell.execute("ls /tmp") {
//!     println!("{message}");
//! }
//! ```

mod commands;
mod help;
mod prompt;
mod render;
mod shell;
mod theme;
mod tokenizer;

pub use commands::{parse_command, Command};
pub use help::help_text;
pub use prompt::{confirm, wait_for_key, TerminalResolver};
pub use render::{render_info, render_listing, truncate_name, TreeLines};
pub use shell::{Confirm, Flow, Pause, Shell};
pub use theme::Theme;
pub use tokenizer::tokenize;
