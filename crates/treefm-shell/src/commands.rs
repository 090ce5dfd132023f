//! Command parsing.

use crate::tokenizer::tokenize;

/// A parsed command line.
///
/// Path arguments are kept as typed; the shell resolves them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line; only redraws.
    Empty,
    /// Save settings and leave.
    Quit,
    /// Show the command list, or details for one command.
    Help(Option<String>),
    /// `ls` without arguments lists drives; `-p N` alone only changes page.
    List {
        dir: Option<String>,
        page: Option<usize>,
    },
    /// Select by number or path; no argument clears the selection.
    Select(Option<String>),
    /// Change the page size.
    PageSize(Option<String>),
    /// Rescan the current root.
    Reload,
    /// Copy `source` (or the selection) to `target`.
    Copy {
        source: Option<String>,
        target: String,
    },
    /// Move `source` (or the selection) to `target`.
    Move {
        source: Option<String>,
        target: String,
    },
    /// Create a directory.
    MakeDir(String),
    /// Rename `source` (or the selection) within its directory.
    Rename {
        source: Option<String>,
        new_name: String,
    },
    /// Delete `path` (or the selection) after confirmation.
    Delete(Option<String>),
    /// A known command without its required arguments.
    MissingParams,
    /// Anything else; answered with the help text.
    Unknown(String),
}

/// Parse a command line. Command names are case-insensitive.
pub fn parse_command(line: &str) -> Command {
    let mut args = tokenize(line);
    if args.is_empty() {
        return Command::Empty;
    }
    let name = args.remove(0).to_lowercase();

    match name.as_str() {
        "q" | "quit" => Command::Quit,
        "h" | "help" => Command::Help(args.into_iter().next()),
        "r" | "rel" | "reload" => Command::Reload,
        "ls" | "list" => parse_list(args),
        "s" | "sel" | "select" => Command::Select(args.into_iter().next()),
        "pg" | "page" => Command::PageSize(args.into_iter().next()),

        "cp" | "copy" | "mv" | "move" | "ren" | "rename" => {
            let mut args = args.into_iter();
            let (source, last) = match (args.next(), args.next()) {
                (Some(only), None) => (None, only),
                (Some(first), Some(second)) => (Some(first), second),
                _ => return Command::MissingParams,
            };
            match name.as_str() {
                "cp" | "copy" => Command::Copy {
                    source,
                    target: last,
                },
                "mv" | "move" => Command::Move {
                    source,
                    target: last,
                },
                _ => Command::Rename {
                    source,
                    new_name: last,
                },
            }
        }

        "mkdir" | "makedir" => match args.into_iter().next() {
            Some(path) => Command::MakeDir(path),
            None => Command::MissingParams,
        },
        "del" | "delete" => Command::Delete(args.into_iter().next()),

        _ => Command::Unknown(name),
    }
}

/// `ls [dir] [-p N]`, with `-p N` accepted before or after the directory.
fn parse_list(mut args: Vec<String>) -> Command {
    if args.is_empty() {
        return Command::List {
            dir: None,
            page: None,
        };
    }

    let mut page = None;
    if let Some(pos) = args.iter().position(|a| a == "-p") {
        args.remove(pos);
        page = Some(1);
        if let Some(n) = args.get(pos).and_then(|a| a.parse::<usize>().ok()) {
            args.remove(pos);
            page = Some(n);
        }
    }

    Command::List {
        dir: args.into_iter().next(),
        page: page.or(Some(1)),
    }
}
