//! treefm - A paginated tree-view console file manager.
//!
//! Usage:
//!   treefm [PATH]                 Open PATH (or the last session's folder)
//!   treefm --page-size 30         Show 30 items per page
//!   treefm --config FILE          Use FILE instead of the default settings
//!   treefm --help                 Show help

use std::io;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use treefm_core::Settings;
use treefm_scan::{Listing, SystemVolumes};
use treefm_shell::{help_text, Shell};

#[derive(Parser)]
#[command(
    name = "treefm",
    version,
    about = "A paginated tree-view console file manager",
    long_about = "treefm shows a folder two levels deep as a numbered tree, one page \
                  at a time, and lets you select, copy, move, rename, and delete \
                  entries by typing short commands.\n\n\
                  The page, folder, and selection are restored on the next start."
)]
struct Cli {
    /// Folder to open (defaults to the last session's folder)
    path: Option<PathBuf>,

    /// Items per page (1-100)
    #[arg(short, long)]
    page_size: Option<usize>,

    /// Settings file to load and save
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not save settings on exit
    #[arg(long)]
    no_save: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().or_else(Settings::config_path);
    let settings = config_path
        .as_deref()
        .map(Settings::load_from)
        .unwrap_or_default();

    let mut listing = Listing::from_settings(&settings, Box::new(SystemVolumes));
    if let Some(path) = &cli.path {
        listing
            .set_root(Some(path))
            .with_context(|| format!("Cannot open {}", path.display()))?;
    }
    if let Some(size) = cli.page_size {
        listing.set_page_size(size).context("Invalid --page-size")?;
    }

    let greeting = format!("Welcome to treefm!\n\n{}", help_text(None));
    let mut shell = Shell::interactive(listing);
    shell
        .run_loop(io::stdin().lock(), &mut io::stdout(), Some(greeting))
        .context("Console I/O failed")?;

    let settings = shell.into_listing().to_settings();
    if !cli.no_save {
        match &config_path {
            Some(path) => settings
                .save_to(path)
                .with_context(|| format!("Cannot save settings to {}", path.display()))?,
            None => tracing::warn!(target: "settings", "no config directory; settings not saved"),
        }
    }

    println!();
    println!("The program has been successfully finished.");
    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .without_time()
        .with_env_filter(filter)
        .init();
}
