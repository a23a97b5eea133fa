//! gridcell - edit a CSV file as a spreadsheet-like grid in the terminal.
//!
//! # Usage
//!
//! ```bash
//! gridcell data.csv
//! gridcell --direct-edit data.csv
//! gridcell --no-header --debug-log grid.log data.csv
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gridcell::app::App;
use gridcell::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// Edit a CSV file as a grid: arrow keys move, Enter edits, Ctrl+S saves
#[derive(Parser, Debug)]
#[command(name = "gridcell", version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// CSV file to edit
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Moving to a cell opens its editor directly
    #[arg(long)]
    direct_edit: bool,

    /// Treat the first record as data instead of a header row
    #[arg(long)]
    no_header: bool,

    /// Class name marking the selected cell
    #[arg(long, value_name = "NAME")]
    select_class: Option<String>,

    /// Class name marking the cell being edited
    #[arg(long, value_name = "NAME")]
    edit_class: Option<String>,

    /// Write debug logging to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Log to `path` at debug level, or to stderr at warn level.
fn init_logging(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create debug log {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
                )
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.debug_log.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    let mut app = App::new(cli.file)
        .with_header(!effective.no_header)
        .with_editor_options(effective.editor_options())
        .with_config_paths(
            Some(global_path),
            local_path.exists().then_some(local_path),
        );

    app.run().context("Application error")
}
