//! tabgrid - a terminal grid editor

mod clipboard;
mod config;
mod logging;
mod tui;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tabgrid_core::storage::{self, Format};
use tabgrid_core::{Editor, GridModel};
use tracing::info;

/// Rows and columns of a fresh sheet.
const NEW_SHEET_ROWS: usize = 3;
const NEW_SHEET_COLS: usize = 5;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExportFormat {
    Tsv,
    Csv,
    Html,
}

impl From<ExportFormat> for Format {
    fn from(value: ExportFormat) -> Self {
        match value {
            ExportFormat::Tsv => Format::Tsv,
            ExportFormat::Csv => Format::Csv,
            ExportFormat::Html => Format::Html,
        }
    }
}

/// Edit tab-separated tables in the terminal
#[derive(Parser, Debug)]
#[command(name = "tabgrid", version, about)]
struct Cli {
    /// File to open, comma-separated if it ends in .csv and tab-separated otherwise
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Settings file to use instead of the user config
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Export the table and exit ("-" for stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Export format used with --output
    #[arg(long, value_enum, default_value_t = ExportFormat::Tsv)]
    format: ExportFormat,
}

fn load_grid(path: Option<&Path>) -> anyhow::Result<GridModel> {
    match path {
        Some(path) if path.exists() => storage::load_file(path)
            .with_context(|| format!("failed to open {}", path.display())),
        _ => Ok(GridModel::with_size(NEW_SHEET_ROWS, NEW_SHEET_COLS)),
    }
}

fn export(grid: &GridModel, output: &Path, format: Format) -> anyhow::Result<()> {
    if output.as_os_str() == "-" {
        let mut out = std::io::stdout().lock();
        storage::write_to(grid, format, &mut out)?;
        out.flush()?;
        return Ok(());
    }
    storage::save_file(grid, output, format)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("Exported to {}", output.display());
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let (config, warnings) = config::load_config(cli.config.as_deref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    let grid = load_grid(cli.file.as_deref())?;
    info!(
        rows = grid.row_count(),
        cols = grid.column_count(),
        file = ?cli.file,
        "grid loaded"
    );

    if let Some(output) = cli.output {
        return export(&grid, &output, cli.format.into());
    }

    let editor = Editor::with_settings(grid, config.settings);
    let mut app = tui::App::new(
        editor,
        Box::new(clipboard::SystemClipboard::new()),
        config.keymap,
    );
    app.file_path = cli.file;
    tui::run(&mut app)
}

fn main() {
    let cli = Cli::parse();
    logging::init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
