//! Delimited-text files and TSV/CSV/HTML export.
//!
//! Files are read and written with RFC 4180 quoting, so values holding the
//! delimiter, quotes or line breaks survive a save and reload. `.csv` files are
//! comma-separated and everything else is tab-separated. The first record names
//! the columns.

use crate::clipboard::codec::serialize;
use crate::error::{GridError, Result};
use crate::grid::GridModel;
use crate::selection::CellRange;
use html_escape::encode_text;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Tsv,
    Csv,
    Html,
}

impl Format {
    /// Delimited format implied by a file name: `.csv` is comma-separated, anything else tab.
    pub fn for_path(path: &Path) -> Format {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv { Format::Csv } else { Format::Tsv }
    }

    fn delimiter(self) -> Option<u8> {
        match self {
            Format::Tsv => Some(b'\t'),
            Format::Csv => Some(b','),
            Format::Html => None,
        }
    }
}

/// Build a grid from delimited text. The first record holds column names.
///
/// `Format::Html` is not a delimited format and is read as tab-separated.
pub fn parse_delimited(content: &str, format: Format) -> Result<GridModel> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter().unwrap_or(b'\t'))
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();
    let header = records.next().ok_or(GridError::EmptyFile)??;
    let mut grid = GridModel::from_column_names(header.iter());
    for record in records {
        let record = record?;
        grid.ensure_size(0, record.len());
        grid.push_row_values(record.iter());
    }
    Ok(grid)
}

/// Load a grid from a delimited text file, choosing the delimiter from its extension.
pub fn load_file(path: &Path) -> Result<GridModel> {
    let content = std::fs::read_to_string(path)?;
    let grid = parse_delimited(&content, Format::for_path(path))?;
    info!(
        path = %path.display(),
        rows = grid.row_count(),
        cols = grid.column_count(),
        "loaded grid"
    );
    Ok(grid)
}

/// Render the whole grid, header line included.
///
/// Delimited output ends every record with a newline.
pub fn export(grid: &GridModel, format: Format) -> Result<String> {
    match format.delimiter() {
        Some(delimiter) => export_delimited(grid, delimiter),
        None => Ok(export_html(grid)),
    }
}

fn export_delimited(grid: &GridModel, delimiter: u8) -> Result<String> {
    if grid.column_count() == 0 {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(grid.columns().iter().map(|c| c.name.as_str()))?;
    for r in 0..grid.row_count() {
        writer.write_record((0..grid.column_count()).map(|c| grid.cell(r, c).unwrap_or("")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| GridError::Io(std::io::Error::other(err.to_string())))?;
    String::from_utf8(bytes).map_err(|err| GridError::Io(std::io::Error::other(err)))
}

fn export_html(grid: &GridModel) -> String {
    let cols = grid.column_count();
    if cols == 0 {
        return "<table></table>".to_string();
    }

    if grid.row_count() == 0 {
        let cells: String = grid
            .columns()
            .iter()
            .map(|c| format!("<th>{}</th>", encode_text(&c.name)))
            .collect();
        return format!("<table><tr>{cells}</tr></table>");
    }

    let range = CellRange {
        top: 0,
        left: 0,
        bottom: grid.row_count() - 1,
        right: cols - 1,
    };
    serialize(grid, range, true).html.unwrap_or_default()
}

/// Write the grid to any writer. HTML output gets a trailing newline.
pub fn write_to<W: Write>(grid: &GridModel, format: Format, out: &mut W) -> Result<()> {
    let mut text = export(grid, format)?;
    if format == Format::Html {
        text.push('\n');
    }
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Save the grid to a file.
pub fn save_file(grid: &GridModel, path: &Path, format: Format) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_to(grid, format, &mut file)?;
    info!(path = %path.display(), ?format, "saved grid");
    Ok(())
}
