//! Conversion between a selected rectangle and clipboard formats.
//!
//! Outgoing data is always written in two renditions: tab-separated text and an
//! HTML `<table>`. Incoming data prefers an HTML table when the payload carries
//! one and otherwise splits plain text on tabs (or commas when no tab occurs).

use super::ClipboardPayload;
use super::html::parse_table;
use crate::grid::GridModel;
use crate::selection::CellRange;
use html_escape::encode_text;
use std::fmt::Write;

/// A block of pasted values. Rows may differ in length.
pub type Block = Vec<Vec<String>>;

/// Serialize the cells in `range` as TSV and as an HTML table.
///
/// With `include_header` the first line holds the column names of the range.
pub fn serialize(grid: &GridModel, range: CellRange, include_header: bool) -> ClipboardPayload {
    let mut lines = Vec::with_capacity(range.height() + 1);
    let mut html = String::from("<table>");

    if include_header {
        let names: Vec<&str> = range
            .cols()
            .map(|c| grid.column(c).map_or("", |col| col.name.as_str()))
            .collect();
        lines.push(names.join("\t"));
        push_html_row(&mut html, "th", &names);
    }

    for r in range.rows() {
        let values: Vec<&str> = range
            .cols()
            .map(|c| grid.cell(r, c).unwrap_or(""))
            .collect();
        lines.push(values.join("\t"));
        push_html_row(&mut html, "td", &values);
    }

    html.push_str("</table>");
    ClipboardPayload::with_html(lines.join("\n"), html)
}

fn push_html_row(html: &mut String, cell_tag: &str, values: &[&str]) {
    html.push_str("<tr>");
    for value in values {
        let _ = write!(html, "<{cell_tag}>{}</{cell_tag}>", encode_text(value));
    }
    html.push_str("</tr>");
}

/// Turn a clipboard payload into a block of values.
///
/// `skip_html_header` drops the first row of an HTML table, for sources that
/// prepend a row of column names.
pub fn deserialize(payload: &ClipboardPayload, skip_html_header: bool) -> Block {
    if let Some(mut rows) = payload.html.as_deref().and_then(parse_table) {
        if skip_html_header && !rows.is_empty() {
            rows.remove(0);
        }
        return rows;
    }
    split_delimited(&payload.plain_text)
}

/// Split delimited text into rows. Tab-delimited if a tab occurs anywhere, else comma.
pub fn split_delimited(text: &str) -> Block {
    let text = text.replace("\r\n", "\n");
    let delimiter = if text.contains('\t') { '\t' } else { ',' };

    let mut lines: Vec<&str> = text.split('\n').collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines
        .into_iter()
        .map(|line| line.split(delimiter).map(str::to_string).collect())
        .collect()
}
