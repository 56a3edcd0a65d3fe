use super::{DEFAULT_COLUMN_WIDTH, MIN_COLUMN_WIDTH, column_letters};
use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Stable column identifier. Survives renames and reorders.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        ColumnId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    /// Display label
    pub name: String,
    /// Width in pixels, never below the model's minimum
    pub width: u32,
}

/// A row of cell values keyed by column id.
///
/// Every live column id has an entry, possibly the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: HashMap<ColumnId, String>,
}

impl Row {
    pub fn get(&self, id: &ColumnId) -> Option<&str> {
        self.cells.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, id: &ColumnId) -> bool {
        self.cells.contains_key(id)
    }

    fn blank(columns: &[Column]) -> Self {
        Row {
            cells: columns
                .iter()
                .map(|col| (col.id.clone(), String::new()))
                .collect(),
        }
    }
}

/// The grid's data: ordered columns and ordered rows.
///
/// Rows store values by [`ColumnId`], so column order is purely a display concern.
/// Reordering columns never touches row storage.
#[derive(Clone, Debug)]
pub struct GridModel {
    columns: Vec<Column>,
    rows: Vec<Row>,
    next_column_id: u64,
    default_width: u32,
    min_width: u32,
}

impl GridModel {
    /// Create an empty grid (no rows, no columns).
    pub fn new() -> Self {
        GridModel {
            columns: Vec::new(),
            rows: Vec::new(),
            next_column_id: 1,
            default_width: DEFAULT_COLUMN_WIDTH,
            min_width: MIN_COLUMN_WIDTH,
        }
    }

    /// Create a grid of empty cells with generated columns.
    pub fn with_size(rows: usize, cols: usize) -> Self {
        let mut grid = Self::new();
        grid.ensure_size(rows, cols);
        grid
    }

    /// Create a grid with one column per name and no rows.
    pub fn from_column_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut grid = Self::new();
        for name in names {
            let id = grid.generate_column_id();
            let width = grid.default_width;
            grid.columns.push(Column {
                id,
                name: name.into(),
                width,
            });
        }
        grid
    }

    /// Override the default and minimum column widths used by later operations.
    pub fn set_width_limits(&mut self, default_width: u32, min_width: u32) {
        self.min_width = min_width;
        self.default_width = default_width.max(min_width);
    }

    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|col| &col.id == id)
    }

    /// Value at a display position, if both indices are in range.
    pub fn cell(&self, r: usize, c: usize) -> Option<&str> {
        let col = self.columns.get(c)?;
        self.rows.get(r)?.get(&col.id)
    }

    fn generate_column_id(&mut self) -> ColumnId {
        loop {
            let id = ColumnId::new(format!("col{}", self.next_column_id));
            self.next_column_id += 1;
            if self.column_index(&id).is_none() {
                return id;
            }
        }
    }

    /// Append a column with a generated id, letter name and default width.
    pub fn add_column(&mut self) -> &Column {
        let id = self.generate_column_id();
        let name = column_letters(self.columns.len());
        for row in &mut self.rows {
            row.cells.insert(id.clone(), String::new());
        }
        debug!(column = %id, "add column");
        self.columns.push(Column {
            id,
            name,
            width: self.default_width,
        });
        &self.columns[self.columns.len() - 1]
    }

    /// Remove a column and its value from every row.
    pub fn delete_column(&mut self, id: &ColumnId) -> Result<Column> {
        let index = self
            .column_index(id)
            .ok_or_else(|| GridError::UnknownColumn(id.clone()))?;
        let column = self.columns.remove(index);
        for row in &mut self.rows {
            row.cells.remove(id);
        }
        debug!(column = %id, index, "delete column");
        Ok(column)
    }

    /// Rename a column. Returns false if the id is unknown.
    pub fn rename_column(&mut self, id: &ColumnId, name: &str) -> bool {
        match self.columns.iter_mut().find(|col| &col.id == id) {
            Some(col) => {
                col.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Set a column's width, clamped to the minimum floor. Returns the stored width.
    pub fn set_column_width(&mut self, id: &ColumnId, width: u32) -> Option<u32> {
        let min_width = self.min_width;
        let col = self.columns.iter_mut().find(|col| &col.id == id)?;
        col.width = width.max(min_width);
        Some(col.width)
    }

    /// Apply a signed width change as reported by a resize gesture.
    pub fn resize_column(&mut self, id: &ColumnId, delta: i32) -> Option<u32> {
        let current = self.columns.iter().find(|col| &col.id == id)?.width;
        let width = (i64::from(current) + i64::from(delta)).clamp(0, i64::from(u32::MAX)) as u32;
        self.set_column_width(id, width)
    }

    /// Move the column at `from` so that it ends up at index `to`.
    pub fn reorder_column(&mut self, from: usize, to: usize) -> Result<()> {
        splice(&mut self.columns, from, to)?;
        debug!(from, to, "reorder column");
        Ok(())
    }

    /// Append a row with an empty value for every column.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(Row::blank(&self.columns));
        self.rows.len() - 1
    }

    /// Append a row from positional values; missing values are empty, extra values dropped.
    pub fn push_row_values<I, S>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row = Row::blank(&self.columns);
        for (col, value) in self.columns.iter().zip(values) {
            row.cells.insert(col.id.clone(), value.into());
        }
        self.rows.push(row);
        self.rows.len() - 1
    }

    pub fn delete_row(&mut self, index: usize) -> Result<Row> {
        if index >= self.rows.len() {
            return Err(GridError::OutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        debug!(index, "delete row");
        Ok(self.rows.remove(index))
    }

    /// Move the row at `from` so that it ends up at index `to`.
    pub fn reorder_row(&mut self, from: usize, to: usize) -> Result<()> {
        splice(&mut self.rows, from, to)?;
        debug!(from, to, "reorder row");
        Ok(())
    }

    /// Overwrite one cell.
    pub fn update_cell(&mut self, row_index: usize, col_id: &ColumnId, value: &str) -> Result<()> {
        if self.column_index(col_id).is_none() {
            return Err(GridError::UnknownColumn(col_id.clone()));
        }
        let len = self.rows.len();
        let row = self.rows.get_mut(row_index).ok_or(GridError::OutOfRange {
            index: row_index,
            len,
        })?;
        row.cells.insert(col_id.clone(), value.to_string());
        Ok(())
    }

    /// Overwrite one cell by display position.
    pub fn set_cell(&mut self, r: usize, c: usize, value: &str) -> Result<()> {
        let id = self
            .columns
            .get(c)
            .map(|col| col.id.clone())
            .ok_or(GridError::OutOfRange {
                index: c,
                len: self.columns.len(),
            })?;
        self.update_cell(r, &id, value)
    }

    /// Grow (never shrink) to at least `min_rows` x `min_cols`.
    pub fn ensure_size(&mut self, min_rows: usize, min_cols: usize) {
        while self.columns.len() < min_cols {
            self.add_column();
        }
        while self.rows.len() < min_rows {
            self.add_row();
        }
    }
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove the element at `from` and reinsert it at `to`.
fn splice<T>(list: &mut Vec<T>, from: usize, to: usize) -> Result<()> {
    let len = list.len();
    if from >= len {
        return Err(GridError::OutOfRange { index: from, len });
    }
    if to >= len {
        return Err(GridError::OutOfRange { index: to, len });
    }
    if from != to {
        let item = list.remove(from);
        list.insert(to, item);
    }
    Ok(())
}
