//! Grid data: ordered columns and rows keyed by stable column id.

mod model;
mod position;

pub use model::{Column, ColumnId, GridModel, Row};
pub use position::{Position, column_letters};

/// Default width for newly created columns, in pixels.
pub const DEFAULT_COLUMN_WIDTH: u32 = 150;
/// Columns can never be resized narrower than this.
pub const MIN_COLUMN_WIDTH: u32 = 30;
