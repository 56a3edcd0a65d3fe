//! Error types for tabgrid core.

use thiserror::Error;

use crate::grid::ColumnId;

/// Errors that can occur while operating on a grid.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("unknown column '{0}'")]
    UnknownColumn(ColumnId),

    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("file is empty")]
    EmptyFile,
}

pub type Result<T> = std::result::Result<T, GridError>;
