//! tabgrid-core - UI-agnostic grid model, selection state machine and clipboard interchange.

pub mod clipboard;
pub mod editor;
pub mod error;
pub mod grid;
pub mod paste;
pub mod reorder;
pub mod selection;
pub mod settings;
pub mod storage;

pub use clipboard::{ClipboardPayload, ClipboardProvider, CopyOutcome, MemoryClipboard};
pub use editor::{
    EditSession, Editor, EventOutcome, InputEvent, Key, KeyInput, Modifiers, TextBuffer,
};
pub use error::{GridError, Result};
pub use grid::{Column, ColumnId, GridModel, Position, Row};
pub use paste::{PastePolicy, PasteReport};
pub use reorder::{Axis, Edge, ReorderIntent};
pub use selection::{CellRange, Direction, Phase, SelectionEngine};
pub use settings::Settings;
