//! Application state and logic.
//!
//! [`App`] wraps the core [`Editor`] with everything that only exists in a
//! terminal: the system clipboard, the open file, the viewport, the status
//! line and the column rename prompt.

use super::keymap::Keymap;
use std::path::PathBuf;
use std::time::Instant;
use tabgrid_core::reorder::{Axis, ReorderIntent};
use tabgrid_core::storage::{self, Format};
use tabgrid_core::{
    ClipboardProvider, ColumnId, CopyOutcome, Editor, EventOutcome, InputEvent, Key, KeyInput,
    Modifiers, Position, TextBuffer,
};
use tracing::{info, warn};

/// Pixels represented by one terminal column when drawing column widths.
pub const PIXELS_PER_CHAR: u32 = 10;

/// Input mode, derived from what is currently focused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Navigate and select cells.
    Grid,
    /// A cell is being edited in place.
    Edit,
    /// The column rename prompt has focus.
    Rename,
}

/// Text prompt for renaming a column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenamePrompt {
    pub column: ColumnId,
    pub buffer: TextBuffer,
}

/// A row or column header being dragged with the mouse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderDrag {
    pub axis: Axis,
    pub source: usize,
}

pub struct App {
    pub editor: Editor,
    pub clipboard: Box<dyn ClipboardProvider>,
    pub keymap: Keymap,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Status message to display
    pub status_message: String,
    /// Set after a quit request with unsaved changes
    pub confirm_quit: bool,
    pub rename: Option<RenamePrompt>,
    pub header_drag: Option<HeaderDrag>,
    /// Last left click, for double-click detection
    pub last_click: Option<(Position, Instant)>,
    /// Viewport offset (row)
    pub viewport_row: usize,
    /// Viewport offset (column)
    pub viewport_col: usize,
    /// Number of visible rows
    pub visible_rows: usize,
    /// Number of visible columns
    pub visible_cols: usize,
}

impl App {
    pub fn new(editor: Editor, clipboard: Box<dyn ClipboardProvider>, keymap: Keymap) -> Self {
        App {
            editor,
            clipboard,
            keymap,
            file_path: None,
            status_message: String::new(),
            confirm_quit: false,
            rename: None,
            header_drag: None,
            last_click: None,
            viewport_row: 0,
            viewport_col: 0,
            visible_rows: 1,
            visible_cols: 1,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.rename.is_some() {
            Mode::Rename
        } else if self.editor.selection().is_editing() {
            Mode::Edit
        } else {
            Mode::Grid
        }
    }

    pub fn current(&self) -> Option<Position> {
        self.editor.selection().current()
    }

    /// Feed one event to the editor and report copy/paste results on the status line.
    pub fn dispatch(&mut self, event: InputEvent) -> EventOutcome {
        let outcome = self.editor.handle_event(event, self.clipboard.as_mut());
        match outcome {
            EventOutcome::Copied(CopyOutcome::Full) => {
                self.status_message = "Copied selection".to_string();
            }
            EventOutcome::Copied(CopyOutcome::TextOnly) => {
                self.status_message = "Copied selection as plain text".to_string();
            }
            EventOutcome::Copied(CopyOutcome::Failed) => {
                self.status_message = "Error: clipboard unavailable".to_string();
            }
            EventOutcome::Pasted(report) => {
                self.status_message = if report.dropped > 0 {
                    format!(
                        "Pasted {}x{} ({} cells dropped)",
                        report.rows, report.cols, report.dropped
                    )
                } else {
                    format!("Pasted {}x{}", report.rows, report.cols)
                };
            }
            EventOutcome::Handled | EventOutcome::Ignored => {}
        }
        self.update_viewport();
        outcome
    }

    /// Width of a column in terminal cells.
    pub fn column_width_chars(&self, col: usize) -> u16 {
        let px = self
            .editor
            .grid()
            .column(col)
            .map_or(self.editor.settings().grid.default_column_width, |c| c.width);
        (px / PIXELS_PER_CHAR).clamp(1, u32::from(u16::MAX)) as u16
    }

    /// Update viewport to keep the current cell visible
    pub fn update_viewport(&mut self) {
        let rows = self.editor.grid().row_count();
        let cols = self.editor.grid().column_count();
        self.viewport_row = self.viewport_row.min(rows.saturating_sub(1));
        self.viewport_col = self.viewport_col.min(cols.saturating_sub(1));

        let Some(cur) = self.current() else {
            return;
        };
        if cur.c < self.viewport_col {
            self.viewport_col = cur.c;
        } else if cur.c >= self.viewport_col + self.visible_cols {
            self.viewport_col = cur.c + 1 - self.visible_cols.max(1);
        }
        if cur.r < self.viewport_row {
            self.viewport_row = cur.r;
        } else if cur.r >= self.viewport_row + self.visible_rows {
            self.viewport_row = cur.r + 1 - self.visible_rows.max(1);
        }
    }

    pub fn scroll_rows(&mut self, delta: i32) {
        let max = self.editor.grid().row_count().saturating_sub(1);
        let next = self.viewport_row as i64 + i64::from(delta);
        self.viewport_row = next.clamp(0, max as i64) as usize;
    }

    // Host actions

    pub fn copy(&mut self) {
        let ctrl_c = KeyInput::with_modifiers(
            Key::Char('c'),
            Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
        );
        if self.dispatch(InputEvent::Key(ctrl_c)) == EventOutcome::Ignored {
            self.status_message = "Nothing selected".to_string();
        }
    }

    pub fn paste(&mut self) {
        if self.current().is_none() {
            self.status_message = "Select a cell to paste into".to_string();
            return;
        }
        match self.clipboard.read() {
            Ok(payload) => self.paste_payload(payload.plain_text, payload.html),
            Err(e) => {
                warn!(error = %e, "clipboard read failed");
                self.status_message = format!("Error: {}", e);
            }
        }
    }

    /// Paste text that arrived without going through the clipboard (bracketed paste).
    pub fn paste_payload(&mut self, plain_text: String, html: Option<String>) {
        let payload = tabgrid_core::ClipboardPayload { plain_text, html };
        if self.dispatch(InputEvent::Paste(payload)) == EventOutcome::Ignored {
            self.status_message = "Nothing to paste".to_string();
        }
    }

    pub fn add_row(&mut self) {
        let index = self.editor.add_row();
        self.status_message = format!("Added row {}", index + 1);
    }

    pub fn delete_row(&mut self) {
        let Some(cur) = self.current() else {
            self.status_message = "No row selected".to_string();
            return;
        };
        if self.editor.delete_row(cur.r) {
            self.status_message = format!("Deleted row {}", cur.r + 1);
        }
        self.update_viewport();
    }

    pub fn add_column(&mut self) {
        let id = self.editor.add_column();
        let name = self
            .editor
            .grid()
            .columns()
            .last()
            .map(|c| c.name.clone())
            .unwrap_or_default();
        info!(column = %id, "column added from tui");
        self.status_message = format!("Added column {}", name);
    }

    fn current_column_id(&self) -> Option<ColumnId> {
        let cur = self.current()?;
        self.editor.grid().column(cur.c).map(|c| c.id.clone())
    }

    pub fn delete_column(&mut self) {
        let Some(id) = self.current_column_id() else {
            self.status_message = "No column selected".to_string();
            return;
        };
        if self.editor.delete_column(&id) {
            self.status_message = "Deleted column".to_string();
        }
        self.update_viewport();
    }

    pub fn open_rename(&mut self) {
        self.editor.commit_edit();
        let Some(id) = self.current_column_id() else {
            self.status_message = "No column selected".to_string();
            return;
        };
        let name = self
            .editor
            .grid()
            .columns()
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        self.rename = Some(RenamePrompt {
            column: id,
            buffer: TextBuffer::new(name),
        });
    }

    pub fn commit_rename(&mut self) {
        if let Some(prompt) = self.rename.take() {
            let name = prompt.buffer.text();
            if self.editor.rename_column(&prompt.column, name) {
                self.status_message = format!("Renamed column to {}", name);
            }
        }
    }

    pub fn cancel_rename(&mut self) {
        self.rename = None;
    }

    /// Move the current row or column one step, like dropping it on its neighbour.
    pub fn move_current(&mut self, axis: Axis, delta: i32) {
        let Some(cur) = self.current() else {
            return;
        };
        let (index, len) = match axis {
            Axis::Row => (cur.r, self.editor.grid().row_count()),
            Axis::Column => (cur.c, self.editor.grid().column_count()),
        };
        let target = index as i64 + i64::from(delta);
        if target < 0 || target >= len as i64 {
            return;
        }
        self.dispatch(InputEvent::Drop(ReorderIntent::new(
            axis,
            index,
            target as usize,
        )));
    }

    pub fn resize_current_column(&mut self, delta: i32) {
        let Some(column) = self.current_column_id() else {
            return;
        };
        self.dispatch(InputEvent::Resize { column, delta });
    }

    /// Save to current file path
    pub fn save_file(&mut self) {
        self.editor.commit_edit();
        let Some(path) = &self.file_path else {
            self.status_message = "No file path. Start tabgrid with a FILE to save".to_string();
            return;
        };

        match storage::save_file(self.editor.grid(), path, Format::for_path(path)) {
            Ok(()) => {
                self.editor.mark_saved();
                self.status_message = format!("Saved to {}", path.display());
            }
            Err(e) => {
                self.status_message = format!("Error saving: {}", e);
            }
        }
    }

    /// Returns true when the app should exit.
    pub fn request_quit(&mut self) -> bool {
        if self.editor.is_modified() && !self.confirm_quit {
            self.confirm_quit = true;
            self.status_message = "Unsaved changes. Press quit again to discard them".to_string();
            return false;
        }
        true
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tabgrid_core::{GridModel, MemoryClipboard};

    pub(crate) fn test_app() -> App {
        let mut grid = GridModel::from_column_names(["A", "B", "C"]);
        grid.push_row_values(["a1", "b1", "c1"]);
        grid.push_row_values(["a2", "b2", "c2"]);
        App::new(
            Editor::new(grid),
            Box::new(MemoryClipboard::new()),
            Keymap::Standard,
        )
    }

    #[test]
    fn mode_follows_editor_and_prompt() {
        let mut app = test_app();
        assert_eq!(app.mode(), Mode::Grid);
        app.dispatch(InputEvent::DoubleClick(Position::new(0, 0)));
        assert_eq!(app.mode(), Mode::Edit);
        app.open_rename();
        assert_eq!(app.mode(), Mode::Rename);
    }

    #[test]
    fn copy_and_paste_through_clipboard() {
        let mut app = test_app();
        app.dispatch(InputEvent::PointerDown(Position::new(0, 0)));
        app.dispatch(InputEvent::PointerEnter(Position::new(0, 1)));
        app.dispatch(InputEvent::PointerUp);
        app.copy();
        assert_eq!(app.status_message, "Copied selection");

        app.dispatch(InputEvent::PointerDown(Position::new(1, 2)));
        app.dispatch(InputEvent::PointerUp);
        app.paste();
        assert_eq!(app.status_message, "Pasted 1x2");
        assert_eq!(app.editor.grid().cell(1, 2), Some("a1"));
        assert_eq!(app.editor.grid().cell(1, 3), Some("b1"));
    }

    #[test]
    fn copy_without_selection_reports() {
        let mut app = test_app();
        app.copy();
        assert_eq!(app.status_message, "Nothing selected");
    }

    #[test]
    fn move_current_row_and_column() {
        let mut app = test_app();
        app.dispatch(InputEvent::PointerDown(Position::new(0, 0)));
        app.dispatch(InputEvent::PointerUp);

        app.move_current(Axis::Row, 1);
        assert_eq!(app.editor.grid().cell(1, 0), Some("a1"));
        assert_eq!(app.current(), Some(Position::new(1, 0)));

        app.move_current(Axis::Row, 1);
        assert_eq!(app.current(), Some(Position::new(1, 0)));

        app.move_current(Axis::Column, 1);
        assert_eq!(app.editor.grid().columns()[1].name, "A");
        assert_eq!(app.current(), Some(Position::new(1, 1)));
    }

    #[test]
    fn rename_prompt_commit_and_cancel() {
        let mut app = test_app();
        app.dispatch(InputEvent::PointerDown(Position::new(0, 1)));
        app.dispatch(InputEvent::PointerUp);

        app.open_rename();
        let prompt = app.rename.as_mut().unwrap();
        assert_eq!(prompt.buffer.text(), "B");
        prompt.buffer.set("Price");
        app.commit_rename();
        assert_eq!(app.editor.grid().columns()[1].name, "Price");

        app.open_rename();
        app.cancel_rename();
        assert_eq!(app.mode(), Mode::Grid);
        assert_eq!(app.editor.grid().columns()[1].name, "Price");
    }

    #[test]
    fn resize_uses_pixel_units() {
        let mut app = test_app();
        app.dispatch(InputEvent::PointerDown(Position::new(0, 0)));
        assert_eq!(app.column_width_chars(0), 15);
        app.resize_current_column(20);
        assert_eq!(app.column_width_chars(0), 17);
        app.resize_current_column(-1000);
        assert_eq!(app.column_width_chars(0), 3);
    }

    #[test]
    fn quit_requires_confirmation_when_modified() {
        let mut app = test_app();
        assert!(app.request_quit());

        app.add_row();
        assert!(!app.request_quit());
        assert!(app.confirm_quit);
        assert!(app.request_quit());
    }

    #[test]
    fn save_without_path_reports() {
        let mut app = test_app();
        app.save_file();
        assert!(app.status_message.starts_with("No file path"));
    }

    #[test]
    fn viewport_follows_current_cell() {
        let mut app = test_app();
        for _ in 0..20 {
            app.add_row();
        }
        app.visible_rows = 5;
        app.dispatch(InputEvent::PointerDown(Position::new(10, 0)));
        assert_eq!(app.viewport_row, 6);
        app.dispatch(InputEvent::PointerDown(Position::new(2, 0)));
        assert_eq!(app.viewport_row, 2);
    }
}
