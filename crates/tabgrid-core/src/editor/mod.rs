//! The editing session: a grid, the selection over it, and the in-progress cell edit.
//!
//! [`Editor`] is the single owner of all mutable state. Hosts read it to render
//! and feed it [`InputEvent`]s; every mutation goes through its methods so the
//! selection can be re-clamped whenever the grid shrinks.

mod edit;
mod input;
mod text;

pub use edit::EditSession;
pub use input::{EventOutcome, InputEvent, Key, KeyInput, Modifiers};
pub use text::TextBuffer;

use crate::clipboard::{self, ClipboardPayload, ClipboardProvider, CopyOutcome};
use crate::grid::{ColumnId, GridModel, Position};
use crate::paste::{PasteReport, paste_block};
use crate::reorder::{self, Axis, ReorderIntent};
use crate::selection::SelectionEngine;
use crate::settings::Settings;
use tracing::{debug, warn};

pub struct Editor {
    grid: GridModel,
    selection: SelectionEngine,
    settings: Settings,
    session: Option<EditSession>,
    modified: bool,
}

impl Editor {
    pub fn new(grid: GridModel) -> Self {
        Self::with_settings(grid, Settings::default())
    }

    pub fn with_settings(mut grid: GridModel, settings: Settings) -> Self {
        grid.set_width_limits(
            settings.grid.default_column_width,
            settings.grid.min_column_width,
        );
        Editor {
            grid,
            selection: SelectionEngine::new(),
            settings,
            session: None,
            modified: false,
        }
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.grid.set_width_limits(
            settings.grid.default_column_width,
            settings.grid.min_column_width,
        );
        self.settings = settings;
    }

    /// The cell being edited with its text buffer, if any.
    pub fn edit_session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    fn bounds(&self) -> (usize, usize) {
        (self.grid.row_count(), self.grid.column_count())
    }

    fn in_bounds(&self, pos: Position) -> bool {
        pos.r < self.grid.row_count() && pos.c < self.grid.column_count()
    }

    /// Re-establish the selection invariants after the grid changed shape.
    fn clamp_selection(&mut self) {
        let (rows, cols) = self.bounds();
        self.selection.clamp(rows, cols);
        if self.selection.editing_cell().is_none() {
            self.session = None;
        }
    }

    // Cell editing

    /// Enter edit mode on the current cell, keeping its value.
    pub fn begin_edit(&mut self) -> bool {
        if self.selection.is_editing() {
            return false;
        }
        let Some(pos) = self.selection.start_editing() else {
            return false;
        };
        let value = self.grid.cell(pos.r, pos.c).unwrap_or_default();
        self.session = Some(EditSession::new(pos, value));
        true
    }

    /// Enter edit mode on the current cell, replacing its value with `ch`.
    pub fn begin_typeahead(&mut self, ch: char) -> bool {
        if !self.begin_edit() {
            return false;
        }
        if let Some(session) = self.session.as_mut() {
            session.replace(ch.to_string());
        }
        self.write_through();
        true
    }

    /// Leave edit mode keeping the typed value.
    pub fn commit_edit(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                self.selection.stop_editing();
                debug!(cell = %session.position(), "commit edit");
                true
            }
            None => false,
        }
    }

    /// Leave edit mode restoring the value from before the edit began.
    pub fn cancel_edit(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        self.selection.stop_editing();
        let pos = session.position();
        if let Err(err) = self.grid.set_cell(pos.r, pos.c, session.original()) {
            warn!(cell = %pos, error = %err, "could not restore value after cancelled edit");
        }
        debug!(cell = %pos, "cancel edit");
        true
    }

    /// Copy the session buffer into the grid.
    fn write_through(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let pos = session.position();
        match self.grid.set_cell(pos.r, pos.c, session.text()) {
            Ok(()) => self.modified = true,
            Err(err) => warn!(cell = %pos, error = %err, "dropping edit for missing cell"),
        }
    }

    // Clipboard

    /// Copy the selected rectangle. `None` when nothing is selected or a cell is being edited.
    pub fn copy_selection(&self, provider: &mut dyn ClipboardProvider) -> Option<CopyOutcome> {
        if self.selection.is_editing() {
            return None;
        }
        let range = self.selection.range()?;
        let payload = clipboard::serialize(&self.grid, range, self.settings.clipboard.copy_header);
        Some(clipboard::copy_payload(provider, &payload))
    }

    /// Paste at the current cell and continue editing there.
    pub fn paste(&mut self, payload: &ClipboardPayload) -> Option<PasteReport> {
        let origin = self.selection.current()?;
        let block = clipboard::deserialize(payload, self.settings.clipboard.skip_html_header);
        if block.is_empty() {
            return None;
        }
        self.commit_edit();
        let report = paste_block(
            &mut self.grid,
            origin,
            &block,
            self.settings.grid.paste_policy,
        );
        if report.written > 0 {
            self.modified = true;
        }
        self.selection.select(origin);
        self.begin_edit();
        Some(report)
    }

    /// Empty every selected cell. Returns how many cells were cleared.
    pub fn clear_selected(&mut self) -> usize {
        if self.selection.is_editing() {
            return 0;
        }
        let Some(range) = self.selection.range() else {
            return 0;
        };
        let mut cleared = 0;
        for r in range.rows() {
            for c in range.cols() {
                if self.grid.set_cell(r, c, "").is_ok() {
                    cleared += 1;
                }
            }
        }
        if cleared > 0 {
            self.modified = true;
        }
        cleared
    }

    // Structure

    pub fn set_cell(&mut self, r: usize, c: usize, value: &str) -> bool {
        match self.grid.set_cell(r, c, value) {
            Ok(()) => {
                self.modified = true;
                true
            }
            Err(err) => {
                warn!(row = r, col = c, error = %err, "rejected cell update");
                false
            }
        }
    }

    pub fn add_row(&mut self) -> usize {
        self.modified = true;
        self.grid.add_row()
    }

    pub fn delete_row(&mut self, index: usize) -> bool {
        self.commit_edit();
        match self.grid.delete_row(index) {
            Ok(_) => {
                self.modified = true;
                self.clamp_selection();
                true
            }
            Err(err) => {
                warn!(error = %err, "rejected row delete");
                false
            }
        }
    }

    pub fn add_column(&mut self) -> ColumnId {
        self.modified = true;
        self.grid.add_column().id.clone()
    }

    pub fn delete_column(&mut self, id: &ColumnId) -> bool {
        self.commit_edit();
        match self.grid.delete_column(id) {
            Ok(_) => {
                self.modified = true;
                self.clamp_selection();
                true
            }
            Err(err) => {
                warn!(error = %err, "rejected column delete");
                false
            }
        }
    }

    pub fn rename_column(&mut self, id: &ColumnId, name: &str) -> bool {
        let renamed = self.grid.rename_column(id, name);
        if renamed {
            self.modified = true;
        } else {
            warn!(column = %id, "rename of unknown column");
        }
        renamed
    }

    pub fn resize_column(&mut self, id: &ColumnId, delta: i32) -> Option<u32> {
        let width = self.grid.resize_column(id, delta);
        if width.is_none() {
            warn!(column = %id, "resize of unknown column");
        }
        width
    }

    /// Apply a drag-and-drop reorder and keep the selection on the moved data.
    pub fn apply_drop(&mut self, intent: &ReorderIntent) -> bool {
        match reorder::apply(&mut self.grid, intent) {
            Ok(Some((from, to))) => {
                self.modified = true;
                match intent.axis {
                    Axis::Row => self.selection.follow_row_move(from, to),
                    Axis::Column => self.selection.follow_column_move(from, to),
                }
                if let Some(session) = self.session.as_mut() {
                    if let Some(pos) = self.selection.editing_cell() {
                        session.move_to(pos);
                    }
                }
                true
            }
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "rejected drop");
                false
            }
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(GridModel::new())
    }
}
