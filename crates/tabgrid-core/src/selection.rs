//! Rectangular cell selection and edit-mode tracking.
//!
//! The engine holds three position slots:
//! - `anchor`: fixed corner of the selection
//! - `current`: moving corner; also the cell that keyboard input targets
//! - `editing`: the single cell in edit mode, always equal to `current` when set
//!
//! `anchor` and `current` are either both set or both empty.

use crate::grid::Position;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::debug;

/// Inclusive rectangle of cells spanned by two corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl CellRange {
    pub fn from_corners(a: Position, b: Position) -> Self {
        CellRange {
            top: a.r.min(b.r),
            left: a.c.min(b.c),
            bottom: a.r.max(b.r),
            right: a.c.max(b.c),
        }
    }

    pub fn contains(&self, r: usize, c: usize) -> bool {
        r >= self.top && r <= self.bottom && c >= self.left && c <= self.right
    }

    pub fn rows(&self) -> RangeInclusive<usize> {
        self.top..=self.bottom
    }

    pub fn cols(&self) -> RangeInclusive<usize> {
        self.left..=self.right
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn origin(&self) -> Position {
        Position::new(self.top, self.left)
    }
}

/// Arrow-key direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Coarse state of the selection machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No drag in progress and no cell being edited.
    Idle,
    /// Pointer held down, extending the rectangle.
    Selecting,
    /// A single cell's text is being composed.
    Editing,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionEngine {
    anchor: Option<Position>,
    current: Option<Position>,
    editing: Option<Position>,
    dragging: bool,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    pub fn current(&self) -> Option<Position> {
        self.current
    }

    pub fn editing_cell(&self) -> Option<Position> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn phase(&self) -> Phase {
        if self.editing.is_some() {
            Phase::Editing
        } else if self.dragging {
            Phase::Selecting
        } else {
            Phase::Idle
        }
    }

    /// Start a pointer selection at `pos`.
    pub fn begin(&mut self, pos: Position) {
        self.anchor = Some(pos);
        self.current = Some(pos);
        self.editing = None;
        self.dragging = true;
        debug!(cell = %pos, "begin selection");
    }

    /// Move the current corner while the pointer is held. Returns false when not dragging.
    pub fn extend(&mut self, pos: Position) -> bool {
        if !self.dragging || self.editing.is_some() {
            return false;
        }
        self.current = Some(pos);
        true
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Collapse the selection onto a single cell.
    pub fn select(&mut self, pos: Position) {
        self.anchor = Some(pos);
        self.current = Some(pos);
        if self.editing != Some(pos) {
            self.editing = None;
        }
    }

    pub fn select_range(&mut self, anchor: Position, current: Position) {
        self.anchor = Some(anchor);
        self.current = Some(current);
        self.editing = None;
    }

    pub fn clear(&mut self) {
        *self = SelectionEngine::default();
    }

    /// Put the current cell into edit mode. Returns the cell, or `None` without a current cell.
    pub fn start_editing(&mut self) -> Option<Position> {
        let pos = self.current?;
        self.editing = Some(pos);
        debug!(cell = %pos, "start editing");
        Some(pos)
    }

    pub fn stop_editing(&mut self) -> Option<Position> {
        self.editing.take()
    }

    pub fn range(&self) -> Option<CellRange> {
        match (self.anchor, self.current) {
            (Some(a), Some(c)) => Some(CellRange::from_corners(a, c)),
            _ => None,
        }
    }

    pub fn is_selected(&self, r: usize, c: usize) -> bool {
        self.range().is_some_and(|range| range.contains(r, c))
    }

    /// Arrow navigation. With `extend` only the current corner moves.
    ///
    /// Without a current cell the first cell is selected. Ignored while editing.
    pub fn navigate(&mut self, dir: Direction, extend: bool, rows: usize, cols: usize) -> bool {
        if self.editing.is_some() || rows == 0 || cols == 0 {
            return false;
        }
        let Some(cur) = self.current else {
            self.select(Position::new(0, 0));
            return true;
        };
        let next = match dir {
            Direction::Up => Position::new(cur.r.saturating_sub(1), cur.c),
            Direction::Down => Position::new((cur.r + 1).min(rows - 1), cur.c),
            Direction::Left => Position::new(cur.r, cur.c.saturating_sub(1)),
            Direction::Right => Position::new(cur.r, (cur.c + 1).min(cols - 1)),
        };
        if extend {
            self.current = Some(next);
        } else {
            self.select(next);
        }
        true
    }

    /// Tab traversal.
    ///
    /// Forward moves one column right, wrapping to column 0 of the next row at the
    /// last column (no wrap past the last row). Backward moves one column left and
    /// only wraps to the end of the previous row when `wrap_backward` is set.
    pub fn tab(&mut self, backward: bool, wrap_backward: bool, rows: usize, cols: usize) -> bool {
        if self.editing.is_some() || rows == 0 || cols == 0 {
            return false;
        }
        let Some(Position { r, c }) = self.current else {
            return false;
        };
        let next = if backward {
            if c > 0 {
                Position::new(r, c - 1)
            } else if wrap_backward && r > 0 {
                Position::new(r - 1, cols - 1)
            } else {
                Position::new(r, 0)
            }
        } else if c + 1 < cols {
            Position::new(r, c + 1)
        } else {
            Position::new((r + 1).min(rows - 1), 0)
        };
        self.select(next);
        true
    }

    /// Bring every slot back inside a `rows` x `cols` grid.
    pub fn clamp(&mut self, rows: usize, cols: usize) {
        if rows == 0 || cols == 0 {
            if self.anchor.is_some() {
                debug!("grid has no cells, clearing selection");
            }
            self.clear();
            return;
        }
        self.anchor = self.anchor.and_then(|p| p.clamped(rows, cols));
        self.current = self.current.and_then(|p| p.clamped(rows, cols));
        self.editing = self.editing.and_then(|p| p.clamped(rows, cols));
    }

    /// Keep the slots on the same data after a row moved from `from` to `to`.
    pub fn follow_row_move(&mut self, from: usize, to: usize) {
        for slot in [&mut self.anchor, &mut self.current, &mut self.editing] {
            if let Some(pos) = slot {
                pos.r = map_move(pos.r, from, to);
            }
        }
    }

    /// Keep the slots on the same data after a column moved from `from` to `to`.
    pub fn follow_column_move(&mut self, from: usize, to: usize) {
        for slot in [&mut self.anchor, &mut self.current, &mut self.editing] {
            if let Some(pos) = slot {
                pos.c = map_move(pos.c, from, to);
            }
        }
    }
}

fn map_move(index: usize, from: usize, to: usize) -> usize {
    if index == from {
        to
    } else if from < to && index > from && index <= to {
        index - 1
    } else if to < from && index >= to && index < from {
        index + 1
    } else {
        index
    }
}
