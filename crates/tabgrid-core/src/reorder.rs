//! Drag-and-drop reordering of rows and columns.

use crate::error::Result;
use crate::grid::GridModel;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

/// Which side of the target the item was dropped on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    fn parse(s: &str) -> Option<Edge> {
        match s {
            "top" => Some(Edge::Top),
            "bottom" => Some(Edge::Bottom),
            "left" => Some(Edge::Left),
            "right" => Some(Edge::Right),
            _ => None,
        }
    }

    /// `Some(true)` for the trailing edge on this axis, `Some(false)` for the leading one.
    fn trailing_on(self, axis: Axis) -> Option<bool> {
        match (axis, self) {
            (Axis::Row, Edge::Top) | (Axis::Column, Edge::Left) => Some(false),
            (Axis::Row, Edge::Bottom) | (Axis::Column, Edge::Right) => Some(true),
            _ => None,
        }
    }
}

/// A completed drag: move the item at `source` relative to the item at `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReorderIntent {
    pub axis: Axis,
    pub source: usize,
    pub target: usize,
    pub edge: Option<Edge>,
}

impl ReorderIntent {
    pub fn new(axis: Axis, source: usize, target: usize) -> Self {
        ReorderIntent {
            axis,
            source,
            target,
            edge: None,
        }
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edge = Some(edge);
        self
    }

    /// Build an intent from loosely typed drag data (`"row"`/`"column"`, edge names).
    pub fn from_raw(kind: &str, source: usize, target: usize, edge: Option<&str>) -> Option<Self> {
        let axis = match kind {
            "row" => Axis::Row,
            "column" => Axis::Column,
            _ => return None,
        };
        let edge = match edge {
            Some(name) => Some(Edge::parse(name)?),
            None => None,
        };
        Some(ReorderIntent {
            axis,
            source,
            target,
            edge,
        })
    }

    /// Final index of the moved item.
    pub fn destination(&self) -> usize {
        destination_index(self.source, self.target, self.edge, self.axis)
    }
}

/// Index the source item ends up at once it is removed and reinserted.
///
/// Without an edge the item takes the target's index. With an edge it lands
/// before or after the target, accounting for the slot freed by its removal.
pub fn destination_index(source: usize, target: usize, edge: Option<Edge>, axis: Axis) -> usize {
    let Some(trailing) = edge.and_then(|edge| edge.trailing_on(axis)) else {
        return target;
    };
    match (trailing, source < target) {
        (false, true) => target - 1,
        (false, false) => target,
        (true, true) => target,
        (true, false) => target + 1,
    }
}

/// Apply a drop. Returns the `(from, to)` move performed, or `None` for a no-op.
pub fn apply(grid: &mut GridModel, intent: &ReorderIntent) -> Result<Option<(usize, usize)>> {
    let to = intent.destination();
    if to == intent.source {
        return Ok(None);
    }
    match intent.axis {
        Axis::Row => grid.reorder_row(intent.source, to)?,
        Axis::Column => grid.reorder_column(intent.source, to)?,
    }
    debug!(axis = ?intent.axis, from = intent.source, to, "drop applied");
    Ok(Some((intent.source, to)))
}
