//! Writing a pasted block into the grid.

use crate::grid::{GridModel, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What to do with pasted values that fall outside the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PastePolicy {
    /// Add rows and columns until the whole block fits.
    #[default]
    Grow,
    /// Keep the grid's size and drop values that don't fit.
    Clip,
}

/// Summary of a paste, for hosts that want to give feedback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasteReport {
    /// Rows in the block
    pub rows: usize,
    /// Widest row in the block
    pub cols: usize,
    pub written: usize,
    pub dropped: usize,
}

/// Write `block` with its top-left value at `origin`.
pub fn paste_block(
    grid: &mut GridModel,
    origin: Position,
    block: &[Vec<String>],
    policy: PastePolicy,
) -> PasteReport {
    let cols = block.iter().map(Vec::len).max().unwrap_or(0);
    let mut report = PasteReport {
        rows: block.len(),
        cols,
        ..PasteReport::default()
    };
    if block.is_empty() {
        return report;
    }

    if policy == PastePolicy::Grow {
        grid.ensure_size(origin.r + block.len(), origin.c + cols);
    }

    for (ri, values) in block.iter().enumerate() {
        let r = origin.r + ri;
        for (ci, value) in values.iter().enumerate() {
            let c = origin.c + ci;
            let Some(id) = grid.column(c).map(|col| col.id.clone()) else {
                report.dropped += 1;
                continue;
            };
            match grid.update_cell(r, &id, value) {
                Ok(()) => report.written += 1,
                Err(err) => {
                    if policy == PastePolicy::Grow {
                        warn!(error = %err, "paste target missing after growing grid");
                    }
                    report.dropped += 1;
                }
            }
        }
    }

    debug!(
        origin = %origin,
        rows = report.rows,
        cols = report.cols,
        written = report.written,
        dropped = report.dropped,
        "paste"
    );
    report
}
