//! Editor behaviour knobs.
//!
//! Every field has a default, so a settings file only needs the keys it changes.

use crate::grid::{DEFAULT_COLUMN_WIDTH, MIN_COLUMN_WIDTH};
use crate::paste::PastePolicy;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub grid: GridSettings,
    pub clipboard: ClipboardSettings,
    pub navigation: NavigationSettings,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridSettings {
    pub paste_policy: PastePolicy,
    pub default_column_width: u32,
    pub min_column_width: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        GridSettings {
            paste_policy: PastePolicy::Grow,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            min_column_width: MIN_COLUMN_WIDTH,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClipboardSettings {
    /// Prepend a row of column names when copying.
    pub copy_header: bool,
    /// Drop the first row of pasted HTML tables.
    pub skip_html_header: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationSettings {
    /// Shift+Tab at column 0 continues from the end of the previous row.
    pub shift_tab_wraps: bool,
    /// Committing an edit with Enter moves the selection one row down.
    pub enter_moves_down: bool,
}
