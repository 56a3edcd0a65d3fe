//! Keymap translation layer.
//!
//! This keeps key handling separate from app behavior. Keys that translate to
//! an [`Action`] are handled by the host; everything else goes to the editor core.

mod defaults;
mod parse;
mod types;

pub(crate) use defaults::RESIZE_STEP;
pub use parse::{KeymapFile, build_keymap};
pub use types::{Action, Binding, CustomKeymap, KeyCombo, Keymap, KeymapBindings};

use crate::tui::app::Mode;
use crossterm::event::KeyEvent;

/// Translate a key event to an action based on the current keymap and mode.
///
/// Returns `None` if the key has no binding in the current context.
pub fn translate(keymap: &Keymap, mode: Mode, key: KeyEvent) -> Option<Action> {
    match keymap {
        Keymap::Standard => defaults::translate_standard(mode, key),
        Keymap::Custom(custom) => custom
            .translate(mode, key)
            .or_else(|| defaults::translate_standard(mode, key)),
    }
}
