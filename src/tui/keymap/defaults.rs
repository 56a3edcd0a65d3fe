use crate::tui::app::Mode;
use crate::tui::keymap::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Width change per resize key press, in pixels (one terminal column).
pub(crate) const RESIZE_STEP: i32 = 10;

pub(crate) fn translate_standard(mode: Mode, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match mode {
        Mode::Grid => match key.code {
            KeyCode::Char('q') if ctrl => Some(Action::Quit),
            KeyCode::Char('s') if ctrl => Some(Action::Save),
            KeyCode::Char('c') if ctrl => Some(Action::Copy),
            KeyCode::Char('v') if ctrl => Some(Action::Paste),
            KeyCode::Char('n') if ctrl => Some(Action::AddRow),
            KeyCode::Char('d') if ctrl => Some(Action::DeleteRow),
            KeyCode::Char('t') if ctrl => Some(Action::AddColumn),
            KeyCode::Char('x') if ctrl => Some(Action::DeleteColumn),
            KeyCode::Char('r') if ctrl => Some(Action::RenameColumn),

            KeyCode::Up if alt => Some(Action::MoveRow(-1)),
            KeyCode::Down if alt => Some(Action::MoveRow(1)),
            KeyCode::Left if alt => Some(Action::MoveColumn(-1)),
            KeyCode::Right if alt => Some(Action::MoveColumn(1)),
            KeyCode::Char('=') | KeyCode::Char('+') if alt => {
                Some(Action::ResizeColumn(RESIZE_STEP))
            }
            KeyCode::Char('-') if alt => Some(Action::ResizeColumn(-RESIZE_STEP)),
            _ => None,
        },

        Mode::Edit => match key.code {
            KeyCode::Char('q') if ctrl => Some(Action::Quit),
            KeyCode::Char('s') if ctrl => Some(Action::Save),
            KeyCode::Char('v') if ctrl => Some(Action::Paste),
            _ => None,
        },

        Mode::Rename => None,
    }
}
