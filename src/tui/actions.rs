use crossterm::event::{self, KeyCode};
use tabgrid_core::reorder::Axis;

use super::app::App;
use super::input::key_input;
use super::keymap::Action;

/// Result of applying an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyResult {
    Continue,
    Quit,
}

/// Apply an action to the application state.
///
/// Returns `ApplyResult::Quit` if the application should exit.
pub fn apply_action(app: &mut App, action: Action) -> ApplyResult {
    if action != Action::Quit {
        app.confirm_quit = false;
    }
    match action {
        Action::Quit => {
            if app.request_quit() {
                return ApplyResult::Quit;
            }
        }
        Action::Save => app.save_file(),
        Action::Copy => app.copy(),
        Action::Paste => app.paste(),
        Action::AddRow => app.add_row(),
        Action::DeleteRow => app.delete_row(),
        Action::AddColumn => app.add_column(),
        Action::DeleteColumn => app.delete_column(),
        Action::RenameColumn => app.open_rename(),
        Action::MoveRow(delta) => app.move_current(Axis::Row, delta),
        Action::MoveColumn(delta) => app.move_current(Axis::Column, delta),
        Action::ResizeColumn(delta) => app.resize_current_column(delta),
    }
    ApplyResult::Continue
}

/// Keys typed while the rename prompt is open.
pub fn handle_rename_key(app: &mut App, key: event::KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_rename(),
        KeyCode::Esc => app.cancel_rename(),
        _ => {
            if let (Some(prompt), Some(input)) = (app.rename.as_mut(), key_input(key)) {
                prompt.buffer.apply_key(&input);
            }
        }
    }
}
