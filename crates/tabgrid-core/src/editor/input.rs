//! Event dispatch: pointer, keyboard, clipboard and drag gestures.

use super::Editor;
use crate::clipboard::{ClipboardPayload, ClipboardProvider, CopyOutcome};
use crate::grid::{ColumnId, Position};
use crate::paste::PasteReport;
use crate::reorder::ReorderIntent;
use crate::selection::Direction;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Nothing but (optionally) Shift is held, so a char key produces text.
    pub fn is_text(&self) -> bool {
        !self.ctrl && !self.alt && !self.meta
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    F(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        KeyInput {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        KeyInput { key, modifiers }
    }

    pub fn shifted(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::SHIFT)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown(Position),
    PointerEnter(Position),
    PointerUp,
    DoubleClick(Position),
    Key(KeyInput),
    Paste(ClipboardPayload),
    /// Focus left the grid.
    Blur,
    Drop(ReorderIntent),
    Resize { column: ColumnId, delta: i32 },
}

/// What an event did, so hosts know whether to repaint or give feedback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    Ignored,
    Handled,
    Copied(CopyOutcome),
    Pasted(PasteReport),
}

impl EventOutcome {
    fn from_bool(handled: bool) -> Self {
        if handled {
            EventOutcome::Handled
        } else {
            EventOutcome::Ignored
        }
    }
}

fn direction(key: Key) -> Option<Direction> {
    match key {
        Key::Up => Some(Direction::Up),
        Key::Down => Some(Direction::Down),
        Key::Left => Some(Direction::Left),
        Key::Right => Some(Direction::Right),
        _ => None,
    }
}

impl Editor {
    /// Dispatch one host event.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        clipboard: &mut dyn ClipboardProvider,
    ) -> EventOutcome {
        match event {
            InputEvent::PointerDown(pos) => self.on_pointer_down(pos),
            InputEvent::PointerEnter(pos) => {
                let (rows, cols) = self.bounds();
                match pos.clamped(rows, cols) {
                    Some(pos) if self.selection.current() != Some(pos) => {
                        EventOutcome::from_bool(self.selection.extend(pos))
                    }
                    _ => EventOutcome::Ignored,
                }
            }
            InputEvent::PointerUp => {
                let was_dragging = self.selection.is_dragging();
                self.selection.end_drag();
                EventOutcome::from_bool(was_dragging)
            }
            InputEvent::DoubleClick(pos) => {
                if !self.in_bounds(pos) {
                    return EventOutcome::Ignored;
                }
                if self.selection.editing_cell() == Some(pos) {
                    return EventOutcome::Ignored;
                }
                self.commit_edit();
                self.selection.end_drag();
                self.selection.select(pos);
                EventOutcome::from_bool(self.begin_edit())
            }
            InputEvent::Key(key) => {
                if self.selection.is_editing() {
                    self.on_edit_key(key)
                } else {
                    self.on_key(key, clipboard)
                }
            }
            InputEvent::Paste(payload) => match self.paste(&payload) {
                Some(report) => EventOutcome::Pasted(report),
                None => EventOutcome::Ignored,
            },
            InputEvent::Blur => {
                self.selection.end_drag();
                EventOutcome::from_bool(self.commit_edit())
            }
            InputEvent::Drop(intent) => EventOutcome::from_bool(self.apply_drop(&intent)),
            InputEvent::Resize { column, delta } => {
                EventOutcome::from_bool(self.resize_column(&column, delta).is_some())
            }
        }
    }

    fn on_pointer_down(&mut self, pos: Position) -> EventOutcome {
        if !self.in_bounds(pos) {
            warn!(cell = %pos, "pointer down outside grid");
            return EventOutcome::Ignored;
        }
        // Clicks inside the cell being edited belong to its text field.
        if self.selection.editing_cell() == Some(pos) {
            return EventOutcome::Ignored;
        }
        self.commit_edit();
        self.selection.begin(pos);
        EventOutcome::Handled
    }

    fn on_key(&mut self, input: KeyInput, clipboard: &mut dyn ClipboardProvider) -> EventOutcome {
        let mods = input.modifiers;
        let (rows, cols) = self.bounds();

        if mods.command() {
            return match input.key {
                Key::Char('c') | Key::Char('C') => match self.copy_selection(clipboard) {
                    Some(outcome) => {
                        debug!(?outcome, "copy");
                        EventOutcome::Copied(outcome)
                    }
                    None => EventOutcome::Ignored,
                },
                _ => EventOutcome::Ignored,
            };
        }

        if let Some(dir) = direction(input.key) {
            return EventOutcome::from_bool(self.selection.navigate(dir, mods.shift, rows, cols));
        }

        match input.key {
            Key::Char(ch) if mods.is_text() => EventOutcome::from_bool(self.begin_typeahead(ch)),
            Key::Enter | Key::F(2) => EventOutcome::from_bool(self.begin_edit()),
            Key::Tab => EventOutcome::from_bool(self.selection.tab(
                mods.shift,
                self.settings.navigation.shift_tab_wraps,
                rows,
                cols,
            )),
            Key::Delete | Key::Backspace => EventOutcome::from_bool(self.clear_selected() > 0),
            _ => EventOutcome::Ignored,
        }
    }

    fn on_edit_key(&mut self, input: KeyInput) -> EventOutcome {
        let (rows, cols) = self.bounds();
        match input.key {
            Key::Enter => {
                self.commit_edit();
                if self.settings.navigation.enter_moves_down {
                    self.selection.navigate(Direction::Down, false, rows, cols);
                }
                EventOutcome::Handled
            }
            Key::Tab => {
                self.commit_edit();
                self.selection.tab(
                    input.modifiers.shift,
                    self.settings.navigation.shift_tab_wraps,
                    rows,
                    cols,
                );
                EventOutcome::Handled
            }
            Key::Escape => EventOutcome::from_bool(self.cancel_edit()),
            _ => {
                let Some(session) = self.session.as_mut() else {
                    return EventOutcome::Ignored;
                };
                let before = session.cursor();
                let changed = session.apply_key(&input);
                let moved = session.cursor() != before;
                if changed {
                    self.write_through();
                }
                EventOutcome::from_bool(changed || moved)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::grid::GridModel;
    use crate::reorder::Axis;
    use crate::selection::Phase;
    use crate::settings::Settings;

    fn p(r: usize, c: usize) -> Position {
        Position::new(r, c)
    }

    fn key(k: Key) -> InputEvent {
        InputEvent::Key(KeyInput::new(k))
    }

    fn ctrl(ch: char) -> InputEvent {
        InputEvent::Key(KeyInput::with_modifiers(
            Key::Char(ch),
            Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
        ))
    }

    fn editor() -> (Editor, MemoryClipboard) {
        let mut grid = GridModel::from_column_names(["A", "B", "C"]);
        grid.push_row_values(["a1", "b1", "c1"]);
        grid.push_row_values(["a2", "b2", "c2"]);
        grid.push_row_values(["a3", "b3", "c3"]);
        (Editor::new(grid), MemoryClipboard::new())
    }

    #[test]
    fn test_drag_selects_rectangle() {
        let (mut ed, mut clip) = editor();
        ed.handle_event(InputEvent::PointerDown(p(0, 0)), &mut clip);
        assert_eq!(ed.selection().phase(), Phase::Selecting);
        ed.handle_event(InputEvent::PointerEnter(p(2, 1)), &mut clip);
        ed.handle_event(InputEvent::PointerUp, &mut clip);
        assert_eq!(ed.selection().phase(), Phase::Idle);

        let sel = ed.selection();
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(sel.is_selected(r, c), c <= 1, "cell ({r}, {c})");
            }
        }
    }

    #[test]
    fn test_pointer_enter_without_drag_is_ignored() {
        let (mut ed, mut clip) = editor();
        ed.handle_event(InputEvent::PointerDown(p(0, 0)), &mut clip);
        ed.handle_event(InputEvent::PointerUp, &mut clip);
        let outcome = ed.handle_event(InputEvent::PointerEnter(p(2, 2)), &mut clip);
        assert_eq!(outcome, EventOutcome::Ignored);
        assert_eq!(ed.selection().current(), Some(p(0, 0)));
    }

    #[test]
    fn test_typeahead_overwrites_value() {
        let (mut ed, mut clip) = editor();
        ed.handle_event(InputEvent::PointerDown(p(1, 1)), &mut clip);
        ed.handle_event(InputEvent::PointerUp, &mut clip);
        ed.handle_event(key(Key::Char('x')), &mut clip);
        assert_eq!(ed.grid().cell(1, 1), Some("x"));
        assert_eq!(ed.selection().editing_cell(), Some(p(1, 1)));
        assert_eq!(ed.selection().phase(), Phase::Editing);
    }

    #[test]
    fn test_typing_writes_through_and_enter_commits() {
        let (mut ed, mut clip) = editor();
        ed.handle_event(InputEvent::DoubleClick(p(0, 0)), &mut clip);
        assert_eq!(ed.edit_session().unwrap().text(), "a1");
        ed.handle_event(key(Key::Char('!')), &mut clip);
        assert_eq!(ed.grid().cell(0, 0), Some("a1!"));
        ed.handle_event(key(Key::Enter), &mut clip);
        assert!(!ed.selection().is_editing());
        assert_eq!(ed.selection().current(), Some(p(0, 0)));
        assert_eq!(ed.grid().cell(0, 0), Some("a1!"));
    }

    #[test]
    fn test_enter_moves_down_when_configured() {
        let (ed, mut clip) = editor();
        let mut settings = Settings::default();
        settings.navigation.enter_moves_down = true;
        let mut ed = Editor::with_settings(ed.grid().clone(), settings);
        ed.handle_event(InputEvent::DoubleClick(p(0, 1)), &mut clip);
        ed.handle_event(key(Key::Enter), &mut clip);
        assert_eq!(ed.selection().current(), Some(p(1, 1)));
        assert!(!ed.selection().is_editing());
    }

    #[test]
    fn test_escape_cancels_edit() {
        let (mut ed, mut clip) = editor();
        ed.handle_event(InputEvent::PointerDown(p(2, 0)), &mut clip);
        ed.handle_event(key(Key::Char('q')), &mut clip);
        ed.handle_event(key(Key::Char('r')), &mut clip);
        assert_eq!(ed.grid().cell(2, 0), Some("qr"));
        ed.handle_event(key(Key::Escape), &mut clip);
        assert_eq!(ed.grid().cell(2, 0), Some("a3"));
        assert!(!ed.selection().is_editing());
    }

    #[test]
    fn test_enter_and_f2_keep_value() {
        let (mut ed, mut clip) = editor();
        ed.handle_event(InputEvent::PointerDown(p(0, 2)), &mut clip);
        ed.handle_event(key(Key::F(2)), &mut clip);
        assert_eq!(ed.selection().editing_cell(), Some(p(0, 2)));
        assert_eq!(ed.grid().cell(0, 2), Some("c1"));
    }

    #[test]
    fn test_arrow_up_at_top_stays() {
        let (mut ed, mut clip) = editor();
        ed.handle_event(InputEvent::PointerDown(p(0, 1)), &mut clip);
        ed.handle_event(InputEvent::PointerUp, &mut clip);
        ed.handle_event(key(Key::Up), &mut clip);
        assert_eq!(ed.selection().current(), Some(p(0, 1)));
        assert_eq!(ed.selection().anchor(), Some(p(0, 1)));
    }

    #[test]
    fn test_arrows_ignored_while_editing() {
        let (mut ed, mut clip) = editor();
        ed.handle_event(InputEvent::DoubleClick(p(1, 1)), &mut clip);
        ed.handle_event(key(Key::Left), &mut clip);
        ed.handle_event(key(Key::Down), &mut clip);
        assert_eq!(ed.selection().current(), Some(p(1, 1)));
        assert_eq!(ed.edit_session().unwrap().cursor(), 1);
    }

    #[test]
    fn test_tab_while_editing_commits_and_moves() {
        let (mut ed, mut clip) = editor();
        ed.handle_event(InputEvent::DoubleClick(p(0, 2)), &mut clip);
        ed.handle_event(key(Key::Tab), &mut clip);
        assert!(!ed.selection().is_editing());
        assert_eq!(ed.selection().current(), Some(p(1, 0)));

        ed.handle_event(InputEvent::Key(KeyInput::shifted(Key::Tab)), &mut clip);
        assert_eq!(ed.selection().current(), Some(p(1, 0)));
    }

    #[test]
    fn test_copy_shortcut() {
        let (mut ed, mut clip) = editor();
        assert_eq!(ed.handle_event(ctrl('c'), &mut clip), EventOutcome::Ignored);

        ed.handle_event(InputEvent::PointerDown(p(1, 1)), &mut clip);
        ed.handle_event(InputEvent::PointerEnter(p(2, 2)), &mut clip);
        ed.handle_event(InputEvent::PointerUp, &mut clip);
        let outcome = ed.handle_event(ctrl('c'), &mut clip);
        assert_eq!(outcome, EventOutcome::Copied(CopyOutcome::Full));
        assert_eq!(clip.contents().unwrap().plain_text, "b2\tc2\nb3\tc3");
        // Ctrl+C must not start a typeahead edit.
        assert!(!ed.selection().is_editing());
    }

    #[test]
    fn test_copy_then_paste_elsewhere() {
        let (mut ed, mut clip) = editor();
        ed.handle_event(InputEvent::PointerDown(p(0, 0)), &mut clip);
        ed.handle_event(InputEvent::PointerEnter(p(0, 1)), &mut clip);
        ed.handle_event(InputEvent::PointerUp, &mut clip);
        ed.handle_event(ctrl('c'), &mut clip);

        ed.handle_event(InputEvent::PointerDown(p(2, 2)), &mut clip);
        ed.handle_event(InputEvent::PointerUp, &mut clip);
        let payload = clip.read().unwrap();
        let outcome = ed.handle_event(InputEvent::Paste(payload), &mut clip);
        assert!(matches!(outcome, EventOutcome::Pasted(report) if report.written == 2));
        assert_eq!(ed.grid().cell(2, 2), Some("a1"));
        assert_eq!(ed.grid().cell(2, 3), Some("b1"));
        assert_eq!(ed.selection().editing_cell(), Some(p(2, 2)));
    }

    #[test]
    fn test_paste_without_current_is_ignored() {
        let (mut ed, mut clip) = editor();
        let outcome = ed.handle_event(InputEvent::Paste(ClipboardPayload::text("x")), &mut clip);
        assert_eq!(outcome, EventOutcome::Ignored);
        assert_eq!(ed.grid().cell(0, 0), Some("a1"));
    }

    #[test]
    fn test_pointer_down_commits_other_edit() {
        let (mut ed, mut clip) = editor();
        ed.handle_event(InputEvent::DoubleClick(p(0, 0)), &mut clip);
        ed.handle_event(key(Key::Char('+')), &mut clip);
        ed.handle_event(InputEvent::PointerDown(p(1, 1)), &mut clip);
        assert!(!ed.selection().is_editing());
        assert_eq!(ed.grid().cell(0, 0), Some("a1+"));
        assert_eq!(ed.selection().current(), Some(p(1, 1)));
    }

    #[test]
    fn test_pointer_down_out_of_bounds() {
        let (mut ed, mut clip) = editor();
        let outcome = ed.handle_event(InputEvent::PointerDown(p(10, 0)), &mut clip);
        assert_eq!(outcome, EventOutcome::Ignored);
        assert!(ed.selection().current().is_none());
    }

    #[test]
    fn test_blur_commits() {
        let (mut ed, mut clip) = editor();
        ed.handle_event(InputEvent::DoubleClick(p(0, 0)), &mut clip);
        ed.handle_event(key(Key::Backspace), &mut clip);
        assert_eq!(ed.handle_event(InputEvent::Blur, &mut clip), EventOutcome::Handled);
        assert_eq!(ed.grid().cell(0, 0), Some("a"));
        assert!(!ed.selection().is_editing());
    }

    #[test]
    fn test_delete_clears_selection() {
        let (mut ed, mut clip) = editor();
        ed.handle_event(InputEvent::PointerDown(p(0, 0)), &mut clip);
        ed.handle_event(InputEvent::PointerEnter(p(1, 0)), &mut clip);
        ed.handle_event(InputEvent::PointerUp, &mut clip);
        ed.handle_event(key(Key::Delete), &mut clip);
        assert_eq!(ed.grid().cell(0, 0), Some(""));
        assert_eq!(ed.grid().cell(1, 0), Some(""));
        assert_eq!(ed.grid().cell(0, 1), Some("b1"));
    }

    #[test]
    fn test_escape_when_not_editing_is_noop() {
        let (mut ed, mut clip) = editor();
        ed.handle_event(InputEvent::PointerDown(p(0, 0)), &mut clip);
        ed.handle_event(InputEvent::PointerUp, &mut clip);
        assert_eq!(ed.handle_event(key(Key::Escape), &mut clip), EventOutcome::Ignored);
        assert_eq!(ed.selection().current(), Some(p(0, 0)));
    }

    #[test]
    fn test_drop_and_resize_events() {
        let (mut ed, mut clip) = editor();
        let intent = ReorderIntent::new(Axis::Row, 2, 0);
        assert_eq!(ed.handle_event(InputEvent::Drop(intent), &mut clip), EventOutcome::Handled);
        assert_eq!(ed.grid().cell(0, 0), Some("a3"));

        let column = ed.grid().columns()[0].id.clone();
        let outcome = ed.handle_event(InputEvent::Resize { column, delta: 25 }, &mut clip);
        assert_eq!(outcome, EventOutcome::Handled);
        assert_eq!(ed.grid().columns()[0].width, 175);

        let outcome = ed.handle_event(
            InputEvent::Resize {
                column: ColumnId::new("missing"),
                delta: 5,
            },
            &mut clip,
        );
        assert_eq!(outcome, EventOutcome::Ignored);
    }
}
