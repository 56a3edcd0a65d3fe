use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::prelude::*;
use std::io;
use std::time::{Duration, Instant};
use tabgrid_core::reorder::{Axis, Edge, ReorderIntent};
use tabgrid_core::{InputEvent, Key, KeyInput, Modifiers};

use super::actions::{ApplyResult, apply_action, handle_rename_key};
use super::app::{App, HeaderDrag, Mode};
use super::keymap::translate;
use super::ui::{self, Hit};

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);
const SCROLL_STEP: i32 = 3;

/// Convert a terminal key press into the editor's key model.
pub(super) fn key_input(key: KeyEvent) -> Option<KeyInput> {
    let mut modifiers = Modifiers {
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
        meta: key.modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    };
    let key = match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => {
            modifiers.shift = true;
            Key::Tab
        }
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    Some(KeyInput::with_modifiers(key, modifiers))
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> ApplyResult {
    app.status_message.clear();

    if app.mode() == Mode::Rename {
        handle_rename_key(app, key);
        return ApplyResult::Continue;
    }

    if let Some(action) = translate(&app.keymap, app.mode(), key) {
        return apply_action(app, action);
    }

    app.confirm_quit = false;
    if let Some(input) = key_input(key) {
        app.dispatch(InputEvent::Key(input));
    }
    ApplyResult::Continue
}

fn handle_mouse_event(app: &mut App, terminal_area: Rect, mouse: MouseEvent) {
    if app.mode() == Mode::Rename {
        return;
    }

    let [_formula_area, grid_area, _status_area] = ui::split_main_chunks(terminal_area);
    let hit = ui::hit_test(app, grid_area, mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match hit {
            Some(Hit::Cell(pos)) => {
                let now = Instant::now();
                let double = app
                    .last_click
                    .is_some_and(|(last, at)| last == pos && now - at <= DOUBLE_CLICK_WINDOW);
                if double {
                    app.last_click = None;
                    app.dispatch(InputEvent::DoubleClick(pos));
                } else {
                    app.last_click = Some((pos, now));
                    app.dispatch(InputEvent::PointerDown(pos));
                }
            }
            Some(Hit::ColumnHeader { col, .. }) => {
                app.header_drag = Some(HeaderDrag {
                    axis: Axis::Column,
                    source: col,
                });
            }
            Some(Hit::RowHeader(row)) => {
                app.header_drag = Some(HeaderDrag {
                    axis: Axis::Row,
                    source: row,
                });
            }
            None => {}
        },
        MouseEventKind::Drag(MouseButton::Left) => {
            if app.header_drag.is_none() {
                if let Some(Hit::Cell(pos)) = hit {
                    app.dispatch(InputEvent::PointerEnter(pos));
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => match app.header_drag.take() {
            Some(drag) => {
                if let Some(intent) = drop_intent(drag, hit) {
                    app.dispatch(InputEvent::Drop(intent));
                }
            }
            None => {
                app.dispatch(InputEvent::PointerUp);
            }
        },
        MouseEventKind::ScrollDown => app.scroll_rows(SCROLL_STEP),
        MouseEventKind::ScrollUp => app.scroll_rows(-SCROLL_STEP),
        _ => {}
    }
}

/// Where a released header drag lands.
fn drop_intent(drag: HeaderDrag, hit: Option<Hit>) -> Option<ReorderIntent> {
    match (drag.axis, hit?) {
        (Axis::Column, Hit::ColumnHeader { col, trailing }) => {
            let edge = if trailing { Edge::Right } else { Edge::Left };
            Some(ReorderIntent::new(Axis::Column, drag.source, col).with_edge(edge))
        }
        (Axis::Column, Hit::Cell(pos)) => {
            Some(ReorderIntent::new(Axis::Column, drag.source, pos.c))
        }
        (Axis::Row, Hit::RowHeader(row)) => Some(ReorderIntent::new(Axis::Row, drag.source, row)),
        (Axis::Row, Hit::Cell(pos)) => Some(ReorderIntent::new(Axis::Row, drag.source, pos.r)),
        _ => None,
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        match event::read()? {
            Event::Key(key) => {
                // Only process key press events (Windows reports Press + Release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(app, key) == ApplyResult::Quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let terminal_area = Rect::new(0, 0, size.width, size.height);
                handle_mouse_event(app, terminal_area, mouse);
            }
            Event::Paste(text) => {
                if app.mode() != Mode::Rename {
                    app.paste_payload(text, None);
                }
            }
            Event::FocusLost => {
                app.dispatch(InputEvent::Blur);
            }
            _ => {}
        }
    }
}
