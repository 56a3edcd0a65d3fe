use super::input::KeyInput;
use super::text::TextBuffer;
use crate::grid::Position;

/// Text being composed for one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSession {
    position: Position,
    original: String,
    buffer: TextBuffer,
}

impl EditSession {
    pub(crate) fn new(position: Position, value: &str) -> Self {
        EditSession {
            position,
            original: value.to_string(),
            buffer: TextBuffer::new(value),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Value of the cell when editing began.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    /// Byte offset of the caret in [`text`](Self::text).
    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    pub(crate) fn replace(&mut self, text: String) {
        self.buffer.set(text);
    }

    pub(crate) fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    /// Apply a caret or text key. Returns true if the buffer text changed.
    pub(crate) fn apply_key(&mut self, key: &KeyInput) -> bool {
        self.buffer.apply_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Key;
    use crate::editor::Modifiers;

    fn key(k: Key) -> KeyInput {
        KeyInput::new(k)
    }

    #[test]
    fn test_insert_and_move() {
        let mut s = EditSession::new(Position::new(0, 0), "ac");
        assert!(!s.apply_key(&key(Key::Left)));
        assert!(s.apply_key(&key(Key::Char('b'))));
        assert_eq!(s.text(), "abc");
        assert_eq!(s.cursor(), 2);
        s.apply_key(&key(Key::Home));
        s.apply_key(&key(Key::Delete));
        assert_eq!(s.text(), "bc");
        s.apply_key(&key(Key::End));
        s.apply_key(&key(Key::Backspace));
        assert_eq!(s.text(), "b");
        assert_eq!(s.original(), "ac");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut s = EditSession::new(Position::new(0, 0), "aé😀");
        s.apply_key(&key(Key::Backspace));
        assert_eq!(s.text(), "aé");
        s.apply_key(&key(Key::Left));
        assert_eq!(s.cursor(), 1);
        s.apply_key(&key(Key::Delete));
        assert_eq!(s.text(), "a");
        s.apply_key(&key(Key::Right));
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn test_control_chars_are_not_inserted() {
        let mut s = EditSession::new(Position::new(0, 0), "");
        let ctrl = KeyInput::with_modifiers(
            Key::Char('x'),
            Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        );
        assert!(!s.apply_key(&ctrl));
        let shifted = KeyInput::with_modifiers(
            Key::Char('X'),
            Modifiers {
                shift: true,
                ..Modifiers::default()
            },
        );
        assert!(s.apply_key(&shifted));
        assert_eq!(s.text(), "X");
    }

    #[test]
    fn test_edges_do_nothing() {
        let mut s = EditSession::new(Position::new(0, 0), "");
        assert!(!s.apply_key(&key(Key::Backspace)));
        assert!(!s.apply_key(&key(Key::Delete)));
        s.apply_key(&key(Key::Left));
        assert_eq!(s.cursor(), 0);
    }
}
