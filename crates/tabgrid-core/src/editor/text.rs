use super::input::{Key, KeyInput};

/// A single line of text with a caret.
///
/// `cursor` is a byte offset into the text and always sits on a char boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    /// Buffer holding `text` with the caret at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        TextBuffer {
            cursor: text.len(),
            text,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the text and put the caret at the end.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Apply a caret or text key. Returns true if the text changed.
    pub fn apply_key(&mut self, key: &KeyInput) -> bool {
        match key.key {
            Key::Left => {
                self.cursor = prev_boundary(&self.text, self.cursor);
                false
            }
            Key::Right => {
                self.cursor = next_boundary(&self.text, self.cursor);
                false
            }
            Key::Home => {
                self.cursor = 0;
                false
            }
            Key::End => {
                self.cursor = self.text.len();
                false
            }
            Key::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let start = prev_boundary(&self.text, self.cursor);
                self.text.drain(start..self.cursor);
                self.cursor = start;
                true
            }
            Key::Delete => {
                if self.cursor >= self.text.len() {
                    return false;
                }
                let end = next_boundary(&self.text, self.cursor);
                self.text.drain(self.cursor..end);
                true
            }
            Key::Char(c) if key.modifiers.is_text() => {
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            _ => false,
        }
    }
}

fn prev_boundary(s: &str, pos: usize) -> usize {
    if pos == 0 {
        return 0;
    }
    let mut p = pos - 1;
    while p > 0 && !s.is_char_boundary(p) {
        p -= 1;
    }
    p
}

fn next_boundary(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    let mut p = pos + 1;
    while p < s.len() && !s.is_char_boundary(p) {
        p += 1;
    }
    p
}
