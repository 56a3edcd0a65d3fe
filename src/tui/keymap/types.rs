use crate::tui::app::Mode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Available keybinding schemes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Keymap {
    /// Built-in bindings.
    #[default]
    Standard,
    /// Bindings from `[keymap]` in settings.toml, layered over the built-in ones.
    Custom(CustomKeymap),
}

impl Keymap {
    pub fn name(&self) -> &str {
        match self {
            Keymap::Standard => "standard",
            Keymap::Custom(_) => "custom",
        }
    }

    pub fn status_hint(&self) -> String {
        match self {
            Keymap::Standard => {
                "Enter/F2:edit  C-c:copy  C-v:paste  C-n/C-d:row  C-t/C-x:col  C-r:rename  M-arrows:move  M-=/M--:width  C-s:save  C-q:quit".to_string()
            }
            Keymap::Custom(custom) => match custom.description.as_deref() {
                Some(description) => format!("custom keymap: {}", description),
                None => "custom keymap".to_string(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomKeymap {
    pub description: Option<String>,
    pub bindings: KeymapBindings,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeymapBindings {
    pub grid: Vec<Binding>,
    pub edit: Vec<Binding>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub combo: KeyCombo,
    pub action: Action,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    fn matches(&self, key: KeyEvent) -> bool {
        if self.code != key.code {
            return false;
        }
        if self.modifiers.is_empty() {
            return true;
        }
        key.modifiers.contains(self.modifiers)
    }

    pub fn display(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("C");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("M");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("S");
        }
        let key = match self.code {
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            _ => "Unknown".to_string(),
        };
        if parts.is_empty() {
            key
        } else {
            format!("{}-{}", parts.join("-"), key)
        }
    }
}

impl CustomKeymap {
    /// Modified combos win over bare ones so `C-s` is not shadowed by `s`.
    pub(crate) fn translate(&self, mode: Mode, key: KeyEvent) -> Option<Action> {
        let bindings = self.bindings.for_mode(mode)?;
        bindings
            .iter()
            .filter(|binding| !binding.combo.modifiers.is_empty())
            .find(|binding| binding.combo.matches(key))
            .or_else(|| {
                bindings
                    .iter()
                    .filter(|binding| binding.combo.modifiers.is_empty())
                    .find(|binding| binding.combo.matches(key))
            })
            .map(|binding| binding.action.clone())
    }
}

impl KeymapBindings {
    fn for_mode(&self, mode: Mode) -> Option<&Vec<Binding>> {
        match mode {
            Mode::Grid => Some(&self.grid),
            Mode::Edit => Some(&self.edit),
            Mode::Rename => None,
        }
    }
}

/// Host-level actions triggered by key presses.
///
/// Keys without a binding are handed to the editor core (navigation, typing,
/// in-cell editing). Actions cover what only the host can do: files, the system
/// clipboard, and grid structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Exit the application.
    Quit,
    /// Save to the current file.
    Save,
    /// Copy the selection to the system clipboard.
    Copy,
    /// Paste the system clipboard at the current cell.
    Paste,
    AddRow,
    DeleteRow,
    AddColumn,
    DeleteColumn,
    /// Open the rename prompt for the current column.
    RenameColumn,
    /// Move the current row by -1 (up) or +1 (down).
    MoveRow(i32),
    /// Move the current column by -1 (left) or +1 (right).
    MoveColumn(i32),
    /// Change the current column's width by this many pixels.
    ResizeColumn(i32),
}
