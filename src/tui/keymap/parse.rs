use super::{Action, Binding, CustomKeymap, KeyCombo, Keymap, KeymapBindings, RESIZE_STEP};
use crossterm::event::{KeyCode, KeyModifiers};
use serde::Deserialize;
use std::collections::HashMap;

const MAX_BINDINGS_PER_MODE: usize = 512;

/// The `[keymap]` table of settings.toml.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeymapFile {
    pub description: Option<String>,
    pub grid: HashMap<String, String>,
    pub edit: HashMap<String, String>,
}

/// Build a keymap from its config table.
///
/// Any invalid entry rejects the whole custom keymap: the built-in one is used
/// and the problems are returned as warnings.
pub fn build_keymap(raw: &KeymapFile) -> (Keymap, Vec<String>) {
    if raw.grid.is_empty() && raw.edit.is_empty() {
        return (Keymap::Standard, Vec::new());
    }

    let mut errors: Vec<String> = Vec::new();
    let grid = parse_mode_bindings("grid", &raw.grid, &mut errors);
    let edit = parse_mode_bindings("edit", &raw.edit, &mut errors);

    if errors.is_empty() {
        let custom = CustomKeymap {
            description: raw.description.clone(),
            bindings: KeymapBindings { grid, edit },
        };
        (Keymap::Custom(custom), errors)
    } else {
        errors.push("Falling back to the built-in keymap".to_string());
        (Keymap::Standard, errors)
    }
}

fn parse_mode_bindings(
    mode: &str,
    raw: &HashMap<String, String>,
    errors: &mut Vec<String>,
) -> Vec<Binding> {
    let mut bindings: Vec<Binding> = Vec::new();
    if raw.len() > MAX_BINDINGS_PER_MODE {
        errors.push(format!(
            "Too many {} bindings: {} (max {})",
            mode,
            raw.len(),
            MAX_BINDINGS_PER_MODE
        ));
        return bindings;
    }
    for (combo_str, action_str) in raw {
        match (parse_key_combo(combo_str), action_from_str(action_str)) {
            (Ok(combo), Some(action)) => {
                if bindings.iter().any(|binding| binding.combo == combo) {
                    errors.push(format!(
                        "Duplicate key '{}' in {} bindings",
                        combo.display(),
                        mode
                    ));
                    continue;
                }
                bindings.push(Binding { combo, action });
            }
            (Ok(_), None) => errors.push(format!(
                "Invalid action '{}' in {} bindings",
                action_str, mode
            )),
            (Err(err), _) => errors.push(format!(
                "Invalid key '{}' in {} bindings: {}",
                combo_str, mode, err
            )),
        }
    }
    bindings
}

fn parse_key_combo(input: &str) -> Result<KeyCombo, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty key".to_string());
    }
    if let Some(ch) = parse_single_char(trimmed) {
        return Ok(KeyCombo {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::empty(),
        });
    }

    let (mods, key_part) = if !trimmed.contains('-') {
        (KeyModifiers::empty(), trimmed)
    } else if let Some(mod_str) = trimmed.strip_suffix('-') {
        let mod_str = mod_str.trim_end_matches('-');
        if mod_str.is_empty() {
            return Err("missing modifier before '-'".to_string());
        }
        (parse_modifiers(mod_str)?, "-")
    } else {
        let mut split = trimmed.rsplitn(2, '-');
        let key_part = split.next().ok_or_else(|| "empty key".to_string())?;
        let mod_str = split.next().unwrap_or_default();
        (parse_modifiers(mod_str)?, key_part)
    };

    Ok(KeyCombo {
        code: parse_key_code(key_part)?,
        modifiers: mods,
    })
}

fn parse_modifiers(input: &str) -> Result<KeyModifiers, String> {
    let mut modifiers = KeyModifiers::empty();
    for part in input.split('-') {
        let raw = part.trim();
        if raw.is_empty() {
            return Err("empty modifier segment".to_string());
        }
        let flag = match raw.to_ascii_lowercase().as_str() {
            "c" | "ctrl" | "control" => KeyModifiers::CONTROL,
            "m" | "alt" | "meta" => KeyModifiers::ALT,
            "s" | "shift" => KeyModifiers::SHIFT,
            _ => return Err(format!("unknown modifier '{}'", part)),
        };
        if modifiers.contains(flag) {
            return Err(format!("duplicate modifier '{}'", raw));
        }
        modifiers.insert(flag);
    }
    Ok(modifiers)
}

fn parse_key_code(input: &str) -> Result<KeyCode, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty key".to_string());
    }
    if let Some(ch) = parse_single_char(trimmed) {
        return Ok(KeyCode::Char(ch));
    }
    let norm = trimmed.to_ascii_lowercase();
    if let Some(n) = norm.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }
    match norm.as_str() {
        "enter" => Ok(KeyCode::Enter),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "backspace" => Ok(KeyCode::Backspace),
        "delete" => Ok(KeyCode::Delete),
        "tab" => Ok(KeyCode::Tab),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" => Ok(KeyCode::PageUp),
        "pagedown" => Ok(KeyCode::PageDown),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "space" | "spc" => Ok(KeyCode::Char(' ')),
        "dash" | "minus" => Ok(KeyCode::Char('-')),
        "plus" => Ok(KeyCode::Char('+')),
        "equal" => Ok(KeyCode::Char('=')),
        "comma" => Ok(KeyCode::Char(',')),
        "period" | "dot" => Ok(KeyCode::Char('.')),
        _ => Err(format!("unknown key '{}'", input)),
    }
}

fn parse_single_char(input: &str) -> Option<char> {
    let mut chars = input.chars();
    let ch = chars.next()?;
    if chars.next().is_none() {
        Some(ch)
    } else {
        None
    }
}

fn action_from_str(input: &str) -> Option<Action> {
    match input.trim().to_ascii_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "save" => Some(Action::Save),
        "copy" => Some(Action::Copy),
        "paste" => Some(Action::Paste),
        "add_row" => Some(Action::AddRow),
        "delete_row" => Some(Action::DeleteRow),
        "add_column" => Some(Action::AddColumn),
        "delete_column" => Some(Action::DeleteColumn),
        "rename_column" => Some(Action::RenameColumn),
        "move_row_up" => Some(Action::MoveRow(-1)),
        "move_row_down" => Some(Action::MoveRow(1)),
        "move_column_left" => Some(Action::MoveColumn(-1)),
        "move_column_right" => Some(Action::MoveColumn(1)),
        "widen_column" => Some(Action::ResizeColumn(RESIZE_STEP)),
        "narrow_column" => Some(Action::ResizeColumn(-RESIZE_STEP)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keymap_file(grid: &[(&str, &str)]) -> KeymapFile {
        KeymapFile {
            description: Some("test".to_string()),
            grid: grid
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            edit: HashMap::new(),
        }
    }

    #[test]
    fn parse_key_combo_ctrl() {
        let combo = parse_key_combo("C-s").expect("combo");
        assert_eq!(combo.code, KeyCode::Char('s'));
        assert!(combo.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn parse_key_combo_alt_arrow() {
        let combo = parse_key_combo("M-Up").expect("combo");
        assert_eq!(combo.code, KeyCode::Up);
        assert!(combo.modifiers.contains(KeyModifiers::ALT));
    }

    #[test]
    fn parse_key_combo_function_key() {
        let combo = parse_key_combo("F5").expect("combo");
        assert_eq!(combo.code, KeyCode::F(5));
        assert!(parse_key_combo("F13").is_err());
    }

    #[test]
    fn parse_key_combo_ctrl_dash() {
        let combo = parse_key_combo("C--").expect("combo");
        assert_eq!(combo.code, KeyCode::Char('-'));
        assert!(combo.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn parse_key_combo_unicode_char() {
        let combo = parse_key_combo("é").expect("combo");
        assert_eq!(combo.code, KeyCode::Char('é'));
        assert!(combo.modifiers.is_empty());
    }

    #[test]
    fn parse_key_combo_rejects_bad_input() {
        assert!(parse_key_combo("C-NotAKey").unwrap_err().contains("unknown key"));
        assert!(parse_key_combo("--").unwrap_err().contains("missing modifier"));
        assert!(parse_key_combo("C-C-s").unwrap_err().contains("duplicate modifier"));
        assert!(parse_key_combo("Hyper-s").unwrap_err().contains("unknown modifier"));
    }

    #[test]
    fn action_names() {
        assert_eq!(action_from_str("move_row_up"), Some(Action::MoveRow(-1)));
        assert_eq!(
            action_from_str(" Widen_Column "),
            Some(Action::ResizeColumn(RESIZE_STEP))
        );
        assert_eq!(action_from_str("undo"), None);
    }

    #[test]
    fn build_keymap_custom() {
        let (keymap, warnings) = build_keymap(&keymap_file(&[("C-o", "add_row"), ("F5", "save")]));
        assert!(warnings.is_empty());
        let Keymap::Custom(custom) = keymap else {
            panic!("expected custom keymap");
        };
        assert_eq!(custom.bindings.grid.len(), 2);
        assert_eq!(custom.description.as_deref(), Some("test"));
    }

    #[test]
    fn build_keymap_empty_is_standard() {
        let (keymap, warnings) = build_keymap(&KeymapFile::default());
        assert_eq!(keymap, Keymap::Standard);
        assert!(warnings.is_empty());
    }

    #[test]
    fn build_keymap_rejects_duplicates() {
        let (keymap, warnings) = build_keymap(&keymap_file(&[("C-s", "save"), ("ctrl-s", "quit")]));
        assert_eq!(keymap, Keymap::Standard);
        assert!(
            warnings
                .iter()
                .any(|w| w.contains("Duplicate key") && w.contains("grid bindings"))
        );
    }

    #[test]
    fn build_keymap_rejects_unknown_action() {
        let (keymap, warnings) = build_keymap(&keymap_file(&[("C-u", "undo")]));
        assert_eq!(keymap, Keymap::Standard);
        assert!(warnings.iter().any(|w| w.contains("Invalid action 'undo'")));
    }

    #[test]
    fn build_keymap_rejects_excessive_bindings() {
        let many: Vec<(String, String)> = (0..=MAX_BINDINGS_PER_MODE)
            .map(|i| (format!("C-{}", i), "save".to_string()))
            .collect();
        let raw = KeymapFile {
            description: None,
            grid: many.into_iter().collect(),
            edit: HashMap::new(),
        };
        let (keymap, warnings) = build_keymap(&raw);
        assert_eq!(keymap, Keymap::Standard);
        assert!(warnings.iter().any(|w| w.contains("Too many grid bindings")));
    }
}
