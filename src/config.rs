//! `settings.toml` loading.
//!
//! Problems never abort startup: they are collected as warnings and the
//! affected part falls back to defaults.

use crate::tui::keymap::{Keymap, KeymapFile, build_keymap};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tabgrid_core::Settings;
use tabgrid_core::settings::{ClipboardSettings, GridSettings, NavigationSettings};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    grid: GridSettings,
    clipboard: ClipboardSettings,
    navigation: NavigationSettings,
    keymap: Option<KeymapFile>,
}

/// Everything read from the config file.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub settings: Settings,
    pub keymap: Keymap,
}

pub fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "tabgrid")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("settings.toml");
    Some(path)
}

/// Load the config from `explicit` or the user config dir.
///
/// A missing file is only reported when it was asked for explicitly.
pub fn load_config(explicit: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let path = explicit.map(Path::to_path_buf).or_else(user_config_path);

    let Some(path) = path else {
        return (Config::default(), warnings);
    };
    if !path.exists() {
        if explicit.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    let file = match read_config_file(&path) {
        Ok(file) => file,
        Err(warning) => {
            warnings.push(warning);
            return (Config::default(), warnings);
        }
    };

    let settings = Settings {
        grid: file.grid,
        clipboard: file.clipboard,
        navigation: file.navigation,
    };
    if settings.grid.default_column_width < settings.grid.min_column_width {
        warnings.push(format!(
            "default_column_width {} is below min_column_width {}; using the minimum",
            settings.grid.default_column_width, settings.grid.min_column_width
        ));
    }

    let keymap = match file.keymap.as_ref() {
        Some(raw) => {
            let (keymap, errors) = build_keymap(raw);
            warnings.extend(errors);
            keymap
        }
        None => Keymap::Standard,
    };

    (Config { settings, keymap }, warnings)
}

fn read_config_file(path: &Path) -> Result<ConfigFile, String> {
    let meta = std::fs::metadata(path)
        .map_err(|err| format!("Failed to read metadata for {}: {}", path.display(), err))?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(format!(
            "Refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            meta.len(),
            MAX_CONFIG_FILE_BYTES
        ));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;
    toml::from_str::<ConfigFile>(&content)
        .map_err(|err| format!("Failed to parse {}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabgrid_core::PastePolicy;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "tabgrid_config_{}_{}.toml",
            std::process::id(),
            name
        ));
        std::fs::write(&path, content).expect("write temp config");
        path
    }

    #[test]
    fn load_config_reads_all_sections() {
        let path = write_temp(
            "full",
            r#"
[grid]
paste_policy = "clip"
default_column_width = 120

[clipboard]
copy_header = true
skip_html_header = true

[navigation]
shift_tab_wraps = true
enter_moves_down = true

[keymap.grid]
"C-o" = "add_row"
"#,
        );

        let (config, warnings) = load_config(Some(&path));
        let _ = std::fs::remove_file(&path);

        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.settings.grid.paste_policy, PastePolicy::Clip);
        assert_eq!(config.settings.grid.default_column_width, 120);
        assert_eq!(config.settings.grid.min_column_width, 30);
        assert!(config.settings.clipboard.copy_header);
        assert!(config.settings.clipboard.skip_html_header);
        assert!(config.settings.navigation.shift_tab_wraps);
        assert!(config.settings.navigation.enter_moves_down);
        assert!(matches!(config.keymap, Keymap::Custom(_)));
    }

    #[test]
    fn load_config_partial_file_uses_defaults() {
        let path = write_temp("partial", "[clipboard]\ncopy_header = true\n");
        let (config, warnings) = load_config(Some(&path));
        let _ = std::fs::remove_file(&path);

        assert!(warnings.is_empty());
        assert_eq!(config.settings.grid, GridSettings::default());
        assert!(!config.settings.navigation.shift_tab_wraps);
        assert_eq!(config.keymap, Keymap::Standard);
    }

    #[test]
    fn load_config_rejects_unknown_fields() {
        let path = write_temp("unknown", "[grid]\nrainbow = true\n");
        let (config, warnings) = load_config(Some(&path));
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.settings, Settings::default());
        assert!(warnings.iter().any(|w| w.contains("Failed to parse")));
    }

    #[test]
    fn load_config_rejects_bad_paste_policy() {
        let path = write_temp("policy", "[grid]\npaste_policy = \"stretch\"\n");
        let (config, warnings) = load_config(Some(&path));
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.settings.grid.paste_policy, PastePolicy::Grow);
        assert!(warnings.iter().any(|w| w.contains("Failed to parse")));
    }

    #[test]
    fn load_config_rejects_oversized_file() {
        let oversized = "#".repeat(MAX_CONFIG_FILE_BYTES as usize + 1);
        let path = write_temp("large", &oversized);
        let (_, warnings) = load_config(Some(&path));
        let _ = std::fs::remove_file(&path);

        assert!(
            warnings
                .iter()
                .any(|w| w.contains("file too large") && w.contains("Refusing to read"))
        );
    }

    #[test]
    fn load_config_warns_for_missing_explicit_file() {
        let path = std::env::temp_dir().join("tabgrid_config_does_not_exist.toml");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config.settings, Settings::default());
        assert!(warnings.iter().any(|w| w.contains("not found")));
    }

    #[test]
    fn load_config_keeps_settings_when_keymap_is_invalid() {
        let path = write_temp(
            "badkeys",
            "[navigation]\nenter_moves_down = true\n\n[keymap.grid]\n\"C-NotAKey\" = \"save\"\n",
        );
        let (config, warnings) = load_config(Some(&path));
        let _ = std::fs::remove_file(&path);

        assert!(config.settings.navigation.enter_moves_down);
        assert_eq!(config.keymap, Keymap::Standard);
        assert!(warnings.iter().any(|w| w.contains("Invalid key")));
    }
}
