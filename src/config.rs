use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::keyboard::keymap::{KeyBinding, Keymap};

pub const MIN_POOL_SIZE: usize = 2;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    #[serde(default = "default_words_path")]
    pub words_path: PathBuf,
    #[serde(default = "default_strokes_path")]
    pub strokes_path: PathBuf,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_show_stroke_hint")]
    pub show_stroke_hint: bool,
    #[serde(default = "default_toggle_hint_key")]
    pub toggle_hint_key: String,
    #[serde(default = "default_quit_key")]
    pub quit_key: String,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_pool_size() -> usize {
    4
}
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stenos")
}
fn default_words_path() -> PathBuf {
    default_data_dir().join("word-frequencies.txt")
}
fn default_strokes_path() -> PathBuf {
    default_data_dir().join("canonical_strokes.txt")
}
fn default_show_stroke_hint() -> bool {
    true
}
fn default_toggle_hint_key() -> String {
    "ctrl-s".to_string()
}
fn default_quit_key() -> String {
    "esc".to_string()
}
fn default_theme() -> String {
    "default".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
            words_path: default_words_path(),
            strokes_path: default_strokes_path(),
            data_dir: default_data_dir(),
            show_stroke_hint: default_show_stroke_hint(),
            toggle_hint_key: default_toggle_hint_key(),
            quit_key: default_quit_key(),
            theme: default_theme(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(path)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stenos")
            .join("config.toml")
    }

    /// Clamp values that would make the drill unusable and reset unparsable
    /// key bindings to their defaults.
    pub fn validate(&mut self) {
        self.pool_size = self.pool_size.max(MIN_POOL_SIZE);
        if KeyBinding::parse(&self.toggle_hint_key).is_none() {
            self.toggle_hint_key = default_toggle_hint_key();
        }
        if KeyBinding::parse(&self.quit_key).is_none() {
            self.quit_key = default_quit_key();
        }
    }

    pub fn keymap(&self) -> Keymap {
        match (
            KeyBinding::parse(&self.toggle_hint_key),
            KeyBinding::parse(&self.quit_key),
        ) {
            (Some(toggle), Some(quit)) => Keymap::new(toggle, quit),
            _ => Keymap::default(),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("stenos.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::keyboard::keymap::KeyAction;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.pool_size, 4);
        assert!(config.show_stroke_hint);
        assert_eq!(config.toggle_hint_key, "ctrl-s");
        assert!(config.words_path.ends_with("word-frequencies.txt"));
        assert!(config.strokes_path.ends_with("canonical_strokes.txt"));
    }

    #[test]
    fn test_config_partial_file() {
        let toml_str = r#"
pool_size = 12
show_stroke_hint = false
words_path = "/tmp/words.txt"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pool_size, 12);
        assert!(!config.show_stroke_hint);
        assert_eq!(config.words_path, PathBuf::from("/tmp/words.txt"));
        assert_eq!(config.quit_key, "esc");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.pool_size, deserialized.pool_size);
        assert_eq!(config.words_path, deserialized.words_path);
        assert_eq!(config.data_dir, deserialized.data_dir);
    }

    #[test]
    fn test_validate_clamps_pool_and_resets_keys() {
        let mut config = Config::default();
        config.pool_size = 0;
        config.toggle_hint_key = "meta-banana".to_string();
        config.validate();
        assert_eq!(config.pool_size, MIN_POOL_SIZE);
        assert_eq!(config.toggle_hint_key, "ctrl-s");
    }

    #[test]
    fn test_log_path_lives_in_data_dir() {
        let config = Config {
            data_dir: PathBuf::from("/tmp/stenos-data"),
            ..Config::default()
        };
        assert_eq!(config.log_path(), PathBuf::from("/tmp/stenos-data/stenos.log"));
    }

    #[test]
    fn test_keymap_uses_configured_toggle() {
        let mut config = Config::default();
        config.toggle_hint_key = "f2".to_string();
        let keymap = config.keymap();
        assert_eq!(
            keymap.resolve(&KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE)),
            Some(KeyAction::ToggleStrokeHint)
        );
    }
}
