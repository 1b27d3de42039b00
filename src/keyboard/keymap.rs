use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

/// Logical input understood by the drill session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Char(char),
    Backspace,
    ToggleStrokeHint,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn ctrl(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    /// Parse bindings like `ctrl-s`, `esc`, `backspace`, `f2` or `~`.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim().to_ascii_lowercase();
        if let Some(rest) = spec.strip_prefix("ctrl-").or_else(|| spec.strip_prefix("c-")) {
            let mut chars = rest.chars();
            return match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(Self::ctrl(ch)),
                _ => None,
            };
        }
        let code = match spec.as_str() {
            "esc" | "escape" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            "tab" => KeyCode::Tab,
            "enter" => KeyCode::Enter,
            s if s.len() > 1 && s.starts_with('f') => KeyCode::F(s[1..].parse().ok()?),
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => KeyCode::Char(ch),
                    _ => return None,
                }
            }
        };
        Some(Self::new(code, KeyModifiers::NONE))
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        if self.code != key.code {
            return false;
        }
        // Shift is implied by the character itself.
        let relevant = key.modifiers & !KeyModifiers::SHIFT;
        relevant == self.modifiers
    }
}

/// Resolves terminal key events into `KeyAction`s. Built once at startup.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: Vec<(KeyBinding, KeyAction)>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new(KeyBinding::ctrl('s'), KeyBinding::new(KeyCode::Esc, KeyModifiers::NONE))
    }
}

impl Keymap {
    pub fn new(toggle_hint: KeyBinding, quit: KeyBinding) -> Self {
        Self {
            bindings: vec![
                (KeyBinding::ctrl('c'), KeyAction::Quit),
                (quit, KeyAction::Quit),
                (toggle_hint, KeyAction::ToggleStrokeHint),
                (
                    KeyBinding::new(KeyCode::Backspace, KeyModifiers::NONE),
                    KeyAction::Backspace,
                ),
                // Some terminals deliver backspace as ^H.
                (KeyBinding::ctrl('h'), KeyAction::Backspace),
            ],
        }
    }

    /// Returns `None` for releases, repeats and keys with no meaning here.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if let Some((_, action)) = self.bindings.iter().find(|(b, _)| b.matches(key)) {
            return Some(*action);
        }
        match key.code {
            KeyCode::Char(ch)
                if !ch.is_control()
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(KeyAction::Char(ch))
            }
            _ => {
                trace!(code = ?key.code, modifiers = ?key.modifiers, "ignored key");
                None
            }
        }
    }
}
