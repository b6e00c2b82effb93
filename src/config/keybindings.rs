//! Keyboard bindings configuration.
//!
//! Two tables: one for browsing the popup, one consulted while the filter
//! prompt is open. Keys not bound in the prompt table are prompt edits.

use crate::config::ConfigError;
use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    normal: HashMap<KeyEvent, KeyAction>,
    prompt: HashMap<KeyEvent, KeyAction>,
}

/// Strip event kind and state so terminal events match table keys.
fn normalize(key: KeyEvent) -> KeyEvent {
    KeyEvent::new(key.code, key.modifiers)
}

impl KeyBindings {
    /// Action for a key while browsing the popup.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.normal.get(&normalize(key)).copied()
    }

    /// Action for a key while the filter prompt is open.
    pub fn get_prompt(&self, key: KeyEvent) -> Option<KeyAction> {
        self.prompt.get(&normalize(key)).copied()
    }

    /// Bind `key` to `action` in the table the action belongs to.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        let table = if action.is_prompt_action() {
            &mut self.prompt
        } else {
            &mut self.normal
        };
        table.insert(normalize(key), action);
    }

    /// Defaults plus the `[keybindings]` entries (`action = "key spec"`).
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidKeyBinding` for an unknown action or key spec.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut bindings = Self::default();
        for (action_name, spec) in overrides {
            let invalid = |reason: String| ConfigError::InvalidKeyBinding {
                action: action_name.clone(),
                spec: spec.clone(),
                reason,
            };
            let action: KeyAction = action_name.parse().map_err(|e| invalid(format!("{e}")))?;
            let key = parse_key_spec(spec).map_err(invalid)?;
            bindings.bind(key, action);
        }
        Ok(bindings)
    }
}

/// Parse a key spec such as `"j"`, `"G"`, `"ctrl-n"`, `"shift-tab"` or `"pagedown"`.
///
/// Modifiers (`ctrl`, `alt`, `shift`) are joined with `-`. A single
/// uppercase character implies shift.
pub fn parse_key_spec(spec: &str) -> Result<KeyEvent, String> {
    let spec = spec.trim();
    let (modifier_part, key_part) = match spec.rsplit_once('-') {
        Some((mods, "")) => (mods.strip_suffix('-').unwrap_or(mods), "-"),
        Some((mods, key)) => (mods, key),
        None => ("", spec),
    };

    let mut modifiers = KeyModifiers::NONE;
    for modifier in modifier_part.split('-').filter(|m| !m.is_empty()) {
        modifiers |= match modifier.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" | "meta" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            other => return Err(format!("unknown modifier {other:?}")),
        };
    }

    let mut chars = key_part.chars();
    let code = match (chars.next(), chars.next()) {
        (None, _) => return Err("missing key".to_string()),
        (Some(c), None) => {
            if c.is_uppercase() {
                modifiers |= KeyModifiers::SHIFT;
            }
            KeyCode::Char(c)
        }
        _ => match key_part.to_ascii_lowercase().as_str() {
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
            "tab" => KeyCode::Tab,
            "backtab" => {
                modifiers |= KeyModifiers::SHIFT;
                KeyCode::BackTab
            }
            "backspace" => KeyCode::Backspace,
            "space" => KeyCode::Char(' '),
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            other => return Err(format!("unknown key {other:?}")),
        },
    };

    Ok(KeyEvent::new(code, modifiers))
}

impl Default for KeyBindings {
    fn default() -> Self {
        let key = |code, modifiers| KeyEvent::new(code, modifiers);
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let shift = KeyModifiers::SHIFT;

        // Printable keys stay unbound: typing one starts a search with it
        let normal = HashMap::from([
            (key(KeyCode::Down, none), KeyAction::MoveDown),
            (key(KeyCode::Char('n'), ctrl), KeyAction::MoveDown),
            (key(KeyCode::Up, none), KeyAction::MoveUp),
            (key(KeyCode::Char('p'), ctrl), KeyAction::MoveUp),
            (key(KeyCode::Char('d'), ctrl), KeyAction::PageDown),
            (key(KeyCode::PageDown, none), KeyAction::PageDown),
            (key(KeyCode::Char('u'), ctrl), KeyAction::PageUp),
            (key(KeyCode::PageUp, none), KeyAction::PageUp),
            (key(KeyCode::Home, none), KeyAction::MoveToTop),
            (key(KeyCode::End, none), KeyAction::MoveToBottom),
            (key(KeyCode::Enter, none), KeyAction::Select),
            // Type-ahead
            (key(KeyCode::Char('s'), ctrl), KeyAction::CompletePrefix),
            (key(KeyCode::Char('f'), ctrl), KeyAction::CompleteSubstring),
            // Application
            (key(KeyCode::Esc, none), KeyAction::Quit),
            (key(KeyCode::Char('c'), ctrl), KeyAction::Quit),
        ]);

        let prompt = HashMap::from([
            (key(KeyCode::Tab, none), KeyAction::NextMatch),
            (key(KeyCode::Down, none), KeyAction::NextMatch),
            (key(KeyCode::Char('n'), ctrl), KeyAction::NextMatch),
            (key(KeyCode::BackTab, shift), KeyAction::PrevMatch),
            (key(KeyCode::Up, none), KeyAction::PrevMatch),
            (key(KeyCode::Char('p'), ctrl), KeyAction::PrevMatch),
            (key(KeyCode::Enter, none), KeyAction::Confirm),
            (key(KeyCode::Esc, none), KeyAction::Cancel),
            (key(KeyCode::Char('c'), ctrl), KeyAction::Cancel),
        ]);

        Self { normal, prompt }
    }
}
