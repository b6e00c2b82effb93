//! Domain-level keyboard actions independent of key bindings.

use std::str::FromStr;

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Popup navigation
    /// Move popup focus up one item. Default: k/↑
    MoveUp,
    /// Move popup focus down one item. Default: j/↓
    MoveDown,
    /// Move popup focus up one page. Default: Page Up/Ctrl+u
    PageUp,
    /// Move popup focus down one page. Default: Page Down/Ctrl+d
    PageDown,
    /// Move popup focus to the first item. Default: g/Home
    MoveToTop,
    /// Move popup focus to the last item. Default: G/End
    MoveToBottom,
    /// Commit the focused item and close. Default: Enter/Space
    Select,

    // Type-ahead
    /// Open the filter prompt in prefix mode. Default: /
    CompletePrefix,
    /// Open the filter prompt in substring mode. Default: Ctrl+f
    CompleteSubstring,
    /// Cycle to the next match while filtering. Default: Tab/↓/Ctrl+n
    NextMatch,
    /// Cycle to the previous match while filtering. Default: Shift+Tab/↑/Ctrl+p
    PrevMatch,
    /// Accept the current match and close the prompt. Default: Enter
    Confirm,
    /// Close the prompt and restore the prior focus. Default: Esc
    Cancel,

    // Application
    /// Exit without selecting. Default: q/Esc
    Quit,
}

/// Error parsing an action name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown action: {0:?}")]
pub struct UnknownAction(pub String);

impl FromStr for KeyAction {
    type Err = UnknownAction;

    /// Parse the snake_case action name used in the `[keybindings]` config table.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s {
            "move_up" => Self::MoveUp,
            "move_down" => Self::MoveDown,
            "page_up" => Self::PageUp,
            "page_down" => Self::PageDown,
            "move_to_top" => Self::MoveToTop,
            "move_to_bottom" => Self::MoveToBottom,
            "select" => Self::Select,
            "complete_prefix" => Self::CompletePrefix,
            "complete_substring" => Self::CompleteSubstring,
            "next_match" => Self::NextMatch,
            "prev_match" => Self::PrevMatch,
            "confirm" => Self::Confirm,
            "cancel" => Self::Cancel,
            "quit" => Self::Quit,
            other => return Err(UnknownAction(other.to_string())),
        };
        Ok(action)
    }
}

impl KeyAction {
    /// Whether the action applies while the filter prompt is open.
    pub fn is_prompt_action(self) -> bool {
        matches!(
            self,
            Self::NextMatch | Self::PrevMatch | Self::Confirm | Self::Cancel
        )
    }
}
