//! Dropdown palette.
//!
//! Button and popup rows sit on blue, the matched part of a highlighted
//! label is yellow, and the caption and prompt sit on black.

use crate::state::SpanKind;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Explicitly enabled or disabled.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== DropdownStyles =====

/// Styles for every part of the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownStyles {
    /// Unfocused rows and the button.
    pub text: Style,
    /// The focused row.
    pub focused: Style,
    /// The matched span of a highlighted label.
    pub highlight: Style,
    /// The caption before the button.
    pub label: Style,
    /// The filter prompt row.
    pub prompt: Style,
    /// The prompt cursor.
    pub cursor: Style,
}

impl DropdownStyles {
    /// Palette for the given color configuration.
    ///
    /// Without colors, focus is shown reversed and the match underlined so
    /// the picker stays usable.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                text: Style::default().fg(Color::Gray).bg(Color::Blue),
                focused: Style::default().fg(Color::White).bg(Color::LightBlue),
                highlight: Style::default().fg(Color::Yellow).bg(Color::LightBlue),
                label: Style::default().fg(Color::White).bg(Color::Black),
                prompt: Style::default().fg(Color::LightBlue).bg(Color::Black),
                cursor: Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                text: Style::default(),
                focused: Style::default().add_modifier(Modifier::REVERSED),
                highlight: Style::default()
                    .add_modifier(Modifier::REVERSED | Modifier::UNDERLINED),
                label: Style::default(),
                prompt: Style::default(),
                cursor: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }

    /// Style of a highlight span on a row styled `row`.
    pub fn span_style(&self, kind: SpanKind, row: Style) -> Style {
        match kind {
            SpanKind::Normal => row,
            SpanKind::Match => self.highlight,
        }
    }
}

impl Default for DropdownStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
