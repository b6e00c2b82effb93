//! TUI rendering and terminal management (impure shell)

pub mod dropdown;
pub mod styles;

pub use dropdown::{window_start, DropdownView, PROMPT_PREFIX};
pub use styles::{ColorConfig, DropdownStyles};

use crate::config::keybindings::KeyBindings;
use crate::model::{Item, KeyAction};
use crate::state::{Dropdown, MatchMode};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::Backend, backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stderr};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::model::InputError),
}

/// How the picker ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// An item was committed.
    Selected,
    /// The user quit without choosing.
    Cancelled,
}

/// Interactive picker over a dropdown.
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    dropdown: Dropdown<String>,
    key_bindings: KeyBindings,
    styles: DropdownStyles,
    outcome: Option<Outcome>,
}

impl TuiApp<CrosstermBackend<Stderr>> {
    /// Set up the terminal and create the picker.
    ///
    /// Renders on stderr in raw mode with an alternate screen, leaving stdout
    /// free for the result.
    pub fn new(
        dropdown: Dropdown<String>,
        key_bindings: KeyBindings,
        styles: DropdownStyles,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stderr = io::stderr();
        stderr.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stderr))?;
        Ok(Self::from_terminal(terminal, dropdown, key_bindings, styles))
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Create the picker on an existing backend, without touching the terminal mode.
    pub fn with_backend(
        backend: B,
        dropdown: Dropdown<String>,
        key_bindings: KeyBindings,
        styles: DropdownStyles,
    ) -> Result<Self, TuiError> {
        let terminal = Terminal::new(backend)?;
        Ok(Self::from_terminal(terminal, dropdown, key_bindings, styles))
    }

    fn from_terminal(
        terminal: Terminal<B>,
        mut dropdown: Dropdown<String>,
        key_bindings: KeyBindings,
        styles: DropdownStyles,
    ) -> Self {
        dropdown.open_popup();
        Self {
            terminal,
            dropdown,
            key_bindings,
            styles,
            outcome: None,
        }
    }

    /// The dropdown being driven.
    pub fn dropdown(&self) -> &Dropdown<String> {
        &self.dropdown
    }

    /// The terminal, for inspecting test backends.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// How the picker ended, once it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Position and item committed when the picker ended with a selection.
    pub fn chosen(&self) -> Option<(usize, &Item<String>)> {
        match self.outcome {
            Some(Outcome::Selected) => self
                .dropdown
                .selected_position()
                .zip(self.dropdown.selection()),
            _ => None,
        }
    }

    /// Open the filter prompt before the first key arrives.
    pub fn start_filter(&mut self, mode: MatchMode) {
        self.dropdown.complete_on(mode);
    }

    /// Run the event loop until an item is chosen or the user quits.
    pub fn run(&mut self) -> Result<Option<(usize, Item<String>)>, TuiError> {
        self.draw()?;
        loop {
            match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(key) {
                        return Ok(self
                            .chosen()
                            .map(|(position, item)| (position, item.clone())));
                    }
                    self.draw()?;
                }
                Event::Resize(_, _) => self.draw()?,
                _ => {}
            }
        }
    }

    /// Render the current state.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        self.terminal.draw(|frame| {
            let view = DropdownView::new(&self.dropdown, &self.styles);
            let area = frame.area();
            let area = Rect {
                height: view.required_height().min(area.height),
                ..area
            };
            frame.render_widget(view, area);
        })?;
        Ok(())
    }

    /// Handle one key. Returns true once the picker is finished.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return self.outcome.is_some();
        }

        if self.dropdown.is_filtering() {
            self.handle_prompt_key(key);
        } else {
            self.handle_popup_key(key);
        }

        if self.outcome.is_none() && !self.dropdown.is_open() {
            self.outcome = Some(Outcome::Selected);
        }
        if let Some(outcome) = self.outcome {
            debug!(?outcome, "picker finished");
        }
        self.outcome.is_some()
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        let page = isize::try_from(self.dropdown.visible_rows()).unwrap_or(isize::MAX);
        match self.key_bindings.get(key) {
            Some(KeyAction::MoveUp) => self.dropdown.move_focus(-1),
            Some(KeyAction::MoveDown) => self.dropdown.move_focus(1),
            Some(KeyAction::PageUp) => self.dropdown.move_focus(-page),
            Some(KeyAction::PageDown) => self.dropdown.move_focus(page),
            Some(KeyAction::MoveToTop) => self.dropdown.focus_first(),
            Some(KeyAction::MoveToBottom) => self.dropdown.focus_last(),
            Some(KeyAction::Select) => {
                if !self.dropdown.is_empty() {
                    self.dropdown.activate();
                }
            }
            Some(KeyAction::CompletePrefix) => self.dropdown.complete_prefix(),
            Some(KeyAction::CompleteSubstring) => self.dropdown.complete_substring(),
            Some(KeyAction::Quit) => self.outcome = Some(Outcome::Cancelled),
            Some(action) => debug!(?action, "action not available outside the prompt"),
            None => {
                // Any other printable key starts a search with it
                if let Some(ch) = typed_char(key) {
                    self.dropdown.complete();
                    self.dropdown.insert_char(ch);
                }
            }
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match self.key_bindings.get_prompt(key) {
            Some(KeyAction::NextMatch) => self.dropdown.completion_next(),
            Some(KeyAction::PrevMatch) => self.dropdown.completion_prev(),
            Some(KeyAction::Confirm) => self.dropdown.confirm_completion(),
            Some(KeyAction::Cancel) => self.dropdown.cancel_completion(),
            Some(action) => debug!(?action, "action not available in the prompt"),
            None => match key.code {
                KeyCode::Backspace => self.dropdown.backspace(),
                KeyCode::Left => self.dropdown.cursor_left(),
                KeyCode::Right => self.dropdown.cursor_right(),
                _ => {
                    if let Some(ch) = typed_char(key) {
                        self.dropdown.insert_char(ch);
                    }
                }
            },
        }
    }
}

/// The character a key types, if it is plain text input.
fn typed_char(key: KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(ch)
        }
        _ => None,
    }
}

/// Run the picker on the real terminal.
///
/// Opens the filter prompt first when `initial_filter` is set. The terminal
/// is restored even when the event loop fails.
pub fn run_picker(
    dropdown: Dropdown<String>,
    key_bindings: KeyBindings,
    styles: DropdownStyles,
    initial_filter: Option<MatchMode>,
) -> Result<Option<(usize, Item<String>)>, TuiError> {
    let mut app = match TuiApp::new(dropdown, key_bindings, styles) {
        Ok(app) => app,
        Err(e) => {
            let _ = restore_terminal();
            return Err(e);
        }
    };
    if let Some(mode) = initial_filter {
        app.start_filter(mode);
    }

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stderr().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
