//! Dropdown selector state (pure).
//!
//! A dropdown is a button showing the committed selection plus a popup list.
//! The popup list is the [`SelectionHost`] for a [`SelectionController`], so
//! typing in the popup's prompt drives the type-ahead search.

use crate::model::{Item, ItemList, LookupError};
use crate::state::{
    FilterPrompt, FocusProvider, HighlightSink, HighlightSpans, ItemSource, MatchMode,
    SelectionController, SelectionEvent, SelectionHost,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};
use unicode_width::UnicodeWidthStr;

/// Button text when the dropdown has no items.
pub const EMPTY_LABEL: &str = "\u{2205}";

/// Separates the caption from the button text.
pub const CAPTION_SEPARATOR: &str = ": ";

/// Narrowest the popup gets, in columns.
pub const MIN_WIDTH: usize = 4;

// ===== PromptState =====

/// Editable text of the filter prompt.
///
/// `cursor` counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptState {
    text: String,
    cursor: usize,
}

impl PromptState {
    /// Prompt text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    fn insert(&mut self, ch: char) {
        let offset = self.byte_offset(self.cursor);
        self.text.insert(offset, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let offset = self.byte_offset(self.cursor - 1);
        self.text.remove(offset);
        self.cursor -= 1;
        true
    }

    fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }
}

// ===== PopupList =====

/// Items of the popup with their focus, highlight and prompt state.
#[derive(Debug, Clone)]
pub struct PopupList<V> {
    items: ItemList<V>,
    focus: usize,
    highlighted: Option<(usize, HighlightSpans)>,
    prompt: Option<PromptState>,
}

impl<V> PopupList<V> {
    fn new(items: ItemList<V>) -> Self {
        Self {
            items,
            focus: 0,
            highlighted: None,
            prompt: None,
        }
    }

    /// The items.
    pub fn items(&self) -> &ItemList<V> {
        &self.items
    }

    /// Highlight decomposition for `position`, if highlighted.
    pub fn highlight_at(&self, position: usize) -> Option<&HighlightSpans> {
        self.highlighted
            .as_ref()
            .filter(|(highlighted, _)| *highlighted == position)
            .map(|(_, spans)| spans)
    }

    /// Prompt state while the prompt is open.
    pub fn prompt(&self) -> Option<&PromptState> {
        self.prompt.as_ref()
    }
}

impl<V> ItemSource for PopupList<V> {
    fn position_count(&self) -> usize {
        self.items.len()
    }

    fn label(&self, position: usize) -> Option<&str> {
        self.items.get(position).map(Item::label)
    }
}

impl<V> FocusProvider for PopupList<V> {
    fn focus(&self) -> usize {
        self.focus
    }

    fn set_focus(&mut self, position: usize) {
        if position < self.items.len() {
            self.focus = position;
        } else {
            warn!(position, len = self.items.len(), "ignoring focus outside popup list");
        }
    }
}

impl<V> HighlightSink for PopupList<V> {
    fn highlight(&mut self, position: usize, spans: HighlightSpans) {
        self.highlighted = Some((position, spans));
    }

    fn unhighlight(&mut self, position: usize) {
        if self.highlight_at(position).is_some() {
            self.highlighted = None;
        }
    }
}

impl<V> FilterPrompt for PopupList<V> {
    fn open_prompt(&mut self) {
        self.prompt.get_or_insert_with(PromptState::default);
    }

    fn close_prompt(&mut self) {
        self.prompt = None;
    }

    fn prompt_text(&self) -> String {
        self.prompt
            .as_ref()
            .map(|prompt| prompt.text.clone())
            .unwrap_or_default()
    }

    fn set_prompt_text(&mut self, text: &str) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.set_text(text);
        }
    }
}

impl<V> SelectionHost for PopupList<V> {
    type Value = V;

    fn item(&self, position: usize) -> Option<&Item<V>> {
        self.items.get(position)
    }
}

// ===== Options =====

/// Initial selection of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultSelection<V> {
    /// Select the first item with this label (case-insensitive).
    Label(String),
    /// Select the first item with this value.
    Value(V),
}

/// Construction options for [`Dropdown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOptions<V> {
    /// Caption shown before the button.
    pub label: Option<String>,
    /// Initial selection; position 0 when absent or not found.
    pub default: Option<DefaultSelection<V>>,
    /// Draw a border around the popup.
    pub border: bool,
    /// Most popup rows shown at once.
    pub max_height: usize,
    /// Whether type-ahead completion is available.
    pub auto_complete: bool,
    /// Case sensitivity of type-ahead sessions.
    pub case_sensitive: bool,
    /// Match mode used by [`Dropdown::complete`].
    pub mode: MatchMode,
}

impl<V> Default for DropdownOptions<V> {
    fn default() -> Self {
        Self {
            label: None,
            default: None,
            border: false,
            max_height: 10,
            auto_complete: true,
            case_sensitive: false,
            mode: MatchMode::Prefix,
        }
    }
}

// ===== DropdownChange =====

/// Published when the committed selection changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownChange<V> {
    /// Newly selected position.
    pub position: usize,
    /// Its label.
    pub label: String,
    /// Its value.
    pub value: V,
}

type ChangeObserver<V> = Box<dyn FnMut(&DropdownChange<V>)>;

// ===== Dropdown =====

/// Dropdown selector with type-ahead filtering.
pub struct Dropdown<V> {
    list: PopupList<V>,
    controller: SelectionController<V>,
    controller_events: Rc<RefCell<VecDeque<SelectionEvent<V>>>>,
    change_observers: Vec<ChangeObserver<V>>,
    selected: Option<usize>,
    open: bool,
    label: Option<String>,
    border: bool,
    max_height: usize,
    auto_complete: bool,
    case_sensitive: bool,
    mode: MatchMode,
}

impl<V> fmt::Debug for Dropdown<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("len", &self.list.items.len())
            .field("selected", &self.selected)
            .field("focus", &self.list.focus)
            .field("open", &self.open)
            .field("controller", &self.controller)
            .finish()
    }
}

impl<V: Clone + PartialEq + 'static> Dropdown<V> {
    /// Build a dropdown over `items`.
    pub fn new(items: ItemList<V>, options: DropdownOptions<V>) -> Self {
        let mut controller = SelectionController::new();
        let controller_events = Rc::new(RefCell::new(VecDeque::new()));
        let queue = Rc::clone(&controller_events);
        controller.subscribe(move |event: &SelectionEvent<V>| {
            queue.borrow_mut().push_back(event.clone());
        });

        let initial = if items.is_empty() { None } else { Some(0) };
        let mut dropdown = Self {
            list: PopupList::new(items),
            controller,
            controller_events,
            change_observers: Vec::new(),
            selected: initial,
            open: false,
            label: options.label,
            border: options.border,
            max_height: options.max_height.max(1),
            auto_complete: options.auto_complete,
            case_sensitive: options.case_sensitive,
            mode: options.mode,
        };

        match options.default {
            Some(DefaultSelection::Label(label)) => {
                if let Err(err) = dropdown.select_label(&label, false) {
                    warn!(%err, "default selection not found, keeping first item");
                }
            }
            Some(DefaultSelection::Value(value)) => {
                if dropdown.select_value(&value).is_err() {
                    warn!("default value not found, keeping first item");
                }
            }
            None => {}
        }

        dropdown
    }
}

impl<V: Clone + PartialEq + 'static> Dropdown<V> {
    // ===== Items =====

    /// Number of items.
    pub fn len(&self) -> usize {
        self.list.items.len()
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.list.items.is_empty()
    }

    /// The items.
    pub fn items(&self) -> &ItemList<V> {
        &self.list.items
    }

    /// Item labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.list.items.labels()
    }

    /// Item values in order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.list.items.values()
    }

    /// Popup list state, for rendering.
    pub fn popup(&self) -> &PopupList<V> {
        &self.list
    }

    /// Caption shown before the button.
    pub fn caption(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Whether the popup is bordered.
    pub fn border(&self) -> bool {
        self.border
    }

    // ===== Selection =====

    /// Position of the committed selection.
    pub fn selected_position(&self) -> Option<usize> {
        self.selected
    }

    /// The committed item.
    pub fn selection(&self) -> Option<&Item<V>> {
        self.selected.and_then(|position| self.list.items.get(position))
    }

    /// Label of the committed item, or [`EMPTY_LABEL`].
    pub fn selected_label(&self) -> &str {
        self.selection().map_or(EMPTY_LABEL, Item::label)
    }

    /// Value of the committed item.
    pub fn selected_value(&self) -> Option<&V> {
        self.selection().map(Item::value)
    }

    /// Focused position in the popup.
    pub fn focus_position(&self) -> usize {
        self.list.focus
    }

    /// Commit `position` as the selection and focus it.
    ///
    /// No-op when it is already the selection or out of range.
    pub fn set_focus_position(&mut self, position: usize) {
        if position >= self.len() {
            warn!(position, len = self.len(), "selection outside item list");
            return;
        }
        self.list.focus = position;
        if self.selected == Some(position) {
            return;
        }
        self.selected = Some(position);
        self.emit_change(position);
    }

    /// Select the first item labeled `label`.
    pub fn select_label(&mut self, label: &str, case_sensitive: bool) -> Result<(), LookupError> {
        let position = self
            .list
            .items
            .position_of_label(label, case_sensitive)
            .ok_or_else(|| LookupError::LabelNotFound(label.to_string()))?;
        self.set_focus_position(position);
        Ok(())
    }

    /// Select the first item whose value equals `value`.
    pub fn select_value(&mut self, value: &V) -> Result<(), LookupError> {
        let position = self
            .list
            .items
            .position_of_value(value)
            .ok_or(LookupError::ValueNotFound)?;
        self.set_focus_position(position);
        Ok(())
    }

    /// Move the selection by `n`, clamped to the list.
    pub fn cycle(&mut self, n: isize) {
        if self.is_empty() {
            return;
        }
        let current = self.selected.unwrap_or(0);
        self.set_focus_position(self.clamped(current, n));
    }

    /// Subscribe to selection changes.
    pub fn on_change<F>(&mut self, observer: F)
    where
        F: FnMut(&DropdownChange<V>) + 'static,
    {
        self.change_observers.push(Box::new(observer));
    }

    fn emit_change(&mut self, position: usize) {
        let Some(item) = self.list.items.get(position) else {
            return;
        };
        let change = DropdownChange {
            position,
            label: item.label().to_string(),
            value: item.value().clone(),
        };
        debug!(position, label = %change.label, "selection changed");
        for observer in &mut self.change_observers {
            observer(&change);
        }
    }

    fn clamped(&self, from: usize, delta: isize) -> usize {
        let last = self.len().saturating_sub(1);
        from.saturating_add_signed(delta).min(last)
    }

    // ===== Popup =====

    /// Whether the popup is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the popup, focused on the committed selection.
    pub fn open_popup(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.list.focus = self.selected.unwrap_or(0);
    }

    /// Hide the popup, abandoning any filter session.
    pub fn close_popup(&mut self) {
        if self.controller.is_filtering() {
            self.controller.cancel(&mut self.list);
            self.controller_events.borrow_mut().clear();
        }
        self.open = false;
    }

    /// Move popup focus by `delta`, clamped. Ignored while filtering.
    pub fn move_focus(&mut self, delta: isize) {
        if !self.open || self.is_filtering() || self.is_empty() {
            return;
        }
        self.list.focus = self.clamped(self.list.focus, delta);
    }

    /// Focus the first item.
    pub fn focus_first(&mut self) {
        self.move_focus(isize::MIN);
    }

    /// Focus the last item.
    pub fn focus_last(&mut self) {
        self.move_focus(isize::MAX);
    }

    /// Commit the focused item and close the popup.
    pub fn activate(&mut self) {
        if !self.open || self.is_filtering() {
            return;
        }
        if !self.is_empty() {
            self.set_focus_position(self.list.focus);
        }
        self.open = false;
    }

    /// Close the popup without changing the selection.
    pub fn dismiss(&mut self) {
        if self.is_filtering() {
            return;
        }
        self.list.focus = self.selected.unwrap_or(0);
        self.open = false;
    }

    /// Rows the popup occupies, border included.
    pub fn popup_height(&self) -> usize {
        let rows = self.len().min(self.max_height);
        if self.border {
            rows + 2
        } else {
            rows
        }
    }

    /// Rows available for items inside the popup.
    pub fn visible_rows(&self) -> usize {
        self.len().min(self.max_height)
    }

    /// Widest label, at least [`MIN_WIDTH`].
    pub fn max_item_width(&self) -> usize {
        if self.is_empty() {
            return MIN_WIDTH;
        }
        self.list.items.max_label_width().max(MIN_WIDTH)
    }

    /// Columns taken by the caption and its separator; 0 without a caption.
    pub fn caption_width(&self) -> usize {
        self.label
            .as_deref()
            .map_or(0, |label| label.width() + CAPTION_SEPARATOR.width())
    }

    /// Total width: caption, then the item column and any popup border.
    pub fn width(&self) -> usize {
        let border = if self.border { 2 } else { 0 };
        self.caption_width() + self.max_item_width() + border
    }

    // ===== Type-ahead =====

    /// Whether a type-ahead session is open.
    pub fn is_filtering(&self) -> bool {
        self.controller.is_filtering()
    }

    /// Current filter state.
    pub fn filter(&self) -> &crate::state::FilterState {
        self.controller.filter()
    }

    /// Match mode of sessions started with [`Dropdown::complete`].
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Open the popup and start completion in the configured mode.
    pub fn complete(&mut self) {
        self.complete_on(self.mode);
    }

    /// Open the popup and start prefix completion.
    pub fn complete_prefix(&mut self) {
        self.complete_on(MatchMode::Prefix);
    }

    /// Open the popup and start substring completion.
    pub fn complete_substring(&mut self) {
        self.complete_on(MatchMode::Substring);
    }

    /// Open the popup and start completion in `mode`.
    pub fn complete_on(&mut self, mode: MatchMode) {
        if !self.auto_complete {
            return;
        }
        self.open_popup();
        self.controller
            .start(&mut self.list, mode, self.case_sensitive);
    }

    /// Type a character into the prompt.
    pub fn insert_char(&mut self, ch: char) {
        let Some(prompt) = self.list.prompt.as_mut() else {
            return;
        };
        prompt.insert(ch);
        self.controller.sync_from_prompt(&mut self.list);
    }

    /// Delete the character before the prompt cursor.
    pub fn backspace(&mut self) {
        let Some(prompt) = self.list.prompt.as_mut() else {
            return;
        };
        if prompt.backspace() {
            self.controller.sync_from_prompt(&mut self.list);
        }
    }

    /// Move the prompt cursor left.
    pub fn cursor_left(&mut self) {
        if let Some(prompt) = self.list.prompt.as_mut() {
            prompt.left();
        }
    }

    /// Move the prompt cursor right.
    pub fn cursor_right(&mut self) {
        if let Some(prompt) = self.list.prompt.as_mut() {
            prompt.right();
        }
    }

    /// Cycle to the next match.
    pub fn completion_next(&mut self) {
        self.controller.next(&mut self.list);
    }

    /// Cycle to the previous match.
    pub fn completion_prev(&mut self) {
        self.controller.prev(&mut self.list);
    }

    /// Accept the current match, commit it and close the popup.
    pub fn confirm_completion(&mut self) {
        self.controller.confirm(&mut self.list);
        self.drain_controller_events();
    }

    /// Abandon the session and restore the prior focus. The popup stays open.
    pub fn cancel_completion(&mut self) {
        self.controller.cancel(&mut self.list);
        self.drain_controller_events();
    }

    fn drain_controller_events(&mut self) {
        loop {
            let event = self.controller_events.borrow_mut().pop_front();
            match event {
                Some(SelectionEvent::Selected { position, .. }) => {
                    self.set_focus_position(position);
                    self.open = false;
                }
                // Cancel only closes the prompt; the popup stays up
                Some(SelectionEvent::Closed) => {}
                None => break,
            }
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "dropdown_tests.rs"]
mod tests;
