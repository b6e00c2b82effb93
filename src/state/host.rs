//! Collaborator traits implemented by the presentation layer.
//!
//! The controller never owns the list widget; it reads labels and focus
//! through these narrow traits and commands focus, highlight and prompt
//! changes back through them.

use crate::model::{Item, ItemList};
use crate::state::HighlightSpans;

/// Read access to an ordered list of labels.
pub trait ItemSource {
    /// Number of positions.
    fn position_count(&self) -> usize;

    /// Label at `position`, or `None` when out of range.
    fn label(&self, position: usize) -> Option<&str>;
}

/// Get/set the focused position.
pub trait FocusProvider {
    /// Currently focused position.
    fn focus(&self) -> usize;

    /// Move focus to `position`.
    fn set_focus(&mut self, position: usize);
}

/// Renders matched labels with emphasis.
pub trait HighlightSink {
    /// Render the label at `position` using the given decomposition.
    fn highlight(&mut self, position: usize, spans: HighlightSpans);

    /// Restore normal rendering of the label at `position`.
    fn unhighlight(&mut self, position: usize);
}

/// The text-entry affordance used while filtering.
pub trait FilterPrompt {
    /// Show the prompt.
    fn open_prompt(&mut self);

    /// Hide the prompt.
    fn close_prompt(&mut self);

    /// Text currently in the prompt.
    fn prompt_text(&self) -> String;

    /// Replace the prompt text.
    fn set_prompt_text(&mut self, text: &str);
}

/// Everything the selection controller needs from its host.
pub trait SelectionHost: ItemSource + FocusProvider + HighlightSink + FilterPrompt {
    /// Value type carried by the host's items.
    type Value;

    /// Item at `position`, or `None` when out of range.
    fn item(&self, position: usize) -> Option<&Item<Self::Value>>;
}

impl<V> ItemSource for ItemList<V> {
    fn position_count(&self) -> usize {
        self.len()
    }

    fn label(&self, position: usize) -> Option<&str> {
        self.get(position).map(Item::label)
    }
}
