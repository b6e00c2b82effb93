//! Selection controller: ties filter events to focus and highlight side effects.
//!
//! SessionState is a sum type with two states:
//! - Idle: no filtering session is open
//! - Filtering: the prompt is open and events drive the matcher
//!
//! All side effects go through the [`SelectionHost`] passed into each call.
//! Outcomes are published to subscribed observers as [`SelectionEvent`]s.
//! Nothing here is fatal: a search that finds nothing, an out-of-range
//! position or an empty list leaves the host untouched.

use crate::model::Item;
use crate::state::matcher::{self, Direction};
use crate::state::{FilterState, HighlightSpans, MatchMode, SelectionHost};
use std::fmt;
use tracing::{debug, warn};

// ===== SessionState =====

/// Lifecycle of the filter-entry affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No active session.
    #[default]
    Idle,
    /// Session open; the filter text may still be empty.
    Filtering {
        /// Focus to restore on cancel.
        restore_position: usize,
    },
}

// ===== SelectionEvent =====

/// Outcome published to observers when a session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent<V> {
    /// An item was chosen (on confirm).
    Selected {
        /// Position of the chosen item.
        position: usize,
        /// The chosen item.
        item: Item<V>,
    },
    /// The session closed (on confirm or cancel).
    Closed,
}

/// Handle returned by [`SelectionController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<V> = Box<dyn FnMut(&SelectionEvent<V>)>;

// ===== SelectionController =====

/// Type-ahead state machine for one list.
pub struct SelectionController<V> {
    session: SessionState,
    filter: FilterState,
    observers: Vec<(SubscriptionId, Observer<V>)>,
    next_subscription: u64,
}

impl<V> Default for SelectionController<V> {
    fn default() -> Self {
        Self {
            session: SessionState::Idle,
            filter: FilterState::default(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }
}

impl<V> fmt::Debug for SelectionController<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionController")
            .field("session", &self.session)
            .field("filter", &self.filter)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<V: Clone> SelectionController<V> {
    /// New controller in the Idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session state.
    pub fn session(&self) -> SessionState {
        self.session
    }

    /// Whether a session is open.
    pub fn is_filtering(&self) -> bool {
        matches!(self.session, SessionState::Filtering { .. })
    }

    /// Current filter.
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    // ===== Observers =====

    /// Register an observer for selection and close events.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&SelectionEvent<V>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn emit(&mut self, event: SelectionEvent<V>) {
        for (_, observer) in &mut self.observers {
            observer(&event);
        }
    }

    // ===== Events =====

    /// Open a session in `mode`.
    ///
    /// Remembers the focused position for cancel, resets the filter and
    /// opens the prompt. No-op when a session is already open.
    pub fn start<H>(&mut self, host: &mut H, mode: MatchMode, case_sensitive: bool)
    where
        H: SelectionHost<Value = V>,
    {
        if self.is_filtering() {
            debug!("filter session already open");
            return;
        }

        let restore_position = host.focus();
        self.filter.reset(mode, case_sensitive);
        host.set_prompt_text("");
        host.open_prompt();
        self.session = SessionState::Filtering { restore_position };
        debug!(%mode, case_sensitive, restore_position, "filter session started");
    }

    /// Apply new filter text and search forward from the focused position.
    pub fn text_changed<H>(&mut self, host: &mut H, new_text: &str)
    where
        H: SelectionHost<Value = V>,
    {
        if !self.is_filtering() {
            return;
        }

        self.clear_highlight(host);
        self.filter.set_text(new_text);
        if self.filter.is_empty() {
            return;
        }
        if host.position_count() == 0 {
            debug!("filter text ignored: empty item list");
            return;
        }

        let anchor = host.focus();
        let found = self.search(host, anchor, 1);
        self.apply(host, found);
    }

    /// Read the prompt text from the host and apply it.
    pub fn sync_from_prompt<H>(&mut self, host: &mut H)
    where
        H: SelectionHost<Value = V>,
    {
        if !self.is_filtering() {
            return;
        }
        let text = host.prompt_text();
        if text != self.filter.text() {
            self.text_changed(host, &text);
        }
    }

    /// Cycle to the next match.
    pub fn next<H>(&mut self, host: &mut H)
    where
        H: SelectionHost<Value = V>,
    {
        self.step(host, 1);
    }

    /// Cycle to the previous match.
    pub fn prev<H>(&mut self, host: &mut H)
    where
        H: SelectionHost<Value = V>,
    {
        self.step(host, -1);
    }

    /// Cycle `steps` matches; negative steps go backward.
    ///
    /// Starts from the last match, or from the focused position when there
    /// is none. No-op while Idle or with empty filter text.
    pub fn step<H>(&mut self, host: &mut H, steps: isize)
    where
        H: SelectionHost<Value = V>,
    {
        if !self.is_filtering() || self.filter.is_empty() || steps == 0 {
            return;
        }
        if host.position_count() == 0 {
            debug!("match cycling ignored: empty item list");
            return;
        }

        self.clear_highlight(host);
        let anchor = self
            .filter
            .last_match_position()
            .unwrap_or_else(|| host.focus());
        let found = self.search(host, anchor, steps);
        self.apply(host, found);
    }

    /// Select the focused item and close the session.
    ///
    /// Emits `Selected` followed by `Closed`. No-op while Idle or when the
    /// list is empty.
    pub fn confirm<H>(&mut self, host: &mut H)
    where
        H: SelectionHost<Value = V>,
    {
        if !self.is_filtering() {
            return;
        }
        if host.position_count() == 0 {
            debug!("confirm ignored: empty item list");
            return;
        }

        self.clear_highlight(host);
        let position = host.focus();
        let item = host.item(position).cloned();
        self.close(host);

        match item {
            Some(item) => self.emit(SelectionEvent::Selected { position, item }),
            None => warn!(position, "focused position outside item list, nothing selected"),
        }
        self.emit(SelectionEvent::Closed);
    }

    /// Restore the focus held before the session and close it.
    ///
    /// Emits `Closed`. No-op while Idle.
    pub fn cancel<H>(&mut self, host: &mut H)
    where
        H: SelectionHost<Value = V>,
    {
        let SessionState::Filtering { restore_position } = self.session else {
            return;
        };

        self.clear_highlight(host);
        let count = host.position_count();
        if restore_position < count {
            host.set_focus(restore_position);
        } else if count > 0 {
            warn!(restore_position, count, "restore position outside item list");
        }
        self.close(host);
        self.emit(SelectionEvent::Closed);
    }

    // ===== Helpers =====

    fn search<H>(&mut self, host: &H, anchor: usize, steps: isize) -> Option<usize>
    where
        H: SelectionHost<Value = V>,
    {
        self.filter.set_anchor(anchor);
        matcher::step(host, anchor, steps, &self.filter)
    }

    /// Highlight and focus a match, or forget the last match.
    fn apply<H>(&mut self, host: &mut H, found: Option<usize>)
    where
        H: SelectionHost<Value = V>,
    {
        let Some(position) = found else {
            debug!(text = self.filter.text(), "no match");
            self.filter.clear_match();
            return;
        };

        let Some(label) = host.label(position) else {
            warn!(position, "match position outside item list");
            self.filter.clear_match();
            return;
        };

        let spans =
            HighlightSpans::decompose(label, self.filter.text(), self.filter.case_sensitive());
        host.highlight(position, spans);
        host.set_focus(position);
        self.filter.record_match(position);
        debug!(position, text = self.filter.text(), "match");
    }

    fn clear_highlight<H>(&mut self, host: &mut H)
    where
        H: SelectionHost<Value = V>,
    {
        if let Some(position) = self.filter.last_match_position() {
            if position < host.position_count() {
                host.unhighlight(position);
            }
        }
    }

    fn close<H>(&mut self, host: &mut H)
    where
        H: SelectionHost<Value = V>,
    {
        host.close_prompt();
        host.set_prompt_text("");
        let (mode, case_sensitive) = (self.filter.mode(), self.filter.case_sensitive());
        self.filter.reset(mode, case_sensitive);
        self.session = SessionState::Idle;
        debug!("filter session closed");
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
