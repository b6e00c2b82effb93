//! Tests for the selection controller.
//!
//! A recording host captures every side effect the controller requests.

use super::*;
use crate::model::ItemList;
use crate::state::{FilterPrompt, FocusProvider, HighlightSink, ItemSource};
use std::cell::RefCell;
use std::rc::Rc;

// ===== Test Helpers =====

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Highlight(usize, String),
    Unhighlight(usize),
    SetFocus(usize),
    OpenPrompt,
    ClosePrompt,
}

struct RecordingHost {
    items: ItemList<usize>,
    focus: usize,
    prompt: String,
    prompt_open: bool,
    highlighted: Option<(usize, HighlightSpans)>,
    calls: Vec<Call>,
}

impl RecordingHost {
    fn new(labels: &[&str]) -> Self {
        Self {
            items: ItemList::from_labels(labels.iter().copied()),
            focus: 0,
            prompt: String::new(),
            prompt_open: false,
            highlighted: None,
            calls: Vec::new(),
        }
    }

    fn with_focus(mut self, focus: usize) -> Self {
        self.focus = focus;
        self
    }

    fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl ItemSource for RecordingHost {
    fn position_count(&self) -> usize {
        self.items.len()
    }

    fn label(&self, position: usize) -> Option<&str> {
        self.items.label(position)
    }
}

impl FocusProvider for RecordingHost {
    fn focus(&self) -> usize {
        self.focus
    }

    fn set_focus(&mut self, position: usize) {
        self.focus = position;
        self.calls.push(Call::SetFocus(position));
    }
}

impl HighlightSink for RecordingHost {
    fn highlight(&mut self, position: usize, spans: HighlightSpans) {
        self.calls
            .push(Call::Highlight(position, spans.matched().to_string()));
        self.highlighted = Some((position, spans));
    }

    fn unhighlight(&mut self, position: usize) {
        self.calls.push(Call::Unhighlight(position));
        if self.highlighted.as_ref().is_some_and(|(p, _)| *p == position) {
            self.highlighted = None;
        }
    }
}

impl FilterPrompt for RecordingHost {
    fn open_prompt(&mut self) {
        self.prompt_open = true;
        self.calls.push(Call::OpenPrompt);
    }

    fn close_prompt(&mut self) {
        self.prompt_open = false;
        self.calls.push(Call::ClosePrompt);
    }

    fn prompt_text(&self) -> String {
        self.prompt.clone()
    }

    fn set_prompt_text(&mut self, text: &str) {
        self.prompt = text.to_string();
    }
}

impl SelectionHost for RecordingHost {
    type Value = usize;

    fn item(&self, position: usize) -> Option<&Item<usize>> {
        self.items.get(position)
    }
}

fn recorded_events(
    controller: &mut SelectionController<usize>,
) -> Rc<RefCell<Vec<SelectionEvent<usize>>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    controller.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

fn fruit_host() -> RecordingHost {
    RecordingHost::new(&["Apple", "Banana", "Apricot", "Cherry"])
}

// ===== start =====

#[test]
fn start_opens_prompt_and_enters_filtering() {
    let mut host = fruit_host().with_focus(1);
    let mut controller = SelectionController::new();

    controller.start(&mut host, MatchMode::Prefix, false);

    assert!(host.prompt_open);
    assert_eq!(
        controller.session(),
        SessionState::Filtering {
            restore_position: 1
        }
    );
    assert_eq!(controller.filter().mode(), MatchMode::Prefix);
    assert_eq!(controller.filter().text(), "");
}

#[test]
fn start_while_filtering_is_noop() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();
    controller.start(&mut host, MatchMode::Prefix, false);
    controller.text_changed(&mut host, "Ap");
    host.take_calls();

    controller.start(&mut host, MatchMode::Substring, true);

    assert!(host.take_calls().is_empty(), "no second prompt open");
    assert_eq!(controller.filter().mode(), MatchMode::Prefix);
    assert_eq!(controller.filter().text(), "Ap");
}

// ===== text_changed =====

#[test]
fn text_changed_finds_match_after_focus() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();
    controller.start(&mut host, MatchMode::Prefix, false);
    host.take_calls();

    controller.text_changed(&mut host, "Ap");

    assert_eq!(host.focus, 2, "Apricot; Apple is the anchor and scanned last");
    assert_eq!(
        host.take_calls(),
        vec![Call::Highlight(2, "Ap".to_string()), Call::SetFocus(2)]
    );
    assert_eq!(controller.filter().last_match_position(), Some(2));
}

#[test]
fn text_changed_unhighlights_previous_match() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();
    controller.start(&mut host, MatchMode::Prefix, false);
    controller.text_changed(&mut host, "Ap");
    host.take_calls();

    controller.text_changed(&mut host, "Apr");

    let calls = host.take_calls();
    assert_eq!(calls.first(), Some(&Call::Unhighlight(2)));
}

#[test]
fn text_changed_without_match_leaves_focus_and_clears_last_match() {
    let mut host = fruit_host().with_focus(1);
    let mut controller = SelectionController::new();
    controller.start(&mut host, MatchMode::Prefix, false);
    controller.text_changed(&mut host, "Ch");
    assert_eq!(host.focus, 3);
    host.take_calls();

    controller.text_changed(&mut host, "Chz");

    assert_eq!(host.focus, 3, "focus untouched");
    assert_eq!(host.take_calls(), vec![Call::Unhighlight(3)]);
    assert_eq!(controller.filter().last_match_position(), None);
    assert!(host.highlighted.is_none());
}

#[test]
fn text_changed_to_empty_does_not_search() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();
    controller.start(&mut host, MatchMode::Prefix, false);
    controller.text_changed(&mut host, "B");
    host.take_calls();

    controller.text_changed(&mut host, "");

    assert_eq!(host.take_calls(), vec![Call::Unhighlight(1)]);
    assert_eq!(controller.filter().last_match_position(), None);
}

#[test]
fn text_changed_while_idle_is_noop() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();

    controller.text_changed(&mut host, "Ap");

    assert!(host.take_calls().is_empty());
    assert_eq!(controller.filter().text(), "");
}

#[test]
fn text_changed_highlight_uses_first_occurrence_in_substring_mode() {
    let mut host = RecordingHost::new(&["River", "Mississippi"]);
    let mut controller = SelectionController::new();
    controller.start(&mut host, MatchMode::Substring, false);

    controller.text_changed(&mut host, "SS");

    let (position, spans) = host.highlighted.clone().expect("highlighted");
    assert_eq!(position, 1);
    assert_eq!(spans.before(), "Mi");
    assert_eq!(spans.matched(), "ss");
    assert_eq!(spans.after(), "issippi");
}

#[test]
fn sync_from_prompt_reads_host_text() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();
    controller.start(&mut host, MatchMode::Prefix, false);

    host.prompt = "Ch".to_string();
    controller.sync_from_prompt(&mut host);

    assert_eq!(controller.filter().text(), "Ch");
    assert_eq!(host.focus, 3);
}

// ===== next / prev =====

#[test]
fn next_wraps_to_first_match() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();
    controller.start(&mut host, MatchMode::Prefix, false);
    controller.text_changed(&mut host, "Ap");

    controller.next(&mut host);

    assert_eq!(host.focus, 0, "wraps from Apricot back to Apple");
    assert_eq!(controller.filter().last_match_position(), Some(0));
}

#[test]
fn next_then_prev_restores_focus() {
    let mut host = RecordingHost::new(&["Apple", "Avocado", "Banana", "Apricot", "Cherry"]);
    let mut controller = SelectionController::new();
    controller.start(&mut host, MatchMode::Prefix, false);
    controller.text_changed(&mut host, "a");
    let before = host.focus;

    controller.next(&mut host);
    assert_ne!(host.focus, before);
    controller.prev(&mut host);

    assert_eq!(host.focus, before);
}

#[test]
fn next_unhighlights_previous_match_first() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();
    controller.start(&mut host, MatchMode::Prefix, false);
    controller.text_changed(&mut host, "Ap");
    host.take_calls();

    controller.next(&mut host);

    assert_eq!(
        host.take_calls(),
        vec![
            Call::Unhighlight(2),
            Call::Highlight(0, "Ap".to_string()),
            Call::SetFocus(0)
        ]
    );
}

#[test]
fn next_with_single_match_stays_put() {
    let mut host = RecordingHost::new(&["Mississippi", "River"]);
    let mut controller = SelectionController::new();
    controller.start(&mut host, MatchMode::Substring, false);
    controller.text_changed(&mut host, "ss");

    for _ in 0..3 {
        controller.next(&mut host);
        assert_eq!(host.focus, 0);
    }
}

#[test]
fn next_with_empty_text_is_noop() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();
    controller.start(&mut host, MatchMode::Prefix, false);
    host.take_calls();

    controller.next(&mut host);
    controller.prev(&mut host);

    assert!(host.take_calls().is_empty());
}

#[test]
fn next_while_idle_is_noop() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();

    controller.next(&mut host);

    assert!(host.take_calls().is_empty());
}

#[test]
fn step_advances_several_matches() {
    let mut host = RecordingHost::new(&["a1", "b1", "a2", "b2", "a3"]);
    let mut controller = SelectionController::new();
    controller.start(&mut host, MatchMode::Prefix, false);
    controller.text_changed(&mut host, "a");
    assert_eq!(host.focus, 2);

    controller.step(&mut host, 2);

    assert_eq!(host.focus, 0);
}

// ===== confirm =====

#[test]
fn confirm_emits_selected_then_closed() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();
    let events = recorded_events(&mut controller);
    controller.start(&mut host, MatchMode::Prefix, false);
    controller.text_changed(&mut host, "Ch");

    controller.confirm(&mut host);

    assert_eq!(
        *events.borrow(),
        vec![
            SelectionEvent::Selected {
                position: 3,
                item: Item::new("Cherry", 3)
            },
            SelectionEvent::Closed
        ]
    );
    assert_eq!(controller.session(), SessionState::Idle);
    assert!(!host.prompt_open);
    assert_eq!(host.prompt, "");
    assert!(host.highlighted.is_none(), "match unhighlighted on confirm");
}

#[test]
fn confirm_resets_filter() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();
    controller.start(&mut host, MatchMode::Prefix, false);
    controller.text_changed(&mut host, "Ch");

    controller.confirm(&mut host);

    assert_eq!(controller.filter().text(), "");
    assert_eq!(controller.filter().last_match_position(), None);
}

#[test]
fn confirm_while_idle_emits_nothing() {
    let mut host = RecordingHost::new(&["One", "Two"]);
    let mut controller = SelectionController::new();
    let events = recorded_events(&mut controller);

    controller.confirm(&mut host);

    assert!(events.borrow().is_empty());
    assert!(host.take_calls().is_empty());
}

#[test]
fn confirm_with_empty_text_selects_focused_item() {
    let mut host = RecordingHost::new(&["One", "Two"]).with_focus(1);
    let mut controller = SelectionController::new();
    let events = recorded_events(&mut controller);
    controller.start(&mut host, MatchMode::Prefix, false);

    controller.confirm(&mut host);

    assert_eq!(
        events.borrow().first(),
        Some(&SelectionEvent::Selected {
            position: 1,
            item: Item::new("Two", 1)
        })
    );
}

#[test]
fn confirm_with_invalid_focus_only_closes() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();
    let events = recorded_events(&mut controller);
    controller.start(&mut host, MatchMode::Prefix, false);
    host.focus = 42;

    controller.confirm(&mut host);

    assert_eq!(*events.borrow(), vec![SelectionEvent::Closed]);
    assert_eq!(controller.session(), SessionState::Idle);
}

// ===== cancel =====

#[test]
fn cancel_restores_focus_and_emits_closed() {
    let mut host = fruit_host().with_focus(1);
    let mut controller = SelectionController::new();
    let events = recorded_events(&mut controller);
    controller.start(&mut host, MatchMode::Prefix, false);
    controller.text_changed(&mut host, "Ch");
    assert_eq!(host.focus, 3);

    controller.cancel(&mut host);

    assert_eq!(host.focus, 1);
    assert_eq!(*events.borrow(), vec![SelectionEvent::Closed]);
    assert_eq!(controller.session(), SessionState::Idle);
    assert!(!host.prompt_open);
    assert!(host.highlighted.is_none());
}

#[test]
fn cancel_while_idle_is_noop() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();
    let events = recorded_events(&mut controller);

    controller.cancel(&mut host);

    assert!(events.borrow().is_empty());
    assert!(host.take_calls().is_empty());
}

// ===== empty list =====

#[test]
fn empty_list_start_and_cancel_toggle_prompt() {
    let mut host = RecordingHost::new(&[]);
    let mut controller = SelectionController::new();
    let events = recorded_events(&mut controller);

    controller.start(&mut host, MatchMode::Prefix, false);
    assert!(host.prompt_open);

    controller.cancel(&mut host);
    assert!(!host.prompt_open);
    assert_eq!(*events.borrow(), vec![SelectionEvent::Closed]);
}

#[test]
fn empty_list_other_events_are_noops() {
    let mut host = RecordingHost::new(&[]);
    let mut controller = SelectionController::new();
    let events = recorded_events(&mut controller);
    controller.start(&mut host, MatchMode::Prefix, false);
    host.take_calls();

    controller.text_changed(&mut host, "a");
    controller.next(&mut host);
    controller.prev(&mut host);
    controller.confirm(&mut host);

    assert!(host.take_calls().is_empty());
    assert!(events.borrow().is_empty());
    assert!(controller.is_filtering());
}

// ===== observers =====

#[test]
fn unsubscribe_stops_delivery() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();
    let events = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&events);
    let id = controller.subscribe(move |_| *counter.borrow_mut() += 1);

    assert!(controller.unsubscribe(id));
    assert!(!controller.unsubscribe(id));

    controller.start(&mut host, MatchMode::Prefix, false);
    controller.cancel(&mut host);
    assert_eq!(*events.borrow(), 0);
}

#[test]
fn every_observer_receives_events() {
    let mut host = fruit_host();
    let mut controller = SelectionController::new();
    let first = recorded_events(&mut controller);
    let second = recorded_events(&mut controller);

    controller.start(&mut host, MatchMode::Prefix, false);
    controller.cancel(&mut host);

    assert_eq!(first.borrow().len(), 1);
    assert_eq!(second.borrow().len(), 1);
}
