//! Selection state machines (pure).
//!
//! All state transitions are testable without a terminal: side effects go
//! through the host traits in [`host`].

pub mod controller;
pub mod dropdown;
pub mod filter;
pub mod highlight;
pub mod host;
pub mod matcher;

// Re-export for convenience
pub use controller::{SelectionController, SelectionEvent, SessionState, SubscriptionId};
pub use dropdown::{
    DefaultSelection, Dropdown, DropdownChange, DropdownOptions, PopupList, PromptState,
};
pub use filter::{FilterState, MatchMode};
pub use highlight::{HighlightSpans, SpanKind};
pub use host::{FilterPrompt, FocusProvider, HighlightSink, ItemSource, SelectionHost};
pub use matcher::Direction;
