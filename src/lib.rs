//! typeahead
//!
//! Type-ahead selection for lists: incremental prefix/substring search that
//! cycles through matches, plus a dropdown picker that runs in the terminal.
//!
//! Pure Core / Impure Shell: `model` and `state` hold all filtering logic and
//! never touch the terminal; `view`, `source` and `logging` are the shell.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
