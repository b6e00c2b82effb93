//! Filter state and the match predicate.

use crate::model::{text, Matchable};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

// ===== MatchMode =====

/// How filter text is compared against a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Label starts with the filter text.
    #[default]
    Prefix,
    /// Filter text occurs anywhere in the label.
    Substring,
}

/// Error parsing a match mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown match mode {0:?} (expected \"prefix\" or \"substring\")")]
pub struct UnknownMatchMode(pub String);

impl FromStr for MatchMode {
    type Err = UnknownMatchMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prefix" => Ok(Self::Prefix),
            "substring" => Ok(Self::Substring),
            _ => Err(UnknownMatchMode(s.to_string())),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix => f.write_str("prefix"),
            Self::Substring => f.write_str("substring"),
        }
    }
}

// ===== FilterState =====

/// Current filter text, match options, and the last successful match.
///
/// `last_match_position`, when present, is the position most recently
/// reported as matching `text`. It is cleared whenever `text` becomes empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    text: String,
    anchor_position: usize,
    last_match_position: Option<usize>,
    mode: MatchMode,
    case_sensitive: bool,
}

impl FilterState {
    /// Empty filter with the given options.
    pub fn new(mode: MatchMode, case_sensitive: bool) -> Self {
        Self {
            mode,
            case_sensitive,
            ..Self::default()
        }
    }

    /// Current filter text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the filter text is empty (an empty filter matches nothing).
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Match mode.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether comparisons are case-sensitive.
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Position the most recent search started from.
    pub fn anchor_position(&self) -> usize {
        self.anchor_position
    }

    /// Position of the last successful match, if any.
    pub fn last_match_position(&self) -> Option<usize> {
        self.last_match_position
    }

    /// Replace the filter text. Clears the last match when the text becomes empty.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if self.text.is_empty() {
            self.last_match_position = None;
        }
    }

    /// Record the position a search is about to start from.
    pub fn set_anchor(&mut self, position: usize) {
        self.anchor_position = position;
    }

    /// Record a successful match.
    pub fn record_match(&mut self, position: usize) {
        self.last_match_position = Some(position);
    }

    /// Forget the last match.
    pub fn clear_match(&mut self) {
        self.last_match_position = None;
    }

    /// Back to an empty filter with new options.
    pub fn reset(&mut self, mode: MatchMode, case_sensitive: bool) {
        *self = Self::new(mode, case_sensitive);
    }

    /// Whether `label` satisfies the filter.
    ///
    /// Empty text matches nothing.
    pub fn matches<M: Matchable + ?Sized>(&self, label: &M) -> bool {
        if self.text.is_empty() {
            return false;
        }

        let label = label.match_text();
        match self.mode {
            MatchMode::Prefix => {
                text::prefix_match(&label, &self.text, self.case_sensitive).is_some()
            }
            MatchMode::Substring => {
                text::find_match(&label, &self.text, self.case_sensitive).is_some()
            }
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
