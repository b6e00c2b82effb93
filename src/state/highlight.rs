//! Highlight decomposition: pre-match / match / post-match spans of a label.

use crate::model::text;

/// Emphasis for one span of a decomposed label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Regular label text.
    Normal,
    /// The matched occurrence.
    Match,
}

/// A label split around the first occurrence of a matched substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpans {
    before: String,
    matched: String,
    after: String,
}

impl HighlightSpans {
    /// Split `label` around the first occurrence of `needle`.
    ///
    /// If `needle` does not occur, the whole label is returned unhighlighted.
    pub fn decompose(label: &str, needle: &str, case_sensitive: bool) -> Self {
        match text::find_match(label, needle, case_sensitive) {
            Some(range) => Self {
                before: label[..range.start].to_string(),
                matched: label[range.clone()].to_string(),
                after: label[range.end..].to_string(),
            },
            None => Self::plain(label),
        }
    }

    /// The whole label as normal text.
    pub fn plain(label: &str) -> Self {
        Self {
            before: label.to_string(),
            matched: String::new(),
            after: String::new(),
        }
    }

    /// Whether there is a non-empty match span.
    pub fn is_highlighted(&self) -> bool {
        !self.matched.is_empty()
    }

    /// Text before the match.
    pub fn before(&self) -> &str {
        &self.before
    }

    /// The matched text, as it appears in the label.
    pub fn matched(&self) -> &str {
        &self.matched
    }

    /// Text after the match.
    pub fn after(&self) -> &str {
        &self.after
    }

    /// Non-empty spans in display order.
    pub fn segments(&self) -> impl Iterator<Item = (SpanKind, &str)> {
        [
            (SpanKind::Normal, self.before.as_str()),
            (SpanKind::Match, self.matched.as_str()),
            (SpanKind::Normal, self.after.as_str()),
        ]
        .into_iter()
        .filter(|(_, text)| !text.is_empty())
    }

    /// Reassembled label.
    pub fn text(&self) -> String {
        [self.before.as_str(), &self.matched, &self.after].concat()
    }
}
