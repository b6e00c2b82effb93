//! Case-folding text comparison.
//!
//! Matching and highlighting share these helpers so that a label which
//! matches a filter always yields a match span when decomposed.
//! Folding is per character via `char::to_lowercase`, which keeps byte
//! offsets anchored to the original (unfolded) label.

use std::ops::Range;

/// Byte length of the prefix of `haystack` matched by `needle`, if any.
///
/// An empty `needle` matches the empty prefix.
fn matched_prefix_len(haystack: &str, needle: &str, case_sensitive: bool) -> Option<usize> {
    if case_sensitive {
        return haystack.starts_with(needle).then_some(needle.len());
    }

    let mut wanted = needle.chars().flat_map(char::to_lowercase).peekable();
    for (offset, ch) in haystack.char_indices() {
        if wanted.peek().is_none() {
            return Some(offset);
        }
        for lower in ch.to_lowercase() {
            match wanted.next() {
                Some(w) if w == lower => {}
                // Mismatch, or the needle ended inside a multi-char fold
                _ => return None,
            }
        }
    }

    wanted.peek().is_none().then_some(haystack.len())
}

/// Range of `haystack` matched by `needle` when anchored at the start.
pub fn prefix_match(haystack: &str, needle: &str, case_sensitive: bool) -> Option<Range<usize>> {
    matched_prefix_len(haystack, needle, case_sensitive).map(|len| 0..len)
}

/// Range of the first occurrence of `needle` in `haystack`.
///
/// Returns `None` for an empty `needle`.
pub fn find_match(haystack: &str, needle: &str, case_sensitive: bool) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }

    haystack.char_indices().find_map(|(start, _)| {
        matched_prefix_len(&haystack[start..], needle, case_sensitive)
            .map(|len| start..start + len)
    })
}

/// Whether two labels are equal under the given case sensitivity.
pub fn labels_equal(a: &str, b: &str, case_sensitive: bool) -> bool {
    matched_prefix_len(a, b, case_sensitive) == Some(a.len())
}
