//! Labeled items and the ordered list they live in.

use crate::model::text;
use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

// ===== Matchable =====

/// Anything that exposes text a filter can be matched against.
pub trait Matchable {
    /// Text used for matching and highlighting.
    fn match_text(&self) -> Cow<'_, str>;
}

impl Matchable for str {
    fn match_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Matchable for String {
    fn match_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<V> Matchable for Item<V> {
    fn match_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.label())
    }
}

// ===== Item =====

/// A labeled value. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<V> {
    label: String,
    value: V,
}

impl<V> Item<V> {
    /// Create a new item.
    pub fn new(label: impl Into<String>, value: V) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// Display and match text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Associated value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Split into label and value.
    pub fn into_parts(self) -> (String, V) {
        (self.label, self.value)
    }
}

// ===== ItemList =====

/// Ordered, read-only sequence of items.
///
/// Positions are 0-based and stable for the lifetime of the list.
/// Labels need not be distinct; the position identifies an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemList<V> {
    items: Vec<Item<V>>,
}

impl<V> Default for ItemList<V> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<V> ItemList<V> {
    /// Wrap an existing vector of items.
    pub fn new(items: Vec<Item<V>>) -> Self {
        Self { items }
    }

    /// Build from `(label, value)` pairs, keeping their order.
    pub fn from_pairs<I, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, V)>,
        L: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(label, value)| Item::new(label, value))
            .collect()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `position`, if in range.
    pub fn get(&self, position: usize) -> Option<&Item<V>> {
        self.items.get(position)
    }

    /// Iterate items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item<V>> {
        self.items.iter()
    }

    /// Iterate labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(Item::label)
    }

    /// Iterate values in order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.items.iter().map(Item::value)
    }

    /// First position whose label equals `label`.
    pub fn position_of_label(&self, label: &str, case_sensitive: bool) -> Option<usize> {
        self.items
            .iter()
            .position(|item| text::labels_equal(item.label(), label, case_sensitive))
    }

    /// Widest label, in terminal columns.
    pub fn max_label_width(&self) -> usize {
        self.items
            .iter()
            .map(|item| item.label().width())
            .max()
            .unwrap_or(0)
    }
}

impl<V: PartialEq> ItemList<V> {
    /// First position whose value equals `value`.
    pub fn position_of_value(&self, value: &V) -> Option<usize> {
        self.items.iter().position(|item| item.value() == value)
    }
}

impl ItemList<usize> {
    /// Build from bare labels; each value is the label's position.
    pub fn from_labels<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        labels
            .into_iter()
            .enumerate()
            .map(|(position, label)| Item::new(label, position))
            .collect()
    }
}

impl<V> FromIterator<Item<V>> for ItemList<V> {
    fn from_iter<T: IntoIterator<Item = Item<V>>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, V> IntoIterator for &'a ItemList<V> {
    type Item = &'a Item<V>;
    type IntoIter = std::slice::Iter<'a, Item<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
