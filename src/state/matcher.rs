//! Cyclic match search.
//!
//! Pure functions locating the next position, relative to an anchor, whose
//! label satisfies a [`FilterState`]. The scan starts just past the anchor,
//! wraps around the ends of the list, and tests the anchor itself last, so
//! repeated calls cycle through every match in turn.

use crate::state::{FilterState, ItemSource};
use tracing::warn;

// ===== Direction =====

/// Scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Increasing positions (+1).
    Forward,
    /// Decreasing positions (-1).
    Backward,
}

impl Direction {
    /// Direction of a signed step count. Zero counts as forward.
    pub fn from_step(step: isize) -> Self {
        if step < 0 {
            Self::Backward
        } else {
            Self::Forward
        }
    }

    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

// ===== CircularPositions =====

/// Every position of a list of length `len`, starting just past `anchor`
/// in `direction` and ending on `anchor` after one full revolution.
#[derive(Debug, Clone)]
pub struct CircularPositions {
    len: usize,
    current: usize,
    remaining: usize,
    direction: Direction,
}

impl CircularPositions {
    /// Walk of `len` positions around `anchor`.
    ///
    /// An anchor outside `0..len` yields nothing.
    pub fn new(len: usize, anchor: usize, direction: Direction) -> Self {
        let remaining = if anchor < len { len } else { 0 };
        Self {
            len,
            current: anchor,
            remaining,
            direction,
        }
    }
}

impl Iterator for CircularPositions {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.current = match self.direction {
            Direction::Forward => (self.current + 1) % self.len,
            Direction::Backward => (self.current + self.len - 1) % self.len,
        };
        Some(self.current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CircularPositions {}

// ===== Search =====

/// Find the first position after `anchor` (in `direction`) whose label
/// matches `filter`, wrapping around and testing `anchor` last.
///
/// Returns `None` when:
/// - the filter text is empty (no search is performed)
/// - the list has fewer than two positions
/// - `anchor` is out of range (logged)
/// - nothing matches in a full revolution
pub fn find<S>(items: &S, anchor: usize, direction: Direction, filter: &FilterState) -> Option<usize>
where
    S: ItemSource + ?Sized,
{
    if filter.is_empty() {
        return None;
    }

    let len = items.position_count();
    if len < 2 {
        return None;
    }

    if anchor >= len {
        warn!(anchor, len, "search anchor outside item list, treating as no match");
        return None;
    }

    CircularPositions::new(len, anchor, direction)
        .find(|&position| items.label(position).is_some_and(|label| filter.matches(label)))
}

/// Advance `steps` matches from `anchor`; negative steps go backward.
///
/// Each intermediate result becomes the anchor of the next search. Zero
/// steps returns `anchor` itself when it matches.
pub fn step<S>(items: &S, anchor: usize, steps: isize, filter: &FilterState) -> Option<usize>
where
    S: ItemSource + ?Sized,
{
    if steps == 0 {
        return items
            .label(anchor)
            .filter(|label| filter.matches(*label))
            .map(|_| anchor);
    }

    let direction = Direction::from_step(steps);
    let mut position = anchor;
    for _ in 0..steps.unsigned_abs() {
        position = find(items, position, direction, filter)?;
    }
    Some(position)
}

// ===== Tests =====

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
