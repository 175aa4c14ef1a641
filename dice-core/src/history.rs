//! Bounded roll history, newest first.

use std::collections::VecDeque;

use serde::Serialize;

use crate::dice::RollOutcome;

/// Number of outcomes kept in a [`RollHistory`].
pub const HISTORY_CAPACITY: usize = 10;

/// The most recent roll outcomes, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RollHistory {
    entries: VecDeque<RollOutcome>,
}

impl RollHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Prepend an outcome, dropping the oldest entries past capacity.
    pub fn push(&mut self, outcome: RollOutcome) {
        self.entries.push_front(outcome);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &RollOutcome> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&RollOutcome> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RollHistory {
    type Item = &'a RollOutcome;
    type IntoIter = std::collections::vec_deque::Iter<'a, RollOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Return `history` with `outcome` prepended and truncated to capacity.
pub fn append_to_history(outcome: RollOutcome, mut history: RollHistory) -> RollHistory {
    history.push(outcome);
    history
}

/// An empty history.
pub fn clear_history() -> RollHistory {
    RollHistory::new()
}
