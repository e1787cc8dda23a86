//! Advisory battle log shown to the player.

use std::collections::VecDeque;

/// Most-recent-first list of human-readable combat lines.
///
/// The log is bounded and purely informational; nothing reads it back.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl BattleLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes an entry to the front, dropping the oldest beyond capacity.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_front(entry.into());
        self.entries.truncate(self.capacity);
    }

    /// Most recent entry, if any.
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
