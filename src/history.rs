//! Attempt log for one round, most recent first.

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::feedback::Feedback;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 1-based attempt counter.
    pub attempt_number: usize,
    pub guess: Vec<Card>,
    pub feedback: Feedback,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attempt. It becomes the first entry.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order they were played.
    pub fn chronological(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }
}
