//! Bounded calculation history log.
//!
//! # Responsibility
//! - Record successful evaluations newest-first.
//! - Evict the oldest entry once capacity is exceeded.
//!
//! # Invariants
//! - `list()` order is newest-first; display and eviction both rely on it.
//! - Entries are immutable; nothing removes an individual entry except
//!   capacity eviction or wholesale replacement on restore.

use crate::model::calculation::Calculation;

/// Maximum number of retained history entries.
pub const HISTORY_CAPACITY: usize = 50;

/// Append-only, capacity-bounded record of evaluated expressions.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<Calculation>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a log from persisted entries, enforcing the capacity bound.
    pub fn from_entries(entries: Vec<Calculation>) -> Self {
        let mut log = Self { entries };
        log.entries.truncate(HISTORY_CAPACITY);
        log
    }

    /// Records one successful evaluation at the front of the log.
    ///
    /// Assigns a fresh id and timestamp, evicts beyond capacity, and
    /// returns a clone of the stored record.
    pub fn record(&mut self, expression: &str, result: &str) -> Calculation {
        let entry = Calculation::new(expression, result);
        self.entries.insert(0, entry.clone());
        self.entries.truncate(HISTORY_CAPACITY);
        entry
    }

    /// Read-only view, newest-first.
    pub fn list(&self) -> &[Calculation] {
        &self.entries
    }

    /// Replaces the whole log, used by backup restore.
    pub fn replace_all(&mut self, entries: Vec<Calculation>) {
        self.entries = entries;
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
