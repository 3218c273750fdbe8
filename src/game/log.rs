//! Bounded narrative logs.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Retention cap of the main event log.
pub const EVENT_LOG_CAPACITY: usize = 8;

/// Retention cap of the adversary reaction log.
pub const REACTION_LOG_CAPACITY: usize = 5;

/// Retention cap of the tension change log.
pub const TENSION_LOG_CAPACITY: usize = 5;

/// An ordered log that keeps only its most recent entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedLog {
    capacity: usize,
    entries: VecDeque<String>,
}

impl BoundedLog {
    /// Create an empty log retaining at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Append an entry, evicting the oldest ones beyond the cap.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_back(entry.into());
        self.trim();
    }

    /// Drop the oldest entries until the log is within its cap.
    pub fn trim(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Retention cap.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.entries.iter().map(String::as_str)
    }

    /// The newest `n` entries, oldest first.
    pub fn latest(&self, n: usize) -> impl Iterator<Item = &str> {
        self.iter().skip(self.len().saturating_sub(n))
    }

    /// The newest entry.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }
}

/// Retention caps for each log category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogCaps {
    /// Events, reasoning, reflections and briefings.
    pub events: usize,
    /// Coalition reactions to the player's moves.
    pub reactions: usize,
    /// Tension change justifications.
    pub tension_changes: usize,
}

impl Default for LogCaps {
    fn default() -> Self {
        Self {
            events: EVENT_LOG_CAPACITY,
            reactions: REACTION_LOG_CAPACITY,
            tension_changes: TENSION_LOG_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_evicts_oldest() {
        let mut log = BoundedLog::new(3);
        for i in 0..5 {
            log.push(format!("entry {i}"));
        }
        assert_eq!(log.len(), 3);
        assert_eq!(
            log.iter().collect::<Vec<_>>(),
            vec!["entry 2", "entry 3", "entry 4"]
        );
        assert_eq!(log.last(), Some("entry 4"));
    }

    #[test]
    fn test_latest() {
        let mut log = BoundedLog::new(8);
        log.push("a");
        log.push("b");
        log.push("c");
        assert_eq!(log.latest(2).collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(log.latest(10).count(), 3);
    }

    #[test]
    fn test_zero_capacity_retains_nothing() {
        let mut log = BoundedLog::new(0);
        log.push("dropped");
        assert!(log.is_empty());
    }

    #[test]
    fn test_default_caps() {
        let caps = LogCaps::default();
        assert_eq!((caps.events, caps.reactions, caps.tension_changes), (8, 5, 5));
    }
}
