//! Source edit history
//!
//! A bounded, linear list of source snapshots with a cursor. Pushing after
//! an undo discards the redo branch. When the list is full the oldest
//! snapshot is evicted and the window slides, so the cursor always lands on
//! the snapshot that was just pushed.

use log::debug;

use crate::config::EditorSettings;

/// Linear undo/redo ledger over whole-source snapshots.
#[derive(Debug, Clone)]
pub struct EditHistory {
    entries: Vec<String>,
    cursor: usize,
    capacity: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(EditorSettings::DEFAULT_HISTORY_LIMIT)
    }
}

impl EditHistory {
    /// Create an empty history holding at most `capacity` snapshots
    /// (a capacity of zero is treated as one).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Create a history whose first snapshot is `initial`.
    pub fn seeded(initial: impl Into<String>, capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        history.entries.push(initial.into());
        history
    }

    /// Record a snapshot.
    ///
    /// Returns `false` (and changes nothing) when `content` equals the
    /// snapshot under the cursor.
    pub fn push(&mut self, content: impl Into<String>) -> bool {
        let content = content.into();
        if self.current() == Some(content.as_str()) {
            return false;
        }

        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(content);

        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
            debug!("History full, evicted {} oldest snapshot(s)", excess);
        }

        self.cursor = self.entries.len() - 1;
        true
    }

    /// Step back one snapshot and return it, or `None` at the oldest.
    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    /// Step forward one snapshot and return it, or `None` at the newest.
    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
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

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let mut history = EditHistory::default();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 50);
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        assert_eq!(history.current(), None);
    }

    #[test]
    fn test_push_skips_duplicate_of_current() {
        let mut history = EditHistory::seeded("a", 10);
        assert!(!history.push("a"));
        assert!(history.push("b"));
        assert!(!history.push("b"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut history = EditHistory::seeded("A", 50);
        history.push("B");
        history.push("C");

        assert_eq!(history.undo(), Some("B"));
        assert_eq!(history.undo(), Some("A"));
        assert_eq!(history.undo(), None);
        assert_eq!(history.current(), Some("A"));

        assert_eq!(history.redo(), Some("B"));
        assert_eq!(history.redo(), Some("C"));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_push_after_undo_discards_redo_branch() {
        let mut history = EditHistory::seeded("A", 50);
        history.push("B");
        history.push("C");
        history.undo();

        assert!(history.push("D"));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.undo(), Some("B"));
    }

    #[test]
    fn test_push_equal_to_undone_entry_is_noop() {
        let mut history = EditHistory::seeded("A", 50);
        history.push("B");
        history.undo();
        assert!(!history.push("A"));
        assert!(history.can_redo());
    }

    #[test]
    fn test_capacity_slides_window() {
        let mut history = EditHistory::new(50);
        for i in 0..60 {
            history.push(format!("v{}", i));
            assert!(history.len() <= 50);
            assert_eq!(history.current(), Some(format!("v{}", i).as_str()));
        }
        assert_eq!(history.len(), 50);
        assert_eq!(history.cursor(), 49);
        assert!(!history.can_redo());

        let mut oldest = None;
        while let Some(entry) = history.undo() {
            oldest = Some(entry.to_string());
        }
        assert_eq!(oldest.as_deref(), Some("v10"));
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut history = EditHistory::new(0);
        history.push("a");
        history.push("b");
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some("b"));
    }

    #[test]
    fn test_clear() {
        let mut history = EditHistory::seeded("A", 5);
        history.push("B");
        history.clear();
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(history.push("A"));
    }
}
