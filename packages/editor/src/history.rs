//! # Snapshot History
//!
//! Bounded linear undo/redo over immutable block-list snapshots.
//!
//! ## Design
//!
//! - The entry at `cursor` is always "now"
//! - Recording truncates everything past the cursor (redo branch discarded)
//! - The buffer holds at most [`MAX_HISTORY_ENTRIES`] snapshots; the oldest
//!   is evicted on overflow, so undo can never reach past the bound
//! - Undo/redo at either end of history is a no-op, never an error

use trellis_blocks::Block;

/// Snapshot bound, oldest evicted on overflow
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Linear snapshot history with a cursor pointing at the live entry
#[derive(Debug)]
pub struct History {
    entries: Vec<Vec<Block>>,
    cursor: usize,
    max_entries: usize,
}

impl History {
    /// Create a history whose first entry is the document's starting state
    pub fn new(initial: Vec<Block>) -> Self {
        Self::with_max_entries(initial, MAX_HISTORY_ENTRIES)
    }

    pub fn with_max_entries(initial: Vec<Block>, max_entries: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Record a new "now" snapshot, discarding any redo branch
    pub fn record(&mut self, snapshot: Vec<Block>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry, returning the snapshot to restore
    pub fn undo(&mut self) -> Option<&[Block]> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one entry, returning the snapshot to restore
    pub fn redo(&mut self) -> Option<&[Block]> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of retained snapshots, the live entry included
    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_blocks::{registry, Block};

    fn snapshot(n: usize) -> Vec<Block> {
        (0..n)
            .map(|i| {
                Block::new(
                    format!("b-{i}"),
                    registry::get("text").unwrap().default_content(),
                    i,
                )
            })
            .collect()
    }

    #[test]
    fn undo_at_start_and_redo_at_end_are_noops() {
        let mut history = History::new(snapshot(0));
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_then_redo_restores_the_recorded_state() {
        let mut history = History::new(snapshot(0));
        history.record(snapshot(1));
        history.record(snapshot(2));

        assert_eq!(history.undo().unwrap().len(), 1);
        assert_eq!(history.undo().unwrap().len(), 0);
        assert!(history.undo().is_none());

        assert_eq!(history.redo().unwrap().len(), 1);
        assert_eq!(history.redo().unwrap().len(), 2);
        assert!(history.redo().is_none());
    }

    #[test]
    fn recording_discards_the_redo_branch() {
        let mut history = History::new(snapshot(0));
        history.record(snapshot(1));
        history.record(snapshot(2));
        history.undo();

        history.record(snapshot(3));
        assert!(!history.can_redo());
        assert_eq!(history.undo().unwrap().len(), 1);
    }

    #[test]
    fn overflow_evicts_the_oldest_entry() {
        let mut history = History::with_max_entries(snapshot(0), 3);
        for n in 1..=5 {
            history.record(snapshot(n));
        }

        assert_eq!(history.depth(), 3);

        // Undo to exhaustion lands on the oldest retained entry, not the
        // original initial state.
        let mut oldest = history.entries[history.cursor].len();
        while let Some(restored) = history.undo() {
            oldest = restored.len();
        }
        assert_eq!(oldest, 3);
    }
}
