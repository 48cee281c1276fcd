//! # History
//!
//! Snapshot history over whole designs.
//!
//! - `checkpoint` stores the design as it was before an edit, empties the
//!   redo side and evicts the oldest snapshot past capacity
//! - `undo` parks the current design on the redo side and restores the
//!   newest snapshot
//! - `redo` checkpoints the current design like any edit would, then
//!   restores the newest redo snapshot. The checkpoint empties the redo
//!   side, so a second redo in a row has nothing to restore.
//!
//! ```rust
//! use mailframe_editor::UndoStack;
//! use mailframe_model::Design;
//!
//! let mut history = UndoStack::new();
//! let mut design = Design::seeded();
//!
//! history.checkpoint(design.clone(), "Clear rows");
//! design.rows_mut().clear();
//!
//! assert!(history.undo(&mut design));
//! assert_eq!(design.rows().len(), 1);
//! ```

use crate::options::DEFAULT_HISTORY_CAPACITY;
use mailframe_model::Design;
use std::collections::VecDeque;

/// A saved design plus the edit that followed it
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub design: Design,
    pub description: String,
}

#[derive(Debug)]
pub struct UndoStack {
    /// Oldest at the front
    past: VecDeque<Checkpoint>,
    /// Newest at the back
    future: Vec<Checkpoint>,
    capacity: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// History keeping at most `capacity` undo snapshots; zero means unbounded
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            capacity,
        }
    }

    /// Record the design as it is before an edit
    pub fn checkpoint(&mut self, design: Design, description: impl Into<String>) {
        self.past.push_back(Checkpoint {
            design,
            description: description.into(),
        });
        self.future.clear();

        while self.capacity > 0 && self.past.len() > self.capacity {
            self.past.pop_front();
        }
    }

    /// Restore the newest snapshot; false when there is none
    pub fn undo(&mut self, current: &mut Design) -> bool {
        match self.past.pop_back() {
            Some(Checkpoint {
                design,
                description,
            }) => {
                let undone = std::mem::replace(current, design);
                self.future.push(Checkpoint {
                    design: undone,
                    description,
                });
                true
            }
            None => false,
        }
    }

    /// Restore the most recently undone design; false when there is none
    pub fn redo(&mut self, current: &mut Design) -> bool {
        match self.future.pop() {
            Some(Checkpoint {
                design,
                description,
            }) => {
                self.checkpoint(std::mem::replace(current, design), description);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget every snapshot on both sides
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    /// Label of the edit the next undo reverts
    pub fn undo_description(&self) -> Option<&str> {
        self.past.back().map(|c| c.description.as_str())
    }

    /// Label of the edit the next redo reapplies
    pub fn redo_description(&self) -> Option<&str> {
        self.future.last().map(|c| c.description.as_str())
    }

    /// Undo snapshots, oldest first
    pub fn undo_snapshots(&self) -> impl Iterator<Item = &Design> {
        self.past.iter().map(|c| &c.design)
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailframe_model::Row;

    fn rows(count: usize) -> Design {
        let mut design = Design::new();
        design
            .rows_mut()
            .extend((0..count).map(|_| Row::with_columns(1, None)));
        design
    }

    #[test]
    fn test_fresh_history_is_empty() {
        let history = UndoStack::default();

        assert_eq!(history.capacity(), 50);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_description(), None);
    }

    #[test]
    fn test_nothing_to_restore_leaves_design_alone() {
        let mut history = UndoStack::new();
        let mut design = rows(1);
        let before = design.clone();

        assert!(!history.undo(&mut design));
        assert!(!history.redo(&mut design));
        assert_eq!(design, before);
    }

    #[test]
    fn test_round_trip_through_redo() {
        let mut history = UndoStack::new();
        let mut design = rows(1);

        history.checkpoint(design.clone(), "Insert row");
        design.rows_mut().push(Row::with_columns(2, None));
        let edited = design.clone();

        assert!(history.undo(&mut design));
        assert_eq!(design.rows().len(), 1);
        assert_eq!(history.redo_description(), Some("Insert row"));

        assert!(history.redo(&mut design));
        assert_eq!(design, edited);
        assert_eq!((history.undo_levels(), history.redo_levels()), (1, 0));
    }

    #[test]
    fn test_redo_keeps_only_one_level() {
        let mut history = UndoStack::new();
        let mut design = rows(1);

        for count in 2..=3 {
            history.checkpoint(design.clone(), format!("Grow to {}", count));
            design = rows(count);
        }
        history.undo(&mut design);
        history.undo(&mut design);
        assert_eq!(history.redo_levels(), 2);

        assert!(history.redo(&mut design));

        assert_eq!(design.rows().len(), 2);
        assert!(!history.redo(&mut design));
    }

    #[test]
    fn test_checkpoint_after_undo_empties_redo() {
        let mut history = UndoStack::new();
        let mut design = rows(1);

        history.checkpoint(design.clone(), "first");
        history.undo(&mut design);
        history.checkpoint(design.clone(), "second");

        assert!(!history.can_redo());
        assert_eq!(history.undo_description(), Some("second"));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = UndoStack::with_capacity(2);

        for count in 0..3 {
            history.checkpoint(rows(count), format!("Edit {}", count));
        }

        let kept: Vec<usize> = history.undo_snapshots().map(|d| d.rows().len()).collect();
        assert_eq!(kept, vec![1, 2]);
    }

    #[test]
    fn test_zero_capacity_is_unbounded() {
        let mut history = UndoStack::with_capacity(0);

        for count in 0..80 {
            history.checkpoint(rows(count % 3), "Edit");
        }

        assert_eq!(history.undo_levels(), 80);
    }
}
