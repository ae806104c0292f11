//! Generic past/present/future undo stack over one opaque value.
//!
//! Undo and redo raise a suppression flag. While it is raised, `set`/`update`
//! replace the present without recording, so updates the host fires as a
//! consequence of applying an undo are not mistaken for new edits. The flag stays
//! raised until the host's next scheduling turn, signalled by `end_turn()`.

use std::collections::VecDeque;
use tracing::{debug, trace};

use crate::HistoryConfig;

#[derive(Debug, Clone)]
pub struct LinearHistory<T> {
    past: Vec<T>,
    present: T,
    future: VecDeque<T>,
    max_depth: usize,
    suppressed: bool,
}

impl<T: Clone> LinearHistory<T> {
    pub fn new(present: T, max_depth: usize) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: VecDeque::new(),
            max_depth: max_depth.max(1),
            suppressed: false,
        }
    }

    pub fn with_config(present: T, config: &HistoryConfig) -> Self {
        Self::new(present, config.max_linear_depth)
    }

    /// Record `value` as a new edit.
    pub fn set(&mut self, value: T) {
        self.commit(value, true);
    }

    /// Replace the present without touching past or future.
    pub fn set_untracked(&mut self, value: T) {
        self.commit(value, false);
    }

    /// Record the value computed from the current present.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.present);
        self.commit(next, true);
    }

    pub fn update_untracked(&mut self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.present);
        self.commit(next, false);
    }

    fn commit(&mut self, next: T, record: bool) {
        if !record || self.suppressed {
            trace!(record, suppressed = self.suppressed, "replacing present without history");
            self.present = next;
            return;
        }

        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(previous);
        if self.past.len() > self.max_depth {
            self.past.remove(0);
        }
        // A fresh edit invalidates the redo branch.
        self.future.clear();
        debug!(past = self.past.len(), "recorded edit");
    }

    /// Step back one edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            trace!("undo with empty past");
            return false;
        };

        self.suppressed = true;
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        debug!(past = self.past.len(), future = self.future.len(), "undo");
        true
    }

    /// Step forward one edit. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            trace!("redo with empty future");
            return false;
        };

        self.suppressed = true;
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        if self.past.len() > self.max_depth {
            self.past.remove(0);
        }
        debug!(past = self.past.len(), future = self.future.len(), "redo");
        true
    }

    /// Called by the host once the current turn has unwound.
    pub fn end_turn(&mut self) {
        if self.suppressed {
            trace!("clearing history suppression");
        }
        self.suppressed = false;
    }

    /// Load a fresh document: forget all history and replace the present.
    pub fn reset(&mut self, value: T) {
        self.past.clear();
        self.future.clear();
        self.present = value;
        debug!("history reset");
    }

    /// Forget history but keep the present (e.g. after a successful save).
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        debug!("history cleared");
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    pub fn past(&self) -> &[T] {
        &self.past
    }

    pub fn future(&self) -> &VecDeque<T> {
        &self.future
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_records_and_clears_future() {
        let mut h = LinearHistory::new(0, 10);
        h.set(1);
        h.set(2);
        assert!(h.undo());
        h.end_turn();
        assert!(h.can_redo());

        h.set(3);
        assert_eq!(*h.present(), 3);
        assert_eq!(h.past(), &[0, 1]);
        assert!(!h.can_redo());
    }

    #[test]
    fn test_update_uses_present() {
        let mut h = LinearHistory::new(5, 10);
        h.update(|v| v * 2);
        assert_eq!(*h.present(), 10);
        assert_eq!(h.past(), &[5]);
    }

    #[test]
    fn test_untracked_leaves_stacks_alone() {
        let mut h = LinearHistory::new(0, 10);
        h.set(1);
        h.undo();
        h.end_turn();
        h.set_untracked(7);
        assert_eq!(*h.present(), 7);
        assert_eq!(h.past().len(), 0);
        assert_eq!(h.future().len(), 1);
    }

    #[test]
    fn test_undo_redo_order() {
        let mut h = LinearHistory::new("a", 10);
        h.set("b");
        h.set("c");

        assert!(h.undo());
        assert!(h.undo());
        assert_eq!(*h.present(), "a");
        assert_eq!(h.future().iter().copied().collect::<Vec<_>>(), vec!["b", "c"]);

        assert!(h.redo());
        assert_eq!(*h.present(), "b");
        assert_eq!(h.past(), &["a"]);
    }

    #[test]
    fn test_noop_when_unavailable() {
        let mut h = LinearHistory::new(1, 10);
        assert!(!h.undo());
        assert!(!h.redo());
        assert_eq!(*h.present(), 1);
        assert!(!h.is_suppressed());
    }

    #[test]
    fn test_set_during_suppression_is_not_recorded() {
        let mut h = LinearHistory::new(0, 10);
        h.set(1);
        h.undo();

        // Side effect fired in the same turn as the undo.
        h.set(42);
        assert_eq!(*h.present(), 42);
        assert!(h.past().is_empty());
        assert!(h.can_redo());

        h.end_turn();
        h.set(43);
        assert_eq!(h.past(), &[42]);
        assert!(!h.can_redo());
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut h = LinearHistory::new(0, 3);
        for i in 1..=5 {
            h.set(i);
        }
        assert_eq!(h.past(), &[2, 3, 4]);
    }

    #[test]
    fn test_reset_and_clear() {
        let mut h = LinearHistory::new(0, 10);
        h.set(1);
        h.set(2);
        h.undo();
        h.end_turn();

        h.clear();
        assert_eq!(*h.present(), 1);
        assert!(!h.can_undo() && !h.can_redo());

        h.set(5);
        h.reset(100);
        assert_eq!(*h.present(), 100);
        assert!(!h.can_undo());
    }
}
