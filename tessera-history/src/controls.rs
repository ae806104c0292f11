//! Capability handed to UI panels that drive history.
//!
//! Panels take `&mut dyn HistoryControls` instead of reaching for a shared
//! instance. When no document is loaded they get `DetachedHistory`.

use crate::editor::{EditorHistory, JumpPlan};
use crate::entry::{EntryId, HistoryEntry};

pub trait HistoryControls {
    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;
    fn undo(&mut self) -> Option<HistoryEntry>;
    fn redo(&mut self) -> Option<HistoryEntry>;
    fn jump_to(&mut self, target: &EntryId) -> JumpPlan;
    fn entries(&self) -> &[HistoryEntry];
    fn current_index(&self) -> Option<usize>;
}

impl HistoryControls for EditorHistory {
    fn can_undo(&self) -> bool {
        EditorHistory::can_undo(self)
    }

    fn can_redo(&self) -> bool {
        EditorHistory::can_redo(self)
    }

    fn undo(&mut self) -> Option<HistoryEntry> {
        EditorHistory::undo(self)
    }

    fn redo(&mut self) -> Option<HistoryEntry> {
        EditorHistory::redo(self)
    }

    fn jump_to(&mut self, target: &EntryId) -> JumpPlan {
        EditorHistory::jump_to(self, target)
    }

    fn entries(&self) -> &[HistoryEntry] {
        EditorHistory::entries(self)
    }

    fn current_index(&self) -> Option<usize> {
        EditorHistory::current_index(self)
    }
}

/// No document loaded: nothing to undo, every operation is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedHistory;

impl HistoryControls for DetachedHistory {
    fn can_undo(&self) -> bool {
        false
    }

    fn can_redo(&self) -> bool {
        false
    }

    fn undo(&mut self) -> Option<HistoryEntry> {
        None
    }

    fn redo(&mut self) -> Option<HistoryEntry> {
        None
    }

    fn jump_to(&mut self, _target: &EntryId) -> JumpPlan {
        JumpPlan::default()
    }

    fn entries(&self) -> &[HistoryEntry] {
        &[]
    }

    fn current_index(&self) -> Option<usize> {
        None
    }
}
