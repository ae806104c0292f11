//! Structured editor history.
//!
//! The primary undo/redo surface for the visual editor. Entries are tagged with an
//! action kind and carry before/after snapshots of the objects they touched.
//! Undo, redo and jump only move a pointer and hand entries back to the caller;
//! applying snapshots to the live scene is the caller's job.
//!
//! `current` is `None` before the first recorded action and `Some(len - 1)` when
//! fully caught up.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace, warn};

use tessera_core::{ActionType, ObjectId, ObjectSnapshot};

use crate::config::{BatchCoalescing, HistoryConfig};
use crate::entry::{EntryId, HistoryEntry};

/// Result of `push_entry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// A new entry was appended.
    Recorded(EntryId),
    /// A batch is open; the edit was buffered.
    Batched,
    /// History is being applied; the edit was dropped.
    Suppressed,
}

/// Entries to apply for a non-linear jump. At most one list is non-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JumpPlan {
    /// Most recent first. Apply each entry's `previous_snapshot` in order.
    pub entries_to_undo: Vec<HistoryEntry>,
    /// Chronological. Apply each entry's `snapshot` in order.
    pub entries_to_redo: Vec<HistoryEntry>,
}

impl JumpPlan {
    pub fn is_empty(&self) -> bool {
        self.entries_to_undo.is_empty() && self.entries_to_redo.is_empty()
    }
}

/// Serializable view of the history, using `-1` for "before the first action".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorHistoryState {
    pub entries: Vec<HistoryEntry>,
    pub current_index: isize,
}

impl EditorHistoryState {
    pub fn can_undo(&self) -> bool {
        self.current_index >= 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index < self.entries.len() as isize - 1
    }
}

#[derive(Debug, Clone)]
struct PendingEdit {
    action_type: ActionType,
    affected: Vec<ObjectSnapshot>,
    previous: Vec<ObjectSnapshot>,
    detail: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EditorHistory {
    entries: Vec<HistoryEntry>,
    current: Option<usize>,
    batch: Option<Vec<PendingEdit>>,
    applying: bool,
    max_entries: usize,
    coalescing: BatchCoalescing,
}

impl Default for EditorHistory {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
    }
}

impl EditorHistory {
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            entries: Vec::new(),
            current: None,
            batch: None,
            applying: false,
            max_entries: config.max_entries.max(1),
            coalescing: config.batch_coalescing,
        }
    }

    /// Rebuild a history from a saved state. An out-of-range index is clamped.
    pub fn from_state(state: EditorHistoryState, config: &HistoryConfig) -> Self {
        let mut history = Self::new(config);
        let mut entries = state.entries;
        let overflow = entries.len().saturating_sub(history.max_entries);
        entries.drain(..overflow);

        let index = state.current_index - overflow as isize;
        history.current = if index < 0 || entries.is_empty() {
            None
        } else {
            Some((index as usize).min(entries.len() - 1))
        };
        history.entries = entries;
        history
    }

    /// Record a committed edit.
    ///
    /// `affected` is the state after the edit, `previous` the state before it.
    pub fn push_entry(
        &mut self,
        action_type: ActionType,
        affected: Vec<ObjectSnapshot>,
        previous: Vec<ObjectSnapshot>,
        detail: Option<&str>,
    ) -> PushOutcome {
        if self.applying {
            trace!(?action_type, "dropping edit while applying history");
            return PushOutcome::Suppressed;
        }

        if let Some(batch) = self.batch.as_mut() {
            trace!(?action_type, buffered = batch.len() + 1, "buffering edit in batch");
            batch.push(PendingEdit {
                action_type,
                affected,
                previous,
                detail: detail.map(str::to_string),
            });
            return PushOutcome::Batched;
        }

        if !covers_same_objects(action_type, &affected, &previous) {
            warn!(?action_type, "before/after snapshots cover different objects");
        }

        let entry = HistoryEntry::build(action_type, affected, previous, detail, None);
        PushOutcome::Recorded(self.commit(entry))
    }

    fn commit(&mut self, entry: HistoryEntry) -> EntryId {
        let id = entry.id;
        let keep = self.current.map_or(0, |c| c + 1);
        if keep < self.entries.len() {
            debug!(discarded = self.entries.len() - keep, "discarding redo branch");
            self.entries.truncate(keep);
        }

        debug!(entry_id = %id, name = %entry.action_name, "recorded history entry");
        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            let evicted = self.entries.remove(0);
            trace!(entry_id = %evicted.id, "evicted oldest history entry");
        }
        self.current = Some(self.entries.len() - 1);
        id
    }

    /// Start grouping pushes into one user-visible step.
    /// Calling this while a batch is open keeps the existing buffer.
    pub fn start_batch(&mut self) {
        if self.batch.is_some() {
            debug!("batch already open, continuing it");
            return;
        }
        trace!("batch started");
        self.batch = Some(Vec::new());
    }

    /// Commit the open batch as a single `Batch` entry.
    ///
    /// Returns `None` when no batch is open or nothing was buffered.
    pub fn end_batch(&mut self, name: Option<&str>) -> Option<EntryId> {
        let Some(edits) = self.batch.take() else {
            warn!("end_batch called without an open batch");
            return None;
        };
        if edits.is_empty() {
            trace!("empty batch, nothing to commit");
            return None;
        }

        let kinds: Vec<ActionType> = edits.iter().map(|e| e.action_type).collect();
        let details: Vec<&str> = edits.iter().filter_map(|e| e.detail.as_deref()).collect();
        debug!(?kinds, ?details, "committing batch");

        let count = edits.len();
        let mut after = Vec::new();
        let mut before = Vec::new();
        for edit in edits {
            for snap in edit.affected {
                upsert_by_id(&mut after, snap, true);
            }
            let replace = self.coalescing == BatchCoalescing::LastWins;
            for snap in edit.previous {
                upsert_by_id(&mut before, snap, replace);
            }
        }

        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} changes", count));
        let entry = HistoryEntry::build(ActionType::Batch, after, before, None, Some(name));
        Some(self.commit(entry))
    }

    /// Drop the open batch without committing anything.
    pub fn cancel_batch(&mut self) {
        if let Some(edits) = self.batch.take() {
            debug!(discarded = edits.len(), "batch cancelled");
        }
    }

    /// Step back one entry. The caller applies the returned entry's `previous_snapshot`.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        let current = self.current?;
        let entry = self.entries[current].clone();
        self.current = current.checked_sub(1);
        debug!(entry_id = %entry.id, index = ?self.current, "undo");
        Some(entry)
    }

    /// Step forward one entry. The caller applies the returned entry's `snapshot`.
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        let next = self.current.map_or(0, |c| c + 1);
        let entry = self.entries.get(next)?.clone();
        self.current = Some(next);
        debug!(entry_id = %entry.id, index = next, "redo");
        Some(entry)
    }

    /// Move the pointer straight to `target`, returning the entries stepped over.
    ///
    /// An unknown id (e.g. an entry just evicted by the cap) is a no-op.
    pub fn jump_to(&mut self, target: &EntryId) -> JumpPlan {
        let Some(index) = self.entries.iter().position(|e| &e.id == target) else {
            warn!(entry_id = %target, "jump target not in history");
            return JumpPlan::default();
        };

        let plan = match self.current {
            Some(current) if index == current => {
                trace!(index, "jump to current entry");
                return JumpPlan::default();
            }
            Some(current) if index < current => JumpPlan {
                entries_to_undo: self.entries[index + 1..=current]
                    .iter()
                    .rev()
                    .cloned()
                    .collect(),
                entries_to_redo: Vec::new(),
            },
            current => {
                let start = current.map_or(0, |c| c + 1);
                JumpPlan {
                    entries_to_undo: Vec::new(),
                    entries_to_redo: self.entries[start..=index].to_vec(),
                }
            }
        };

        debug!(
            from = ?self.current,
            to = index,
            undo = plan.entries_to_undo.len(),
            redo = plan.entries_to_redo.len(),
            "jump"
        );
        self.current = Some(index);
        plan
    }

    /// Set while the caller applies undo/redo/jump results to the live store.
    pub fn set_is_applying(&mut self, applying: bool) {
        self.applying = applying;
    }

    pub fn is_applying(&self) -> bool {
        self.applying
    }

    pub fn is_batching(&self) -> bool {
        self.batch.is_some()
    }

    /// Forget everything (e.g. when switching documents). An open batch is dropped too.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = None;
        self.batch = None;
        debug!("editor history cleared");
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_entry(&self) -> Option<&HistoryEntry> {
        self.current.map(|c| &self.entries[c])
    }

    pub fn can_undo(&self) -> bool {
        self.current.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.current.map_or(0, |c| c + 1) < self.entries.len()
    }

    pub fn state(&self) -> EditorHistoryState {
        EditorHistoryState {
            entries: self.entries.clone(),
            current_index: self.current.map_or(-1, |c| c as isize),
        }
    }
}

fn upsert_by_id(list: &mut Vec<ObjectSnapshot>, snap: ObjectSnapshot, replace: bool) {
    match list.iter().position(|s| s.id == snap.id) {
        Some(i) if replace => list[i] = snap,
        Some(_) => {}
        None => list.push(snap),
    }
}

fn covers_same_objects(
    action_type: ActionType,
    affected: &[ObjectSnapshot],
    previous: &[ObjectSnapshot],
) -> bool {
    // Creates have no before-state, deletes have no after-state, batches can hold both.
    if matches!(
        action_type,
        ActionType::Create | ActionType::Delete | ActionType::Batch
    ) {
        return true;
    }
    let mut after: HashSet<&ObjectId> = affected.iter().map(|s| &s.id).collect();
    previous.iter().all(|s| after.remove(&s.id)) && after.is_empty()
}
