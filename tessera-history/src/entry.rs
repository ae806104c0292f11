//! History entries: one undoable unit of work with before/after snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use tessera_core::{action_name, ActionType, ObjectId, ObjectSnapshot};

/// Process-unique entry id. UUID v7: millisecond timestamp plus random bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: EntryId,
    pub action_type: ActionType,
    pub action_name: String,
    pub timestamp: DateTime<Utc>,
    pub affected_object_ids: Vec<ObjectId>,
    pub affected_object_names: Vec<String>,

    /// State after the action.
    pub snapshot: Vec<ObjectSnapshot>,
    /// State before the action.
    pub previous_snapshot: Vec<ObjectSnapshot>,
}

impl HistoryEntry {
    /// Build an entry. `detail` is appended to the label, `name_override` replaces it.
    pub(crate) fn build(
        action_type: ActionType,
        affected: Vec<ObjectSnapshot>,
        previous: Vec<ObjectSnapshot>,
        detail: Option<&str>,
        name_override: Option<String>,
    ) -> Self {
        let affected_object_ids = affected
            .iter()
            .chain(previous.iter())
            .map(|s| s.id.clone())
            .fold(Vec::new(), |mut ids, id| {
                if !ids.contains(&id) {
                    ids.push(id);
                }
                ids
            });
        let affected_object_names = affected_object_ids
            .iter()
            .map(|id| {
                affected
                    .iter()
                    .chain(previous.iter())
                    .find(|s| &s.id == id)
                    .map(|s| s.name.clone())
                    .unwrap_or_default()
            })
            .collect();

        Self {
            id: EntryId::generate(),
            action_type,
            action_name: name_override.unwrap_or_else(|| action_name(action_type, detail)),
            timestamp: Utc::now(),
            affected_object_ids,
            affected_object_names,
            snapshot: affected,
            previous_snapshot: previous,
        }
    }

    /// What the caller writes to the live store to undo this entry.
    pub fn undo_plan(&self) -> ApplyPlan {
        ApplyPlan::between(&self.previous_snapshot, &self.snapshot)
    }

    /// What the caller writes to the live store to redo this entry.
    pub fn redo_plan(&self) -> ApplyPlan {
        ApplyPlan::between(&self.snapshot, &self.previous_snapshot)
    }
}

/// Writes needed to bring the live store to one side of an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyPlan {
    pub upserts: Vec<ObjectSnapshot>,
    /// Objects that exist on the other side but not on the target side
    /// (undoing a create, redoing a delete).
    pub removals: Vec<ObjectId>,
}

impl ApplyPlan {
    fn between(target: &[ObjectSnapshot], other: &[ObjectSnapshot]) -> Self {
        let present: HashSet<&ObjectId> = target.iter().map(|s| &s.id).collect();
        let removals = other
            .iter()
            .filter(|s| !present.contains(&s.id))
            .map(|s| s.id.clone())
            .collect();
        Self {
            upserts: target.to_vec(),
            removals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.upserts.is_empty() && self.removals.is_empty()
    }
}
