//! Object-level audit log.
//!
//! A lighter alternative to `EditorHistory` for call sites that only need
//! create/update/delete/reorder undo, without batching or jump.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use tessera_core::{ObjectId, ObjectSnapshot};

use crate::HistoryConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectChangeKind {
    Create,
    Update,
    Delete,
    Reorder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectHistoryEntry<D> {
    pub kind: ObjectChangeKind,
    pub object_id: ObjectId,
    pub data: D,
    pub previous_data: Option<D>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ObjectLog<D = ObjectSnapshot> {
    entries: Vec<ObjectHistoryEntry<D>>,
    index: Option<usize>,
    max_entries: usize,
}

impl<D> Default for ObjectLog<D> {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
    }
}

impl<D> ObjectLog<D> {
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            entries: Vec::new(),
            index: None,
            max_entries: config.max_audit_entries.max(1),
        }
    }

    /// Append a change, discarding anything that was undone.
    pub fn record(
        &mut self,
        kind: ObjectChangeKind,
        object_id: ObjectId,
        data: D,
        previous_data: Option<D>,
    ) {
        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);

        debug!(?kind, object_id = %object_id, "audit log record");
        self.entries.push(ObjectHistoryEntry {
            kind,
            object_id,
            data,
            previous_data,
            timestamp: Utc::now(),
        });

        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
        self.index = Some((self.entries.len() - 1).min(self.max_entries - 1));
    }

    /// The entry to revert, or `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&ObjectHistoryEntry<D>> {
        let Some(index) = self.index else {
            trace!("audit log undo with nothing recorded");
            return None;
        };
        self.index = index.checked_sub(1);
        self.entries.get(index)
    }

    /// The entry to reapply, or `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<&ObjectHistoryEntry<D>> {
        let next = self.index.map_or(0, |i| i + 1);
        if next >= self.entries.len() {
            trace!("audit log redo at end");
            return None;
        }
        self.index = Some(next);
        self.entries.get(next)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = None;
    }

    pub fn can_undo(&self) -> bool {
        self.index.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.index.map_or(0, |i| i + 1) < self.entries.len()
    }

    pub fn entries(&self) -> &[ObjectHistoryEntry<D>] {
        &self.entries
    }

    pub fn history_index(&self) -> Option<usize> {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> ObjectLog<u32> {
        ObjectLog::default()
    }

    #[test]
    fn test_record_and_undo_redo() {
        let mut log = log();
        log.record(ObjectChangeKind::Create, "a".into(), 1, None);
        log.record(ObjectChangeKind::Update, "a".into(), 2, Some(1));

        let undone = log.undo().unwrap();
        assert_eq!(undone.kind, ObjectChangeKind::Update);
        assert_eq!(undone.previous_data, Some(1));
        assert_eq!(log.history_index(), Some(0));

        assert_eq!(log.undo().unwrap().kind, ObjectChangeKind::Create);
        assert!(log.undo().is_none());
        assert_eq!(log.history_index(), None);

        assert_eq!(log.redo().unwrap().data, 1);
        assert_eq!(log.redo().unwrap().data, 2);
        assert!(log.redo().is_none());
    }

    #[test]
    fn test_record_truncates_redo() {
        let mut log = log();
        log.record(ObjectChangeKind::Create, "a".into(), 1, None);
        log.record(ObjectChangeKind::Update, "a".into(), 2, Some(1));
        log.undo();

        log.record(ObjectChangeKind::Delete, "a".into(), 1, None);
        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries()[1].kind, ObjectChangeKind::Delete);
        assert!(!log.can_redo());
    }

    #[test]
    fn test_cap() {
        let config = HistoryConfig {
            max_audit_entries: 50,
            ..HistoryConfig::default()
        };
        let mut log: ObjectLog<u32> = ObjectLog::new(&config);
        for i in 0..60 {
            log.record(ObjectChangeKind::Reorder, "a".into(), i, None);
        }
        assert_eq!(log.entries().len(), 50);
        assert_eq!(log.entries()[0].data, 10);
        assert_eq!(log.history_index(), Some(49));
    }

    #[test]
    fn test_clear() {
        let mut log = log();
        log.record(ObjectChangeKind::Create, "a".into(), 1, None);
        log.clear();
        assert!(!log.can_undo());
        assert!(log.entries().is_empty());
    }
}
