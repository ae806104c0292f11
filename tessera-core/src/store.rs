//! Contract for the live object store.
//!
//! The history engine never talks to this trait itself. Call sites read snapshots
//! before and after a mutation, and write snapshots back when honoring undo/redo.

use thiserror::Error;

use crate::{ObjectId, ObjectSnapshot};

pub trait ObjectStore {
    /// Current state of a live object, if it exists.
    fn snapshot(&self, id: &ObjectId) -> Option<ObjectSnapshot>;

    /// Overwrite (or recreate) objects from snapshots.
    fn apply_snapshots(&mut self, snapshots: &[ObjectSnapshot]) -> Result<(), StoreError>;

    /// Remove objects. Needed to undo a create or redo a delete.
    fn remove_objects(&mut self, ids: &[ObjectId]) -> Result<(), StoreError>;

    /// Snapshot several objects at once, skipping ids that no longer exist.
    fn snapshots(&self, ids: &[ObjectId]) -> Vec<ObjectSnapshot> {
        ids.iter().filter_map(|id| self.snapshot(id)).collect()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("unknown object: {id}")]
    UnknownObject { id: ObjectId },
}
