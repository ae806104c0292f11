//! Named checkpoints: full-document snapshots the user saves by name.
//!
//! Unlike the undo stack, checkpoints survive a restart. The store is bounded and
//! evicts the oldest checkpoint when full.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use tessera_core::ObjectSnapshot;

use crate::HistoryConfig;

/// File extension recommended for saved checkpoint stores.
pub const CHECKPOINT_FILE_EXT: &str = "checkpoints.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub objects: Vec<ObjectSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointStore {
    checkpoints: Vec<Checkpoint>,
    max_checkpoints: usize,
}

impl Default for CheckpointStore {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
    }
}

impl CheckpointStore {
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            checkpoints: Vec::new(),
            max_checkpoints: config.max_checkpoints.max(1),
        }
    }

    /// Save the given objects under `name`. Returns the checkpoint id.
    pub fn save(&mut self, name: impl Into<String>, objects: Vec<ObjectSnapshot>) -> Uuid {
        let checkpoint = Checkpoint {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            objects,
        };
        let id = checkpoint.id;
        tracing::info!(
            checkpoint_id = %id,
            name = %checkpoint.name,
            objects = checkpoint.objects.len(),
            "checkpoint saved"
        );

        self.checkpoints.push(checkpoint);
        while self.checkpoints.len() > self.max_checkpoints {
            let evicted = self.checkpoints.remove(0);
            tracing::debug!(checkpoint_id = %evicted.id, "evicted oldest checkpoint");
        }
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|c| c.id == id)
    }

    /// Most recent checkpoint with this name.
    pub fn find_by_name(&self, name: &str) -> Option<&Checkpoint> {
        self.checkpoints.iter().rev().find(|c| c.name == name)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Checkpoint> {
        let index = self.checkpoints.iter().position(|c| c.id == id)?;
        Some(self.checkpoints.remove(index))
    }

    /// Oldest first.
    pub fn list(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}

/// Save a checkpoint store to disk as pretty JSON.
pub fn save_checkpoints(path: impl AsRef<Path>, store: &CheckpointStore) -> anyhow::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent dir: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(store).context("serialize checkpoints to json")?;
    fs::write(path, json)
        .with_context(|| format!("write checkpoint file: {}", path.display()))?;
    Ok(())
}

/// Load a checkpoint store from disk.
pub fn load_checkpoints(path: impl AsRef<Path>) -> anyhow::Result<CheckpointStore> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read checkpoint file: {}", path.display()))?;
    let mut store: CheckpointStore =
        serde_json::from_str(&data).context("parse checkpoint json")?;
    if store.max_checkpoints == 0 {
        tracing::warn!(path = %path.display(), "checkpoint file has zero capacity, using 1");
    }
    store.max_checkpoints = store.max_checkpoints.max(1);
    Ok(store)
}
