//! History configuration.
//!
//! Every field has a serde default, so a config file only needs the keys it changes.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default cap for structured history entries and the audit log.
pub const DEFAULT_MAX_ENTRIES: usize = 50;

/// Default cap for named checkpoints.
pub const DEFAULT_MAX_CHECKPOINTS: usize = 20;

/// How a batch merges several buffered edits that touch the same object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchCoalescing {
    /// The last buffered occurrence of an object wins in both the before and after lists.
    /// Undoing the batch restores the object to its state just before its final change.
    #[default]
    LastWins,
    /// After-state: last occurrence wins. Before-state: first occurrence wins.
    /// Undoing the batch restores the object to its state before the batch began.
    FirstPreviousWins,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Structured editor history entries kept before the oldest is evicted.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Depth of the `past` stack in a generic linear history.
    #[serde(default = "default_max_entries")]
    pub max_linear_depth: usize,

    /// Object-level audit log length.
    #[serde(default = "default_max_entries")]
    pub max_audit_entries: usize,

    #[serde(default = "default_max_checkpoints")]
    pub max_checkpoints: usize,

    #[serde(default)]
    pub batch_coalescing: BatchCoalescing,
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_max_checkpoints() -> usize {
    DEFAULT_MAX_CHECKPOINTS
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_linear_depth: DEFAULT_MAX_ENTRIES,
            max_audit_entries: DEFAULT_MAX_ENTRIES,
            max_checkpoints: DEFAULT_MAX_CHECKPOINTS,
            batch_coalescing: BatchCoalescing::LastWins,
        }
    }
}

impl HistoryConfig {
    /// Reject caps of zero: a history that can hold nothing cannot undo anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let caps = [
            ("max_entries", self.max_entries),
            ("max_linear_depth", self.max_linear_depth),
            ("max_audit_entries", self.max_audit_entries),
            ("max_checkpoints", self.max_checkpoints),
        ];

        for (name, value) in caps {
            if value == 0 {
                tracing::error!(field = name, "history capacity must be at least 1");
                return Err(ConfigError::ZeroCapacity {
                    field: name.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be at least 1")]
    ZeroCapacity { field: String },
}

/// Load and validate a JSON config file.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<HistoryConfig> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read history config: {}", path.display()))?;
    let config: HistoryConfig =
        serde_json::from_str(&data).context("parse history config json")?;
    config
        .validate()
        .with_context(|| format!("validate history config: {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?config, "loaded history config");
    Ok(config)
}
