//! tessera-history: undo/redo history engine for the tessera scene editor.
//!
//! Design rules:
//! - The engine never mutates the live scene. It records snapshots and hands them
//!   back; callers apply them through `tessera_core::ObjectStore`.
//! - Every operation is total. Undo with nothing to undo, an unknown jump target or
//!   an unmatched `end_batch` are no-ops, never errors.
//! - History is bounded. The oldest entry is evicted once the cap is exceeded.
//! - There is no undo tree. A new edit after an undo discards the redo branch.
//!
//! Three containers, from most general to most specialized:
//! - [`LinearHistory`]: past/present/future over any value.
//! - [`EditorHistory`]: tagged entries with batching and non-linear jump.
//! - [`ObjectLog`]: a plain per-object change log with its own pointer.

pub mod audit;
pub mod checkpoint;
pub mod config;
pub mod controls;
pub mod editor;
pub mod entry;
pub mod linear;

pub use audit::{ObjectChangeKind, ObjectHistoryEntry, ObjectLog};
pub use checkpoint::{
    load_checkpoints, save_checkpoints, Checkpoint, CheckpointStore, CHECKPOINT_FILE_EXT,
};
pub use config::{
    load_config, BatchCoalescing, ConfigError, HistoryConfig, DEFAULT_MAX_CHECKPOINTS,
    DEFAULT_MAX_ENTRIES,
};
pub use controls::{DetachedHistory, HistoryControls};
pub use editor::{EditorHistory, EditorHistoryState, JumpPlan, PushOutcome};
pub use entry::{ApplyPlan, EntryId, HistoryEntry};
pub use linear::LinearHistory;
