//! tessera-core: shared vocabulary for the tessera editor history engine.
//!
//! Design rules:
//! - Snapshots are plain values. They never point into the live scene.
//! - The engine only describes changes; the `ObjectStore` applies them.
//! - Every type here is serializable so history and checkpoints can be saved.

pub mod action;
pub mod snapshot;
pub mod store;
pub mod time;

pub use action::{action_name, ActionType};
pub use snapshot::{ObjectId, ObjectSnapshot};
pub use store::{ObjectStore, StoreError};
pub use time::format_relative;
