//! tessera-ui: host-side glue for the tessera history engine.
//!
//! - `editor`: the live scene, transform tools, and the session that records edits
//!   and applies undo/redo/jump results.
//! - `panel`: the egui history list with undo/redo buttons.
//! - `logging`: tracing subscriber setup.

pub mod editor;
pub mod logging;
pub mod panel;

pub use editor::{EditorSession, Scene, Tool};
pub use logging::{init_tracing, DEFAULT_LOG_FILTER};
pub use panel::{history_rows, HistoryPanel, HistoryRow, PanelAction};
