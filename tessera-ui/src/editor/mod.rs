// Editor module for tessera UI.

pub mod scene;
pub mod session;
pub mod tools;

pub use scene::Scene;
pub use session::EditorSession;
pub use tools::{
    AlignLeft, Move, Rename, Resize, Rotate, Scale, SetOpacity, SetVisibility, SetZIndex, Tool,
};
