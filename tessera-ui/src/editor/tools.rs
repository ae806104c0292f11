// Transform tools for the scene editor.
// A tool changes one object; the session records the change in history.

use tessera_core::{ActionType, ObjectSnapshot};
use tracing::trace;

pub trait Tool {
    fn apply(&self, object: &mut ObjectSnapshot);

    fn name(&self) -> &str;

    // Which history action this tool records
    fn action(&self) -> ActionType;

    // Extra text for the history label, e.g. "left" in "Align (left)"
    fn detail(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub dx: f32,
    pub dy: f32,
}

impl Tool for Move {
    fn apply(&self, object: &mut ObjectSnapshot) {
        trace!("Moving {} by ({}, {})", object.id, self.dx, self.dy);
        object.x += self.dx;
        object.y += self.dy;
    }

    fn name(&self) -> &str {
        "Move"
    }

    fn action(&self) -> ActionType {
        ActionType::Move
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Resize {
    pub width: f32,
    pub height: f32,
}

impl Tool for Resize {
    fn apply(&self, object: &mut ObjectSnapshot) {
        trace!("Resizing {} to {}x{}", object.id, self.width, self.height);
        object.width = self.width.max(0.0);
        object.height = self.height.max(0.0);
    }

    fn name(&self) -> &str {
        "Resize"
    }

    fn action(&self) -> ActionType {
        ActionType::Resize
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rotate {
    pub degrees: f32,
}

impl Tool for Rotate {
    fn apply(&self, object: &mut ObjectSnapshot) {
        object.rotation = (object.rotation + self.degrees).rem_euclid(360.0);
        trace!("Rotated {} to {} degrees", object.id, object.rotation);
    }

    fn name(&self) -> &str {
        "Rotate"
    }

    fn action(&self) -> ActionType {
        ActionType::Rotate
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Tool for Scale {
    fn apply(&self, object: &mut ObjectSnapshot) {
        object.scale_x = self.x;
        object.scale_y = self.y;
    }

    fn name(&self) -> &str {
        "Scale"
    }

    fn action(&self) -> ActionType {
        ActionType::Scale
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SetOpacity(pub f32);

impl Tool for SetOpacity {
    fn apply(&self, object: &mut ObjectSnapshot) {
        object.opacity = self.0.clamp(0.0, 1.0);
    }

    fn name(&self) -> &str {
        "Opacity"
    }

    fn action(&self) -> ActionType {
        ActionType::Opacity
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SetVisibility(pub bool);

impl Tool for SetVisibility {
    fn apply(&self, object: &mut ObjectSnapshot) {
        object.visible = self.0;
    }

    fn name(&self) -> &str {
        "Visibility"
    }

    fn action(&self) -> ActionType {
        ActionType::Visibility
    }

    fn detail(&self) -> Option<&str> {
        Some(if self.0 { "show" } else { "hide" })
    }
}

#[derive(Debug, Clone)]
pub struct Rename(pub String);

impl Tool for Rename {
    fn apply(&self, object: &mut ObjectSnapshot) {
        object.name = self.0.clone();
    }

    fn name(&self) -> &str {
        "Rename"
    }

    fn action(&self) -> ActionType {
        ActionType::Property
    }

    fn detail(&self) -> Option<&str> {
        Some("name")
    }
}

// Z-order change; the session picks the target index.
#[derive(Debug, Clone, Copy)]
pub struct SetZIndex(pub i32);

impl Tool for SetZIndex {
    fn apply(&self, object: &mut ObjectSnapshot) {
        object.z_index = self.0;
    }

    fn name(&self) -> &str {
        "Z-Order"
    }

    fn action(&self) -> ActionType {
        ActionType::ZOrder
    }
}

// Align left edges to `x`; the session computes it from the selection.
#[derive(Debug, Clone, Copy)]
pub struct AlignLeft {
    pub x: f32,
}

impl Tool for AlignLeft {
    fn apply(&self, object: &mut ObjectSnapshot) {
        object.x = self.x;
    }

    fn name(&self) -> &str {
        "Align Left"
    }

    fn action(&self) -> ActionType {
        ActionType::Align
    }

    fn detail(&self) -> Option<&str> {
        Some("left")
    }
}
