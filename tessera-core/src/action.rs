//! The closed set of action kinds a history entry can carry.

use serde::{Deserialize, Serialize};

/// What kind of edit an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionType {
    Create,
    Delete,
    Move,
    Resize,
    Rotate,
    Scale,
    Opacity,
    Visibility,
    Property,
    ZOrder,
    Align,
    Distribute,
    /// Several atomic edits committed as one step.
    Batch,
}

impl ActionType {
    /// Human label shown in the history list.
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::Create => "Create",
            ActionType::Delete => "Delete",
            ActionType::Move => "Move",
            ActionType::Resize => "Resize",
            ActionType::Rotate => "Rotate",
            ActionType::Scale => "Scale",
            ActionType::Opacity => "Opacity",
            ActionType::Visibility => "Visibility",
            ActionType::Property => "Property",
            ActionType::ZOrder => "Z-Order",
            ActionType::Align => "Align",
            ActionType::Distribute => "Distribute",
            ActionType::Batch => "Batch",
        }
    }
}

/// Build the display name for an entry, e.g. `Align (left)`.
pub fn action_name(kind: ActionType, detail: Option<&str>) -> String {
    match detail.map(str::trim) {
        Some(d) if !d.is_empty() => format!("{} ({})", kind.label(), d),
        _ => kind.label().to_string(),
    }
}
