// History panel: undo/redo buttons plus a clickable list of entries.
// Clicking a row jumps straight to that point in history.

use chrono::{DateTime, Utc};
use tessera_core::format_relative;
use tessera_history::{EntryId, HistoryControls};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Undo,
    Redo,
    JumpTo(EntryId),
}

// One line of the history list
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub id: EntryId,
    pub label: String,
    pub objects: String,
    pub when: String,
    pub is_current: bool,
    // Undone entries that a redo or jump can still reach
    pub is_future: bool,
}

// Rows in chronological order
pub fn history_rows(controls: &dyn HistoryControls, now: DateTime<Utc>) -> Vec<HistoryRow> {
    let current = controls.current_index();
    controls
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| HistoryRow {
            id: entry.id,
            label: entry.action_name.clone(),
            objects: entry.affected_object_names.join(", "),
            when: format_relative(entry.timestamp, now),
            is_current: current == Some(i),
            is_future: current.map_or(true, |c| i > c),
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct HistoryPanel;

impl HistoryPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        controls: &dyn HistoryControls,
    ) -> Option<PanelAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            if ui
                .add_enabled(controls.can_undo(), egui::Button::new("Undo"))
                .on_hover_text("Ctrl+Z")
                .clicked()
            {
                action = Some(PanelAction::Undo);
            }
            if ui
                .add_enabled(controls.can_redo(), egui::Button::new("Redo"))
                .on_hover_text("Ctrl+Shift+Z")
                .clicked()
            {
                action = Some(PanelAction::Redo);
            }
        });
        ui.separator();

        let rows = history_rows(controls, Utc::now());
        if rows.is_empty() {
            ui.weak("No history yet");
            return action;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            // Newest at the top
            for row in rows.iter().rev() {
                let text = format!("{}  -  {}", row.label, row.when);
                let text = if row.is_future {
                    egui::RichText::new(text).weak()
                } else {
                    egui::RichText::new(text)
                };

                let response = ui.selectable_label(row.is_current, text);
                let response = if row.objects.is_empty() {
                    response
                } else {
                    response.on_hover_text(row.objects.as_str())
                };
                if response.clicked() {
                    action = Some(PanelAction::JumpTo(row.id));
                }
            }
        });

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{ActionType, ObjectSnapshot};
    use tessera_history::{DetachedHistory, EditorHistory};

    #[test]
    fn test_rows_mark_current_and_future() {
        let mut history = EditorHistory::default();
        let a = ObjectSnapshot::new("a", "Logo");
        history.push_entry(ActionType::Create, vec![a.clone()], vec![], None);
        history.push_entry(ActionType::Move, vec![a.clone().at(1.0, 1.0)], vec![a], None);
        history.undo();

        let rows = history_rows(&history, Utc::now());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "Create");
        assert_eq!(rows[0].objects, "Logo");
        assert_eq!(rows[0].when, "just now");
        assert!(rows[0].is_current && !rows[0].is_future);
        assert!(!rows[1].is_current && rows[1].is_future);
    }

    #[test]
    fn test_detached_has_no_rows() {
        assert!(history_rows(&DetachedHistory, Utc::now()).is_empty());
    }
}
