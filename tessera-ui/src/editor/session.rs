// Editor session: the scene plus its undo/redo history.
// Every committed edit goes through here so it lands in history, and every
// undo/redo/jump result is written back to the scene.

use anyhow::Context;
use tessera_core::{ActionType, ObjectId, ObjectSnapshot, ObjectStore};
use tessera_history::{
    ApplyPlan, CheckpointStore, EditorHistory, EntryId, HistoryConfig, HistoryEntry, PushOutcome,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::editor::tools::{AlignLeft, SetZIndex, Tool};
use crate::editor::Scene;
use crate::panel::PanelAction;

#[derive(Debug, Clone)]
pub struct EditorSession {
    scene: Scene,
    history: EditorHistory,
    checkpoints: CheckpointStore,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            scene: Scene::new(),
            history: EditorHistory::new(config),
            checkpoints: CheckpointStore::new(config),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &EditorHistory {
        &self.history
    }

    pub fn checkpoints(&self) -> &CheckpointStore {
        &self.checkpoints
    }

    // Load a different document: replace the scene and forget history
    pub fn load_scene(&mut self, scene: Scene) {
        info!("Loading scene with {} objects", scene.len());
        self.scene = scene;
        self.history.clear();
    }

    // Creating over an existing id replaces that object, so it is recorded as a
    // property change with the old object as the before-state.
    pub fn create_object(&mut self, object: ObjectSnapshot) -> PushOutcome {
        if let Some(existing) = self.scene.snapshot(&object.id) {
            warn!("Object {} already exists, replacing it", object.id);
            self.scene.insert(object.clone());
            return self.history.push_entry(
                ActionType::Property,
                vec![object],
                vec![existing],
                Some("replace"),
            );
        }

        debug!("Creating object {}", object.id);
        self.scene.insert(object.clone());
        self.history
            .push_entry(ActionType::Create, vec![object], vec![], None)
    }

    // Edits that bypass history, e.g. changes pulled from a remote copy
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn delete_objects(&mut self, ids: &[ObjectId]) -> anyhow::Result<Option<PushOutcome>> {
        let previous = self.scene.snapshots(ids);
        if previous.is_empty() {
            return Ok(None);
        }

        let existing: Vec<ObjectId> = previous.iter().map(|o| o.id.clone()).collect();
        self.scene
            .remove_objects(&existing)
            .context("remove deleted objects")?;
        Ok(Some(self.history.push_entry(
            ActionType::Delete,
            vec![],
            previous,
            None,
        )))
    }

    /// Apply `tool` to every unlocked object in `ids` and record the change.
    /// Returns `None` when nothing changed.
    pub fn apply_tool(&mut self, tool: &dyn Tool, ids: &[ObjectId]) -> Option<PushOutcome> {
        let mut previous = Vec::new();
        let mut affected = Vec::new();

        for id in ids {
            let Some(object) = self.scene.get_mut(id) else {
                warn!("{} skipped unknown object {}", tool.name(), id);
                continue;
            };
            if object.locked {
                debug!("{} skipped locked object {}", tool.name(), id);
                continue;
            }

            let before = object.clone();
            tool.apply(object);
            if *object != before {
                affected.push(object.clone());
                previous.push(before);
            }
        }

        if affected.is_empty() {
            return None;
        }
        Some(
            self.history
                .push_entry(tool.action(), affected, previous, tool.detail()),
        )
    }

    pub fn bring_to_front(&mut self, ids: &[ObjectId]) -> Option<PushOutcome> {
        let top = self.scene.max_z_index() + 1;
        self.apply_tool(&SetZIndex(top), ids)
    }

    pub fn align_left(&mut self, ids: &[ObjectId]) -> Option<PushOutcome> {
        let left = ids
            .iter()
            .filter_map(|id| self.scene.get(id))
            .map(|o| o.x)
            .reduce(f32::min)?;
        self.apply_tool(&AlignLeft { x: left }, ids)
    }

    // Drags and multi-step edits undo as one step
    pub fn begin_gesture(&mut self) {
        self.history.start_batch();
    }

    pub fn end_gesture(&mut self, name: Option<&str>) -> Option<EntryId> {
        self.history.end_batch(name)
    }

    // On failure the scene and the history pointer are both left as they were.
    pub fn undo(&mut self) -> anyhow::Result<Option<HistoryEntry>> {
        let Some(entry) = self.history.undo() else {
            return Ok(None);
        };
        if let Err(err) = self.apply_plans(vec![entry.undo_plan()]) {
            self.history.redo();
            return Err(err.context(format!("undo {}", entry.action_name)));
        }
        Ok(Some(entry))
    }

    pub fn redo(&mut self) -> anyhow::Result<Option<HistoryEntry>> {
        let Some(entry) = self.history.redo() else {
            return Ok(None);
        };
        if let Err(err) = self.apply_plans(vec![entry.redo_plan()]) {
            self.history.undo();
            return Err(err.context(format!("redo {}", entry.action_name)));
        }
        Ok(Some(entry))
    }

    // Returns how many entries were applied
    pub fn jump_to(&mut self, target: &EntryId) -> anyhow::Result<usize> {
        let plan = self.history.jump_to(target);
        let plans: Vec<ApplyPlan> = plan
            .entries_to_undo
            .iter()
            .map(HistoryEntry::undo_plan)
            .chain(plan.entries_to_redo.iter().map(HistoryEntry::redo_plan))
            .collect();
        let count = plans.len();

        if let Err(err) = self.apply_plans(plans) {
            // Step the pointer back over everything the jump passed.
            for _ in 0..plan.entries_to_undo.len() {
                self.history.redo();
            }
            for _ in 0..plan.entries_to_redo.len() {
                self.history.undo();
            }
            return Err(err.context(format!("jump to {}", target)));
        }
        Ok(count)
    }

    pub fn handle(&mut self, action: PanelAction) -> anyhow::Result<()> {
        match action {
            PanelAction::Undo => {
                self.undo()?;
            }
            PanelAction::Redo => {
                self.redo()?;
            }
            PanelAction::JumpTo(id) => {
                self.jump_to(&id)?;
            }
        }
        Ok(())
    }

    pub fn save_checkpoint(&mut self, name: &str) -> Uuid {
        self.checkpoints.save(name, self.scene.snapshot_all())
    }

    /// Replace the scene with a checkpoint. Recorded as one undoable step.
    pub fn restore_checkpoint(&mut self, id: Uuid) -> anyhow::Result<Option<PushOutcome>> {
        let Some(checkpoint) = self.checkpoints.get(id).cloned() else {
            warn!("Unknown checkpoint {}", id);
            return Ok(None);
        };

        let previous = self.scene.snapshot_all();
        let stale: Vec<ObjectId> = previous
            .iter()
            .filter(|o| !checkpoint.objects.iter().any(|c| c.id == o.id))
            .map(|o| o.id.clone())
            .collect();

        self.scene
            .apply_snapshots(&checkpoint.objects)
            .context("apply checkpoint objects")?;
        self.scene
            .remove_objects(&stale)
            .context("remove objects missing from checkpoint")?;

        info!("Restored checkpoint '{}'", checkpoint.name);
        let detail = format!("restore {}", checkpoint.name);
        Ok(Some(self.history.push_entry(
            ActionType::Batch,
            checkpoint.objects,
            previous,
            Some(&detail),
        )))
    }

    // All or nothing: plans are applied to a copy that replaces the scene only on success.
    fn apply_plans(&mut self, plans: Vec<ApplyPlan>) -> anyhow::Result<()> {
        self.history.set_is_applying(true);
        let mut staged = self.scene.clone();
        let result = plans.iter().try_for_each(|plan| {
            staged.apply_snapshots(&plan.upserts)?;
            staged.remove_objects(&plan.removals)
        });
        self.history.set_is_applying(false);

        result.context("apply history to scene")?;
        self.scene = staged;
        Ok(())
    }
}
