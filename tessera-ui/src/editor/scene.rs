// The live scene for the tessera editor.
// Holds the objects the user edits and acts as the object store for undo/redo.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tessera_core::{ObjectId, ObjectSnapshot, ObjectStore, StoreError};
use tracing::{debug, info, trace, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    objects: BTreeMap<ObjectId, ObjectSnapshot>,
}

impl Scene {
    pub fn new() -> Self {
        info!("Creating empty scene");
        Self::default()
    }

    // Insert or replace an object
    pub fn insert(&mut self, object: ObjectSnapshot) {
        trace!("Inserting object {}", object.id);
        self.objects.insert(object.id.clone(), object);
    }

    pub fn get(&self, id: &ObjectId) -> Option<&ObjectSnapshot> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut ObjectSnapshot> {
        self.objects.get_mut(id)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    // Objects in paint order (lowest z-index first)
    pub fn objects(&self) -> Vec<&ObjectSnapshot> {
        let mut objects: Vec<&ObjectSnapshot> = self.objects.values().collect();
        objects.sort_by_key(|o| o.z_index);
        objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn max_z_index(&self) -> i32 {
        self.objects.values().map(|o| o.z_index).max().unwrap_or(0)
    }

    // Full copy of the scene, e.g. for a named checkpoint
    pub fn snapshot_all(&self) -> Vec<ObjectSnapshot> {
        self.objects.values().cloned().collect()
    }
}

impl ObjectStore for Scene {
    fn snapshot(&self, id: &ObjectId) -> Option<ObjectSnapshot> {
        self.objects.get(id).cloned()
    }

    // Snapshots restore the lock flag too, so locked objects are overwritten here.
    fn apply_snapshots(&mut self, snapshots: &[ObjectSnapshot]) -> Result<(), StoreError> {
        debug!("Applying {} snapshots to scene", snapshots.len());
        for snapshot in snapshots {
            self.objects.insert(snapshot.id.clone(), snapshot.clone());
        }
        Ok(())
    }

    fn remove_objects(&mut self, ids: &[ObjectId]) -> Result<(), StoreError> {
        if let Some(missing) = ids.iter().find(|id| !self.objects.contains_key(*id)) {
            warn!("Attempted to remove unknown object {}", missing);
            return Err(StoreError::UnknownObject {
                id: missing.clone(),
            });
        }

        for id in ids {
            self.objects.remove(id);
        }
        debug!("Removed {} objects from scene", ids.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_recreates_missing_objects() {
        let mut scene = Scene::new();
        let a = ObjectSnapshot::new("a", "A").at(3.0, 4.0);
        scene.apply_snapshots(&[a.clone()]).unwrap();
        assert_eq!(scene.snapshot(&"a".into()), Some(a));
    }

    #[test]
    fn test_remove_unknown_fails_without_partial_removal() {
        let mut scene = Scene::new();
        scene.insert(ObjectSnapshot::new("a", "A"));

        let result = scene.remove_objects(&["a".into(), "ghost".into()]);
        assert_eq!(
            result,
            Err(StoreError::UnknownObject { id: "ghost".into() })
        );
        assert!(scene.contains(&"a".into()));
    }

    #[test]
    fn test_apply_overwrites_locked_objects() {
        let mut scene = Scene::new();
        let mut locked = ObjectSnapshot::new("a", "A");
        locked.locked = true;
        scene.insert(locked);

        let unlocked = ObjectSnapshot::new("a", "A").at(9.0, 9.0);
        scene.apply_snapshots(&[unlocked.clone()]).unwrap();
        assert_eq!(scene.get(&"a".into()), Some(&unlocked));
    }

    #[test]
    fn test_objects_in_paint_order() {
        let mut scene = Scene::new();
        scene.insert(ObjectSnapshot::new("top", "Top").with_z_index(5));
        scene.insert(ObjectSnapshot::new("bottom", "Bottom").with_z_index(-1));

        let order: Vec<&str> = scene.objects().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(order, vec!["bottom", "top"]);
        assert_eq!(scene.max_z_index(), 5);
    }
}
