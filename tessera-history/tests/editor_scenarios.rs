use tessera_core::{ActionType, ObjectId, ObjectSnapshot};
use tessera_history::{EditorHistory, EntryId, HistoryConfig, PushOutcome};

fn rect(x: f32, y: f32) -> ObjectSnapshot {
    ObjectSnapshot::new("a", "Rectangle").at(x, y)
}

fn recorded(outcome: PushOutcome) -> EntryId {
    match outcome {
        PushOutcome::Recorded(id) => id,
        other => panic!("expected a recorded entry, got {:?}", other),
    }
}

fn three_moves(history: &mut EditorHistory) -> [EntryId; 3] {
    let mut ids = Vec::new();
    for i in 0..3 {
        let x = i as f32;
        ids.push(recorded(history.push_entry(
            ActionType::Move,
            vec![rect(x + 1.0, 0.0)],
            vec![rect(x, 0.0)],
            None,
        )));
    }
    [ids[0], ids[1], ids[2]]
}

#[test]
fn undo_then_redo_restores_state() {
    let mut history = EditorHistory::default();
    three_moves(&mut history);
    let before = history.state();

    history.undo().unwrap();
    history.redo().unwrap();

    assert_eq!(history.state(), before);
}

#[test]
fn new_edit_prunes_future() {
    let mut history = EditorHistory::default();
    let [_, _, e2] = three_moves(&mut history);

    history.undo();
    assert!(history.can_redo());
    history.push_entry(ActionType::Rotate, vec![rect(0.0, 0.0)], vec![rect(0.0, 0.0)], None);

    assert!(!history.can_redo());
    assert!(history.jump_to(&e2).is_empty());
    assert_eq!(history.entries().len(), 3);
}

#[test]
fn cap_keeps_most_recent_fifty() {
    let mut history = EditorHistory::new(&HistoryConfig::default());
    let ids: Vec<EntryId> = (0..51)
        .map(|i| {
            recorded(history.push_entry(
                ActionType::Move,
                vec![rect(i as f32 + 1.0, 0.0)],
                vec![rect(i as f32, 0.0)],
                None,
            ))
        })
        .collect();

    assert_eq!(history.entries().len(), 50);
    assert_eq!(history.entries()[0].id, ids[1]);
    assert_eq!(history.current_index(), Some(49));
    assert!(history.jump_to(&ids[0]).is_empty());
}

#[test]
fn batch_is_atomic() {
    let mut history = EditorHistory::default();
    let a = ObjectSnapshot::new("a", "A");
    let b = ObjectSnapshot::new("b", "B");

    history.start_batch();
    history.push_entry(ActionType::Move, vec![a.clone().at(1.0, 1.0)], vec![a], None);
    history.push_entry(ActionType::Move, vec![b.clone().at(2.0, 2.0)], vec![b], None);
    let id = history.end_batch(Some("multi")).unwrap();

    assert_eq!(history.entries().len(), 1);
    let entry = &history.entries()[0];
    assert_eq!(entry.id, id);
    assert_eq!(entry.action_type, ActionType::Batch);
    assert_eq!(entry.action_name, "multi");
    assert_eq!(
        entry.affected_object_ids,
        vec![ObjectId::from("a"), ObjectId::from("b")]
    );
}

#[test]
fn jump_backward_returns_most_recent_first() {
    let mut history = EditorHistory::default();
    let [e0, e1, e2] = three_moves(&mut history);

    let plan = history.jump_to(&e0);
    let undo: Vec<EntryId> = plan.entries_to_undo.iter().map(|e| e.id).collect();
    assert_eq!(undo, vec![e2, e1]);
    assert!(plan.entries_to_redo.is_empty());
    assert_eq!(history.current_index(), Some(0));
}

#[test]
fn jump_forward_returns_chronological() {
    let mut history = EditorHistory::default();
    let [e0, e1, e2] = three_moves(&mut history);
    history.jump_to(&e0);

    let plan = history.jump_to(&e2);
    let redo: Vec<EntryId> = plan.entries_to_redo.iter().map(|e| e.id).collect();
    assert_eq!(redo, vec![e1, e2]);
    assert!(plan.entries_to_undo.is_empty());
    assert_eq!(history.current_index(), Some(2));
}

#[test]
fn applying_flag_drops_pushes() {
    let mut history = EditorHistory::default();
    three_moves(&mut history);
    history.undo();
    let before = history.state();

    history.set_is_applying(true);
    let outcome = history.push_entry(ActionType::Move, vec![rect(0.0, 0.0)], vec![rect(1.0, 0.0)], None);
    history.set_is_applying(false);

    assert_eq!(outcome, PushOutcome::Suppressed);
    assert_eq!(history.state(), before);
}

#[test]
fn undo_redo_on_empty_are_noops() {
    let mut history = EditorHistory::default();
    assert!(history.undo().is_none());
    assert!(history.redo().is_none());
    assert_eq!(history.current_index(), None);
    assert!(history.entries().is_empty());

    three_moves(&mut history);
    let caught_up = history.state();
    assert!(history.redo().is_none());
    assert_eq!(history.state(), caught_up);
}

/// Create A, move it, batch a resize + rotate, then undo twice.
#[test]
fn create_move_batch_then_undo_twice() {
    let mut history = EditorHistory::default();
    let created = rect(0.0, 0.0);
    history.push_entry(ActionType::Create, vec![created.clone()], vec![], None);

    let moved = rect(10.0, 10.0);
    history.push_entry(ActionType::Move, vec![moved.clone()], vec![created.clone()], None);

    let mut resized = moved.clone();
    resized.width = 240.0;
    resized.height = 80.0;
    let mut rotated = resized.clone();
    rotated.rotation = 45.0;

    history.start_batch();
    history.push_entry(ActionType::Resize, vec![resized.clone()], vec![moved.clone()], None);
    history.push_entry(ActionType::Rotate, vec![rotated.clone()], vec![resized.clone()], None);
    history.end_batch(None);
    assert_eq!(history.entries().len(), 3);

    let batch = history.undo().unwrap();
    assert_eq!(batch.action_type, ActionType::Batch);
    assert_eq!(batch.snapshot, vec![rotated]);

    let undo_move = history.undo().unwrap();
    let restored = &undo_move.undo_plan().upserts[0];
    assert_eq!((restored.x, restored.y), (0.0, 0.0));
    assert_eq!((restored.width, restored.height), (created.width, created.height));
    assert_eq!(restored.rotation, created.rotation);

    assert!(history.can_redo());
    assert!(history.redo().is_some());
    assert!(history.can_redo());
}
