use kala_core::{
    MemoryStorageGateway, NoteDraft, StorageGateway, WorkspaceError, WorkspaceService,
    HISTORY_STORAGE_KEY, NOTES_STORAGE_KEY,
};

fn seeded_workspace() -> WorkspaceService<MemoryStorageGateway> {
    let mut workspace = WorkspaceService::open(MemoryStorageGateway::new()).unwrap();
    workspace.save_note(NoteDraft::create("Budget", "rent 1200")).unwrap();
    workspace.save_note(NoteDraft::create("Ideas", "")).unwrap();
    workspace.evaluate_and_record("1200 * 12").unwrap();
    workspace.evaluate_and_record("100 / 3").unwrap();
    workspace
}

#[test]
fn import_of_exported_state_round_trips() {
    let source = seeded_workspace();
    let json = source.export_json().unwrap();

    let mut target = WorkspaceService::open(MemoryStorageGateway::new()).unwrap();
    let outcome = target.import_json(&json).unwrap();

    assert_eq!(outcome.notes_replaced, Some(2));
    assert_eq!(outcome.history_replaced, Some(2));
    assert_eq!(target.notes(), source.notes());
    assert_eq!(target.history(), source.history());
}

#[test]
fn export_does_not_mutate_state() {
    let workspace = seeded_workspace();
    let notes_before = workspace.notes().to_vec();

    let snapshot = workspace.export_snapshot();
    assert_eq!(snapshot.notes.len(), 2);
    assert_eq!(workspace.notes(), notes_before.as_slice());
}

#[test]
fn import_with_only_history_leaves_notes_untouched() {
    let mut workspace = seeded_workspace();
    let notes_before = workspace.notes().to_vec();

    let raw = r#"{"history": [
        {"id": "c9", "expression": "7 * 7", "result": "49", "timestamp": 1700000000000}
    ]}"#;
    let outcome = workspace.import_json(raw).unwrap();

    assert_eq!(outcome.notes_replaced, None);
    assert_eq!(outcome.history_replaced, Some(1));
    assert_eq!(workspace.notes(), notes_before.as_slice());
    assert_eq!(workspace.history().len(), 1);
    assert_eq!(workspace.history()[0].result, "49");
}

#[test]
fn malformed_import_leaves_all_state_untouched() {
    let mut workspace = seeded_workspace();
    let notes_before = workspace.notes().to_vec();
    let history_before = workspace.history().to_vec();

    let err = workspace.import_json("not json").unwrap_err();
    assert!(matches!(err, WorkspaceError::Import(_)));
    assert_eq!(workspace.notes(), notes_before.as_slice());
    assert_eq!(workspace.history(), history_before.as_slice());

    // The persisted blobs still decode to the pre-import state.
    let gateway = workspace.into_gateway();
    let notes_raw = gateway.get(NOTES_STORAGE_KEY).unwrap().unwrap();
    let history_raw = gateway.get(HISTORY_STORAGE_KEY).unwrap().unwrap();
    let notes: Vec<serde_json::Value> = serde_json::from_str(&notes_raw).unwrap();
    let history: Vec<serde_json::Value> = serde_json::from_str(&history_raw).unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(history.len(), 2);
}

#[test]
fn schema_violating_import_is_rejected_before_mutation() {
    let mut workspace = seeded_workspace();
    let notes_before = workspace.notes().to_vec();

    let raw = r#"{"notes": "this resembles nothing", "history": []}"#;
    let err = workspace.import_json(raw).unwrap_err();

    assert!(matches!(err, WorkspaceError::Import(_)));
    assert_eq!(workspace.notes(), notes_before.as_slice());
}

#[test]
fn import_clears_dangling_active_selection() {
    let mut workspace = seeded_workspace();
    let active = workspace.notes()[0].id.clone();
    workspace.set_active_note(Some(active)).unwrap();

    let raw = r#"{"notes": [
        {"id": "fresh", "title": "Restored", "content": "", "updatedAt": 1700000000000}
    ]}"#;
    workspace.import_json(raw).unwrap();

    assert!(workspace.active_note_id().is_none());
    assert_eq!(workspace.notes().len(), 1);
}

#[test]
fn imported_sections_are_persisted() {
    let mut workspace = WorkspaceService::open(MemoryStorageGateway::new()).unwrap();
    let raw = r#"{
        "notes": [{"id": "n1", "title": "t", "content": "c", "updatedAt": 1}],
        "history": [{"id": "c1", "expression": "1+1", "result": "2", "timestamp": 1}]
    }"#;
    workspace.import_json(raw).unwrap();

    let gateway = workspace.into_gateway();
    assert!(gateway.get(NOTES_STORAGE_KEY).unwrap().unwrap().contains("n1"));
    assert!(gateway
        .get(HISTORY_STORAGE_KEY)
        .unwrap()
        .unwrap()
        .contains("c1"));
}
