use cardtable::store::SnapshotStore;
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

fn scratch_file(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "cardtable-{}-{}.jsonl",
        tag,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn unknown_room_creates_an_empty_document() {
    let store = SnapshotStore::new();
    let doc = store.load("fresh-room");
    assert_eq!(doc, json!({}));
    // the created document is stable across reads
    assert_eq!(store.load("fresh-room"), json!({}));
}

#[test]
fn save_is_an_idempotent_upsert() {
    let store = SnapshotStore::new();
    store.save("r", json!({ "life": 40 }));
    store.save("r", json!({ "life": 38 }));
    assert_eq!(store.load("r")["life"], json!(38));
}

#[test]
fn records_replay_with_last_per_room_winning() {
    let path = scratch_file("replay");
    {
        let store = SnapshotStore::with_file(path.clone());
        store.save("room1", json!({ "v": 1 }));
        store.save("room1", json!({ "v": 2 }));
        store.save("room2", json!({ "v": 9 }));
        store.shutdown();
    }

    let reopened = SnapshotStore::with_file(path.clone());
    assert_eq!(reopened.load("room1")["v"], json!(2));
    assert_eq!(reopened.load("room2")["v"], json!(9));
    reopened.shutdown();
    let _ = std::fs::remove_file(&path);
}

#[test]
fn unreadable_records_are_skipped_not_fatal() {
    let path = scratch_file("badrec");
    {
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, r#"{{ "room": "good", "snap": {{ "life": 31 }} }}"#).unwrap();
        writeln!(f, "this line is not json").unwrap();
        writeln!(f, r#"{{ "wrong": "shape" }}"#).unwrap();
    }

    let store = SnapshotStore::with_file(path.clone());
    assert_eq!(store.load("good")["life"], json!(31));
    store.shutdown();
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_starts_empty() {
    let path = scratch_file("absent");
    let store = SnapshotStore::with_file(path.clone());
    assert_eq!(store.load("anything"), json!({}));
    store.shutdown();
    let _ = std::fs::remove_file(&path);
}
