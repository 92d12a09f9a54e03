use super::SnapshotStore;
use crate::status_messages::{new_status, Status};
use rocket::serde::json::Json;
use rocket_okapi::openapi;
use std::sync::Arc;

/// Latest stored document for a room; an empty document is created when
/// none exists yet (late joiners start from it).
#[openapi]
#[get("/rooms/<code>/state")]
pub async fn get_room_state(
    code: String,
    snapshots: &rocket::State<Arc<SnapshotStore>>,
) -> Json<serde_json::Value> {
    Json(snapshots.load(&code))
}

/// Persist the full snapshot for a room, replacing the previous value.
#[openapi]
#[put("/rooms/<code>/state", format = "json", data = "<snap>")]
pub async fn put_room_state(
    code: String,
    snap: Json<serde_json::Value>,
    snapshots: &rocket::State<Arc<SnapshotStore>>,
) -> Json<Status> {
    snapshots.save(&code, snap.0);
    new_status(format!("Saved snapshot for room {}", code))
}
