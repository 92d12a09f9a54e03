use super::{RelayError, RoomRegistry};
use crate::status_messages::{new_status, Status};
use either::{Either, Left, Right};
use rocket::response::status::{BadRequest, NotFound};
use rocket::response::stream::{Event, EventStream};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::tokio::select;
use rocket::tokio::sync::broadcast::error::RecvError;
use rocket::Shutdown;
use rocket_okapi::{openapi, JsonSchema};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct JoinRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct JoinResponse {
    pub id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct LeaveRequest {
    pub id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct StateMessage {
    pub from: u64,
    pub snap: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct DiceMessage {
    pub from: u64,
    pub die: u32,
    pub value: u32,
}

fn relay_failure(e: RelayError) -> Either<NotFound<Json<Status>>, BadRequest<Json<Status>>> {
    match e {
        RelayError::UnknownRoom => Left(NotFound(new_status(e.to_string()))),
        RelayError::NotAMember => Right(BadRequest(new_status(e.to_string()))),
    }
}

/// Join a room, creating it on first use. The returned id identifies this
/// connection in presence, state and dice messages.
#[openapi]
#[post("/rooms/<code>/join", format = "json", data = "<join>")]
pub async fn join_room(
    code: String,
    join: Json<JoinRequest>,
    registry: &rocket::State<Arc<RoomRegistry>>,
) -> Json<JoinResponse> {
    let id = registry.join(&code, &join.name);
    Json(JoinResponse { id })
}

#[openapi]
#[post("/rooms/<code>/leave", format = "json", data = "<leave>")]
pub async fn leave_room(
    code: String,
    leave: Json<LeaveRequest>,
    registry: &rocket::State<Arc<RoomRegistry>>,
) -> Result<Json<Status>, Either<NotFound<Json<Status>>, BadRequest<Json<Status>>>> {
    registry
        .leave(&code, leave.id)
        .map_err(relay_failure)
        .map(|()| new_status(format!("Left room {}", code)))
}

/// Relay a snapshot to the room. The payload is forwarded verbatim;
/// members receiving their own `from` id ignore the message.
#[openapi]
#[post("/rooms/<code>/state", format = "json", data = "<message>")]
pub async fn post_state(
    code: String,
    message: Json<StateMessage>,
    registry: &rocket::State<Arc<RoomRegistry>>,
) -> Result<Json<Status>, Either<NotFound<Json<Status>>, BadRequest<Json<Status>>>> {
    let message = message.0;
    registry
        .state(&code, message.from, message.snap)
        .map_err(relay_failure)
        .map(|()| new_status("Relayed".to_string()))
}

/// Relay a die roll to the room, attaching the sender's display name.
#[openapi]
#[post("/rooms/<code>/dice", format = "json", data = "<message>")]
pub async fn post_dice(
    code: String,
    message: Json<DiceMessage>,
    registry: &rocket::State<Arc<RoomRegistry>>,
) -> Result<Json<Status>, Either<NotFound<Json<Status>>, BadRequest<Json<Status>>>> {
    registry
        .dice(&code, message.from, message.die, message.value)
        .map_err(relay_failure)
        .map(|()| new_status("Rolled".to_string()))
}

/// A member's live feed for a room, as server-sent events. The member's
/// own state messages are suppressed; lagged messages are silently
/// skipped (the next full snapshot supersedes them anyway).
#[get("/rooms/<code>/events?<conn>")]
pub fn room_events(
    code: String,
    conn: u64,
    registry: &rocket::State<Arc<RoomRegistry>>,
    mut end: Shutdown,
) -> EventStream![] {
    let mut rx = registry.subscribe(&code);
    EventStream! {
        loop {
            let event = select! {
                msg = rx.recv() => match msg {
                    Ok(ev) => ev,
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                },
                _ = &mut end => break,
            };
            if !event.is_echo_of(conn) {
                yield Event::json(&event);
            }
        }
    }
}
