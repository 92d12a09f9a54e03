//! Realtime relay: rooms keyed by join code, fanning presence, state and
//! dice messages out to every member. The channel is deliberately
//! unreliable (no ordering or delivery guarantee, lagging receivers drop
//! messages) and state payloads are relayed verbatim. Echo suppression is
//! by sender id: a member's own state messages are filtered from its feed.

pub mod endpoints;

use rocket::serde::{Deserialize, Serialize};
use rocket::tokio::sync::broadcast;
use rocket_okapi::JsonSchema;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Per-room fan-out buffer; slow consumers past this lag lose messages.
const ROOM_CHANNEL_CAPACITY: usize = 64;

/// One message on a room's feed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", tag = "type", rename_all = "lowercase")]
pub enum RelayEvent {
    Join { id: u64, name: String },
    Leave { id: u64, name: String },
    State { from: u64, snap: Value },
    Dice { name: String, die: u32, value: u32 },
}

impl RelayEvent {
    /// True when this is the connection's own state message bounced back.
    pub fn is_echo_of(&self, conn: u64) -> bool {
        matches!(self, RelayEvent::State { from, .. } if *from == conn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayError {
    UnknownRoom,
    NotAMember,
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::UnknownRoom => write!(f, "no such room"),
            RelayError::NotAMember => write!(f, "sender is not a room member"),
        }
    }
}

#[derive(Debug)]
struct Room {
    members: HashMap<u64, String>,
    tx: broadcast::Sender<RelayEvent>,
}

impl Room {
    fn new() -> Self {
        let (tx, _rx) = broadcast::channel(ROOM_CHANNEL_CAPACITY);
        Room {
            members: HashMap::new(),
            tx,
        }
    }
}

/// Registry of live rooms. Rooms appear on first join/subscribe and are
/// dropped when the last member leaves.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: Mutex<HashMap<String, Room>>,
    next_conn: AtomicU64,
}

impl RoomRegistry {
    pub fn new() -> Self {
        RoomRegistry::default()
    }

    fn lock_rooms(&self) -> std::sync::MutexGuard<'_, HashMap<String, Room>> {
        match self.rooms.lock() {
            Ok(g) => g,
            Err(e) => e.into_inner(),
        }
    }

    /// Add a connection to a room (creating it as needed) and broadcast
    /// the presence event. Returns the new connection id.
    pub fn join(&self, code: &str, name: &str) -> u64 {
        let id = self.next_conn.fetch_add(1, Ordering::SeqCst) + 1;
        let mut rooms = self.lock_rooms();
        let room = rooms.entry(code.to_string()).or_insert_with(Room::new);
        room.members.insert(id, name.to_string());
        let _ = room.tx.send(RelayEvent::Join {
            id,
            name: name.to_string(),
        });
        id
    }

    /// Remove a connection, broadcast the departure, and drop the room if
    /// it is now empty.
    pub fn leave(&self, code: &str, id: u64) -> Result<(), RelayError> {
        let mut rooms = self.lock_rooms();
        let room = rooms.get_mut(code).ok_or(RelayError::UnknownRoom)?;
        let name = room.members.remove(&id).ok_or(RelayError::NotAMember)?;
        let _ = room.tx.send(RelayEvent::Leave { id, name });
        if room.members.is_empty() {
            rooms.remove(code);
        }
        Ok(())
    }

    /// Relay a sender's snapshot verbatim to the room. Delivery is
    /// best-effort; a room with no listeners swallows the message.
    pub fn state(&self, code: &str, from: u64, snap: Value) -> Result<(), RelayError> {
        let rooms = self.lock_rooms();
        let room = rooms.get(code).ok_or(RelayError::UnknownRoom)?;
        if !room.members.contains_key(&from) {
            return Err(RelayError::NotAMember);
        }
        let _ = room.tx.send(RelayEvent::State { from, snap });
        Ok(())
    }

    /// Relay a die roll to the room with the sender's display name attached.
    pub fn dice(&self, code: &str, from: u64, die: u32, value: u32) -> Result<(), RelayError> {
        let rooms = self.lock_rooms();
        let room = rooms.get(code).ok_or(RelayError::UnknownRoom)?;
        let name = room
            .members
            .get(&from)
            .cloned()
            .ok_or(RelayError::NotAMember)?;
        let _ = room.tx.send(RelayEvent::Dice { name, die, value });
        Ok(())
    }

    /// Subscribe to a room's feed (creating the room as needed). Only
    /// messages sent after this call are received.
    pub fn subscribe(&self, code: &str) -> broadcast::Receiver<RelayEvent> {
        let mut rooms = self.lock_rooms();
        rooms
            .entry(code.to_string())
            .or_insert_with(Room::new)
            .tx
            .subscribe()
    }

    pub fn member_count(&self, code: &str) -> usize {
        self.lock_rooms()
            .get(code)
            .map(|r| r.members.len())
            .unwrap_or(0)
    }

    pub fn member_name(&self, code: &str, id: u64) -> Option<String> {
        self.lock_rooms()
            .get(code)
            .and_then(|r| r.members.get(&id).cloned())
    }
}
