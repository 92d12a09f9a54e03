//! Durable snapshot store: the latest document per room, with optional
//! append-only file persistence. Writes are idempotent upserts; reads for
//! an unknown room create an empty document. The file is replayed on boot,
//! last record per room winning.

pub mod endpoints;

use log::warn;
use rocket::serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

/// One persisted record: a room code and the full snapshot saved for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SavedRecord {
    pub room: String,
    pub snap: Value,
}

/// Background appender for saved records. Sends are best-effort; write
/// failures are logged and dropped, the next save tries again.
#[derive(Clone, Debug)]
pub struct SnapshotWriter {
    // Shared optional sender so close() can take the sender and drop it.
    sender: Arc<Mutex<Option<Sender<SavedRecord>>>>,
    // Keep a handle to the writer thread so it doesn't get dropped
    _handle: Arc<Mutex<Option<thread::JoinHandle<()>>>>,
}

impl SnapshotWriter {
    pub fn new(path: PathBuf) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<SavedRecord>();
        let sender = Arc::new(Mutex::new(Some(tx)));
        let handle = thread::spawn(move || {
            let file = OpenOptions::new().create(true).append(true).open(&path);
            let file = match file {
                Ok(f) => f,
                Err(e) => {
                    warn!("SnapshotWriter: failed to open file {:?}: {}", path, e);
                    return;
                }
            };
            let mut writer = BufWriter::new(file);
            for record in rx {
                match serde_json::to_vec(&record) {
                    Ok(mut bytes) => {
                        bytes.push(b'\n');
                        if let Err(e) = writer.write_all(&bytes) {
                            warn!("SnapshotWriter: write_all failed: {}", e);
                        }
                        if let Err(e) = writer.flush() {
                            warn!("SnapshotWriter: flush failed: {}", e);
                        }
                    }
                    Err(e) => {
                        warn!("SnapshotWriter: serialize failed: {}", e);
                    }
                }
            }
            // rx closed, flush and exit
            let _ = writer.flush();
        });

        Ok(SnapshotWriter {
            sender,
            _handle: Arc::new(Mutex::new(Some(handle))),
        })
    }

    pub fn send(&self, record: SavedRecord) {
        // best-effort send; ignore failures (e.g., receiver dropped)
        let guard = match self.sender.lock() {
            Ok(g) => g,
            Err(e) => e.into_inner(),
        };
        if let Some(tx) = &*guard {
            let _ = tx.send(record);
        }
    }

    /// Close the writer: drop the sender and join the writer thread so
    /// pending writes are flushed.
    pub fn close(&self) {
        {
            let mut guard = match self.sender.lock() {
                Ok(g) => g,
                Err(e) => e.into_inner(),
            };
            *guard = None;
        }
        let handle_opt = {
            let mut h = match self._handle.lock() {
                Ok(g) => g,
                Err(e) => e.into_inner(),
            };
            h.take()
        };
        if let Some(h) = handle_opt {
            let _ = h.join();
        }
    }
}

/// In-memory latest-per-room map with optional file persistence.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    rooms: Mutex<HashMap<String, Value>>,
    writer: Option<SnapshotWriter>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        SnapshotStore::default()
    }

    /// A store backed by an append-only record file: existing records are
    /// replayed (last per room wins) and future saves are appended.
    pub fn with_file(path: PathBuf) -> Self {
        let rooms = match load_records(&path) {
            Ok(map) => map,
            Err(e) => {
                warn!("SnapshotStore: could not replay {:?}: {}", path, e);
                HashMap::new()
            }
        };
        let writer = match SnapshotWriter::new(path) {
            Ok(w) => Some(w),
            Err(e) => {
                warn!("SnapshotStore: persistence disabled: {}", e);
                None
            }
        };
        SnapshotStore {
            rooms: Mutex::new(rooms),
            writer,
        }
    }

    /// Latest document for a room. An unknown room gets an empty document
    /// created for it.
    pub fn load(&self, room: &str) -> Value {
        let mut guard = match self.rooms.lock() {
            Ok(g) => g,
            Err(e) => e.into_inner(),
        };
        guard
            .entry(room.to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()))
            .clone()
    }

    /// Idempotent upsert of the latest document for a room.
    pub fn save(&self, room: &str, snap: Value) {
        {
            let mut guard = match self.rooms.lock() {
                Ok(g) => g,
                Err(e) => e.into_inner(),
            };
            guard.insert(room.to_string(), snap.clone());
        }
        if let Some(writer) = &self.writer {
            writer.send(SavedRecord {
                room: room.to_string(),
                snap,
            });
        }
    }

    /// Flush and close the background writer, if any.
    pub fn shutdown(&self) {
        if let Some(writer) = &self.writer {
            writer.close();
        }
    }
}

fn load_records(path: &PathBuf) -> Result<HashMap<String, Value>, String> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let file = File::open(path).map_err(|e| e.to_string())?;
    let reader = BufReader::new(file);
    let mut rooms = HashMap::new();
    for line in reader.lines() {
        let line = line.map_err(|e| e.to_string())?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<SavedRecord>(&line) {
            Ok(record) => {
                rooms.insert(record.room, record.snap);
            }
            // skip unreadable records rather than losing the whole file
            Err(e) => warn!("SnapshotStore: skipping bad record: {}", e),
        }
    }
    Ok(rooms)
}
