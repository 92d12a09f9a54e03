//! Debounced synchronization between the store and the outside world.
//!
//! The store is synchronous and never awaits I/O; this module owns the
//! asynchronous side effects. Change notifications feed two trailing
//! debouncers: a burst of mutations yields one relay broadcast after the
//! burst settles (~150 ms) and one durable save on a much longer window
//! (~5 s). Closing the session cancels pending timers before they fire,
//! so nothing is sent after teardown. In-flight sends are fire-and-forget;
//! failures are logged and never retried; the next change reschedules.

use crate::relay::{RelayEvent, RoomRegistry};
use crate::store::SnapshotStore;
use crate::table::snapshot;
use crate::table::types::StateChange;
use crate::table::GameState;
use log::warn;
use rocket::tokio::sync::broadcast::error::RecvError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

type SharedGameState = Arc<rocket::futures::lock::Mutex<GameState>>;

/// Coalescing windows for the two outbound channels.
#[derive(Debug, Clone, Copy)]
pub struct SyncConfig {
    pub broadcast_window: Duration,
    pub save_window: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            broadcast_window: Duration::from_millis(150),
            save_window: Duration::from_secs(5),
        }
    }
}

/// Trailing debouncer: `notify()` marks activity, the action runs once the
/// notifications stay quiet for a full window. Closing while a window is
/// pending cancels the fire.
#[derive(Clone)]
pub struct Debouncer {
    sender: Arc<Mutex<Option<Sender<()>>>>,
    handle: Arc<Mutex<Option<thread::JoinHandle<()>>>>,
}

impl Debouncer {
    pub fn new(window: Duration, action: impl Fn() + Send + 'static) -> Self {
        let (tx, rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            while rx.recv().is_ok() {
                loop {
                    match rx.recv_timeout(window) {
                        // still bursting; restart the window
                        Ok(()) => continue,
                        Err(RecvTimeoutError::Timeout) => {
                            action();
                            break;
                        }
                        // teardown: the pending fire is cancelled
                        Err(RecvTimeoutError::Disconnected) => return,
                    }
                }
            }
        });
        Debouncer {
            sender: Arc::new(Mutex::new(Some(tx))),
            handle: Arc::new(Mutex::new(Some(handle))),
        }
    }

    /// Best-effort activity mark; a closed debouncer ignores it.
    pub fn notify(&self) {
        let guard = match self.sender.lock() {
            Ok(g) => g,
            Err(e) => e.into_inner(),
        };
        if let Some(tx) = &*guard {
            let _ = tx.send(());
        }
    }

    /// Drop the sender and join the worker. A window in progress is
    /// cancelled rather than fired.
    pub fn close(&self) {
        {
            let mut guard = match self.sender.lock() {
                Ok(g) => g,
                Err(e) => e.into_inner(),
            };
            *guard = None;
        }
        let handle_opt = {
            let mut h = match self.handle.lock() {
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

/// One seat's live attachment to a room: joins on start, broadcasts
/// debounced public snapshots, saves debounced full snapshots, applies
/// inbound peer messages to the remote-seat shadows, and leaves on close.
pub struct SyncSession {
    conn: u64,
    room: String,
    registry: Arc<RoomRegistry>,
    broadcast: Debouncer,
    save: Debouncer,
    stop: Arc<AtomicBool>,
    forwarder: Option<thread::JoinHandle<()>>,
    inbound: rocket::tokio::task::JoinHandle<()>,
}

impl SyncSession {
    pub async fn start(
        gs: SharedGameState,
        registry: Arc<RoomRegistry>,
        snapshots: Arc<SnapshotStore>,
        room: &str,
        config: SyncConfig,
    ) -> SyncSession {
        let (changes, name) = {
            let mut g = gs.lock().await;
            let name = if g.name.trim().is_empty() {
                "A player".to_string()
            } else {
                g.name.clone()
            };
            (g.subscribe(), name)
        };
        let conn = registry.join(room, &name);
        let handle = rocket::tokio::runtime::Handle::current();

        let broadcast = {
            let gs = Arc::clone(&gs);
            let registry = Arc::clone(&registry);
            let room = room.to_string();
            let handle = handle.clone();
            Debouncer::new(config.broadcast_window, move || {
                let gs = Arc::clone(&gs);
                let registry = Arc::clone(&registry);
                let room = room.clone();
                handle.spawn(async move {
                    let snap = {
                        let g = gs.lock().await;
                        snapshot::public_snapshot_value(&g)
                    };
                    if let Err(e) = registry.state(&room, conn, snap) {
                        warn!("state broadcast to {} failed: {}", room, e);
                    }
                });
            })
        };

        let save = {
            let gs = Arc::clone(&gs);
            let snapshots = Arc::clone(&snapshots);
            let room = room.to_string();
            Debouncer::new(config.save_window, move || {
                let gs = Arc::clone(&gs);
                let snapshots = Arc::clone(&snapshots);
                let room = room.clone();
                handle.spawn(async move {
                    let snap = {
                        let g = gs.lock().await;
                        snapshot::snapshot_value(&g)
                    };
                    snapshots.save(&room, snap);
                });
            })
        };

        let stop = Arc::new(AtomicBool::new(false));
        let forwarder = {
            let broadcast = broadcast.clone();
            let save = save.clone();
            let stop = Arc::clone(&stop);
            thread::spawn(move || loop {
                if stop.load(Ordering::SeqCst) {
                    break;
                }
                match changes.recv_timeout(Duration::from_millis(50)) {
                    // remote-shadow updates are persisted but not
                    // re-broadcast (each seat broadcasts only its own state)
                    Ok(StateChange::Remote) => save.notify(),
                    Ok(_) => {
                        broadcast.notify();
                        save.notify();
                    }
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            })
        };

        let inbound = {
            let gs = Arc::clone(&gs);
            let mut feed = registry.subscribe(room);
            rocket::tokio::spawn(async move {
                loop {
                    match feed.recv().await {
                        Ok(RelayEvent::State { from, snap }) => {
                            // echo suppression by sender id
                            if from == conn {
                                continue;
                            }
                            let payload = snapshot::remote_seat_payload(&snap);
                            if payload.is_null() {
                                continue;
                            }
                            let mut g = gs.lock().await;
                            g.set_remote_seat(&from.to_string(), &payload);
                        }
                        Ok(RelayEvent::Leave { id, .. }) => {
                            if id != conn {
                                gs.lock().await.clear_remote_seat(&id.to_string());
                            }
                        }
                        Ok(_) => {}
                        Err(RecvError::Lagged(_)) => continue,
                        Err(RecvError::Closed) => break,
                    }
                }
            })
        };

        SyncSession {
            conn,
            room: room.to_string(),
            registry,
            broadcast,
            save,
            stop,
            forwarder: Some(forwarder),
            inbound,
        }
    }

    /// This session's connection id in the room.
    pub fn conn(&self) -> u64 {
        self.conn
    }

    /// Tear down: cancel pending debounce fires, stop the pumps, and leave
    /// the room.
    pub fn close(mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(h) = self.forwarder.take() {
            let _ = h.join();
        }
        self.broadcast.close();
        self.save.close();
        self.inbound.abort();
        if let Err(e) = self.registry.leave(&self.room, self.conn) {
            warn!("leaving room {} failed: {}", self.room, e);
        }
    }
}
