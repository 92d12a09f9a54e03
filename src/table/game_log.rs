use super::types::{now_millis, LogEntry};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Maximum number of retained log entries; the oldest is evicted beyond it.
pub const LOG_CAPACITY: usize = 100;

/// Bounded append-only activity log. Entries are produced as a side effect
/// of zone-changing mutations plus the explicit append/clear operations.
#[derive(Debug)]
pub struct GameLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    seq: AtomicU64,
    capacity: usize,
}

impl Clone for GameLog {
    fn clone(&self) -> Self {
        // snapshot existing entries and seq
        let entries_vec = match self.entries.lock() {
            Ok(g) => g.clone(),
            Err(e) => e.into_inner().clone(),
        };
        let log = GameLog::with_capacity(self.capacity);
        match log.entries.lock() {
            Ok(mut g) => *g = entries_vec,
            Err(e) => *e.into_inner() = entries_vec,
        }
        log.seq.store(self.seq.load(Ordering::SeqCst), Ordering::SeqCst);
        log
    }
}

impl Default for GameLog {
    fn default() -> Self {
        GameLog::new()
    }
}

impl GameLog {
    pub fn new() -> Self {
        GameLog::with_capacity(LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        GameLog {
            entries: Arc::new(Mutex::new(Vec::new())),
            seq: AtomicU64::new(0),
            capacity,
        }
    }

    /// Append a message, assigning an incrementing sequence number and a
    /// millis timestamp. Evicts the oldest entry once capacity is exceeded.
    pub fn append(&self, message: impl Into<String>) -> LogEntry {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let entry = LogEntry {
            seq,
            timestamp: format!("{}", now_millis()),
            message: message.into(),
        };
        match self.entries.lock() {
            Ok(mut g) => {
                g.push(entry.clone());
                if g.len() > self.capacity {
                    let overflow = g.len() - self.capacity;
                    g.drain(0..overflow);
                }
            }
            Err(e) => e.into_inner().push(entry.clone()),
        }
        entry
    }

    /// Cloned snapshot of the retained entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(g) => g.clone(),
            Err(e) => e.into_inner().clone(),
        }
    }

    pub fn clear(&self) {
        match self.entries.lock() {
            Ok(mut g) => g.clear(),
            Err(e) => e.into_inner().clear(),
        }
    }

    /// Replace the retained entries wholesale (hydration path). The sequence
    /// counter continues past the highest restored seq.
    pub fn restore(&self, entries: Vec<LogEntry>) {
        let max_seq = entries.iter().map(|e| e.seq).max().unwrap_or(0);
        match self.entries.lock() {
            Ok(mut g) => *g = entries,
            Err(e) => *e.into_inner() = entries,
        }
        let cur = self.seq.load(Ordering::SeqCst);
        if cur < max_seq {
            self.seq.store(max_seq, Ordering::SeqCst);
        }
    }

    pub fn len(&self) -> usize {
        match self.entries.lock() {
            Ok(g) => g.len(),
            Err(e) => e.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
