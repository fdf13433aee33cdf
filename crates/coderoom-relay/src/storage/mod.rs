//! Room code persistence seam.
//!
//! The relay itself never reads these blobs: the editor fetches a room's
//! current code once at startup and persists every local edit through the
//! HTTP API, independent of the broadcast path.

use dashmap::DashMap;

/// Store for each room's current code blob.
pub trait CodeStore: Send + Sync {
    /// Current blob for the room, if anything was ever written.
    fn get_code(&self, room_id: &str) -> Option<String>;
    /// Replace the room's blob.
    fn put_code(&self, room_id: &str, code: String);
}

/// Process-local store. Contents live and die with the process.
#[derive(Default)]
pub struct MemoryCodeStore {
    blobs: DashMap<String, String>,
}

impl MemoryCodeStore {
    pub fn new() -> Self {
        Self {
            blobs: DashMap::new(),
        }
    }
}

impl CodeStore for MemoryCodeStore {
    fn get_code(&self, room_id: &str) -> Option<String> {
        self.blobs.get(room_id).map(|r| r.value().clone())
    }

    fn put_code(&self, room_id: &str, code: String) {
        self.blobs.insert(room_id.to_string(), code);
    }
}
