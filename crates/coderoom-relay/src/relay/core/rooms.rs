use dashmap::{DashMap, DashSet};

use super::sessions::ConnId;

/// Room membership: `room_id -> members`.
///
/// A room has no existence of its own: it appears when the first member
/// joins and is pruned when the last member leaves. A connection joins at
/// most one room, fixed for its lifetime by the transport layer.
#[derive(Default)]
pub struct RoomMembership {
    rooms: DashMap<String, DashSet<ConnId>>,
}

impl RoomMembership {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Add `conn_id` to `room_id`, creating the room on first join.
    /// An empty room id never creates an entry.
    pub fn join(&self, room_id: &str, conn_id: ConnId) {
        if room_id.is_empty() {
            return;
        }
        self.rooms
            .entry(room_id.to_string())
            .or_insert_with(DashSet::new)
            .insert(conn_id);
    }

    /// Remove `conn_id` from `room_id`; an emptied room is removed.
    pub fn leave(&self, room_id: &str, conn_id: ConnId) {
        if let Some(set) = self.rooms.get(room_id) {
            set.remove(&conn_id);
            drop(set);
            // re-checked under the shard lock so a concurrent join is kept
            self.rooms.remove_if(room_id, |_, set| set.is_empty());
        }
    }

    /// Snapshot of the current members. Taken under the shard lock and
    /// released before any delivery happens.
    pub fn members(&self, room_id: &str) -> Vec<ConnId> {
        self.rooms
            .get(room_id)
            .map(|set| set.iter().map(|m| *m.key()).collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, room_id: &str) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
