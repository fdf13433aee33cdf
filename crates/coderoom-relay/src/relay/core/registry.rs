use dashmap::DashMap;

use super::sessions::ConnId;

/// Presence registry: `identity -> conn_id`, one slot per identity.
///
/// Registering an identity that is already present overwrites the slot
/// (latest connect wins); the displaced connection stays open and simply
/// stops being resolvable here. Unregister is unconditional: a disconnect
/// always clears its identity slot, even if a newer connection has taken
/// it over in the meantime.
#[derive(Default)]
pub struct ConnectionRegistry {
    by_identity: DashMap<String, ConnId>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            by_identity: DashMap::new(),
        }
    }

    /// Insert or overwrite. Returns the displaced conn id, if any.
    pub fn register(&self, identity: &str, conn_id: ConnId) -> Option<ConnId> {
        self.by_identity.insert(identity.to_string(), conn_id)
    }

    /// Remove the slot if present. Absence is a normal outcome.
    pub fn unregister(&self, identity: &str) -> Option<ConnId> {
        self.by_identity.remove(identity).map(|(_, id)| id)
    }

    pub fn lookup(&self, identity: &str) -> Option<ConnId> {
        self.by_identity.get(identity).map(|r| *r.value())
    }

    pub fn len(&self) -> usize {
        self.by_identity.len()
    }
}
