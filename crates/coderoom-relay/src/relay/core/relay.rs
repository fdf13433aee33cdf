use std::sync::Arc;

use coderoom_core::error::Result;

use crate::relay::core::sessions::{ConnId, Connection};
use crate::relay::core::{ConnectionRegistry, RoomMembership, SessionTable};
use crate::relay::types::{Outgoing, PreparedMsg};

/// RelayCore: shared relay state plus the room fan-out engine.
///
/// One instance is owned by the service process and injected everywhere it
/// is needed; tests build isolated instances of their own.
pub struct RelayCore {
    pub sessions: SessionTable,
    pub registry: ConnectionRegistry,
    pub rooms: RoomMembership,
}

impl RelayCore {
    pub fn new() -> Self {
        Self {
            sessions: SessionTable::new(),
            registry: ConnectionRegistry::new(),
            rooms: RoomMembership::new(),
        }
    }

    /// Resolve an identity to its live connection. Returns nothing once
    /// either the identity slot or the session entry is gone.
    pub fn lookup_identity(&self, identity: &str) -> Option<Connection> {
        self.registry
            .lookup(identity)
            .and_then(|conn_id| self.sessions.get(conn_id))
    }

    /// Fan a payload out to every member of `room` except `sender`.
    ///
    /// The member list is a snapshot; each recipient is re-resolved through
    /// the session table at send time, so a connection that has finished
    /// its disconnect cleanup is skipped. Delivery is `try_send` into each
    /// recipient's bounded outbound queue: a full queue loses that copy
    /// rather than stalling the room. An unknown or empty room is a logged
    /// no-op. Returns the number of queued deliveries.
    pub fn publish_room(&self, room: &str, sender: ConnId, out: &Outgoing) -> Result<usize> {
        let prepared = PreparedMsg::prepare(out)?;
        let members = self.rooms.members(room);
        if members.is_empty() {
            tracing::debug!(%room, "broadcast to unknown or empty room, dropping");
            return Ok(0);
        }

        let mut queued = 0;
        for member in members {
            if member == sender {
                continue;
            }
            if let Some(conn) = self.sessions.get(member) {
                if conn.tx.try_send(prepared.to_ws_message()).is_ok() {
                    queued += 1;
                }
            }
        }
        Ok(queued)
    }
}

impl Default for RelayCore {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-connection view handed to event services.
#[derive(Clone)]
pub struct RelayCtx {
    conn_id: ConnId,
    identity: Option<Arc<str>>,
    room: Option<Arc<str>>,
    core: Arc<RelayCore>,
}

impl RelayCtx {
    pub fn new(
        conn_id: ConnId,
        identity: Option<String>,
        room: Option<String>,
        core: Arc<RelayCore>,
    ) -> Self {
        Self {
            conn_id,
            identity: identity.map(Arc::<str>::from),
            room: room.map(Arc::<str>::from),
            core,
        }
    }

    pub fn conn_id(&self) -> ConnId {
        self.conn_id
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Room bound at connect time; fixed for the connection's lifetime.
    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    pub fn core(&self) -> &RelayCore {
        &self.core
    }

    pub fn publish_room(&self, room: &str, out: &Outgoing) -> Result<usize> {
        self.core.publish_room(room, self.conn_id, out)
    }
}
