use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::sync::mpsc;

use std::sync::atomic::{AtomicU64, Ordering};

/// Connection-local identifier. Minted once per connection, never reused.
pub type ConnId = u64;

/// One connection's outbound queue sender.
#[derive(Clone)]
pub struct Connection {
    pub tx: mpsc::Sender<Message>,
}

/// Live connections: `conn_id -> Connection`.
///
/// The socket itself stays with its transport task; this table only holds
/// the sender half of each connection's outbound queue. A connection
/// removed here is unreachable for broadcast, whatever stale membership
/// entries may still name it.
#[derive(Default)]
pub struct SessionTable {
    conns: DashMap<ConnId, Connection>,
    seq: AtomicU64,
}

impl SessionTable {
    pub fn new() -> Self {
        Self {
            conns: DashMap::new(),
            seq: AtomicU64::new(1),
        }
    }

    /// Mint a fresh connection id.
    pub fn next_id(&self) -> ConnId {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    pub fn insert(&self, conn_id: ConnId, conn: Connection) {
        self.conns.insert(conn_id, conn);
    }

    pub fn remove(&self, conn_id: ConnId) -> Option<Connection> {
        self.conns.remove(&conn_id).map(|(_, conn)| conn)
    }

    pub fn get(&self, conn_id: ConnId) -> Option<Connection> {
        self.conns.get(&conn_id).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.conns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conns.is_empty()
    }
}
