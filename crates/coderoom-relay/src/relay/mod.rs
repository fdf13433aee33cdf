//! Relay runtime for the coderoom gateway.
//!
//! Session table, presence registry, room membership, and the broadcast
//! engine shared across services.

pub mod core;
pub mod types;

pub use self::core::{
    ConnId, Connection, ConnectionRegistry, RelayCore, RelayCtx, RoomMembership, SessionTable,
};
pub use types::{Outgoing, PreparedMsg};
