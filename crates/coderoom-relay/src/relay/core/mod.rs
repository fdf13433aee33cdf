//! Relay core components.
//!
//! Live connections, identity presence, room membership, and the fan-out
//! engine the event services publish through.

mod registry;
mod relay;
mod rooms;
mod sessions;

pub use registry::ConnectionRegistry;
pub use relay::{RelayCore, RelayCtx};
pub use rooms::RoomMembership;
pub use sessions::{ConnId, Connection, SessionTable};
