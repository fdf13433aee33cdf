//! Client event envelope (JSON).
//!
//! The envelope stores `data` as `RawValue` so each service parses its own
//! payload lazily.

use serde::Deserialize;
use serde_json::value::RawValue;

/// Inbound: a client edited the shared buffer.
pub const CODE_UPDATE: &str = "code-update";
/// Inbound: a client sent a chat line.
pub const SEND_MESSAGE: &str = "send-message";
/// Outbound: an edit rebroadcast to the rest of the room.
pub const UPDATE_CODE: &str = "update-code";
/// Outbound: a chat line rebroadcast to the rest of the room.
pub const RECEIVE_MESSAGE: &str = "receive-message";

/// One client frame: `{ "event": "...", "data": { ... } }`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    /// Event name (e.g., "code-update").
    pub event: String,
    /// Optional payload, stored as raw JSON (lazy parsing).
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
}
