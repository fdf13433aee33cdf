use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use coderoom_core::error::Result;
use coderoom_core::protocol::event::{self, Envelope};

use crate::dispatch::EventService;
use crate::relay::{Outgoing, RelayCtx};

/// Relays chat lines to the rest of the room named in the payload.
#[derive(Default)]
pub struct ChatService;

impl ChatService {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct SendMessage {
    #[serde(rename = "roomId", default)]
    room_id: Option<String>,
    username: String,
    message: String,
}

#[async_trait]
impl EventService for ChatService {
    fn event(&self) -> &'static str {
        event::SEND_MESSAGE
    }

    async fn handle(&self, ctx: RelayCtx, env: Envelope) -> Result<()> {
        let Some(raw) = env.data.as_ref() else {
            tracing::debug!(conn = ctx.conn_id(), "send-message without data, dropping");
            return Ok(());
        };
        let msg: SendMessage = match serde_json::from_str(raw.get()) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!(conn = ctx.conn_id(), error = %e, "malformed send-message, dropping");
                return Ok(());
            }
        };

        if msg.message.trim().is_empty() {
            tracing::debug!(conn = ctx.conn_id(), username = %msg.username, "empty chat message, dropping");
            return Ok(());
        }

        let Some(room) = msg.room_id.as_deref().filter(|r| !r.is_empty()) else {
            tracing::warn!(conn = ctx.conn_id(), username = %msg.username, "send-message without roomId, dropping");
            return Ok(());
        };

        let out = Outgoing::json(json!({
            "event": event::RECEIVE_MESSAGE,
            "data": { "username": msg.username, "message": msg.message }
        }));
        ctx.publish_room(room, &out)?;
        Ok(())
    }
}
