use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use coderoom_core::error::Result;
use coderoom_core::protocol::event::{self, Envelope};

use crate::dispatch::EventService;
use crate::relay::{Outgoing, RelayCtx};

/// Relays `code-update` edits to the rest of the sender's room.
///
/// Editing is advisory realtime sync, not a guaranteed-delivery channel: a
/// connection without a room binding gets its updates dropped, never an
/// error back.
#[derive(Default)]
pub struct CodeSyncService;

impl CodeSyncService {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct CodeUpdate {
    #[serde(rename = "roomId", default)]
    room_id: Option<String>,
    code: Value,
}

#[async_trait]
impl EventService for CodeSyncService {
    fn event(&self) -> &'static str {
        event::CODE_UPDATE
    }

    async fn handle(&self, ctx: RelayCtx, env: Envelope) -> Result<()> {
        let Some(raw) = env.data.as_ref() else {
            tracing::debug!(conn = ctx.conn_id(), "code-update without data, dropping");
            return Ok(());
        };
        let update: CodeUpdate = match serde_json::from_str(raw.get()) {
            Ok(u) => u,
            Err(e) => {
                tracing::debug!(conn = ctx.conn_id(), error = %e, "malformed code-update, dropping");
                return Ok(());
            }
        };

        // The connection's own binding decides where the edit goes; the
        // payload's roomId only rides along for the recipients.
        let Some(room) = ctx.room() else {
            tracing::debug!(
                conn = ctx.conn_id(),
                username = ctx.identity().unwrap_or("-"),
                "code-update from roomless connection, dropping"
            );
            return Ok(());
        };

        let out = Outgoing::json(json!({
            "event": event::UPDATE_CODE,
            "data": {
                "roomId": update.room_id.as_deref().unwrap_or(room),
                "code": update.code,
            }
        }));
        ctx.publish_room(room, &out)?;
        Ok(())
    }
}
