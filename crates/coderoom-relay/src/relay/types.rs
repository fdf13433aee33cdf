use axum::extract::ws::Message;
use serde_json::Value;

use coderoom_core::error::{RelayError, Result};

/// Application-level outgoing message.
#[derive(Debug, Clone)]
pub struct Outgoing {
    pub payload: Value,
}

impl Outgoing {
    pub fn json(payload: Value) -> Self {
        Self { payload }
    }
}

/// Prepared frame cached for broadcasting (serialize once, send N times).
#[derive(Debug, Clone)]
pub struct PreparedMsg(String);

impl PreparedMsg {
    pub fn prepare(out: &Outgoing) -> Result<Self> {
        let s = serde_json::to_string(&out.payload)
            .map_err(|e| RelayError::Internal(format!("json encode failed: {e}")))?;
        Ok(PreparedMsg(s))
    }

    /// Convert to axum::ws::Message for transport.
    pub fn to_ws_message(&self) -> Message {
        Message::Text(self.0.clone())
    }
}
