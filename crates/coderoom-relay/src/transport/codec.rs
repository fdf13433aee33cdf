//! Decode-once codec for the transport layer.
//!
//! - Text frames => event Envelope (lazy `RawValue` for data)
//! - Ping/Pong/Close are surfaced for lifecycle management
//! - Binary frames are not part of the protocol and fail decode

use axum::extract::ws::Message;
use coderoom_core::{
    error::{RelayError, Result},
    protocol::event::Envelope,
};

#[derive(Debug)]
pub enum Inbound {
    Event { env: Envelope, bytes_len: usize },
    Ping(Vec<u8>),
    Pong(Vec<u8>),
    Close,
}

pub fn decode(msg: Message) -> Result<Inbound> {
    match msg {
        Message::Text(s) => {
            let bytes_len = s.as_bytes().len();
            let env: Envelope = serde_json::from_str(&s)
                .map_err(|e| RelayError::BadRequest(format!("invalid envelope json: {e}")))?;
            Ok(Inbound::Event { env, bytes_len })
        }
        Message::Binary(_) => Err(RelayError::BadRequest(
            "binary frames are not part of the protocol".into(),
        )),
        Message::Ping(v) => Ok(Inbound::Ping(v)),
        Message::Pong(v) => Ok(Inbound::Pong(v)),
        Message::Close(_) => Ok(Inbound::Close),
    }
}
