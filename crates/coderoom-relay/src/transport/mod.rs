//! Transport layer: WebSocket upgrade, decode-once codec, session loop.

pub mod codec;
pub mod ws;
