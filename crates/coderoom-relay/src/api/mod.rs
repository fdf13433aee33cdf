//! HTTP API consumed by the editor outside the relay path.

pub mod rooms;
