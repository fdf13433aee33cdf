//! Wire-level contract for the relay.

pub mod event;
