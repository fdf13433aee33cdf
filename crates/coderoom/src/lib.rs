//! Top-level facade crate for coderoom.
//!
//! Re-exports core types and the relay library so users can depend on a single crate.

pub mod core {
    pub use coderoom_core::*;
}

pub mod relay {
    pub use coderoom_relay::*;
}
