//! Built-in relay services, registered at startup.

mod chat;
mod code_sync;

pub use chat::ChatService;
pub use code_sync::CodeSyncService;
