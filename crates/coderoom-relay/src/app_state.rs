//! Shared application state for the coderoom relay.
//!
//! Everything here is owned by the service process and injected where it is
//! needed (no globals), so tests can build as many isolated instances as
//! they want.

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::dispatch::Dispatcher;
use crate::obs::metrics::RelayMetrics;
use crate::relay::RelayCore;
use crate::services::{ChatService, CodeSyncService};
use crate::storage::{CodeStore, MemoryCodeStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: RelayConfig,
    relay: Arc<RelayCore>,
    dispatcher: Arc<Dispatcher>,
    store: Arc<dyn CodeStore>,
    metrics: Arc<RelayMetrics>,
}

impl AppState {
    /// Build process-owned state: relay core, dispatcher with the built-in
    /// services, code store, and metrics registry.
    pub fn new(cfg: RelayConfig) -> Self {
        let dispatcher = Dispatcher::new();
        dispatcher.register(Arc::new(CodeSyncService::new()));
        dispatcher.register(Arc::new(ChatService::new()));

        tracing::info!(events = ?dispatcher.registered_events(), "relay services registered");

        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                relay: Arc::new(RelayCore::new()),
                dispatcher: Arc::new(dispatcher),
                store: Arc::new(MemoryCodeStore::new()),
                metrics: Arc::new(RelayMetrics::default()),
            }),
        }
    }

    pub fn cfg(&self) -> &RelayConfig {
        &self.inner.cfg
    }

    pub fn relay(&self) -> Arc<RelayCore> {
        Arc::clone(&self.inner.relay)
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.inner.dispatcher)
    }

    pub fn store(&self) -> &dyn CodeStore {
        self.inner.store.as_ref()
    }

    pub fn metrics(&self) -> &RelayMetrics {
        self.inner.metrics.as_ref()
    }
}
