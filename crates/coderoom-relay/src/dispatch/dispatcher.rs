use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use coderoom_core::error::{RelayError, Result};
use coderoom_core::protocol::event::Envelope;

use crate::relay::RelayCtx;

/// Handler for one inbound event kind (e.g. "code-update").
#[async_trait]
pub trait EventService: Send + Sync {
    fn event(&self) -> &'static str;
    async fn handle(&self, ctx: RelayCtx, env: Envelope) -> Result<()>;
}

/// Registry and dispatcher for inbound client events.
#[derive(Default)]
pub struct Dispatcher {
    services: DashMap<&'static str, Arc<dyn EventService>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
        }
    }

    pub fn register(&self, svc: Arc<dyn EventService>) {
        self.services.insert(svc.event(), svc);
    }

    pub fn registered_events(&self) -> Vec<&'static str> {
        self.services.iter().map(|e| *e.key()).collect()
    }

    pub async fn dispatch(&self, ctx: RelayCtx, env: Envelope) -> Result<()> {
        let event = env.event.as_str();
        let handler = self
            .services
            .get(event)
            .ok_or_else(|| RelayError::BadRequest(format!("unknown event: {event}")))?
            .value()
            .clone();
        handler.handle(ctx, env).await
    }
}
