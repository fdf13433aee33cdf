//! coderoom relay binary.
//!
//! - WebSocket endpoint: /v1/ws?username=...&roomId=...
//! - Room code API: /api/rooms/get-code/:room_id, /api/rooms/update-code/:room_id
//! - Ops endpoints: /healthz, /readyz, /metrics
//! - Tracing span fields per session, heartbeat ping + idle timeout

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use coderoom_relay::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("coderoom.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .relay
        .listen
        .parse()
        .expect("relay.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, "coderoom-relay starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
