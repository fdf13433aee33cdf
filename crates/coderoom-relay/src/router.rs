//! Axum router wiring (HTTP routes + WS upgrade).

use axum::{
    routing::{get, put},
    Router,
};

use crate::{api, app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/ws", get(transport::ws::ws_upgrade))
        .route("/api/rooms/get-code/:room_id", get(api::rooms::get_code))
        .route("/api/rooms/update-code/:room_id", put(api::rooms::update_code))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
