//! Room code endpoints.
//!
//! The editor fetches a room's current code at startup and writes every
//! local edit back here; neither call goes anywhere near the broadcast
//! path.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateCodeReq {
    pub code: String,
}

/// `GET /api/rooms/get-code/:room_id`
///
/// A room that was never written reads as empty: rooms have no existence
/// beyond their current content and membership.
pub async fn get_code(
    State(app): State<AppState>,
    Path(room_id): Path<String>,
) -> impl IntoResponse {
    let code = app.store().get_code(&room_id).unwrap_or_default();
    Json(json!({ "iniCode": code }))
}

/// `PUT /api/rooms/update-code/:room_id`
pub async fn update_code(
    State(app): State<AppState>,
    Path(room_id): Path<String>,
    Json(req): Json<UpdateCodeReq>,
) -> impl IntoResponse {
    app.store().put_code(&room_id, req.code);
    StatusCode::NO_CONTENT
}
