//! WebSocket handler.
//!
//! Responsibilities:
//! - Upgrade HTTP -> WS
//! - Capture `username`/`roomId` from the query string (both optional)
//! - Register presence and join the room before the first frame is read
//! - Lifecycle: ping/pong + idle timeout
//! - Cheap length check first, then decode once, then dispatch
//! - On disconnect: leave the room, then clear the identity slot, then
//!   drop the session entry

use std::sync::Arc;

use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, Query, State},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

use crate::app_state::AppState;
use crate::relay::{Connection, RelayCtx};
use crate::transport::codec::{decode, Inbound};

// --------------------
// Query parsing
// --------------------
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(rename = "roomId", default)]
    pub room_id: Option<String>,
}

/// Treat an empty or blank handshake parameter as absent.
fn normalize(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

// --------------------
// Cheap frame length helper (limit check before decode)
// --------------------
fn frame_len(msg: &Message) -> usize {
    match msg {
        Message::Text(s) => s.as_bytes().len(),
        Message::Binary(b) => b.len(),
        Message::Ping(v) => v.len(),
        Message::Pong(v) => v.len(),
        Message::Close(_) => 0,
    }
}

// --------------------
// Entry
// --------------------
pub async fn ws_upgrade(
    State(app): State<AppState>,
    ws: WebSocketUpgrade,
    Query(q): Query<WsQuery>,
) -> Response {
    ws.on_upgrade(move |socket| run_session(app, q, socket))
}

// --------------------
// Core session loop
// --------------------
async fn run_session(app: AppState, q: WsQuery, socket: WebSocket) {
    let core = app.relay();
    let dispatcher = app.dispatcher();

    let username = normalize(q.username);
    let room = normalize(q.room_id);

    // ---- attach the connection before anything can broadcast to it
    let conn_id = core.sessions.next_id();
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(app.cfg().limits.outbound_queue);
    core.sessions.insert(conn_id, Connection { tx: out_tx.clone() });

    app.metrics().ws_upgrades.inc(&[]);
    app.metrics().ws_active_sessions.inc(&[]);

    // ---- presence: latest connect wins the identity slot
    match username.as_deref() {
        Some(u) => {
            if let Some(prev) = core.registry.register(u, conn_id) {
                tracing::debug!(conn = conn_id, username = %u, displaced = prev, "identity rebound to new connection");
            }
        }
        None => {
            tracing::debug!(conn = conn_id, "no username in handshake, connection stays unregistered");
        }
    }

    // ---- room binding, fixed for the connection's lifetime
    match room.as_deref() {
        Some(r) => {
            core.rooms.join(r, conn_id);
            tracing::info!(
                conn = conn_id,
                username = username.as_deref().unwrap_or("-"),
                room = %r,
                "joined room"
            );
        }
        None => {
            tracing::info!(
                conn = conn_id,
                username = username.as_deref().unwrap_or("-"),
                "connected without a room"
            );
        }
    }

    let ctx = RelayCtx::new(conn_id, username.clone(), room.clone(), Arc::clone(&core));

    // ---- timers
    let ping_every = Duration::from_millis(app.cfg().relay.ping_interval_ms);
    let idle_timeout = Duration::from_millis(app.cfg().relay.idle_timeout_ms);
    let max_frame = app.cfg().limits.max_frame_bytes;

    let mut ping_tick = tokio::time::interval(ping_every);
    ping_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    // ---- split socket
    let (mut ws_tx, mut ws_rx) = socket.split();

    let mut last_activity = Instant::now();

    loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                match maybe_out {
                    Some(m) => {
                        if ws_tx.send(m).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }

            // inbound reader
            incoming = ws_rx.next() => {
                let Some(incoming) = incoming else { break; };
                let Ok(msg) = incoming else { break; };

                last_activity = Instant::now();

                let bytes_len = frame_len(&msg);
                if bytes_len > max_frame {
                    app.metrics().events_dropped.inc(&[("reason", "oversized")]);
                    tracing::debug!(conn = conn_id, len = bytes_len, "oversized frame dropped");
                    continue;
                }

                match decode(msg) {
                    Ok(Inbound::Event { env, .. }) => {
                        let event = env.event.clone();
                        match dispatcher.dispatch(ctx.clone(), env).await {
                            Ok(()) => {
                                app.metrics().events_dispatched.inc(&[("event", event.as_str())]);
                            }
                            Err(e) => {
                                // best-effort relay: nothing is surfaced to the sender
                                app.metrics().events_dropped.inc(&[("reason", "dispatch")]);
                                tracing::warn!(
                                    conn = conn_id,
                                    event = %event,
                                    code = e.client_code().as_str(),
                                    error = %e,
                                    "event dropped"
                                );
                            }
                        }
                    }
                    Ok(Inbound::Ping(payload)) => {
                        let _ = out_tx.send(Message::Pong(payload)).await;
                    }
                    Ok(Inbound::Pong(_)) => {}
                    Ok(Inbound::Close) => break,
                    Err(e) => {
                        app.metrics().decode_errors.inc(&[]);
                        tracing::debug!(conn = conn_id, error = %e, "undecodable frame dropped");
                    }
                }
            }

            // ping
            _ = ping_tick.tick() => {
                let _ = out_tx.send(Message::Ping(Vec::new())).await;
            }

            // idle timeout
            _ = tokio::time::sleep(Duration::from_millis(250)) => {
                if last_activity.elapsed() >= idle_timeout {
                    tracing::info!(conn = conn_id, "idle timeout, closing");
                    break;
                }
            }
        }
    }

    // Disconnect cleanup. Membership goes first so an in-flight broadcast
    // never sees this connection as a member it can no longer resolve;
    // the session entry goes last, which stops any remaining resolution.
    if let Some(r) = room.as_deref() {
        core.rooms.leave(r, conn_id);
    }
    if let Some(u) = username.as_deref() {
        core.registry.unregister(u);
    }
    core.sessions.remove(conn_id);

    app.metrics().ws_active_sessions.dec(&[]);
    tracing::info!(
        conn = conn_id,
        username = username.as_deref().unwrap_or("-"),
        "disconnected"
    );
}
