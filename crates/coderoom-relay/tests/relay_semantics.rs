//! Relay core semantics: registry, membership, and broadcast fan-out.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::extract::ws::Message;
use serde_json::json;
use tokio::sync::mpsc;

use coderoom_relay::relay::{ConnId, Connection, Outgoing, RelayCore};

/// Attach a fake connection backed by a bounded channel, the same shape the
/// real transport uses.
fn attach(core: &RelayCore) -> (ConnId, mpsc::Receiver<Message>) {
    let conn_id = core.sessions.next_id();
    let (tx, rx) = mpsc::channel(16);
    core.sessions.insert(conn_id, Connection { tx });
    (conn_id, rx)
}

fn payload() -> Outgoing {
    Outgoing::json(json!({
        "event": "update-code",
        "data": { "roomId": "r1", "code": "x" }
    }))
}

fn drain(rx: &mut mpsc::Receiver<Message>) -> Vec<Message> {
    let mut got = Vec::new();
    while let Ok(m) = rx.try_recv() {
        got.push(m);
    }
    got
}

#[test]
fn registry_latest_register_wins() {
    let core = RelayCore::new();
    core.registry.register("alice", 1);
    core.registry.register("alice", 2);
    assert_eq!(core.registry.lookup("alice"), Some(2));

    core.registry.unregister("alice");
    assert_eq!(core.registry.lookup("alice"), None);

    // unregistering an absent identity is a no-op, not an error
    core.registry.unregister("alice");
    assert_eq!(core.registry.lookup("alice"), None);
}

#[test]
fn register_reports_the_displaced_connection() {
    let core = RelayCore::new();
    assert_eq!(core.registry.register("bob", 7), None);
    assert_eq!(core.registry.register("bob", 9), Some(7));
    assert_eq!(core.registry.lookup("bob"), Some(9));
}

#[test]
fn empty_room_id_creates_nothing() {
    let core = RelayCore::new();
    core.rooms.join("", 1);
    assert_eq!(core.rooms.room_count(), 0);
    assert!(core.rooms.members("").is_empty());
}

#[test]
fn emptied_room_is_pruned() {
    let core = RelayCore::new();
    core.rooms.join("r1", 1);
    core.rooms.join("r1", 2);
    core.rooms.leave("r1", 1);
    assert!(core.rooms.contains("r1"));
    core.rooms.leave("r1", 2);
    assert!(!core.rooms.contains("r1"));
    assert_eq!(core.rooms.room_count(), 0);
}

#[test]
fn leaving_an_unknown_room_is_a_noop() {
    let core = RelayCore::new();
    core.rooms.leave("ghost", 1);
    assert_eq!(core.rooms.room_count(), 0);
}

#[tokio::test]
async fn broadcast_excludes_sender_and_delivers_once() {
    let core = RelayCore::new();
    let (a, mut rx_a) = attach(&core);
    let (b, mut rx_b) = attach(&core);
    let (c, mut rx_c) = attach(&core);
    for id in [a, b, c] {
        core.rooms.join("r1", id);
    }

    let queued = core.publish_room("r1", a, &payload()).unwrap();
    assert_eq!(queued, 2);
    assert!(drain(&mut rx_a).is_empty());
    assert_eq!(drain(&mut rx_b).len(), 1);
    assert_eq!(drain(&mut rx_c).len(), 1);
}

#[tokio::test]
async fn broadcast_to_unknown_room_is_a_noop() {
    let core = RelayCore::new();
    let (a, mut rx_a) = attach(&core);
    core.rooms.join("r1", a);

    let queued = core.publish_room("nowhere", a, &payload()).unwrap();
    assert_eq!(queued, 0);
    assert!(drain(&mut rx_a).is_empty());
}

#[tokio::test]
async fn departed_connection_receives_nothing() {
    let core = RelayCore::new();
    let (a, _rx_a) = attach(&core);
    let (b, mut rx_b) = attach(&core);
    core.rooms.join("r1", a);
    core.rooms.join("r1", b);

    // disconnect cleanup order: membership, then registry, then session
    core.rooms.leave("r1", b);
    core.registry.unregister("bob");
    core.sessions.remove(b);

    let queued = core.publish_room("r1", a, &payload()).unwrap();
    assert_eq!(queued, 0);
    assert!(drain(&mut rx_b).is_empty());
}

#[tokio::test]
async fn stale_member_entry_is_never_delivered_to() {
    // Even if a member id lingers in the room set, a connection gone from
    // the session table is unreachable.
    let core = RelayCore::new();
    let (a, _rx_a) = attach(&core);
    let (b, mut rx_b) = attach(&core);
    core.rooms.join("r1", a);
    core.rooms.join("r1", b);
    core.sessions.remove(b);

    let queued = core.publish_room("r1", a, &payload()).unwrap();
    assert_eq!(queued, 0);
    assert!(drain(&mut rx_b).is_empty());
}

#[tokio::test]
async fn full_outbound_queue_loses_that_copy() {
    let core = RelayCore::new();
    let (a, _rx_a) = attach(&core);
    let slow = core.sessions.next_id();
    let (tx, mut rx_slow) = mpsc::channel(1);
    core.sessions.insert(slow, Connection { tx });
    core.rooms.join("r1", a);
    core.rooms.join("r1", slow);

    assert_eq!(core.publish_room("r1", a, &payload()).unwrap(), 1);
    // the queue is now full; the second copy is dropped, not awaited
    assert_eq!(core.publish_room("r1", a, &payload()).unwrap(), 0);
    assert_eq!(drain(&mut rx_slow).len(), 1);
}

#[tokio::test]
async fn sender_outside_the_room_reaches_all_members() {
    // publish_room excludes by conn id only; a sender that never joined
    // simply matches nobody in the member set.
    let core = RelayCore::new();
    let (outsider, _rx_o) = attach(&core);
    let (m, mut rx_m) = attach(&core);
    core.rooms.join("r1", m);

    let queued = core.publish_room("r1", outsider, &payload()).unwrap();
    assert_eq!(queued, 1);
    assert_eq!(drain(&mut rx_m).len(), 1);
}
