//! Client envelope vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use coderoom_core::protocol::event::{self, Envelope};

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

#[test]
fn parse_event_min() {
    let s = load("event_min.json");
    let env: Envelope = serde_json::from_str(&s).unwrap();
    assert_eq!(env.event, event::CODE_UPDATE);
    assert!(env.data.is_none());
}

#[test]
fn parse_code_update() {
    let s = load("event_code_update.json");
    let env: Envelope = serde_json::from_str(&s).unwrap();
    assert_eq!(env.event, "code-update");
    let raw = env.data.unwrap();
    assert!(raw.get().contains("\"code\""));
}

#[test]
fn parse_chat_send() {
    let s = load("event_chat_send.json");
    let env: Envelope = serde_json::from_str(&s).unwrap();
    assert_eq!(env.event, event::SEND_MESSAGE);
    let raw = env.data.unwrap();
    assert!(raw.get().contains("\"message\""));
}

#[test]
fn reject_unknown_envelope_field() {
    let err = serde_json::from_str::<Envelope>(r#"{"event":"x","extra":1}"#);
    assert!(err.is_err());
}

#[test]
fn reject_missing_event_name() {
    let err = serde_json::from_str::<Envelope>(r#"{"data":{}}"#);
    assert!(err.is_err());
}
