//! Room code store behavior.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use coderoom_relay::storage::{CodeStore, MemoryCodeStore};

#[test]
fn unwritten_room_reads_as_absent() {
    let store = MemoryCodeStore::new();
    assert_eq!(store.get_code("r1"), None);
}

#[test]
fn latest_write_wins() {
    let store = MemoryCodeStore::new();
    store.put_code("r1", "print(1)".into());
    store.put_code("r1", "print(2)".into());
    assert_eq!(store.get_code("r1").as_deref(), Some("print(2)"));
}

#[test]
fn rooms_are_independent() {
    let store = MemoryCodeStore::new();
    store.put_code("r1", "a".into());
    store.put_code("r2", "b".into());
    assert_eq!(store.get_code("r1").as_deref(), Some("a"));
    assert_eq!(store.get_code("r2").as_deref(), Some("b"));
}
