#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use coderoom_relay::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
relay:
  listen: "0.0.0.0:8080"
limits:
  max_frame_bytez: 4096 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let ok = "version: 1\n";
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.relay.listen, "0.0.0.0:8080");
    assert_eq!(cfg.limits.max_frame_bytes, 262144);
    assert_eq!(cfg.limits.outbound_queue, 1024);
}

#[test]
fn reject_unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn reject_out_of_range_ping_interval() {
    let bad = r#"
version: 1
relay:
  ping_interval_ms: 1000
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn idle_timeout_must_exceed_ping_interval() {
    let bad = r#"
version: 1
relay:
  ping_interval_ms: 30000
  idle_timeout_ms: 20000
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn reject_tiny_outbound_queue() {
    let bad = r#"
version: 1
limits:
  outbound_queue: 1
"#;
    assert!(config::load_from_str(bad).is_err());
}
