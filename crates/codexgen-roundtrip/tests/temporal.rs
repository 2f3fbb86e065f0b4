// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Temporal strategies as seen on the wire.

use codexgen_roundtrip::{Schedule, User};
use codexgen_runtime::chrono::{TimeZone, Utc};
use codexgen_runtime::serde_json::json;
use codexgen_runtime::{DecodeError, Instant, WireDecode, WireEncode};
use regex::Regex;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Instant {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

fn user() -> User {
    User {
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        birthday: at(1906, 12, 9, 0, 0, 0),
        joined: at(2021, 3, 31, 10, 20, 30),
        last_login: Some(at(2024, 2, 29, 23, 59, 59)),
        created: at(2018, 11, 5, 6, 7, 8),
        nickname: Some("Amazing".into()),
        location: (0.0, 0.0),
        favorite: None,
        visits: 1,
    }
}

#[test]
fn test_epoch_seconds_and_milliseconds() {
    let user = user();
    let wire = user.encode_wire();
    assert_eq!(wire["joined"], json!(user.joined.timestamp()));
    assert_eq!(
        wire["lastLogin"],
        json!(user.last_login.unwrap().timestamp_millis())
    );
}

#[test]
fn test_default_strategy_is_iso8601() {
    let wire = user().encode_wire();
    let iso = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?Z$").unwrap();
    assert!(iso.is_match(wire["created"].as_str().unwrap()));
    assert_eq!(wire["created"], json!("2018-11-05T06:07:08Z"));
}

#[test]
fn test_pattern_formatter() {
    let user = user();
    let wire = user.encode_wire();
    assert_eq!(wire["birthday"], json!("1906-12-09"));
    assert_eq!(User::decode_wire(&wire).unwrap(), user);
}

#[test]
fn test_misplaced_strategy_leaves_plain_value() {
    assert_eq!(user().encode_wire()["visits"], json!(1));
}

#[test]
fn test_shared_formatter_between_fields() {
    let schedule = Schedule {
        opens: at(2025, 1, 6, 0, 0, 0),
        closes: Some(at(2025, 1, 10, 0, 0, 0)),
        reminder: at(2025, 1, 5, 18, 30, 0),
        precise: at(2025, 1, 6, 8, 0, 0),
    };
    let wire = schedule.encode_wire();
    assert_eq!(
        wire,
        json!({
            "opens": "2025-01-06",
            "closes": "2025-01-10",
            "reminder": "05/01/2025 18:30",
            "precise": "2025-01-06T08:00:00Z"
        })
    );
    assert_eq!(Schedule::decode_wire(&wire).unwrap(), schedule);
}

#[test]
fn test_absent_optional_instant() {
    let schedule = Schedule::decode_wire(&json!({
        "opens": "2025-01-06",
        "reminder": "05/01/2025 18:30",
        "precise": "2025-01-06T08:00:00+02:00"
    }))
    .unwrap();
    assert_eq!(schedule.closes, None);
    assert_eq!(schedule.precise, at(2025, 1, 6, 6, 0, 0));
}

#[test]
fn test_malformed_instant_reports_key() {
    let mut wire = user().encode_wire();
    wire["birthday"] = json!("09/12/1906");
    match User::decode_wire(&wire) {
        Err(DecodeError::TypeMismatch { path, .. }) => assert_eq!(path, "birthday"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_seconds_accept_fractional_input() {
    let mut wire = user().encode_wire();
    wire["joined"] = json!(1_617_186_030.5);
    let user = User::decode_wire(&wire).unwrap();
    assert_eq!(user.joined.timestamp(), 1_617_186_030);
    assert_eq!(user.joined.timestamp_subsec_millis(), 500);
}
