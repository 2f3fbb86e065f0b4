// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Every accepted date pattern renders text that parses back to the same
//! instant. Instants below only carry the components their pattern holds.

use codexgen::pattern;
use codexgen_roundtrip::Timetable;
use codexgen_runtime::chrono::{Duration, TimeZone, Utc};
use codexgen_runtime::serde_json::json;
use codexgen_runtime::{Instant, PatternFormatter, TemporalCodec, WireDecode, WireEncode};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Instant {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

fn formatter(date_pattern: &str) -> PatternFormatter {
    let format = pattern::translate(date_pattern)
        .unwrap_or_else(|err| panic!("`{date_pattern}` rejected: {err}"));
    PatternFormatter::new(Box::leak(format.into_boxed_str()))
}

#[test]
fn test_every_letter_family_roundtrips() {
    let millis = Duration::milliseconds(123);
    let micros = Duration::microseconds(123_456);
    let cases: Vec<(&str, Instant)> = vec![
        // dates
        ("yyyy-MM-dd", at(2021, 3, 31, 0, 0, 0)),
        ("yy-M-d", at(2021, 3, 5, 0, 0, 0)),
        ("d MMM yyyy", at(2021, 9, 7, 0, 0, 0)),
        ("MMMM d, yyyy", at(2021, 12, 25, 0, 0, 0)),
        ("EEE, d MMM yyyy", at(2021, 3, 31, 0, 0, 0)),
        ("EEEE dd/MM/yyyy", at(2024, 2, 29, 0, 0, 0)),
        // 12-hour clock
        ("yyyy-MM-dd hh:mm a", at(2021, 3, 1, 21, 15, 0)),
        ("yyyy-MM-dd h:mm:ss a", at(2021, 3, 1, 0, 5, 9)),
        ("yyyy-MM-dd h:mm a", at(2021, 3, 1, 12, 30, 0)),
        // fractional seconds
        ("yyyy-MM-dd HH:mm:ss.SSS", at(2021, 3, 1, 9, 15, 30) + millis),
        ("yyyy-MM-dd'T'HH:mm:ss.SSSSSS", at(2021, 3, 1, 9, 15, 30) + micros),
        // offsets
        ("yyyy-MM-dd HH:mm:ssZ", at(2021, 3, 1, 9, 15, 30)),
        ("yyyy-MM-dd HH:mm:ss XXX", at(2021, 3, 1, 9, 15, 30)),
        ("yyyy-MM-dd HH:mm:ss ZZZZZ", at(2021, 3, 1, 9, 15, 30)),
        // partial patterns
        ("yyyy-MM", at(2021, 3, 1, 0, 0, 0)),
        ("MM/yyyy", at(1999, 12, 1, 0, 0, 0)),
        ("yyyy", at(2021, 1, 1, 0, 0, 0)),
        ("dd MMM", at(1970, 7, 14, 0, 0, 0)),
        ("HH:mm", at(1970, 1, 1, 9, 15, 0)),
        ("H:mm:ss", at(1970, 1, 1, 7, 5, 3)),
        ("h a", at(1970, 1, 1, 15, 0, 0)),
    ];

    for (date_pattern, instant) in cases {
        let formatter = formatter(date_pattern);
        let wire = formatter.encode_instant(&instant);
        assert!(wire.is_string(), "`{date_pattern}` rendered {wire}");
        assert_eq!(
            formatter.decode_instant(&wire),
            Ok(instant),
            "`{date_pattern}` via {wire}"
        );
    }
}

#[test]
fn test_rendered_text() {
    let instant = at(2021, 3, 1, 21, 5, 9) + Duration::milliseconds(7);
    let cases = [
        ("yyyy-MM", "2021-03"),
        ("HH:mm", "21:05"),
        ("h:mm a", "9:05 PM"),
        ("EEE, d MMM yy", "Mon, 1 Mar 21"),
        ("MMMM", "March"),
        ("ss.SSS", "09.007"),
        ("HH:mm XXX", "21:05 +00:00"),
    ];
    for (date_pattern, text) in cases {
        assert_eq!(
            formatter(date_pattern).encode_instant(&instant),
            json!(text),
            "{date_pattern}"
        );
    }
}

#[test]
fn test_unparseable_patterns_rejected() {
    for date_pattern in ["yyyy-MM-dd hh:mm", "yyyy-MM-dd h", "yyyy a", "EEE HH:mm", "EEEE d MMMM"] {
        assert!(
            pattern::translate(date_pattern).is_err(),
            "`{date_pattern}` should be rejected"
        );
    }
}

#[test]
fn test_generated_partial_patterns() {
    let timetable = Timetable {
        month: at(2021, 3, 1, 0, 0, 0),
        opening: at(1970, 1, 1, 9, 30, 0),
        stamp: at(2021, 3, 31, 22, 4, 5) + Duration::milliseconds(250),
    };

    let wire = timetable.encode_wire();
    assert_eq!(wire["month"], json!("2021-03"));
    assert_eq!(wire["opening"], json!("09:30"));
    assert_eq!(wire["stamp"], json!("Wed, 31 Mar 21 10:04:05.250 PM +00:00"));
    assert_eq!(Timetable::decode_wire(&wire), Ok(timetable));
}

#[test]
fn test_generated_partial_patterns_from_peer_text() {
    let wire = json!({
        "month": "1999-12",
        "opening": "23:59",
        "stamp": "Thu, 1 Apr 21 12:00:00.000 AM +02:00",
    });
    let timetable = Timetable::decode_wire(&wire).unwrap();
    assert_eq!(timetable.month, at(1999, 12, 1, 0, 0, 0));
    assert_eq!(timetable.opening, at(1970, 1, 1, 23, 59, 0));
    assert_eq!(timetable.stamp, at(2021, 3, 31, 22, 0, 0));
}
