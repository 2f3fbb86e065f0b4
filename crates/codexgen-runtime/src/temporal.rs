// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Temporal strategies: how an [`Instant`] travels on the wire.
//!
//! - [`Iso8601`]: RFC 3339 string, `Z` suffix, sub-second digits only when present
//! - [`UnixSeconds`]: integer seconds since the epoch
//! - [`UnixMilliseconds`]: integer milliseconds since the epoch
//! - [`PatternFormatter`]: custom chrono format, built once per formatter name
//!
//! Both epoch strategies also accept fractional numbers when decoding.

use crate::error::DecodeError;
use crate::Instant;
use chrono::format::{self, Fixed, Item, Numeric, Parsed, StrftimeItems};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::Value;
use std::fmt::Write as _;

/// A symmetric transform between an instant and a wire value.
pub trait TemporalCodec {
    fn encode_instant(&self, instant: &Instant) -> Value;
    fn decode_instant(&self, value: &Value) -> Result<Instant, DecodeError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Iso8601;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnixSeconds;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnixMilliseconds;

impl TemporalCodec for Iso8601 {
    fn encode_instant(&self, instant: &Instant) -> Value {
        Value::String(instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    fn decode_instant(&self, value: &Value) -> Result<Instant, DecodeError> {
        let text = value
            .as_str()
            .ok_or_else(|| DecodeError::mismatch("ISO-8601 string", value))?;
        DateTime::parse_from_rfc3339(text)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|_| DecodeError::TypeMismatch {
                path: String::new(),
                expected: "ISO-8601 string".into(),
                found: format!("`{text}`"),
            })
    }
}

impl TemporalCodec for UnixSeconds {
    fn encode_instant(&self, instant: &Instant) -> Value {
        Value::from(instant.timestamp())
    }

    fn decode_instant(&self, value: &Value) -> Result<Instant, DecodeError> {
        let instant = if let Some(secs) = value.as_i64() {
            DateTime::<Utc>::from_timestamp(secs, 0)
        } else if let Some(secs) = value.as_f64() {
            from_fractional_seconds(secs)
        } else {
            None
        };
        instant.ok_or_else(|| DecodeError::mismatch("epoch seconds", value))
    }
}

impl TemporalCodec for UnixMilliseconds {
    fn encode_instant(&self, instant: &Instant) -> Value {
        Value::from(instant.timestamp_millis())
    }

    fn decode_instant(&self, value: &Value) -> Result<Instant, DecodeError> {
        let instant = if let Some(millis) = value.as_i64() {
            DateTime::<Utc>::from_timestamp_millis(millis)
        } else if let Some(millis) = value.as_f64() {
            from_fractional_millis(millis)
        } else {
            None
        };
        instant.ok_or_else(|| DecodeError::mismatch("epoch milliseconds", value))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn from_fractional_seconds(secs: f64) -> Option<Instant> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round() as u32;
    DateTime::<Utc>::from_timestamp(whole as i64, nanos.min(999_999_999))
}

/// Rounds to the nearest millisecond.
#[allow(clippy::cast_possible_truncation)]
fn from_fractional_millis(millis: f64) -> Option<Instant> {
    let rounded = millis.round();
    if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(rounded as i64)
}

/// Calendar and clock fields a format supplies when parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Coverage {
    year: bool,
    month: bool,
    day: bool,
    hour: bool,
    minute: bool,
    second: bool,
    offset: bool,
}

impl Coverage {
    fn of(items: &[Item<'_>]) -> Self {
        let mut coverage = Self::default();
        for item in items {
            match item {
                Item::Numeric(numeric, _) => match numeric {
                    Numeric::Year | Numeric::YearDiv100 | Numeric::YearMod100 => {
                        coverage.year = true;
                    }
                    Numeric::Month => coverage.month = true,
                    Numeric::Day => coverage.day = true,
                    Numeric::Hour | Numeric::Hour12 => coverage.hour = true,
                    Numeric::Minute => coverage.minute = true,
                    Numeric::Second => coverage.second = true,
                    _ => {}
                },
                Item::Fixed(fixed) => match fixed {
                    Fixed::ShortMonthName | Fixed::LongMonthName => coverage.month = true,
                    // AM/PM alone leaves the hour incomplete, so no default is applied
                    Fixed::LowerAmPm | Fixed::UpperAmPm => coverage.hour = true,
                    Fixed::TimezoneOffset
                    | Fixed::TimezoneOffsetColon
                    | Fixed::TimezoneOffsetZ
                    | Fixed::TimezoneOffsetColonZ => coverage.offset = true,
                    _ => {}
                },
                _ => {}
            }
        }
        coverage
    }
}

/// A named, pre-parsed chrono format shared by every field that requests it.
///
/// Generated units build one instance per formatter name, lazily, behind a
/// `OnceLock` accessor.
#[derive(Debug, Clone)]
pub struct PatternFormatter {
    format: &'static str,
    items: Vec<Item<'static>>,
    coverage: Coverage,
}

impl PatternFormatter {
    /// Parse `format` (chrono `strftime` syntax) once.
    pub fn new(format: &'static str) -> Self {
        let items: Vec<Item<'static>> = StrftimeItems::new(format).collect();
        Self {
            format,
            coverage: Coverage::of(&items),
            items,
        }
    }

    /// The chrono format string this formatter was built from.
    pub fn format(&self) -> &'static str {
        self.format
    }

    /// Render `instant` with this formatter.
    ///
    /// Returns `None` if the format cannot render an instant.
    pub fn render(&self, instant: &Instant) -> Option<String> {
        let mut out = String::new();
        write!(out, "{}", instant.format_with_items(self.items.iter())).ok()?;
        Some(out)
    }

    /// Parse `text` against the whole format.
    ///
    /// Fields the format does not carry default to the epoch (1970, January,
    /// day 1, 00:00:00). Without an offset the text is read as UTC. Fields the
    /// format does carry must all be present and consistent, so a 12-hour
    /// clock without its AM/PM marker fails instead of guessing.
    pub fn parse(&self, text: &str) -> Option<Instant> {
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, text, self.items.iter()).ok()?;

        let coverage = self.coverage;
        if !coverage.year {
            parsed.set_year(1970).ok()?;
        }
        if !coverage.month {
            parsed.set_month(1).ok()?;
        }
        if !coverage.day {
            parsed.set_day(1).ok()?;
        }
        if !coverage.hour {
            parsed.set_hour(0).ok()?;
        }
        if !coverage.minute {
            parsed.set_minute(0).ok()?;
        }
        if !coverage.second {
            parsed.set_second(0).ok()?;
        }

        if coverage.offset {
            parsed
                .to_datetime()
                .ok()
                .map(|instant| instant.with_timezone(&Utc))
        } else {
            parsed
                .to_naive_datetime_with_offset(0)
                .ok()
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
    }
}

impl TemporalCodec for PatternFormatter {
    fn encode_instant(&self, instant: &Instant) -> Value {
        self.render(instant).map_or(Value::Null, Value::String)
    }

    fn decode_instant(&self, value: &Value) -> Result<Instant, DecodeError> {
        let expected = || format!("date matching `{}`", self.format);
        let text = value
            .as_str()
            .ok_or_else(|| DecodeError::mismatch(expected(), value))?;
        self.parse(text).ok_or_else(|| DecodeError::TypeMismatch {
            path: String::new(),
            expected: expected(),
            found: format!("`{text}`"),
        })
    }
}
