// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime support for codecs generated by `codexgen`.
//!
//! Generated units address this crate by absolute path
//! (`::codexgen_runtime::KeyedReader`, ...), so it must be a direct dependency
//! of any crate that compiles generated code.
//!
//! # Wire shape
//!
//! | in memory | on the wire |
//! |---|---|
//! | product type | object, one key per field |
//! | sum type | object with exactly one key (the variant tag) |
//! | 0-argument variant | `{"Tag": "Tag"}` |
//! | 1-argument variant | `{"Tag": value}` |
//! | k-argument variant | `{"Tag": [v1, ..., vk]}` |
//! | optional field | key omitted when absent |
//!
//! # Example
//!
//! ```
//! use codexgen_runtime::{KeyedReader, KeyedWriter, UnixSeconds};
//! use codexgen_runtime::chrono::{TimeZone, Utc};
//!
//! let at = Utc.with_ymd_and_hms(2021, 3, 31, 0, 0, 0).unwrap();
//!
//! let mut writer = KeyedWriter::new();
//! writer.encode("id", &1_i64);
//! writer.encode_instant("at", &at, &UnixSeconds);
//! let wire = writer.into_value();
//!
//! let reader = KeyedReader::new(&wire).unwrap();
//! assert_eq!(reader.decode::<i64>("id"), Ok(1));
//! assert_eq!(reader.decode_instant("at", &UnixSeconds), Ok(at));
//! ```

pub mod container;
pub mod error;
pub mod temporal;
pub mod wire;

pub use chrono;
pub use serde_json;
pub use serde_json::Value;

pub use container::{KeyedReader, KeyedWriter, SequenceReader, SequenceWriter};
pub use error::DecodeError;
pub use temporal::{Iso8601, PatternFormatter, TemporalCodec, UnixMilliseconds, UnixSeconds};
pub use wire::{WireDecode, WireEncode};

/// In-memory representation of every temporal field.
pub type Instant = chrono::DateTime<chrono::Utc>;
