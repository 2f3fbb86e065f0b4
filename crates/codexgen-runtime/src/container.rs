// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Keyed and ordered containers used by generated codecs.
//!
//! A keyed container is a JSON object; an ordered container is a JSON array
//! nested under one key of a keyed container.

use crate::error::DecodeError;
use crate::temporal::TemporalCodec;
use crate::wire::{WireDecode, WireEncode};
use crate::Instant;
use serde_json::{Map, Value};

/// Write side of a keyed container.
#[derive(Debug, Default)]
pub struct KeyedWriter {
    fields: Map<String, Value>,
}

impl KeyedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `value` under `key`, replacing any previous entry.
    pub fn encode<T: WireEncode + ?Sized>(&mut self, key: &str, value: &T) {
        self.fields.insert(key.to_string(), value.encode_wire());
    }

    /// Write `value` under `key` only when it is present.
    pub fn encode_if_present<T: WireEncode>(&mut self, key: &str, value: &Option<T>) {
        if let Some(value) = value {
            self.encode(key, value);
        }
    }

    /// Write `instant` under `key` through a temporal strategy.
    pub fn encode_instant<C: TemporalCodec + ?Sized>(
        &mut self,
        key: &str,
        instant: &Instant,
        codec: &C,
    ) {
        self.fields
            .insert(key.to_string(), codec.encode_instant(instant));
    }

    pub fn encode_instant_if_present<C: TemporalCodec + ?Sized>(
        &mut self,
        key: &str,
        instant: &Option<Instant>,
        codec: &C,
    ) {
        if let Some(instant) = instant {
            self.encode_instant(key, instant, codec);
        }
    }

    /// Open an ordered child container under `key`.
    pub fn nested_sequence(&mut self, key: &str) -> SequenceWriter<'_> {
        let slot = self.fields.entry(key.to_string()).or_insert(Value::Null);
        *slot = Value::Array(Vec::new());
        SequenceWriter { slot }
    }

    /// Number of keys written so far.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Write side of an ordered child container.
#[derive(Debug)]
pub struct SequenceWriter<'a> {
    slot: &'a mut Value,
}

impl SequenceWriter<'_> {
    /// Append `value` after the values already written.
    pub fn encode<T: WireEncode + ?Sized>(&mut self, value: &T) {
        if let Value::Array(items) = &mut *self.slot {
            items.push(value.encode_wire());
        }
    }
}

/// Read side of a keyed container.
#[derive(Debug, Clone, Copy)]
pub struct KeyedReader<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> KeyedReader<'a> {
    /// Open `value` as a keyed container.
    pub fn new(value: &'a Value) -> Result<Self, DecodeError> {
        value
            .as_object()
            .map(|fields| Self { fields })
            .ok_or_else(|| DecodeError::mismatch("object", value))
    }

    /// Keys present in the container, in wire order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.fields.keys().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// The only key of a tag-keyed container.
    pub fn single_key(&self) -> Result<&'a str, DecodeError> {
        let mut keys = self.keys();
        match (keys.next(), keys.next()) {
            (Some(key), None) => Ok(key),
            _ => Err(DecodeError::TagCount {
                found: self.fields.len(),
            }),
        }
    }

    fn require(&self, key: &str) -> Result<&'a Value, DecodeError> {
        self.fields
            .get(key)
            .ok_or_else(|| DecodeError::MissingRequiredKey {
                key: key.to_string(),
            })
    }

    fn present(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|value| !value.is_null())
    }

    /// Read a required value.
    pub fn decode<T: WireDecode>(&self, key: &str) -> Result<T, DecodeError> {
        let value = self.require(key)?;
        T::decode_wire(value).map_err(|e| e.at(key))
    }

    /// Read an optional value: a missing key or `null` yields `None`.
    pub fn decode_if_present<T: WireDecode>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        self.present(key)
            .map(|value| T::decode_wire(value).map_err(|e| e.at(key)))
            .transpose()
    }

    pub fn decode_instant<C: TemporalCodec + ?Sized>(
        &self,
        key: &str,
        codec: &C,
    ) -> Result<Instant, DecodeError> {
        let value = self.require(key)?;
        codec.decode_instant(value).map_err(|e| e.at(key))
    }

    pub fn decode_instant_if_present<C: TemporalCodec + ?Sized>(
        &self,
        key: &str,
        codec: &C,
    ) -> Result<Option<Instant>, DecodeError> {
        self.present(key)
            .map(|value| codec.decode_instant(value).map_err(|e| e.at(key)))
            .transpose()
    }

    /// Open the ordered child container under `key`, which must hold exactly
    /// `arity` values.
    pub fn nested_group(&self, key: &str, arity: usize) -> Result<SequenceReader<'a>, DecodeError> {
        let value = self.require(key)?;
        let items = value
            .as_array()
            .ok_or_else(|| DecodeError::mismatch("array", value).at(key))?;
        if items.len() != arity {
            return Err(DecodeError::GroupLength {
                key: key.to_string(),
                expected: arity,
                found: items.len(),
            });
        }
        Ok(SequenceReader {
            key: key.to_string(),
            items,
            next: 0,
        })
    }
}

/// Read side of an ordered child container.
#[derive(Debug)]
pub struct SequenceReader<'a> {
    key: String,
    items: &'a [Value],
    next: usize,
}

impl SequenceReader<'_> {
    /// Read the next value in positional order.
    pub fn decode<T: WireDecode>(&mut self) -> Result<T, DecodeError> {
        let index = self.next;
        let value = self.items.get(index).ok_or_else(|| DecodeError::GroupLength {
            key: self.key.clone(),
            expected: index + 1,
            found: self.items.len(),
        })?;
        self.next += 1;
        T::decode_wire(value).map_err(|e| e.at(&format!("[{index}]")).at(&self.key))
    }

    /// Values not read yet.
    pub fn remaining(&self) -> usize {
        self.items.len() - self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_writer_preserves_order() {
        let mut writer = KeyedWriter::new();
        writer.encode("zeta", &1_i64);
        writer.encode("alpha", "a");
        writer.encode_if_present("gone", &None::<String>);

        let wire = writer.into_value();
        assert_eq!(
            serde_json::to_string(&wire).unwrap(),
            r#"{"zeta":1,"alpha":"a"}"#
        );
    }

    #[test]
    fn test_nested_sequence() {
        let mut writer = KeyedWriter::new();
        {
            let mut group = writer.nested_sequence("pair");
            group.encode(&3_u8);
            group.encode("x");
        }
        assert_eq!(writer.into_value(), json!({"pair": [3, "x"]}));
    }

    #[test]
    fn test_reader_missing_and_null() {
        let wire = json!({"a": 1, "b": null});
        let reader = KeyedReader::new(&wire).unwrap();

        assert_eq!(reader.decode::<i64>("a"), Ok(1));
        assert_eq!(
            reader.decode::<i64>("c"),
            Err(DecodeError::MissingRequiredKey { key: "c".into() })
        );
        assert_eq!(reader.decode_if_present::<i64>("b"), Ok(None));
        assert_eq!(reader.decode_if_present::<i64>("c"), Ok(None));
        assert_eq!(reader.decode_if_present::<i64>("a"), Ok(Some(1)));
    }

    #[test]
    fn test_reader_rejects_non_object() {
        let wire = json!([1, 2]);
        assert!(matches!(
            KeyedReader::new(&wire),
            Err(DecodeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_single_key() {
        let one = json!({"Tag": 1});
        assert_eq!(KeyedReader::new(&one).unwrap().single_key(), Ok("Tag"));

        let none = json!({});
        assert_eq!(
            KeyedReader::new(&none).unwrap().single_key(),
            Err(DecodeError::TagCount { found: 0 })
        );

        let two = json!({"A": 1, "B": 2});
        assert_eq!(
            KeyedReader::new(&two).unwrap().single_key(),
            Err(DecodeError::TagCount { found: 2 })
        );
    }

    #[test]
    fn test_group_length_checked() {
        let wire = json!({"g": [1, 2, 3]});
        let reader = KeyedReader::new(&wire).unwrap();

        let err = reader.nested_group("g", 2).unwrap_err();
        assert_eq!(
            err,
            DecodeError::GroupLength {
                key: "g".into(),
                expected: 2,
                found: 3,
            }
        );

        let mut group = reader.nested_group("g", 3).unwrap();
        assert_eq!(group.decode::<i64>(), Ok(1));
        assert_eq!(group.remaining(), 2);
    }

    #[test]
    fn test_group_value_path() {
        let wire = json!({"g": [1, "two"]});
        let reader = KeyedReader::new(&wire).unwrap();
        let mut group = reader.nested_group("g", 2).unwrap();

        assert_eq!(group.decode::<i64>(), Ok(1));
        let err = group.decode::<i64>().unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { path, .. } if path == "g[1]"));
    }
}
