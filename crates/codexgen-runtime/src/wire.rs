// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conversion traits between in-memory values and wire values.
//!
//! Generated codecs implement both traits for every annotated type; the
//! implementations below cover the leaf types a schema may reference.

use crate::error::DecodeError;
use crate::temporal::{Iso8601, TemporalCodec};
use crate::Instant;
use serde_json::{Map, Number, Value};
use std::collections::{BTreeMap, HashMap};

/// Converts a value into its wire representation.
pub trait WireEncode {
    fn encode_wire(&self) -> Value;
}

/// Rebuilds a value from its wire representation.
pub trait WireDecode: Sized {
    fn decode_wire(value: &Value) -> Result<Self, DecodeError>;
}

impl<T: WireEncode + ?Sized> WireEncode for &T {
    fn encode_wire(&self) -> Value {
        (**self).encode_wire()
    }
}

impl WireEncode for bool {
    fn encode_wire(&self) -> Value {
        Value::Bool(*self)
    }
}

impl WireDecode for bool {
    fn decode_wire(value: &Value) -> Result<Self, DecodeError> {
        value
            .as_bool()
            .ok_or_else(|| DecodeError::mismatch("bool", value))
    }
}

macro_rules! signed_wire {
    ($($ty:ty),*) => {$(
        impl WireEncode for $ty {
            fn encode_wire(&self) -> Value {
                Value::from(i64::from(*self))
            }
        }

        impl WireDecode for $ty {
            fn decode_wire(value: &Value) -> Result<Self, DecodeError> {
                value
                    .as_i64()
                    .and_then(|n| <$ty>::try_from(n).ok())
                    .ok_or_else(|| DecodeError::mismatch(stringify!($ty), value))
            }
        }
    )*};
}

macro_rules! unsigned_wire {
    ($($ty:ty),*) => {$(
        impl WireEncode for $ty {
            fn encode_wire(&self) -> Value {
                Value::from(u64::from(*self))
            }
        }

        impl WireDecode for $ty {
            fn decode_wire(value: &Value) -> Result<Self, DecodeError> {
                value
                    .as_u64()
                    .and_then(|n| <$ty>::try_from(n).ok())
                    .ok_or_else(|| DecodeError::mismatch(stringify!($ty), value))
            }
        }
    )*};
}

signed_wire!(i8, i16, i32, i64);
unsigned_wire!(u8, u16, u32, u64);

impl WireEncode for f64 {
    fn encode_wire(&self) -> Value {
        // Non-finite floats have no JSON form.
        Number::from_f64(*self).map_or(Value::Null, Value::Number)
    }
}

impl WireDecode for f64 {
    fn decode_wire(value: &Value) -> Result<Self, DecodeError> {
        value
            .as_f64()
            .ok_or_else(|| DecodeError::mismatch("f64", value))
    }
}

impl WireEncode for f32 {
    fn encode_wire(&self) -> Value {
        f64::from(*self).encode_wire()
    }
}

impl WireDecode for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn decode_wire(value: &Value) -> Result<Self, DecodeError> {
        value
            .as_f64()
            .map(|n| n as f32)
            .ok_or_else(|| DecodeError::mismatch("f32", value))
    }
}

impl WireEncode for str {
    fn encode_wire(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl WireEncode for String {
    fn encode_wire(&self) -> Value {
        Value::String(self.clone())
    }
}

impl WireDecode for String {
    fn decode_wire(value: &Value) -> Result<Self, DecodeError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DecodeError::mismatch("string", value))
    }
}

impl<T: WireEncode> WireEncode for Option<T> {
    fn encode_wire(&self) -> Value {
        self.as_ref().map_or(Value::Null, WireEncode::encode_wire)
    }
}

impl<T: WireDecode> WireDecode for Option<T> {
    fn decode_wire(value: &Value) -> Result<Self, DecodeError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::decode_wire(value).map(Some)
        }
    }
}

impl<T: WireEncode> WireEncode for [T] {
    fn encode_wire(&self) -> Value {
        Value::Array(self.iter().map(WireEncode::encode_wire).collect())
    }
}

impl<T: WireEncode> WireEncode for Vec<T> {
    fn encode_wire(&self) -> Value {
        self.as_slice().encode_wire()
    }
}

impl<T: WireDecode> WireDecode for Vec<T> {
    fn decode_wire(value: &Value) -> Result<Self, DecodeError> {
        let items = value
            .as_array()
            .ok_or_else(|| DecodeError::mismatch("array", value))?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| T::decode_wire(item).map_err(|e| e.at(&format!("[{index}]"))))
            .collect()
    }
}

impl<T: WireEncode + ?Sized> WireEncode for Box<T> {
    fn encode_wire(&self) -> Value {
        (**self).encode_wire()
    }
}

impl<T: WireDecode> WireDecode for Box<T> {
    fn decode_wire(value: &Value) -> Result<Self, DecodeError> {
        T::decode_wire(value).map(Box::new)
    }
}

fn encode_entries<'a, T, I>(entries: I) -> Value
where
    T: WireEncode + 'a,
    I: Iterator<Item = (&'a String, &'a T)>,
{
    let mut map = Map::new();
    for (key, value) in entries {
        map.insert(key.clone(), value.encode_wire());
    }
    Value::Object(map)
}

fn decode_entries<T, C>(value: &Value) -> Result<C, DecodeError>
where
    T: WireDecode,
    C: FromIterator<(String, T)>,
{
    let map = value
        .as_object()
        .ok_or_else(|| DecodeError::mismatch("object", value))?;
    map.iter()
        .map(|(key, item)| {
            T::decode_wire(item)
                .map(|decoded| (key.clone(), decoded))
                .map_err(|e| e.at(key))
        })
        .collect()
}

impl<T: WireEncode> WireEncode for BTreeMap<String, T> {
    fn encode_wire(&self) -> Value {
        encode_entries(self.iter())
    }
}

impl<T: WireDecode> WireDecode for BTreeMap<String, T> {
    fn decode_wire(value: &Value) -> Result<Self, DecodeError> {
        decode_entries(value)
    }
}

impl<T: WireEncode, S> WireEncode for HashMap<String, T, S> {
    fn encode_wire(&self) -> Value {
        encode_entries(self.iter())
    }
}

impl<T: WireDecode, S: std::hash::BuildHasher + Default> WireDecode for HashMap<String, T, S> {
    fn decode_wire(value: &Value) -> Result<Self, DecodeError> {
        decode_entries(value)
    }
}

impl WireEncode for Value {
    fn encode_wire(&self) -> Value {
        self.clone()
    }
}

impl WireDecode for Value {
    fn decode_wire(value: &Value) -> Result<Self, DecodeError> {
        Ok(value.clone())
    }
}

/// Instants without an explicit strategy travel as ISO-8601 strings.
impl WireEncode for Instant {
    fn encode_wire(&self) -> Value {
        Iso8601.encode_instant(self)
    }
}

impl WireDecode for Instant {
    fn decode_wire(value: &Value) -> Result<Self, DecodeError> {
        Iso8601.decode_instant(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_range_checked() {
        assert_eq!(u8::decode_wire(&json!(255)), Ok(255));
        assert!(matches!(
            u8::decode_wire(&json!(256)),
            Err(DecodeError::TypeMismatch { .. })
        ));
        assert!(matches!(
            u32::decode_wire(&json!(-1)),
            Err(DecodeError::TypeMismatch { .. })
        ));
        assert_eq!(i16::decode_wire(&json!(-300)), Ok(-300));
    }

    #[test]
    fn test_option_null() {
        assert_eq!(Option::<i64>::decode_wire(&Value::Null), Ok(None));
        assert_eq!(Option::<i64>::decode_wire(&json!(4)), Ok(Some(4)));
        assert_eq!(Some(4_i64).encode_wire(), json!(4));
        assert_eq!(None::<i64>.encode_wire(), Value::Null);
    }

    #[test]
    fn test_sequence_error_path() {
        let err = Vec::<String>::decode_wire(&json!(["a", 3])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TypeMismatch {
                path: "[1]".into(),
                expected: "string".into(),
                found: "number".into(),
            }
        );
    }

    #[test]
    fn test_map_roundtrip() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), 1_u32);
        map.insert("b".to_string(), 2_u32);

        let wire = map.encode_wire();
        assert_eq!(wire, json!({"a": 1, "b": 2}));
        assert_eq!(BTreeMap::<String, u32>::decode_wire(&wire), Ok(map));
    }

    #[test]
    fn test_float_forms() {
        assert_eq!(1.5_f64.encode_wire(), json!(1.5));
        assert_eq!(f64::NAN.encode_wire(), Value::Null);
        assert_eq!(f32::decode_wire(&json!(0.25)), Ok(0.25_f32));
        assert_eq!(f64::decode_wire(&json!(3)), Ok(3.0));
    }
}
