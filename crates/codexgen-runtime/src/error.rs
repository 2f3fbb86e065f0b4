// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decode failures surfaced by generated codecs.

use serde_json::Value;
use thiserror::Error;

/// Typed failure returned by every generated `decode_wire`.
///
/// Variants are inspectable so callers can tell a schema problem
/// (missing key, unknown tag) from a value problem (type mismatch).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A required (non-optional) key is absent from the keyed container.
    #[error("missing required key `{key}`")]
    MissingRequiredKey { key: String },

    /// A wire value could not be converted to the declared type.
    #[error("type mismatch at `{path}`: expected {expected}, found {found}")]
    TypeMismatch {
        /// Dotted/indexed location of the value, empty for the root.
        path: String,
        expected: String,
        found: String,
    },

    /// The tag key of a sum-type container names no known variant.
    #[error("unknown variant tag `{key}`")]
    UnknownVariantTag { key: String },

    /// A sum-type container must hold exactly one tag key.
    #[error("expected exactly one variant tag, found {found}")]
    TagCount { found: usize },

    /// An ordered group holds the wrong number of values.
    #[error("group `{key}` holds {found} values, expected {expected}")]
    GroupLength {
        key: String,
        expected: usize,
        found: usize,
    },
}

impl DecodeError {
    /// Build a `TypeMismatch` for a value found at the current location.
    pub fn mismatch(expected: impl Into<String>, found: &Value) -> Self {
        Self::TypeMismatch {
            path: String::new(),
            expected: expected.into(),
            found: describe(found).to_string(),
        }
    }

    /// Prefix the location of a `TypeMismatch` with an enclosing key or index.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn at(self, segment: &str) -> Self {
        match self {
            Self::TypeMismatch {
                path,
                expected,
                found,
            } => {
                let path = if path.is_empty() {
                    segment.to_string()
                } else if path.starts_with('[') {
                    format!("{segment}{path}")
                } else {
                    format!("{segment}.{path}")
                };
                Self::TypeMismatch {
                    path,
                    expected,
                    found,
                }
            }
            other => other,
        }
    }
}

/// Short name of a wire value's kind, for diagnostics.
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
