// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generation-time failures.
//!
//! Every error names the offending type and member so a schema author can find
//! it without reading generated output. A run that fails writes nothing.

use thiserror::Error;

/// Category of a name that collided with another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Type,
    Field,
    Variant,
    Argument,
    Module,
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Type => "type",
            Self::Field => "field",
            Self::Variant => "variant",
            Self::Argument => "argument",
            Self::Module => "module",
        })
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    /// The input set contains no type requesting a codec.
    #[error("no input specifications: no type requests a codec")]
    NoInputSpecifications,

    #[error("unsupported temporal format `{value}` on `{owner}.{field}`: {reason}")]
    UnsupportedFormat {
        owner: String,
        field: String,
        value: String,
        reason: String,
    },

    /// Some arguments of a variant carry explicit labels and some do not.
    #[error("variant `{owner}::{variant}` mixes named and positional arguments")]
    InconsistentArgumentNaming { owner: String, variant: String },

    #[error("`{owner}::{member}` groups {arity} values, above the configured limit of {limit}")]
    ArityLimitExceeded {
        owner: String,
        member: String,
        arity: usize,
        limit: usize,
    },

    #[error("duplicate {kind} name `{name}` in `{owner}`")]
    DuplicateName {
        owner: String,
        kind: NameKind,
        name: String,
    },

    /// One formatter name was requested with two different patterns.
    #[error("formatter `{name}` is declared with pattern `{first}` and `{second}`")]
    ConflictingFormatter {
        name: String,
        first: String,
        second: String,
    },

    #[error("invalid identifier `{name}` in `{owner}`: {reason}")]
    InvalidIdentifier {
        owner: String,
        name: String,
        reason: String,
    },

    #[error("unsupported type `{ty}` for `{owner}.{member}`: {reason}")]
    UnsupportedType {
        owner: String,
        member: String,
        ty: String,
        reason: String,
    },

    #[error("sum type `{name}` declares no variants")]
    EmptySum { name: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

pub type Result<T> = std::result::Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_member() {
        let err = GenerationError::ArityLimitExceeded {
            owner: "Shape".into(),
            member: "Hexa".into(),
            arity: 6,
            limit: 5,
        };
        assert_eq!(
            err.to_string(),
            "`Shape::Hexa` groups 6 values, above the configured limit of 5"
        );

        let err = GenerationError::DuplicateName {
            owner: "Book".into(),
            kind: NameKind::Field,
            name: "title".into(),
        };
        assert_eq!(err.to_string(), "duplicate field name `title` in `Book`");
    }
}
