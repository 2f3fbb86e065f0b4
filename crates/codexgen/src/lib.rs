// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! codexgen: ahead-of-time generator of keyed-wire codecs.
//!
//! Takes a schema of product types (named fields) and sum types (tagged
//! variants with positional arguments) and emits Rust source implementing
//! `WireEncode` / `WireDecode` from `codexgen-runtime` for each of them.
//!
//! # Features
//!
//! - **Key renaming**: `@json key` writes a field under another wire key
//! - **Temporal strategies**: ISO-8601, epoch seconds, epoch milliseconds or a
//!   named date pattern (`@format yyyy-MM-dd#day`)
//! - **Tagged unions**: one tag key per value, multi-argument variants packed
//!   as an ordered group
//! - **Bounded arity**: a `write_group_k` / `read_group_k` family up to a
//!   configurable limit (default 5)
//!
//! # Quick Start
//!
//! ```bash
//! codexgen generate --schema library.yaml --output src/generated
//! ```
//!
//! # Schema
//!
//! ```yaml
//! types:
//!   - kind: product
//!     name: Release
//!     codec: both
//!     fields:
//!       - { name: id, type: i64 }
//!       - { name: release, type: Date, doc: ["@format yyyy-MM-dd"] }
//! ```
//!
//! # Library use
//!
//! ```
//! use codexgen::{Generator, GeneratorConfig, provider};
//!
//! let specs = provider::parse_schema(r#"
//! types:
//!   - kind: product
//!     name: Release
//!     codec: both
//!     fields:
//!       - { name: id, type: i64 }
//! "#).unwrap();
//!
//! let generation = Generator::new(GeneratorConfig::default())
//!     .unwrap()
//!     .generate(&specs)
//!     .unwrap();
//! assert!(generation.unit_for("Release").is_some());
//! ```

pub mod annotation;
pub mod compose;
pub mod config;
pub mod declaration;
pub mod error;
pub mod formatter;
pub mod group;
pub mod model;
pub mod naming;
pub mod pattern;
pub mod product;
pub mod provider;
pub mod sink;
pub mod sum;
pub mod type_expr;
pub mod validate;
pub mod writer;

pub use annotation::{resolve_key, resolve_temporal_strategy, TemporalStrategy};
pub use compose::{EmitContext, GeneratedUnit, Generation, GenerationReport, Generator, UnitKind};
pub use config::{ConfigError, GeneratorConfig};
pub use error::{GenerationError, NameKind};
pub use formatter::{FormatterRef, FormatterRegistry};
pub use model::{
    ArgumentSpec, CodecDirection, FieldSpec, ProductSpec, ScalarKind, SumSpec, TypeRef,
    TypeSpecification, VariantSpec,
};
pub use provider::SchemaError;
pub use sink::{DirectorySink, MemorySink, UnitSink};
pub use type_expr::ParseTypeError;
