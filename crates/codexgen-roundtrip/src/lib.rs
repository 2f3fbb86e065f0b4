// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codecs generated at build time from `schema/library.yaml`.
//!
//! The crate has no logic of its own: it proves the generated bundle
//! compiles against `codexgen-runtime`, and its tests drive the codecs
//! through real wire values.

#[allow(clippy::all, clippy::pedantic)]
pub mod generated {
    include!(concat!(env!("OUT_DIR"), "/codex.rs"));
}

pub use generated::*;
