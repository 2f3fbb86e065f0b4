// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generates the fixture codecs into `OUT_DIR/codex.rs`.

use anyhow::Context;
use codexgen::{provider, Generator, GeneratorConfig};
use std::path::PathBuf;

const SCHEMA: &str = "schema/library.yaml";

fn main() -> anyhow::Result<()> {
    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-changed={SCHEMA}");

    let specs = provider::load_schema(SCHEMA).with_context(|| format!("loading {SCHEMA}"))?;

    let config = GeneratorConfig::default().with_project_name("codexgen-roundtrip");
    let generation = Generator::new(config)
        .context("building generator")?
        .generate(&specs)
        .context("generating fixture codecs")?;

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").context("OUT_DIR not set")?);
    let target = out_dir.join("codex.rs");
    std::fs::write(&target, &generation.bundle)
        .with_context(|| format!("writing {}", target.display()))?;

    Ok(())
}
