// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema documents through the whole pipeline.

use codexgen::{provider, GenerationError, Generator, GeneratorConfig, MemorySink};
use std::path::Path;

const LIBRARY: &str = r#"
types:
  - kind: product
    name: Release
    codec: both
    doc: ["A dated release."]
    fields:
      - { name: id, type: i64 }
      - name: release
        type: Date
        doc: ["@format yyyy-MM-dd"]
  - kind: sum
    name: Shelf
    codec: both
    variants:
      - name: Empty
      - name: Single
        arguments: [{ type: Release }]
      - name: Pair
        arguments: [{ type: Release, name: left }, { type: Release, name: right }]
"#;

#[test]
fn test_worked_example_units() {
    let specs = provider::parse_schema(LIBRARY).unwrap();
    let generation = Generator::new(GeneratorConfig::default())
        .unwrap()
        .generate(&specs)
        .unwrap();

    let release = &generation.unit_for("Release").unwrap().source;
    assert!(release.contains("/// A dated release.\n#[derive(Debug, Clone, PartialEq)]\npub struct Release {"));
    assert!(release.contains("pub release: ::codexgen_runtime::Instant,"));
    assert!(release.contains("fn release_formatter() -> &'static ::codexgen_runtime::PatternFormatter"));
    assert!(release.contains("container.encode_instant(\"release\", &self.release, release_formatter());"));

    let shelf = &generation.unit_for("Shelf").unwrap().source;
    assert!(shelf.contains("Single(Release),"));
    assert!(shelf.contains("Some(ShelfTag::Single) => Ok(Self::Single(container.decode(\"Single\")?)),"));
    assert!(shelf.contains("let (left, right): (Release, Release) = super::keyed_container::read_group_2(&container, \"Pair\")?;"));

    let mut sink = MemorySink::new();
    generation.write_to(&mut sink).unwrap();
    let paths: Vec<&Path> = sink.files.keys().map(|p| p.as_path()).collect();
    assert_eq!(
        paths,
        vec![
            Path::new("generated/keyed_container.rs"),
            Path::new("generated/mod.rs"),
            Path::new("generated/release.rs"),
            Path::new("generated/shelf.rs"),
        ]
    );
}

#[test]
fn test_schema_errors_surface_as_generation_errors() {
    let specs = provider::parse_schema(
        r#"
types:
  - kind: sum
    name: Bad
    codec: both
    variants:
      - name: Mixed
        arguments: [{ type: i32, name: a }, { type: i32 }]
"#,
    )
    .unwrap();
    let err = Generator::new(GeneratorConfig::default())
        .unwrap()
        .generate(&specs)
        .unwrap_err();
    assert!(matches!(err, GenerationError::InconsistentArgumentNaming { .. }));
}

#[test]
fn test_generation_is_deterministic() {
    let specs = provider::parse_schema(LIBRARY).unwrap();
    let generator = Generator::new(GeneratorConfig::default()).unwrap();
    let first = generator.generate(&specs).unwrap();
    let second = generator.generate(&specs).unwrap();
    assert_eq!(first.units, second.units);
    assert_eq!(first.bundle, second.bundle);
}
