// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema provider: YAML schema documents to the structural model.
//!
//! Field documentation may carry annotation lines:
//!
//! ```yaml
//! fields:
//!   - name: release
//!     type: Date
//!     doc:
//!       - "Release day."
//!       - "@format yyyy-MM-dd#day"
//!       - "@json releaseDate"
//! ```
//!
//! `@json [key]` sets the wire key, `@format value` the temporal strategy.
//! Any other `@name value` line becomes a free-form annotation. An explicit
//! `annotations:` map wins over doc lines.

use crate::model::{
    Annotations, ArgumentSpec, CodecDirection, FieldSpec, ProductSpec, SumSpec, TypeRef,
    TypeSpecification, VariantSpec, TEMPORAL_FORMAT, WIRE_KEY,
};
use crate::type_expr::ParseTypeError;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Schema loading errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("`{owner}.{member}`: {source}")]
    InvalidType {
        owner: String,
        member: String,
        #[source]
        source: ParseTypeError,
    },
}

/// Codec directions as written in schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecEntry {
    Both,
    Decode,
    Encode,
    /// Explicitly not annotated.
    None,
}

impl CodecEntry {
    fn direction(self) -> Option<CodecDirection> {
        match self {
            Self::Both => Some(CodecDirection::Both),
            Self::Decode => Some(CodecDirection::Decode),
            Self::Encode => Some(CodecDirection::Encode),
            Self::None => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    #[serde(default)]
    types: Vec<TypeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum TypeEntry {
    Product(ProductEntry),
    Sum(SumEntry),
}

#[derive(Debug, Deserialize)]
struct ProductEntry {
    name: String,
    #[serde(default)]
    codec: Option<CodecEntry>,
    #[serde(default)]
    doc: Vec<String>,
    #[serde(default)]
    derives: Option<Vec<String>>,
    #[serde(default)]
    fields: Vec<FieldEntry>,
}

#[derive(Debug, Deserialize)]
struct SumEntry {
    name: String,
    #[serde(default)]
    codec: Option<CodecEntry>,
    #[serde(default)]
    doc: Vec<String>,
    #[serde(default)]
    derives: Option<Vec<String>>,
    #[serde(default)]
    variants: Vec<VariantEntry>,
}

#[derive(Debug, Deserialize)]
struct FieldEntry {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    doc: Vec<String>,
    #[serde(default)]
    annotations: Annotations,
}

#[derive(Debug, Deserialize)]
struct VariantEntry {
    name: String,
    #[serde(default)]
    doc: Vec<String>,
    #[serde(default)]
    arguments: Vec<ArgumentEntry>,
}

#[derive(Debug, Deserialize)]
struct ArgumentEntry {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    name: Option<String>,
}

#[allow(clippy::expect_used)] // literal pattern, covered by tests
fn annotation_line() -> &'static Regex {
    static LINE: OnceLock<Regex> = OnceLock::new();
    LINE.get_or_init(|| {
        Regex::new(r"^\s*@([A-Za-z][A-Za-z0-9_]*)(?:\s+(.*?))?\s*$").expect("static regex")
    })
}

/// Split doc lines into plain documentation and annotations.
pub fn split_doc(lines: &[String]) -> (Vec<String>, Annotations) {
    let mut doc = Vec::new();
    let mut annotations = Annotations::new();

    for line in lines {
        let Some(caps) = annotation_line().captures(line) else {
            doc.push(line.trim_end().to_string());
            continue;
        };
        let name = &caps[1];
        let value = caps.get(2).map_or("", |m| m.as_str()).to_string();
        let key = match name {
            "json" => WIRE_KEY,
            "format" => TEMPORAL_FORMAT,
            other => other,
        };
        annotations.insert(key.to_string(), value);
    }
    (doc, annotations)
}

fn parse_type(owner: &str, member: &str, expr: &str) -> Result<TypeRef, SchemaError> {
    expr.parse().map_err(|source| SchemaError::InvalidType {
        owner: owner.to_string(),
        member: member.to_string(),
        source,
    })
}

fn product(entry: ProductEntry) -> Result<ProductSpec, SchemaError> {
    let mut fields = Vec::with_capacity(entry.fields.len());
    for field in entry.fields {
        let declared_type = parse_type(&entry.name, &field.name, &field.ty)?;
        let (doc, mut annotations) = split_doc(&field.doc);
        annotations.extend(field.annotations);
        fields.push(FieldSpec {
            name: field.name,
            declared_type,
            annotations,
            doc,
        });
    }
    Ok(ProductSpec {
        name: entry.name,
        fields,
        codec: entry.codec.and_then(CodecEntry::direction),
        doc: entry.doc,
        derives: entry.derives,
    })
}

fn sum(entry: SumEntry) -> Result<SumSpec, SchemaError> {
    let mut variants = Vec::with_capacity(entry.variants.len());
    for variant in entry.variants {
        let owner = format!("{}::{}", entry.name, variant.name);
        let mut arguments = Vec::with_capacity(variant.arguments.len());
        for (position, arg) in variant.arguments.into_iter().enumerate() {
            let member = arg
                .name
                .clone()
                .unwrap_or_else(|| format!("value{}", position + 1));
            arguments.push(ArgumentSpec {
                position,
                declared_type: parse_type(&owner, &member, &arg.ty)?,
                body_name: arg.name,
            });
        }
        variants.push(VariantSpec {
            name: variant.name,
            arguments,
            doc: variant.doc,
        });
    }
    Ok(SumSpec {
        name: entry.name,
        variants,
        codec: entry.codec.and_then(CodecEntry::direction),
        doc: entry.doc,
        derives: entry.derives,
    })
}

/// Parse a schema document.
pub fn parse_schema(content: &str) -> Result<Vec<TypeSpecification>, SchemaError> {
    let document: SchemaDocument = serde_yaml::from_str(content)?;
    let specs = document
        .types
        .into_iter()
        .map(|entry| match entry {
            TypeEntry::Product(entry) => product(entry).map(TypeSpecification::Product),
            TypeEntry::Sum(entry) => sum(entry).map(TypeSpecification::Sum),
        })
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(types = specs.len(), "schema parsed");
    Ok(specs)
}

/// Load a schema document from a file.
pub fn load_schema<P: AsRef<Path>>(path: P) -> Result<Vec<TypeSpecification>, SchemaError> {
    let content = std::fs::read_to_string(path)?;
    parse_schema(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScalarKind;

    const SCHEMA: &str = r#"
types:
  - kind: product
    name: Book
    codec: both
    doc: ["A book."]
    fields:
      - name: title
        type: String
      - name: release
        type: Date
        doc:
          - "Release day."
          - "@format yyyy-MM-dd#day"
          - "@json releaseDate"
          - "@deprecated"
      - name: isbn
        type: String?
        annotations:
          wireKey: ISBN
  - kind: sum
    name: Shape
    codec: encode
    variants:
      - name: Empty
      - name: Rect
        arguments:
          - { type: f64, name: width }
          - { type: f64, name: height }
      - name: Pair
        arguments: [{ type: Int }, { type: "Vec<Book>" }]
  - kind: product
    name: Plain
    fields: []
"#;

    #[test]
    fn test_parse_schema() {
        let specs = parse_schema(SCHEMA).unwrap();
        assert_eq!(specs.len(), 3);

        let TypeSpecification::Product(book) = &specs[0] else {
            panic!("Book is a product");
        };
        assert_eq!(book.codec, Some(CodecDirection::Both));
        assert_eq!(book.doc, vec!["A book.".to_string()]);

        let release = &book.fields[1];
        assert_eq!(release.declared_type, TypeRef::Temporal);
        assert_eq!(release.doc, vec!["Release day.".to_string()]);
        assert_eq!(release.annotation(TEMPORAL_FORMAT), Some("yyyy-MM-dd#day"));
        assert_eq!(release.annotation(WIRE_KEY), Some("releaseDate"));
        assert_eq!(release.annotation("deprecated"), Some(""));

        let isbn = &book.fields[2];
        assert_eq!(
            isbn.declared_type,
            TypeRef::optional(TypeRef::Scalar(ScalarKind::String))
        );
        assert_eq!(isbn.annotation(WIRE_KEY), Some("ISBN"));

        let TypeSpecification::Sum(shape) = &specs[1] else {
            panic!("Shape is a sum");
        };
        assert_eq!(shape.codec, Some(CodecDirection::Encode));
        assert_eq!(shape.variants[1].arguments[1].body_name.as_deref(), Some("height"));
        assert_eq!(shape.variants[2].arguments[1].position, 1);
        assert_eq!(
            shape.variants[2].arguments[1].declared_type,
            TypeRef::sequence(TypeRef::named("Book"))
        );

        // no codec entry: not annotated
        assert_eq!(specs[2].codec(), None);
    }

    #[test]
    fn test_explicit_annotations_win() {
        let lines = vec!["@json fromDoc".to_string()];
        let (_, mut annotations) = split_doc(&lines);
        annotations.extend([(WIRE_KEY.to_string(), "explicit".to_string())]);
        assert_eq!(annotations.get(WIRE_KEY).map(String::as_str), Some("explicit"));
    }

    #[test]
    fn test_bare_json_annotation() {
        let (doc, annotations) = split_doc(&["@json".to_string(), "Text".to_string()]);
        assert_eq!(doc, vec!["Text".to_string()]);
        assert_eq!(annotations.get(WIRE_KEY).map(String::as_str), Some(""));
    }

    #[test]
    fn test_invalid_type() {
        let err = parse_schema(
            "types:\n  - kind: product\n    name: Bad\n    fields:\n      - { name: x, type: 'Vec<' }\n",
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidType { ref member, .. } if member == "x"));
    }

    #[test]
    fn test_load_schema_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.yaml");
        std::fs::write(&path, SCHEMA).unwrap();
        assert_eq!(load_schema(&path).unwrap().len(), 3);
    }
}
