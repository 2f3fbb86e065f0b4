// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type declarations and tag enumerations of generated units.

use crate::model::{ProductSpec, SumSpec};
use crate::naming::{ident, string_literal};
use crate::validate::ArgumentNaming;
use crate::writer::SourceWriter;

fn derive_line(derives: &[String]) -> Option<String> {
    let derives: Vec<&str> = derives
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .collect();
    if derives.is_empty() {
        None
    } else {
        Some(format!("#[derive({})]", derives.join(", ")))
    }
}

/// Name of the tag enumeration of a sum type.
pub fn tag_enum_name(sum: &str) -> String {
    format!("{sum}Tag")
}

/// `pub struct Name { ... }`
pub fn emit_product(spec: &ProductSpec, default_derives: &[String], runtime: &str) -> String {
    let mut w = SourceWriter::new();
    w.doc(&spec.doc);
    if let Some(derive) = derive_line(spec.derives.as_deref().unwrap_or(default_derives)) {
        w.line(derive);
    }
    w.block(format!("pub struct {}", spec.name), |w| {
        for field in &spec.fields {
            w.doc(&field.doc);
            w.line(format!(
                "pub {}: {},",
                ident(&field.name),
                field.declared_type.rust_type(runtime)
            ));
        }
    });
    w.finish()
}

/// `pub enum Name { ... }`; `naming` holds the policy of each variant, in order.
pub fn emit_sum(
    spec: &SumSpec,
    naming: &[ArgumentNaming],
    default_derives: &[String],
    runtime: &str,
) -> String {
    let mut w = SourceWriter::new();
    w.doc(&spec.doc);
    if let Some(derive) = derive_line(spec.derives.as_deref().unwrap_or(default_derives)) {
        w.line(derive);
    }
    w.block(format!("pub enum {}", spec.name), |w| {
        for (variant, policy) in spec.variants.iter().zip(naming) {
            w.doc(&variant.doc);
            let name = ident(&variant.name);
            match policy {
                ArgumentNaming::Unit => w.line(format!("{name},")),
                ArgumentNaming::Positional => {
                    let types: Vec<String> = variant
                        .arguments
                        .iter()
                        .map(|arg| arg.declared_type.rust_type(runtime))
                        .collect();
                    w.line(format!("{name}({}),", types.join(", ")));
                }
                ArgumentNaming::Named => {
                    w.block_with(name, ",", |w| {
                        for arg in &variant.arguments {
                            let label = arg.body_name.as_deref().unwrap_or_default();
                            w.line(format!(
                                "{}: {},",
                                ident(label),
                                arg.declared_type.rust_type(runtime)
                            ));
                        }
                    });
                }
            }
        }
    });
    w.finish()
}

/// Fieldless mirror of a sum type's variants, keyed by wire tag.
pub fn emit_tag_enum(spec: &SumSpec) -> String {
    let tag = tag_enum_name(&spec.name);
    let mut w = SourceWriter::new();

    w.line(format!("/// Wire tags of [`{}`].", spec.name));
    w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
    w.block(format!("pub enum {tag}"), |w| {
        for variant in &spec.variants {
            w.line(format!("{},", ident(&variant.name)));
        }
    });
    w.blank();
    w.block(format!("impl {tag}"), |w| {
        w.line(format!(
            "pub const ALL: [Self; {}] = [{}];",
            spec.variants.len(),
            spec.variants
                .iter()
                .map(|v| format!("Self::{}", ident(&v.name)))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        w.blank();
        w.line("/// Key this variant is written under.");
        w.block("pub fn key(self) -> &'static str", |w| {
            w.block("match self", |w| {
                for variant in &spec.variants {
                    w.line(format!(
                        "Self::{} => {},",
                        ident(&variant.name),
                        string_literal(&variant.name)
                    ));
                }
            });
        });
        w.blank();
        w.block("pub fn from_key(key: &str) -> Option<Self>", |w| {
            w.block("match key", |w| {
                for variant in &spec.variants {
                    w.line(format!(
                        "{} => Some(Self::{}),",
                        string_literal(&variant.name),
                        ident(&variant.name)
                    ));
                }
                w.line("_ => None,");
            });
        });
    });
    w.finish()
}
