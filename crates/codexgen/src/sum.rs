// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Sum-type codec generator.
//!
//! A sum value travels as a keyed container holding exactly one key, the
//! variant tag. The value under that key depends on the variant's arity:
//!
//! - 0 arguments: the tag name itself
//! - 1 argument: the argument
//! - k arguments: an ordered group written by `write_group_k`

use crate::declaration::tag_enum_name;
use crate::error::Result;
use crate::group;
use crate::model::{SumSpec, VariantSpec};
use crate::naming::{ident, string_literal};
use crate::validate::{self, ArgumentNaming};
use crate::writer::SourceWriter;
use crate::EmitContext;

/// Generated codec bodies of one sum type.
#[derive(Debug, Default)]
pub struct SumCodec {
    /// Naming policy of every variant, in declaration order.
    pub naming: Vec<ArgumentNaming>,
    pub decode: Option<String>,
    pub encode: Option<String>,
}

/// Identifiers bound to the arguments of `variant` under `policy`.
fn bindings(variant: &VariantSpec, policy: ArgumentNaming) -> Vec<String> {
    variant
        .arguments
        .iter()
        .map(|arg| match (policy, &arg.body_name) {
            (ArgumentNaming::Named, Some(label)) => ident(label),
            _ => arg.fallback_name(),
        })
        .collect()
}

/// `Self::Tag`, `Self::Tag(a, b)` or `Self::Tag { a, b }` over `names`.
fn constructor(variant: &VariantSpec, policy: ArgumentNaming, names: &[String]) -> String {
    let tag = ident(&variant.name);
    match policy {
        ArgumentNaming::Unit => format!("Self::{tag}"),
        ArgumentNaming::Positional => format!("Self::{tag}({})", names.join(", ")),
        ArgumentNaming::Named => format!("Self::{tag} {{ {} }}", names.join(", ")),
    }
}

/// Generate the codec bodies of `spec` for the requested directions.
pub fn generate(
    spec: &SumSpec,
    decodes: bool,
    encodes: bool,
    ctx: &EmitContext<'_>,
) -> Result<SumCodec> {
    let naming = spec
        .variants
        .iter()
        .map(|variant| validate::argument_naming(&spec.name, variant))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        owner = %spec.name,
        variants = spec.variants.len(),
        decodes,
        encodes,
        "generating sum codec"
    );

    Ok(SumCodec {
        decode: decodes.then(|| emit_decode(spec, &naming, ctx)),
        encode: encodes.then(|| emit_encode(spec, &naming, ctx)),
        naming,
    })
}

fn emit_decode(spec: &SumSpec, naming: &[ArgumentNaming], ctx: &EmitContext<'_>) -> String {
    let rt = ctx.runtime;
    let tag_enum = tag_enum_name(&spec.name);
    let mut w = SourceWriter::new();

    w.block(format!("impl ::{rt}::WireDecode for {}", spec.name), |w| {
        w.block(
            format!("fn decode_wire(value: &::{rt}::Value) -> Result<Self, ::{rt}::DecodeError>"),
            |w| {
                w.line(format!("let container = ::{rt}::KeyedReader::new(value)?;"));
                w.line("let key = container.single_key()?;");
                w.block(format!("match {tag_enum}::from_key(key)"), |w| {
                    for (variant, &policy) in spec.variants.iter().zip(naming) {
                        let pattern = format!("Some({tag_enum}::{})", ident(&variant.name));
                        let tag = string_literal(&variant.name);
                        let names = bindings(variant, policy);

                        match variant.arity() {
                            0 => w.line(format!(
                                "{pattern} => Ok({}),",
                                constructor(variant, policy, &names)
                            )),
                            1 => {
                                let read = format!("container.decode({tag})?");
                                let built = match policy {
                                    ArgumentNaming::Named => format!(
                                        "Self::{} {{ {}: {read} }}",
                                        ident(&variant.name),
                                        names[0]
                                    ),
                                    _ => format!("Self::{}({read})", ident(&variant.name)),
                                };
                                w.line(format!("{pattern} => Ok({built}),"));
                            }
                            arity => {
                                let types: Vec<String> = variant
                                    .arguments
                                    .iter()
                                    .map(|arg| arg.declared_type.rust_type(rt))
                                    .collect();
                                w.block_with(format!("{pattern} =>"), "", |w| {
                                    w.line(format!(
                                        "let {}: {} = {}(&container, {tag})?;",
                                        group::tuple_of(&names),
                                        group::tuple_of(&types),
                                        ctx.group_item(&group::read_fn(arity))
                                    ));
                                    w.line(format!("Ok({})", constructor(variant, policy, &names)));
                                });
                            }
                        }
                    }
                    w.line(format!(
                        "None => Err(::{rt}::DecodeError::UnknownVariantTag {{ key: key.to_owned() }}),"
                    ));
                });
            },
        );
    });
    w.finish()
}

fn emit_encode(spec: &SumSpec, naming: &[ArgumentNaming], ctx: &EmitContext<'_>) -> String {
    let rt = ctx.runtime;
    let mut w = SourceWriter::new();

    w.block(format!("impl ::{rt}::WireEncode for {}", spec.name), |w| {
        w.block(format!("fn encode_wire(&self) -> ::{rt}::Value"), |w| {
            w.line(format!("let mut container = ::{rt}::KeyedWriter::new();"));
            w.block("match self", |w| {
                for (variant, &policy) in spec.variants.iter().zip(naming) {
                    let tag = string_literal(&variant.name);
                    let names = bindings(variant, policy);
                    let pattern = constructor(variant, policy, &names);

                    let body = match variant.arity() {
                        0 => format!("container.encode({tag}, {tag})"),
                        1 => format!("container.encode({tag}, {})", names[0]),
                        arity => format!(
                            "{}(&mut container, {tag}, {})",
                            ctx.group_item(&group::write_fn(arity)),
                            names.join(", ")
                        ),
                    };
                    w.line(format!("{pattern} => {body},"));
                }
            });
            w.line("container.into_value()");
        });
    });
    w.finish()
}
