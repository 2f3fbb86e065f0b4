// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Product-type codec generator.
//!
//! Every field maps to one key of the keyed container. Decoding builds the
//! value in a single struct expression, so a failure on any field aborts the
//! whole decode.

use crate::annotation::{self, TemporalStrategy};
use crate::error::{GenerationError, NameKind, Result};
use crate::formatter::FormatterRegistry;
use crate::group;
use crate::model::{ProductSpec, TypeRef};
use crate::naming::{ident, string_literal};
use crate::writer::SourceWriter;
use crate::EmitContext;
use std::collections::{BTreeSet, HashMap};

/// How one field is read and written.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldPlan {
    Value { optional: bool },
    Instant { optional: bool, strategy: TemporalStrategy },
    Group { arity: usize },
}

#[derive(Debug)]
struct ResolvedField {
    ident: String,
    key: String,
    plan: FieldPlan,
}

/// Generated codec bodies of one product type.
#[derive(Debug, Default)]
pub struct ProductCodec {
    /// `impl WireDecode`, when the type decodes.
    pub decode: Option<String>,
    /// `impl WireEncode`, when the type encodes.
    pub encode: Option<String>,
    /// Formatter accessors the bodies call.
    pub formatters: BTreeSet<String>,
}

fn resolve(
    spec: &ProductSpec,
    formatters: &mut FormatterRegistry,
) -> Result<Vec<ResolvedField>> {
    let mut keys: HashMap<String, &str> = HashMap::new();
    let mut resolved = Vec::with_capacity(spec.fields.len());

    for field in &spec.fields {
        let key = annotation::resolve_key(field);
        if let Some(previous) = keys.insert(key.clone(), &field.name) {
            tracing::debug!(owner = %spec.name, previous, field = %field.name, key = %key, "wire key collision");
            return Err(GenerationError::DuplicateName {
                owner: spec.name.clone(),
                kind: NameKind::Field,
                name: key,
            });
        }

        let plan = match &field.declared_type {
            TypeRef::Tuple(items) => FieldPlan::Group { arity: items.len() },
            ty => match annotation::resolve_temporal_strategy(&spec.name, field, formatters)? {
                Some(strategy) => FieldPlan::Instant {
                    optional: ty.is_optional(),
                    strategy,
                },
                None => FieldPlan::Value {
                    optional: ty.is_optional(),
                },
            },
        };

        resolved.push(ResolvedField {
            ident: ident(&field.name),
            key,
            plan,
        });
    }
    Ok(resolved)
}

/// Generate the codec bodies of `spec` for the requested directions.
pub fn generate(
    spec: &ProductSpec,
    decodes: bool,
    encodes: bool,
    ctx: &EmitContext<'_>,
    formatters: &mut FormatterRegistry,
) -> Result<ProductCodec> {
    let fields = resolve(spec, formatters)?;

    let used = fields
        .iter()
        .filter_map(|field| match &field.plan {
            FieldPlan::Instant {
                strategy: TemporalStrategy::Custom(formatter),
                ..
            } => Some(formatter.accessor.clone()),
            _ => None,
        })
        .collect();

    tracing::debug!(
        owner = %spec.name,
        fields = fields.len(),
        decodes,
        encodes,
        "generating product codec"
    );

    Ok(ProductCodec {
        decode: decodes.then(|| emit_decode(&spec.name, &fields, ctx)),
        encode: encodes.then(|| emit_encode(&spec.name, &fields, ctx)),
        formatters: used,
    })
}

fn emit_decode(name: &str, fields: &[ResolvedField], ctx: &EmitContext<'_>) -> String {
    let rt = ctx.runtime;
    let mut w = SourceWriter::new();

    w.block(format!("impl ::{rt}::WireDecode for {name}"), |w| {
        w.block(
            format!("fn decode_wire(value: &::{rt}::Value) -> Result<Self, ::{rt}::DecodeError>"),
            |w| {
                if fields.is_empty() {
                    w.line(format!("::{rt}::KeyedReader::new(value)?;"));
                    w.line("Ok(Self {})");
                    return;
                }
                w.line(format!("let container = ::{rt}::KeyedReader::new(value)?;"));
                w.block_with("Ok(Self", ")", |w| {
                    for field in fields {
                        let key = string_literal(&field.key);
                        let expr = match &field.plan {
                            FieldPlan::Value { optional: false } => {
                                format!("container.decode({key})?")
                            }
                            FieldPlan::Value { optional: true } => {
                                format!("container.decode_if_present({key})?")
                            }
                            FieldPlan::Instant {
                                optional: false,
                                strategy,
                            } => format!(
                                "container.decode_instant({key}, {})?",
                                strategy.codec_expr(rt)
                            ),
                            FieldPlan::Instant {
                                optional: true,
                                strategy,
                            } => format!(
                                "container.decode_instant_if_present({key}, {})?",
                                strategy.codec_expr(rt)
                            ),
                            FieldPlan::Group { arity } => format!(
                                "{}(&container, {key})?",
                                ctx.group_item(&group::read_fn(*arity))
                            ),
                        };
                        w.line(format!("{}: {expr},", field.ident));
                    }
                });
            },
        );
    });
    w.finish()
}

fn emit_encode(name: &str, fields: &[ResolvedField], ctx: &EmitContext<'_>) -> String {
    let rt = ctx.runtime;
    let mut w = SourceWriter::new();

    w.block(format!("impl ::{rt}::WireEncode for {name}"), |w| {
        w.block(format!("fn encode_wire(&self) -> ::{rt}::Value"), |w| {
            if fields.is_empty() {
                w.line(format!("::{rt}::KeyedWriter::new().into_value()"));
                return;
            }
            w.line(format!("let mut container = ::{rt}::KeyedWriter::new();"));
            for field in fields {
                let key = string_literal(&field.key);
                let access = format!("self.{}", field.ident);
                let line = match &field.plan {
                    FieldPlan::Value { optional: false } => {
                        format!("container.encode({key}, &{access});")
                    }
                    FieldPlan::Value { optional: true } => {
                        format!("container.encode_if_present({key}, &{access});")
                    }
                    FieldPlan::Instant {
                        optional: false,
                        strategy,
                    } => format!(
                        "container.encode_instant({key}, &{access}, {});",
                        strategy.codec_expr(rt)
                    ),
                    FieldPlan::Instant {
                        optional: true,
                        strategy,
                    } => format!(
                        "container.encode_instant_if_present({key}, &{access}, {});",
                        strategy.codec_expr(rt)
                    ),
                    FieldPlan::Group { arity } => {
                        let values: Vec<String> =
                            (0..*arity).map(|i| format!("&{access}.{i}")).collect();
                        format!(
                            "{}(&mut container, {key}, {});",
                            ctx.group_item(&group::write_fn(*arity)),
                            values.join(", ")
                        )
                    }
                };
                w.line(line);
            }
            w.line("container.into_value()");
        });
    });
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldSpec, ScalarKind};

    const CTX: EmitContext<'static> = EmitContext {
        runtime: "rt",
        group_module: "keyed_container",
    };

    fn string() -> TypeRef {
        TypeRef::Scalar(ScalarKind::String)
    }

    fn user() -> ProductSpec {
        ProductSpec::new("User")
            .with_field(FieldSpec::new("first_name", string()).with_wire_key("firstName"))
            .with_field(FieldSpec::new("nickname", TypeRef::optional(string())))
            .with_field(
                FieldSpec::new("birthday", TypeRef::Temporal).with_temporal_format("yyyy-MM-dd"),
            )
            .with_field(
                FieldSpec::new("last_seen", TypeRef::optional(TypeRef::Temporal))
                    .with_temporal_format("seconds"),
            )
            .with_field(FieldSpec::new(
                "home",
                TypeRef::Tuple(vec![TypeRef::Scalar(ScalarKind::F64), TypeRef::Scalar(ScalarKind::F64)]),
            ))
    }

    #[test]
    fn test_decode_body() {
        let mut formatters = FormatterRegistry::new();
        let codec = generate(&user(), true, false, &CTX, &mut formatters).unwrap();
        let decode = codec.decode.unwrap();

        assert!(codec.encode.is_none());
        assert!(decode.contains("impl ::rt::WireDecode for User {"));
        assert!(decode.contains("let container = ::rt::KeyedReader::new(value)?;"));
        assert!(decode.contains("first_name: container.decode(\"firstName\")?,"));
        assert!(decode.contains("nickname: container.decode_if_present(\"nickname\")?,"));
        assert!(decode.contains("birthday: container.decode_instant(\"birthday\", birthday_formatter())?,"));
        assert!(decode.contains(
            "last_seen: container.decode_instant_if_present(\"last_seen\", &::rt::UnixSeconds)?,"
        ));
        assert!(decode.contains("home: super::keyed_container::read_group_2(&container, \"home\")?,"));
        assert_eq!(
            codec.formatters.into_iter().collect::<Vec<_>>(),
            vec!["birthday_formatter".to_string()]
        );
    }

    #[test]
    fn test_encode_body() {
        let mut formatters = FormatterRegistry::new();
        let codec = generate(&user(), false, true, &CTX, &mut formatters).unwrap();
        let encode = codec.encode.unwrap();

        assert!(codec.decode.is_none());
        assert!(encode.contains("let mut container = ::rt::KeyedWriter::new();"));
        assert!(encode.contains("container.encode(\"firstName\", &self.first_name);"));
        assert!(encode.contains("container.encode_if_present(\"nickname\", &self.nickname);"));
        assert!(encode.contains(
            "container.encode_instant(\"birthday\", &self.birthday, birthday_formatter());"
        ));
        assert!(encode.contains(
            "super::keyed_container::write_group_2(&mut container, \"home\", &self.home.0, &self.home.1);"
        ));
        assert!(encode.trim_end().ends_with("container.into_value()\n    }\n}"));
    }

    #[test]
    fn test_untagged_temporal_defaults_to_iso() {
        let spec = ProductSpec::new("Event").with_field(FieldSpec::new("at", TypeRef::Temporal));
        let mut formatters = FormatterRegistry::new();
        let codec = generate(&spec, true, true, &CTX, &mut formatters).unwrap();
        assert!(codec
            .decode
            .unwrap()
            .contains("at: container.decode_instant(\"at\", &::rt::Iso8601)?,"));
    }

    #[test]
    fn test_empty_product() {
        let mut formatters = FormatterRegistry::new();
        let codec = generate(&ProductSpec::new("Nothing"), true, true, &CTX, &mut formatters).unwrap();
        let decode = codec.decode.unwrap();
        let encode = codec.encode.unwrap();
        assert!(decode.contains("Ok(Self {})"));
        assert!(!decode.contains("let container"));
        assert!(encode.contains("::rt::KeyedWriter::new().into_value()"));
        assert!(!encode.contains("let mut"));
    }

    #[test]
    fn test_wire_key_collision() {
        let spec = ProductSpec::new("Book")
            .with_field(FieldSpec::new("title", string()))
            .with_field(FieldSpec::new("name", string()).with_wire_key("title"));
        let mut formatters = FormatterRegistry::new();
        assert!(matches!(
            generate(&spec, true, true, &CTX, &mut formatters),
            Err(GenerationError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_key_escaping() {
        let spec = ProductSpec::new("Odd")
            .with_field(FieldSpec::new("quote", string()).with_wire_key("say \"hi\""));
        let mut formatters = FormatterRegistry::new();
        let codec = generate(&spec, false, true, &CTX, &mut formatters).unwrap();
        assert!(codec
            .encode
            .unwrap()
            .contains(r#"container.encode("say \"hi\"", &self.quote);"#));
    }
}
