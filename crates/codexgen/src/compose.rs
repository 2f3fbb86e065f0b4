// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Composer: runs the generators over a schema and assembles output units.
//!
//! One unit is produced per annotated type, plus the shared group family and
//! (optionally) a `mod.rs` index. The same units are also rendered into a
//! single bundle file with every module inlined, suitable for `include!`.
//!
//! Generation is all-or-nothing: any error aborts the run before a single
//! unit is handed to a sink.

use crate::config::GeneratorConfig;
use crate::declaration;
use crate::error::{GenerationError, Result};
use crate::formatter::FormatterRegistry;
use crate::group;
use crate::model::{CodecDirection, TypeSpecification};
use crate::naming;
use crate::product;
use crate::sum;
use crate::validate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tera::{Context, Tera};

const HEADER_TEMPLATE: &str = "\
// {{ file_name }}
// {{ project_name }}
//
// Generated automatically by codexgen. Do not edit.
{%- if description %}
//
// {{ description }}
{%- endif %}
";

const TYPE_UNIT_TEMPLATE: &str = "\
{% include \"header\" %}
#[allow(unused_imports)]
use super::*;

{{ declaration }}
{%- if tag_enum %}

{{ tag_enum }}
{%- endif %}
{%- if formatters %}

{{ formatters }}
{%- endif %}
{%- if decode %}

{{ decode }}
{%- endif %}
{%- if encode %}

{{ encode }}
{%- endif %}
";

const GROUP_UNIT_TEMPLATE: &str = "\
{% include \"header\" %}
{{ family }}
";

const INDEX_TEMPLATE: &str = "\
{% include \"header\" %}
{% for module in modules -%}
pub mod {{ module.ident }};
{% if module.exports -%}
pub use {{ module.ident }}::{{ module.exports }};
{% endif -%}
{% endfor -%}
";

const BUNDLE_TEMPLATE: &str = "\
{% include \"header\" %}
{%- for module in modules %}
pub mod {{ module.ident }} {
{{ module.body }}
}
{%- if module.exports %}
pub use {{ module.ident }}::{{ module.exports }};
{%- endif %}
{% endfor %}
";

/// Paths generated code uses to reach shared items.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    /// Runtime crate, addressed as `::{runtime}`.
    pub runtime: &'a str,
    /// Sibling module holding the group family.
    pub group_module: &'a str,
}

impl EmitContext<'_> {
    /// Path to an item of the group family module.
    pub fn group_item(&self, item: &str) -> String {
        format!("super::{}::{item}", self.group_module)
    }
}

/// What a unit contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Product,
    Sum,
    GroupFamily,
    Index,
}

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub kind: UnitKind,
    /// Type the unit was generated for, if any.
    pub type_name: Option<String>,
    /// Module identifier (`book`, `r#match`, `keyed_container`).
    pub module: String,
    /// Path relative to the sink root (`generated/book.rs`).
    pub target_path: PathBuf,
    pub source: String,
}

/// Result of one generation run.
#[derive(Debug, Clone)]
pub struct Generation {
    pub units: Vec<GeneratedUnit>,
    /// Every module inlined into a single file.
    pub bundle: String,
}

impl Generation {
    /// Unit generated for `type_name`.
    pub fn unit_for(&self, type_name: &str) -> Option<&GeneratedUnit> {
        self.units
            .iter()
            .find(|unit| unit.type_name.as_deref() == Some(type_name))
    }

    pub fn unit_of_kind(&self, kind: UnitKind) -> Option<&GeneratedUnit> {
        self.units.iter().find(|unit| unit.kind == kind)
    }

    /// Summary suitable for a manifest file.
    pub fn report(&self, project_name: &str) -> GenerationReport {
        GenerationReport {
            project_name: project_name.to_string(),
            units: self
                .units
                .iter()
                .map(|unit| UnitReport {
                    kind: unit.kind,
                    type_name: unit.type_name.clone(),
                    module: unit.module.clone(),
                    path: unit.target_path.display().to_string(),
                    lines: unit.source.lines().count(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub project_name: String,
    pub units: Vec<UnitReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitReport {
    pub kind: UnitKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub module: String,
    pub path: String,
    pub lines: usize,
}

#[derive(Debug, Serialize)]
struct ModuleEntry {
    ident: String,
    /// `Book` or `{Shape, ShapeTag}`; empty for the group family.
    exports: String,
    body: String,
}

/// Drives a generation run.
pub struct Generator {
    config: GeneratorConfig,
    tera: Tera,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| GenerationError::Config(e.to_string()))?;

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(vec![
            ("header", HEADER_TEMPLATE),
            ("type_unit", TYPE_UNIT_TEMPLATE),
            ("group_unit", GROUP_UNIT_TEMPLATE),
            ("index", INDEX_TEMPLATE),
            ("bundle", BUNDLE_TEMPLATE),
        ])?;

        Ok(Self { config, tera })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn context(&self) -> EmitContext<'_> {
        EmitContext {
            runtime: &self.config.runtime_crate,
            group_module: &self.config.group_module,
        }
    }

    fn header_context(&self, file_name: &str, description: &str) -> Context {
        let mut ctx = Context::new();
        ctx.insert("file_name", file_name);
        ctx.insert("project_name", &self.config.project_name);
        ctx.insert("description", description);
        ctx
    }

    fn render(&self, template: &str, ctx: &Context) -> Result<String> {
        let rendered = self.tera.render(template, ctx)?;
        let mut source = rendered.trim_end().to_string();
        source.push('\n');
        Ok(source)
    }

    fn target_path(&self, file_stem: &str) -> PathBuf {
        PathBuf::from(&self.config.output_folder).join(format!("{file_stem}.rs"))
    }

    /// Generate codecs for every annotated type in `specs`.
    pub fn generate(&self, specs: &[TypeSpecification]) -> Result<Generation> {
        let annotated: Vec<&TypeSpecification> =
            specs.iter().filter(|spec| spec.codec().is_some()).collect();
        for skipped in specs.iter().filter(|spec| spec.codec().is_none()) {
            tracing::debug!(name = skipped.name(), "type requests no codec, skipping");
        }
        if annotated.is_empty() {
            return Err(GenerationError::NoInputSpecifications);
        }

        tracing::info!(
            project = %self.config.project_name,
            types = annotated.len(),
            max_group_arity = self.config.max_group_arity,
            "generating codecs"
        );

        validate::check_run(&annotated, &self.config.group_module, self.config.emit_index)?;
        for spec in &annotated {
            match spec {
                TypeSpecification::Product(p) => validate::check_product(p, self.config.max_group_arity)?,
                TypeSpecification::Sum(s) => validate::check_sum(s, self.config.max_group_arity)?,
            }
        }

        let mut formatters = FormatterRegistry::new();
        let mut units = Vec::with_capacity(annotated.len() + 2);

        units.push(self.group_unit()?);
        for spec in &annotated {
            units.push(self.type_unit(spec, &mut formatters)?);
        }
        if self.config.emit_index {
            units.push(self.index_unit(&units)?);
        }

        let bundle = self.bundle(&units)?;

        tracing::info!(
            units = units.len(),
            formatters = formatters.len(),
            "generation complete"
        );
        Ok(Generation { units, bundle })
    }

    fn group_unit(&self) -> Result<GeneratedUnit> {
        let module = self.config.group_module.clone();
        let file_name = format!("{module}.rs");
        let description = format!(
            "Ordered group codecs for 1 to {} values under one key.",
            self.config.max_group_arity
        );

        let mut ctx = self.header_context(&file_name, &description);
        ctx.insert(
            "family",
            group::emit_family(self.config.max_group_arity, &self.config.runtime_crate).trim_end(),
        );

        Ok(GeneratedUnit {
            kind: UnitKind::GroupFamily,
            type_name: None,
            target_path: self.target_path(&module),
            module,
            source: self.render("group_unit", &ctx)?,
        })
    }

    fn type_unit(
        &self,
        spec: &TypeSpecification,
        formatters: &mut FormatterRegistry,
    ) -> Result<GeneratedUnit> {
        let Some(direction) = spec.codec() else {
            return Err(GenerationError::NoInputSpecifications);
        };
        let decodes = direction.decodes();
        let encodes = direction.encodes();
        let emit = self.context();
        let runtime = emit.runtime;
        let derives = &self.config.default_derives;

        let (kind, declaration, tag_enum, used, decode, encode) = match spec {
            TypeSpecification::Product(p) => {
                let codec = product::generate(p, decodes, encodes, &emit, formatters)?;
                (
                    UnitKind::Product,
                    declaration::emit_product(p, derives, runtime),
                    String::new(),
                    codec.formatters,
                    codec.decode,
                    codec.encode,
                )
            }
            TypeSpecification::Sum(s) => {
                let codec = sum::generate(s, decodes, encodes, &emit)?;
                (
                    UnitKind::Sum,
                    declaration::emit_sum(s, &codec.naming, derives, runtime),
                    declaration::emit_tag_enum(s),
                    BTreeSet::new(),
                    codec.decode,
                    codec.encode,
                )
            }
        };

        let name = spec.name();
        let stem = naming::snake_case(name);
        let file_name = format!("{stem}.rs");
        let what = match kind {
            UnitKind::Sum => "sum type",
            _ => "product type",
        };
        let directions = match direction {
            CodecDirection::Both => "encode and decode",
            CodecDirection::Decode => "decode",
            CodecDirection::Encode => "encode",
        };
        let description = format!("Codec for {what} `{name}` ({directions}).");

        let mut ctx = self.header_context(&file_name, &description);
        ctx.insert("declaration", declaration.trim_end());
        ctx.insert("tag_enum", tag_enum.trim_end());
        ctx.insert(
            "formatters",
            formatters.emit_accessors(&used, runtime).trim_end(),
        );
        ctx.insert("decode", decode.as_deref().unwrap_or_default().trim_end());
        ctx.insert("encode", encode.as_deref().unwrap_or_default().trim_end());

        let source = self.render("type_unit", &ctx)?;
        tracing::debug!(name, path = %file_name, lines = source.lines().count(), "unit composed");

        Ok(GeneratedUnit {
            kind,
            type_name: Some(name.to_string()),
            module: naming::ident(&stem),
            target_path: self.target_path(&stem),
            source,
        })
    }

    fn module_entries(&self, units: &[GeneratedUnit]) -> Vec<ModuleEntry> {
        units
            .iter()
            .filter(|unit| unit.kind != UnitKind::Index)
            .map(|unit| {
                let exports = match (unit.kind, &unit.type_name) {
                    (UnitKind::Sum, Some(name)) => {
                        format!("{{{name}, {}}}", declaration::tag_enum_name(name))
                    }
                    (UnitKind::Product, Some(name)) => name.clone(),
                    _ => String::new(),
                };
                ModuleEntry {
                    ident: unit.module.clone(),
                    exports,
                    body: indent(&unit.source),
                }
            })
            .collect()
    }

    fn index_unit(&self, units: &[GeneratedUnit]) -> Result<GeneratedUnit> {
        let mut ctx = self.header_context("mod.rs", "Module index of the generated codecs.");
        ctx.insert("modules", &self.module_entries(units));

        Ok(GeneratedUnit {
            kind: UnitKind::Index,
            type_name: None,
            module: "mod".to_string(),
            target_path: self.target_path("mod"),
            source: self.render("index", &ctx)?,
        })
    }

    fn bundle(&self, units: &[GeneratedUnit]) -> Result<String> {
        let file_name = format!("{}.rs", naming::snake_case(&self.config.project_name));
        let mut ctx = self.header_context(
            &file_name,
            "Every generated module in one file, for use with `include!`.",
        );
        ctx.insert("modules", &self.module_entries(units));
        self.render("bundle", &ctx)
    }
}

/// Indent every non-empty line by one level.
fn indent(source: &str) -> String {
    source
        .trim_end()
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("    {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
