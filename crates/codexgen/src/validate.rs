// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural checks run before any code is emitted.

use crate::error::{GenerationError, NameKind, Result};
use crate::model::{ProductSpec, SumSpec, TypeRef, TypeSpecification, VariantSpec};
use crate::naming;
use std::collections::HashSet;

/// How the arguments of a variant are named in emitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentNaming {
    /// No arguments.
    Unit,
    /// Every argument carries an explicit label (struct-like variant).
    Named,
    /// No argument carries a label (tuple-like variant, `value{n}` bindings).
    Positional,
}

/// Naming policy of `variant`. All arguments are labelled or none are.
pub fn argument_naming(owner: &str, variant: &VariantSpec) -> Result<ArgumentNaming> {
    if variant.arguments.is_empty() {
        return Ok(ArgumentNaming::Unit);
    }
    let labelled = variant
        .arguments
        .iter()
        .filter(|arg| arg.body_name.is_some())
        .count();
    if labelled == variant.arguments.len() {
        Ok(ArgumentNaming::Named)
    } else if labelled == 0 {
        Ok(ArgumentNaming::Positional)
    } else {
        Err(GenerationError::InconsistentArgumentNaming {
            owner: owner.to_string(),
            variant: variant.name.clone(),
        })
    }
}

fn duplicate(owner: &str, kind: NameKind, name: &str) -> GenerationError {
    GenerationError::DuplicateName {
        owner: owner.to_string(),
        kind,
        name: name.to_string(),
    }
}

fn unsupported(owner: &str, member: &str, ty: &TypeRef, reason: &str) -> GenerationError {
    GenerationError::UnsupportedType {
        owner: owner.to_string(),
        member: member.to_string(),
        ty: ty.to_string(),
        reason: reason.to_string(),
    }
}

/// Run-level checks: unique type names and unique module names.
pub fn check_run(types: &[&TypeSpecification], group_module: &str, emit_index: bool) -> Result<()> {
    let mut names = HashSet::new();
    let mut modules = HashSet::new();
    modules.insert(group_module.to_string());
    if emit_index {
        modules.insert("mod".to_string());
    }

    for spec in types {
        let name = spec.name();
        naming::check_type(name)?;
        if !names.insert(name) {
            return Err(duplicate("schema", NameKind::Type, name));
        }
        let module = naming::snake_case(name);
        if !modules.insert(module.clone()) {
            return Err(duplicate("schema", NameKind::Module, &module));
        }
    }

    // Sum types also export `{Name}Tag`.
    for spec in types {
        if let TypeSpecification::Sum(sum) = spec {
            let tag = format!("{}Tag", sum.name);
            if names.contains(tag.as_str()) {
                return Err(duplicate("schema", NameKind::Type, &tag));
            }
        }
    }
    Ok(())
}

fn check_named_path(owner: &str, member: &str, ty: &TypeRef) -> Result<()> {
    match ty {
        TypeRef::Named(path) if path.trim().is_empty() => {
            Err(unsupported(owner, member, ty, "empty type name"))
        }
        TypeRef::Optional(inner) | TypeRef::Sequence(inner) => check_named_path(owner, member, inner),
        TypeRef::Tuple(items) => items
            .iter()
            .try_for_each(|item| check_named_path(owner, member, item)),
        _ => Ok(()),
    }
}

pub fn check_product(spec: &ProductSpec, max_arity: usize) -> Result<()> {
    let owner = spec.name.as_str();
    let mut fields = HashSet::new();

    for field in &spec.fields {
        naming::check_member(owner, &field.name)?;
        if !fields.insert(field.name.as_str()) {
            return Err(duplicate(owner, NameKind::Field, &field.name));
        }
        check_named_path(owner, &field.name, &field.declared_type)?;

        match &field.declared_type {
            TypeRef::Tuple(items) => {
                if items.is_empty() {
                    return Err(unsupported(
                        owner,
                        &field.name,
                        &field.declared_type,
                        "a group needs at least one value",
                    ));
                }
                if items.len() > max_arity {
                    return Err(GenerationError::ArityLimitExceeded {
                        owner: owner.to_string(),
                        member: field.name.clone(),
                        arity: items.len(),
                        limit: max_arity,
                    });
                }
                if items.iter().any(TypeRef::contains_tuple) {
                    return Err(unsupported(
                        owner,
                        &field.name,
                        &field.declared_type,
                        "groups cannot nest",
                    ));
                }
            }
            other if other.contains_tuple() => {
                return Err(unsupported(
                    owner,
                    &field.name,
                    other,
                    "tuples are only supported as the direct type of a field",
                ));
            }
            _ => {}
        }
    }
    Ok(())
}

pub fn check_sum(spec: &SumSpec, max_arity: usize) -> Result<()> {
    let owner = spec.name.as_str();
    if spec.variants.is_empty() {
        return Err(GenerationError::EmptySum {
            name: spec.name.clone(),
        });
    }

    let mut variants = HashSet::new();
    for variant in &spec.variants {
        naming::check_variant(owner, &variant.name)?;
        if !variants.insert(variant.name.as_str()) {
            return Err(duplicate(owner, NameKind::Variant, &variant.name));
        }

        let policy = argument_naming(owner, variant)?;
        let member = format!("{}::{}", owner, variant.name);

        if policy == ArgumentNaming::Named {
            let mut labels = HashSet::new();
            for arg in &variant.arguments {
                let label = arg.body_name.as_deref().unwrap_or_default();
                naming::check_member(&member, label)?;
                if !labels.insert(label) {
                    return Err(duplicate(&member, NameKind::Argument, label));
                }
            }
        }

        for (position, arg) in variant.arguments.iter().enumerate() {
            let arg_name = arg
                .body_name
                .clone()
                .unwrap_or_else(|| arg.fallback_name());
            if arg.position != position {
                return Err(unsupported(
                    &member,
                    &arg_name,
                    &arg.declared_type,
                    "argument positions must follow declaration order",
                ));
            }
            if arg.declared_type.contains_tuple() {
                return Err(unsupported(
                    &member,
                    &arg_name,
                    &arg.declared_type,
                    "variant arguments cannot be tuples",
                ));
            }
            check_named_path(&member, &arg_name, &arg.declared_type)?;
        }

        if variant.arity() > max_arity {
            return Err(GenerationError::ArityLimitExceeded {
                owner: owner.to_string(),
                member: variant.name.clone(),
                arity: variant.arity(),
                limit: max_arity,
            });
        }
    }
    Ok(())
}
