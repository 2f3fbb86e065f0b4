// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Named formatter registry.
//!
//! One formatter exists per distinct name. Every field requesting that name
//! shares it, and each unit declares the accessor once, however many of its
//! fields use it.

use crate::error::{GenerationError, Result};
use crate::naming;
use crate::writer::SourceWriter;
use std::collections::{BTreeMap, BTreeSet};

/// Handle to a registered formatter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormatterRef {
    /// Name as requested (`Birthday`, `customName`).
    pub name: String,
    /// Accessor function emitted in generated code (`birthday_formatter`).
    pub accessor: String,
}

#[derive(Debug, Clone)]
struct FormatterEntry {
    name: String,
    pattern: String,
    format: String,
}

/// Construct-or-reuse registry, scoped to one generation run.
#[derive(Debug, Default)]
pub struct FormatterRegistry {
    entries: BTreeMap<String, FormatterEntry>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with `pattern` (translated to `format`), or reuse it.
    ///
    /// Names are compared by accessor identity, so `customName` and
    /// `CustomName` are the same formatter.
    pub fn request(&mut self, name: &str, pattern: &str, format: &str) -> Result<FormatterRef> {
        let accessor = format!("{}_formatter", naming::snake_case(name));

        if let Some(existing) = self.entries.get(&accessor) {
            if existing.pattern != pattern {
                return Err(GenerationError::ConflictingFormatter {
                    name: name.to_string(),
                    first: existing.pattern.clone(),
                    second: pattern.to_string(),
                });
            }
            tracing::trace!(formatter = name, "reusing formatter");
        } else {
            tracing::debug!(formatter = name, pattern, format, "registering formatter");
            self.entries.insert(
                accessor.clone(),
                FormatterEntry {
                    name: name.to_string(),
                    pattern: pattern.to_string(),
                    format: format.to_string(),
                },
            );
        }

        Ok(FormatterRef {
            name: name.to_string(),
            accessor,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Emit accessor functions for `used`, each once, in name order.
    pub fn emit_accessors(&self, used: &BTreeSet<String>, runtime: &str) -> String {
        let mut w = SourceWriter::new();
        for (idx, accessor) in used.iter().enumerate() {
            let Some(entry) = self.entries.get(accessor) else {
                continue;
            };
            if idx > 0 {
                w.blank();
            }
            w.line(format!(
                "/// Formatter `{}` (`{}`).",
                entry.name, entry.pattern
            ));
            w.block(
                format!("fn {accessor}() -> &'static ::{runtime}::PatternFormatter"),
                |w| {
                    w.line(format!(
                        "static FORMATTER: ::std::sync::OnceLock<::{runtime}::PatternFormatter> = ::std::sync::OnceLock::new();"
                    ));
                    w.line(format!(
                        "FORMATTER.get_or_init(|| ::{runtime}::PatternFormatter::new({}))",
                        naming::string_literal(&entry.format)
                    ));
                },
            );
        }
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reuse_same_name() {
        let mut registry = FormatterRegistry::new();
        let a = registry.request("shared", "yyyy-MM-dd", "%Y-%m-%d").unwrap();
        let b = registry.request("shared", "yyyy-MM-dd", "%Y-%m-%d").unwrap();
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_conflicting_patterns() {
        let mut registry = FormatterRegistry::new();
        registry.request("day", "yyyy-MM-dd", "%Y-%m-%d").unwrap();
        let err = registry.request("Day", "dd/MM/yyyy", "%d/%m/%Y").unwrap_err();
        assert!(matches!(
            err,
            GenerationError::ConflictingFormatter { ref first, ref second, .. }
                if first == "yyyy-MM-dd" && second == "dd/MM/yyyy"
        ));
    }

    #[test]
    fn test_accessor_emitted_once() {
        let mut registry = FormatterRegistry::new();
        let a = registry.request("customName", "yyyy", "%Y").unwrap();
        assert_eq!(a.accessor, "custom_name_formatter");

        let used: BTreeSet<String> = [a.accessor.clone(), a.accessor].into_iter().collect();
        let source = registry.emit_accessors(&used, "rt");
        assert_eq!(source.matches("fn custom_name_formatter()").count(), 1);
        assert!(source.contains("::rt::PatternFormatter::new(\"%Y\")"));
        assert!(source.contains("static FORMATTER: ::std::sync::OnceLock<::rt::PatternFormatter>"));
    }
}
