// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Arity-bounded group codec family.
//!
//! Rust has no variadic generics, so one `write_group_k` / `read_group_k` pair
//! is materialized for every arity `k` in `1..=max_arity`. Both sides address
//! a single ordered child container under one key and visit values in the
//! same positional order.

use crate::writer::SourceWriter;

/// Name of the writer for arity `k`.
pub fn write_fn(arity: usize) -> String {
    format!("write_group_{arity}")
}

/// Name of the reader for arity `k`.
pub fn read_fn(arity: usize) -> String {
    format!("read_group_{arity}")
}

/// Tuple expression or type over `items`, with the trailing comma for one item.
pub fn tuple_of(items: &[String]) -> String {
    if items.len() == 1 {
        format!("({},)", items[0])
    } else {
        format!("({})", items.join(", "))
    }
}

fn type_params(arity: usize) -> Vec<String> {
    (1..=arity).map(|i| format!("V{i}")).collect()
}

/// Emit the group family source for arities `1..=max_arity`.
pub fn emit_family(max_arity: usize, runtime: &str) -> String {
    let mut w = SourceWriter::new();
    for arity in 1..=max_arity {
        if arity > 1 {
            w.blank();
        }
        emit_write(&mut w, arity, runtime);
        w.blank();
        emit_read(&mut w, arity, runtime);
    }
    w.finish()
}

fn emit_write(w: &mut SourceWriter, arity: usize, runtime: &str) {
    let params = type_params(arity);
    let plural = if arity == 1 { "" } else { "s" };

    w.line(format!(
        "/// Write {arity} value{plural} as one ordered group under `key`."
    ));
    w.line(format!("pub fn {}<{}>(", write_fn(arity), params.join(", ")));
    w.indented(|w| {
        w.line(format!("container: &mut ::{runtime}::KeyedWriter,"));
        w.line("key: &str,");
        for i in 1..=arity {
            w.line(format!("v{i}: &V{i},"));
        }
    });
    w.line(") where");
    w.indented(|w| {
        for param in &params {
            w.line(format!("{param}: ::{runtime}::WireEncode + ?Sized,"));
        }
    });
    w.block("", |w| {
        w.line("let mut group = container.nested_sequence(key);");
        for i in 1..=arity {
            w.line(format!("group.encode(v{i});"));
        }
    });
}

fn emit_read(w: &mut SourceWriter, arity: usize, runtime: &str) {
    let params = type_params(arity);
    let plural = if arity == 1 { "" } else { "s" };
    let reads: Vec<String> = (0..arity).map(|_| "group.decode()?".to_string()).collect();

    w.line(format!(
        "/// Read the {arity} value{plural} written by [`{}`], in the same order.",
        write_fn(arity)
    ));
    w.line(format!("pub fn {}<{}>(", read_fn(arity), params.join(", ")));
    w.indented(|w| {
        w.line(format!("container: &::{runtime}::KeyedReader<'_>,"));
        w.line("key: &str,");
    });
    w.line(format!(
        ") -> Result<{}, ::{runtime}::DecodeError>",
        tuple_of(&params)
    ));
    w.line("where");
    w.indented(|w| {
        for param in &params {
            w.line(format!("{param}: ::{runtime}::WireDecode,"));
        }
    });
    w.block("", |w| {
        w.line(format!(
            "let mut group = container.nested_group(key, {arity})?;"
        ));
        w.line(format!("Ok({})", tuple_of(&reads)));
    });
}
