// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Identifier rules for emitted Rust code.

use crate::error::{GenerationError, Result};
use heck::ToSnakeCase;

const STRICT_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be raw identifiers.
const NON_RAW: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Local names the generated codecs bind themselves.
const RESERVED_MEMBERS: &[&str] = &["container", "self", "Self"];

/// Type names that would shadow the prelude inside generated units.
const RESERVED_TYPES: &[&str] = &["Option", "Result", "Vec", "String", "Box", "Self", "Value"];

fn is_identifier_shape(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn invalid(owner: &str, name: &str, reason: &str) -> GenerationError {
    GenerationError::InvalidIdentifier {
        owner: owner.to_string(),
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Check a field or argument name.
pub fn check_member(owner: &str, name: &str) -> Result<()> {
    if !is_identifier_shape(name) || name == "_" {
        return Err(invalid(owner, name, "not an identifier"));
    }
    if NON_RAW.contains(&name) || RESERVED_MEMBERS.contains(&name) {
        return Err(invalid(owner, name, "reserved by generated code"));
    }
    Ok(())
}

/// Check a variant name.
pub fn check_variant(owner: &str, name: &str) -> Result<()> {
    if !is_identifier_shape(name) || name == "_" {
        return Err(invalid(owner, name, "not an identifier"));
    }
    if NON_RAW.contains(&name) {
        return Err(invalid(owner, name, "reserved keyword"));
    }
    Ok(())
}

/// Check a type name.
pub fn check_type(name: &str) -> Result<()> {
    if !is_identifier_shape(name) || name == "_" {
        return Err(invalid(name, name, "not an identifier"));
    }
    if !name.starts_with(|c: char| c.is_ascii_uppercase()) {
        return Err(invalid(name, name, "type names start with an uppercase letter"));
    }
    if RESERVED_TYPES.contains(&name) {
        return Err(invalid(name, name, "shadows a prelude type"));
    }
    Ok(())
}

/// Render `name` as an identifier, escaping keywords (`type` -> `r#type`).
pub fn ident(name: &str) -> String {
    if STRICT_KEYWORDS.contains(&name) && !NON_RAW.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// `BookShelf` / `bookShelf` / `HTTPServer` -> `book_shelf` / `book_shelf` / `http_server`.
pub fn snake_case(name: &str) -> String {
    name.to_snake_case()
}

/// Upper-case the first character (`birthday` -> `Birthday`).
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Module name of a type unit, as an identifier.
pub fn module_name(type_name: &str) -> String {
    ident(&snake_case(type_name))
}

/// Quote `text` as a Rust string literal.
pub fn string_literal(text: &str) -> String {
    format!("{text:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("Book"), "book");
        assert_eq!(snake_case("BookShelf"), "book_shelf");
        assert_eq!(snake_case("bookShelf"), "book_shelf");
        assert_eq!(snake_case("HTTPServer"), "http_server");
        assert_eq!(snake_case("Box3"), "box3");
        assert_eq!(snake_case("already_snake"), "already_snake");
        assert_eq!(snake_case("customName"), "custom_name");
    }

    #[test]
    fn test_keywords_become_raw() {
        assert_eq!(ident("type"), "r#type");
        assert_eq!(ident("match"), "r#match");
        assert_eq!(ident("title"), "title");
        assert_eq!(module_name("Match"), "r#match");
    }

    #[test]
    fn test_member_checks() {
        assert!(check_member("Book", "title").is_ok());
        assert!(check_member("Book", "type").is_ok());
        assert!(check_member("Book", "container").is_err());
        assert!(check_member("Book", "self").is_err());
        assert!(check_member("Book", "first-name").is_err());
        assert!(check_member("Book", "1st").is_err());
    }

    #[test]
    fn test_type_checks() {
        assert!(check_type("Book").is_ok());
        assert!(check_type("book").is_err());
        assert!(check_type("Option").is_err());
        assert!(check_type("Self").is_err());
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("plain"), "\"plain\"");
        assert_eq!(string_literal("a\"b"), "\"a\\\"b\"");
        assert_eq!(string_literal("back\\slash"), "\"back\\\\slash\"");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("birthday"), "Birthday");
        assert_eq!(capitalize(""), "");
    }
}
