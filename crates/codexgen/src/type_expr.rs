// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Parser for type expressions (`Option<Vec<Book>>`, `Date?`, `(f64, f64)`).

use crate::model::{ScalarKind, TypeRef};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type expression `{expr}`: {reason}")]
pub struct ParseTypeError {
    pub expr: String,
    pub reason: String,
}

impl FromStr for TypeRef {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser {
            chars: s.chars().collect(),
            pos: 0,
        };
        let fail = |reason: String| ParseTypeError {
            expr: s.to_string(),
            reason,
        };

        let ty = parser.expr().map_err(fail)?;
        parser.skip_ws();
        if parser.pos != parser.chars.len() {
            return Err(fail(format!(
                "unexpected `{}` at offset {}",
                parser.chars[parser.pos], parser.pos
            )));
        }
        Ok(ty)
    }
}

// @audit-ok: Simple pattern matching - scalar and alias names
fn scalar(name: &str) -> Option<TypeRef> {
    let kind = match name {
        "bool" | "Bool" => ScalarKind::Bool,
        "i8" => ScalarKind::I8,
        "i16" => ScalarKind::I16,
        "i32" => ScalarKind::I32,
        "i64" | "Int" => ScalarKind::I64,
        "u8" => ScalarKind::U8,
        "u16" => ScalarKind::U16,
        "u32" => ScalarKind::U32,
        "u64" => ScalarKind::U64,
        "f32" | "Float" => ScalarKind::F32,
        "f64" | "Double" => ScalarKind::F64,
        "String" | "str" => ScalarKind::String,
        "Date" | "DateTime" | "Instant" => return Some(TypeRef::Temporal),
        _ => return None,
    };
    Some(TypeRef::Scalar(kind))
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn skip_ws(&mut self) {
        while self.chars.get(self.pos).is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_ws();
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), String> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(match self.peek() {
                Some(found) => format!("expected `{expected}`, found `{found}`"),
                None => format!("expected `{expected}`, found end of input"),
            })
        }
    }

    fn expr(&mut self) -> Result<TypeRef, String> {
        let mut ty = self.base()?;
        while self.eat('?') {
            ty = TypeRef::optional(ty);
        }
        Ok(ty)
    }

    fn base(&mut self) -> Result<TypeRef, String> {
        match self.peek() {
            Some('(') => self.tuple(),
            Some('[') => {
                self.pos += 1;
                let inner = self.expr()?;
                self.expect(']')?;
                Ok(TypeRef::sequence(inner))
            }
            Some(c) if c.is_alphabetic() || c == '_' || c == ':' => self.path(),
            Some(c) => Err(format!("unexpected `{c}`")),
            None => Err("empty type".to_string()),
        }
    }

    fn tuple(&mut self) -> Result<TypeRef, String> {
        self.expect('(')?;
        let mut items = Vec::new();
        let mut trailing_comma = false;
        while !self.eat(')') {
            items.push(self.expr()?);
            trailing_comma = self.eat(',');
            if !trailing_comma {
                self.expect(')')?;
                break;
            }
        }
        // `(T)` is a parenthesized type, `(T,)` a one-element group.
        if items.len() == 1 && !trailing_comma {
            return Ok(items.remove(0));
        }
        Ok(TypeRef::Tuple(items))
    }

    fn ident(&mut self) -> String {
        let start = self.pos;
        while self
            .chars
            .get(self.pos)
            .is_some_and(|c| c.is_alphanumeric() || *c == '_')
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn path(&mut self) -> Result<TypeRef, String> {
        self.skip_ws();
        let mut path = String::new();
        if self.chars.get(self.pos) == Some(&':') {
            self.expect_path_sep()?;
            path.push_str("::");
        }
        loop {
            let segment = self.ident();
            if segment.is_empty() {
                return Err("expected an identifier".to_string());
            }
            path.push_str(&segment);
            if self.chars.get(self.pos) == Some(&':') {
                self.expect_path_sep()?;
                path.push_str("::");
            } else {
                break;
            }
        }

        if !self.eat('<') {
            return Ok(scalar(&path).unwrap_or(TypeRef::Named(path)));
        }

        let mut args = vec![self.expr()?];
        while self.eat(',') {
            if self.peek() == Some('>') {
                break;
            }
            args.push(self.expr()?);
        }
        self.expect('>')?;

        match (path.as_str(), args.len()) {
            ("Option", 1) => Ok(TypeRef::optional(args.remove(0))),
            ("Vec", 1) => Ok(TypeRef::sequence(args.remove(0))),
            ("Option" | "Vec", n) => Err(format!("`{path}` takes one type argument, found {n}")),
            _ => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                Ok(TypeRef::Named(format!("{path}<{}>", args.join(", "))))
            }
        }
    }

    fn expect_path_sep(&mut self) -> Result<(), String> {
        if self.chars.get(self.pos) == Some(&':') && self.chars.get(self.pos + 1) == Some(&':') {
            self.pos += 2;
            Ok(())
        } else {
            Err("expected `::`".to_string())
        }
    }
}
