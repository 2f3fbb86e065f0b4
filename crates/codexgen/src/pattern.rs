// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Translation of date patterns (`yyyy-MM-dd`) into chrono format strings.
//!
//! Schema authors write patterns in the letter-run alphabet common to most
//! date formatters. Generated code parses and renders with chrono, so each
//! pattern is translated once, at generation time, and rejected early if a
//! letter run has no chrono counterpart or the rendered text could not be
//! parsed back into the same instant.
//!
//! Fields a pattern leaves out are filled from the epoch when decoding
//! (`yyyy-MM` reads as the first of the month, `HH:mm` as a time on
//! 1970-01-01).

use chrono::format::{Item, StrftimeItems};
use std::collections::BTreeSet;

/// Translate `pattern` into a chrono `strftime` format.
///
/// Returns a human-readable reason on failure.
pub fn translate(pattern: &str) -> Result<String, String> {
    if pattern.trim().is_empty() {
        return Err("empty pattern".to_string());
    }

    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut letters = BTreeSet::new();
    let mut idx = 0;

    while idx < chars.len() {
        let c = chars[idx];

        if c == '\'' {
            // '' is an escaped apostrophe
            if chars.get(idx + 1) == Some(&'\'') {
                out.push('\'');
                idx += 2;
                continue;
            }
            idx += 1;
            loop {
                match chars.get(idx) {
                    None => return Err("unterminated quoted text".to_string()),
                    Some('\'') if chars.get(idx + 1) == Some(&'\'') => {
                        out.push('\'');
                        idx += 2;
                    }
                    Some('\'') => {
                        idx += 1;
                        break;
                    }
                    Some(&literal) => {
                        push_literal(&mut out, literal);
                        idx += 1;
                    }
                }
            }
            continue;
        }

        if c.is_ascii_alphabetic() {
            let run = chars[idx..].iter().take_while(|&&n| n == c).count();
            out.push_str(letter_run(c, run)?);
            letters.insert(c);
            idx += run;
            continue;
        }

        push_literal(&mut out, c);
        idx += 1;
    }

    check_parseable(&letters)?;

    if StrftimeItems::new(&out).any(|item| matches!(item, Item::Error)) {
        return Err(format!("translated format `{out}` is not accepted by chrono"));
    }
    Ok(out)
}

/// Reject letter combinations whose output cannot be read back unambiguously.
fn check_parseable(letters: &BTreeSet<char>) -> Result<(), String> {
    let has = |letter: char| letters.contains(&letter);

    if has('h') && !has('a') {
        return Err("12-hour `h` needs an `a` (AM/PM) marker".to_string());
    }
    if has('a') && !has('h') && !has('H') {
        return Err("`a` (AM/PM) needs an hour".to_string());
    }
    if has('E') && !(has('y') && has('M') && has('d')) {
        return Err("weekday `E` needs a full date (`y`, `M` and `d`)".to_string());
    }
    Ok(())
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

// @audit-ok: Simple pattern matching - letter run to chrono specifier table
fn letter_run(letter: char, run: usize) -> Result<&'static str, String> {
    let spec = match (letter, run) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', 1) => "%-m",
        ('M', 2) => "%m",
        ('M', 3) => "%b",
        ('M', 4) => "%B",
        ('d', 1) => "%-d",
        ('d', 2) => "%d",
        ('H', 1) => "%-H",
        ('H', 2) => "%H",
        ('h', 1) => "%-I",
        ('h', 2) => "%I",
        ('m', 1) => "%-M",
        ('m', 2) => "%M",
        ('s', 1) => "%-S",
        ('s', 2) => "%S",
        ('S', 3) => "%3f",
        ('S', 6) => "%6f",
        ('S', 9) => "%9f",
        ('a', 1) => "%p",
        ('E', 1..=3) => "%a",
        ('E', 4) => "%A",
        ('Z', 1..=3) => "%z",
        ('Z', 5) => "%:z",
        ('X', 2) => "%z",
        ('X', 3) => "%:z",
        _ => {
            let text: String = std::iter::repeat(letter).take(run).collect();
            return Err(format!("unsupported pattern letters `{text}`"));
        }
    };
    Ok(spec)
}
