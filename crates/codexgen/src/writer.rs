// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Indentation-tracking writer for emitted Rust source.

const INDENT: &str = "    ";

/// Accumulates generated source line by line.
#[derive(Debug, Default)]
pub struct SourceWriter {
    out: String,
    level: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start writing at `level` indentation steps.
    pub fn at_level(level: usize) -> Self {
        Self {
            out: String::new(),
            level,
        }
    }

    /// Write one line at the current indentation. Empty text yields an empty line.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.level {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write `header {`, the body one level deeper, then `}` followed by `close`.
    pub fn block_with(&mut self, header: impl AsRef<str>, close: &str, body: impl FnOnce(&mut Self)) {
        let header = header.as_ref();
        if header.is_empty() {
            self.line("{");
        } else {
            self.line(format!("{header} {{"));
        }
        self.level += 1;
        body(self);
        self.level -= 1;
        self.line(format!("}}{close}"));
    }

    pub fn block(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) {
        self.block_with(header, "", body);
    }

    /// Write `body` one level deeper, without braces.
    pub fn indented(&mut self, body: impl FnOnce(&mut Self)) {
        self.level += 1;
        body(self);
        self.level -= 1;
    }

    /// Write `///` doc lines.
    pub fn doc(&mut self, lines: &[String]) {
        for line in lines {
            if line.is_empty() {
                self.line("///");
            } else {
                self.line(format!("/// {line}"));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn finish(self) -> String {
        self.out
    }
}
