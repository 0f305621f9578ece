//! Diagnostic emitters.
//!
//! - [`TerminalEmitter`]: human-readable, optionally colored, with a source
//!   snippet under each primary label
//! - [`JsonEmitter`]: one JSON object per line, for editors and scripts

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use crate::span_utils::LineIndex;
use crate::Diagnostic;

/// A source text together with the name diagnostics should show for it.
pub struct SourceFile<'a> {
    pub path: &'a str,
    pub text: &'a str,
    pub lines: LineIndex,
}

impl<'a> SourceFile<'a> {
    pub fn new(path: &'a str, text: &'a str) -> Self {
        SourceFile {
            path,
            text,
            lines: LineIndex::new(text),
        }
    }
}

/// Sink for rendered diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, file: &SourceFile<'_>, diagnostic: &Diagnostic);

    fn emit_all(&mut self, file: &SourceFile<'_>, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(file, diag);
        }
    }

    fn flush(&mut self);

    /// Closing line after all files were reported.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Escape a string for inclusion in a JSON string literal.
pub(crate) fn escape_json(s: &str) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
