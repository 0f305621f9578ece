//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support:
//!
//! ```text
//! error[E1003]: Expecting ')'
//!   --> src/a.kt:1:11
//!    |
//!  1 | class Foo(
//!    |           ^ here
//! ```

use std::io::{self, Write};

use super::{DiagnosticEmitter, SourceFile};
use crate::{Diagnostic, Label, Severity};

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const WARNING: &str = "\x1b[1;33m";
    pub const NOTE: &str = "\x1b[1;36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m";
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for the terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when writing to a TTY.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    pub fn stderr(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stderr> {
        TerminalEmitter {
            writer: io::stderr(),
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        }
    }

    /// Source line of `label` with a caret underline.
    fn write_snippet(&mut self, file: &SourceFile<'_>, label: &Label, gutter: usize) {
        let (line, column) = file.lines.span_start(file.text, label.span);
        let text = file.lines.line_text(file.text, line);
        let _ = writeln!(self.writer, "{:gutter$} |", "");
        let _ = writeln!(self.writer, "{line:>gutter$} | {text}");

        let (end_line, end_column) = file.lines.line_col(file.text, label.span.end);
        let width = if end_line == line && end_column > column {
            (end_column - column) as usize
        } else {
            1
        };
        let pad = " ".repeat(column.saturating_sub(1) as usize);
        let marks = if label.is_primary { "^" } else { "-" }.repeat(width);
        let _ = write!(self.writer, "{:gutter$} | {pad}", "");
        let color = if label.is_primary {
            colors::ERROR
        } else {
            colors::SECONDARY
        };
        let underline = if label.message.is_empty() {
            marks
        } else {
            format!("{marks} {}", label.message)
        };
        self.write_colored(&underline, color);
        let _ = writeln!(self.writer);
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, file: &SourceFile<'_>, diagnostic: &Diagnostic) {
        let color = Self::severity_color(diagnostic.severity);
        self.write_colored(&diagnostic.severity.to_string(), color);
        let code = format!("[{}]", diagnostic.code);
        self.write_colored(&code, colors::BOLD);
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        let gutter = diagnostic
            .labels
            .iter()
            .map(|l| file.lines.line(l.span.start).to_string().len())
            .max()
            .unwrap_or(1);

        if let Some(span) = diagnostic.primary_span() {
            let (line, column) = file.lines.span_start(file.text, span);
            let _ = writeln!(
                self.writer,
                "{:gutter$}--> {}:{line}:{column}",
                "",
                file.path
            );
        }
        for label in &diagnostic.labels {
            self.write_snippet(file, label, gutter);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "{:gutter$} = ", "");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }
        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let _ = write!(
                self.writer,
                ": {error_count} syntax error{}",
                plural_s(error_count)
            );
            if warning_count > 0 {
                let _ = write!(
                    self.writer,
                    "; {warning_count} warning{}",
                    plural_s(warning_count)
                );
            }
            let _ = writeln!(self.writer);
        } else if warning_count > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use kt_ir::Span;

    fn render(source: &str, diag: &Diagnostic, colors: bool) -> String {
        let file = SourceFile::new("main.kt", source);
        let mut out = Vec::new();
        let mode = if colors {
            ColorMode::Always
        } else {
            ColorMode::Never
        };
        let mut emitter = TerminalEmitter::with_color_mode(&mut out, mode, false);
        emitter.emit(&file, diag);
        emitter.flush();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_rendering_points_at_column() {
        let diag = Diagnostic::error(ErrorCode::E1003)
            .with_message("Expecting ')'")
            .with_label(Span::point(10), "");
        let text = render("class Foo(", &diag, false);
        pretty_assertions::assert_eq!(
            text,
            "error[E1003]: Expecting ')'\n --> main.kt:1:11\n  |\n1 | class Foo(\n  |           ^\n\n"
        );
    }

    #[test]
    fn underline_covers_span_on_one_line() {
        let diag = Diagnostic::error(ErrorCode::E1001)
            .with_message("Unexpected tokens")
            .with_label(Span::new(8, 11), "here");
        let text = render("val x = 1 2 3\n", &diag, false);
        assert!(text.contains("1 | val x = 1 2 3\n"));
        assert!(text.contains("  |         ^^^ here\n"));
    }

    #[test]
    fn colored_output_has_escapes() {
        let diag = Diagnostic::error(ErrorCode::E1002)
            .with_message("Expecting an element")
            .with_label(Span::new(0, 1), "");
        let text = render("}", &diag, true);
        assert!(text.contains("\x1b["));
        assert!(text.contains("E1002"));
    }

    #[test]
    fn summary_counts() {
        let mut out = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut out, ColorMode::Never, true);
        emitter.emit_summary(2, 1);
        emitter.emit_summary(0, 0);
        emitter.emit_summary(1, 0);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "error: 2 syntax errors; 1 warning\nerror: 1 syntax error\n");
    }

    #[test]
    fn color_mode_resolution() {
        assert!(ColorMode::Auto.should_use_colors(true));
        assert!(!ColorMode::Auto.should_use_colors(false));
        assert!(ColorMode::Always.should_use_colors(false));
        assert!(!ColorMode::Never.should_use_colors(true));
        assert_eq!(ColorMode::default(), ColorMode::Auto);
    }
}
