//! Line-delimited JSON output.

use std::io::Write;

use super::{escape_json, DiagnosticEmitter, SourceFile};
use crate::Diagnostic;

/// Writes each diagnostic as one JSON object on its own line.
pub struct JsonEmitter<W: Write> {
    writer: W,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter { writer }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, file: &SourceFile<'_>, diagnostic: &Diagnostic) {
        let labels: Vec<String> = diagnostic
            .labels
            .iter()
            .map(|label| {
                let (line, column) = file.lines.span_start(file.text, label.span);
                format!(
                    "{{\"start\":{},\"end\":{},\"line\":{line},\"column\":{column},\"primary\":{},\"message\":\"{}\"}}",
                    label.span.start,
                    label.span.end,
                    label.is_primary,
                    escape_json(&label.message)
                )
            })
            .collect();
        let notes: Vec<String> = diagnostic
            .notes
            .iter()
            .map(|n| format!("\"{}\"", escape_json(n)))
            .collect();
        let _ = writeln!(
            self.writer,
            "{{\"file\":\"{}\",\"code\":\"{}\",\"severity\":\"{}\",\"message\":\"{}\",\"labels\":[{}],\"notes\":[{}]}}",
            escape_json(file.path),
            diagnostic.code,
            diagnostic.severity,
            escape_json(&diagnostic.message),
            labels.join(","),
            notes.join(",")
        );
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let _ = writeln!(
            self.writer,
            "{{\"summary\":{{\"errors\":{error_count},\"warnings\":{warning_count}}}}}"
        );
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use kt_ir::Span;

    #[test]
    fn emits_one_object_per_line() {
        let file = SourceFile::new("src/a.kt", "class Foo(");
        let diag = Diagnostic::error(ErrorCode::E1003)
            .with_message("Expecting ')'")
            .with_label(Span::point(10), "here");

        let mut out = Vec::new();
        let mut emitter = JsonEmitter::new(&mut out);
        emitter.emit(&file, &diag);
        emitter.emit_summary(1, 0);
        emitter.flush();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("{\"file\":\"src/a.kt\",\"code\":\"E1003\""));
        assert!(lines[0].contains("\"line\":1,\"column\":11"));
        assert!(lines[0].contains("\"message\":\"Expecting ')'\""));
        assert_eq!(lines[1], "{\"summary\":{\"errors\":1,\"warnings\":0}}");
    }
}
