//! The `parse` and `check` commands.
//!
//! Files are read and parsed in parallel; everything is printed
//! afterwards in argument order so output does not depend on scheduling.

use std::io::{self, IsTerminal, Write};

use kt_diagnostic::emitter::{DiagnosticEmitter, JsonEmitter, SourceFile, TerminalEmitter};
use kt_parse::{ParseOptions, ParseOutput};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info_span};

use crate::args::{Options, OutputFormat};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot find file '{path}'")]
    NotFound { path: String },
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },
    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },
    #[error("error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

pub(crate) fn read_file(path: &str) -> Result<String, DriverError> {
    std::fs::read_to_string(path).map_err(|e| {
        let path = path.to_owned();
        match e.kind() {
            io::ErrorKind::NotFound => DriverError::NotFound { path },
            io::ErrorKind::PermissionDenied => DriverError::PermissionDenied { path },
            io::ErrorKind::InvalidData => DriverError::InvalidUtf8 { path },
            _ => DriverError::Io { path, source: e },
        }
    })
}

/// One parsed file.
pub(crate) struct FileReport {
    pub path: String,
    pub source: String,
    pub output: ParseOutput,
}

impl FileReport {
    pub(crate) fn parse(path: &str, source: String, options: &Options) -> Self {
        let _span = info_span!("file", path).entered();
        let parse_options = if options.script {
            ParseOptions::script()
        } else {
            ParseOptions::default()
        };
        let output = kt_parse::parse_with(&source, parse_options);
        FileReport {
            path: path.to_owned(),
            source,
            output,
        }
    }
}

/// Where token and tree dumps are written. In JSON mode stdout carries
/// only the diagnostic stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DumpTarget {
    Stdout,
    Stderr,
}

impl DumpTarget {
    pub(crate) fn for_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => DumpTarget::Stdout,
            OutputFormat::Json => DumpTarget::Stderr,
        }
    }

    fn writer(self) -> Box<dyn Write> {
        match self {
            DumpTarget::Stdout => Box::new(io::stdout().lock()),
            DumpTarget::Stderr => Box::new(io::stderr().lock()),
        }
    }
}

/// Parse every file, print what `options` asks for, and report
/// diagnostics. Returns false if any file had errors or could not be read.
pub fn run(paths: &[String], options: &Options) -> bool {
    let reports: Vec<Result<FileReport, DriverError>> = paths
        .par_iter()
        .map(|path| read_file(path).map(|source| FileReport::parse(path, source, options)))
        .collect();
    debug!(files = reports.len(), "parsed all inputs");

    let mut out = DumpTarget::for_format(options.format).writer();
    let mut emitter: Box<dyn DiagnosticEmitter> = match options.format {
        OutputFormat::Terminal => Box::new(TerminalEmitter::<io::Stderr>::stderr(
            options.color,
            io::stderr().is_terminal(),
        )),
        OutputFormat::Json => Box::new(JsonEmitter::new(io::stdout())),
    };

    let mut error_count = 0;
    let mut failed_reads = false;
    for report in &reports {
        match report {
            Ok(report) => error_count += render(report, options, &mut out, emitter.as_mut()),
            Err(e) => {
                eprintln!("error: {e}");
                failed_reads = true;
            }
        }
    }

    let _ = out.flush();
    emitter.emit_summary(error_count, 0);
    emitter.flush();
    error_count == 0 && !failed_reads
}

/// Print one report. Returns how many errors it contained.
pub(crate) fn render(
    report: &FileReport,
    options: &Options,
    out: &mut impl Write,
    emitter: &mut dyn DiagnosticEmitter,
) -> usize {
    let source = report.source.as_str();

    if options.tokens {
        let _ = writeln!(out, "// tokens: {}", report.path);
        for token in &report.output.tokens {
            let _ = writeln!(out, "{}@{} {:?}", token.kind, token.span, token.span.slice(source));
        }
    }
    if options.tree {
        let _ = writeln!(out, "// tree: {}", report.path);
        let _ = write!(out, "{}", report.output.debug_tree(source));
    }

    let diagnostics = report.output.diagnostics();
    let file = SourceFile::new(&report.path, source);
    emitter.emit_all(&file, &diagnostics);

    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    if errors == 0 && options.format == OutputFormat::Terminal && !options.tree {
        let _ = writeln!(out, "OK: {}", report.path);
    }
    errors
}
