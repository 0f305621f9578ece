//! Parse results.

use kt_diagnostic::{Diagnostic, ErrorCode};
use kt_ir::{Span, SyntaxKind, TokenList};
use kt_lexer::LexError;

use crate::SyntaxNode;

/// One error node of the tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParseError {
    pub message: String,
    /// Bytes covered by the error node; empty when nothing was consumed.
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    /// Error code chosen from the shape of the message.
    pub fn code(&self) -> ErrorCode {
        let message = self.message.as_str();
        if let Some(rest) = message.strip_prefix("Expecting ") {
            return match rest {
                "')'" | "']'" | "'}'" | "'>'" | "'\"'" => ErrorCode::E1003,
                "an expression" | "an element" | "an expression, is-condition or in-condition" => {
                    ErrorCode::E1002
                }
                "a name" | "parameter name" => ErrorCode::E1004,
                "a type" => ErrorCode::E1005,
                _ if rest.contains("name") => ErrorCode::E1004,
                _ if rest.contains("type") => ErrorCode::E1005,
                _ => ErrorCode::E1001,
            };
        }
        if message.contains("not allowed") || message.contains("are only allowed") {
            ErrorCode::E1006
        } else if message.contains("template") {
            ErrorCode::E1007
        } else {
            ErrorCode::E1001
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(&self.message)
            .with_label(self.span, "")
    }
}

/// Everything a parse produces: the tree, the tokens it was built from,
/// and every problem found on the way.
#[derive(Clone, Debug)]
pub struct ParseOutput {
    pub root: SyntaxNode,
    /// Parser errors in source order.
    pub errors: Vec<ParseError>,
    pub lex_errors: Vec<LexError>,
    pub tokens: TokenList,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || !self.lex_errors.is_empty()
    }

    /// Lexer and parser problems as diagnostics, ordered by position.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics: Vec<(Span, Diagnostic)> = self
            .lex_errors
            .iter()
            .map(|e| (e.span, e.to_diagnostic()))
            .chain(self.errors.iter().map(|e| (e.span, e.to_diagnostic())))
            .collect();
        diagnostics.sort_by_key(|(span, _)| span.start);
        diagnostics.into_iter().map(|(_, d)| d).collect()
    }

    /// Shorthand for `root.debug_dump(source)`.
    pub fn debug_tree(&self, source: &str) -> String {
        self.root.debug_dump(source)
    }

    pub fn root_kind(&self) -> SyntaxKind {
        self.root.kind()
    }
}
