//! Error-tolerant recursive descent parser.
//!
//! Produces a lossless concrete syntax tree: every byte of the input,
//! whitespace and comments included, ends up in exactly one leaf. Broken
//! input still yields a complete tree, with `ERROR` nodes where the
//! grammar had to give up on a span.
//!
//! The parser records [events](marker::Event) while it runs and the
//! [`tree`] module turns them into [`SyntaxNode`]s afterwards, so that
//! speculative parses can be rolled back cheaply.

mod annotation;
mod cursor;
mod grammar;
mod marker;
mod output;
mod precedence;
mod recovery;
mod scanner;
mod token_sets;
pub mod tree;

#[cfg(test)]
mod tests;

use kt_ir::{TokenKind, TokenList};
use tracing::debug;

pub use output::{ParseError, ParseOutput};
pub use precedence::Precedence;
pub use tree::{SyntaxElement, SyntaxNode, SyntaxToken};

use cursor::Cursor;
use marker::Event;

/// Knobs for one parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Parse a script: after the preamble, the file holds a `SCRIPT` node
    /// whose `BLOCK` takes top-level statements.
    pub is_script: bool,
    /// Grow the native stack on deep recursion. Embedders that already run
    /// the parser on a large dedicated stack can turn this off.
    pub max_depth_guard: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            is_script: false,
            max_depth_guard: true,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn script() -> Self {
        ParseOptions {
            is_script: true,
            ..Self::default()
        }
    }
}

/// Parse one source file.
pub fn parse(source: &str) -> ParseOutput {
    parse_with(source, ParseOptions::default())
}

/// Parse one source file with explicit options.
pub fn parse_with(source: &str, options: ParseOptions) -> ParseOutput {
    let lexed = kt_lexer::lex(source);
    let (root, errors) = parse_tokens(source, &lexed.tokens, options);
    debug!(
        tokens = lexed.tokens.len(),
        lex_errors = lexed.errors.len(),
        parse_errors = errors.len(),
        "parsed file"
    );
    ParseOutput {
        root,
        errors,
        lex_errors: lexed.errors,
        tokens: lexed.tokens,
    }
}

/// Parse an already lexed token stream.
///
/// # Panics
/// Panics if `tokens` does not end with `Eof`.
pub fn parse_tokens(
    source: &str,
    tokens: &TokenList,
    options: ParseOptions,
) -> (SyntaxNode, Vec<ParseError>) {
    let mut parser = Parser::new(source, tokens, options);
    if options.is_script {
        parser.parse_script();
    } else {
        parser.parse_file();
    }
    debug_assert_eq!(parser.cursor.mode_depths(), (1, 1), "unbalanced parser modes");
    tree::build(&parser.cursor, parser.events)
}

/// Parser state: the token cursor plus the event log.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    events: Vec<Event>,
    options: ParseOptions,
    /// Newline mode depth at the start of a `by` delegate expression.
    /// Trailing lambdas are only taken when nested deeper than that, so
    /// the class body after `by x` is not read as a lambda argument.
    by_clause: Option<usize>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, tokens: &'a TokenList, options: ParseOptions) -> Self {
        Parser {
            cursor: Cursor::new(source, tokens),
            events: Vec::with_capacity(tokens.len() * 2),
            options,
            by_clause: None,
        }
    }

    // Cursor delegation

    #[inline]
    pub(crate) fn current(&self) -> TokenKind {
        self.cursor.current()
    }

    #[inline]
    pub(crate) fn nth(&self, k: usize) -> TokenKind {
        self.cursor.nth(k)
    }

    /// Text of the significant token `k` ahead, never joined.
    #[inline]
    pub(crate) fn nth_text(&self, k: usize) -> &'a str {
        self.cursor.nth_text(k)
    }

    /// Kind of the significant token before the current one.
    #[inline]
    pub(crate) fn previous(&self) -> TokenKind {
        self.cursor.previous()
    }

    #[inline]
    pub(crate) fn current_text(&self) -> &'a str {
        self.cursor.current_text()
    }

    #[inline]
    pub(crate) fn eof(&self) -> bool {
        self.cursor.is_eof()
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.cursor.position()
    }

    #[inline]
    pub(crate) fn raw_lookup(&self, offset: isize) -> TokenKind {
        self.cursor.raw_lookup(offset)
    }

    #[inline]
    pub(crate) fn newline_before(&self) -> bool {
        self.cursor.newline_before()
    }

    #[inline]
    pub(crate) fn remap_current(&mut self, kind: TokenKind) {
        self.cursor.remap_current(kind);
    }

    /// Consume the current token into the node being built.
    pub(crate) fn advance(&mut self) {
        if let Some((kind, len)) = self.cursor.bump() {
            self.events.push(Event::Token { kind, len });
        }
    }

    /// Remap the current token to `kind`, then consume it.
    pub(crate) fn advance_as(&mut self, kind: TokenKind) {
        self.remap_current(kind);
        self.advance();
    }

    // Scoped modes

    /// Run `f` with newlines significant.
    pub(crate) fn with_newlines<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.cursor.push_newlines(true);
        let result = f(self);
        self.cursor.pop_newlines();
        result
    }

    /// Run `f` with newlines invisible to the grammar.
    pub(crate) fn without_newlines<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.cursor.push_newlines(false);
        let result = f(self);
        self.cursor.pop_newlines();
        result
    }

    /// Run `f` seeing `?`, `.`, `:` and `!` as separate tokens.
    pub(crate) fn without_joining<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.cursor.push_joining(false);
        let result = f(self);
        self.cursor.pop_joining();
        result
    }

    /// Run `f` on a view of the input that ends before the significant
    /// token at `limit`.
    pub(crate) fn truncated<R>(&mut self, limit: usize, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.cursor.truncate_at(limit);
        let result = f(self);
        self.cursor.restore_limit(previous);
        result
    }

    /// Run `f` as the expression of a `by` delegation specifier.
    pub(crate) fn in_by_clause<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.by_clause.replace(self.cursor.mode_depths().0);
        let result = f(self);
        self.by_clause = previous;
        result
    }

    /// Whether a `{` here may start a trailing lambda argument.
    pub(crate) fn trailing_lambdas_allowed(&self) -> bool {
        match self.by_clause {
            Some(depth) => self.cursor.mode_depths().0 > depth,
            None => true,
        }
    }

    /// Grow the stack before recursing, unless the embedder opted out.
    #[inline]
    pub(crate) fn guarded<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        if self.options.max_depth_guard {
            kt_stack::ensure_sufficient_stack(|| f(self))
        } else {
            f(self)
        }
    }
}
