//! Lossless lexer.
//!
//! Produces every token of a source text, whitespace and comments
//! included, so that the parser can reason about line breaks and the
//! syntax tree can reproduce the input exactly. Code is tokenized by the
//! logos-derived [`RawToken`](raw_token::RawToken); string literals switch
//! to a hand-written scanner that splits them into template parts.
//!
//! Soft keywords come out as [`TokenKind::Ident`]; deciding when `data`
//! or `get` is a keyword is the parser's job.

mod raw_token;
mod string;

use kt_diagnostic::{Diagnostic, ErrorCode};
use kt_ir::{Span, Token, TokenKind, TokenList};
use logos::Logos;

use raw_token::RawToken;

/// What went wrong at a [`LexError`] span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    UnclosedComment,
    BadCharacter,
    UnclosedChar,
    UnclosedBacktick,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnclosedComment => ErrorCode::E0001,
            LexErrorKind::BadCharacter => ErrorCode::E0002,
            LexErrorKind::UnclosedChar => ErrorCode::E0003,
            LexErrorKind::UnclosedBacktick => ErrorCode::E0004,
        }
    }

    pub fn message(&self) -> &'static str {
        match self.kind {
            LexErrorKind::UnclosedComment => "Unclosed comment",
            LexErrorKind::BadCharacter => "Illegal character",
            LexErrorKind::UnclosedChar => "Incorrect character literal",
            LexErrorKind::UnclosedBacktick => "Unclosed backticked identifier",
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.message())
            .with_label(self.span, "")
    }
}

/// Tokens of one source text plus the problems found while lexing it.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub errors: Vec<LexError>,
}

/// Lex `source` into a token list ending with a zero-width `Eof`.
///
/// # Panics
/// Panics if `source` is larger than `u32::MAX` bytes.
pub fn lex(source: &str) -> LexOutput {
    let mut lexer = Lexer::new(source);
    let mut pos = 0;
    if source.starts_with("#!") {
        pos = source.find('\n').unwrap_or(source.len());
        lexer.push(TokenKind::Shebang, 0, pos);
    }
    lexer.lex_code(pos, false);
    let eof = u32::try_from(source.len())
        .unwrap_or_else(|_| panic!("source file exceeds {} bytes", u32::MAX));
    lexer.tokens.push(Token::new(TokenKind::Eof, Span::point(eof)));
    LexOutput {
        tokens: lexer.tokens,
        errors: lexer.errors,
    }
}

pub(crate) struct Lexer<'s> {
    source: &'s str,
    tokens: TokenList,
    errors: Vec<LexError>,
}

impl<'s> Lexer<'s> {
    fn new(source: &'s str) -> Self {
        Lexer {
            source,
            tokens: TokenList::with_capacity(source.len() / 3 + 1),
            errors: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(Token::new(kind, Span::from_range(start..end)));
    }

    fn error(&mut self, kind: LexErrorKind, start: usize, end: usize) {
        self.errors.push(LexError {
            kind,
            span: Span::from_range(start..end),
        });
    }

    /// Lex code from `pos`.
    ///
    /// Inside a `${ ... }` template entry (`in_template`), the first `}`
    /// without a matching `{` ends the entry and is returned to the string
    /// scanner as `LongTemplateEntryEnd`. Returns the offset lexing stopped at.
    pub(crate) fn lex_code(&mut self, mut pos: usize, in_template: bool) -> usize {
        let source = self.source;
        let mut depth = 0u32;
        'restart: loop {
            let mut raw = RawToken::lexer(&source[pos..]);
            while let Some(result) = raw.next() {
                let range = raw.span();
                let (start, end) = (pos + range.start, pos + range.end);
                let token = match result {
                    Ok(token) => token,
                    Err(()) => {
                        self.push(TokenKind::BadCharacter, start, end);
                        self.error(LexErrorKind::BadCharacter, start, end);
                        continue;
                    }
                };
                match token {
                    RawToken::Quote | RawToken::TripleQuote => {
                        self.push(TokenKind::OpenQuote, start, end);
                        pos = self.lex_string(end, token == RawToken::TripleQuote);
                        continue 'restart;
                    }
                    // `!isEmpty()` is `!` applied to `isEmpty()`
                    RawToken::NotIn | RawToken::NotIs if continues_identifier(source, end) => {
                        self.push(TokenKind::Bang, start, start + 1);
                        pos = start + 1;
                        continue 'restart;
                    }
                    RawToken::LBrace => {
                        depth += 1;
                        self.push(TokenKind::LBrace, start, end);
                    }
                    RawToken::RBrace if in_template && depth == 0 => {
                        self.push(TokenKind::LongTemplateEntryEnd, start, end);
                        return end;
                    }
                    RawToken::RBrace => {
                        depth = depth.saturating_sub(1);
                        self.push(TokenKind::RBrace, start, end);
                    }
                    RawToken::BlockComment(shape) => {
                        let kind = if shape.doc {
                            TokenKind::DocComment
                        } else {
                            TokenKind::BlockComment
                        };
                        self.push(kind, start, end);
                        if !shape.closed {
                            self.error(LexErrorKind::UnclosedComment, start, end);
                        }
                    }
                    RawToken::Char => {
                        self.push(TokenKind::Char, start, end);
                        if !char_literal_closed(&source[start..end]) {
                            self.error(LexErrorKind::UnclosedChar, start, end);
                        }
                    }
                    RawToken::BacktickIdent => {
                        self.push(TokenKind::Ident, start, end);
                        let text = &source[start..end];
                        if text.len() < 2 || !text.ends_with('`') {
                            self.error(LexErrorKind::UnclosedBacktick, start, end);
                        }
                    }
                    other => self.push(convert(other), start, end),
                }
            }
            return source.len();
        }
    }
}

/// Whether the character at `offset` could continue an identifier.
fn continues_identifier(source: &str, offset: usize) -> bool {
    source[offset..]
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

/// Whether a lexed character literal ends with an unescaped `'`.
fn char_literal_closed(text: &str) -> bool {
    let mut chars = text.chars().skip(1);
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\'' => return true,
            _ => {}
        }
    }
    false
}

/// Map a raw token without special handling to its token kind.
fn convert(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Whitespace => TokenKind::Whitespace,
        RawToken::EolComment => TokenKind::EolComment,
        RawToken::Package => TokenKind::KwPackage,
        RawToken::As => TokenKind::KwAs,
        RawToken::AsSafe => TokenKind::KwAsSafe,
        RawToken::TypeAlias => TokenKind::KwTypeAlias,
        RawToken::Class => TokenKind::KwClass,
        RawToken::This => TokenKind::KwThis,
        RawToken::Super => TokenKind::KwSuper,
        RawToken::Val => TokenKind::KwVal,
        RawToken::Var => TokenKind::KwVar,
        RawToken::Fun => TokenKind::KwFun,
        RawToken::For => TokenKind::KwFor,
        RawToken::Null => TokenKind::KwNull,
        RawToken::True => TokenKind::KwTrue,
        RawToken::False => TokenKind::KwFalse,
        RawToken::Is => TokenKind::KwIs,
        RawToken::NotIs => TokenKind::KwNotIs,
        RawToken::In => TokenKind::KwIn,
        RawToken::NotIn => TokenKind::KwNotIn,
        RawToken::Throw => TokenKind::KwThrow,
        RawToken::Return => TokenKind::KwReturn,
        RawToken::Break => TokenKind::KwBreak,
        RawToken::Continue => TokenKind::KwContinue,
        RawToken::Object => TokenKind::KwObject,
        RawToken::If => TokenKind::KwIf,
        RawToken::Try => TokenKind::KwTry,
        RawToken::Else => TokenKind::KwElse,
        RawToken::While => TokenKind::KwWhile,
        RawToken::Do => TokenKind::KwDo,
        RawToken::When => TokenKind::KwWhen,
        RawToken::Interface => TokenKind::KwInterface,
        RawToken::TypeOf => TokenKind::KwTypeOf,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::Dot => TokenKind::Dot,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::Star => TokenKind::Star,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::EqEqEq => TokenKind::EqEqEq,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::DoubleArrow => TokenKind::DoubleArrow,
        RawToken::NotEqEq => TokenKind::NotEqEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Question => TokenKind::Question,
        RawToken::ColonColon => TokenKind::ColonColon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::DotDot => TokenKind::DotDot,
        RawToken::Eq => TokenKind::Eq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Hash => TokenKind::Hash,
        RawToken::At => TokenKind::At,
        RawToken::Int => TokenKind::Int,
        RawToken::Float => TokenKind::Float,
        RawToken::Ident | RawToken::BacktickIdent => TokenKind::Ident,
        RawToken::Char => TokenKind::Char,
        RawToken::BlockComment(shape) if shape.doc => TokenKind::DocComment,
        RawToken::BlockComment(_) => TokenKind::BlockComment,
        RawToken::Quote | RawToken::TripleQuote => TokenKind::OpenQuote,
    }
}
