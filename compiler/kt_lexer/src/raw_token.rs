//! Raw Token Definition
//!
//! The logos-derived tokenizer for code mode. String bodies are not lexed
//! here: an opening quote hands control to the string scanner in
//! [`crate::string`].

use logos::{Lexer, Logos};

/// Shape of a block comment, decided once its end is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CommentShape {
    /// Starts with `/**` and is not the empty comment `/**/`.
    pub doc: bool,
    /// A matching `*/` was found before end of input.
    pub closed: bool,
}

/// Consume the rest of a block comment after its opening `/*`.
///
/// Block comments nest: `/* a /* b */ c */` is one comment.
fn block_comment(lex: &mut Lexer<'_, RawToken>) -> CommentShape {
    let rest = lex.remainder().as_bytes();
    let doc = rest.first() == Some(&b'*') && rest.get(1) != Some(&b'/');
    let mut depth = 1usize;
    let mut i = 0;
    while i < rest.len() {
        match (rest[i], rest.get(i + 1)) {
            (b'/', Some(b'*')) => {
                depth += 1;
                i += 2;
            }
            (b'*', Some(b'/')) => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    lex.bump(i);
                    return CommentShape { doc, closed: true };
                }
            }
            _ => i += 1,
        }
    }
    lex.bump(rest.len());
    CommentShape { doc, closed: false }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub(crate) enum RawToken {
    #[regex(r"[ \t\r\n\x0C]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    EolComment,

    #[token("/*", block_comment)]
    BlockComment(CommentShape),

    // Hard keywords
    #[token("package")]
    Package,
    #[token("as")]
    As,
    #[token("as?")]
    AsSafe,
    #[token("typealias")]
    TypeAlias,
    #[token("class")]
    Class,
    #[token("this")]
    This,
    #[token("super")]
    Super,
    #[token("val")]
    Val,
    #[token("var")]
    Var,
    #[token("fun")]
    Fun,
    #[token("for")]
    For,
    #[token("null")]
    Null,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("is")]
    Is,
    #[token("!is")]
    NotIs,
    #[token("in")]
    In,
    #[token("!in")]
    NotIn,
    #[token("throw")]
    Throw,
    #[token("return")]
    Return,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("object")]
    Object,
    #[token("if")]
    If,
    #[token("try")]
    Try,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("when")]
    When,
    #[token("interface")]
    Interface,
    #[token("typeof")]
    TypeOf,

    // Punctuation
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(".")]
    Dot,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("!")]
    Bang,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("===")]
    EqEqEq,
    #[token("->")]
    Arrow,
    #[token("=>")]
    DoubleArrow,
    #[token("!==")]
    NotEqEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("?")]
    Question,
    #[token("::")]
    ColonColon,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("..")]
    DotDot,
    #[token("=")]
    Eq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token(",")]
    Comma,
    #[token("#")]
    Hash,
    #[token("@")]
    At,

    // String openers; the body is scanned by hand
    #[token("\"")]
    Quote,
    #[token("\"\"\"")]
    TripleQuote,

    // Literals
    #[regex(r"[0-9][0-9_]*[uU]?[lL]?")]
    #[regex(r"0[xX][0-9a-fA-F_]+[uU]?[lL]?")]
    #[regex(r"0[bB][01_]+[uU]?[lL]?")]
    Int,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fF]?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fF]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fF]?")]
    #[regex(r"[0-9][0-9_]*[fF]")]
    Float,

    /// Closing quote optional; the driver reports a missing one.
    #[regex(r"'([^'\\\n]|\\[^\n])*'?")]
    Char,

    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Ident,

    /// Closing backtick optional; the driver reports a missing one.
    #[regex(r"`[^`\n]*`?")]
    BacktickIdent,
}
