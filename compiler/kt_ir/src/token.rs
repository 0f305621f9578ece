//! Token kinds and the lexer's token list.
//!
//! The token stream is lossless: whitespace and comments are tokens too,
//! so the parser can answer "was there a line break before this token"
//! and the tree can reproduce the source byte for byte.

use std::fmt;

use crate::Span;

/// Kind of a lexed token.
///
/// # Discriminant Layout
///
/// | Range   | Category                         |
/// |---------|----------------------------------|
/// | 0-4     | Trivia                           |
/// | 5-8     | Identifier and literals          |
/// | 9-16    | String template parts            |
/// | 20-50   | Hard keywords                    |
/// | 60-106  | Soft keywords                    |
/// | 110-153 | Punctuation and operators        |
/// | 160-162 | Special                          |
///
/// Soft keywords are never produced by the lexer; it emits `Ident` and the
/// parser remaps an identifier to its soft keyword kind when the grammar
/// position calls for one. All discriminants are below 256 so that
/// [`TokenSet`](crate::TokenSet) fits in two `u128` words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    // === Trivia ===
    Whitespace = 0,
    EolComment = 1,
    BlockComment = 2,
    DocComment = 3,
    Shebang = 4,

    // === Identifier and literals ===
    Ident = 5,
    Int = 6,
    Float = 7,
    Char = 8,

    // === String templates ===
    OpenQuote = 9,
    ClosingQuote = 10,
    RegularStringPart = 11,
    EscapeSequence = 12,
    ShortTemplateEntryStart = 13,
    LongTemplateEntryStart = 14,
    LongTemplateEntryEnd = 15,
    DanglingNewline = 16,

    // === Hard keywords ===
    KwPackage = 20,
    KwAs = 21,
    KwAsSafe = 22,
    KwTypeAlias = 23,
    KwClass = 24,
    KwThis = 25,
    KwSuper = 26,
    KwVal = 27,
    KwVar = 28,
    KwFun = 29,
    KwFor = 30,
    KwNull = 31,
    KwTrue = 32,
    KwFalse = 33,
    KwIs = 34,
    KwNotIs = 35,
    KwIn = 36,
    KwNotIn = 37,
    KwThrow = 38,
    KwReturn = 39,
    KwBreak = 40,
    KwContinue = 41,
    KwObject = 42,
    KwIf = 43,
    KwTry = 44,
    KwElse = 45,
    KwWhile = 46,
    KwDo = 47,
    KwWhen = 48,
    KwInterface = 49,
    KwTypeOf = 50,

    // === Soft keywords ===
    KwFile = 60,
    KwImport = 61,
    KwWhere = 62,
    KwBy = 63,
    KwGet = 64,
    KwSet = 65,
    KwConstructor = 66,
    KwInit = 67,
    KwAbstract = 68,
    KwEnum = 69,
    KwOpen = 70,
    KwInner = 71,
    KwOverride = 72,
    KwPrivate = 73,
    KwPublic = 74,
    KwInternal = 75,
    KwProtected = 76,
    KwCatch = 77,
    KwOut = 78,
    KwVararg = 79,
    KwReified = 80,
    KwDynamic = 81,
    KwCompanion = 82,
    KwSealed = 83,
    KwFinally = 84,
    KwFinal = 85,
    KwData = 86,
    KwInline = 87,
    KwNoinline = 88,
    KwTailrec = 89,
    KwExternal = 90,
    KwAnnotation = 91,
    KwCrossinline = 92,
    KwConst = 93,
    KwOperator = 94,
    KwInfix = 95,
    KwSuspend = 96,
    KwLateinit = 97,
    KwExpect = 98,
    KwActual = 99,
    KwValue = 100,
    KwField = 101,
    KwProperty = 102,
    KwReceiver = 103,
    KwParam = 104,
    KwSetparam = 105,
    KwDelegate = 106,

    // === Punctuation and operators ===
    LBracket = 110,
    RBracket = 111,
    LBrace = 112,
    RBrace = 113,
    LParen = 114,
    RParen = 115,
    Dot = 116,
    PlusPlus = 117,
    MinusMinus = 118,
    Star = 119,
    Plus = 120,
    Minus = 121,
    Bang = 122,
    Slash = 123,
    Percent = 124,
    Lt = 125,
    Gt = 126,
    LtEq = 127,
    GtEq = 128,
    EqEqEq = 129,
    Arrow = 130,
    DoubleArrow = 131,
    NotEqEq = 132,
    EqEq = 133,
    NotEq = 134,
    /// `!!`, only ever produced by joining two `!`.
    BangBang = 135,
    AmpAmp = 136,
    PipePipe = 137,
    /// `?.`, only ever produced by joining `?` and `.`.
    SafeAccess = 138,
    /// `?:`, only ever produced by joining `?` and `:`.
    Elvis = 139,
    Question = 140,
    ColonColon = 141,
    Colon = 142,
    Semicolon = 143,
    DotDot = 144,
    Eq = 145,
    StarEq = 146,
    SlashEq = 147,
    PercentEq = 148,
    PlusEq = 149,
    MinusEq = 150,
    Comma = 151,
    Hash = 152,
    At = 153,

    // === Special ===
    BadCharacter = 160,
    /// Pseudo kind, never lexed. As a [`TokenSet`](crate::TokenSet)
    /// member it stands for "end of file, `;`, or a line break before the
    /// current token".
    EolOrSemicolon = 161,
    Eof = 162,
}

impl TokenKind {
    pub const MAX_DISCRIMINANT: u8 = Self::Eof as u8;

    /// Every kind, in discriminant order.
    pub const ALL: &'static [TokenKind] = &[
        Self::Whitespace,
        Self::EolComment,
        Self::BlockComment,
        Self::DocComment,
        Self::Shebang,
        Self::Ident,
        Self::Int,
        Self::Float,
        Self::Char,
        Self::OpenQuote,
        Self::ClosingQuote,
        Self::RegularStringPart,
        Self::EscapeSequence,
        Self::ShortTemplateEntryStart,
        Self::LongTemplateEntryStart,
        Self::LongTemplateEntryEnd,
        Self::DanglingNewline,
        Self::KwPackage,
        Self::KwAs,
        Self::KwAsSafe,
        Self::KwTypeAlias,
        Self::KwClass,
        Self::KwThis,
        Self::KwSuper,
        Self::KwVal,
        Self::KwVar,
        Self::KwFun,
        Self::KwFor,
        Self::KwNull,
        Self::KwTrue,
        Self::KwFalse,
        Self::KwIs,
        Self::KwNotIs,
        Self::KwIn,
        Self::KwNotIn,
        Self::KwThrow,
        Self::KwReturn,
        Self::KwBreak,
        Self::KwContinue,
        Self::KwObject,
        Self::KwIf,
        Self::KwTry,
        Self::KwElse,
        Self::KwWhile,
        Self::KwDo,
        Self::KwWhen,
        Self::KwInterface,
        Self::KwTypeOf,
        Self::KwFile,
        Self::KwImport,
        Self::KwWhere,
        Self::KwBy,
        Self::KwGet,
        Self::KwSet,
        Self::KwConstructor,
        Self::KwInit,
        Self::KwAbstract,
        Self::KwEnum,
        Self::KwOpen,
        Self::KwInner,
        Self::KwOverride,
        Self::KwPrivate,
        Self::KwPublic,
        Self::KwInternal,
        Self::KwProtected,
        Self::KwCatch,
        Self::KwOut,
        Self::KwVararg,
        Self::KwReified,
        Self::KwDynamic,
        Self::KwCompanion,
        Self::KwSealed,
        Self::KwFinally,
        Self::KwFinal,
        Self::KwData,
        Self::KwInline,
        Self::KwNoinline,
        Self::KwTailrec,
        Self::KwExternal,
        Self::KwAnnotation,
        Self::KwCrossinline,
        Self::KwConst,
        Self::KwOperator,
        Self::KwInfix,
        Self::KwSuspend,
        Self::KwLateinit,
        Self::KwExpect,
        Self::KwActual,
        Self::KwValue,
        Self::KwField,
        Self::KwProperty,
        Self::KwReceiver,
        Self::KwParam,
        Self::KwSetparam,
        Self::KwDelegate,
        Self::LBracket,
        Self::RBracket,
        Self::LBrace,
        Self::RBrace,
        Self::LParen,
        Self::RParen,
        Self::Dot,
        Self::PlusPlus,
        Self::MinusMinus,
        Self::Star,
        Self::Plus,
        Self::Minus,
        Self::Bang,
        Self::Slash,
        Self::Percent,
        Self::Lt,
        Self::Gt,
        Self::LtEq,
        Self::GtEq,
        Self::EqEqEq,
        Self::Arrow,
        Self::DoubleArrow,
        Self::NotEqEq,
        Self::EqEq,
        Self::NotEq,
        Self::BangBang,
        Self::AmpAmp,
        Self::PipePipe,
        Self::SafeAccess,
        Self::Elvis,
        Self::Question,
        Self::ColonColon,
        Self::Colon,
        Self::Semicolon,
        Self::DotDot,
        Self::Eq,
        Self::StarEq,
        Self::SlashEq,
        Self::PercentEq,
        Self::PlusEq,
        Self::MinusEq,
        Self::Comma,
        Self::Hash,
        Self::At,
        Self::BadCharacter,
        Self::EolOrSemicolon,
        Self::Eof,
    ];

    #[inline]
    pub const fn discriminant(self) -> u8 {
        self as u8
    }

    /// Whitespace or comment: invisible to the grammar, kept in the tree.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        (self as u8) <= (Self::Shebang as u8)
    }

    #[inline]
    pub const fn is_comment(self) -> bool {
        matches!(
            self,
            Self::EolComment | Self::BlockComment | Self::DocComment | Self::Shebang
        )
    }

    #[inline]
    pub const fn is_hard_keyword(self) -> bool {
        let d = self as u8;
        d >= Self::KwPackage as u8 && d <= Self::KwTypeOf as u8
    }

    #[inline]
    pub const fn is_soft_keyword(self) -> bool {
        let d = self as u8;
        d >= Self::KwFile as u8 && d <= Self::KwDelegate as u8
    }

    /// Fixed spelling of keywords and punctuation; `None` for kinds whose
    /// text varies (identifiers, literals, trivia, string parts).
    pub const fn text(self) -> Option<&'static str> {
        let s = match self {
            Self::KwPackage => "package",
            Self::KwAs => "as",
            Self::KwAsSafe => "as?",
            Self::KwTypeAlias => "typealias",
            Self::KwClass => "class",
            Self::KwThis => "this",
            Self::KwSuper => "super",
            Self::KwVal => "val",
            Self::KwVar => "var",
            Self::KwFun => "fun",
            Self::KwFor => "for",
            Self::KwNull => "null",
            Self::KwTrue => "true",
            Self::KwFalse => "false",
            Self::KwIs => "is",
            Self::KwNotIs => "!is",
            Self::KwIn => "in",
            Self::KwNotIn => "!in",
            Self::KwThrow => "throw",
            Self::KwReturn => "return",
            Self::KwBreak => "break",
            Self::KwContinue => "continue",
            Self::KwObject => "object",
            Self::KwIf => "if",
            Self::KwTry => "try",
            Self::KwElse => "else",
            Self::KwWhile => "while",
            Self::KwDo => "do",
            Self::KwWhen => "when",
            Self::KwInterface => "interface",
            Self::KwTypeOf => "typeof",
            Self::KwFile => "file",
            Self::KwImport => "import",
            Self::KwWhere => "where",
            Self::KwBy => "by",
            Self::KwGet => "get",
            Self::KwSet => "set",
            Self::KwConstructor => "constructor",
            Self::KwInit => "init",
            Self::KwAbstract => "abstract",
            Self::KwEnum => "enum",
            Self::KwOpen => "open",
            Self::KwInner => "inner",
            Self::KwOverride => "override",
            Self::KwPrivate => "private",
            Self::KwPublic => "public",
            Self::KwInternal => "internal",
            Self::KwProtected => "protected",
            Self::KwCatch => "catch",
            Self::KwOut => "out",
            Self::KwVararg => "vararg",
            Self::KwReified => "reified",
            Self::KwDynamic => "dynamic",
            Self::KwCompanion => "companion",
            Self::KwSealed => "sealed",
            Self::KwFinally => "finally",
            Self::KwFinal => "final",
            Self::KwData => "data",
            Self::KwInline => "inline",
            Self::KwNoinline => "noinline",
            Self::KwTailrec => "tailrec",
            Self::KwExternal => "external",
            Self::KwAnnotation => "annotation",
            Self::KwCrossinline => "crossinline",
            Self::KwConst => "const",
            Self::KwOperator => "operator",
            Self::KwInfix => "infix",
            Self::KwSuspend => "suspend",
            Self::KwLateinit => "lateinit",
            Self::KwExpect => "expect",
            Self::KwActual => "actual",
            Self::KwValue => "value",
            Self::KwField => "field",
            Self::KwProperty => "property",
            Self::KwReceiver => "receiver",
            Self::KwParam => "param",
            Self::KwSetparam => "setparam",
            Self::KwDelegate => "delegate",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Dot => ".",
            Self::PlusPlus => "++",
            Self::MinusMinus => "--",
            Self::Star => "*",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Bang => "!",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::EqEqEq => "===",
            Self::Arrow => "->",
            Self::DoubleArrow => "=>",
            Self::NotEqEq => "!==",
            Self::EqEq => "==",
            Self::NotEq => "!=",
            Self::BangBang => "!!",
            Self::AmpAmp => "&&",
            Self::PipePipe => "||",
            Self::SafeAccess => "?.",
            Self::Elvis => "?:",
            Self::Question => "?",
            Self::ColonColon => "::",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::DotDot => "..",
            Self::Eq => "=",
            Self::StarEq => "*=",
            Self::SlashEq => "/=",
            Self::PercentEq => "%=",
            Self::PlusEq => "+=",
            Self::MinusEq => "-=",
            Self::Comma => ",",
            Self::Hash => "#",
            Self::At => "@",
            _ => return None,
        };
        Some(s)
    }

    /// Soft keyword spelled `text`, if any.
    pub fn soft_keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "file" => Self::KwFile,
            "import" => Self::KwImport,
            "where" => Self::KwWhere,
            "by" => Self::KwBy,
            "get" => Self::KwGet,
            "set" => Self::KwSet,
            "constructor" => Self::KwConstructor,
            "init" => Self::KwInit,
            "abstract" => Self::KwAbstract,
            "enum" => Self::KwEnum,
            "open" => Self::KwOpen,
            "inner" => Self::KwInner,
            "override" => Self::KwOverride,
            "private" => Self::KwPrivate,
            "public" => Self::KwPublic,
            "internal" => Self::KwInternal,
            "protected" => Self::KwProtected,
            "catch" => Self::KwCatch,
            "out" => Self::KwOut,
            "vararg" => Self::KwVararg,
            "reified" => Self::KwReified,
            "dynamic" => Self::KwDynamic,
            "companion" => Self::KwCompanion,
            "sealed" => Self::KwSealed,
            "finally" => Self::KwFinally,
            "final" => Self::KwFinal,
            "data" => Self::KwData,
            "inline" => Self::KwInline,
            "noinline" => Self::KwNoinline,
            "tailrec" => Self::KwTailrec,
            "external" => Self::KwExternal,
            "annotation" => Self::KwAnnotation,
            "crossinline" => Self::KwCrossinline,
            "const" => Self::KwConst,
            "operator" => Self::KwOperator,
            "infix" => Self::KwInfix,
            "suspend" => Self::KwSuspend,
            "lateinit" => Self::KwLateinit,
            "expect" => Self::KwExpect,
            "actual" => Self::KwActual,
            "value" => Self::KwValue,
            "field" => Self::KwField,
            "property" => Self::KwProperty,
            "receiver" => Self::KwReceiver,
            "param" => Self::KwParam,
            "setparam" => Self::KwSetparam,
            "delegate" => Self::KwDelegate,
            _ => return None,
        };
        Some(kind)
    }

    /// Hard keyword spelled `text`, if any.
    pub fn hard_keyword(text: &str) -> Option<TokenKind> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.is_hard_keyword() && k.text() == Some(text))
    }

    /// Short human-readable name used in token dumps.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Whitespace => "WHITE_SPACE",
            Self::EolComment => "EOL_COMMENT",
            Self::BlockComment => "BLOCK_COMMENT",
            Self::DocComment => "DOC_COMMENT",
            Self::Shebang => "SHEBANG_COMMENT",
            Self::Ident => "IDENTIFIER",
            Self::Int => "INTEGER_LITERAL",
            Self::Float => "FLOAT_LITERAL",
            Self::Char => "CHARACTER_LITERAL",
            Self::OpenQuote => "OPEN_QUOTE",
            Self::ClosingQuote => "CLOSING_QUOTE",
            Self::RegularStringPart => "REGULAR_STRING_PART",
            Self::EscapeSequence => "ESCAPE_SEQUENCE",
            Self::ShortTemplateEntryStart => "SHORT_TEMPLATE_ENTRY_START",
            Self::LongTemplateEntryStart => "LONG_TEMPLATE_ENTRY_START",
            Self::LongTemplateEntryEnd => "LONG_TEMPLATE_ENTRY_END",
            Self::DanglingNewline => "DANGLING_NEWLINE",
            Self::BadCharacter => "BAD_CHARACTER",
            Self::EolOrSemicolon => "EOL_OR_SEMICOLON",
            Self::Eof => "EOF",
            _ => match self.text() {
                Some(text) => text,
                None => "?",
            },
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One lexed token. Text is recovered from the source through `span`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Lossless token stream for one source text, ending with `Eof`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Kind at `index`; `Eof` past the end.
    #[inline]
    pub fn kind(&self, index: usize) -> TokenKind {
        self.tokens.get(index).map_or(TokenKind::Eof, |t| t.kind)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests;
