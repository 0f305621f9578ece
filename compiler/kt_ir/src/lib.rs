//! Syntax vocabulary shared by `kt_lexer` and `kt_parse`.
//!
//! - [`Span`]: byte range into one source text
//! - [`TokenKind`] / [`Token`] / [`TokenList`]: the lexer's output, trivia included
//! - [`TokenSet`]: constant bitsets of token kinds for first and recovery sets
//! - [`SyntaxKind`]: the closed set of tree node kinds the parser emits

mod span;
mod syntax_kind;
mod token;
mod token_set;

pub use span::{Span, SpanError};
pub use syntax_kind::SyntaxKind;
pub use token::{Token, TokenKind, TokenList};
pub use token_set::{TokenSet, TokenSetIter};
