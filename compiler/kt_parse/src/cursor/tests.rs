#![allow(clippy::unwrap_used, clippy::expect_used)]

use kt_ir::{Span, TokenKind as T, TokenList};

use super::Cursor;

/// Owns the source and token list so `Cursor` can borrow them.
struct TestCtx {
    source: String,
    tokens: TokenList,
}

impl TestCtx {
    fn new(source: &str) -> Self {
        let tokens = kt_lexer::lex(source).tokens;
        Self {
            source: source.to_owned(),
            tokens,
        }
    }

    fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.source, &self.tokens)
    }
}

#[test]
fn walks_significant_tokens_only() {
    let ctx = TestCtx::new("val /* c */ x\n= 1");
    let mut cursor = ctx.cursor();

    assert_eq!(cursor.current(), T::KwVal);
    assert_eq!(cursor.bump(), Some((T::KwVal, 1)));
    assert_eq!(cursor.current(), T::Ident);
    assert_eq!(cursor.current_text(), "x");
    assert_eq!(cursor.previous(), T::KwVal);
    cursor.bump();
    assert_eq!(cursor.current(), T::Eq);
    cursor.bump();
    cursor.bump();
    assert!(cursor.is_eof());
    assert_eq!(cursor.bump(), None);
}

#[test]
fn newline_before_looks_through_comments() {
    let ctx = TestCtx::new("a // note\nb /* x */ c");
    let mut cursor = ctx.cursor();
    assert!(!cursor.newline_before());
    cursor.bump();
    assert!(cursor.newline_before());
    cursor.bump();
    assert!(!cursor.newline_before());

    cursor.push_newlines(false);
    cursor.set_position(1);
    assert!(!cursor.newline_before());
    cursor.pop_newlines();
    assert!(cursor.newline_before());
}

#[test]
fn joins_adjacent_operators_only() {
    let ctx = TestCtx::new("a?.b ? .c x!!");
    let mut cursor = ctx.cursor();
    cursor.bump();
    assert_eq!(cursor.current(), T::SafeAccess);
    assert_eq!(cursor.current_text(), "?.");
    assert_eq!(cursor.nth(1), T::Ident);
    assert_eq!(cursor.bump(), Some((T::SafeAccess, 2)));

    cursor.bump(); // b
    assert_eq!(cursor.current(), T::Question);

    cursor.push_joining(false);
    cursor.set_position(1);
    assert_eq!(cursor.current(), T::Question);
    cursor.pop_joining();

    cursor.set_position(8);
    assert_eq!(cursor.current(), T::BangBang);
}

#[test]
fn remaps_are_undone_to_a_checkpoint() {
    let ctx = TestCtx::new("by get");
    let mut cursor = ctx.cursor();
    assert_eq!(cursor.current(), T::Ident);

    let checkpoint = cursor.remap_checkpoint();
    cursor.remap_current(T::KwBy);
    assert_eq!(cursor.current(), T::KwBy);
    cursor.bump();
    cursor.remap_current(T::KwGet);
    cursor.remap_current(T::Ident);
    assert_eq!(cursor.current(), T::Ident);

    cursor.undo_remaps(checkpoint);
    assert_eq!(cursor.kind_at(0), T::Ident);
    assert_eq!(cursor.kind_at(1), T::Ident);
}

#[test]
fn truncation_reads_as_end_of_input() {
    let ctx = TestCtx::new("a b c");
    let mut cursor = ctx.cursor();
    let previous = cursor.truncate_at(2);
    assert_eq!(previous, None);

    cursor.bump();
    cursor.bump();
    assert!(cursor.is_eof());
    assert_eq!(cursor.current_span(), Span::point(4));

    cursor.restore_limit(previous);
    assert_eq!(cursor.current(), T::Ident);
}

#[test]
fn raw_lookup_sees_trivia() {
    let ctx = TestCtx::new("a @b");
    let mut cursor = ctx.cursor();
    cursor.bump();
    assert_eq!(cursor.current(), T::At);
    assert_eq!(cursor.raw_lookup(-1), T::Whitespace);
    assert_eq!(cursor.raw_lookup(1), T::Ident);
    assert_eq!(cursor.raw_lookup(-10), T::Eof);
    assert_eq!(cursor.raw_lookup(10), T::Eof);
}

#[test]
fn mode_stacks_keep_their_sentinel() {
    let ctx = TestCtx::new("");
    let mut cursor = ctx.cursor();
    assert_eq!(cursor.mode_depths(), (1, 1));
    cursor.push_newlines(false);
    cursor.push_joining(false);
    assert_eq!(cursor.mode_depths(), (2, 2));
    cursor.pop_newlines();
    cursor.pop_joining();
    assert_eq!(cursor.mode_depths(), (1, 1));
    assert!(cursor.is_eof());
    assert!(cursor.newline_before());
}
