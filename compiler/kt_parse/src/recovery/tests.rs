#![allow(clippy::unwrap_used, clippy::expect_used)]

use kt_ir::{Span, TokenKind as T, TokenSet};
use pretty_assertions::assert_eq;

use crate::tests::fragment;

const BRACES: TokenSet = TokenSet::of(&[T::LBrace, T::RBrace]);

#[test]
fn expect_reports_in_place() {
    let (_, errors) = fragment("a b", |p| {
        assert!(p.expect(T::Ident, "Expecting a name"));
        assert!(!p.expect(T::Comma, "Expecting ','"));
        assert_eq!(p.current(), T::Ident);
        p.advance();
    });
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Expecting ','");
    assert_eq!(errors[0].span, Span::point(1));
}

#[test]
fn recovery_never_takes_a_brace() {
    let (_, errors) = fragment("{", |p| {
        p.error_with_recovery("Expecting a name", Some(TokenSet::EMPTY));
        assert_eq!(p.current(), T::LBrace);
        p.advance();
    });
    assert_eq!(errors[0].span.len(), 0);
}

#[test]
fn recovery_takes_one_unexpected_token() {
    let (_, errors) = fragment("a b", |p| {
        p.error_with_recovery("Expecting a name", Some(TokenSet::EMPTY));
        assert_eq!(p.position(), 1);
        p.advance();
    });
    assert_eq!(errors[0].span, Span::new(0, 1));
}

#[test]
fn recovery_stops_at_a_line_break_when_asked() {
    let (_, errors) = fragment("a\nb", |p| {
        p.advance();
        p.error_with_recovery("Expecting ')'", Some(TokenSet::of(&[T::EolOrSemicolon])));
        assert_eq!(p.position(), 1);
        p.advance();
    });
    assert_eq!(errors[0].span.len(), 0);
}

#[test]
fn error_and_advance_at_end_of_file_is_zero_width() {
    let (_, errors) = fragment("", |p| p.error_and_advance("Expecting an element"));
    assert_eq!(errors[0].span, Span::point(0));
}

#[test]
fn error_until_covers_the_run() {
    let source = "a b c { d }";
    let (_, errors) = fragment(source, |p| {
        p.error_until("Unexpected tokens", BRACES);
        assert_eq!(p.current(), T::LBrace);
        while !p.eof() {
            p.advance();
        }
    });
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].span.slice(source).trim_end(), "a b c");
}

#[test]
fn soft_keywords_follow_the_question() {
    fragment("get", |p| {
        assert!(p.at_set(TokenSet::of(&[T::KwGet, T::KwSet])));
        assert_eq!(p.current(), T::KwGet);
        assert!(p.at(T::Ident));
        assert_eq!(p.current(), T::Ident);
        assert!(!p.at(T::KwSet));
        p.advance();
    });
}

#[test]
fn statement_terminators() {
    fragment("a; b\nc", |p| {
        p.advance();
        assert!(p.at(T::EolOrSemicolon));
        p.advance();
        assert!(!p.at(T::EolOrSemicolon));
        p.advance();
        assert!(p.at(T::EolOrSemicolon));
        p.advance();
        assert!(p.eof());
        assert!(p.at(T::EolOrSemicolon));
    });
}

#[test]
fn skip_until_matches_soft_keywords() {
    fragment("a b by c", |p| {
        p.skip_until(TokenSet::of(&[T::KwBy]));
        assert_eq!(p.position(), 2);
        assert_eq!(p.current(), T::KwBy);
        while !p.eof() {
            p.advance();
        }
    });
}
