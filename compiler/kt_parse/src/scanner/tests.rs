#![allow(clippy::unwrap_used, clippy::expect_used)]

use kt_ir::{TokenKind as T, TokenKind, TokenSet};
use pretty_assertions::assert_eq;

use super::{AtSet, FirstBefore, LastBefore, TokenPattern};
use crate::tests::fragment;
use crate::Parser;

const DOT: AtSet = AtSet(TokenSet::of(&[T::Dot]));
const EQ: AtSet = AtSet(TokenSet::of(&[T::Eq]));

fn skip_rest(p: &mut Parser<'_>) {
    while !p.eof() {
        p.advance();
    }
}

#[test]
fn last_top_level_dot_before_eq() {
    fragment("a.b.c = 1", |p| {
        assert_eq!(p.scan(&mut LastBefore::new(DOT, EQ)), Some(3));
        assert_eq!(p.position(), 0);
        skip_rest(p);
    });
}

#[test]
fn bracketed_tokens_are_not_top_level() {
    fragment("f(a.b).c = 1", |p| {
        assert_eq!(p.scan(&mut LastBefore::new(DOT, EQ)), Some(6));
        skip_rest(p);
    });
    fragment("f(a.b) = 1", |p| {
        assert_eq!(p.scan(&mut LastBefore::new(DOT, EQ)), None);
        skip_rest(p);
    });
}

#[test]
fn first_match_unless_stopped() {
    fragment("a.b = c.d", |p| {
        assert_eq!(p.scan(&mut FirstBefore::new(DOT, EQ)), Some(1));
        skip_rest(p);
    });
    fragment("a = c.d", |p| {
        assert_eq!(p.scan(&mut FirstBefore::new(DOT, EQ)), None);
        skip_rest(p);
    });
}

#[test]
fn stop_right_after_a_match_can_be_ignored() {
    let ident = AtSet(TokenSet::of(&[T::Ident]));
    fragment("= x = y", |p| {
        assert_eq!(p.scan(&mut LastBefore::new(EQ, ident)), Some(0));
        let mut lenient = LastBefore::new(EQ, ident).dont_stop_right_after_occurrence();
        assert_eq!(p.scan(&mut lenient), Some(2));
        skip_rest(p);
    });
}

fn at_by(p: &mut Parser<'_>, _top_level: bool) -> bool {
    p.at(T::KwBy)
}

#[test]
fn remaps_made_while_scanning_are_undone() {
    fragment("a by b", |p| {
        let found = p.scan(&mut FirstBefore::new(at_by, AtSet(TokenSet::EMPTY)));
        assert_eq!(found, Some(1));
        p.advance();
        assert_eq!(p.current(), T::Ident);
        skip_rest(p);
    });
}

/// Records every position and gives up on an unmatched closer.
struct UntilUnmatched {
    last: Option<usize>,
}

impl TokenPattern for UntilUnmatched {
    fn process_token(&mut self, _p: &mut Parser<'_>, pos: usize, _top_level: bool) -> bool {
        self.last = Some(pos);
        false
    }

    fn handle_unmatched_closing(&mut self, _kind: TokenKind) -> bool {
        true
    }

    fn result(&self) -> Option<usize> {
        self.last
    }
}

#[test]
fn unmatched_closer_can_end_the_scan() {
    fragment("(a) ) b", |p| {
        assert_eq!(p.scan(&mut UntilUnmatched { last: None }), Some(3));
        skip_rest(p);
    });
}
