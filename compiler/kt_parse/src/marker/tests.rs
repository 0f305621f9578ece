#![allow(clippy::unwrap_used, clippy::expect_used)]

use kt_ir::{Span, SyntaxKind as K, TokenKind as T};
use pretty_assertions::assert_eq;

use crate::tests::fragment;

#[test]
fn done_wraps_consumed_tokens() {
    let source = "a b";
    let (root, errors) = fragment(source, |p| {
        let m = p.mark();
        p.advance();
        m.done(p, K::ReferenceExpression);
    });
    assert!(errors.is_empty());
    assert_eq!(
        root.debug_dump(source),
        "\
FILE@0..3
  REFERENCE_EXPRESSION@0..1
    IDENTIFIER@0..1 \"a\"
  WHITE_SPACE@1..2 \" \"
  IDENTIFIER@2..3 \"b\"
"
    );
}

#[test]
fn abandon_keeps_children_in_place() {
    let (root, _) = fragment("a", |p| {
        let m = p.mark();
        p.advance();
        m.abandon(p);
    });
    assert_eq!(root.child_nodes().count(), 0);
    assert_eq!(root.child_tokens().count(), 1);
}

#[test]
fn rollback_restores_the_cursor() {
    let (root, _) = fragment("a b", |p| {
        let m = p.mark();
        p.advance();
        p.advance();
        m.rollback(p);
        assert_eq!(p.position(), 0);
        assert_eq!(p.current(), T::Ident);
    });
    assert_eq!(root.child_nodes().count(), 0);
}

#[test]
fn rollback_undoes_soft_keyword_remaps() {
    fragment("by x", |p| {
        let m = p.mark();
        assert!(p.at(T::KwBy));
        assert_eq!(p.current(), T::KwBy);
        p.advance();
        m.rollback(p);
        assert_eq!(p.current(), T::Ident);
    });
}

#[test]
fn precede_wraps_a_finished_node() {
    let source = "a + b";
    let (root, _) = fragment(source, |p| {
        let m = p.mark();
        p.advance();
        let lhs = m.done(p, K::ReferenceExpression);
        let binary = lhs.precede(p);
        p.advance();
        p.advance();
        binary.done(p, K::BinaryExpression);
    });
    let binary = root.child(K::BinaryExpression).unwrap();
    assert_eq!(binary.span(), Span::new(0, 5));
    assert!(binary.child(K::ReferenceExpression).is_some());
}

#[test]
fn chained_precede_nests_outwards() {
    let (root, _) = fragment("a", |p| {
        let m = p.mark();
        p.advance();
        let inner = m.done(p, K::ReferenceExpression);
        let middle = inner.precede(p).done(p, K::Parenthesized);
        middle.precede(p).done(p, K::AnnotatedExpression);
    });
    let outer = root.child(K::AnnotatedExpression).unwrap();
    let middle = outer.child(K::Parenthesized).unwrap();
    assert!(middle.child(K::ReferenceExpression).is_some());
}

#[test]
fn rolling_back_a_preceding_marker_drops_the_wrapped_node() {
    let (root, _) = fragment("a b", |p| {
        let m = p.mark();
        p.advance();
        let done = m.done(p, K::ReferenceExpression);
        let outer = done.precede(p);
        p.advance();
        outer.rollback(p);
        assert_eq!(p.position(), 0);
    });
    assert_eq!(root.child_nodes().count(), 0);
}

#[test]
fn error_node_carries_its_message() {
    let source = "a";
    let (root, errors) = fragment(source, |p| {
        let m = p.mark();
        p.advance();
        m.error(p, "oops");
    });
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "oops");
    assert_eq!(errors[0].span, Span::new(0, 1));
    assert_eq!(root.child(K::Error).unwrap().error_message(), Some("oops"));
}

#[test]
fn abandoned_forward_parent_is_transparent() {
    let (root, _) = fragment("a", |p| {
        let m = p.mark();
        p.advance();
        let done = m.done(p, K::ReferenceExpression);
        done.precede(p).abandon(p);
    });
    assert_eq!(root.child_nodes().count(), 1);
    assert!(root.child(K::ReferenceExpression).is_some());
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "never resolved")]
fn unresolved_marker_panics_in_debug_builds() {
    fragment("a", |p| {
        let _open = p.mark();
    });
}
