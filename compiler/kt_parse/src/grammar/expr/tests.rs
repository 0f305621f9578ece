#![allow(clippy::unwrap_used, clippy::expect_used)]

use kt_ir::{SyntaxKind as K, TokenKind as T};
use pretty_assertions::assert_eq;

use crate::tests::fragment;
use crate::SyntaxNode;

fn kinds(node: &SyntaxNode) -> Vec<K> {
    node.child_nodes().map(|n| n.kind()).collect()
}

#[test]
fn newline_interrupts_only_some_operators() {
    fragment("a\n+ b\n?: c", |p| {
        p.advance();
        assert!(p.interrupted_with_newline());
        p.advance();
        p.advance();
        assert_eq!(p.current(), T::Elvis);
        assert!(!p.interrupted_with_newline());
        while !p.eof() {
            p.advance();
        }
    });
}

#[test]
fn higher_tier_nests_on_the_right() {
    let (root, errors) = fragment("1 + 2 * 3", |p| p.parse_expression());
    assert!(errors.is_empty());
    let sum = root.child(K::BinaryExpression).unwrap();
    assert_eq!(
        kinds(sum),
        vec![K::IntegerConstant, K::OperationReference, K::BinaryExpression]
    );
}

#[test]
fn same_tier_folds_left() {
    let (root, _) = fragment("a - b - c", |p| p.parse_expression());
    let outer = root.child(K::BinaryExpression).unwrap();
    assert_eq!(
        kinds(outer),
        vec![K::BinaryExpression, K::OperationReference, K::ReferenceExpression]
    );
}

#[test]
fn missing_expression_consumes_nothing() {
    let (_, errors) = fragment("}", |p| {
        p.parse_expression();
        assert_eq!(p.current(), T::RBrace);
        p.advance();
    });
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Expecting an expression");
    assert_eq!(errors[0].span.len(), 0);
}

#[test]
fn labeled_loop() {
    let (root, errors) = fragment("outer@ while (true) {}", |p| p.parse_expression());
    assert!(errors.is_empty(), "{errors:?}");
    let labeled = root.child(K::LabeledExpression).unwrap();
    assert_eq!(kinds(labeled), vec![K::LabelQualifier, K::While]);
}

#[test]
fn statements_split_on_line_breaks_and_semicolons() {
    let (root, errors) = fragment(";; a; b ;\nc\n+ d", |p| p.parse_statements(false));
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(
        kinds(&root),
        vec![
            K::ReferenceExpression,
            K::ReferenceExpression,
            K::ReferenceExpression,
            K::PrefixExpression,
        ]
    );
}

#[test]
fn stray_closing_paren_is_skipped() {
    let (root, errors) = fragment(") a", |p| p.parse_statements(false));
    let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["Expecting an element"]);
    assert_eq!(root.children_of(K::ReferenceExpression).count(), 1);
}
