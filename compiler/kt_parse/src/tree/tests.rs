#![allow(clippy::unwrap_used, clippy::expect_used)]

use kt_ir::{Span, SyntaxKind as K, TokenKind as T};
use pretty_assertions::assert_eq;

use crate::marker::CommentBinding;
use crate::tests::fragment;

/// One `REFERENCE_EXPRESSION` around the first identifier after any
/// leading trivia, closed with `binding`.
fn bound_reference(source: &str, binding: CommentBinding) -> String {
    let (root, _) = fragment(source, |p| {
        let m = p.mark();
        p.advance();
        m.done_with_binding(p, K::ReferenceExpression, binding);
    });
    let node = root.child(K::ReferenceExpression).unwrap();
    node.text(source).to_owned()
}

#[test]
fn unbound_node_starts_at_its_first_token() {
    assert_eq!(bound_reference("// c\nx // t", CommentBinding::None), "x");
}

#[test]
fn trailing_comment_on_the_same_line() {
    assert_eq!(bound_reference("x // t\ny", CommentBinding::Trailing), "x // t");
    assert_eq!(bound_reference("x\n// t", CommentBinding::Trailing), "x");
}

#[test]
fn leading_comments_stop_at_a_blank_line() {
    let source = "// one\n// two\n\n// three\nx";
    assert_eq!(bound_reference(source, CommentBinding::All), "// three\nx");
}

#[test]
fn doc_binding_takes_only_the_doc_comment() {
    assert_eq!(
        bound_reference("// plain\nx", CommentBinding::Doc),
        "x"
    );
    assert_eq!(
        bound_reference("/** doc */\n// plain\nx", CommentBinding::Doc),
        "/** doc */\n// plain\nx"
    );
}

#[test]
fn empty_node_sits_right_after_the_previous_token() {
    let (root, _) = fragment("a  b", |p| {
        p.advance();
        let m = p.mark();
        m.done(p, K::Block);
        p.advance();
    });
    assert_eq!(root.child(K::Block).unwrap().span(), Span::point(1));
    let kinds: Vec<_> = root.tokens().iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![T::Ident, T::Whitespace, T::Ident]);
}

#[test]
fn root_owns_leftover_trivia() {
    let source = "a  /* end */";
    let (root, _) = fragment(source, |p| p.advance());
    assert_eq!(root.span(), Span::new(0, 12));
    assert_eq!(root.child_tokens().count(), 3);
    assert_eq!(root.significant_tokens().count(), 1);
}

#[test]
fn joined_operator_is_one_leaf() {
    let source = "a?.b";
    let (root, _) = fragment(source, |p| {
        p.advance();
        let m = p.mark();
        p.advance();
        m.done(p, K::OperationReference);
        p.advance();
    });
    let operation = root.child(K::OperationReference).unwrap();
    let tokens = operation.tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, T::SafeAccess);
    assert_eq!(tokens[0].text(source), "?.");
}

#[test]
fn descendants_are_preorder() {
    let output = crate::parse("fun f() = g(1)");
    let kinds: Vec<_> = output
        .root
        .descendants()
        .map(|n| n.kind())
        .filter(|&k| k != K::PackageDirective && k != K::ImportList)
        .collect();
    assert_eq!(
        kinds,
        vec![
            K::File,
            K::Fun,
            K::ValueParameterList,
            K::CallExpression,
            K::ReferenceExpression,
            K::ValueArgumentList,
            K::ValueArgument,
            K::IntegerConstant,
        ]
    );
}

#[test]
fn error_nodes_show_their_message_in_dumps() {
    let source = "x";
    let (root, _) = fragment(source, |p| {
        let m = p.mark();
        p.advance();
        m.error(p, "Expecting something");
    });
    assert_eq!(
        root.debug_dump(source),
        "\
FILE@0..1
  ERROR@0..1 \"Expecting something\"
    IDENTIFIER@0..1 \"x\"
"
    );
}
