//! Parser tests.
//!
//! Tests are organized into modules by category:
//! - `declarations`: file preamble, classes, enums, functions, properties
//! - `expressions`: precedence, postfix chains, lambdas, control flow
//! - `recovery`: malformed input and where its errors land
//! - `coverage`: every byte of any input ends up in exactly one leaf

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod coverage;
mod declarations;
mod expressions;

use kt_ir::SyntaxKind;

use crate::{parse, parse_with, tree, ParseError, ParseOptions, ParseOutput, Parser, SyntaxNode};

/// Run `f` inside a `FILE` root over `source` and build the tree.
/// Tokens `f` leaves behind go to the root.
pub(crate) fn fragment(
    source: &str,
    f: impl FnOnce(&mut Parser<'_>),
) -> (SyntaxNode, Vec<ParseError>) {
    let lexed = kt_lexer::lex(source);
    let mut parser = Parser::new(source, &lexed.tokens, ParseOptions::default());
    let root = parser.mark();
    f(&mut parser);
    root.done(&mut parser, SyntaxKind::File);
    tree::build(&parser.cursor, parser.events)
}

/// Parse `source` and require a clean result.
fn parse_clean(source: &str) -> ParseOutput {
    let output = parse(source);
    assert!(
        output.errors.is_empty(),
        "unexpected errors {:?} in\n{}",
        output.errors,
        output.debug_tree(source)
    );
    output
}

/// Parse `source` as a script and return its top-level statements.
fn script_statements(source: &str) -> (ParseOutput, Vec<SyntaxNode>) {
    let output = parse_with(source, ParseOptions::script());
    let statements = first(&output.root, SyntaxKind::Script)
        .child(SyntaxKind::Block)
        .expect("script has a block")
        .child_nodes()
        .cloned()
        .collect();
    (output, statements)
}

/// First node of `kind` in preorder.
fn first(root: &SyntaxNode, kind: SyntaxKind) -> &SyntaxNode {
    root.descendants()
        .find(|n| n.kind() == kind)
        .unwrap_or_else(|| panic!("no {kind} node in tree"))
}

fn count(root: &SyntaxNode, kind: SyntaxKind) -> usize {
    root.descendants().filter(|n| n.kind() == kind).count()
}

fn child_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.child_nodes().map(SyntaxNode::kind).collect()
}

/// Concatenated leaf text equals the input.
fn assert_lossless(source: &str, output: &ParseOutput) {
    let text: String = output.root.tokens().iter().map(|t| t.text(source)).collect();
    assert_eq!(text, source);
    assert_eq!(output.root.span().end as usize, source.len());
}
