//! Concrete syntax tree.
//!
//! Nodes own their children directly. A tree covers its source exactly:
//! concatenating the text of every [`SyntaxToken`] in order reproduces the
//! input, trivia included.

mod build;

use std::fmt::Write as _;

use kt_ir::{Span, SyntaxKind, TokenKind};

pub(crate) use build::build;

/// A leaf: one token, or two touching tokens joined into an operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SyntaxToken {
    pub kind: TokenKind,
    pub span: Span,
}

impl SyntaxToken {
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source)
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn span(&self) -> Span {
        match self {
            SyntaxElement::Node(node) => node.span,
            SyntaxElement::Token(token) => token.span,
        }
    }

    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&SyntaxToken> {
        match self {
            SyntaxElement::Node(_) => None,
            SyntaxElement::Token(token) => Some(token),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SyntaxNode {
    kind: SyntaxKind,
    span: Span,
    children: Vec<SyntaxElement>,
    /// Message of an `ERROR` node.
    error: Option<Box<str>>,
}

impl SyntaxNode {
    pub(crate) fn new(
        kind: SyntaxKind,
        span: Span,
        children: Vec<SyntaxElement>,
        error: Option<Box<str>>,
    ) -> Self {
        SyntaxNode {
            kind,
            span,
            children,
            error,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn children(&self) -> &[SyntaxElement] {
        &self.children
    }

    /// Direct child nodes.
    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(SyntaxElement::as_node)
    }

    /// Direct child tokens, trivia included.
    pub fn child_tokens(&self) -> impl Iterator<Item = &SyntaxToken> {
        self.children.iter().filter_map(SyntaxElement::as_token)
    }

    /// Direct non-trivia child tokens.
    pub fn significant_tokens(&self) -> impl Iterator<Item = &SyntaxToken> {
        self.child_tokens().filter(|t| !t.is_trivia())
    }

    /// First direct child node of `kind`.
    pub fn child(&self, kind: SyntaxKind) -> Option<&SyntaxNode> {
        self.child_nodes().find(|n| n.kind == kind)
    }

    /// Direct child nodes of `kind`.
    pub fn children_of(&self, kind: SyntaxKind) -> impl Iterator<Item = &SyntaxNode> {
        self.child_nodes().filter(move |n| n.kind == kind)
    }

    /// This node and all nodes below it, in preorder.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Every leaf below this node, in source order.
    pub fn tokens(&self) -> Vec<SyntaxToken> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens(&self, out: &mut Vec<SyntaxToken>) {
        for child in &self.children {
            match child {
                SyntaxElement::Node(node) => node.collect_tokens(out),
                SyntaxElement::Token(token) => out.push(*token),
            }
        }
    }

    /// Indented dump, one line per node and token:
    ///
    /// ```text
    /// FILE@0..7
    ///   PACKAGE_DIRECTIVE@0..0
    ///   IMPORT_LIST@0..0
    ///   CLASS@0..7
    ///     class@0..5 "class"
    ///     WHITE_SPACE@5..6 " "
    ///     IDENTIFIER@6..7 "A"
    /// ```
    pub fn debug_dump(&self, source: &str) -> String {
        let mut out = String::new();
        self.dump_into(source, 0, &mut out);
        out
    }

    fn dump_into(&self, source: &str, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}{}@{}", self.kind, self.span);
        if let Some(message) = &self.error {
            let _ = write!(out, " {message:?}");
        }
        out.push('\n');
        for child in &self.children {
            match child {
                SyntaxElement::Node(node) => node.dump_into(source, depth + 1, out),
                SyntaxElement::Token(token) => {
                    let _ = writeln!(
                        out,
                        "{indent}  {}@{} {:?}",
                        token.kind,
                        token.span,
                        token.text(source)
                    );
                }
            }
        }
    }
}

/// Preorder iterator over a subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().filter_map(SyntaxElement::as_node));
        Some(node)
    }
}

#[cfg(test)]
mod tests;
