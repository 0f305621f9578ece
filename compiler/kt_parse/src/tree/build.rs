//! Replays the event log into a [`SyntaxNode`] tree.
//!
//! Events only mention significant tokens; trivia is placed here:
//!
//! - trivia goes to the innermost node that already holds a token, so a
//!   node starts at its first token by default;
//! - a freshly opened node that binds leading comments takes the comment
//!   run right before its first token;
//! - a node that binds trailing comments takes comments that follow it on
//!   the same line when it closes;
//! - an empty node is placed before the trivia that precedes the next
//!   token, so a missing-token error sits right after the previous token;
//! - the root takes whatever is left at the end.

use kt_ir::{Span, SyntaxKind, Token, TokenKind};

use super::{SyntaxElement, SyntaxNode, SyntaxToken};
use crate::cursor::Cursor;
use crate::marker::{CommentBinding, Event};
use crate::ParseError;

struct OpenNode {
    kind: SyntaxKind,
    binding: CommentBinding,
    message: Option<Box<str>>,
    start: u32,
    children: Vec<SyntaxElement>,
    /// No token placed since the node opened.
    fresh: bool,
}

struct TreeBuilder<'a> {
    source: &'a str,
    tokens: &'a [Token],
    significant: &'a [u32],
    stack: Vec<OpenNode>,
    /// Next raw token to place.
    raw: usize,
    next_significant: usize,
    /// End of the last placed token.
    offset: u32,
    errors: Vec<ParseError>,
    root: Option<SyntaxNode>,
}

pub(crate) fn build(cursor: &Cursor<'_>, mut events: Vec<Event>) -> (SyntaxNode, Vec<ParseError>) {
    let mut builder = TreeBuilder {
        source: cursor.source(),
        tokens: cursor.tokens().as_slice(),
        significant: cursor.significant(),
        stack: Vec::new(),
        raw: 0,
        next_significant: 0,
        offset: 0,
        errors: Vec::new(),
        root: None,
    };
    let mut chain = Vec::new();

    for i in 0..events.len() {
        match std::mem::replace(&mut events[i], Event::tombstone()) {
            Event::Start {
                kind,
                forward_parent,
                binding,
                message,
            } => {
                // Follow forward parents outwards, then open outermost first
                chain.push((kind, binding, message));
                let mut next = forward_parent;
                while let Some(j) = next {
                    next = None;
                    if let Event::Start {
                        kind,
                        forward_parent,
                        binding,
                        message,
                    } = std::mem::replace(&mut events[j], Event::tombstone())
                    {
                        chain.push((kind, binding, message));
                        next = forward_parent;
                    }
                }
                for (kind, binding, message) in chain.drain(..).rev() {
                    if let Some(kind) = kind {
                        builder.open(kind, binding, message);
                    }
                }
            }
            Event::Finish => builder.close(),
            Event::Token { kind, len } => builder.token(kind, usize::from(len)),
        }
    }
    builder.finish()
}

impl TreeBuilder<'_> {
    fn open(&mut self, kind: SyntaxKind, binding: CommentBinding, message: Option<Box<str>>) {
        self.stack.push(OpenNode {
            kind,
            binding,
            message,
            start: self.offset,
            children: Vec::new(),
            fresh: true,
        });
    }

    fn token(&mut self, kind: TokenKind, len: usize) {
        let Some(&first) = self.significant.get(self.next_significant) else {
            return;
        };
        let last = self.significant[self.next_significant + len - 1] as usize;
        let first = first as usize;
        self.place_leading_trivia(first);

        let span = self.tokens[first].span.cover(self.tokens[last].span);
        self.raw = last + 1;
        self.next_significant += len;
        self.offset = span.end;
        for node in self.stack.iter_mut().rev() {
            if !node.fresh {
                break;
            }
            node.fresh = false;
        }
        self.push(SyntaxElement::Token(SyntaxToken { kind, span }));
    }

    fn push(&mut self, element: SyntaxElement) {
        if let Some(top) = self.stack.last_mut() {
            top.children.push(element);
        } else {
            // Only reachable if the grammar consumed a token outside the root
            self.open(SyntaxKind::File, CommentBinding::None, None);
            self.push(element);
        }
    }

    fn raw_elements(&self, range: std::ops::Range<usize>) -> impl Iterator<Item = SyntaxElement> + '_ {
        self.tokens[range].iter().map(|t| {
            SyntaxElement::Token(SyntaxToken {
                kind: t.kind,
                span: t.span,
            })
        })
    }

    /// Place the trivia between the last placed token and raw token `until`.
    fn place_leading_trivia(&mut self, until: usize) {
        if self.raw >= until || self.stack.is_empty() {
            return;
        }
        let fresh_from = self
            .stack
            .iter()
            .rposition(|n| !n.fresh)
            .map_or(0, |i| i + 1);
        let target = fresh_from.saturating_sub(1);
        let binder = (fresh_from.max(1)..self.stack.len())
            .find(|&i| self.stack[i].binding.binds_leading());

        let split = match binder {
            Some(i) => {
                let trivia = &self.tokens[self.raw..until];
                self.raw + leading_split(trivia, self.source, self.stack[i].binding)
            }
            None => until,
        };
        let outer: Vec<_> = self.raw_elements(self.raw..split).collect();
        self.stack[target].children.extend(outer);
        if let Some(i) = binder {
            let inner: Vec<_> = self.raw_elements(split..until).collect();
            self.stack[i].children.extend(inner);
        }
        self.raw = until;
        self.offset = self.tokens[until - 1].span.end;
    }

    fn close(&mut self) {
        let Some(mut node) = self.stack.pop() else {
            return;
        };
        if self.stack.is_empty() {
            // The root owns everything nobody else claimed
            let end = self.tokens.len().saturating_sub(1);
            if self.raw < end {
                node.children.extend(self.raw_elements(self.raw..end));
                self.offset = self.tokens[end - 1].span.end;
                self.raw = end;
            }
        } else if node.binding.binds_trailing() && !node.fresh {
            let end = trailing_end(self.tokens, self.raw, self.source);
            if end > self.raw {
                node.children.extend(self.raw_elements(self.raw..end));
                self.offset = self.tokens[end - 1].span.end;
                self.raw = end;
            }
        }

        let span = match (node.children.first(), node.children.last()) {
            (Some(first), Some(last)) => first.span().cover(last.span()),
            _ => Span::point(node.start),
        };
        if node.kind == SyntaxKind::Error {
            let message = node.message.as_deref().unwrap_or("Syntax error");
            self.errors.push(ParseError::new(message, span));
        }
        let built = SyntaxNode::new(node.kind, span, node.children, node.message);
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(SyntaxElement::Node(built)),
            None => self.root = Some(built),
        }
    }

    fn finish(mut self) -> (SyntaxNode, Vec<ParseError>) {
        while !self.stack.is_empty() {
            self.close();
        }
        let root = match self.root.take() {
            Some(root) => root,
            None => {
                self.open(SyntaxKind::File, CommentBinding::None, None);
                self.close();
                self.root.take().unwrap_or_else(|| {
                    SyntaxNode::new(SyntaxKind::File, Span::EMPTY, Vec::new(), None)
                })
            }
        };
        let mut errors = self.errors;
        errors.sort_by_key(|e| e.span.start);
        (root, errors)
    }
}

/// Index into `trivia` from which a binding node takes the leading run.
fn leading_split(trivia: &[Token], source: &str, binding: CommentBinding) -> usize {
    if let Some(doc) = trivia.iter().rposition(|t| t.kind == TokenKind::DocComment) {
        return doc;
    }
    if binding != CommentBinding::All {
        return trivia.len();
    }
    let mut split = trivia.len();
    for (i, token) in trivia.iter().enumerate().rev() {
        match token.kind {
            TokenKind::Whitespace => {
                if token.span.slice(source).matches('\n').count() > 1 {
                    break;
                }
            }
            TokenKind::EolComment | TokenKind::BlockComment => split = i,
            _ => break,
        }
    }
    split
}

/// End of the comments that follow raw token `from` on the same line.
fn trailing_end(tokens: &[Token], from: usize, source: &str) -> usize {
    let mut end = from;
    for (i, token) in tokens.iter().enumerate().skip(from) {
        match token.kind {
            TokenKind::Whitespace if token.span.slice(source).contains('\n') => break,
            TokenKind::Whitespace => {}
            TokenKind::EolComment => return i + 1,
            TokenKind::BlockComment | TokenKind::DocComment => end = i + 1,
            _ => break,
        }
    }
    end
}
