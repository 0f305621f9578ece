//! Grammar Modules
//!
//! Each module extends [`Parser`] with the productions of one layer:
//!
//! - [`attr`]: modifier lists and annotations
//! - [`item`]: the file preamble and declarations (classes, functions,
//!   properties, type aliases)
//! - [`ty`]: type references
//! - [`expr`]: expressions and statements
//!
//! The layers call each other freely: a statement may be a local
//! declaration, a property initializer is an expression, a cast takes a
//! type. All of them share the one cursor and event log, so a rollback
//! started in one layer undoes work done in the others.
//!
//! Productions never fail. A rule that cannot match reports an error node
//! and returns, having consumed either nothing or exactly the offending
//! token; see [`crate::recovery`].

mod attr;
mod expr;
mod item;
mod ty;

use kt_ir::{SyntaxKind, TokenKind};

use crate::marker::CommentBinding;
use crate::Parser;

/// Which declarations a position accepts and what may follow them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DeclarationMode {
    MemberOrTopLevel,
    Local,
    ScriptTopLevel,
}

impl DeclarationMode {
    fn destructuring_allowed(self) -> bool {
        matches!(self, Self::Local | Self::ScriptTopLevel)
    }

    fn accessors_allowed(self) -> bool {
        matches!(self, Self::MemberOrTopLevel | Self::ScriptTopLevel)
    }

    /// `enum Foo {}` is read as an enum class missing its `class` keyword.
    fn enum_as_soft_keyword(self) -> bool {
        self == Self::MemberOrTopLevel
    }
}

/// Whether a class-like declaration carries a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NameMode {
    Required,
    Allowed,
    /// Object expressions: a name is reported and skipped.
    Prohibited,
}

impl Parser<'_> {
    /// `file = preamble topLevelDeclaration* EOF`
    pub(crate) fn parse_file(&mut self) {
        let file = self.mark();
        self.parse_preamble();
        while !self.eof() {
            self.parse_top_level_declaration();
        }
        file.done(self, SyntaxKind::File);
    }

    /// `script = preamble statement* EOF`
    pub(crate) fn parse_script(&mut self) {
        let file = self.mark();
        self.parse_preamble();

        let script = self.mark();
        let block = self.mark();
        self.parse_statements(true);
        while !self.eof() {
            self.error_and_advance("Unexpected symbol");
        }
        block.done_with_binding(self, SyntaxKind::Block, CommentBinding::All);
        script.done_with_binding(self, SyntaxKind::Script, CommentBinding::All);

        file.done(self, SyntaxKind::File);
    }

    /// Close a declaration, adopting the comments around it. Local
    /// declarations only take a doc comment from above.
    pub(crate) fn close_declaration(
        &mut self,
        marker: crate::marker::Marker,
        kind: SyntaxKind,
        preceding_comments: bool,
    ) {
        let binding = if preceding_comments {
            CommentBinding::All
        } else {
            CommentBinding::Doc
        };
        marker.done_with_binding(self, kind, binding);
    }

    /// Close `marker` as `kind` when `condition` holds, drop it otherwise.
    pub(crate) fn done_or_abandon(
        &mut self,
        marker: crate::marker::Marker,
        kind: SyntaxKind,
        condition: bool,
    ) {
        if condition {
            marker.done(self, kind);
        } else {
            marker.abandon(self);
        }
    }

    /// Turn `marker` into an error when `condition` holds, drop it otherwise.
    pub(crate) fn error_if(&mut self, marker: crate::marker::Marker, condition: bool, message: &str) {
        if condition {
            marker.error(self, message);
        } else {
            marker.abandon(self);
        }
    }

    /// An identifier, or a soft keyword that may act as one.
    pub(crate) fn is_identifier_like(kind: TokenKind) -> bool {
        kind == TokenKind::Ident || kind.is_soft_keyword()
    }
}
