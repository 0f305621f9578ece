//! File annotations, the package directive and the import list.
//!
//! ```text
//! preamble = fileAnnotationList? packageDirective? importDirective* .
//! packageDirective = modifiers "package" SimpleName ("." SimpleName)* ";"? .
//! importDirective = "import" SimpleName ("." SimpleName)* ("." "*" | "as" SimpleName)? ";"? .
//! ```
//!
//! A file always gets a `PACKAGE_DIRECTIVE` and an `IMPORT_LIST` node,
//! empty when the source has neither. Both must sit on one line.

use kt_ir::{SyntaxKind, TokenKind as T, TokenSet};

use crate::annotation::AnnotationMode;
use crate::marker::{CommentBinding, Marker};
use crate::token_sets::{IMPORT_RECOVERY_SET, PACKAGE_NAME_RECOVERY_SET};
use crate::Parser;

const PACKAGE_NAME_MESSAGE: &str = "Package name must be a '.'-separated identifier list";

impl Parser<'_> {
    pub(crate) fn parse_preamble(&mut self) {
        let first_entry = self.mark();
        self.parse_file_annotation_list(AnnotationMode::FileAnnotationsBeforePackage);

        let package = self.mark();
        self.parse_modifier_list(AnnotationMode::EscapedOnly, TokenSet::EMPTY);

        if self.at(T::KwPackage) {
            self.advance();
            self.parse_package_name();
            first_entry.abandon(self);
            self.consume_if(T::Semicolon);
            package.done(self, SyntaxKind::PackageDirective);
        } else {
            // Without a package, annotations not aimed at the file belong
            // to the first declaration: parse them again from there.
            package.rollback(self);
            first_entry.rollback(self);
            self.parse_file_annotation_list(AnnotationMode::FileAnnotationsPackageOmitted);
            let package = self.mark();
            package.done(self, SyntaxKind::PackageDirective);
        }

        self.parse_import_list();
    }

    /// `SimpleName ("." SimpleName)*` as nested `DOT_QUALIFIED_EXPRESSION`s.
    fn parse_package_name(&mut self) {
        let mut qualified = self.mark();
        let mut simple_name = true;

        loop {
            if self.newline_before() {
                self.error_with_recovery(
                    "Package name must be a '.'-separated identifier list placed on a single line",
                    Some(PACKAGE_NAME_RECOVERY_SET),
                );
                break;
            }

            if self.at(T::Dot) {
                self.advance();
                qualified.error(self, PACKAGE_NAME_MESSAGE);
                qualified = self.mark();
                continue;
            }

            let name = self.mark();
            let found = self.expect_or_recover(T::Ident, PACKAGE_NAME_MESSAGE, PACKAGE_NAME_RECOVERY_SET);
            self.done_or_abandon(name, SyntaxKind::ReferenceExpression, found);

            if !simple_name {
                let outer = qualified.precede(self);
                qualified.done(self, SyntaxKind::DotQualifiedExpression);
                qualified = outer;
            }

            if !self.at(T::Dot) {
                break;
            }
            self.advance();

            if simple_name && !found {
                qualified.abandon(self);
                qualified = self.mark();
            } else {
                simple_name = false;
            }
        }

        qualified.abandon(self);
    }

    /// `IMPORT_LIST`, present even when empty.
    pub(crate) fn parse_import_list(&mut self) {
        let list = self.mark();
        while self.at(T::KwImport) {
            self.parse_import_directive();
        }
        list.done(self, SyntaxKind::ImportList);
    }

    fn parse_import_directive(&mut self) {
        let directive = self.mark();
        self.advance(); // import

        if self.newline_before() {
            self.finish_broken_import(directive, "Expecting qualified name");
            return;
        }

        if !self.at(T::Ident) {
            let error = self.mark();
            self.skip_until(TokenSet::of(&[T::EolOrSemicolon]));
            error.error(self, "Expecting qualified name");
            directive.done(self, SyntaxKind::ImportDirective);
            self.consume_if(T::Semicolon);
            return;
        }

        let mut qualified = self.mark();
        let reference = self.mark();
        self.advance();
        reference.done(self, SyntaxKind::ReferenceExpression);

        while self.at(T::Dot) && self.nth(1) != T::Star {
            self.advance(); // .

            if self.newline_before() {
                qualified.abandon(self);
                self.finish_broken_import(directive, "Import must be placed on a single line");
                return;
            }

            let reference = self.mark();
            let found = self.expect_or_recover(
                T::Ident,
                "Qualified name must be a '.'-separated identifier list",
                IMPORT_RECOVERY_SET,
            );
            self.done_or_abandon(reference, SyntaxKind::ReferenceExpression, found);

            let outer = qualified.precede(self);
            qualified.done(self, SyntaxKind::DotQualifiedExpression);
            qualified = outer;
        }
        qualified.abandon(self);

        if self.at(T::Dot) {
            self.advance(); // .
            self.advance(); // *
            if self.at(T::KwAs) {
                let alias = self.mark();
                self.advance();
                if self.newline_before() {
                    alias.abandon(self);
                    self.finish_broken_import(directive, "Expecting identifier");
                    return;
                }
                self.consume_if(T::Ident);
                let alias = alias.done(self, SyntaxKind::ImportAlias);
                alias
                    .precede(self)
                    .error(self, "Cannot rename all imported items to one identifier");
            }
        }

        if self.at(T::KwAs) {
            let alias = self.mark();
            self.advance();
            if self.newline_before() {
                alias.done(self, SyntaxKind::ImportAlias);
                self.finish_broken_import(directive, "Expecting identifier");
                return;
            }
            self.expect_or_recover(T::Ident, "Expecting identifier", TokenSet::of(&[T::Semicolon]));
            alias.done(self, SyntaxKind::ImportAlias);
        }

        self.consume_if(T::Semicolon);
        directive.done_with_binding(self, SyntaxKind::ImportDirective, CommentBinding::Trailing);
    }

    /// Close an import that a line break cut short.
    fn finish_broken_import(&mut self, directive: Marker, message: &str) {
        self.error(message);
        directive.done(self, SyntaxKind::ImportDirective);
    }
}
