//! Declaration parsing (classes, objects, functions, properties, aliases).
//!
//! This module extends Parser with the productions that make up the
//! body of a file, a class body and the declaration form of a statement.
//! Every declaration starts with an optional modifier list; what follows
//! the list decides the kind.
//!
//! # Module Structure
//!
//! - `preamble.rs`: File annotations, package directive and imports
//! - `class.rs`: Classes, objects, enum entries, constructors, supertypes
//! - `function.rs`: Functions, receivers, value parameters, blocks
//! - `property.rs`: Properties, accessors, destructuring declarations
//! - `generics.rs`: Type parameters, `where` clauses and type aliases

mod class;
mod function;
mod generics;
mod preamble;
mod property;

use kt_ir::{SyntaxKind, TokenKind as T, TokenSet};

use super::{DeclarationMode, NameMode};
use crate::annotation::AnnotationMode;
use crate::grammar::attr::Modifiers;
use crate::Parser;

pub(crate) use class::Classifier;

impl Parser<'_> {
    /// `topLevelObject`
    pub(crate) fn parse_top_level_declaration(&mut self) {
        if self.consume_if(T::Semicolon) {
            return;
        }

        let decl = self.mark();
        let modifiers = self.parse_modifier_list(AnnotationMode::UnescapedAllowed, TokenSet::EMPTY);
        let mut kind =
            self.parse_common_declaration(modifiers, NameMode::Required, DeclarationMode::MemberOrTopLevel);

        if kind.is_none() && self.at(T::LBrace) {
            self.error("Expecting a top level declaration");
            self.parse_block();
            kind = Some(SyntaxKind::Fun);
        }

        match kind {
            Some(kind) => self.close_declaration(decl, kind, true),
            None if self.at(T::KwImport) => {
                self.error("imports are only allowed in the beginning of file");
                self.parse_import_list();
                decl.abandon(self);
            }
            None => {
                self.error_and_advance("Expecting a top level declaration");
                decl.abandon(self);
            }
        }
    }

    /// Declarations allowed everywhere a declaration may stand. Returns
    /// `None`, having consumed nothing, when no declaration starts here.
    pub(crate) fn parse_common_declaration(
        &mut self,
        modifiers: Modifiers,
        object_name: NameMode,
        mode: DeclarationMode,
    ) -> Option<SyntaxKind> {
        match self.current() {
            T::KwClass | T::KwInterface => {
                let classifier = Classifier::Class {
                    enum_class: modifiers.has_enum,
                };
                Some(self.parse_class_or_object(classifier, NameMode::Required, false, mode))
            }
            T::KwFun => self.parse_function(false),
            T::KwVal | T::KwVar => Some(self.parse_property(mode)),
            T::KwTypeAlias => Some(self.parse_type_alias()),
            T::KwObject => Some(self.parse_class_or_object(Classifier::Object, object_name, false, mode)),
            T::Ident if modifiers.has_enum && mode.enum_as_soft_keyword() => Some(
                self.parse_class_or_object(Classifier::MissingClassKeyword, NameMode::Required, false, mode),
            ),
            _ => None,
        }
    }

    /// `memberDeclaration*`, up to the closing brace of a class body.
    pub(crate) fn parse_members(&mut self) {
        while !self.eof() && !self.at(T::RBrace) {
            self.parse_member_declaration();
        }
    }

    fn parse_member_declaration(&mut self) {
        if self.consume_if(T::Semicolon) {
            return;
        }

        let decl = self.mark();
        let modifiers =
            self.parse_modifier_list(AnnotationMode::UnescapedAllowedAtMember, TokenSet::EMPTY);

        match self.parse_member_declaration_rest(modifiers) {
            Some(kind) => self.close_declaration(decl, kind, true),
            None => {
                self.error_with_recovery("Expecting member declaration", Some(TokenSet::EMPTY));
                decl.abandon(self);
            }
        }
    }

    fn parse_member_declaration_rest(&mut self, modifiers: Modifiers) -> Option<SyntaxKind> {
        let object_name = if modifiers.has_companion {
            NameMode::Allowed
        } else {
            NameMode::Required
        };
        if let Some(kind) =
            self.parse_common_declaration(modifiers, object_name, DeclarationMode::MemberOrTopLevel)
        {
            return Some(kind);
        }

        if self.at(T::KwInit) {
            self.advance();
            if self.at(T::LBrace) {
                self.parse_block();
            } else {
                self.error("Expecting '{' after 'init'");
            }
            Some(SyntaxKind::ClassInitializer)
        } else if self.at(T::KwConstructor) {
            self.parse_secondary_constructor();
            Some(SyntaxKind::SecondaryConstructor)
        } else if self.at(T::LBrace) {
            self.error("Expecting member declaration");
            self.parse_block();
            Some(SyntaxKind::Fun)
        } else {
            None
        }
    }

    /// A declaration in statement position. Returns false, with the
    /// cursor where it started, when no declaration is here.
    ///
    /// With `rollback_if_definitely_not_expression`, only `fun` is tried:
    /// a `fun` followed by a name is a declaration, any other `fun` is
    /// left for the expression parser as an anonymous function.
    pub(crate) fn parse_local_declaration(
        &mut self,
        rollback_if_definitely_not_expression: bool,
        script_top_level: bool,
    ) -> bool {
        let decl = self.mark();
        let modifiers = self.parse_modifier_list(AnnotationMode::UnescapedAllowed, TokenSet::EMPTY);

        let mode = if script_top_level {
            DeclarationMode::ScriptTopLevel
        } else {
            DeclarationMode::Local
        };

        let kind = if rollback_if_definitely_not_expression {
            if self.at(T::KwFun) {
                self.parse_function(true)
            } else {
                None
            }
        } else if self.at(T::KwObject) && matches!(self.nth(1), T::Colon | T::LBrace) {
            // `object : T {}` and `object {}` are object literals
            None
        } else {
            self.parse_common_declaration(modifiers, NameMode::Required, mode)
        };

        match kind {
            Some(kind) => {
                let binds_preceding =
                    !matches!(kind, SyntaxKind::Property | SyntaxKind::DestructuringDeclaration);
                self.close_declaration(decl, kind, binds_preceding);
                true
            }
            None => {
                decl.rollback(self);
                false
            }
        }
    }
}
