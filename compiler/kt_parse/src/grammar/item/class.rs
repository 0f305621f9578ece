//! Classes, objects and their bodies.
//!
//! ```text
//! class = modifiers ("class" | "interface") SimpleName typeParameters?
//!         primaryConstructor? (":" delegationSpecifier ("," delegationSpecifier)*)?
//!         typeConstraints (classBody | enumClassBody)? .
//! object = "object" SimpleName? primaryConstructor? (":" delegationSpecifiers)? classBody? .
//! primaryConstructor = (modifiers "constructor")? valueParameters .
//! ```

use kt_ir::{SyntaxKind, TokenKind as T, TokenSet};
use tracing::debug;

use crate::annotation::AnnotationMode;
use crate::grammar::{DeclarationMode, NameMode};
use crate::token_sets::{CLASS_NAME_RECOVERY_SET, SOFT_KEYWORDS_AT_MEMBER_START, TYPE_PARAMETER_GT_RECOVERY_SET};
use crate::Parser;

/// What introduces a class-like declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Classifier {
    /// `class` or `interface`.
    Class { enum_class: bool },
    Object,
    /// `enum Foo { ... }`: an enum class without its `class` keyword.
    MissingClassKeyword,
}

impl Classifier {
    fn is_object(self) -> bool {
        self == Self::Object
    }

    fn is_enum(self) -> bool {
        matches!(self, Self::Class { enum_class: true } | Self::MissingClassKeyword)
    }
}

/// How an enum entry ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EnumEntryEnd {
    /// No entry here; nothing consumed.
    Failed,
    NoDelimiter,
    Comma,
    Semicolon,
}

impl Parser<'_> {
    /// `CLASS` or `OBJECT_DECLARATION`. `body_required` is set for object
    /// literals, which must have a body.
    pub(crate) fn parse_class_or_object(
        &mut self,
        classifier: Classifier,
        name: NameMode,
        body_required: bool,
        mode: DeclarationMode,
    ) -> SyntaxKind {
        let kind = if classifier.is_object() {
            SyntaxKind::ObjectDeclaration
        } else {
            SyntaxKind::Class
        };

        if classifier == Classifier::MissingClassKeyword {
            self.error("'class' keyword is expected after 'enum'");
        } else {
            self.advance(); // class, interface or object
        }

        match name {
            NameMode::Required => {
                self.expect_or_recover(T::Ident, "Name expected", CLASS_NAME_RECOVERY_SET);
            }
            NameMode::Prohibited if self.at(T::Ident) => {
                self.error_and_advance("An object expression cannot bind a name");
            }
            NameMode::Allowed => {
                self.consume_if(T::Ident);
            }
            NameMode::Prohibited => {}
        }

        let type_parameters = self.parse_type_parameter_list(TYPE_PARAMETER_GT_RECOVERY_SET);

        if !self.parse_primary_constructor(mode) {
            return kind;
        }

        if self.consume_if(T::Colon) {
            self.parse_delegation_specifier_list();
        }

        self.only_for_classes(classifier.is_object(), "Where clause is not allowed for objects", |p| {
            p.parse_type_constraints_guarded(type_parameters);
        });

        if self.at(T::LBrace) {
            if classifier.is_enum() {
                self.parse_enum_class_body();
            } else {
                self.parse_class_body();
            }
        } else if body_required {
            let body = self.mark();
            self.error("Expecting a class body");
            body.done(self, SyntaxKind::ClassBody);
        }

        kind
    }

    /// Run `f`; for objects, whatever it consumed becomes an error.
    fn only_for_classes(&mut self, object: bool, message: &str, f: impl FnOnce(&mut Self)) {
        if !object {
            f(self);
            return;
        }
        let marker = self.mark();
        let start = self.position();
        f(self);
        let consumed = self.position() != start;
        self.error_if(marker, consumed, message);
    }

    /// `PRIMARY_CONSTRUCTOR`, if any. Returns false when modifiers turned
    /// out to belong to whatever follows the class header; those are
    /// rolled back and the class ends there.
    fn parse_primary_constructor(&mut self, mode: DeclarationMode) -> bool {
        let constructor = self.mark();
        let annotation_mode = if mode == DeclarationMode::Local {
            AnnotationMode::PrimaryConstructorModifiersLocal
        } else {
            AnnotationMode::PrimaryConstructorModifiers
        };
        let has_modifiers = self.parse_modifier_list(annotation_mode, TokenSet::EMPTY).parsed;

        // class A
        // private fun foo() {}
        if has_modifiers && !self.at_set(TokenSet::of(&[T::LParen, T::LBrace, T::Colon, T::KwConstructor])) {
            debug!(pos = self.position(), "modifiers after class header belong to the next declaration");
            constructor.rollback(self);
            return false;
        }

        let has_keyword = self.consume_if(T::KwConstructor);

        if self.at(T::LParen) {
            self.parse_value_parameter_list(false, true, TokenSet::of(&[T::LBrace, T::RBrace]));
            constructor.done(self, SyntaxKind::PrimaryConstructor);
        } else if has_modifiers || has_keyword {
            // class A private : Foo
            constructor.done(self, SyntaxKind::PrimaryConstructor);
            if has_keyword {
                self.error("Expecting primary constructor parameter list");
            } else {
                self.error("Expecting 'constructor' keyword");
            }
        } else {
            constructor.abandon(self);
        }
        true
    }

    /// `"{" enumEntries (";" members)? "}"`
    fn parse_enum_class_body(&mut self) {
        let body = self.mark();
        self.with_newlines(|p| {
            p.advance(); // {

            if !p.parse_enum_entries() && !p.at(T::RBrace) {
                p.error("Expecting ';' after the last enum entry or '}' to close enum class body");
            }
            p.parse_members();
            p.expect(T::RBrace, "Expecting '}' to close enum class body");
        });
        body.done(self, SyntaxKind::ClassBody);
    }

    /// Returns whether ordinary members may follow the entries.
    fn parse_enum_entries(&mut self) -> bool {
        while !self.eof() && !self.at(T::RBrace) {
            match self.parse_enum_entry() {
                // no entries, but members may follow a `;`
                EnumEntryEnd::Failed => return self.consume_if(T::Semicolon),
                EnumEntryEnd::NoDelimiter => return false,
                EnumEntryEnd::Comma => {}
                EnumEntryEnd::Semicolon => return true,
            }
        }
        false
    }

    /// `modifiers SimpleName valueArguments? classBody?`
    fn parse_enum_entry(&mut self) -> EnumEntryEnd {
        let entry = self.mark();
        self.parse_modifier_list(
            AnnotationMode::UnescapedAllowed,
            TokenSet::of(&[T::Comma, T::Semicolon, T::RBrace]),
        );

        if self.at_set(SOFT_KEYWORDS_AT_MEMBER_START) || !self.at(T::Ident) {
            entry.rollback(self);
            return EnumEntryEnd::Failed;
        }
        self.advance();

        if self.at(T::LParen) {
            let initializers = self.mark();
            let call = self.mark();
            self.parse_value_argument_list();
            call.done(self, SyntaxKind::SuperTypeCallEntry);
            initializers.done(self, SyntaxKind::InitializerList);
        }

        if self.at(T::LBrace) {
            self.parse_class_body();
        }

        let comma = self.consume_if(T::Comma);
        let semicolon = self.consume_if(T::Semicolon);

        self.close_declaration(entry, SyntaxKind::EnumEntry, true);

        if semicolon {
            EnumEntryEnd::Semicolon
        } else if comma {
            EnumEntryEnd::Comma
        } else {
            EnumEntryEnd::NoDelimiter
        }
    }

    /// `"{" members "}"`
    pub(crate) fn parse_class_body(&mut self) {
        let body = self.mark();
        self.with_newlines(|p| {
            if p.expect(T::LBrace, "Expecting a class body") {
                p.parse_members();
                p.expect(T::RBrace, "Missing '}'");
            }
        });
        body.done(self, SyntaxKind::ClassBody);
    }

    /// `"constructor" valueParameters (":" ("this" | "super") valueArguments)? block?`
    pub(crate) fn parse_secondary_constructor(&mut self) {
        self.advance(); // constructor

        let arguments_recovery = TokenSet::of(&[
            T::LBrace,
            T::Semicolon,
            T::RParen,
            T::EolOrSemicolon,
            T::RBrace,
        ]);
        if self.at(T::LParen) {
            self.parse_value_parameter_list(false, true, arguments_recovery);
        } else {
            self.error_with_recovery("Expecting '('", Some(arguments_recovery.with(T::Colon)));
        }

        if self.consume_if(T::Colon) {
            let call = self.mark();
            if self.at(T::KwThis) || self.at(T::KwSuper) {
                let reference = self.mark();
                self.advance();
                reference.done(self, SyntaxKind::ConstructorDelegationReference);
                self.parse_value_argument_list();
            } else {
                self.parse_wrong_delegation_call();
            }
            call.done(self, SyntaxKind::ConstructorDelegationCall);
        } else {
            let call = self.mark();
            let reference = self.mark();
            reference.done(self, SyntaxKind::ConstructorDelegationReference);
            call.done(self, SyntaxKind::ConstructorDelegationCall);
        }

        if self.at(T::LBrace) {
            self.parse_block();
        }
    }

    /// `constructor() : foo()`. The wrong callee is kept only when a body
    /// follows the arguments; otherwise it is parsed again as whatever
    /// comes next.
    fn parse_wrong_delegation_call(&mut self) {
        self.error("Expecting a 'this' or 'super' constructor call");

        if self.at(T::LParen) {
            self.parse_value_argument_list();
            return;
        }

        let callee = self.mark();
        self.advance();
        self.parse_value_argument_list();
        if self.at(T::LBrace) {
            callee.abandon(self);
        } else {
            callee.rollback(self);
        }
    }

    /// `SUPER_TYPE_LIST`
    fn parse_delegation_specifier_list(&mut self) {
        let list = self.mark();
        loop {
            if self.at(T::Comma) {
                self.error_and_advance("Expecting a delegation specifier");
                continue;
            }
            self.parse_delegation_specifier();
            if !self.consume_if(T::Comma) {
                break;
            }
        }
        list.done(self, SyntaxKind::SuperTypeList);
    }

    /// `userType valueArguments? | userType "by" expression`
    fn parse_delegation_specifier(&mut self) {
        let specifier = self.mark();
        let callee = self.mark();
        self.parse_type_ref();

        if self.at(T::KwBy) {
            callee.abandon(self);
            self.advance();
            self.in_by_clause(Self::parse_expression);
            specifier.done(self, SyntaxKind::DelegatedSuperTypeEntry);
        } else if self.at(T::LParen) {
            callee.done(self, SyntaxKind::ConstructorCallee);
            self.parse_value_argument_list();
            specifier.done(self, SyntaxKind::SuperTypeCallEntry);
        } else {
            callee.abandon(self);
            specifier.done(self, SyntaxKind::SuperTypeEntry);
        }
    }
}
