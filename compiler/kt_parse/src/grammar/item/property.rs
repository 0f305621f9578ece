//! Properties, accessors and destructuring declarations.
//!
//! ```text
//! property = modifiers ("val" | "var") typeParameters? (type ".")?
//!            ("(" destructuringEntry ("," destructuringEntry)* ")" | SimpleName)
//!            (":" type)? typeConstraints ("by" expression | "=" expression)?
//!            (getter? setter? | setter? getter?) ";"? .
//! ```
//!
//! Accessors are only looked for where a property may have them: members,
//! top-level and script-level properties. In a local `val a = 1; b` the
//! `b` is the next statement.

use kt_ir::{SyntaxKind, TokenKind as T, TokenSet};

use crate::annotation::AnnotationMode;
use crate::grammar::DeclarationMode;
use crate::token_sets::{DECLARATION_FIRST, MODIFIER_KEYWORDS, PARAMETER_NAME_RECOVERY_SET, PROPERTY_NAME_FOLLOW};
use crate::Parser;

/// Tokens that may start the next accessor or end the property.
const ACCESSOR_FIRST_OR_PROPERTY_END: TokenSet = MODIFIER_KEYWORDS.union(TokenSet::of(&[
    T::At,
    T::KwGet,
    T::KwSet,
    T::EolOrSemicolon,
    T::RBrace,
]));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Accessor {
    Get,
    Set,
}

impl Parser<'_> {
    /// `PROPERTY` or `DESTRUCTURING_DECLARATION`.
    pub(crate) fn parse_property(&mut self, mode: DeclarationMode) -> SyntaxKind {
        self.advance(); // val or var

        let type_parameters = self.at(T::Lt)
            && self.parse_type_parameter_list(TokenSet::of(&[T::Ident, T::Eq, T::Colon, T::Semicolon]));

        let (receiver_declared, destructuring, name_on_next_line, before_name) =
            self.without_joining(|p| {
                let receiver = p.mark();
                let receiver_declared = p.parse_receiver_type("property", PROPERTY_NAME_FOLLOW);

                let destructuring = p.at(T::LParen);
                p.error_if(
                    receiver,
                    destructuring && receiver_declared,
                    "Receiver type is not allowed on a destructuring declaration",
                );

                let name_on_next_line = p.newline_before() || p.eof();
                let before_name = p.mark();

                if destructuring {
                    let entries = p.mark();
                    p.parse_multi_declaration_name(PROPERTY_NAME_FOLLOW);
                    p.error_if(
                        entries,
                        !mode.destructuring_allowed(),
                        "Destructuring declarations are only allowed for local variables/values",
                    );
                } else {
                    p.parse_function_or_property_name(
                        receiver_declared,
                        "property",
                        PROPERTY_NAME_FOLLOW,
                        true,
                    );
                }
                (receiver_declared, destructuring, name_on_next_line, before_name)
            });

        let mut has_type = false;
        if self.at(T::Colon) {
            has_type = true;
            let type_ref = self.mark();
            self.advance();
            self.parse_type_ref();
            self.error_if(
                type_ref,
                destructuring,
                "Type annotations are not allowed on destructuring declarations",
            );
        }

        self.parse_type_constraints_guarded(type_parameters);

        if !self.parse_property_delegate_or_assignment()
            && name_on_next_line
            && !has_type
            && !receiver_declared
        {
            // val
            // foo()
            // the identifier most likely starts the next statement
            before_name.rollback(self);
            self.error("Expecting property name or receiver type");
            return SyntaxKind::Property;
        }
        before_name.abandon(self);

        if mode.accessors_allowed() {
            self.parse_accessors();
        }

        if destructuring {
            SyntaxKind::DestructuringDeclaration
        } else {
            SyntaxKind::Property
        }
    }

    fn parse_property_delegate_or_assignment(&mut self) -> bool {
        if self.at(T::KwBy) {
            let delegate = self.mark();
            self.advance();
            self.parse_expression();
            delegate.done(self, SyntaxKind::PropertyDelegate);
            true
        } else if self.consume_if(T::Eq) {
            self.parse_expression();
            true
        } else {
            false
        }
    }

    /// Getter and setter, in either order, each at most once.
    fn parse_accessors(&mut self) {
        let semicolon_then_newline =
            self.with_newlines(|p| p.consume_if(T::Semicolon) && p.newline_before());
        if semicolon_then_newline {
            return;
        }

        let mut seen_get = false;
        let mut seen_set = false;
        while let Some(accessor) = self.parse_property_accessor(seen_get, seen_set) {
            match accessor {
                Accessor::Get => seen_get = true,
                Accessor::Set => seen_set = true,
            }
        }

        if self.at_set(TokenSet::of(&[T::EolOrSemicolon, T::RBrace])) {
            self.consume_if(T::Semicolon);
        } else if self.previous() != T::Semicolon {
            self.error_until(
                "Property getter or setter expected",
                DECLARATION_FIRST.union(TokenSet::of(&[T::EolOrSemicolon, T::LBrace, T::RBrace])),
            );
        }
    }

    /// `modifiers ("get" "(" ")" | "set" "(" parameter ")") (":" type)? functionBody`
    fn parse_property_accessor(&mut self, seen_get: bool, seen_set: bool) -> Option<Accessor> {
        let accessor_marker = self.mark();
        self.parse_modifier_list(AnnotationMode::UnescapedAllowed, TokenSet::EMPTY);

        let accessor = if self.at(T::KwGet) && !seen_get {
            Accessor::Get
        } else if self.at(T::KwSet) && !seen_set {
            Accessor::Set
        } else {
            accessor_marker.rollback(self);
            return None;
        };
        self.advance(); // get or set

        if !self.at(T::LParen) {
            // val a: Int get
            if self.at_set(ACCESSOR_FIRST_OR_PROPERTY_END) {
                self.close_declaration(accessor_marker, SyntaxKind::PropertyAccessor, true);
                return Some(accessor);
            }
            self.error_until(
                "Accessor body expected",
                ACCESSOR_FIRST_OR_PROPERTY_END.union(TokenSet::of(&[T::LBrace, T::LParen, T::Eq])),
            );
        }

        self.without_newlines(|p| {
            p.expect_or_recover(
                T::LParen,
                "Expecting '('",
                TokenSet::of(&[T::RParen, T::Ident, T::Colon, T::LBrace, T::Eq]),
            );
            if accessor == Accessor::Set {
                p.parse_setter_parameter();
            }
            if !p.at(T::RParen) {
                p.error_until(
                    "Expecting ')'",
                    TokenSet::of(&[T::RParen, T::Colon, T::LBrace, T::RBrace, T::Eq, T::EolOrSemicolon]),
                );
            }
            p.consume_if(T::RParen);
        });

        if self.consume_if(T::Colon) {
            self.parse_type_ref();
        }

        self.parse_function_body();
        self.close_declaration(accessor_marker, SyntaxKind::PropertyAccessor, true);
        Some(accessor)
    }

    /// The lone parameter of a setter, in its own `VALUE_PARAMETER_LIST`.
    fn parse_setter_parameter(&mut self) {
        let list = self.mark();
        let parameter = self.mark();
        self.parse_modifier_list(
            AnnotationMode::UnescapedAllowed,
            TokenSet::of(&[T::Comma, T::Colon, T::RParen]),
        );
        self.expect_or_recover(
            T::Ident,
            "Expecting parameter name",
            TokenSet::of(&[T::RParen, T::Colon, T::LBrace, T::Eq]),
        );
        if self.consume_if(T::Colon) {
            self.parse_type_ref();
        }
        parameter.done(self, SyntaxKind::ValueParameter);
        self.consume_if(T::Comma);
        list.done(self, SyntaxKind::ValueParameterList);
    }

    /// `"(" (entry ("," entry)* ","?)? ")"` with the entries as
    /// `DESTRUCTURING_DECLARATION_ENTRY` nodes. The caller wraps the result.
    pub(crate) fn parse_multi_declaration_name(&mut self, follow: TokenSet) {
        self.without_newlines(|p| {
            p.advance(); // (

            let recovery = PARAMETER_NAME_RECOVERY_SET.union(follow);
            if !p.at_set(follow) {
                loop {
                    if p.at(T::Comma) {
                        p.error_and_advance("Expecting a name");
                    } else if p.at(T::RParen) {
                        // val () = foo()
                        p.error("Expecting a name");
                        break;
                    }

                    let entry = p.mark();
                    p.parse_modifier_list(
                        AnnotationMode::UnescapedAllowed,
                        TokenSet::of(&[T::Comma, T::RParen, T::Colon, T::Eq]),
                    );
                    p.expect_or_recover(T::Ident, "Expecting a name", recovery);
                    if p.consume_if(T::Colon) {
                        p.parse_type_ref_with_recovery(follow);
                    }
                    entry.done(p, SyntaxKind::DestructuringDeclarationEntry);

                    if !p.consume_if(T::Comma) || p.at(T::RParen) {
                        break;
                    }
                }
            }

            p.expect_or_recover(T::RParen, "Expecting ')'", follow);
        });
    }
}

#[cfg(test)]
mod tests;
