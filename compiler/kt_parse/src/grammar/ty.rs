//! Type references.
//!
//! ```text
//! typeReference = typeModifiers? typeElement "?"* ("." functionType)? .
//! typeElement   = "dynamic" | userType | functionType | "(" typeReference ")" .
//! userType      = simpleUserType ("." simpleUserType)* .
//! functionType  = "(" parameters? ")" "->" typeReference .
//! ```
//!
//! A function type may carry a receiver: `Int.(String) -> Unit`. The
//! receiver is parsed as an ordinary type first and wrapped afterwards
//! with [`Marker::precede`](crate::marker::Marker::precede), which is why a
//! user type refuses to swallow a `.` that is followed by `(`.
//!
//! Platform types (`String!`, `(Mutable)List<T>`, `Array<(out) T>`) are
//! not part of the language but show up in copied compiler output; they
//! parse into error nodes so the rest of the type stays intact.

use kt_ir::{SyntaxKind, TokenKind as T, TokenSet};

use crate::marker::Marker;
use crate::token_sets::{
    DECLARATION_FIRST, EXPRESSION_FIRST, EXPRESSION_FOLLOW, TYPE_RECOVERY_SET, TYPE_REF_FIRST,
};
use crate::Parser;

const USER_TYPE_NAME_RECOVERY: TokenSet = EXPRESSION_FIRST
    .union(EXPRESSION_FOLLOW)
    .union(DECLARATION_FIRST);

impl Parser<'_> {
    /// `TYPE_REFERENCE`
    pub(crate) fn parse_type_ref(&mut self) {
        self.parse_type_ref_with_recovery(TokenSet::EMPTY);
    }

    /// `TYPE_REFERENCE`, also stopping error recovery at `extra`.
    pub(crate) fn parse_type_ref_with_recovery(&mut self, extra: TokenSet) {
        let type_ref = self.parse_type_ref_contents(extra);
        type_ref.done(self, SyntaxKind::TypeReference);
    }

    /// Everything of a type reference but the wrapping node, which is
    /// returned open.
    fn parse_type_ref_contents(&mut self, extra: TokenSet) -> Marker {
        self.guarded(|p| {
            let type_ref = p.mark();
            p.parse_type_modifier_list();

            let mut element = p.mark();
            let mut type_before_dot = true;

            if p.at_dynamic_type() {
                let dynamic = p.mark();
                p.advance_as(T::KwDynamic);
                dynamic.done(p, SyntaxKind::DynamicType);
            } else if p.at(T::Ident) || p.at(T::KwPackage) || p.at_platform_word(0, "Mutable") {
                p.parse_user_type();
            } else if p.at(T::LParen) {
                p.parse_parenthesized_or_function_type();
            } else {
                p.error_with_recovery("Type expected", Some(TYPE_RECOVERY_SET.union(extra)));
                type_before_dot = false;
            }

            // `Int?.(Foo) -> Bar`: the `?` must not join with the `.`
            element = p.without_joining(|p| {
                let mut element = element;
                while p.at(T::Question) && p.raw_lookup(1) != T::Colon {
                    let outer = element.precede(p);
                    p.advance();
                    element.done(p, SyntaxKind::NullableType);
                    element = outer;
                }
                element
            });

            if type_before_dot && p.at(T::Dot) {
                let function_type = element.precede(p);
                let receiver_ref = element.precede(p);
                let receiver = receiver_ref.precede(p);
                receiver_ref.done(p, SyntaxKind::TypeReference);
                receiver.done(p, SyntaxKind::FunctionTypeReceiver);

                p.advance(); // .

                if p.at(T::LParen) {
                    let contents = p.parse_function_type_contents();
                    contents.abandon(p);
                } else {
                    p.error("Expecting function type");
                }
                function_type.done(p, SyntaxKind::FunctionType);
            }

            element.abandon(p);
            type_ref
        })
    }

    fn at_dynamic_type(&self) -> bool {
        let next = self.nth(1);
        self.current() == T::Ident
            && !(next == T::Dot && Self::is_identifier_like(self.nth(2)))
            && next != T::Lt
            && self.current_text() == "dynamic"
    }

    /// `(A)` is a parenthesized type, `(A) -> B` and `(a: A, B) -> C` are
    /// function types. Decided by parsing a type first and looking at
    /// what follows.
    fn parse_parenthesized_or_function_type(&mut self) {
        let attempt = self.mark();
        self.advance(); // (
        let inner = self.parse_type_ref_contents(TokenSet::EMPTY);
        inner.abandon(self);

        if self.at(T::RParen) {
            self.advance();
            if self.at(T::Arrow) {
                attempt.rollback(self);
                self.parse_function_type();
            } else {
                attempt.abandon(self);
            }
        } else {
            attempt.rollback(self);
            self.parse_function_type();
        }
    }

    /// `simpleUserType ("." simpleUserType)*`, nested left to right so
    /// that `a.b.C` is `USER_TYPE(USER_TYPE(USER_TYPE(a) . b) . C)`.
    pub(crate) fn parse_user_type(&mut self) {
        let mut user_type = self.mark();

        if self.at(T::KwPackage) {
            let keyword = self.mark();
            self.advance();
            keyword.error(self, "Expecting an element");
            self.expect_or_recover(
                T::Dot,
                "Expecting '.'",
                TokenSet::of(&[T::Ident, T::LBrace, T::RBrace]),
            );
        }

        let mut reference = self.mark();
        loop {
            self.recover_on_platform_word("Mutable");

            if self.expect_or_recover(T::Ident, "Expecting type name", USER_TYPE_NAME_RECOVERY) {
                reference.done(self, SyntaxKind::ReferenceExpression);
            } else {
                reference.abandon(self);
                break;
            }

            self.parse_type_argument_list();

            if self.at(T::Bang) {
                self.error_and_advance("Unexpected token");
            }

            if !self.at(T::Dot) {
                break;
            }
            // `Int.(Int) -> Int`: the dot belongs to a function type
            if self.nth(1) == T::LParen && !self.at_platform_word(1, "Mutable") {
                break;
            }

            let outer = user_type.precede(self);
            user_type.done(self, SyntaxKind::UserType);
            user_type = outer;

            self.advance(); // .
            reference = self.mark();
        }

        user_type.done(self, SyntaxKind::UserType);
    }

    /// `(word) Ident` starting `offset` tokens ahead.
    fn at_platform_word(&self, offset: usize, word: &str) -> bool {
        self.nth(offset) == T::LParen
            && Self::is_identifier_like(self.nth(offset + 1))
            && self.nth(offset + 2) == T::RParen
            && Self::is_identifier_like(self.nth(offset + 3))
            && self.nth_text(offset + 1) == word
    }

    /// Wrap a `(word)` platform marker at the current token in an error.
    fn recover_on_platform_word(&mut self, word: &str) {
        if self.at_platform_word(0, word) {
            self.error_and_advance_by("Unexpected tokens", 3);
        }
    }

    /// `TYPE_ARGUMENT_LIST` when at `<`.
    pub(crate) fn parse_type_argument_list(&mut self) {
        if !self.at(T::Lt) {
            return;
        }
        let list = self.mark();
        self.try_parse_type_argument_list(TokenSet::EMPTY);
        list.done(self, SyntaxKind::TypeArgumentList);
    }

    /// `"<" (projection ",")* projection? ">"`, without the wrapping node.
    /// Returns whether the closing `>` was found.
    pub(crate) fn try_parse_type_argument_list(&mut self, extra: TokenSet) -> bool {
        self.without_newlines(|p| {
            p.advance(); // <

            loop {
                let projection = p.mark();
                p.recover_on_platform_word("out");
                p.parse_type_argument_modifier_list();

                if p.at(T::Star) {
                    p.advance();
                } else {
                    p.parse_type_ref_with_recovery(extra);
                }
                projection.done(p, SyntaxKind::TypeProjection);

                if !p.consume_if(T::Comma) || p.at(T::Gt) {
                    break;
                }
            }

            let closed = p.consume_if(T::Gt);
            if !closed {
                p.error("Expecting a '>'");
            }
            closed
        })
    }

    /// `FUNCTION_TYPE`
    fn parse_function_type(&mut self) {
        let function_type = self.parse_function_type_contents();
        function_type.done(self, SyntaxKind::FunctionType);
    }

    fn parse_function_type_contents(&mut self) -> Marker {
        debug_assert_eq!(self.current(), T::LParen);
        let function_type = self.mark();
        self.parse_value_parameter_list(true, true, TokenSet::EMPTY);
        self.expect_or_recover(
            T::Arrow,
            "Expecting '->' to specify return type of a function type",
            TYPE_REF_FIRST,
        );
        self.parse_type_ref();
        function_type
    }
}

