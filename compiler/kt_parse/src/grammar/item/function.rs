//! Functions, receiver types, value parameters and blocks.
//!
//! ```text
//! function = modifiers "fun" typeParameters? (type ".")? SimpleName?
//!            typeParameters? valueParameters (":" type)? typeConstraints
//!            functionBody? .
//! functionBody = block | "=" expression .
//! ```
//!
//! The receiver type ends at a `.` that is found by scanning ahead:
//! `fun A.B.foo()` has the receiver `A.B`, and the type parser only gets
//! to see the tokens before the last dot.

use kt_ir::{SyntaxKind, TokenKind as T, TokenSet};
use tracing::{debug, trace};

use crate::annotation::AnnotationMode;
use crate::scanner::{AtSet, FirstBefore, LastBefore};
use crate::token_sets::{
    FUNCTION_NAME_FOLLOW, LAMBDA_VALUE_PARAMETER_FIRST, NO_MODIFIER_BEFORE_FOR_VALUE_PARAMETER,
    PARAMETER_NAME_RECOVERY_SET, RECEIVER_TYPE_TERMINATORS, TOP_LEVEL_DECLARATION_FIRST,
    VALUE_PARAMETER_FIRST,
};
use crate::Parser;

const VALUE_PARAMETERS_FOLLOW: TokenSet =
    TokenSet::of(&[T::Eq, T::LBrace, T::RBrace, T::Semicolon, T::RParen]);

impl Parser<'_> {
    /// `FUN`. With `fail_if_identifier`, returns `None` as soon as the
    /// function turns out to have a name; the caller rolls back.
    pub(crate) fn parse_function(&mut self, fail_if_identifier: bool) -> Option<SyntaxKind> {
        self.advance(); // fun

        // class A { fun }
        if self.at(T::RBrace) {
            self.error("Function body expected");
            return Some(SyntaxKind::Fun);
        }

        let mut type_parameters = self.parse_type_parameter_list(TokenSet::of(&[
            T::LBracket,
            T::LBrace,
            T::RBrace,
            T::LParen,
        ]));

        let proceed = self.without_joining(|p| {
            let receiver = p.parse_receiver_type("function", FUNCTION_NAME_FOLLOW);
            if fail_if_identifier && p.at(T::Ident) {
                return false;
            }
            p.parse_function_or_property_name(receiver, "function", FUNCTION_NAME_FOLLOW, false);
            true
        });
        if !proceed {
            return None;
        }

        if self.at(T::Lt) {
            self.parse_misplaced_type_parameters(type_parameters);
            type_parameters = true;
        }

        if self.at(T::LParen) {
            self.parse_value_parameter_list(false, false, VALUE_PARAMETERS_FOLLOW);
        } else {
            self.error("Expecting '('");
        }

        if self.consume_if(T::Colon) {
            self.parse_type_ref();
        }

        self.parse_type_constraints_guarded(type_parameters);

        if !self.consume_if(T::Semicolon) && (self.at(T::Eq) || self.at(T::LBrace)) {
            self.parse_function_body();
        }

        Some(SyntaxKind::Fun)
    }

    /// Type parameters after the name. Legal when there were none before
    /// it; otherwise the second list becomes one flat error.
    fn parse_misplaced_type_parameters(&mut self, already_declared: bool) {
        let attempt = self.mark();
        self.parse_type_parameter_list(VALUE_PARAMETERS_FOLLOW.with(T::LParen));
        if !already_declared {
            attempt.abandon(self);
            return;
        }

        let end = self.position();
        attempt.rollback(self);
        let error = self.mark();
        while self.position() < end && !self.eof() {
            self.advance();
        }
        error.error(self, "Only one type parameter list is allowed for a function");
    }

    /// `(annotations | type ".")?`. Returns whether a receiver type was
    /// parsed.
    pub(crate) fn parse_receiver_type(&mut self, title: &str, name_follow: TokenSet) -> bool {
        let annotations = self.mark();
        let annotations_present = self.parse_annotations(AnnotationMode::UnescapedAllowed);
        let last_dot = self.last_dot_after_receiver();

        match (annotations_present, last_dot) {
            (true, Some(_)) => {
                debug!(pos = self.position(), "annotations belong to the receiver type");
                annotations.rollback(self);
            }
            (true, None) => annotations.error(self, "Annotations are not allowed in this position"),
            (false, _) => annotations.abandon(self),
        }

        let Some(last_dot) = last_dot else {
            return false;
        };

        trace!(last_dot, "receiver type");
        self.truncated(last_dot, Self::parse_type_ref);

        if self.at_set(RECEIVER_TYPE_TERMINATORS) {
            self.advance();
        } else {
            self.error_with_recovery(
                &format!("Expecting '.' before a {title} name"),
                Some(name_follow),
            );
        }
        true
    }

    fn last_dot_after_receiver(&mut self) -> Option<usize> {
        if self.at(T::LParen) {
            self.scan(&mut FirstBefore::new(
                AtSet(RECEIVER_TYPE_TERMINATORS),
                after_parenthesized_receiver,
            ))
        } else {
            self.scan(&mut LastBefore::new(
                AtSet(RECEIVER_TYPE_TERMINATORS),
                after_receiver,
            ))
        }
    }

    fn definitely_out_of_receiver(&mut self) -> bool {
        self.at_set(TokenSet::of(&[T::Eq, T::Colon, T::LBrace, T::RBrace, T::KwBy]))
            || self.at_set(TOP_LEVEL_DECLARATION_FIRST)
    }

    /// The name after an optional receiver.
    pub(crate) fn parse_function_or_property_name(
        &mut self,
        receiver_found: bool,
        title: &str,
        name_follow: TokenSet,
        name_required: bool,
    ) {
        // anonymous functions have no name
        if !name_required && self.at_set(name_follow) {
            return;
        }

        let recovery = name_follow
            .union(TokenSet::of(&[T::LBrace, T::RBrace]))
            .union(TOP_LEVEL_DECLARATION_FIRST);
        let message = if receiver_found {
            format!("Expecting {title} name")
        } else {
            format!("Expecting {title} name or receiver type")
        };
        self.expect_or_recover(T::Ident, &message, recovery);
    }

    /// `block | "=" expression`
    pub(crate) fn parse_function_body(&mut self) {
        if self.at(T::LBrace) {
            self.parse_block();
        } else if self.consume_if(T::Eq) {
            self.parse_expression();
            self.consume_if(T::Semicolon);
        } else {
            self.error("Expecting function body");
        }
    }

    /// `"{" statements "}"`
    pub(crate) fn parse_block(&mut self) {
        let block = self.mark();
        self.with_newlines(|p| {
            p.expect(T::LBrace, "Expecting '{' to open a block");
            p.parse_statements(false);
            p.expect(T::RBrace, "Expecting '}'");
        });
        block.done(self, SyntaxKind::Block);
    }

    /// `"(" (parameter ("," parameter)* ","?)? ")"`
    ///
    /// In a function type, a parameter may be a bare type: `(Int, b: B) -> C`.
    pub(crate) fn parse_value_parameter_list(
        &mut self,
        is_function_type: bool,
        type_required: bool,
        recovery: TokenSet,
    ) {
        debug_assert_eq!(self.current(), T::LParen);
        let list = self.mark();

        self.without_newlines(|p| {
            p.advance(); // (

            if !p.at(T::RParen) && !p.at_set(recovery) && !p.eof() {
                p.parse_value_parameters(is_function_type, type_required);
            }

            p.expect_or_recover(T::RParen, "Expecting ')'", recovery);
        });

        list.done(self, SyntaxKind::ValueParameterList);
    }

    fn parse_value_parameters(&mut self, is_function_type: bool, type_required: bool) {
        let parameter_first = if is_function_type {
            LAMBDA_VALUE_PARAMETER_FIRST
        } else {
            VALUE_PARAMETER_FIRST
        };

        loop {
            if self.at(T::Comma) {
                self.error_and_advance("Expecting a parameter declaration");
            } else if self.at(T::RParen) {
                break;
            }

            if is_function_type {
                if !self.parse_value_parameter(true, type_required) {
                    let parameter = self.mark();
                    self.parse_function_type_parameter_modifier_list();
                    self.parse_type_ref();
                    self.close_declaration(parameter, SyntaxKind::ValueParameter, false);
                }
            } else {
                self.parse_value_parameter(false, type_required);
            }

            if self.consume_if(T::Comma) {
                continue;
            }
            // `fun bar(x: Array<Int> : Int)`: the parameter reported it
            if self.at(T::Colon) {
                continue;
            }
            if !self.at(T::RParen) {
                self.error("Expecting comma or ')'");
            }
            if !self.at_set(parameter_first) {
                break;
            }
        }
    }

    /// `modifiers ("val" | "var")? SimpleName (":" type)? ("=" expression)?`
    ///
    /// With `rollback_on_failure`, a malformed parameter is undone and
    /// false returned.
    pub(crate) fn parse_value_parameter(&mut self, rollback_on_failure: bool, type_required: bool) -> bool {
        let parameter = self.mark();

        self.parse_modifier_list(
            AnnotationMode::UnescapedAllowed,
            NO_MODIFIER_BEFORE_FOR_VALUE_PARAMETER,
        );

        if self.at(T::KwVar) || self.at(T::KwVal) {
            self.advance();
        }

        if !self.parse_value_parameter_rest(type_required) && rollback_on_failure {
            parameter.rollback(self);
            return false;
        }

        self.close_declaration(parameter, SyntaxKind::ValueParameter, false);
        true
    }

    fn parse_value_parameter_rest(&mut self, type_required: bool) -> bool {
        let mut no_errors = true;

        // `fun foo(Array<String>)` and `fun foo(: Int)`
        if (self.at(T::Ident) && self.nth(1) == T::Lt) || self.at(T::Colon) {
            self.error("Parameter name expected");
            // unnamed parameters starting with `:` still count as parsed
            if !self.consume_if(T::Colon) {
                no_errors = false;
            }
            self.parse_type_ref();
        } else {
            self.expect_or_recover(T::Ident, "Parameter name expected", PARAMETER_NAME_RECOVERY_SET);

            if self.consume_if(T::Colon) {
                // `fun foo(x: y: Int)`: `y` names the next parameter
                if self.at(T::Ident) && self.nth(1) == T::Colon {
                    self.error("Type reference expected");
                    return false;
                }
                self.parse_type_ref();
            } else if type_required {
                self.error_with_recovery(
                    "Parameters must have type annotation",
                    Some(PARAMETER_NAME_RECOVERY_SET),
                );
                no_errors = false;
            }
        }

        if self.consume_if(T::Eq) {
            self.parse_expression();
        }

        no_errors
    }
}

/// Stop condition when the receiver starts with `(`: only a dot right
/// after the parenthesized type counts.
fn after_parenthesized_receiver(p: &mut Parser<'_>, top_level: bool) -> bool {
    if top_level && p.definitely_out_of_receiver() {
        return true;
    }
    top_level && !p.at(T::Question) && !p.at(T::LParen) && !p.at(T::RParen)
}

fn after_receiver(p: &mut Parser<'_>, top_level: bool) -> bool {
    if !top_level {
        return false;
    }
    if p.definitely_out_of_receiver() || p.at(T::LParen) {
        return true;
    }
    if p.at(T::Ident) {
        let next = p.nth(1);
        return !matches!(next, T::Lt | T::Dot | T::SafeAccess | T::Question);
    }
    false
}
