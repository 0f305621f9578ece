//! The postfix loop: calls, trailing lambdas, indexing, member access,
//! postfix operators and callable references.

use kt_ir::{SyntaxKind, TokenKind as T, TokenSet};
use tracing::debug;

use crate::marker::{CompletedMarker, Marker};
use crate::token_sets::{EXPRESSION_FIRST, EXPRESSION_FOLLOW, TYPE_ARGUMENT_LIST_STOPPERS};
use crate::Parser;

const POSTFIX_OPERATIONS: TokenSet = TokenSet::of(&[T::PlusPlus, T::MinusMinus, T::BangBang]);

impl Parser<'_> {
    /// `atomicExpression postfixUnarySuffix*`
    pub(super) fn parse_postfix_expression(&mut self) {
        let mut expression = self.mark();

        let mut first_parsed = if self.at(T::ColonColon) {
            // `::foo` has an empty receiver
            let reference = self.mark();
            match self.parse_double_colon_suffix(reference) {
                Ok(_) => true,
                Err(reference) => {
                    reference.abandon(self);
                    false
                }
            }
        } else {
            self.parse_atomic_expression()
        };

        loop {
            if self.interrupted_with_newline() {
                break;
            }

            let completed = if self.at(T::LBracket) {
                self.parse_array_access();
                expression.done(self, SyntaxKind::ArrayAccessExpression)
            } else if self.parse_call_suffix() {
                expression.done(self, SyntaxKind::CallExpression)
            } else if self.at(T::Dot) || self.at(T::SafeAccess) {
                let kind = if self.current() == T::Dot {
                    SyntaxKind::DotQualifiedExpression
                } else {
                    SyntaxKind::SafeAccessExpression
                };
                self.advance();

                if !first_parsed {
                    // `.foo` after a failed receiver starts over
                    expression.abandon(self);
                    expression = self.mark();
                    first_parsed = self.parse_atomic_expression();
                    continue;
                }

                self.parse_selector_call_expression();
                expression.done(self, kind)
            } else if self.at_set(POSTFIX_OPERATIONS) {
                self.parse_operation_reference();
                expression.done(self, SyntaxKind::PostfixExpression)
            } else {
                self.skip_question_marks_before_double_colon();
                match self.parse_double_colon_suffix(expression) {
                    Ok(completed) => completed,
                    Err(unused) => {
                        expression = unused;
                        break;
                    }
                }
            };
            expression = completed.precede(self);
        }

        expression.abandon(self);
    }

    /// `::name`, `::class`. Hands `expression` back untouched when not at
    /// `::`.
    fn parse_double_colon_suffix(&mut self, expression: Marker) -> Result<CompletedMarker, Marker> {
        if !self.at(T::ColonColon) {
            return Err(expression);
        }
        self.advance(); // ::

        if self.at(T::KwClass) {
            self.advance();
            return Ok(expression.done(self, SyntaxKind::ClassLiteralExpression));
        }

        self.parse_simple_name_expression();

        if self.at(T::Lt) {
            let type_arguments = self.mark();
            if self.try_parse_type_argument_list(TYPE_ARGUMENT_LIST_STOPPERS) {
                type_arguments.error(self, "Type arguments are not allowed");
            } else {
                type_arguments.rollback(self);
            }
        }

        if self.at(T::LParen) && !self.newline_before() {
            let call = self.mark();
            self.parse_call_suffix();
            call.error(
                self,
                "This syntax is reserved for future use; to call a reference, enclose it in parentheses: (foo::bar)(args)",
            );
        }

        Ok(expression.done(self, SyntaxKind::CallableReferenceExpression))
    }

    /// `Foo?::bar`: the question marks belong to the receiver type.
    fn skip_question_marks_before_double_colon(&mut self) {
        if self.current() != T::Question {
            return;
        }
        let mut count = 1;
        while self.nth(count) == T::Question {
            count += 1;
        }
        if self.nth(count) == T::ColonColon {
            for _ in 0..count {
                self.advance();
            }
        }
    }

    /// The part after `.` or `?.`: a name, possibly called.
    fn parse_selector_call_expression(&mut self) {
        let call = self.mark();
        self.parse_atomic_expression();
        if !self.newline_before() && self.parse_call_suffix() {
            call.done(self, SyntaxKind::CallExpression);
        } else {
            call.abandon(self);
        }
    }

    /// `typeArguments? valueArguments? annotatedLambda*`, at least one part.
    /// Type arguments are speculative: `a < b` is a comparison unless a
    /// `>` closes the list.
    fn parse_call_suffix(&mut self) -> bool {
        if self.parse_call_with_closure() {
            return true;
        }
        if self.at(T::LParen) {
            self.parse_value_argument_list();
            self.parse_call_with_closure();
            return true;
        }
        if self.at(T::Lt) {
            let type_arguments = self.mark();
            if self.try_parse_type_argument_list(TYPE_ARGUMENT_LIST_STOPPERS) {
                type_arguments.done(self, SyntaxKind::TypeArgumentList);
                if !self.newline_before() && self.at(T::LParen) {
                    self.parse_value_argument_list();
                }
                self.parse_call_with_closure();
                return true;
            }
            debug!(pos = self.position(), "`<` is not a type argument list");
            type_arguments.rollback(self);
        }
        false
    }

    /// `LAMBDA_ARGUMENT*`. Returns whether any was parsed.
    fn parse_call_with_closure(&mut self) -> bool {
        if !self.trailing_lambdas_allowed() {
            return false;
        }
        let mut parsed = false;
        loop {
            let argument = self.mark();
            if !self.parse_annotated_lambda(false) {
                argument.abandon(self);
                break;
            }
            argument.done(self, SyntaxKind::LambdaArgument);
            parsed = true;
        }
        parsed
    }

    /// `INDICES` for `[a, b]`.
    fn parse_array_access(&mut self) {
        let indices = self.mark();
        self.without_newlines(|p| {
            p.advance(); // [
            loop {
                if p.at(T::Comma) {
                    p.error_and_advance("Expecting an index element");
                }
                if p.at(T::RBracket) {
                    p.error("Expecting an index element");
                    break;
                }
                p.parse_expression();
                if !p.consume_if(T::Comma) {
                    break;
                }
            }
            p.expect(T::RBracket, "Expecting ']'");
        });
        indices.done(self, SyntaxKind::Indices);
    }

    /// `"(" (argument ("," argument)* ","?)? ")"`
    pub(crate) fn parse_value_argument_list(&mut self) {
        let list = self.mark();
        self.without_newlines(|p| {
            if !p.expect_or_recover(T::LParen, "Expecting an argument list", EXPRESSION_FOLLOW) {
                return;
            }
            if !p.at(T::RParen) {
                loop {
                    while p.at(T::Comma) {
                        p.error_and_advance("Expecting an argument");
                    }
                    let start = p.position();
                    p.parse_value_argument();

                    if p.at(T::Colon) && p.nth(1) == T::Ident {
                        p.error_and_advance_by("Unexpected type specification", 2);
                    }
                    if !p.at(T::Comma) {
                        if p.at_set(EXPRESSION_FIRST) && p.position() != start {
                            p.error("Expecting ','");
                            continue;
                        }
                        break;
                    }
                    p.advance(); // ,
                    if p.at(T::RParen) {
                        break;
                    }
                }
            }
            p.expect_or_recover(T::RParen, "Expecting ')'", EXPRESSION_FOLLOW);
        });
        list.done(self, SyntaxKind::ValueArgumentList);
    }

    /// `(name "=")? "*"? expression`
    fn parse_value_argument(&mut self) {
        let argument = self.mark();
        if self.current() == T::Ident || self.current().is_soft_keyword() {
            if self.nth(1) == T::Eq {
                let name = self.mark();
                let reference = self.mark();
                self.advance_as(T::Ident);
                reference.done(self, SyntaxKind::ReferenceExpression);
                name.done(self, SyntaxKind::ValueArgumentName);
                self.advance(); // =
            }
        }
        self.consume_if(T::Star);
        self.parse_expression();
        argument.done(self, SyntaxKind::ValueArgument);
    }
}
