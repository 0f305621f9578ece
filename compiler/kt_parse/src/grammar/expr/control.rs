//! Control structures and jumps.

use kt_ir::{SyntaxKind, TokenKind as T, TokenSet};
use tracing::trace;

use crate::annotation::AnnotationMode;
use crate::grammar::DeclarationMode;
use crate::scanner::{AtSet, FirstBefore};
use crate::token_sets::{EXPRESSION_FIRST, WHEN_CONDITION_RECOVERY_SET, WHEN_CONDITION_RECOVERY_SET_WITH_ARROW};
use crate::Parser;

/// Shared by the loop variable name and its destructuring form.
const LOOP_VARIABLE_RECOVERY_SET: TokenSet =
    TokenSet::of(&[T::KwIn, T::Colon, T::LBrace, T::RParen]);

const TRY_CATCH_RECOVERY_SET: TokenSet =
    TokenSet::of(&[T::LBrace, T::RBrace, T::KwFinally, T::KwCatch]);

/// A `val`/`var` in a `when` subject comes before any of these.
const WHEN_SUBJECT_STOPPERS: TokenSet =
    TokenSet::of(&[T::RParen, T::Eq, T::Arrow, T::LBrace, T::RBrace]);

const ELSE_ARROW_STOPPERS: TokenSet =
    TokenSet::of(&[T::Arrow, T::LBrace, T::RBrace, T::EolOrSemicolon]);

impl Parser<'_> {
    /// `"if" "(" expression ")" body? (";"? "else" body?)?`
    pub(super) fn parse_if(&mut self) {
        let expression = self.mark();
        self.advance(); // if

        self.parse_condition();

        let then = self.mark();
        if !self.at(T::KwElse) && !self.at(T::Semicolon) {
            self.parse_control_structure_body();
        }
        if self.at(T::Semicolon) && self.nth(1) == T::KwElse {
            self.advance(); // ;
        }
        then.done(self, SyntaxKind::Then);

        // `else ->` belongs to an enclosing `when`
        if self.at(T::KwElse) && self.nth(1) != T::Arrow {
            self.advance(); // else
            let otherwise = self.mark();
            if !self.at(T::Semicolon) {
                self.parse_control_structure_body();
            }
            otherwise.done(self, SyntaxKind::Else);
        }

        expression.done(self, SyntaxKind::If);
    }

    /// `"(" CONDITION ")"`
    fn parse_condition(&mut self) {
        self.without_newlines(|p| {
            if !p.expect_or_recover(
                T::LParen,
                "Expecting a condition in parentheses '(...)'",
                EXPRESSION_FIRST,
            ) {
                return;
            }
            let condition = p.mark();
            p.parse_expression();
            condition.done(p, SyntaxKind::Condition);
            p.expect(T::RParen, "Expecting ')'");
        });
    }

    /// A block or a single expression. A `{` here opens a block, not a
    /// lambda, unless it has parameters.
    pub(crate) fn parse_control_structure_body(&mut self) {
        if !self.parse_annotated_lambda(true) {
            self.parse_block_level_expression();
        }
    }

    /// `BODY`, empty after a bare `;`.
    fn parse_loop_body(&mut self) {
        let body = self.mark();
        if !self.at(T::Semicolon) {
            self.parse_control_structure_body();
        }
        body.done(self, SyntaxKind::Body);
    }

    /// `"while" "(" expression ")" body`
    pub(super) fn parse_while(&mut self) {
        let loop_ = self.mark();
        self.advance(); // while
        self.parse_condition();
        self.parse_loop_body();
        loop_.done(self, SyntaxKind::While);
    }

    /// `"do" body "while" "(" expression ")"`
    pub(super) fn parse_do_while(&mut self) {
        let loop_ = self.mark();
        self.advance(); // do

        if !self.at(T::KwWhile) {
            self.parse_loop_body();
        }
        if self.expect(T::KwWhile, "Expecting 'while' followed by a post-condition") {
            self.parse_condition();
        }

        loop_.done(self, SyntaxKind::DoWhile);
    }

    /// `"for" "(" annotations? (name (":" type)? | destructuring) "in"
    /// LOOP_RANGE ")" body`
    pub(super) fn parse_for(&mut self) {
        let loop_ = self.mark();
        self.advance(); // for

        if self.expect_or_recover(T::LParen, "Expecting '(' to open a loop range", EXPRESSION_FIRST) {
            self.without_newlines(|p| {
                if p.at(T::RParen) {
                    p.error("Expecting a variable name");
                } else {
                    p.parse_loop_parameter();
                    if p.expect_or_recover(
                        T::KwIn,
                        "Expecting 'in'",
                        TokenSet::of(&[T::LParen, T::LBrace, T::RParen]),
                    ) {
                        let range = p.mark();
                        p.parse_expression();
                        range.done(p, SyntaxKind::LoopRange);
                    }
                }
                p.expect(T::RParen, "Expecting ')'");
            });
        }

        self.parse_loop_body();
        loop_.done(self, SyntaxKind::For);
    }

    fn parse_loop_parameter(&mut self) {
        let parameter = self.mark();
        if !self.at(T::KwIn) {
            self.parse_modifier_list(AnnotationMode::EscapedOnly, TokenSet::of(&[T::KwIn, T::RParen, T::Colon]));
        }
        if self.at(T::KwVal) || self.at(T::KwVar) {
            self.error_and_advance("'val' or 'var' is not allowed on a loop parameter");
        }

        if self.at(T::LParen) {
            let destructuring = self.mark();
            self.parse_multi_declaration_name(LOOP_VARIABLE_RECOVERY_SET);
            destructuring.done(self, SyntaxKind::DestructuringDeclaration);
        } else {
            self.expect_or_recover(T::Ident, "Expecting a variable name", LOOP_VARIABLE_RECOVERY_SET);
            if self.consume_if(T::Colon) {
                self.parse_type_ref_with_recovery(TokenSet::of(&[T::KwIn]));
            }
        }
        parameter.done(self, SyntaxKind::ValueParameter);
    }

    /// `"try" block catch* finally?`
    pub(super) fn parse_try(&mut self) {
        let expression = self.mark();
        self.advance(); // try
        self.parse_block();

        let mut catch_or_finally = false;
        while self.at(T::KwCatch) {
            catch_or_finally = true;
            let catch = self.mark();
            self.advance(); // catch

            if self.at_set(TRY_CATCH_RECOVERY_SET) {
                self.error("Expecting exception variable declaration");
            } else {
                let parameters = self.mark();
                self.without_newlines(|p| {
                    p.expect_or_recover(T::LParen, "Expecting '('", TRY_CATCH_RECOVERY_SET);
                    if !p.at_set(TRY_CATCH_RECOVERY_SET) {
                        p.parse_value_parameter(false, true);
                        p.consume_if(T::Comma);
                        p.expect_or_recover(T::RParen, "Expecting ')'", TRY_CATCH_RECOVERY_SET);
                    } else {
                        p.error("Expecting exception variable declaration");
                    }
                });
                parameters.done(self, SyntaxKind::ValueParameterList);
            }

            if self.at(T::LBrace) {
                self.parse_block();
            } else {
                self.error("Expecting a block: { ... }");
            }
            catch.done(self, SyntaxKind::Catch);
        }

        if self.at(T::KwFinally) {
            catch_or_finally = true;
            let finally = self.mark();
            self.advance(); // finally
            self.parse_block();
            finally.done(self, SyntaxKind::Finally);
        }

        if !catch_or_finally {
            self.error("Expecting 'catch' or 'finally'");
        }
        expression.done(self, SyntaxKind::Try);
    }

    /// `"when" ("(" subject ")")? "{" entry* "}"`
    pub(super) fn parse_when(&mut self) {
        let when = self.mark();
        self.advance(); // when

        self.without_newlines(|p| {
            if p.consume_if(T::LParen) {
                p.parse_when_subject();
                p.expect(T::RParen, "Expecting ')'");
            }
        });

        self.with_newlines(|p| {
            if !p.expect(T::LBrace, "Expecting '{'") {
                return;
            }
            while !p.eof() && !p.at(T::RBrace) {
                let start = p.position();
                p.parse_when_entry();
                if p.position() == start {
                    p.error_and_advance("Expecting a when entry");
                }
            }
            p.expect(T::RBrace, "Expecting '}'");
        });

        when.done(self, SyntaxKind::When);
    }

    /// An expression, or a property whose value is the subject:
    /// `when (val x = f())`.
    fn parse_when_subject(&mut self) {
        let declares = self
            .scan(&mut FirstBefore::new(
                AtSet(TokenSet::of(&[T::KwVal, T::KwVar])),
                AtSet(WHEN_SUBJECT_STOPPERS),
            ))
            .is_some();

        if declares {
            let property = self.mark();
            self.parse_modifier_list(AnnotationMode::UnescapedAllowed, TokenSet::of(&[T::Eq, T::RParen]));
            if self.at(T::KwVal) || self.at(T::KwVar) {
                let kind = self.parse_property(DeclarationMode::Local);
                self.close_declaration(property, kind, false);
                return;
            }
            trace!(pos = self.position(), "no property in when subject");
            property.rollback(self);
        }
        self.parse_expression();
    }

    /// `conditions "->" body | "else" "->" body`
    fn parse_when_entry(&mut self) {
        let entry = self.mark();

        if self.at(T::KwElse) {
            self.advance(); // else

            if !self.at(T::Arrow) {
                self.error_until("Expecting '->'", ELSE_ARROW_STOPPERS);
            }
            if self.consume_if(T::Arrow) {
                if self.at_set(WHEN_CONDITION_RECOVERY_SET) {
                    self.error("Expecting an element");
                } else {
                    self.parse_control_structure_body();
                }
            } else if self.at(T::LBrace) {
                self.parse_control_structure_body();
            } else if !self.at_set(WHEN_CONDITION_RECOVERY_SET) {
                self.error_and_advance("Expecting '->'");
            }
        } else {
            self.parse_when_entry_not_else();
        }

        entry.done(self, SyntaxKind::WhenEntry);
        self.consume_if(T::Semicolon);
    }

    fn parse_when_entry_not_else(&mut self) {
        self.without_newlines(|p| {
            while !p.at(T::Arrow) {
                p.parse_when_condition();
                if !p.consume_if(T::Comma) {
                    break;
                }
                if p.at(T::Arrow) {
                    break;
                }
            }
        });

        self.expect_or_recover(T::Arrow, "Expecting '->'", WHEN_CONDITION_RECOVERY_SET);
        if self.at_set(WHEN_CONDITION_RECOVERY_SET) {
            self.error("Expecting an element");
        } else {
            self.parse_control_structure_body();
        }
    }

    /// `("in" | "!in") expression | ("is" | "!is") type | expression`
    fn parse_when_condition(&mut self) {
        let condition = self.mark();

        let kind = if self.at(T::KwIn) || self.at(T::KwNotIn) {
            let operation = self.mark();
            self.advance();
            operation.done(self, SyntaxKind::OperationReference);

            if self.at_set(WHEN_CONDITION_RECOVERY_SET_WITH_ARROW) {
                self.error("Expecting an element");
            } else {
                self.parse_expression();
            }
            SyntaxKind::WhenConditionInRange
        } else if self.at(T::KwIs) || self.at(T::KwNotIs) {
            self.advance();

            if self.at_set(WHEN_CONDITION_RECOVERY_SET_WITH_ARROW) {
                self.error("Expecting a type");
            } else {
                self.parse_type_ref();
            }
            SyntaxKind::WhenConditionIsPattern
        } else {
            if self.at_set(WHEN_CONDITION_RECOVERY_SET_WITH_ARROW) {
                self.error("Expecting an expression, is-condition or in-condition");
            } else {
                self.parse_expression();
            }
            SyntaxKind::WhenConditionExpression
        };

        condition.done(self, kind);
    }

    /// `"throw" expression`
    pub(super) fn parse_throw(&mut self) {
        let throw = self.mark();
        self.advance(); // throw
        self.parse_expression();
        throw.done(self, SyntaxKind::Throw);
    }

    /// `"return" label? expression?`. An expression on the next line is
    /// a statement of its own.
    pub(super) fn parse_return(&mut self) {
        let ret = self.mark();
        self.advance(); // return
        self.parse_label_reference_with_no_whitespace();
        if self.at_set(EXPRESSION_FIRST) && !self.at(T::EolOrSemicolon) {
            self.parse_expression();
        }
        ret.done(self, SyntaxKind::Return);
    }

    /// `("break" | "continue") label?`
    pub(super) fn parse_jump(&mut self, kind: SyntaxKind) {
        let jump = self.mark();
        self.advance();
        self.parse_label_reference_with_no_whitespace();
        jump.done(self, kind);
    }
}
