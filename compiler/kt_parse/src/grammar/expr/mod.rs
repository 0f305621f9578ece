//! Expressions and statements.
//!
//! Binary operators are parsed by precedence climbing over
//! [`Precedence`]: each tier reads operands of the tier above it and
//! folds operators of its own tier to the left, so `a + b * c` nests the
//! product under the sum. Below the binary tiers sit prefix operators,
//! then the postfix loop (calls, indexing, member access), then atomic
//! expressions.
//!
//! A line break ends an expression unless the operator after it is one
//! that may start a continuation line (see
//! [`ALLOW_NEWLINE_OPERATIONS`]). Brackets turn newlines off, so inside
//! `( )` and `[ ]` an expression may span lines freely.

mod control;
mod lambda;
mod postfix;
mod primary;

use kt_ir::{SyntaxKind, TokenKind as T, TokenSet};

use crate::annotation::AnnotationMode;
use crate::marker::Marker;
use crate::precedence::{Operand, Precedence};
use crate::token_sets::{
    ALLOW_NEWLINE_OPERATIONS, EXPRESSION_FIRST, STATEMENT_FIRST,
    STATEMENT_NEW_LINE_QUICK_RECOVERY_SET,
};
use crate::Parser;

const UNEXPECTED_ON_SAME_LINE: &str =
    "Unexpected tokens (use ';' to separate expressions on the same line)";

/// Where an unseparated run of tokens after a statement stops.
const STATEMENT_SKIP_STOPPERS: TokenSet =
    TokenSet::of(&[T::EolOrSemicolon, T::LBrace, T::RBrace]);

impl Parser<'_> {
    /// `expression`
    pub(crate) fn parse_expression(&mut self) {
        if !self.at_set(EXPRESSION_FIRST) {
            self.error("Expecting an expression");
            return;
        }
        self.guarded(|p| p.parse_binary_expression(Precedence::LOWEST));
    }

    /// `operand (op operand)*` for the operators of `tier`, folding left.
    fn parse_binary_expression(&mut self, tier: Precedence) {
        let mut expression = self.mark();
        self.parse_operand(tier);

        while !self.interrupted_with_newline() && self.at_set(tier.operations()) {
            let operation = self.current();
            self.parse_operation_reference();

            let kind = match tier.type_operand(operation) {
                Some(kind) => {
                    self.parse_type_ref();
                    kind
                }
                None => {
                    self.parse_operand(tier);
                    SyntaxKind::BinaryExpression
                }
            };
            let completed = expression.done(self, kind);
            expression = completed.precede(self);
        }

        expression.abandon(self);
    }

    fn parse_operand(&mut self, tier: Precedence) {
        match tier.operand() {
            Operand::Prefix => self.parse_prefix_expression(),
            Operand::Tier(higher) => self.parse_binary_expression(higher),
        }
    }

    /// A line break before an operator that may not begin a line.
    pub(crate) fn interrupted_with_newline(&self) -> bool {
        !ALLOW_NEWLINE_OPERATIONS.contains(self.current()) && self.newline_before()
    }

    /// `OPERATION_REFERENCE` around the current token.
    pub(crate) fn parse_operation_reference(&mut self) {
        let operation = self.mark();
        self.advance();
        operation.done(self, SyntaxKind::OperationReference);
    }

    /// `annotations prefixExpression | label prefixExpression
    /// | prefixOperation prefixExpression | postfixExpression`
    fn parse_prefix_expression(&mut self) {
        self.guarded(|p| {
            if p.at(T::At) {
                if !p.parse_local_declaration(false, false) {
                    let expression = p.mark();
                    let annotated = p.parse_annotations(AnnotationMode::EscapedOnly);
                    if annotated {
                        p.parse_prefix_expression();
                    } else {
                        p.parse_postfix_expression();
                    }
                    p.done_or_abandon(expression, SyntaxKind::AnnotatedExpression, annotated);
                }
                return;
            }

            // `!!x` is two negations, not the postfix operator
            let prefix = p.without_joining(|p| {
                if p.at_label_definition() {
                    Prefix::Label
                } else if p.at_set(Precedence::Prefix.operations()) {
                    let expression = p.mark();
                    p.parse_operation_reference();
                    Prefix::Operation(expression)
                } else {
                    Prefix::None
                }
            });

            match prefix {
                Prefix::Label => p.parse_labeled_expression(),
                Prefix::Operation(expression) => {
                    p.parse_prefix_expression();
                    expression.done(p, SyntaxKind::PrefixExpression);
                }
                Prefix::None => p.parse_postfix_expression(),
            }
        });
    }

    /// `label@` immediately followed by an expression.
    pub(crate) fn at_label_definition(&mut self) -> bool {
        self.at(T::Ident) && self.raw_lookup(1) == T::At
    }

    fn parse_labeled_expression(&mut self) {
        let expression = self.mark();
        self.parse_label_definition();
        self.parse_prefix_expression();
        expression.done(self, SyntaxKind::LabeledExpression);
    }

    /// `LABEL_QUALIFIER` for `name@`. The caller checked
    /// [`Parser::at_label_definition`].
    pub(crate) fn parse_label_definition(&mut self) {
        let qualifier = self.mark();
        let label = self.mark();
        self.advance_as(T::Ident);
        self.advance(); // @
        label.done(self, SyntaxKind::Label);
        qualifier.done(self, SyntaxKind::LabelQualifier);
    }

    /// `@name` right after a keyword: `return@outer`, `this@Foo`.
    pub(crate) fn parse_label_reference_with_no_whitespace(&mut self) {
        if !self.at(T::At) || self.newline_before() {
            return;
        }
        if self.raw_lookup(-1).is_trivia() {
            self.error("There should be no space or comments before '@' in label reference");
        }
        self.parse_label_reference();
    }

    fn parse_label_reference(&mut self) {
        if !Self::is_identifier_like(self.raw_lookup(1)) {
            self.error_and_advance("Label must be named");
            return;
        }
        let qualifier = self.mark();
        let label = self.mark();
        self.advance(); // @
        self.advance_as(T::Ident);
        label.done(self, SyntaxKind::Label);
        qualifier.done(self, SyntaxKind::LabelQualifier);
    }

    /// Statements up to `}` or end of input. On the top level of a
    /// script, statements on one line need no separator.
    pub(crate) fn parse_statements(&mut self, script_top_level: bool) {
        while self.consume_if(T::Semicolon) {}

        while !self.eof() && !self.at(T::RBrace) {
            let start = self.position();
            if !self.at_set(STATEMENT_FIRST) {
                self.error_and_advance("Expecting an element");
            }
            if self.at_set(STATEMENT_FIRST) {
                self.parse_statement(script_top_level);
            }

            if self.at(T::Semicolon) {
                while self.consume_if(T::Semicolon) {}
            } else if self.at(T::RBrace) {
                break;
            } else if !script_top_level && !self.newline_before() {
                if self.at_set(STATEMENT_NEW_LINE_QUICK_RECOVERY_SET) {
                    self.error(UNEXPECTED_ON_SAME_LINE);
                } else {
                    self.error_until(UNEXPECTED_ON_SAME_LINE, STATEMENT_SKIP_STOPPERS);
                }
            }

            if self.position() == start && !self.eof() && !self.at(T::RBrace) {
                self.error_and_advance("Expecting an element");
            }
        }
    }

    /// `declaration | blockLevelExpression`
    fn parse_statement(&mut self, script_top_level: bool) {
        if self.parse_local_declaration(false, script_top_level) {
            return;
        }
        if self.at_set(EXPRESSION_FIRST) {
            self.parse_block_level_expression();
        } else {
            self.error_and_advance("Expecting a statement");
        }
    }

    /// An expression in statement position. Annotations on a line of
    /// their own apply to the whole expression below them.
    pub(crate) fn parse_block_level_expression(&mut self) {
        if self.at(T::At) {
            let expression = self.mark();
            if !self.parse_annotations(AnnotationMode::EscapedOnly) || !self.newline_before() {
                expression.rollback(self);
                self.parse_expression();
                return;
            }
            self.parse_block_level_expression();
            expression.done(self, SyntaxKind::AnnotatedExpression);
            return;
        }
        self.parse_expression();
    }
}

enum Prefix {
    None,
    Label,
    Operation(Marker),
}

#[cfg(test)]
mod tests;
