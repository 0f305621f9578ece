//! Lambdas and their parameter lists.
//!
//! `{ a -> ... }`, `{ a, b -> ... }` and `{ a }` all start the same way,
//! so parameters are parsed speculatively. A `,` between parameters or a
//! `:` type annotation commits to the parameter reading even without the
//! arrow; otherwise the parameters stand only if `->` follows them, and
//! the tokens are reread as the body.

use kt_ir::{SyntaxKind, TokenKind as T, TokenSet};
use tracing::debug;

use crate::annotation::AnnotationMode;
use crate::marker::CommentBinding;
use crate::token_sets::LAMBDA_DESTRUCTURING_FOLLOW;
use crate::Parser;

impl Parser<'_> {
    /// `annotations label? lambda`. With `prefer_block`, a `{` without
    /// parameters becomes a plain `BLOCK`. Returns false, consuming
    /// nothing, when no lambda starts here.
    pub(super) fn parse_annotated_lambda(&mut self, prefer_block: bool) -> bool {
        let annotated = self.mark();
        let were_annotations = self.parse_annotations(AnnotationMode::EscapedOnly);

        let labeled = self.mark();
        let was_label = self.at_label_definition();
        if was_label {
            self.parse_label_definition();
        }

        if !self.at(T::LBrace) {
            labeled.abandon(self);
            annotated.rollback(self);
            return false;
        }

        self.parse_function_literal(prefer_block);

        self.done_or_abandon(labeled, SyntaxKind::LabeledExpression, was_label);
        self.done_or_abandon(annotated, SyntaxKind::AnnotatedExpression, were_annotations);
        true
    }

    /// `"{" (parameters "->")? statements "}"`
    pub(super) fn parse_function_literal(&mut self, prefer_block: bool) {
        let expression = self.mark();
        let literal = self.mark();

        self.with_newlines(|p| {
            p.advance(); // {

            let parameters_found = match p.current() {
                T::Arrow => {
                    // `{ -> ... }`
                    let list = p.mark();
                    list.done(p, SyntaxKind::ValueParameterList);
                    p.advance(); // ->
                    true
                }
                T::Ident | T::Colon | T::LParen => p.parse_lambda_parameters_speculatively(),
                kind if kind.is_soft_keyword() => p.parse_lambda_parameters_speculatively(),
                _ => false,
            };

            if !parameters_found && prefer_block {
                literal.abandon(p);
                p.parse_statements(false);
                p.expect(T::RBrace, "Expecting '}'");
                expression.done(p, SyntaxKind::Block);
                return;
            }

            let body = p.mark();
            p.parse_statements(false);
            body.done_with_binding(p, SyntaxKind::Block, CommentBinding::All);
            p.expect(T::RBrace, "Expecting '}'");

            literal.done(p, SyntaxKind::FunctionLiteral);
            expression.done(p, SyntaxKind::LambdaExpression);
        });
    }

    /// Parameters and `->`, or nothing at all if they do not stand.
    fn parse_lambda_parameters_speculatively(&mut self) -> bool {
        let parameters = self.mark();
        let committed = self.parse_function_literal_parameter_list();

        if self.consume_if(T::Arrow) {
            parameters.abandon(self);
            return true;
        }
        if committed {
            self.error("Expecting '->'");
            parameters.abandon(self);
            return true;
        }

        debug!(pos = self.position(), "lambda has no parameters");
        parameters.rollback(self);
        false
    }

    /// `VALUE_PARAMETER_LIST` up to `->`. Returns whether a `,` between
    /// parameters or a `:` after one was seen.
    fn parse_function_literal_parameter_list(&mut self) -> bool {
        let list = self.mark();
        let mut committed = false;

        while !self.eof() && !self.at(T::Arrow) {
            let parameter = self.mark();

            if self.at(T::Colon) {
                self.error("Expecting parameter name");
            } else if self.at(T::LParen) {
                let destructuring = self.mark();
                self.parse_multi_declaration_name(LAMBDA_DESTRUCTURING_FOLLOW);
                destructuring.done(self, SyntaxKind::DestructuringDeclaration);
            } else {
                self.expect_or_recover(T::Ident, "Expecting parameter name", TokenSet::of(&[T::Arrow]));
            }

            if self.consume_if(T::Colon) {
                committed = true;
                self.parse_type_ref_with_recovery(TokenSet::of(&[T::Arrow, T::Comma]));
            }
            parameter.done(self, SyntaxKind::ValueParameter);

            if self.at(T::Arrow) {
                break;
            }
            if !self.consume_if(T::Comma) {
                self.error("Expecting '->' or ','");
                break;
            }
            committed = true;
        }

        list.done(self, SyntaxKind::ValueParameterList);
        committed
    }
}
