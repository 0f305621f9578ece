//! Type parameters, `where` clauses and type aliases.

use kt_ir::{SyntaxKind, TokenKind as T, TokenSet};

use crate::annotation::AnnotationMode;
use crate::token_sets::{TOP_LEVEL_DECLARATION_FIRST, TYPE_PARAMETER_GT_RECOVERY_SET, TYPE_REF_FIRST};
use crate::Parser;

impl Parser<'_> {
    /// `"<" typeParameter ("," typeParameter)* ">"` when at `<`. Returns
    /// whether a list was parsed.
    pub(crate) fn parse_type_parameter_list(&mut self, recovery: TokenSet) -> bool {
        if !self.at(T::Lt) {
            return false;
        }

        let list = self.mark();
        self.without_newlines(|p| {
            p.advance(); // <

            loop {
                if p.at(T::Comma) {
                    p.error_and_advance("Expecting type parameter declaration");
                }
                p.parse_type_parameter();

                if !p.consume_if(T::Comma) || p.at(T::Gt) {
                    break;
                }
            }

            p.expect_or_recover(T::Gt, "Missing '>'", recovery);
        });
        list.done(self, SyntaxKind::TypeParameterList);
        true
    }

    /// `modifiers SimpleName (":" type)?`
    fn parse_type_parameter(&mut self) {
        if self.at_set(TYPE_PARAMETER_GT_RECOVERY_SET) {
            self.error("Type parameter declaration expected");
            return;
        }

        let parameter = self.mark();
        self.parse_modifier_list(
            AnnotationMode::UnescapedAllowed,
            TokenSet::of(&[T::Gt, T::Comma, T::Colon]),
        );
        self.expect_or_recover(T::Ident, "Type parameter name expected", TokenSet::EMPTY);

        if self.consume_if(T::Colon) {
            self.parse_type_ref();
        }
        parameter.done(self, SyntaxKind::TypeParameter);
    }

    /// A `where` clause, reported when there were no type parameters to
    /// constrain.
    pub(crate) fn parse_type_constraints_guarded(&mut self, type_parameters_declared: bool) {
        let error = self.mark();
        let constraints = self.parse_type_constraints();
        self.error_if(
            error,
            constraints && !type_parameters_declared,
            "Type constraints are not allowed when no type parameters declared",
        );
    }

    fn parse_type_constraints(&mut self) -> bool {
        if !self.at(T::KwWhere) {
            return false;
        }
        self.advance();

        let list = self.mark();
        loop {
            if self.at(T::Comma) {
                self.error_and_advance("Type constraint expected");
            }
            self.parse_type_constraint();
            if !self.consume_if(T::Comma) {
                break;
            }
        }
        list.done(self, SyntaxKind::TypeConstraintList);
        true
    }

    /// `annotations SimpleName ":" type`
    fn parse_type_constraint(&mut self) {
        let constraint = self.mark();
        self.parse_annotations(AnnotationMode::UnescapedAllowed);

        let reference = self.mark();
        let found = self.expect_or_recover(
            T::Ident,
            "Expecting type parameter name",
            TokenSet::of(&[T::Colon, T::Comma, T::LBrace, T::RBrace]).union(TYPE_REF_FIRST),
        );
        self.done_or_abandon(reference, SyntaxKind::ReferenceExpression, found);

        self.expect_or_recover(
            T::Colon,
            "Expecting ':' before the upper bound",
            TokenSet::of(&[T::LBrace, T::RBrace]).union(TYPE_REF_FIRST),
        );
        self.parse_type_ref();

        constraint.done(self, SyntaxKind::TypeConstraint);
    }

    /// `"typealias" SimpleName typeParameters? "=" type`
    pub(crate) fn parse_type_alias(&mut self) -> SyntaxKind {
        self.advance(); // typealias

        self.expect_or_recover(
            T::Ident,
            "Type name expected",
            TokenSet::of(&[T::Lt, T::Eq, T::Semicolon]).union(TOP_LEVEL_DECLARATION_FIRST),
        );

        self.parse_type_parameter_list(TYPE_PARAMETER_GT_RECOVERY_SET);

        if self.at(T::KwWhere) {
            let error = self.mark();
            self.parse_type_constraints();
            error.error(self, "Type alias parameters can't have bounds");
        }

        self.expect_or_recover(
            T::Eq,
            "Expecting '='",
            TOP_LEVEL_DECLARATION_FIRST.with(T::Semicolon),
        );
        self.parse_type_ref();
        self.consume_if(T::Semicolon);

        SyntaxKind::TypeAlias
    }
}

#[cfg(test)]
mod tests;
