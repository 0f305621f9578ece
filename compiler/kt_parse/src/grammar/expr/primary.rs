//! Atomic expressions: literals, names, `this`/`super`, parentheses,
//! object literals, string templates, and the dispatch to control
//! structures and lambdas.

use kt_ir::{SyntaxKind, TokenKind as T, TokenSet};

use crate::grammar::item::Classifier;
use crate::grammar::{DeclarationMode, NameMode};
use crate::token_sets::EXPRESSION_FOLLOW;
use crate::Parser;

const ATOMIC_RECOVERY_SET: TokenSet = EXPRESSION_FOLLOW.with(T::LongTemplateEntryEnd);

impl Parser<'_> {
    /// One atomic expression. Returns false when nothing usable was here;
    /// an error has been reported then.
    pub(super) fn parse_atomic_expression(&mut self) -> bool {
        match self.current() {
            T::LParen => self.parse_parenthesized_expression(),
            T::KwThis => self.parse_this_expression(),
            T::KwSuper => self.parse_super_expression(),
            T::KwObject => self.parse_object_literal(),
            T::KwThrow => self.parse_throw(),
            T::KwReturn => self.parse_return(),
            T::KwContinue => self.parse_jump(SyntaxKind::Continue),
            T::KwBreak => self.parse_jump(SyntaxKind::Break),
            T::KwIf => self.parse_if(),
            T::KwWhen => self.parse_when(),
            T::KwTry => self.parse_try(),
            T::KwFor => self.parse_for(),
            T::KwWhile => self.parse_while(),
            T::KwDo => self.parse_do_while(),
            T::LBrace => self.parse_function_literal(false),
            T::OpenQuote => self.parse_string_template(),
            T::Int => self.parse_constant(SyntaxKind::IntegerConstant),
            T::Float => self.parse_constant(SyntaxKind::FloatConstant),
            T::Char => self.parse_constant(SyntaxKind::CharacterConstant),
            T::KwTrue | T::KwFalse => self.parse_constant(SyntaxKind::BooleanConstant),
            T::KwNull => self.parse_constant(SyntaxKind::Null),
            kind if Self::is_identifier_like(kind) => self.parse_simple_name_expression(),
            T::KwClass | T::KwInterface | T::KwFun | T::KwVal | T::KwVar | T::KwTypeAlias => {
                let rollback = self.newline_before();
                if !self.parse_local_declaration(rollback, false) {
                    self.error_with_recovery("Expecting an element", Some(ATOMIC_RECOVERY_SET));
                    return false;
                }
            }
            _ => {
                self.error_with_recovery("Expecting an element", Some(ATOMIC_RECOVERY_SET));
                return false;
            }
        }
        true
    }

    fn parse_constant(&mut self, kind: SyntaxKind) {
        let constant = self.mark();
        self.advance();
        constant.done(self, kind);
    }

    /// `REFERENCE_EXPRESSION` around an identifier.
    pub(crate) fn parse_simple_name_expression(&mut self) {
        let reference = self.mark();
        self.expect(T::Ident, "Expecting an identifier");
        reference.done(self, SyntaxKind::ReferenceExpression);
    }

    /// `"(" expression ")"`. A comma inside is not a tuple; the list is
    /// reported as unclosed at the comma.
    fn parse_parenthesized_expression(&mut self) {
        let parenthesized = self.mark();
        self.without_newlines(|p| {
            p.advance(); // (
            if p.at(T::RParen) {
                p.error("Expecting an expression");
            } else {
                p.parse_expression();
            }
            p.expect(T::RParen, "Expecting ')'");
        });
        parenthesized.done(self, SyntaxKind::Parenthesized);
    }

    /// `"this" label?`
    fn parse_this_expression(&mut self) {
        let this = self.mark();
        let reference = self.mark();
        self.advance(); // this
        reference.done(self, SyntaxKind::ReferenceExpression);
        self.parse_label_reference_with_no_whitespace();
        this.done(self, SyntaxKind::ThisExpression);
    }

    /// `"super" ("<" type ">")? label?`
    fn parse_super_expression(&mut self) {
        let sup = self.mark();
        let reference = self.mark();
        self.advance(); // super
        reference.done(self, SyntaxKind::ReferenceExpression);

        if self.at(T::Lt) {
            // `super<Foo>` or `super < foo`
            let supertype = self.mark();
            let closed = self.without_newlines(|p| {
                p.advance(); // <
                p.parse_type_ref();
                p.consume_if(T::Gt)
            });
            if closed {
                supertype.abandon(self);
            } else {
                supertype.rollback(self);
            }
        }
        self.parse_label_reference_with_no_whitespace();
        sup.done(self, SyntaxKind::SuperExpression);
    }

    /// `"object" (":" supertypes)? classBody`
    fn parse_object_literal(&mut self) {
        let literal = self.mark();
        let declaration = self.mark();
        self.parse_class_or_object(Classifier::Object, NameMode::Prohibited, true, DeclarationMode::Local);
        declaration.done(self, SyntaxKind::ObjectDeclaration);
        literal.done(self, SyntaxKind::ObjectLiteral);
    }

    /// `STRING_TEMPLATE`: open quote, entries, closing quote.
    fn parse_string_template(&mut self) {
        let template = self.mark();
        self.advance(); // "

        while !self.eof() && !self.at(T::ClosingQuote) && !self.at(T::DanglingNewline) {
            self.parse_string_template_element();
        }

        if self.at(T::DanglingNewline) {
            self.error_and_advance("Unterminated string template: line break before the closing quote");
        } else if self.eof() {
            self.error("Unterminated string template: end of file before the closing quote");
        } else {
            self.advance(); // "
        }
        template.done(self, SyntaxKind::StringTemplate);
    }

    fn parse_string_template_element(&mut self) {
        match self.current() {
            T::RegularStringPart => {
                let entry = self.mark();
                self.advance();
                entry.done(self, SyntaxKind::LiteralStringTemplateEntry);
            }
            T::EscapeSequence => {
                let entry = self.mark();
                self.advance();
                entry.done(self, SyntaxKind::EscapeStringTemplateEntry);
            }
            T::ShortTemplateEntryStart => {
                let entry = self.mark();
                self.advance(); // $
                if self.current() == T::KwThis {
                    self.parse_this_expression();
                } else if self.current().is_hard_keyword() {
                    self.error_and_advance("Keyword cannot be used as a reference");
                } else {
                    self.parse_simple_name_expression();
                }
                entry.done(self, SyntaxKind::ShortStringTemplateEntry);
            }
            T::LongTemplateEntryStart => self.parse_long_template_entry(),
            _ => self.error_and_advance("Unexpected token in a string template"),
        }
    }

    /// `"${" expression "}"`
    fn parse_long_template_entry(&mut self) {
        let entry = self.mark();
        self.advance(); // ${

        while !self.eof() {
            let start = self.position();
            self.parse_expression();
            if self.consume_if(T::LongTemplateEntryEnd) {
                break;
            }
            self.error("Expecting '}'");
            if self.at(T::ClosingQuote) || self.at(T::DanglingNewline) {
                break;
            }
            if self.position() == start {
                self.advance();
            }
        }

        entry.done(self, SyntaxKind::LongStringTemplateEntry);
    }
}
