//! Modifier lists and annotations.
//!
//! Grammar:
//!
//! ```text
//! modifierList    = (modifier | annotation | annotationList)+ .
//! annotation      = "@" (target ":")? userType typeArguments? valueArguments? .
//! annotationList  = "@" (target ":")? "[" unescapedAnnotation+ "]" .
//! target          = "file" | "field" | "get" | "set" | "property"
//!                 | "receiver" | "param" | "setparam" | "delegate" .
//! ```
//!
//! Where the [`AnnotationMode`] allows it, an annotation may also appear
//! without `@` when a declaration keyword, another modifier or another
//! annotation follows it (`Inject private val x`).

use kt_ir::{SyntaxKind, TokenKind as T, TokenSet};

use crate::annotation::AnnotationMode;
use crate::token_sets::{
    ANNOTATION_TARGETS, MEMBER_START_STOPPERS, MODIFIER_KEYWORDS,
    NO_MODIFIER_BEFORE_FOR_VALUE_PARAMETER, RESERVED_VALUE_PARAMETER_MODIFIER_KEYWORDS,
    TYPE_ARGUMENT_MODIFIER_KEYWORDS, TYPE_MODIFIER_KEYWORDS,
};
use crate::Parser;

/// Tokens after which a bare identifier in modifier position reads as an
/// annotation.
const SHORT_ANNOTATION_FOLLOW: TokenSet = TokenSet::of(&[
    T::At,
    T::Ident,
    T::KwClass,
    T::KwInterface,
    T::KwFun,
    T::KwVal,
    T::KwVar,
    T::KwObject,
    T::KwTypeAlias,
]);

/// What a modifier list held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Modifiers {
    /// At least one modifier or annotation was parsed.
    pub(crate) parsed: bool,
    pub(crate) has_enum: bool,
    pub(crate) has_companion: bool,
}

impl Parser<'_> {
    /// `(modifier | annotation)*`, wrapped in `MODIFIER_LIST` when not empty.
    ///
    /// A modifier keyword followed by a token in `no_modifiers_before` is
    /// left alone: in `fun foo(open: Int)` the `open` is a name.
    pub(crate) fn parse_modifier_list(
        &mut self,
        mode: AnnotationMode,
        no_modifiers_before: TokenSet,
    ) -> Modifiers {
        self.parse_modifiers(MODIFIER_KEYWORDS, mode, no_modifiers_before, false)
    }

    /// `vararg` and friends on a function type parameter. No annotations.
    pub(crate) fn parse_function_type_parameter_modifier_list(&mut self) -> bool {
        self.parse_modifiers(
            RESERVED_VALUE_PARAMETER_MODIFIER_KEYWORDS,
            AnnotationMode::NoAnnotations,
            NO_MODIFIER_BEFORE_FOR_VALUE_PARAMETER,
            false,
        )
        .parsed
    }

    /// `suspend` and annotations in front of a type.
    pub(crate) fn parse_type_modifier_list(&mut self) -> bool {
        self.parse_modifiers(
            TYPE_MODIFIER_KEYWORDS,
            AnnotationMode::EscapedOnly,
            TokenSet::EMPTY,
            true,
        )
        .parsed
    }

    /// Variance on a type argument: `in`, `out`.
    pub(crate) fn parse_type_argument_modifier_list(&mut self) -> bool {
        self.parse_modifiers(
            TYPE_ARGUMENT_MODIFIER_KEYWORDS,
            AnnotationMode::NoAnnotations,
            TokenSet::of(&[T::Comma, T::Colon, T::Gt]),
            false,
        )
        .parsed
    }

    /// `in_type`: inside a type, `@A (B) -> C` annotates a function type,
    /// so a space before `(` ends the annotation.
    fn parse_modifiers(
        &mut self,
        keywords: TokenSet,
        mode: AnnotationMode,
        no_modifiers_before: TokenSet,
        in_type: bool,
    ) -> Modifiers {
        let list = self.mark();
        let mut result = Modifiers::default();

        while !self.eof() {
            if mode.stops_at_member_start() && self.at_member_start_keyword() {
                break;
            }
            if self.current() == T::At && mode.allows_annotations() {
                if !self.parse_annotation_or_list(mode, in_type) {
                    break;
                }
            } else if let Some(modifier) = self.try_parse_modifier(keywords, no_modifiers_before) {
                result.has_enum |= modifier == T::KwEnum;
                result.has_companion |= modifier == T::KwCompanion;
            } else if mode.allows_short() && self.at_short_annotation() {
                self.parse_annotation(mode, in_type);
            } else {
                break;
            }
            result.parsed = true;
        }

        self.done_or_abandon(list, SyntaxKind::ModifierList, result.parsed);
        result
    }

    fn try_parse_modifier(&mut self, keywords: TokenSet, no_modifiers_before: TokenSet) -> Option<T> {
        let marker = self.mark();
        if self.at_set(keywords) {
            let modifier = self.current();
            let next = self.nth(1);
            // `fun` is only a modifier in `fun interface`
            let fun_not_modifier = modifier == T::KwFun && next != T::KwInterface;
            if !fun_not_modifier && next != T::Eof && !no_modifiers_before.contains(next) {
                self.advance();
                marker.abandon(self);
                return Some(modifier);
            }
        }
        marker.rollback(self);
        None
    }

    /// Whether the current identifier spells a soft keyword that starts a
    /// member. Leaves the token as it is.
    fn at_member_start_keyword(&self) -> bool {
        let current = self.current();
        if current == T::Ident {
            T::soft_keyword(self.current_text()).is_some_and(|kw| MEMBER_START_STOPPERS.contains(kw))
        } else {
            MEMBER_START_STOPPERS.contains(current)
        }
    }

    fn at_short_annotation(&self) -> bool {
        self.current() == T::Ident && SHORT_ANNOTATION_FOLLOW.contains(self.nth(1))
    }

    /// `FILE_ANNOTATION_LIST`, if any file annotations are here.
    pub(crate) fn parse_file_annotation_list(&mut self, mode: AnnotationMode) {
        debug_assert!(mode.is_file(), "file annotation list in {mode:?}");
        let list = self.mark();
        let parsed = self.parse_annotations(mode);
        self.done_or_abandon(list, SyntaxKind::FileAnnotationList, parsed);
    }

    /// `(annotation | annotationList)*`. Returns whether any was parsed.
    pub(crate) fn parse_annotations(&mut self, mode: AnnotationMode) -> bool {
        if !self.parse_annotation_or_list(mode, false) {
            return false;
        }
        while self.parse_annotation_or_list(mode, false) {}
        true
    }

    /// One `@`-annotation or annotation list. Returns false when there is
    /// no `@` here, or when `mode` rejects the annotation; nothing is
    /// consumed then.
    fn parse_annotation_or_list(&mut self, mode: AnnotationMode, in_type: bool) -> bool {
        if !self.at(T::At) {
            return false;
        }

        let next_raw = self.raw_lookup(1);
        let mut token_to_match = next_raw;
        let mut targeted = false;
        if (Self::is_identifier_like(next_raw) || ANNOTATION_TARGETS.contains(next_raw))
            && self.nth(2) == T::Colon
        {
            token_to_match = self.nth(3);
            targeted = true;
        } else if self.nth(1) == T::Colon {
            // `@:Ann`
            token_to_match = self.nth(2);
            targeted = true;
        }

        if Self::is_identifier_like(token_to_match) {
            return self.parse_annotation(mode, in_type);
        }
        if token_to_match == T::LBracket {
            return self.parse_annotation_list(mode);
        }

        if !targeted {
            self.error_and_advance("Expected annotation identifier after '@'");
        } else if self.nth(1) == T::Colon {
            self.error_and_advance_by("Expected annotation identifier after ':'", 2);
        } else {
            self.error_and_advance_by("Expected annotation identifier after ':'", 3);
        }
        true
    }

    /// `"@" (target ":")? "[" unescapedAnnotation+ "]"`
    fn parse_annotation_list(&mut self, mode: AnnotationMode) -> bool {
        let annotation = self.mark();
        self.without_newlines(|p| {
            p.advance(); // @

            if !p.parse_annotation_target_if_needed(mode) {
                annotation.rollback(p);
                return false;
            }

            p.advance(); // [

            if !p.at(T::Ident) && !p.at(T::At) {
                p.error("Expecting a list of annotations");
            } else {
                while p.at(T::Ident) || p.at(T::At) {
                    if p.at(T::At) {
                        p.error_and_advance("No '@' needed in annotation list");
                        continue;
                    }
                    p.parse_annotation(AnnotationMode::UnescapedAllowed, false);
                    while p.at(T::Comma) {
                        p.error_and_advance("No commas needed to separate annotations");
                    }
                }
            }

            p.expect(T::RBracket, "Expecting ']' to close the annotation list");
            annotation.done(p, SyntaxKind::Annotation);
            true
        })
    }

    /// Parse `target:` after `@` when present. Returns false when `mode`
    /// does not accept this annotation at all.
    fn parse_annotation_target_if_needed(&mut self, mode: AnnotationMode) -> bool {
        const TARGET_BEFORE_COLON: &str = "Expected annotation target before ':'";

        if self.at(T::Colon) {
            self.error_and_advance(TARGET_BEFORE_COLON);
            return true;
        }

        let target = ANNOTATION_TARGETS.iter().find(|&kw| self.at(kw));

        if mode == AnnotationMode::FileAnnotationsPackageOmitted
            && !(target == Some(T::KwFile) && self.nth(1) == T::Colon)
        {
            return false;
        }

        if self.nth(1) == T::Colon && target.is_none() && self.at(T::Ident) {
            // `@fil:Ann`
            self.error_and_advance(TARGET_BEFORE_COLON);
            self.advance(); // :
            return true;
        }

        if target == Some(T::KwFile) && !mode.is_file() && self.nth(1) == T::Colon {
            self.error_and_advance_by("File annotations are only allowed before package declaration", 2);
            return true;
        }

        match target {
            Some(target) => self.parse_annotation_target(target),
            None if mode.is_file() => self.parse_annotation_target(T::KwFile),
            None => {}
        }
        true
    }

    fn parse_annotation_target(&mut self, keyword: T) {
        let spelling = keyword.text().unwrap_or_default();
        let message = format!("Expecting \"{spelling}:\" prefix for {spelling} annotations");

        let marker = self.mark();
        if self.expect(keyword, &message) {
            marker.done(self, SyntaxKind::AnnotationTarget);
        } else {
            marker.abandon(self);
        }

        self.expect_or_recover(
            T::Colon,
            &message,
            TokenSet::of(&[T::Ident, T::RBracket, T::LBracket]),
        );
    }

    /// `"@"? (target ":")? userType typeArguments? valueArguments?`
    fn parse_annotation(&mut self, mode: AnnotationMode, in_type: bool) -> bool {
        let annotation = self.mark();

        if self.at(T::At) {
            self.advance();
            if !self.parse_annotation_target_if_needed(mode) {
                annotation.rollback(self);
                return false;
            }
        }

        let callee = self.mark();
        let type_ref = self.mark();
        self.parse_user_type();
        type_ref.done(self, SyntaxKind::TypeReference);
        callee.done(self, SyntaxKind::ConstructorCallee);

        self.parse_type_argument_list();

        let space_before_arguments = in_type && self.raw_lookup(-1).is_trivia();
        if self.at(T::LParen) && !space_before_arguments {
            self.parse_value_argument_list();
        }

        annotation.done(self, SyntaxKind::AnnotationEntry);
        true
    }
}
