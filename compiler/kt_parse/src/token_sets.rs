//! First, follow and recovery sets shared by the grammar modules.

use kt_ir::{TokenKind as T, TokenSet};

const fn keywords(hard: bool) -> TokenSet {
    let mut set = TokenSet::EMPTY;
    let mut i = 0;
    while i < T::ALL.len() {
        let kind = T::ALL[i];
        if (hard && kind.is_hard_keyword()) || (!hard && kind.is_soft_keyword()) {
            set = set.with(kind);
        }
        i += 1;
    }
    set
}

pub(crate) const HARD_KEYWORDS: TokenSet = keywords(true);

// === Declarations ===

pub(crate) const TOP_LEVEL_DECLARATION_FIRST: TokenSet = TokenSet::of(&[
    T::KwTypeAlias,
    T::KwInterface,
    T::KwClass,
    T::KwObject,
    T::KwFun,
    T::KwVal,
    T::KwPackage,
]);

pub(crate) const DECLARATION_FIRST: TokenSet = TOP_LEVEL_DECLARATION_FIRST.union(TokenSet::of(&[
    T::KwInit,
    T::KwGet,
    T::KwSet,
    T::KwConstructor,
]));

pub(crate) const CLASS_NAME_RECOVERY_SET: TokenSet =
    TokenSet::of(&[T::Lt, T::LParen, T::Colon, T::LBrace]).union(TOP_LEVEL_DECLARATION_FIRST);

pub(crate) const TYPE_PARAMETER_GT_RECOVERY_SET: TokenSet =
    TokenSet::of(&[T::KwWhere, T::LParen, T::Colon, T::LBrace, T::Gt]);

pub(crate) const PARAMETER_NAME_RECOVERY_SET: TokenSet = TokenSet::of(&[
    T::Colon,
    T::Eq,
    T::Comma,
    T::RParen,
    T::KwVal,
    T::KwVar,
]);

pub(crate) const PACKAGE_NAME_RECOVERY_SET: TokenSet = TokenSet::of(&[T::Dot, T::EolOrSemicolon]);

pub(crate) const IMPORT_RECOVERY_SET: TokenSet =
    TokenSet::of(&[T::KwAs, T::Dot, T::EolOrSemicolon]);

pub(crate) const TYPE_REF_FIRST: TokenSet =
    TokenSet::of(&[T::LBracket, T::Ident, T::LParen, T::Hash, T::KwDynamic]);

pub(crate) const RECEIVER_TYPE_TERMINATORS: TokenSet = TokenSet::of(&[T::Dot, T::SafeAccess]);

pub(crate) const MODIFIER_KEYWORDS: TokenSet = TokenSet::of(&[
    T::KwAbstract,
    T::KwEnum,
    T::KwOpen,
    T::KwInner,
    T::KwOverride,
    T::KwPrivate,
    T::KwPublic,
    T::KwInternal,
    T::KwProtected,
    T::KwOut,
    T::KwIn,
    T::KwFinal,
    T::KwVararg,
    T::KwReified,
    T::KwCompanion,
    T::KwSealed,
    T::KwLateinit,
    T::KwData,
    T::KwInline,
    T::KwNoinline,
    T::KwTailrec,
    T::KwExternal,
    T::KwAnnotation,
    T::KwCrossinline,
    T::KwConst,
    T::KwOperator,
    T::KwInfix,
    T::KwSuspend,
    T::KwExpect,
    T::KwActual,
    T::KwFun,
    T::KwValue,
]);

pub(crate) const TYPE_MODIFIER_KEYWORDS: TokenSet = TokenSet::of(&[T::KwSuspend]);
pub(crate) const TYPE_ARGUMENT_MODIFIER_KEYWORDS: TokenSet = TokenSet::of(&[T::KwIn, T::KwOut]);
pub(crate) const RESERVED_VALUE_PARAMETER_MODIFIER_KEYWORDS: TokenSet =
    TokenSet::of(&[T::KwOut, T::KwVararg]);

pub(crate) const NO_MODIFIER_BEFORE_FOR_VALUE_PARAMETER: TokenSet =
    TokenSet::of(&[T::Comma, T::Colon, T::Eq, T::RParen]);

pub(crate) const VALUE_PARAMETER_FIRST: TokenSet =
    TokenSet::of(&[T::Ident, T::LBracket, T::KwVal, T::KwVar])
        .union(MODIFIER_KEYWORDS.subtract(TokenSet::of(&[T::KwFun])));

pub(crate) const LAMBDA_VALUE_PARAMETER_FIRST: TokenSet = TokenSet::of(&[T::Ident, T::LBracket])
    .union(MODIFIER_KEYWORDS.subtract(TokenSet::of(&[T::KwFun])));

pub(crate) const SOFT_KEYWORDS_AT_MEMBER_START: TokenSet =
    TokenSet::of(&[T::KwConstructor, T::KwInit]);

/// Soft keywords that end a modifier list at the start of a member.
pub(crate) const MEMBER_START_STOPPERS: TokenSet =
    TokenSet::of(&[T::KwConstructor, T::KwInit, T::KwGet, T::KwSet]);

pub(crate) const ANNOTATION_TARGETS: TokenSet = TokenSet::of(&[
    T::KwFile,
    T::KwField,
    T::KwGet,
    T::KwSet,
    T::KwProperty,
    T::KwReceiver,
    T::KwParam,
    T::KwSetparam,
    T::KwDelegate,
]);

/// Where a missing type reference stops looking.
pub(crate) const TYPE_RECOVERY_SET: TokenSet = TOP_LEVEL_DECLARATION_FIRST.union(TokenSet::of(&[
    T::Eq,
    T::Comma,
    T::Gt,
    T::RBracket,
    T::Dot,
    T::RParen,
    T::RBrace,
    T::LBrace,
    T::Semicolon,
]));

/// Tokens after which a property receiver can no longer continue.
pub(crate) const PROPERTY_NAME_FOLLOW: TokenSet = TokenSet::of(&[
    T::Colon,
    T::Eq,
    T::LBrace,
    T::RBrace,
    T::Semicolon,
    T::KwVal,
    T::KwVar,
    T::KwFun,
    T::KwClass,
]);

pub(crate) const FUNCTION_NAME_FOLLOW: TokenSet =
    TokenSet::of(&[T::Lt, T::LParen, T::RParen, T::Colon, T::Eq]);

// === Expressions ===

pub(crate) const EXPRESSION_FIRST: TokenSet = TokenSet::of(&[
    // prefix
    T::Minus,
    T::Plus,
    T::MinusMinus,
    T::PlusPlus,
    T::Bang,
    T::BangBang,
    // callable reference
    T::ColonColon,
    T::LParen,
    // literals
    T::KwTrue,
    T::KwFalse,
    T::OpenQuote,
    T::Int,
    T::Char,
    T::Float,
    T::KwNull,
    // lambda, anonymous function
    T::LBrace,
    T::KwFun,
    T::KwThis,
    T::KwSuper,
    T::KwIf,
    T::KwWhen,
    T::KwTry,
    T::KwObject,
    // jumps
    T::KwThrow,
    T::KwReturn,
    T::KwContinue,
    T::KwBreak,
    // loops
    T::KwFor,
    T::KwWhile,
    T::KwDo,
    T::Ident,
    T::At,
]);

pub(crate) const STATEMENT_FIRST: TokenSet = EXPRESSION_FIRST
    .union(TokenSet::of(&[
        T::KwFun,
        T::KwVal,
        T::KwVar,
        T::KwInterface,
        T::KwClass,
        T::KwTypeAlias,
    ]))
    .union(MODIFIER_KEYWORDS);

/// After a statement that did not end its line, these start the next one
/// without swallowing anything into an error.
pub(crate) const STATEMENT_NEW_LINE_QUICK_RECOVERY_SET: TokenSet = STATEMENT_FIRST
    .intersection(HARD_KEYWORDS.subtract(TokenSet::of(&[T::KwIn])))
    .with(T::EolOrSemicolon);

pub(crate) const EXPRESSION_FOLLOW: TokenSet = TokenSet::of(&[
    T::EolOrSemicolon,
    T::Arrow,
    T::Comma,
    T::RBrace,
    T::RParen,
    T::RBracket,
]);

pub(crate) const WHEN_CONDITION_RECOVERY_SET: TokenSet = TokenSet::of(&[
    T::RBrace,
    T::KwIn,
    T::KwNotIn,
    T::KwIs,
    T::KwNotIs,
    T::KwElse,
]);

pub(crate) const WHEN_CONDITION_RECOVERY_SET_WITH_ARROW: TokenSet =
    WHEN_CONDITION_RECOVERY_SET.union(TokenSet::of(&[T::Arrow, T::Dot]));

pub(crate) const LAMBDA_DESTRUCTURING_FOLLOW: TokenSet =
    TokenSet::of(&[T::Arrow, T::Comma, T::Colon]);

/// Tokens that cannot appear inside a type argument list, so seeing one
/// before `>` means `<` was a comparison.
pub(crate) const TYPE_ARGUMENT_LIST_STOPPERS: TokenSet = TokenSet::of(&[
    T::Int,
    T::Float,
    T::Char,
    T::OpenQuote,
    T::KwPackage,
    T::KwAs,
    T::KwTypeAlias,
    T::KwInterface,
    T::KwClass,
    T::KwThis,
    T::KwVal,
    T::KwVar,
    T::KwFun,
    T::KwFor,
    T::KwNull,
    T::KwTrue,
    T::KwFalse,
    T::KwIs,
    T::KwThrow,
    T::KwReturn,
    T::KwBreak,
    T::KwContinue,
    T::KwObject,
    T::KwIf,
    T::KwTry,
    T::KwElse,
    T::KwWhile,
    T::KwDo,
    T::KwWhen,
    T::RBracket,
    T::RBrace,
    T::RParen,
    T::PlusPlus,
    T::MinusMinus,
    T::BangBang,
    T::Plus,
    T::Minus,
    T::Bang,
    T::Slash,
    T::Percent,
    T::LtEq,
    T::EqEqEq,
    T::NotEqEq,
    T::EqEq,
    T::NotEq,
    T::AmpAmp,
    T::PipePipe,
    T::SafeAccess,
    T::Elvis,
    T::Semicolon,
    T::DotDot,
    T::Eq,
    T::StarEq,
    T::SlashEq,
    T::PercentEq,
    T::PlusEq,
    T::MinusEq,
    T::KwNotIn,
    T::KwNotIs,
    T::ColonColon,
    T::Colon,
]);

/// Binary operators that may start a line and still continue the
/// expression on the line before.
pub(crate) const ALLOW_NEWLINE_OPERATIONS: TokenSet = TokenSet::of(&[
    T::Dot,
    T::SafeAccess,
    T::Colon,
    T::KwAs,
    T::KwAsSafe,
    T::Elvis,
    T::AmpAmp,
    T::PipePipe,
]);

/// Every binary and postfix operator token, identifiers included for
/// infix calls.
pub(crate) const BINARY_AND_POSTFIX_OPERATIONS: TokenSet = TokenSet::of(&[
    T::PlusPlus,
    T::MinusMinus,
    T::BangBang,
    T::Dot,
    T::SafeAccess,
    T::KwAs,
    T::KwAsSafe,
    T::Star,
    T::Slash,
    T::Percent,
    T::Plus,
    T::Minus,
    T::DotDot,
    T::Ident,
    T::Elvis,
    T::KwIn,
    T::KwNotIn,
    T::KwIs,
    T::KwNotIs,
    T::Lt,
    T::Gt,
    T::LtEq,
    T::GtEq,
    T::EqEq,
    T::NotEq,
    T::EqEqEq,
    T::NotEqEq,
    T::AmpAmp,
    T::PipePipe,
    T::Eq,
    T::PlusEq,
    T::MinusEq,
    T::StarEq,
    T::SlashEq,
    T::PercentEq,
]);

#[cfg(test)]
mod tests {
    use super::*;

    const SOFT_KEYWORDS: TokenSet = keywords(false);

    #[test]
    fn keyword_classes_are_disjoint() {
        assert!(HARD_KEYWORDS.is_disjoint(&SOFT_KEYWORDS));
        assert!(HARD_KEYWORDS.contains(T::KwWhen));
        assert!(SOFT_KEYWORDS.contains(T::KwWhere));
        assert!(!SOFT_KEYWORDS.contains(T::Ident));
    }

    #[test]
    fn soft_keyword_spellings_round_trip() {
        for kind in SOFT_KEYWORDS.iter() {
            let text = kind.text();
            assert!(text.is_some(), "{kind:?} has no spelling");
            assert_eq!(text.and_then(T::soft_keyword), Some(kind));
            assert_eq!(text.and_then(T::hard_keyword), None);
        }
    }

    #[test]
    fn statement_recovery_keeps_terminator_and_drops_in() {
        assert!(STATEMENT_NEW_LINE_QUICK_RECOVERY_SET.contains(T::EolOrSemicolon));
        assert!(STATEMENT_NEW_LINE_QUICK_RECOVERY_SET.contains(T::KwVal));
        assert!(!STATEMENT_NEW_LINE_QUICK_RECOVERY_SET.contains(T::KwIn));
        assert!(!STATEMENT_NEW_LINE_QUICK_RECOVERY_SET.contains(T::Ident));
    }

    #[test]
    fn braces_never_stop_type_arguments_silently() {
        assert!(!TYPE_ARGUMENT_LIST_STOPPERS.contains(T::Gt));
        assert!(!TYPE_ARGUMENT_LIST_STOPPERS.contains(T::Star));
        assert!(TYPE_ARGUMENT_LIST_STOPPERS.contains(T::RBrace));
    }

    #[test]
    fn value_parameters_never_start_with_fun() {
        assert!(!VALUE_PARAMETER_FIRST.contains(T::KwFun));
        assert!(VALUE_PARAMETER_FIRST.contains(T::KwVararg));
        assert!(!LAMBDA_VALUE_PARAMETER_FIRST.contains(T::KwVal));
    }
}
