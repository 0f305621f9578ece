//! Operator precedence table for binary expressions.
//!
//! Tiers are ordered from tightest to loosest binding. Each binary tier
//! parses its operands with the tier right above it; `as` bottoms out at
//! prefix expressions. `Postfix` and `Prefix` are listed for completeness:
//! their operators are handled by the postfix loop and the prefix parser,
//! never by [`Precedence::operations`] in the binary loop.

use kt_ir::{SyntaxKind, TokenKind as T, TokenSet};

use crate::token_sets::BINARY_AND_POSTFIX_OPERATIONS;

/// One precedence tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Postfix,
    Prefix,
    As,
    Multiplicative,
    Additive,
    Range,
    /// Infix function calls: `a shl b`.
    SimpleName,
    Elvis,
    InOrIs,
    Comparison,
    Equality,
    Conjunction,
    Disjunction,
    Assignment,
}

/// What a tier parses between its operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Operand {
    Prefix,
    Tier(Precedence),
}

impl Precedence {
    /// Every tier, tightest first.
    pub const ALL: [Precedence; 14] = [
        Self::Postfix,
        Self::Prefix,
        Self::As,
        Self::Multiplicative,
        Self::Additive,
        Self::Range,
        Self::SimpleName,
        Self::Elvis,
        Self::InOrIs,
        Self::Comparison,
        Self::Equality,
        Self::Conjunction,
        Self::Disjunction,
        Self::Assignment,
    ];

    /// The loosest tier, where a full expression starts.
    pub const LOWEST: Precedence = Self::Assignment;

    /// Operator tokens of this tier.
    pub const fn operations(self) -> TokenSet {
        match self {
            Self::Postfix => TokenSet::of(&[T::PlusPlus, T::MinusMinus, T::BangBang, T::Dot, T::SafeAccess]),
            Self::Prefix => TokenSet::of(&[T::Minus, T::Plus, T::MinusMinus, T::PlusPlus, T::Bang]),
            Self::As => TokenSet::of(&[T::KwAs, T::KwAsSafe]),
            Self::Multiplicative => TokenSet::of(&[T::Star, T::Slash, T::Percent]),
            Self::Additive => TokenSet::of(&[T::Plus, T::Minus]),
            Self::Range => TokenSet::of(&[T::DotDot]),
            Self::SimpleName => TokenSet::of(&[T::Ident]),
            Self::Elvis => TokenSet::of(&[T::Elvis]),
            Self::InOrIs => TokenSet::of(&[T::KwIn, T::KwNotIn, T::KwIs, T::KwNotIs]),
            Self::Comparison => TokenSet::of(&[T::Lt, T::Gt, T::LtEq, T::GtEq]),
            Self::Equality => TokenSet::of(&[T::EqEq, T::NotEq, T::EqEqEq, T::NotEqEq]),
            Self::Conjunction => TokenSet::of(&[T::AmpAmp]),
            Self::Disjunction => TokenSet::of(&[T::PipePipe]),
            Self::Assignment => TokenSet::of(&[
                T::Eq,
                T::PlusEq,
                T::MinusEq,
                T::StarEq,
                T::SlashEq,
                T::PercentEq,
            ]),
        }
    }

    /// The next tighter tier, if any.
    pub const fn higher(self) -> Option<Precedence> {
        match self {
            Self::Postfix => None,
            _ => Some(Self::ALL[self as usize - 1]),
        }
    }

    pub(crate) const fn operand(self) -> Operand {
        match self {
            Self::Postfix | Self::Prefix | Self::As => Operand::Prefix,
            _ => match self.higher() {
                Some(higher) => Operand::Tier(higher),
                None => Operand::Prefix,
            },
        }
    }

    /// Node kind built when `op` takes a type rather than an expression on
    /// its right.
    pub(crate) fn type_operand(self, op: T) -> Option<SyntaxKind> {
        match (self, op) {
            (Self::As, _) => Some(SyntaxKind::BinaryWithType),
            (Self::InOrIs, T::KwIs | T::KwNotIs) => Some(SyntaxKind::IsExpression),
            _ => None,
        }
    }
}

// The binary and postfix tiers together use every operator token.
const _: () = {
    let mut used = TokenSet::EMPTY;
    let mut i = 0;
    while i < Precedence::ALL.len() {
        let tier = Precedence::ALL[i];
        if !matches!(tier, Precedence::Prefix) {
            used = used.union(tier.operations());
        }
        i += 1;
    }
    assert!(used.is_subset(&BINARY_AND_POSTFIX_OPERATIONS));
    assert!(BINARY_AND_POSTFIX_OPERATIONS.is_subset(&used));
};
