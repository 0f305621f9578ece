//! Constant bitsets of token kinds.
//!
//! First sets, follow sets and recovery sets are all `TokenSet`s built in
//! `const` context, so membership is a shift and a mask with no tables to
//! initialize at runtime.

use std::fmt;

use crate::TokenKind;

const _: () = assert!(
    (TokenKind::MAX_DISCRIMINANT as u16) < 256,
    "TokenSet has 256 bits; every discriminant must be below 256"
);

/// Set of token kinds, one bit per discriminant.
///
/// [`TokenKind::EolOrSemicolon`] may be a member like any other kind; the
/// parser gives that bit its special meaning when testing the current
/// token, the set itself does not.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenSet([u128; 2]);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet([0, 0]);

    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Set holding exactly the kinds in `kinds`.
    pub const fn of(kinds: &[TokenKind]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < kinds.len() {
            set = set.with(kinds[i]);
            i += 1;
        }
        set
    }

    #[inline]
    #[must_use]
    #[allow(
        clippy::needless_pass_by_value,
        reason = "const fn builder API; by-value required for static init"
    )]
    pub const fn with(self, kind: TokenKind) -> Self {
        let d = kind as u8;
        let mut words = self.0;
        words[(d >> 7) as usize] |= 1u128 << (d & 127);
        Self(words)
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self([self.0[0] | other.0[0], self.0[1] | other.0[1]])
    }

    #[inline]
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self([self.0[0] & other.0[0], self.0[1] & other.0[1]])
    }

    /// Members of `self` that are not in `other`.
    #[inline]
    #[must_use]
    pub const fn subtract(self, other: Self) -> Self {
        Self([self.0[0] & !other.0[0], self.0[1] & !other.0[1]])
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        let d = kind as u8;
        (self.0[(d >> 7) as usize] & (1u128 << (d & 127))) != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0[0] == 0 && self.0[1] == 0
    }

    /// `true` when every member of `self` is also in `other`.
    #[inline]
    pub const fn is_subset(&self, other: &Self) -> bool {
        self.subtract(*other).is_empty()
    }

    #[inline]
    pub const fn is_disjoint(&self, other: &Self) -> bool {
        self.intersection(*other).is_empty()
    }

    #[inline]
    pub const fn count(&self) -> u32 {
        self.0[0].count_ones() + self.0[1].count_ones()
    }

    /// Members in discriminant order.
    pub fn iter(&self) -> TokenSetIter {
        TokenSetIter {
            words: self.0,
            kinds: TokenKind::ALL.iter(),
        }
    }
}

/// Iterator over the members of a [`TokenSet`].
pub struct TokenSetIter {
    words: [u128; 2],
    kinds: std::slice::Iter<'static, TokenKind>,
}

impl Iterator for TokenSetIter {
    type Item = TokenKind;

    fn next(&mut self) -> Option<TokenKind> {
        let words = self.words;
        self.kinds
            .by_ref()
            .copied()
            .find(|&k| TokenSet(words).contains(k))
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<TokenKind> for TokenSet {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        iter.into_iter().fold(TokenSet::EMPTY, TokenSet::with)
    }
}
