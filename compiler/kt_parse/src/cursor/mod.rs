//! Token cursor over the significant tokens of a file.
//!
//! The grammar never sees trivia: the cursor walks the non-trivia tokens
//! and answers questions about the trivia in between on demand
//! ([`Cursor::newline_before`], [`Cursor::raw_lookup`]). On top of the
//! lexer's tokens it layers three pieces of state:
//!
//! - a remap overlay, so soft keywords can be promoted or demoted in place
//!   without touching the shared token list;
//! - the newline-significance and token-joining mode stacks;
//! - an optional truncation limit, past which every token reads as `Eof`.

use kt_ir::{Span, TokenKind, TokenList};
use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};
use tracing::trace;

pub(crate) struct Cursor<'a> {
    source: &'a str,
    tokens: &'a TokenList,
    /// Raw indices of the significant tokens. The last entry is `Eof`.
    significant: Vec<u32>,
    pos: usize,
    remaps: FxHashMap<usize, TokenKind>,
    /// Undo journal for `remaps`: position and the kind it replaced.
    remap_log: Vec<(usize, Option<TokenKind>)>,
    newlines: SmallVec<[bool; 8]>,
    joining: SmallVec<[bool; 8]>,
    limit: Option<usize>,
}

impl<'a> Cursor<'a> {
    /// # Panics
    /// Panics if `tokens` does not end with `Eof` or holds more than
    /// `u32::MAX` tokens.
    pub(crate) fn new(source: &'a str, tokens: &'a TokenList) -> Self {
        assert_eq!(
            tokens.as_slice().last().map(|t| t.kind),
            Some(TokenKind::Eof),
            "token list must end with Eof"
        );
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .map(|(i, _)| u32::try_from(i).unwrap_or_else(|_| panic!("too many tokens")))
            .collect();
        Cursor {
            source,
            tokens,
            significant,
            pos: 0,
            remaps: FxHashMap::default(),
            remap_log: Vec::new(),
            newlines: smallvec![true],
            joining: smallvec![true],
            limit: None,
        }
    }

    #[inline]
    pub(crate) fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    pub(crate) fn tokens(&self) -> &'a TokenList {
        self.tokens
    }

    #[inline]
    pub(crate) fn significant(&self) -> &[u32] {
        &self.significant
    }

    /// Index of the current significant token.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn set_position(&mut self, pos: usize) {
        debug_assert!(pos < self.significant.len(), "cursor position out of bounds");
        self.pos = pos;
    }

    fn raw_index(&self, pos: usize) -> usize {
        let last = self.significant.len() - 1;
        self.significant[pos.min(last)] as usize
    }

    fn is_cut(&self, pos: usize) -> bool {
        pos + 1 >= self.significant.len() || self.limit.is_some_and(|limit| pos >= limit)
    }

    /// Kind of the significant token at `pos`, remaps applied, never joined.
    pub(crate) fn kind_at(&self, pos: usize) -> TokenKind {
        if self.is_cut(pos) {
            return TokenKind::Eof;
        }
        match self.remaps.get(&pos) {
            Some(&kind) => kind,
            None => self.tokens.kind(self.raw_index(pos)),
        }
    }

    /// Compound operator formed by the tokens at `pos` and `pos + 1`, if
    /// they touch and spell one.
    fn joined_at(&self, pos: usize) -> Option<TokenKind> {
        let joined = match (self.kind_at(pos), self.kind_at(pos + 1)) {
            (TokenKind::Question, TokenKind::Dot) => TokenKind::SafeAccess,
            (TokenKind::Question, TokenKind::Colon) => TokenKind::Elvis,
            (TokenKind::Bang, TokenKind::Bang) => TokenKind::BangBang,
            _ => return None,
        };
        (self.raw_index(pos + 1) == self.raw_index(pos) + 1).then_some(joined)
    }

    #[inline]
    fn joining_enabled(&self) -> bool {
        self.joining.last().copied().unwrap_or(true)
    }

    /// Current token kind, joined into a compound operator if joining is on.
    pub(crate) fn current(&self) -> TokenKind {
        if self.joining_enabled() {
            if let Some(joined) = self.joined_at(self.pos) {
                return joined;
            }
        }
        self.kind_at(self.pos)
    }

    /// Number of significant tokens the current token spans: 2 when joined.
    fn current_len(&self) -> usize {
        if self.joining_enabled() && self.joined_at(self.pos).is_some() {
            2
        } else {
            1
        }
    }

    /// Kind `k` tokens ahead, never joined; `nth(0)` is [`Cursor::current`].
    /// A joined current token counts as one.
    pub(crate) fn nth(&self, k: usize) -> TokenKind {
        if k == 0 {
            self.current()
        } else {
            self.kind_at(self.pos + self.current_len() - 1 + k)
        }
    }

    pub(crate) fn current_span(&self) -> Span {
        if self.is_cut(self.pos) {
            let start = self.tokens.as_slice()[self.raw_index(self.pos)].span.start;
            return Span::point(start);
        }
        let first = self.tokens.as_slice()[self.raw_index(self.pos)].span;
        let last = self.tokens.as_slice()[self.raw_index(self.pos + self.current_len() - 1)].span;
        first.cover(last)
    }

    pub(crate) fn current_text(&self) -> &'a str {
        self.current_span().slice(self.source)
    }

    /// Text of the significant token `k` ahead, never joined. A joined
    /// current token counts as one, as in [`Cursor::nth`].
    pub(crate) fn nth_text(&self, k: usize) -> &'a str {
        if k == 0 {
            return self.current_text();
        }
        let pos = self.pos + self.current_len() - 1 + k;
        if self.is_cut(pos) {
            return "";
        }
        self.tokens.as_slice()[self.raw_index(pos)]
            .span
            .slice(self.source)
    }

    /// Kind of the significant token before the current one, `Eof` at
    /// the start of input.
    pub(crate) fn previous(&self) -> TokenKind {
        match self.pos.checked_sub(1) {
            Some(pos) => self.kind_at(pos),
            None => TokenKind::Eof,
        }
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.current() == TokenKind::Eof
    }

    /// Consume the current token. Returns its kind and how many
    /// significant tokens it covered, or `None` at end of input.
    pub(crate) fn bump(&mut self) -> Option<(TokenKind, u8)> {
        if self.is_eof() {
            return None;
        }
        let kind = self.current();
        let len = self.current_len();
        trace!(pos = self.pos, %kind, "advance");
        self.pos += len;
        // `current_len` is 1 or 2
        Some((kind, if len == 2 { 2 } else { 1 }))
    }

    /// Kind of the raw token `offset` tokens away from the current one,
    /// trivia included. Out of range reads as `Eof`.
    pub(crate) fn raw_lookup(&self, offset: isize) -> TokenKind {
        let Some(index) = self.raw_index(self.pos).checked_add_signed(offset) else {
            return TokenKind::Eof;
        };
        let Ok(key) = u32::try_from(index) else {
            return TokenKind::Eof;
        };
        match self.significant.binary_search(&key) {
            Ok(sig) => self.kind_at(sig),
            Err(_) => self.tokens.kind(index),
        }
    }

    /// Whether a line break separates the current token from the previous
    /// significant one. Always false while newlines are disabled; always
    /// true at end of input.
    pub(crate) fn newline_before(&self) -> bool {
        if !self.newlines.last().copied().unwrap_or(true) {
            return false;
        }
        if self.is_eof() {
            return true;
        }
        let tokens = self.tokens.as_slice();
        for token in tokens[..self.raw_index(self.pos)].iter().rev() {
            match token.kind {
                TokenKind::Whitespace => {
                    if token.span.slice(self.source).contains('\n') {
                        return true;
                    }
                }
                kind if kind.is_comment() => {}
                _ => return false,
            }
        }
        false
    }

    /// Reclassify the current token until the change is rolled back.
    pub(crate) fn remap_current(&mut self, kind: TokenKind) {
        if self.is_cut(self.pos) {
            return;
        }
        trace!(pos = self.pos, %kind, "remap");
        let previous = self.remaps.insert(self.pos, kind);
        self.remap_log.push((self.pos, previous));
    }

    #[inline]
    pub(crate) fn remap_checkpoint(&self) -> usize {
        self.remap_log.len()
    }

    /// Undo every remap made after `checkpoint`.
    pub(crate) fn undo_remaps(&mut self, checkpoint: usize) {
        while self.remap_log.len() > checkpoint {
            let Some((pos, previous)) = self.remap_log.pop() else {
                break;
            };
            match previous {
                Some(kind) => self.remaps.insert(pos, kind),
                None => self.remaps.remove(&pos),
            };
        }
    }

    pub(crate) fn push_newlines(&mut self, enabled: bool) {
        self.newlines.push(enabled);
    }

    pub(crate) fn pop_newlines(&mut self) {
        debug_assert!(self.newlines.len() > 1, "newline mode stack underflow");
        if self.newlines.len() > 1 {
            self.newlines.pop();
        }
    }

    pub(crate) fn push_joining(&mut self, enabled: bool) {
        self.joining.push(enabled);
    }

    pub(crate) fn pop_joining(&mut self) {
        debug_assert!(self.joining.len() > 1, "joining mode stack underflow");
        if self.joining.len() > 1 {
            self.joining.pop();
        }
    }

    /// Depths of the two mode stacks, sentinels included.
    pub(crate) fn mode_depths(&self) -> (usize, usize) {
        (self.newlines.len(), self.joining.len())
    }

    /// Hide every token from `limit` on. Returns the previous limit.
    pub(crate) fn truncate_at(&mut self, limit: usize) -> Option<usize> {
        let previous = self.limit;
        self.limit = Some(previous.map_or(limit, |p| p.min(limit)));
        previous
    }

    pub(crate) fn restore_limit(&mut self, previous: Option<usize>) {
        self.limit = previous;
    }
}

#[cfg(test)]
mod tests;
