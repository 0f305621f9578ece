//! Token tests and error recovery.
//!
//! Every check of the current token goes through [`Parser::at`] or
//! [`Parser::at_set`], which know two things plain comparison does not:
//!
//! - soft keywords are identifiers to the lexer. Asking for a soft keyword
//!   whose spelling matches the current identifier remaps the token to
//!   that keyword; asking for an identifier while a soft keyword is current
//!   remaps it back. Remaps are undone by rollback like everything else.
//! - [`TokenKind::EolOrSemicolon`] matches end of file, `;`, or a line
//!   break before the current token.
//!
//! Recovery never consumes `{` or `}`, and a failed expectation either
//! stops in place or consumes exactly one token, so callers always make
//! progress without eating what an enclosing rule still needs.

use kt_ir::{TokenKind, TokenSet};

use crate::Parser;

impl Parser<'_> {
    /// Whether the current token is `kind`, remapping soft keywords as
    /// described in the module docs.
    pub(crate) fn at(&mut self, kind: TokenKind) -> bool {
        let current = self.current();
        if self.token_matches(current, kind) {
            return true;
        }
        if current == TokenKind::Ident && kind.is_soft_keyword() {
            if kind.text() == Some(self.current_text()) {
                self.remap_current(kind);
                return true;
            }
        } else if kind == TokenKind::Ident && current.is_soft_keyword() {
            self.remap_current(TokenKind::Ident);
            return true;
        }
        false
    }

    /// Whether the current token is in `set`, remapping soft keywords.
    pub(crate) fn at_set(&mut self, set: TokenSet) -> bool {
        let current = self.current();
        if self.set_matches(current, set) {
            return true;
        }
        if current == TokenKind::Ident {
            if let Some(soft) = TokenKind::soft_keyword(self.current_text()) {
                if set.contains(soft) {
                    self.remap_current(soft);
                    return true;
                }
            }
        } else if set.contains(TokenKind::Ident) && current.is_soft_keyword() {
            self.remap_current(TokenKind::Ident);
            return true;
        }
        false
    }

    fn token_matches(&self, token: TokenKind, expectation: TokenKind) -> bool {
        token == expectation || (expectation == TokenKind::EolOrSemicolon && self.at_terminator())
    }

    fn set_matches(&self, token: TokenKind, set: TokenSet) -> bool {
        set.contains(token) || (set.contains(TokenKind::EolOrSemicolon) && self.at_terminator())
    }

    /// End of file, `;`, or a significant line break before the current token.
    fn at_terminator(&self) -> bool {
        self.eof() || self.current() == TokenKind::Semicolon || self.newline_before()
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn consume_if(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report `message` in place.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> bool {
        if self.consume_if(kind) {
            return true;
        }
        self.error(message);
        false
    }

    /// Consume `kind`, or report `message` and recover against `recovery`.
    pub(crate) fn expect_or_recover(
        &mut self,
        kind: TokenKind,
        message: &str,
        recovery: TokenSet,
    ) -> bool {
        if self.consume_if(kind) {
            return true;
        }
        self.error_with_recovery(message, Some(recovery));
        false
    }

    /// Zero-width error at the current position.
    pub(crate) fn error(&mut self, message: &str) {
        let m = self.mark();
        m.error(self, message);
    }

    /// Wrap the current token in an error node.
    pub(crate) fn error_and_advance(&mut self, message: &str) {
        self.error_and_advance_by(message, 1);
    }

    /// Wrap the next `count` tokens in one error node.
    pub(crate) fn error_and_advance_by(&mut self, message: &str, count: usize) {
        let m = self.mark();
        for _ in 0..count {
            self.advance();
        }
        m.error(self, message);
    }

    /// Report `message`. Stays in place when there is no recovery set, when
    /// the current token is in it, when it is a brace, or when the set
    /// asks for a statement terminator and one is here. Otherwise the
    /// current token goes into the error node.
    pub(crate) fn error_with_recovery(&mut self, message: &str, recovery: Option<TokenSet>) {
        let current = self.current();
        let stop = match recovery {
            None => true,
            Some(set) => {
                set.contains(current)
                    || matches!(current, TokenKind::LBrace | TokenKind::RBrace)
                    || (set.contains(TokenKind::EolOrSemicolon) && self.at_terminator())
            }
        };
        if stop {
            self.error(message);
        } else {
            self.error_and_advance(message);
        }
    }

    /// Wrap everything up to the first token of `stop` in one error node.
    pub(crate) fn error_until(&mut self, message: &str, stop: TokenSet) {
        debug_assert!(
            stop.contains(TokenKind::LBrace) && stop.contains(TokenKind::RBrace),
            "braces must stop an error run"
        );
        let m = self.mark();
        self.skip_until(stop);
        m.error(self, message);
    }

    /// Advance until end of file or a token of `stop`. Soft keywords in
    /// `stop` match their identifiers, as with [`Parser::at_set`].
    pub(crate) fn skip_until(&mut self, stop: TokenSet) {
        while !self.eof() && !self.at_set(stop) {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests;
