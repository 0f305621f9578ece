//! Bracket-aware lookahead.
//!
//! Some decisions need to look past an arbitrary amount of input: is
//! there a `.` at bracket depth zero before the `=` that ends a property
//! header? [`Parser::scan`] walks forward from the current token, tracking
//! the nesting of `(`, `<`, `{` and `[`, and asks a [`TokenPattern`] at
//! every token whether to stop. It always rolls back, so a scan consumes
//! nothing.
//!
//! Angle brackets are ordinary operators to the lexer, so their count is
//! a heuristic: `a > b` leaves the scan below top level from there on.

use kt_ir::{TokenKind, TokenSet};
use smallvec::SmallVec;
use tracing::trace;

use crate::Parser;

/// A question answered by scanning forward.
pub(crate) trait TokenPattern {
    /// Look at the current token. `pos` is its position; `top_level` is
    /// true when no bracket is open. Returns true to stop the scan.
    fn process_token(&mut self, p: &mut Parser<'_>, pos: usize, top_level: bool) -> bool;

    /// Called on a closing bracket with no matching opener. Returns true
    /// to stop the scan.
    fn handle_unmatched_closing(&mut self, _kind: TokenKind) -> bool {
        false
    }

    /// Position found, if any.
    fn result(&self) -> Option<usize>;
}

/// A condition on the current token.
pub(crate) trait TokenPredicate {
    fn matches(&mut self, p: &mut Parser<'_>, top_level: bool) -> bool;
}

impl<F> TokenPredicate for F
where
    F: FnMut(&mut Parser<'_>, bool) -> bool,
{
    fn matches(&mut self, p: &mut Parser<'_>, top_level: bool) -> bool {
        self(p, top_level)
    }
}

/// The current token is in `set`, at top level.
#[derive(Clone, Copy)]
pub(crate) struct AtSet(pub(crate) TokenSet);

impl TokenPredicate for AtSet {
    fn matches(&mut self, p: &mut Parser<'_>, top_level: bool) -> bool {
        top_level && p.at_set(self.0)
    }
}

/// The last top-level match of `look_for` before `stop_at` first matches
/// at top level.
pub(crate) struct LastBefore<L, S> {
    look_for: L,
    stop_at: S,
    /// Ignore a stop on the token right after a match.
    dont_stop_right_after_occurrence: bool,
    previous_matched: bool,
    last: Option<usize>,
}

impl<L, S> LastBefore<L, S> {
    pub(crate) fn new(look_for: L, stop_at: S) -> Self {
        LastBefore {
            look_for,
            stop_at,
            dont_stop_right_after_occurrence: false,
            previous_matched: false,
            last: None,
        }
    }

    /// Do not stop on the token right after a `look_for` match, so that a
    /// delimiter belonging to the match does not end the scan.
    ///
    /// No grammar rule needs the lenient stop yet; the scanner tests cover it.
    #[cfg_attr(not(test), allow(dead_code))]
    #[must_use]
    pub(crate) fn dont_stop_right_after_occurrence(mut self) -> Self {
        self.dont_stop_right_after_occurrence = true;
        self
    }
}

impl<L: TokenPredicate, S: TokenPredicate> TokenPattern for LastBefore<L, S> {
    fn process_token(&mut self, p: &mut Parser<'_>, pos: usize, top_level: bool) -> bool {
        let matched = self.look_for.matches(p, top_level);
        if matched {
            self.last = Some(pos);
        }
        if top_level
            && self.stop_at.matches(p, top_level)
            && !(self.dont_stop_right_after_occurrence && self.previous_matched)
        {
            return true;
        }
        self.previous_matched = matched;
        false
    }

    fn result(&self) -> Option<usize> {
        self.last
    }
}

/// The first match of `look_for`, unless `stop_at` matches first.
pub(crate) struct FirstBefore<L, S> {
    look_for: L,
    stop_at: S,
    found: Option<usize>,
}

impl<L, S> FirstBefore<L, S> {
    pub(crate) fn new(look_for: L, stop_at: S) -> Self {
        FirstBefore {
            look_for,
            stop_at,
            found: None,
        }
    }
}

impl<L: TokenPredicate, S: TokenPredicate> TokenPattern for FirstBefore<L, S> {
    fn process_token(&mut self, p: &mut Parser<'_>, pos: usize, top_level: bool) -> bool {
        if self.look_for.matches(p, top_level) {
            self.found = Some(pos);
            return true;
        }
        self.stop_at.matches(p, top_level)
    }

    fn result(&self) -> Option<usize> {
        self.found
    }
}

#[derive(Default)]
struct Depths {
    paren: i32,
    angle: i32,
    brace: i32,
    bracket: i32,
}

impl Depths {
    fn top_level(&self) -> bool {
        self.paren == 0 && self.angle == 0 && self.brace == 0 && self.bracket == 0
    }
}

impl Parser<'_> {
    /// Walk forward until `pattern` stops or input ends, then roll back.
    pub(crate) fn scan(&mut self, pattern: &mut impl TokenPattern) -> Option<usize> {
        let from = self.position();
        let start = self.mark();
        let mut depths = Depths::default();
        let mut opens: SmallVec<[TokenKind; 16]> = SmallVec::new();

        while !self.eof() {
            let pos = self.position();
            if pattern.process_token(self, pos, depths.top_level()) {
                break;
            }
            let kind = self.current();
            let closing_match = match kind {
                TokenKind::LParen => {
                    depths.paren += 1;
                    opens.push(kind);
                    None
                }
                TokenKind::Lt => {
                    depths.angle += 1;
                    None
                }
                TokenKind::LBrace => {
                    depths.brace += 1;
                    opens.push(kind);
                    None
                }
                TokenKind::LBracket => {
                    depths.bracket += 1;
                    opens.push(kind);
                    None
                }
                TokenKind::RParen => {
                    depths.paren -= 1;
                    Some(TokenKind::LParen)
                }
                TokenKind::Gt => {
                    depths.angle -= 1;
                    None
                }
                TokenKind::RBrace => {
                    depths.brace -= 1;
                    Some(TokenKind::LBrace)
                }
                TokenKind::RBracket => {
                    depths.bracket -= 1;
                    Some(TokenKind::LBracket)
                }
                _ => None,
            };
            if let Some(opener) = closing_match {
                if opens.pop() != Some(opener) && pattern.handle_unmatched_closing(kind) {
                    break;
                }
            }
            self.advance();
        }

        trace!(from, to = self.position(), found = ?pattern.result(), "scan");
        start.rollback(self);
        pattern.result()
    }
}

#[cfg(test)]
mod tests;
