//! Markers and the event log.
//!
//! The parser does not build a tree while it runs. It appends events to a
//! flat log instead: a node starts, a node finishes, a token is consumed.
//! A [`Marker`] is a handle to a `Start` event that has not been resolved
//! yet. Exactly one of four things must happen to it:
//!
//! - [`Marker::done`] turns it into a node of the given kind;
//! - [`Marker::abandon`] removes the wrapper but keeps its children;
//! - [`Marker::error`] turns it into an error node carrying a message;
//! - [`Marker::rollback`] truncates the log back to the marker and moves the
//!   cursor back, undoing every advance, remap and node since.
//!
//! Rollback is a truncation, so its cost is proportional to the events
//! recorded since the mark. [`CompletedMarker::precede`] wraps an already
//! finished node in a new one through a forward-parent link, without
//! shifting the log.

use kt_ir::{SyntaxKind, TokenKind};
use tracing::trace;

use crate::Parser;

/// How a node adopts the comments around it when the tree is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum CommentBinding {
    /// Leading trivia goes to the parent; trailing trivia to whoever comes next.
    #[default]
    None,
    /// Comments on the same line after the last token.
    Trailing,
    /// A preceding doc comment, plus trailing comments.
    Doc,
    /// Preceding comments not separated by a blank line (and any doc
    /// comment), plus trailing comments.
    All,
}

impl CommentBinding {
    pub(crate) fn binds_leading(self) -> bool {
        matches!(self, Self::Doc | Self::All)
    }

    pub(crate) fn binds_trailing(self) -> bool {
        self != Self::None
    }
}

#[derive(Debug)]
pub(crate) enum Event {
    /// A node starts. `kind` is `None` until the marker is done, and stays
    /// `None` if it is abandoned.
    Start {
        kind: Option<SyntaxKind>,
        /// Event index of a node that wraps this one, see [`CompletedMarker::precede`].
        forward_parent: Option<usize>,
        binding: CommentBinding,
        message: Option<Box<str>>,
    },
    Finish,
    /// One leaf covering `len` significant tokens (2 for a joined operator).
    Token { kind: TokenKind, len: u8 },
}

impl Event {
    pub(crate) fn tombstone() -> Self {
        Event::Start {
            kind: None,
            forward_parent: None,
            binding: CommentBinding::None,
            message: None,
        }
    }
}

/// An open node. Must be resolved before it goes out of scope.
#[must_use = "a marker must be done, abandoned, errored or rolled back"]
pub(crate) struct Marker {
    start: usize,
    /// Log length to truncate to on rollback. For a marker made by
    /// `precede` this reaches back over the node it wraps.
    rollback_to: usize,
    pos: usize,
    remaps: usize,
    armed: bool,
}

impl Marker {
    fn new(start: usize, rollback_to: usize, pos: usize, remaps: usize) -> Self {
        Marker {
            start,
            rollback_to,
            pos,
            remaps,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }

    /// Close the node as `kind`.
    pub(crate) fn done(self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.done_with_binding(p, kind, CommentBinding::None)
    }

    /// Close the node as `kind` and tell the tree builder which
    /// surrounding comments it owns.
    pub(crate) fn done_with_binding(
        mut self,
        p: &mut Parser<'_>,
        kind: SyntaxKind,
        binding: CommentBinding,
    ) -> CompletedMarker {
        self.disarm();
        if let Event::Start {
            kind: slot,
            binding: slot_binding,
            ..
        } = &mut p.events[self.start]
        {
            *slot = Some(kind);
            *slot_binding = binding;
        }
        p.events.push(Event::Finish);
        CompletedMarker {
            start: self.start,
            rollback_to: self.rollback_to,
            pos: self.pos,
            remaps: self.remaps,
        }
    }

    /// Close the node as an error node with `message`.
    pub(crate) fn error(self, p: &mut Parser<'_>, message: impl Into<Box<str>>) {
        let message = message.into();
        trace!(pos = p.cursor.position(), %message, "error");
        if let Event::Start {
            message: slot_message,
            ..
        } = &mut p.events[self.start]
        {
            *slot_message = Some(message);
        }
        self.done(p, SyntaxKind::Error);
    }

    /// Discard the wrapper. Nodes and tokens inside it stay where they are.
    pub(crate) fn abandon(mut self, p: &mut Parser<'_>) {
        self.disarm();
        if self.start + 1 == p.events.len() && self.rollback_to == self.start {
            if let Some(Event::Start {
                forward_parent: None,
                ..
            }) = p.events.last()
            {
                p.events.pop();
                return;
            }
        }
        if let Event::Start { kind, .. } = &mut p.events[self.start] {
            *kind = None;
        }
    }

    /// Move the cursor back to the mark and forget everything recorded since.
    pub(crate) fn rollback(mut self, p: &mut Parser<'_>) {
        self.disarm();
        trace!(from = p.cursor.position(), to = self.pos, "rollback");
        p.events.truncate(self.rollback_to);
        p.cursor.set_position(self.pos);
        p.cursor.undo_remaps(self.remaps);
    }

    /// Open a node that will enclose this one once both are done.
    pub(crate) fn precede(&self, p: &mut Parser<'_>) -> Marker {
        link_parent(p, self.start, self.rollback_to, self.pos, self.remaps)
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if self.armed && cfg!(debug_assertions) && !std::thread::panicking() {
            panic!("marker at event {} was never resolved", self.start);
        }
    }
}

/// A node that is already closed.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CompletedMarker {
    start: usize,
    rollback_to: usize,
    pos: usize,
    remaps: usize,
}

impl CompletedMarker {
    /// Open a node starting where this one starts, which will enclose it.
    /// Rolling the new marker back removes this node too.
    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        link_parent(p, self.start, self.rollback_to, self.pos, self.remaps)
    }
}

/// Push a `Start` event and splice it into the forward-parent chain of
/// `child`, right above `child` itself.
fn link_parent(
    p: &mut Parser<'_>,
    child: usize,
    rollback_to: usize,
    pos: usize,
    remaps: usize,
) -> Marker {
    let index = p.events.len();
    let mut event = Event::tombstone();
    if let Event::Start { forward_parent, .. } = &mut p.events[child] {
        if let Event::Start {
            forward_parent: new_parent,
            ..
        } = &mut event
        {
            *new_parent = forward_parent.replace(index);
        }
    }
    p.events.push(event);
    Marker::new(index, rollback_to, pos, remaps)
}

impl Parser<'_> {
    /// Start a node at the current token.
    pub(crate) fn mark(&mut self) -> Marker {
        let start = self.events.len();
        self.events.push(Event::tombstone());
        Marker::new(
            start,
            start,
            self.cursor.position(),
            self.cursor.remap_checkpoint(),
        )
    }
}

#[cfg(test)]
mod tests;
