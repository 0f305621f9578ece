//! Native stack growth for the parser's mutual recursion.
//!
//! Declarations, types and expressions call into each other without a
//! fixed bound: `f(g(h({ x -> when (x) { 1 -> (((y))) } })))` nests one
//! frame chain per bracket. Every grammar entry point that can re-enter
//! itself goes through [`ensure_sufficient_stack`], which moves execution
//! onto a freshly allocated segment once the current one runs low.
//!
//! On `wasm32` the guard is a plain call; the host owns the stack there.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a new stack segment if fewer than
/// [`RED_ZONE`] bytes remain on the current one.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Bytes left on the current segment, when the platform can tell.
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

/// Bytes left on the current segment, when the platform can tell.
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
