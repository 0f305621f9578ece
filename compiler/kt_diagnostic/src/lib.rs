//! Diagnostics for the lexer and parser.
//!
//! A [`Diagnostic`] is an error code, a message and one or more labelled
//! spans. Emitters in [`emitter`] render diagnostics for a terminal or as
//! JSON for tools; [`span_utils::LineIndex`] turns byte offsets into the
//! line and column numbers both renderings show.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
