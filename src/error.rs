// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error taxonomy.
//!
//! Almost nothing in this crate is allowed to fail a logging call: malformed
//! templates render as literal text, argument underflow leaves placeholders
//! unrendered, and a declined structured bind falls back to scalar binding.
//! The one condition that does surface is a missing format string, which is
//! a bug at the call site rather than a data problem.

use thiserror::Error;

/// Caller-contract violations surfaced from the payload boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The hosting runtime delivered a templated message with no format
    /// string at all.
    #[error("message template is required")]
    MissingTemplate,
}

/// Reasons the structured binding stage declines a template/argument pair.
///
/// These never reach callers; the formatter consumes them and retries with
/// the scalar fallback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    /// More distinct placeholders than supplied arguments.
    #[error("template declares more placeholders than the {arguments} supplied arguments")]
    NotEnoughArguments { arguments: usize },
    /// A positional placeholder indexes past the argument list.
    #[error("positional placeholder {{{index}}} is out of range for {arguments} arguments")]
    PositionalOutOfRange { index: usize, arguments: usize },
}
