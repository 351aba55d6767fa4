//! # Token source contract.
//!
//! `TokenSource` is the seam between the requiring engine and whatever
//! produces raw input. The engine only ever asks for the *next token* (or
//! the next line) and distinguishes three outcomes: a token, a permanently
//! exhausted source, or a broken source.
//!
//! ## Contract
//! - A token is a maximal run of non-whitespace characters; sources skip
//!   any amount of whitespace (including line breaks) before it.
//! - [`SourceError::Exhausted`] means "no more data, ever": end of input,
//!   not a transient condition. The engine treats it as a clean stop.
//! - [`SourceError::Broken`] means the underlying stream failed; it is
//!   fatal and propagates uncaught.
//!
//! Parse failures are **not** source errors: a source hands out raw token
//! strings and never inspects them.

use std::io;

use thiserror::Error;

/// Failure modes of a token source.
///
/// The two variants deliberately mirror the two fatal-vs-clean paths of the
/// run loop: exhaustion terminates the run cleanly, breakage aborts it.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source has no more data and never will.
    #[error("input exhausted")]
    Exhausted,

    /// The underlying stream failed while reading.
    #[error("input stream failure: {0}")]
    Broken(#[from] io::Error),
}

/// Supplier of whitespace-delimited tokens and raw lines.
///
/// Implementations must be blocking: a call returns only once a token is
/// available, the source is known to be exhausted, or the stream breaks.
pub trait TokenSource {
    /// Returns the next whitespace-delimited token.
    fn next_token(&mut self) -> Result<String, SourceError>;

    /// Returns the rest of the current line (without the line terminator),
    /// or the next full line if the current one is fully consumed.
    fn next_line(&mut self) -> Result<String, SourceError>;
}
