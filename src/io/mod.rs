//! # Input boundary: typed-token sources.
//!
//! This module provides the input side of the console's I/O boundary:
//! - [`TokenSource`] - trait for pulling whitespace-delimited tokens and lines
//! - [`SourceError`] - the exhausted-vs-broken failure contract
//! - [`TokenReader`] - standard implementation over any `BufRead`

mod reader;
mod source;

pub use reader::TokenReader;
pub use source::{SourceError, TokenSource};
