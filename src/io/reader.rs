//! # Buffered token reader.
//!
//! [`TokenReader`] implements [`TokenSource`] over any `BufRead`. It keeps
//! one line buffered and a cursor into it; tokens are carved out of the
//! buffer and new lines are pulled in on demand, so a single input line can
//! feed several consecutive reads (`"1 2"` answers two integer prompts).

use std::io::{self, BufRead, BufReader, Stdin};

use crate::io::source::{SourceError, TokenSource};

/// Standard token source over a buffered reader.
///
/// ## Example
/// ```
/// use std::io::Cursor;
/// use menuflow::{TokenReader, TokenSource};
///
/// let mut tokens = TokenReader::new(Cursor::new("1 hello\n  world"));
/// assert_eq!(tokens.next_token().unwrap(), "1");
/// assert_eq!(tokens.next_token().unwrap(), "hello");
/// assert_eq!(tokens.next_token().unwrap(), "world");
/// assert!(tokens.next_token().is_err()); // exhausted
/// ```
pub struct TokenReader<R> {
    inner: R,
    line: String,
    pos: usize,
}

impl TokenReader<BufReader<Stdin>> {
    /// Creates a reader over the process's standard input.
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> TokenReader<R> {
    /// Creates a reader over any buffered source.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: String::new(),
            pos: 0,
        }
    }

    /// Pulls the next raw line into the buffer and resets the cursor.
    ///
    /// Returns `false` on end of input.
    fn refill(&mut self) -> Result<bool, SourceError> {
        self.line.clear();
        self.pos = 0;
        let read = self.inner.read_line(&mut self.line)?;
        Ok(read > 0)
    }

    /// Remainder of the buffered line from the cursor on.
    fn rest(&self) -> &str {
        &self.line[self.pos..]
    }
}

impl<R: BufRead> TokenSource for TokenReader<R> {
    fn next_token(&mut self) -> Result<String, SourceError> {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            let skipped = rest.len() - trimmed.len();
            if trimmed.is_empty() {
                if !self.refill()? {
                    return Err(SourceError::Exhausted);
                }
                continue;
            }

            let end = trimmed
                .find(char::is_whitespace)
                .unwrap_or(trimmed.len());
            let token = trimmed[..end].to_owned();
            self.pos += skipped + end;
            return Ok(token);
        }
    }

    fn next_line(&mut self) -> Result<String, SourceError> {
        if self.rest().trim().is_empty() && !self.refill()? {
            return Err(SourceError::Exhausted);
        }
        let line = self.rest().trim_end_matches(['\n', '\r']).to_owned();
        self.pos = self.line.len();
        Ok(line)
    }
}
