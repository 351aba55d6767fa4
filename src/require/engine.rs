//! # The acquisition loop.
//!
//! [`acquire`] turns a possibly-malformed, possibly-constrained token
//! stream into a value that is guaranteed valid, a caller-chosen default,
//! or an intentional early termination, but never a silently wrong value.
//!
//! One attempt is: pull a token, parse it, apply the restrictor. The three
//! outcomes of an attempt are kept strictly apart:
//! - **rejected** (unparseable token or restrictor said no) — handled by
//!   the configured [`FailurePolicy`];
//! - **exhausted** (the source has no more data) — terminates the run
//!   cleanly under *every* policy, including `UseDefault`;
//! - **broken** (the stream itself failed) — fatal, propagates uncaught.
//!
//! Pulling the token before parsing also disposes of malformed input for
//! free: a token that failed to parse has already been consumed and cannot
//! corrupt the next attempt.

use std::io::Write;

use log::trace;

use crate::error::{Flow, Interrupt};
use crate::io::{SourceError, TokenSource};
use crate::require::policy::FailurePolicy;

/// One acquisition's configuration: failure policy, optional restrictor,
/// and the message shown when the restrictor rejects a value.
///
/// Built from one of the three policy constructors, then optionally
/// constrained:
///
/// ```
/// use menuflow::{restrict, Requirement};
///
/// // Retry until the user supplies a number between 1 and 4.
/// let choice = Requirement::<i64>::retrying("Your choice: ")
///     .restrict(restrict::in_range(1, 4), "Invalid option, please try again.");
///
/// // One shot: anything unusable silently becomes 10.
/// let depth = Requirement::with_default(10_i64);
/// ```
pub struct Requirement<T> {
    policy: FailurePolicy<T>,
    restrictor: Option<Box<dyn Fn(&T) -> bool>>,
    reject_message: String,
}

impl<T> Requirement<T> {
    /// A requirement that re-prompts and retries on every rejection.
    pub fn retrying(prompt: impl Into<String>) -> Self {
        Self::from_policy(FailurePolicy::RetryForever {
            prompt: prompt.into(),
        })
    }

    /// A requirement that substitutes `value` on the first rejection.
    pub fn with_default(value: T) -> Self {
        Self::from_policy(FailurePolicy::UseDefault { value })
    }

    /// A requirement that terminates the run on the first rejection.
    pub fn terminating(message: impl Into<String>) -> Self {
        Self::from_policy(FailurePolicy::Terminate {
            message: message.into(),
        })
    }

    /// A requirement with an explicitly built policy.
    pub fn from_policy(policy: FailurePolicy<T>) -> Self {
        Self {
            policy,
            restrictor: None,
            reject_message: String::new(),
        }
    }

    /// Adds a restrictor predicate and the message printed when it rejects
    /// a parsed value (skipped if empty; a trailing newline is added).
    pub fn restrict(
        mut self,
        predicate: impl Fn(&T) -> bool + 'static,
        message: impl Into<String>,
    ) -> Self {
        self.restrictor = Some(Box::new(predicate));
        self.reject_message = message.into();
        self
    }

    /// Returns the configured failure policy.
    pub fn policy(&self) -> &FailurePolicy<T> {
        &self.policy
    }
}

/// Outcome of a single produce→restrict attempt.
enum Attempt<T> {
    Accepted(T),
    Rejected,
}

/// Runs the acquisition loop for one requirement.
///
/// `parse` is the producer: one attempt to turn one raw token into a `T`.
/// Messages are written to `out`; reject messages and the termination
/// message get a trailing newline, the retry prompt is written verbatim.
pub(crate) fn acquire<T>(
    source: &mut dyn TokenSource,
    out: &mut dyn Write,
    parse: &dyn Fn(&str) -> Option<T>,
    requirement: Requirement<T>,
) -> Flow<T> {
    let Requirement {
        policy,
        restrictor,
        reject_message,
    } = requirement;

    match policy {
        FailurePolicy::UseDefault { value } => {
            match attempt(source, out, parse, &restrictor, &reject_message)? {
                Attempt::Accepted(v) => Ok(v),
                Attempt::Rejected => {
                    trace!("rejected input, substituting default");
                    Ok(value)
                }
            }
        }
        FailurePolicy::Terminate { message } => {
            match attempt(source, out, parse, &restrictor, &reject_message)? {
                Attempt::Accepted(v) => Ok(v),
                Attempt::Rejected => {
                    if !message.is_empty() {
                        let _ = writeln!(out, "{message}");
                        let _ = out.flush();
                    }
                    trace!("rejected input, raising termination");
                    Err(Interrupt::Terminated)
                }
            }
        }
        FailurePolicy::RetryForever { prompt } => loop {
            if let Attempt::Accepted(v) =
                attempt(source, out, parse, &restrictor, &reject_message)?
            {
                return Ok(v);
            }
            trace!("rejected input, re-prompting");
            if !prompt.is_empty() {
                let _ = write!(out, "{prompt}");
                let _ = out.flush();
            }
        },
    }
}

/// One produce→restrict attempt.
///
/// Exhaustion becomes [`Interrupt::Terminated`], breakage becomes a fault;
/// both unwind out of the whole acquisition regardless of policy.
fn attempt<T>(
    source: &mut dyn TokenSource,
    out: &mut dyn Write,
    parse: &dyn Fn(&str) -> Option<T>,
    restrictor: &Option<Box<dyn Fn(&T) -> bool>>,
    reject_message: &str,
) -> Flow<Attempt<T>> {
    let token = match source.next_token() {
        Ok(token) => token,
        Err(SourceError::Exhausted) => {
            trace!("input exhausted, raising termination");
            return Err(Interrupt::Terminated);
        }
        Err(SourceError::Broken(err)) => return Err(err.into()),
    };

    let Some(value) = parse(&token) else {
        return Ok(Attempt::Rejected);
    };

    if let Some(predicate) = restrictor {
        if !predicate(&value) {
            if !reject_message.is_empty() {
                let _ = writeln!(out, "{reject_message}");
                let _ = out.flush();
            }
            return Ok(Attempt::Rejected);
        }
    }

    Ok(Attempt::Accepted(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RunError;
    use crate::io::TokenReader;
    use crate::restrict;
    use std::io::Cursor;

    fn source(input: &str) -> TokenReader<Cursor<Vec<u8>>> {
        TokenReader::new(Cursor::new(input.as_bytes().to_vec()))
    }

    fn parse_i64(s: &str) -> Option<i64> {
        s.parse().ok()
    }

    #[test]
    fn valid_input_is_returned_untouched() {
        let mut src = source("42");
        let mut out: Vec<u8> = Vec::new();
        let got = acquire(&mut src, &mut out, &parse_i64, Requirement::retrying("? "));
        assert_eq!(got.unwrap(), 42);
        assert!(out.is_empty());
    }

    #[test]
    fn retry_forever_skips_bad_tokens_until_valid() {
        let mut src = source("nope 9 2");
        let mut out: Vec<u8> = Vec::new();
        let req = Requirement::retrying("again: ")
            .restrict(restrict::in_range(1_i64, 4), "out of range");
        let got = acquire(&mut src, &mut out, &parse_i64, req);
        assert_eq!(got.unwrap(), 2);
        let printed = String::from_utf8(out).unwrap();
        // "nope" is malformed (prompt only), "9" is rejected (message + prompt).
        assert_eq!(printed, "again: out of range\nagain: ");
    }

    #[test]
    fn use_default_substitutes_after_single_rejection() {
        let mut src = source("banana 7");
        let mut out: Vec<u8> = Vec::new();
        let got = acquire(
            &mut src,
            &mut out,
            &parse_i64,
            Requirement::with_default(10),
        );
        assert_eq!(got.unwrap(), 10);
        // No retry happened: the next token is still there.
        assert_eq!(src.next_token().unwrap(), "7");
        assert!(out.is_empty());
    }

    #[test]
    fn use_default_prints_reject_message_at_most_once() {
        let mut src = source("99");
        let mut out: Vec<u8> = Vec::new();
        let req = Requirement::with_default(1_i64)
            .restrict(restrict::in_range(1, 4), "out of range");
        let got = acquire(&mut src, &mut out, &parse_i64, req);
        assert_eq!(got.unwrap(), 1);
        assert_eq!(String::from_utf8(out).unwrap(), "out of range\n");
    }

    #[test]
    fn terminate_raises_the_signal_and_prints_message() {
        let mut src = source("bad");
        let mut out: Vec<u8> = Vec::new();
        let got = acquire(
            &mut src,
            &mut out,
            &parse_i64,
            Requirement::terminating("giving up"),
        );
        assert!(matches!(got, Err(Interrupt::Terminated)));
        assert_eq!(String::from_utf8(out).unwrap(), "giving up\n");
    }

    #[test]
    fn exhaustion_terminates_even_with_default_policy() {
        let mut src = source("");
        let mut out: Vec<u8> = Vec::new();
        let got = acquire(
            &mut src,
            &mut out,
            &parse_i64,
            Requirement::with_default(10),
        );
        assert!(matches!(got, Err(Interrupt::Terminated)));
        assert!(out.is_empty());
    }

    #[test]
    fn exhaustion_mid_retry_terminates() {
        let mut src = source("bad worse");
        let mut out: Vec<u8> = Vec::new();
        let got = acquire(
            &mut src,
            &mut out,
            &parse_i64,
            Requirement::retrying("again: "),
        );
        assert!(matches!(got, Err(Interrupt::Terminated)));
        assert_eq!(String::from_utf8(out).unwrap(), "again: again: ");
    }

    #[test]
    fn broken_stream_is_a_fault_not_a_termination() {
        use crate::io::TokenSource;
        use std::io::{self, BufRead};

        struct Failing;
        impl io::Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("wire cut"))
            }
        }
        impl BufRead for Failing {
            fn fill_buf(&mut self) -> io::Result<&[u8]> {
                Err(io::Error::other("wire cut"))
            }
            fn consume(&mut self, _: usize) {}
        }

        let mut src = TokenReader::new(Failing);
        let mut out: Vec<u8> = Vec::new();
        let got = acquire(
            &mut src,
            &mut out,
            &parse_i64,
            Requirement::<i64>::retrying("again: "),
        );
        assert!(matches!(got, Err(Interrupt::Fault(RunError::Io(_)))));
    }

    #[test]
    fn empty_messages_print_nothing() {
        let mut src = source("99 2");
        let mut out: Vec<u8> = Vec::new();
        let req = Requirement::retrying("").restrict(restrict::in_range(1_i64, 4), "");
        let got = acquire(&mut src, &mut out, &parse_i64, req);
        assert_eq!(got.unwrap(), 2);
        assert!(out.is_empty());
    }
}
