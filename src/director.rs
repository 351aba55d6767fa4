//! # Directors: the transition rules of the state machine.
//!
//! A [`Director`] decides what happens after a state's action has run. It
//! is constructed once at registration time, validated up front, and
//! evaluated lazily on every visit of its owning state.
//!
//! - [`Director::Exit`] the run ends at this state (terminal).
//! - [`Director::Next`] unconditionally hands over to a fixed id.
//! - [`Director::Back`] re-runs the state visited `n` states ago.
//! - [`Director::BranchOnInt`] reads a bounded integer and maps it by
//!   offset into a target list.
//! - [`Director::BranchOnString`] reads one of a fixed set of words and
//!   maps it by position into a target list.
//!
//! The branch variants delegate to the requiring engine with the
//! retry-forever policy: a branch with no valid answer could never
//! resolve, so rejected input always re-prompts.
//!
//! ## Example
//! ```
//! use menuflow::Director;
//!
//! let menu = Director::branch_int(1, 3, ["add", "sub", "quit"]).unwrap();
//! let back = Director::back(1);
//! let done = Director::exit();
//! # let _ = (menu, back, done);
//! ```

use log::trace;

use crate::core::Console;
use crate::error::{ConfigError, Flow, RunError};
use crate::require::Requirement;
use crate::restrict;

/// Transition rule attached to a state.
///
/// Construct through the associated functions: the branch constructors
/// validate their arguments once, so resolution can never fail on arity.
#[derive(Clone, Debug)]
pub enum Director {
    /// Terminal: the run loop stops after the owning state's action.
    Exit,
    /// Unconditionally continue at `id`.
    Next {
        /// The next state id.
        id: String,
    },
    /// Continue at the state visited `depth` states ago.
    ///
    /// Resolution fails with [`RunError::HistoryUnderflow`] when the
    /// visited path holds no entry that far back.
    Back {
        /// How far to rewind; `1` is the previous state.
        depth: usize,
    },
    /// Read an integer in `[lo, hi]` and continue at
    /// `targets[value - lo]`.
    BranchOnInt {
        /// Lower bound (inclusive).
        lo: i64,
        /// Upper bound (inclusive).
        hi: i64,
        /// One target id per accepted value, in order.
        targets: Vec<String>,
        /// Override for the out-of-range message; `None` uses the config
        /// default.
        reject: Option<String>,
        /// Override for the re-prompt; `None` uses the config default.
        reprompt: Option<String>,
    },
    /// Read one of `inputs` and continue at the same-index entry of
    /// `targets`.
    BranchOnString {
        /// Accepted input words.
        inputs: Vec<String>,
        /// One target id per accepted input, same order.
        targets: Vec<String>,
        /// Override for the rejection message; `None` uses the config
        /// default.
        reject: Option<String>,
        /// Override for the re-prompt; `None` uses the config default.
        reprompt: Option<String>,
    },
}

impl Director {
    /// Terminal director.
    pub fn exit() -> Self {
        Director::Exit
    }

    /// Unconditional transition to `id`.
    pub fn next(id: impl Into<String>) -> Self {
        Director::Next { id: id.into() }
    }

    /// Transition to the state visited `depth` states ago.
    pub fn back(depth: usize) -> Self {
        Director::Back { depth }
    }

    /// Integer branch over `[lo, hi]` with config-default messages.
    ///
    /// Fails with [`ConfigError::InvalidRange`] if `lo > hi`, or
    /// [`ConfigError::BranchArity`] unless exactly `hi - lo + 1` targets
    /// are supplied.
    pub fn branch_int<I, S>(lo: i64, hi: i64, targets: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::branch_int_with(lo, hi, targets, None, None)
    }

    /// Integer branch with explicit rejection message and re-prompt.
    pub fn branch_int_with<I, S>(
        lo: i64,
        hi: i64,
        targets: I,
        reject: Option<String>,
        reprompt: Option<String>,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if lo > hi {
            return Err(ConfigError::InvalidRange { lo, hi });
        }
        let targets: Vec<String> = targets.into_iter().map(Into::into).collect();
        let expected = (hi as i128 - lo as i128 + 1) as usize;
        if targets.len() != expected {
            return Err(ConfigError::BranchArity {
                expected,
                got: targets.len(),
            });
        }
        Ok(Director::BranchOnInt {
            lo,
            hi,
            targets,
            reject,
            reprompt,
        })
    }

    /// String branch with config-default messages.
    ///
    /// Fails with [`ConfigError::EmptyBranch`] for an empty input set, or
    /// [`ConfigError::BranchArity`] unless `inputs` and `targets` have the
    /// same length.
    pub fn branch_str<I, J, S, U>(inputs: I, targets: J) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = U>,
        S: Into<String>,
        U: Into<String>,
    {
        Self::branch_str_with(inputs, targets, None, None)
    }

    /// String branch with explicit rejection message and re-prompt.
    pub fn branch_str_with<I, J, S, U>(
        inputs: I,
        targets: J,
        reject: Option<String>,
        reprompt: Option<String>,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = U>,
        S: Into<String>,
        U: Into<String>,
    {
        let inputs: Vec<String> = inputs.into_iter().map(Into::into).collect();
        let targets: Vec<String> = targets.into_iter().map(Into::into).collect();
        if inputs.is_empty() {
            return Err(ConfigError::EmptyBranch);
        }
        if targets.len() != inputs.len() {
            return Err(ConfigError::BranchArity {
                expected: inputs.len(),
                got: targets.len(),
            });
        }
        Ok(Director::BranchOnString {
            inputs,
            targets,
            reject,
            reprompt,
        })
    }

    /// Returns whether this director ends the run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Director::Exit)
    }

    /// Computes the next state id for the current session.
    ///
    /// Never called for [`Director::Exit`]; the run loop checks
    /// [`Director::is_terminal`] first.
    pub(crate) fn resolve(&self, cns: &mut Console) -> Flow<String> {
        match self {
            // The run loop checks is_terminal() before resolving.
            Director::Exit => unreachable!("exit directors are never resolved"),
            Director::Next { id } => Ok(id.clone()),
            Director::Back { depth } => {
                let len = cns.trail().len();
                match cns.trail().back_target(*depth) {
                    Some(id) => Ok(id.to_owned()),
                    None => Err(RunError::HistoryUnderflow { depth: *depth, len }.into()),
                }
            }
            Director::BranchOnInt {
                lo,
                hi,
                targets,
                reject,
                reprompt,
            } => {
                let (lo, hi) = (*lo, *hi);
                let requirement = Requirement::retrying(cns.reprompt_or(reprompt.as_deref()))
                    .restrict(restrict::in_range(lo, hi), cns.reject_or(reject.as_deref()));
                let value: i64 = cns.require(requirement)?;
                trace!("int branch picked {value}");
                Ok(targets[(value - lo) as usize].clone())
            }
            Director::BranchOnString {
                inputs,
                targets,
                reject,
                reprompt,
            } => {
                let requirement = Requirement::retrying(cns.reprompt_or(reprompt.as_deref()))
                    .restrict(
                        restrict::one_of(inputs.clone()),
                        cns.reject_or(reject.as_deref()),
                    );
                let value: String = cns.require(requirement)?;
                trace!("string branch picked {value:?}");
                match inputs.iter().position(|input| *input == value) {
                    Some(index) => Ok(targets[index].clone()),
                    // Unreachable while restrictor and scan share `inputs`;
                    // fail loudly rather than jump to an arbitrary state.
                    None => Err(RunError::BranchMismatch { input: value }.into()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Console;
    use crate::io::TokenReader;
    use std::io::Cursor;

    fn console(input: &str) -> Console {
        Console::with_io(
            crate::Config::default(),
            Box::new(TokenReader::new(Cursor::new(input.as_bytes().to_vec()))),
            Box::new(Vec::<u8>::new()),
            None,
        )
    }

    #[test]
    fn branch_int_checks_range_and_arity_at_construction() {
        assert!(matches!(
            Director::branch_int(4, 1, ["a"]),
            Err(ConfigError::InvalidRange { .. })
        ));
        assert!(matches!(
            Director::branch_int(1, 3, ["a", "b"]),
            Err(ConfigError::BranchArity {
                expected: 3,
                got: 2
            })
        ));
        assert!(Director::branch_int(1, 3, ["a", "b", "c"]).is_ok());
    }

    #[test]
    fn branch_str_checks_shape_at_construction() {
        assert!(matches!(
            Director::branch_str(Vec::<String>::new(), Vec::<String>::new()),
            Err(ConfigError::EmptyBranch)
        ));
        assert!(matches!(
            Director::branch_str(["y", "n"], ["yes"]),
            Err(ConfigError::BranchArity {
                expected: 2,
                got: 1
            })
        ));
        assert!(Director::branch_str(["y", "n"], ["yes", "no"]).is_ok());
    }

    #[test]
    fn next_resolves_without_io() {
        let mut cns = console("");
        let next = Director::next("menu").resolve(&mut cns).unwrap();
        assert_eq!(next, "menu");
    }

    #[test]
    fn back_resolves_against_the_trail() {
        let mut cns = console("");
        cns.seed_trail(&["a", "b", "c"]);
        assert_eq!(Director::back(1).resolve(&mut cns).unwrap(), "b");
        assert_eq!(Director::back(2).resolve(&mut cns).unwrap(), "a");
    }

    #[test]
    fn back_past_history_underflows() {
        let mut cns = console("");
        cns.seed_trail(&["a"]);
        let err = Director::back(1).resolve(&mut cns).unwrap_err();
        assert!(matches!(
            err,
            crate::Interrupt::Fault(RunError::HistoryUnderflow { depth: 1, len: 1 })
        ));
    }

    #[test]
    fn int_branch_maps_by_offset() {
        let mut cns = console("5");
        let dir = Director::branch_int(4, 6, ["four", "five", "six"]).unwrap();
        assert_eq!(dir.resolve(&mut cns).unwrap(), "five");
    }

    #[test]
    fn int_branch_retries_out_of_range_values() {
        let mut cns = console("9 2");
        let dir = Director::branch_int(1, 2, ["add", "sub"]).unwrap();
        assert_eq!(dir.resolve(&mut cns).unwrap(), "sub");
    }

    #[test]
    fn string_branch_maps_by_position() {
        let mut cns = console("no");
        let dir = Director::branch_str(["yes", "no"], ["#Y", "#N"]).unwrap();
        assert_eq!(dir.resolve(&mut cns).unwrap(), "#N");
    }

    #[test]
    fn string_branch_is_case_sensitive_and_retries() {
        let mut cns = console("YES yes");
        let dir = Director::branch_str(["yes", "no"], ["#Y", "#N"]).unwrap();
        assert_eq!(dir.resolve(&mut cns).unwrap(), "#Y");
    }
}
