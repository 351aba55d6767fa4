//! Error types and the termination signal used by the menuflow runtime.
//!
//! This module defines three error enums and one control-flow signal:
//!
//! - [`ConfigError`] — mistakes made while wiring up the state machine
//!   (duplicate ids, malformed branch directors). Reported at registration
//!   or construction time, before `run` ever starts.
//! - [`RunError`] — fatal faults surfaced by [`Console::run`](crate::Console::run):
//!   a referenced state that was never registered, going back further than
//!   history allows, a broken input stream.
//! - [`StoreError`] — typed retrieval failures of the console's object store.
//! - [`Interrupt`] — **not** a reported error: the control-flow signal that
//!   unwinds from any call depth to the run-loop boundary. See below.
//!
//! All error enums provide `as_label()` for stable snake_case labels in
//! logs.

use thiserror::Error;

/// # Errors raised while defining the state machine.
///
/// These represent mistakes by the program author wiring up states and
/// directors. They are never retried and never reach the run loop: every
/// variant is produced by [`Console::define`](crate::Console::define) or a
/// [`Director`](crate::Director) constructor before execution begins.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A state id must be a non-empty string (it is the registry key).
    #[error("state id must be non-empty")]
    EmptyStateId,

    /// The id was already registered; the second registration has no effect.
    #[error("state {id:?} is already registered")]
    DuplicateState {
        /// The offending registry key.
        id: String,
    },

    /// An integer branch was built with `lo > hi`.
    #[error("invalid branch range: {lo} > {hi}")]
    InvalidRange {
        /// Lower bound (inclusive).
        lo: i64,
        /// Upper bound (inclusive).
        hi: i64,
    },

    /// A branch director's target list does not cover its input set.
    ///
    /// For an integer branch the target list must hold exactly
    /// `hi - lo + 1` ids; for a string branch, one id per allowed input.
    #[error("branch expects {expected} target ids, got {got}")]
    BranchArity {
        /// Number of targets the input set requires.
        expected: usize,
        /// Number of targets actually supplied.
        got: usize,
    },

    /// A string branch was built with no allowed inputs at all.
    ///
    /// Such a branch could never resolve: every read would be rejected and
    /// retried forever.
    #[error("string branch needs at least one allowed input")]
    EmptyBranch,
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use menuflow::ConfigError;
    ///
    /// let err = ConfigError::DuplicateState { id: "menu".into() };
    /// assert_eq!(err.as_label(), "duplicate_state");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::EmptyStateId => "empty_state_id",
            ConfigError::DuplicateState { .. } => "duplicate_state",
            ConfigError::InvalidRange { .. } => "invalid_range",
            ConfigError::BranchArity { .. } => "branch_arity",
            ConfigError::EmptyBranch => "empty_branch",
        }
    }
}

/// # Fatal faults surfaced by the run loop.
///
/// Every variant is a configuration bug or an unusable environment, not a
/// recoverable input problem: rejected user input never produces a
/// `RunError` (the requiring engine's policy handles it), and intentional
/// termination is not an error at all.
///
/// When `run` returns one of these, the exit and terminate hooks have
/// **not** been invoked; there is no cleanup guarantee beyond what the
/// caller wraps around `run` itself.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RunError {
    /// `run` was called on a console with no registered states and no
    /// explicitly set entry id.
    #[error("no entry state: nothing was registered")]
    NoEntryState,

    /// A director resolved to (or the entry pointed at) an id that was
    /// never registered.
    #[error("no state registered under id {id:?}")]
    UnknownState {
        /// The unresolvable id.
        id: String,
    },

    /// A `Back(n)` director asked for an ancestor older than the visited
    /// path holds.
    #[error("cannot go back {depth} states, history holds {len}")]
    HistoryUnderflow {
        /// Requested rewind depth.
        depth: usize,
        /// Visited-path length at resolution time.
        len: usize,
    },

    /// A string branch accepted an input that then matched none of its
    /// allowed inputs.
    ///
    /// The membership restrictor and the match scan share one input list,
    /// so this is unreachable unless that invariant is broken elsewhere.
    #[error("branch accepted input {input:?} but has no mapping for it")]
    BranchMismatch {
        /// The validated-but-unmapped input.
        input: String,
    },

    /// Typed retrieval from the object store failed inside an action.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The input stream itself is broken (not merely exhausted).
    #[error("input stream failure: {0}")]
    Io(#[from] std::io::Error),
}

impl RunError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RunError::NoEntryState => "no_entry_state",
            RunError::UnknownState { .. } => "unknown_state",
            RunError::HistoryUnderflow { .. } => "history_underflow",
            RunError::BranchMismatch { .. } => "branch_mismatch",
            RunError::Store(_) => "store",
            RunError::Io(_) => "io",
        }
    }
}

/// # Typed retrieval failures of the object store.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StoreError {
    /// Nothing is stored under the id.
    #[error("no value stored under {id:?}")]
    NotFound {
        /// The missing key.
        id: String,
    },

    /// A value exists but its concrete type differs from the requested one.
    #[error("value under {id:?} is {found}, not {expected}")]
    TypeMismatch {
        /// The key that was looked up.
        id: String,
        /// Type name the caller asked for.
        expected: &'static str,
        /// Type name recorded when the value was stored.
        found: &'static str,
    },
}

impl StoreError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "store_not_found",
            StoreError::TypeMismatch { .. } => "store_type_mismatch",
        }
    }
}

/// # Control-flow signal unwinding to the run-loop boundary.
///
/// `Interrupt` is the `Err` half of [`Flow`]. It is raised below the run
/// loop (inside an action, a director resolution, or the requiring engine)
/// and propagated with `?` until [`Console::run`](crate::Console::run)
/// catches it. It is caught at exactly that one place.
///
/// - [`Interrupt::Terminated`] is the *intentional termination signal*: a
///   clean, deliberate early stop (a `Terminate` failure policy fired, or
///   the input source ran out of data). It carries no payload. `run`
///   responds by invoking the terminate hook, then the exit hook, and
///   returns `Ok(())`.
/// - [`Interrupt::Fault`] shares the unwind path but is **not** termination:
///   `run` re-throws the inner [`RunError`] without invoking any hook.
///
/// Rejected user input never produces an `Interrupt` by itself; only the
/// configured failure policy decides whether a rejection retries, falls
/// back to a default, or terminates.
#[derive(Debug)]
pub enum Interrupt {
    /// Intentional early termination; the run ends cleanly.
    Terminated,
    /// Fatal fault; re-thrown out of `run` as-is.
    Fault(RunError),
}

impl From<RunError> for Interrupt {
    fn from(err: RunError) -> Self {
        Interrupt::Fault(err)
    }
}

impl From<StoreError> for Interrupt {
    fn from(err: StoreError) -> Self {
        Interrupt::Fault(RunError::Store(err))
    }
}

impl From<std::io::Error> for Interrupt {
    fn from(err: std::io::Error) -> Self {
        Interrupt::Fault(RunError::Io(err))
    }
}

/// Result alias threaded from producers, actions, and directors up to the
/// run-loop boundary.
///
/// Action bodies use `?` on every `read_*` / `require*` call and let the
/// signal pass through:
///
/// ```
/// use menuflow::{Console, Flow};
///
/// fn add(cns: &mut Console) -> Flow<()> {
///     let x = cns.read_i64("Enter number #1: ")?;
///     let y = cns.read_i64("Enter number #2: ")?;
///     cns.println(format_args!("{x} + {y} = {}", x + y));
///     Ok(())
/// }
/// ```
pub type Flow<T> = Result<T, Interrupt>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_labels_are_stable() {
        assert_eq!(ConfigError::EmptyStateId.as_label(), "empty_state_id");
        assert_eq!(
            ConfigError::BranchArity {
                expected: 4,
                got: 3
            }
            .as_label(),
            "branch_arity"
        );
    }

    #[test]
    fn run_error_displays_context() {
        let err = RunError::HistoryUnderflow { depth: 3, len: 2 };
        assert_eq!(err.to_string(), "cannot go back 3 states, history holds 2");
        assert_eq!(err.as_label(), "history_underflow");
    }

    #[test]
    fn store_error_converts_to_fault() {
        let interrupt: Interrupt = StoreError::NotFound { id: "sum".into() }.into();
        assert!(matches!(
            interrupt,
            Interrupt::Fault(RunError::Store(StoreError::NotFound { .. }))
        ));
    }
}
