//! # Failure policies for value acquisition.
//!
//! [`FailurePolicy`] decides what the requiring engine does when one
//! acquisition attempt is rejected (the token did not parse, or the
//! restrictor turned the parsed value down).
//!
//! - [`FailurePolicy::RetryForever`] re-prompts and reads again, with no
//!   attempt limit.
//! - [`FailurePolicy::UseDefault`] substitutes a caller-chosen value after
//!   the first rejection — no retry, no extra message.
//! - [`FailurePolicy::Terminate`] prints a message and raises the
//!   intentional-termination signal.
//!
//! ## Choosing the right policy
//!
//! **Menu navigation** (a branch with no valid answer could never resolve):
//! ```text
//! FailurePolicy::RetryForever   → always used by branch directors
//! ```
//!
//! **Optional settings** (a bad answer just means "keep the default"):
//! ```text
//! FailurePolicy::UseDefault
//! ```
//!
//! **Non-interactive / piped input** (a bad answer means the script is
//! wrong, stop cleanly):
//! ```text
//! FailurePolicy::Terminate
//! ```
//!
//! Exhausted input is *not* a rejection: it terminates the run under every
//! policy, including `UseDefault`.

/// Policy applied by the requiring engine when an attempt is rejected.
#[derive(Clone, Debug)]
pub enum FailurePolicy<T> {
    /// Print the prompt (verbatim, no added newline) and read again,
    /// indefinitely.
    RetryForever {
        /// Re-prompt written before every further attempt; skipped if empty.
        prompt: String,
    },
    /// Return `value` immediately on the first rejection.
    UseDefault {
        /// The substitute value.
        value: T,
    },
    /// Print the message, then raise the intentional-termination signal.
    Terminate {
        /// Farewell line written before terminating; skipped if empty.
        message: String,
    },
}
