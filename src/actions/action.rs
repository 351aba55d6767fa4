//! # Action trait.
//!
//! An action is the side-effecting half of a state: it runs once per visit,
//! before the state's director is resolved. It receives the console and may
//! print, read validated input, and use the object store. The common handle
//! type is [`ActionRef`], an `Rc<dyn Action>`; the run loop is strictly
//! single-threaded, so a non-atomic handle is the honest choice.

use std::rc::Rc;

use crate::core::Console;
use crate::error::Flow;

/// # Side-effecting unit executed on every visit to its state.
///
/// Implementations must not assume anything about what ran before or after,
/// beyond what the visited path and the object store tell them.
///
/// # Example
/// ```
/// use menuflow::{Action, Console, Flow};
///
/// struct Greet;
///
/// impl Action for Greet {
///     fn call(&self, cns: &mut Console) -> Flow<()> {
///         cns.println("Hello please choose an option:");
///         Ok(())
///     }
/// }
/// ```
pub trait Action: 'static {
    /// Executes the action against the console.
    ///
    /// Propagate the results of `read_*`/`require*` calls with `?` so the
    /// termination signal can unwind to the run loop.
    fn call(&self, cns: &mut Console) -> Flow<()>;
}

/// Shared handle to an action, as stored in the registry.
pub type ActionRef = Rc<dyn Action>;
