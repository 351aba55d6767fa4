//! # Function-backed action (`ActionFn`)
//!
//! [`ActionFn`] wraps a closure `F: Fn(&mut Console) -> Flow<()>` so plain
//! functions and closures can be registered without hand-writing an
//! [`Action`] impl. State shared between visits belongs in the console's
//! object store, not in the closure.

use std::rc::Rc;

use crate::actions::action::{Action, ActionRef};
use crate::core::Console;
use crate::error::Flow;

/// Function-backed action implementation.
///
/// ## Example
/// ```
/// use menuflow::{ActionFn, ActionRef, Console, Flow};
///
/// let hello: ActionRef = ActionFn::rc(|cns: &mut Console| {
///     cns.println("hello");
///     Ok(())
/// });
/// ```
pub struct ActionFn<F> {
    f: F,
}

impl<F> ActionFn<F>
where
    F: Fn(&mut Console) -> Flow<()> + 'static,
{
    /// Creates a new function-backed action.
    ///
    /// Prefer [`ActionFn::rc`] when you immediately need an [`ActionRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the action and returns it as a shared handle (`Rc<dyn Action>`).
    pub fn rc(f: F) -> ActionRef {
        Rc::new(Self::new(f))
    }
}

impl<F> Action for ActionFn<F>
where
    F: Fn(&mut Console) -> Flow<()> + 'static,
{
    fn call(&self, cns: &mut Console) -> Flow<()> {
        (self.f)(cns)
    }
}
