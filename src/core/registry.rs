//! # State registry.
//!
//! Id-keyed map of state definitions. Registration is the only mutation:
//! states are never replaced or removed during a run, so the run loop can
//! hand out cheap `Rc` clones of a definition and keep the console free
//! for the action to borrow mutably.
//!
//! ## Rules
//! - Ids are unique; re-registering an id fails and leaves the registry
//!   untouched.
//! - Ids are non-empty (they are the only way to reference a state).
//! - The first successful registration is reported so the console can
//!   adopt it as the implicit entry state.

use std::collections::HashMap;
use std::rc::Rc;

use crate::actions::ActionRef;
use crate::director::Director;
use crate::error::ConfigError;

/// One registered state: optional action plus the transition rule.
pub(crate) struct StateDef {
    /// Action run once per visit; `None` is a no-op.
    pub action: Option<ActionRef>,
    /// Rule deciding what happens after the action.
    pub director: Director,
}

/// Id-keyed set of state definitions.
#[derive(Default)]
pub(crate) struct Registry {
    states: HashMap<String, Rc<StateDef>>,
}

impl Registry {
    /// Inserts a new state definition.
    ///
    /// Returns `true` when this was the first state ever registered.
    pub fn insert(
        &mut self,
        id: String,
        action: Option<ActionRef>,
        director: Director,
    ) -> Result<bool, ConfigError> {
        if id.is_empty() {
            return Err(ConfigError::EmptyStateId);
        }
        if self.states.contains_key(&id) {
            return Err(ConfigError::DuplicateState { id });
        }

        let first = self.states.is_empty();
        self.states.insert(id, Rc::new(StateDef { action, director }));
        Ok(first)
    }

    /// Looks up a state definition by id.
    pub fn get(&self, id: &str) -> Option<Rc<StateDef>> {
        self.states.get(id).cloned()
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insert_is_flagged() {
        let mut reg = Registry::default();
        assert!(reg.insert("a".into(), None, Director::exit()).unwrap());
        assert!(!reg.insert("b".into(), None, Director::exit()).unwrap());
    }

    #[test]
    fn duplicate_id_is_rejected_without_effect() {
        let mut reg = Registry::default();
        reg.insert("menu".into(), None, Director::exit()).unwrap();
        let err = reg
            .insert("menu".into(), None, Director::next("other"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateState { .. }));
        assert_eq!(reg.len(), 1);
        // The original definition survived.
        assert!(matches!(
            reg.get("menu").unwrap().director,
            Director::Exit
        ));
    }

    #[test]
    fn empty_id_is_rejected() {
        let mut reg = Registry::default();
        let err = reg.insert(String::new(), None, Director::exit()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyStateId));
    }

    #[test]
    fn lookup_misses_return_none() {
        let reg = Registry::default();
        assert!(reg.get("ghost").is_none());
    }
}
