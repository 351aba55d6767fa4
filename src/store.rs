//! # Typed key-value store attached to the console.
//!
//! [`ObjectStore`] lets actions pass data to later states without global
//! variables: one state computes a value and `put`s it, a later state
//! `get`s it back by id with the expected type. Retrieval is checked:
//! asking for the wrong type reports both the expected and the stored type
//! name instead of handing back a wrong value.
//!
//! ## Example
//! ```
//! use menuflow::ObjectStore;
//!
//! let mut store = ObjectStore::new();
//! store.put("attempts", 3_u32);
//! assert_eq!(*store.get::<u32>("attempts").unwrap(), 3);
//! assert!(store.get::<String>("attempts").is_err()); // type mismatch
//! ```

use std::any::{Any, type_name};
use std::collections::HashMap;

use crate::error::StoreError;

/// One stored value plus the type name recorded at insert time.
struct Entry {
    type_name: &'static str,
    value: Box<dyn Any>,
}

/// String-keyed store of arbitrarily typed values.
///
/// Owned by the console for its whole lifetime; actions reach it through
/// [`Console::store`](crate::Console::store) and
/// [`Console::store_mut`](crate::Console::store_mut).
#[derive(Default)]
pub struct ObjectStore {
    entries: HashMap<String, Entry>,
}

impl ObjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `id`, replacing any previous value.
    pub fn put<T: Any>(&mut self, id: impl Into<String>, value: T) {
        self.entries.insert(
            id.into(),
            Entry {
                type_name: type_name::<T>(),
                value: Box::new(value),
            },
        );
    }

    /// Returns a reference to the value stored under `id`.
    ///
    /// Fails with [`StoreError::NotFound`] if nothing is stored there, or
    /// [`StoreError::TypeMismatch`] if the stored value is not a `T`.
    pub fn get<T: Any>(&self, id: &str) -> Result<&T, StoreError> {
        let entry = self.entries.get(id).ok_or_else(|| StoreError::NotFound {
            id: id.to_owned(),
        })?;
        entry
            .value
            .downcast_ref::<T>()
            .ok_or(StoreError::TypeMismatch {
                id: id.to_owned(),
                expected: type_name::<T>(),
                found: entry.type_name,
            })
    }

    /// Removes and returns the value stored under `id`.
    ///
    /// On a type mismatch the value stays in the store.
    pub fn take<T: Any>(&mut self, id: &str) -> Result<T, StoreError> {
        // Probe first so a mismatch does not destroy the entry.
        self.get::<T>(id)?;
        let entry = self.entries.remove(id).ok_or_else(|| StoreError::NotFound {
            id: id.to_owned(),
        })?;
        entry
            .value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| StoreError::TypeMismatch {
                id: id.to_owned(),
                expected: type_name::<T>(),
                found: entry.type_name,
            })
    }

    /// Removes the value under `id`; returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Removes every stored value.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns whether a value is stored under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
