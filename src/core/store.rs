//! Per-state payload storage.
//!
//! Payloads of unrelated types live side by side, erased behind `dyn Any`
//! and keyed by [`StateId`]. Reads recover the concrete type through
//! [`downcast`], the only place in the crate where an erased value is cast
//! back.

use super::state::{State, StateId};
use std::any::Any;
use std::collections::HashMap;

/// Type-erased value owned by the flow.
pub(crate) type Payload = Box<dyn Any + Send>;

/// Recover the concrete type of an erased value.
///
/// Keys are derived from the state type and values are inserted through
/// typed entry points only, so a mismatch here means a crate bug rather than
/// a caller error; it surfaces as `None`.
pub(crate) fn downcast<T: 'static>(value: &(dyn Any + Send)) -> Option<&T> {
    value.downcast_ref::<T>()
}

/// Mapping from state identity to the payload last stored for it.
///
/// The store is sticky: a present value stays until another present value
/// replaces it, and writing `None` leaves any existing entry untouched.
///
/// # Example
///
/// ```rust
/// use flowset::core::{State, StateDataStore};
///
/// #[derive(Debug, Clone, Copy)]
/// struct Draft;
///
/// impl State for Draft {
///     type Input = String;
///     type Action = ();
/// }
///
/// let mut store = StateDataStore::new();
/// assert!(store.get::<Draft>().is_none());
///
/// store.put::<Draft>(Some("hello".to_string()));
/// store.put::<Draft>(None);
/// assert_eq!(store.get::<Draft>().map(String::as_str), Some("hello"));
/// ```
#[derive(Default)]
pub struct StateDataStore {
    entries: HashMap<StateId, Payload>,
}

impl StateDataStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload last stored for `S`, if any.
    pub fn get<S: State>(&self) -> Option<&S::Input> {
        self.entries
            .get(&StateId::of::<S>())
            .and_then(|payload| downcast::<S::Input>(payload.as_ref()))
    }

    /// Store `data` for `S`. `None` is a no-op.
    pub fn put<S: State>(&mut self, data: Option<S::Input>) {
        if let Some(data) = data {
            self.entries.insert(StateId::of::<S>(), Box::new(data));
        }
    }

    /// Store an already erased payload. Callers guarantee it holds
    /// `S::Input` for the state identified by `state`.
    pub(crate) fn put_payload(&mut self, state: StateId, data: Option<Payload>) {
        if let Some(data) = data {
            self.entries.insert(state, data);
        }
    }

    /// Check whether any payload was ever stored for `state`.
    pub fn contains(&self, state: StateId) -> bool {
        self.entries.contains_key(&state)
    }

    /// Number of states with a stored payload.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no payload was stored yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for StateDataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
