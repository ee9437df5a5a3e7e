//! Ordered observer lists addressed by subscription handles.

use crate::core::{StateId, StateTransition};
use crate::flow::Flow;
use std::fmt;

/// Observer of every assignment of the flow's current state.
pub type StateChangeListener = Box<dyn FnMut(StateId, &Flow) + Send>;

/// Observer of moves between two distinct states.
pub type TransitionListener = Box<dyn FnMut(&StateTransition, &Flow) + Send>;

/// Handle returned when a listener is added, used to remove it again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listeners kept in registration order.
///
/// Handles are never reused, so removing with a stale handle is a no-op.
pub(crate) struct ListenerRegistry<L> {
    entries: Vec<(ListenerId, L)>,
    next_id: u64,
}

impl<L> ListenerRegistry<L> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn add(&mut self, listener: L) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut L> {
        self.entries.iter_mut().map(|(_, listener)| listener)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<L> Default for ListenerRegistry<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> fmt::Debug for ListenerRegistry<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, _)| id))
            .finish()
    }
}
