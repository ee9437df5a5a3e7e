//! Registry of per-state transition handlers.

use crate::builder::TransitionBuilder;
use crate::core::{downcast, State, StateId};
use crate::flow::Transition;
use std::any::Any;
use std::collections::HashMap;
use tracing::debug;

/// Handler registered for state `S`.
///
/// Receives the builder for transitions out of `S`, the payload stored for
/// `S` (if any) and the dispatched action.
pub type Handler<S> = Box<
    dyn Fn(TransitionBuilder<S>, Option<&<S as State>::Input>, &<S as State>::Action) -> Transition<S>
        + Send,
>;

/// Mapping from state identity to its transition handler.
///
/// At most one handler exists per state; registering again replaces the
/// previous one.
#[derive(Default)]
pub struct TransitionRegistry {
    handlers: HashMap<StateId, Box<dyn Any + Send>>,
}

impl TransitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `S`, replacing any earlier one.
    pub fn register<S: State>(&mut self, handler: Handler<S>) {
        let state = StateId::of::<S>();
        if self.handlers.insert(state, Box::new(handler)).is_some() {
            debug!(%state, "replaced transition handler");
        }
    }

    /// Handler registered for `S`, if any.
    pub fn lookup<S: State>(&self) -> Option<&Handler<S>> {
        self.handlers
            .get(&StateId::of::<S>())
            .and_then(|handler| downcast::<Handler<S>>(handler.as_ref()))
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.handlers.contains_key(&state)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for TransitionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}
