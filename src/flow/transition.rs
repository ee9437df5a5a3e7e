//! Transition descriptors produced by handlers and applied by the flow.

use crate::core::{Payload, State, StateId};
use crate::flow::Flow;
use std::fmt;
use std::marker::PhantomData;

/// Kind of a completed transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Move to the target with a new payload
    Action,

    /// Move to the target with a new payload and overwrite the source payload
    Replying,

    /// Move back to the target, keeping its stored payload
    Back,
}

/// Errors that can occur while dispatching an action
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("Transition is missing for action {action} in state '{state}'. Register one with .for_state()")]
    TransitionMissing { state: StateId, action: String },
}

/// A completed transition out of state `F`.
///
/// Built by a handler through [`TransitionBuilder`] and consumed by the flow
/// when applied, so every transition is performed at most once.
///
/// [`TransitionBuilder`]: crate::builder::TransitionBuilder
pub struct Transition<F: State> {
    to: StateId,
    kind: TransitionKind,
    to_data: Option<Payload>,
    from_data: Option<Payload>,
    _from: PhantomData<fn() -> F>,
}

impl<F: State> Transition<F> {
    pub(crate) fn new(
        to: StateId,
        kind: TransitionKind,
        to_data: Option<Payload>,
        from_data: Option<Payload>,
    ) -> Self {
        Self {
            to,
            kind,
            to_data,
            from_data,
            _from: PhantomData,
        }
    }

    pub fn from(&self) -> StateId {
        StateId::of::<F>()
    }

    pub fn to(&self) -> StateId {
        self.to
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Check if the transition targets its own source state.
    pub fn is_stay(&self) -> bool {
        self.from() == self.to
    }

    /// Apply the transition to `flow`.
    ///
    /// The source payload (replying only) is written first, then the target
    /// payload and current state are set in one step.
    pub(crate) fn perform(self, flow: &mut Flow) {
        let from = self.from();
        match self.kind {
            TransitionKind::Action | TransitionKind::Back => {
                flow.set_current_state(self.to, self.to_data);
            }
            TransitionKind::Replying => {
                flow.set_state_data(from, self.from_data);
                flow.set_current_state(self.to, self.to_data);
            }
        }
    }
}

impl<F: State> fmt::Debug for Transition<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from())
            .field("to", &self.to)
            .field("kind", &self.kind)
            .finish()
    }
}
