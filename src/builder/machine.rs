//! Builder for constructing flows.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Payload, State, StateId};
use crate::flow::{Flow, Transition, TransitionHook, TransitionRegistry};
use std::any::Any;

const DEFAULT_NAME: &str = "flow";

/// Builder for constructing flows with a fluent API.
///
/// Every setter follows "last call wins": a second `start_with`,
/// `for_state` for the same state or `on_transition` silently replaces the
/// earlier one.
pub struct FlowBuilder {
    name: String,
    default_state: Option<(StateId, Option<Payload>)>,
    transitions: TransitionRegistry,
    on_transition: Option<TransitionHook>,
    record_history: bool,
}

impl FlowBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            default_state: None,
            transitions: TransitionRegistry::new(),
            on_transition: None,
            record_history: false,
        }
    }

    /// Name the flow in log records and errors.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the default state and its initial payload (required).
    ///
    /// `data` may be `None` to enter the state without a payload.
    pub fn start_with<S: State>(mut self, _state: S, data: impl Into<Option<S::Input>>) -> Self {
        let data = data.into().map(|data| Box::new(data) as Payload);
        self.default_state = Some((StateId::of::<S>(), data));
        self
    }

    /// Register the transition handler for `state`.
    ///
    /// The handler receives the transition builder, the payload stored for
    /// `state` and the dispatched action, and returns anything that
    /// completes into a transition.
    pub fn for_state<S, H, R>(mut self, _state: S, handler: H) -> Self
    where
        S: State,
        H: Fn(TransitionBuilder<S>, Option<&S::Input>, &S::Action) -> R + Send + 'static,
        R: Into<Transition<S>>,
    {
        self.transitions.register::<S>(Box::new(
            move |t: TransitionBuilder<S>,
                  data: Option<&S::Input>,
                  action: &S::Action|
                  -> Transition<S> { handler(t, data, action).into() },
        ));
        self
    }

    /// Set the hook run after every successful dispatch.
    pub fn on_transition<H>(mut self, hook: H) -> Self
    where
        H: Fn(&Flow, (StateId, StateId), &dyn Any) + Send + 'static,
    {
        self.on_transition = Some(Box::new(hook));
        self
    }

    /// Keep a [`StateHistory`] of every state change.
    ///
    /// [`StateHistory`]: crate::core::StateHistory
    pub fn record_history(mut self) -> Self {
        self.record_history = true;
        self
    }

    /// Build the flow and enter its default state.
    /// Returns an error if no default state was set.
    pub fn build(self) -> Result<Flow, BuildError> {
        let (state, data) = self
            .default_state
            .ok_or_else(|| BuildError::DefaultStateMissing {
                flow: self.name.clone(),
            })?;

        Ok(Flow::start(
            self.name,
            state,
            data,
            self.transitions,
            self.on_transition,
            self.record_history,
        ))
    }
}

impl Default for FlowBuilder {
    fn default() -> Self {
        Self::new()
    }
}
