//! Running flow: current state, dispatch and notification.

use crate::builder::{FlowBuilder, TransitionBuilder};
use crate::core::{Payload, State, StateDataStore, StateHistory, StateId, StateTransition};
use crate::flow::listeners::{
    ListenerId, ListenerRegistry, StateChangeListener, TransitionListener,
};
use crate::flow::registry::TransitionRegistry;
use crate::flow::transition::TransitionError;
use std::any::Any;
use std::fmt;
use tracing::{debug, trace};

/// Single hook run after every successful dispatch, including dispatches
/// that stay in the same state. Receives `(previous, current)` and the
/// dispatched action.
pub type TransitionHook = Box<dyn Fn(&Flow, (StateId, StateId), &dyn Any) + Send>;

/// A running state machine.
///
/// Built once by [`FlowBuilder`]; the transition table is fixed from then
/// on. All mutation goes through `&mut self`, while handlers, listeners and
/// the hook only ever see `&Flow`, so dispatching from inside a callback
/// does not compile.
///
/// # Example
///
/// ```rust
/// use flowset::{flow_state, Flow};
///
/// #[derive(Debug)]
/// pub struct Submit(pub u32);
///
/// flow_state! {
///     pub struct Entering: String => Submit;
///     pub struct Confirming: u32 => ();
/// }
///
/// let mut flow = Flow::builder()
///     .start_with(Entering, "draft".to_string())
///     .for_state(Entering, |t, _, action: &Submit| t.goto(Confirming).using(action.0))
///     .build()?;
///
/// assert!(flow.dispatch(Entering, Submit(5))?);
/// assert!(flow.is_in(Confirming));
/// assert_eq!(flow.data(Confirming), Some(&5));
///
/// // Entering is no longer current, so this dispatch is ignored.
/// assert!(!flow.dispatch(Entering, Submit(6))?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Flow {
    name: String,
    store: StateDataStore,
    transitions: TransitionRegistry,
    current: StateId,
    state_listeners: ListenerRegistry<StateChangeListener>,
    transition_listeners: ListenerRegistry<TransitionListener>,
    on_transition: Option<TransitionHook>,
    history: Option<StateHistory>,
}

impl Flow {
    /// Start configuring a new flow.
    pub fn builder() -> FlowBuilder {
        FlowBuilder::new()
    }

    /// Enter the default state. Only reachable through `FlowBuilder::build`.
    pub(crate) fn start(
        name: String,
        default_state: StateId,
        default_data: Option<Payload>,
        transitions: TransitionRegistry,
        on_transition: Option<TransitionHook>,
        record_history: bool,
    ) -> Self {
        let mut flow = Self {
            name,
            store: StateDataStore::new(),
            transitions,
            current: default_state,
            state_listeners: ListenerRegistry::new(),
            transition_listeners: ListenerRegistry::new(),
            on_transition,
            history: record_history.then(StateHistory::new),
        };
        flow.set_current_state(default_state, default_data);
        debug!(flow = %flow.name, state = %flow.current, "flow started");
        flow
    }

    /// Name used in log records.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Check whether `state` is the current state.
    pub fn is_in<S: State>(&self, _state: S) -> bool {
        self.current.is::<S>()
    }

    /// Payload last stored for `state`, if any.
    pub fn data<S: State>(&self, _state: S) -> Option<&S::Input> {
        self.store.get::<S>()
    }

    pub fn store(&self) -> &StateDataStore {
        &self.store
    }

    /// Recorded state changes, when enabled with
    /// [`FlowBuilder::record_history`].
    pub fn history(&self) -> Option<&StateHistory> {
        self.history.as_ref()
    }

    /// Dispatch `action` to `state`.
    ///
    /// Returns `Ok(false)` without touching anything when `state` is not the
    /// current state. Otherwise runs the state's handler, applies the
    /// resulting transition, notifies listeners and the hook, and returns
    /// `Ok(true)`.
    ///
    /// # Errors
    ///
    /// [`TransitionError::TransitionMissing`] when no handler was registered
    /// for `state`. The flow is left unchanged.
    pub fn dispatch<S: State>(&mut self, _state: S, action: S::Action) -> Result<bool, TransitionError> {
        self.dispatch_as::<S>(action)
    }

    pub(crate) fn dispatch_as<S: State>(&mut self, action: S::Action) -> Result<bool, TransitionError> {
        let state = StateId::of::<S>();
        if state != self.current {
            debug!(
                flow = %self.name,
                %state,
                current = %self.current,
                ?action,
                "ignoring dispatch from stale state"
            );
            return Ok(false);
        }

        let Some(handler) = self.transitions.lookup::<S>() else {
            return Err(TransitionError::TransitionMissing {
                state,
                action: format!("{action:?}"),
            });
        };
        let transition = handler(TransitionBuilder::new(), self.store.get::<S>(), &action);

        let previous = self.current;
        let kind = transition.kind();
        transition.perform(self);
        let current = self.current;
        debug!(flow = %self.name, from = %previous, to = %current, ?kind, ?action, "dispatched");

        if previous != current {
            let record = StateTransition::now(previous, current);
            if let Some(history) = self.history.as_mut() {
                history.push(record);
            }
            self.notify_transition(&record);
        }

        if let Some(hook) = &self.on_transition {
            hook(&*self, (previous, current), &action as &dyn Any);
        }

        Ok(true)
    }

    /// Add a listener for every assignment of the current state.
    ///
    /// The listener is invoked once right away with the current state.
    pub fn add_state_change_listener<L>(&mut self, listener: L) -> ListenerId
    where
        L: FnMut(StateId, &Flow) + Send + 'static,
    {
        let mut listener: StateChangeListener = Box::new(listener);
        listener(self.current, &*self);
        self.state_listeners.add(listener)
    }

    /// Remove a state-change listener. Returns `false` if it was not
    /// registered.
    pub fn remove_state_change_listener(&mut self, id: ListenerId) -> bool {
        self.state_listeners.remove(id)
    }

    /// Add a listener for moves between two distinct states.
    pub fn add_transition_listener<L>(&mut self, listener: L) -> ListenerId
    where
        L: FnMut(&StateTransition, &Flow) + Send + 'static,
    {
        self.transition_listeners.add(Box::new(listener))
    }

    /// Remove a transition listener. Returns `false` if it was not
    /// registered.
    pub fn remove_transition_listener(&mut self, id: ListenerId) -> bool {
        self.transition_listeners.remove(id)
    }

    pub(crate) fn set_state_data(&mut self, state: StateId, data: Option<Payload>) {
        self.store.put_payload(state, data);
    }

    /// Store `data` for `state`, make it current and notify state-change
    /// listeners.
    pub(crate) fn set_current_state(&mut self, state: StateId, data: Option<Payload>) {
        self.store.put_payload(state, data);
        self.current = state;

        // Listeners only get `&Flow`, so none of them can touch the list
        // while it is taken out.
        let mut listeners = std::mem::take(&mut self.state_listeners);
        trace!(flow = %self.name, %state, listeners = listeners.len(), "notifying state change");
        for listener in listeners.iter_mut() {
            listener(state, &*self);
        }
        self.state_listeners = listeners;
    }

    fn notify_transition(&mut self, transition: &StateTransition) {
        let mut listeners = std::mem::take(&mut self.transition_listeners);
        trace!(
            flow = %self.name,
            from = %transition.from,
            to = %transition.to,
            listeners = listeners.len(),
            "notifying transition"
        );
        for listener in listeners.iter_mut() {
            listener(transition, &*self);
        }
        self.transition_listeners = listeners;
    }
}

impl fmt::Debug for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flow")
            .field("name", &self.name)
            .field("current", &self.current)
            .field("store", &self.store)
            .field("transitions", &self.transitions)
            .field("state_listeners", &self.state_listeners)
            .field("transition_listeners", &self.transition_listeners)
            .field("on_transition", &self.on_transition.is_some())
            .field("history", &self.history.as_ref().map(StateHistory::len))
            .finish()
    }
}
