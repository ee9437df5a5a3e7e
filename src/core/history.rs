//! State transition history tracking.
//!
//! Records every move between two distinct states so hosts can inspect or
//! export the path a flow took.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Record of a single state change.
///
/// Only moves between two distinct states are recorded; a dispatch that
/// stays in place never produces one.
///
/// # Example
///
/// ```rust
/// use flowset::core::{State, StateTransition};
/// use chrono::Utc;
///
/// #[derive(Debug, Clone, Copy)]
/// struct Pending;
/// #[derive(Debug, Clone, Copy)]
/// struct Running;
///
/// impl State for Pending {
///     type Input = ();
///     type Action = ();
/// }
/// impl State for Running {
///     type Input = ();
///     type Action = ();
/// }
///
/// let transition = StateTransition {
///     from: Pending.id(),
///     to: Running.id(),
///     timestamp: Utc::now(),
/// };
/// assert!(transition.from.is::<Pending>());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StateTransition {
    /// The state being left
    pub from: StateId,
    /// The state being entered
    pub to: StateId,
    /// When the change was applied
    pub timestamp: DateTime<Utc>,
}

impl StateTransition {
    /// Record a change from `from` to `to` happening now.
    pub fn now(from: StateId, to: StateId) -> Self {
        Self {
            from,
            to,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of state changes.
///
/// `record` consumes the history and hands back the extended one, so a
/// history value is never mutated behind a shared reference.
///
/// # Example
///
/// ```rust
/// use flowset::core::{State, StateHistory, StateTransition};
///
/// #[derive(Debug, Clone, Copy)]
/// struct Start;
/// #[derive(Debug, Clone, Copy)]
/// struct Middle;
/// #[derive(Debug, Clone, Copy)]
/// struct End;
///
/// impl State for Start {
///     type Input = ();
///     type Action = ();
/// }
/// impl State for Middle {
///     type Input = ();
///     type Action = ();
/// }
/// impl State for End {
///     type Input = ();
///     type Action = ();
/// }
///
/// let history = StateHistory::new()
///     .record(StateTransition::now(Start.id(), Middle.id()))
///     .record(StateTransition::now(Middle.id(), End.id()));
///
/// let path = history.get_path();
/// assert_eq!(path, vec![Start.id(), Middle.id(), End.id()]);
/// ```
#[derive(Clone, Debug, Default, Serialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition, returning the extended history.
    pub fn record(mut self, transition: StateTransition) -> Self {
        self.transitions.push(transition);
        self
    }

    pub(crate) fn push(&mut self, transition: StateTransition) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` of the first transition followed by the `to` of
    /// every transition. Empty when nothing was recorded.
    pub fn get_path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Number of times `state` was entered.
    pub fn visits(&self, state: StateId) -> usize {
        self.transitions.iter().filter(|t| t.to == state).count()
    }

    /// Get all transitions in order.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
