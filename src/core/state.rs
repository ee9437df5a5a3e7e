//! Core State trait and state identity.
//!
//! A state is a Rust type. Its identity is the type itself, so two values of
//! the same state type always name the same node of the machine. The payload
//! stored while the machine is resident in a state and the actions the state
//! accepts are fixed by the trait's associated types.

use crate::flow::{Flow, TransitionError};
use serde::{Serialize, Serializer};
use std::any::{type_name, TypeId};
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};

/// Trait for flow states.
///
/// States are usually zero-sized unit structs (see [`flow_state!`]). They are
/// compared by identity only: the payload lives in the flow's data store,
/// never in the state value.
///
/// # Associated Types
///
/// - `Input`: payload stored for this state while the machine visits it
/// - `Action`: events this state accepts through dispatch
///
/// # Example
///
/// ```rust
/// use flowset::core::{State, StateId};
///
/// #[derive(Debug, Clone, Copy)]
/// struct Editing;
///
/// #[derive(Debug)]
/// enum EditingAction {
///     Save,
///     Discard,
/// }
///
/// impl State for Editing {
///     type Input = String;
///     type Action = EditingAction;
/// }
///
/// assert_eq!(Editing.id(), StateId::of::<Editing>());
/// assert_eq!(Editing.id().name(), "Editing");
/// ```
///
/// [`flow_state!`]: crate::flow_state
pub trait State: 'static {
    /// Payload stored for this state.
    type Input: Send + 'static;

    /// Events accepted by this state.
    type Action: Debug + 'static;

    /// Identity of this state.
    fn id(&self) -> StateId
    where
        Self: Sized,
    {
        StateId::of::<Self>()
    }

    /// Payload last stored for this state in `flow`, if any.
    ///
    /// The data is sticky: it survives visits to other states until a new
    /// value is stored for this state.
    fn data<'f>(&self, flow: &'f Flow) -> Option<&'f Self::Input>
    where
        Self: Sized,
    {
        flow.store().get::<Self>()
    }

    /// Dispatch `action` to `flow` on behalf of this state.
    ///
    /// Returns `Ok(false)` when this state is no longer the flow's current
    /// state.
    fn dispatch_action(&self, flow: &mut Flow, action: Self::Action) -> Result<bool, TransitionError>
    where
        Self: Sized,
    {
        flow.dispatch_as::<Self>(action)
    }
}

/// Stable identity of a state type.
///
/// Equality and hashing use the state's `TypeId`; the name is only carried
/// for display and logging.
#[derive(Clone, Copy)]
pub struct StateId {
    type_id: TypeId,
    name: &'static str,
}

impl StateId {
    /// Identity of the state type `S`.
    pub fn of<S: State>() -> Self {
        Self {
            type_id: TypeId::of::<S>(),
            name: short_type_name(type_name::<S>()),
        }
    }

    /// Check whether this identity belongs to the state type `S`.
    pub fn is<S: State>(&self) -> bool {
        self.type_id == TypeId::of::<S>()
    }

    /// Short name of the state type, without its module path.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Strip the module path, keeping generic arguments out of the name.
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

impl PartialEq for StateId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for StateId {}

impl Hash for StateId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateId({})", self.name)
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for StateId {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.serialize_str(self.name)
    }
}
