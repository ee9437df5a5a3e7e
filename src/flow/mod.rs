//! The flow engine.
//!
//! This module is where actions turn into state changes:
//!
//! - **Registry**: one transition handler per state
//! - **Transitions**: completed descriptors, performed exactly once
//! - **Flow**: dispatch, state/data mutation and listener notification
//! - **Listeners**: ordered observers removed through `ListenerId` handles
//!
//! # Notification order
//!
//! For a single dispatch all payload writes and the current-state update
//! happen first. State-change listeners then run for the new current state
//! (even when it did not change), transition listeners run only when the
//! state identity changed, and finally the optional hook runs.

mod listeners;
mod machine;
mod registry;
mod transition;

pub use listeners::{ListenerId, StateChangeListener, TransitionListener};
pub use machine::{Flow, TransitionHook};
pub use registry::{Handler, TransitionRegistry};
pub use transition::{Transition, TransitionError, TransitionKind};
