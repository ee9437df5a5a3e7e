//! Builder API for ergonomic flow construction.
//!
//! This module provides the fluent [`FlowBuilder`], the staged transition
//! builders handed to every handler, and the [`flow_state!`] macro for
//! declaring states with minimal boilerplate.
//!
//! [`flow_state!`]: crate::flow_state

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::FlowBuilder;
pub use transition::{
    ActionTransition, BackTransition, EmptyTransition, ReplyingTransition, TransitionBuilder,
};
