//! Flowset: a typed finite state machine engine
//!
//! Each state is a Rust type with its own payload type and action type. A
//! flow stores the last payload of every state it visited, dispatches
//! actions to the handler of the current state, applies the transition the
//! handler describes and notifies observers.
//!
//! # Core Concepts
//!
//! - **State**: a type implementing [`State`], usually declared with [`flow_state!`]
//! - **Sticky payloads**: per-state data that survives visits to other states
//! - **Transitions**: built in stages by handlers (`goto`, `using`,
//!   `replying`, `go_back_to`, `stay`) so a target never misses its payload
//! - **Listeners**: state-change and transition observers with removable handles
//!
//! # Example
//!
//! ```rust
//! use flowset::{flow_state, Flow, Transition};
//!
//! #[derive(Debug)]
//! pub enum SearchAction {
//!     Query(String),
//! }
//!
//! #[derive(Debug)]
//! pub enum ResultsAction {
//!     Refine(usize),
//!     Back,
//! }
//!
//! flow_state! {
//!     pub struct Search: String => SearchAction;
//!     pub struct Results: usize => ResultsAction;
//! }
//!
//! let mut flow = Flow::builder()
//!     .named("search")
//!     .start_with(Search, String::new())
//!     .for_state(Search, |t, _, action: &SearchAction| match action {
//!         SearchAction::Query(q) => t.goto(Results).using(q.len()).replying(q.clone()),
//!     })
//!     .for_state(Results, |t, _, action: &ResultsAction| -> Transition<Results> {
//!         match action {
//!             ResultsAction::Refine(count) => t.stay().using(*count).into(),
//!             ResultsAction::Back => t.go_back_to(Search).into(),
//!         }
//!     })
//!     .build()?;
//!
//! flow.dispatch(Search, SearchAction::Query("rust".to_string()))?;
//! flow.dispatch(Results, ResultsAction::Back)?;
//!
//! assert!(flow.is_in(Search));
//! assert_eq!(flow.data(Search).map(String::as_str), Some("rust"));
//! assert_eq!(flow.data(Results), Some(&4));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod flow;

// Re-export commonly used types
pub use crate::builder::{BuildError, FlowBuilder, TransitionBuilder};
pub use crate::core::{State, StateDataStore, StateHistory, StateId, StateTransition};
pub use crate::flow::{Flow, ListenerId, Transition, TransitionError, TransitionKind};
