//! Core state types and storage.
//!
//! This module contains the pieces the flow engine is built from:
//! - State definitions via the `State` trait and their `StateId` identity
//! - The sticky per-state payload store
//! - History of state changes

mod history;
mod state;
mod store;

pub use history::{StateHistory, StateTransition};
pub use state::{State, StateId};
pub use store::StateDataStore;

pub(crate) use store::{downcast, Payload};
