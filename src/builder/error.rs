//! Build errors for flows.

use thiserror::Error;

/// Errors that can occur when building a flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("Default state is missing for flow '{flow}'. Call .start_with(state, data) before .build()")]
    DefaultStateMissing { flow: String },
}
