//! # Dispatch Errors
//!
//! Failures that stop a dispatch. Faults inside an action's own operation are not errors here:
//! they are contained by the executor and reported as an `ExecutionOutcome::Failure`.

use thiserror::Error;

use crate::strings::messages;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// No registered action shares a word with the prompt.
    #[error("{}", messages::NO_MATCH)]
    NoMatch,

    /// A lookup named an action the registry does not know.
    #[error("{}", messages::unknown_action(.0))]
    UnknownAction(String),

    /// A fault escaped the executor's containment.
    #[error("{}", messages::execution_error(.message))]
    Internal { action: String, message: String },
}

impl DispatchError {
    /// Client-side "not found" as opposed to a server fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DispatchError::NoMatch | DispatchError::UnknownAction(_))
    }
}
