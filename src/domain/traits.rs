//! # Domain Traits
//!
//! Abstract interfaces for the components that touch the host system.
//! Allows for pluggable implementations in the Infrastructure layer (and stubs in tests).

use async_trait::async_trait;

use crate::domain::types::{Action, Parameters};

/// Performs the operation behind an action.
///
/// Implementations may fail freely; the executor turns any error into a failure outcome.
#[async_trait]
pub trait ActionRunner: Send + Sync {
    /// Run the action with the parameters bound from the prompt, returning a short report.
    async fn run(&self, action: &Action, parameters: &Parameters) -> anyhow::Result<String>;
}
