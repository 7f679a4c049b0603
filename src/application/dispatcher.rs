//! # Dispatcher
//!
//! One prompt in, one result out: match, render, record, execute, respond.
//!
//! An unmatched prompt stops at the first step with `DispatchError::NoMatch`. A matched prompt
//! always produces a `DispatchResult`, whether or not the action's own operation succeeded;
//! only a fault that escapes the executor turns into a dispatch error.

use std::sync::Arc;

use crate::application::codegen;
use crate::application::context::ContextBuffer;
use crate::application::executor::Executor;
use crate::application::matcher;
use crate::application::parameters::bind_parameters;
use crate::application::registry::ActionRegistry;
use crate::domain::config::RecordPolicy;
use crate::domain::error::DispatchError;
use crate::domain::types::{
    Action, ContextSnapshot, DispatchEvent, DispatchRequest, DispatchResult, ExecutionOutcome,
    Parameters,
};

pub struct Dispatcher {
    registry: Arc<ActionRegistry>,
    executor: Executor,
    context: Arc<ContextBuffer>,
    policy: RecordPolicy,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<ActionRegistry>,
        executor: Executor,
        context: Arc<ContextBuffer>,
    ) -> Self {
        Self {
            registry,
            executor,
            context,
            policy: RecordPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RecordPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Current context history, oldest first.
    pub async fn context(&self) -> Vec<DispatchEvent> {
        self.context.snapshot().await
    }

    pub async fn dispatch(&self, request: &DispatchRequest) -> Result<DispatchResult, DispatchError> {
        let prompt = request.prompt.as_str();

        let Some(name) = matcher::best_match(&self.registry, prompt) else {
            tracing::info!("No action matched prompt '{}'", prompt);
            if self.policy == RecordPolicy::All {
                self.context.record(DispatchEvent::new(prompt, None)).await;
            }
            return Err(DispatchError::NoMatch);
        };
        let action = self.registry.lookup(name)?;
        tracing::info!("Prompt '{}' matched action '{}'", prompt, action.name);

        let generated_code = codegen::render(action);
        let parameters = bind_parameters(action, prompt);
        let event = DispatchEvent::new(prompt, Some(&action.name));

        let (outcome, recent_queries) = match self.policy {
            RecordPolicy::Matched | RecordPolicy::All => {
                let recent = self.context.record_and_snapshot(event).await;
                let outcome = self.execute(action, &parameters).await?;
                (outcome, recent)
            }
            RecordPolicy::Succeeded => {
                let outcome = self.execute(action, &parameters).await?;
                let recent = if outcome.is_success() {
                    self.context.record_and_snapshot(event).await
                } else {
                    self.context.snapshot().await
                };
                (outcome, recent)
            }
        };

        tracing::info!("Dispatch of '{}' finished: {}", action.name, outcome.message());

        Ok(DispatchResult {
            action: action.name.clone(),
            code: action.template.clone(),
            generated_code,
            outcome,
            context: ContextSnapshot { recent_queries },
        })
    }

    async fn execute(
        &self,
        action: &Action,
        parameters: &Parameters,
    ) -> Result<ExecutionOutcome, DispatchError> {
        self.executor.run(action, parameters).await.inspect_err(|e| {
            tracing::error!("Error executing function {}: {}", action.name, e);
        })
    }
}
