//! # Executor
//!
//! Runs an action through an [`ActionRunner`] and contains whatever goes wrong.
//!
//! Errors returned by the runner and timeouts become `ExecutionOutcome::Failure`. The runner
//! works on its own task; if that task panics or is cancelled, the fault has escaped
//! containment and is returned as `DispatchError::Internal`.
//!
//! There is no sandbox or allow-list here. Whatever the registry declares runs with the
//! privileges of this process.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::task::{JoinError, JoinHandle};

use crate::domain::error::DispatchError;
use crate::domain::traits::ActionRunner;
use crate::domain::types::{Action, ExecutionOutcome, Parameters};
use crate::strings::messages;

/// Aborts the runner task when dropped, so a cancelled `run` (for example a client that
/// disconnected) does not leave the action running without its time limit.
struct TaskGuard<T>(JoinHandle<T>);

impl<T> Drop for TaskGuard<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl<T> Future for TaskGuard<T> {
    type Output = Result<T, JoinError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx)
    }
}

pub struct Executor {
    runner: Arc<dyn ActionRunner>,
    timeout: Option<Duration>,
}

impl Executor {
    pub fn new(runner: Arc<dyn ActionRunner>) -> Self {
        Self {
            runner,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn run(
        &self,
        action: &Action,
        parameters: &Parameters,
    ) -> Result<ExecutionOutcome, DispatchError> {
        let runner = self.runner.clone();
        let owned_action = action.clone();
        let owned_parameters = parameters.clone();
        let mut task = TaskGuard(tokio::spawn(async move {
            runner.run(&owned_action, &owned_parameters).await
        }));

        let joined = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, &mut task).await {
                Ok(joined) => joined,
                Err(_) => {
                    drop(task);
                    tracing::warn!(
                        "Action '{}' exceeded its {}s limit",
                        action.name,
                        limit.as_secs()
                    );
                    return Ok(ExecutionOutcome::Failure {
                        message: messages::execution_timed_out(limit.as_secs()),
                    });
                }
            },
            None => task.await,
        };

        match joined {
            Ok(Ok(report)) => {
                tracing::info!("Action '{}' succeeded", action.name);
                Ok(ExecutionOutcome::Success { message: report })
            }
            Ok(Err(e)) => {
                tracing::warn!("Action '{}' failed: {:#}", action.name, e);
                Ok(ExecutionOutcome::Failure {
                    message: format!("{e:#}"),
                })
            }
            Err(join_error) => Err(DispatchError::Internal {
                action: action.name.clone(),
                message: join_error.to_string(),
            }),
        }
    }
}
