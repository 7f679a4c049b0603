//! # Domain Types
//!
//! Common data structures and enums used across the dispatch logic:
//! registered actions, dispatch events, execution outcomes and the request/response shapes.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Values bound from a prompt for an action's declared parameters.
pub type Parameters = BTreeMap<String, String>;

/// System metrics an action can query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SystemMetric {
    CpuLoad,
}

/// The closed set of operations an action can perform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionKind {
    /// Spawn a program and leave it running.
    LaunchApplication { program: String, args: Vec<String> },
    /// Read a metric from the host.
    QuerySystemMetric { metric: SystemMetric },
    /// Run the `command` parameter through the platform shell.
    RunShellCommand,
}

/// A registered action. Immutable once the registry is built.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Action {
    #[serde(skip)]
    pub name: String,
    pub description: String,
    /// Executable template as registered, with `${name}` placeholders for parameters.
    #[serde(rename = "code")]
    pub template: String,
    /// Parameter name -> declared type name.
    pub parameters: BTreeMap<String, String>,
    pub category: String,
    pub keywords: Vec<String>,
    #[serde(flatten)]
    pub kind: ActionKind,
}

impl Action {
    pub fn new(
        name: &str,
        description: &str,
        template: impl Into<String>,
        category: &str,
        keywords: &[&str],
        kind: ActionKind,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            template: template.into(),
            parameters: BTreeMap::new(),
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            kind,
        }
    }

    pub fn with_parameter(mut self, name: &str, type_name: &str) -> Self {
        self.parameters
            .insert(name.to_string(), type_name.to_string());
        self
    }
}

/// One entry of the context history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DispatchEvent {
    pub prompt: String,
    #[serde(rename = "function")]
    pub action: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl DispatchEvent {
    pub fn new(prompt: &str, action: Option<&str>) -> Self {
        Self {
            prompt: prompt.to_string(),
            action: action.map(str::to_string),
            timestamp: Local::now(),
        }
    }
}

/// Result of running an action's operation. A failure here is a contained fault,
/// reported inside an otherwise successful dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    Success { message: String },
    Failure { message: String },
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            ExecutionOutcome::Success { message } | ExecutionOutcome::Failure { message } => {
                message
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DispatchRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextSnapshot {
    pub recent_queries: Vec<DispatchEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DispatchResult {
    #[serde(rename = "function")]
    pub action: String,
    pub code: String,
    pub generated_code: String,
    pub outcome: ExecutionOutcome,
    pub context: ContextSnapshot,
}
