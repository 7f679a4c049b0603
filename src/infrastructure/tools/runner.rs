//! # System Runner
//!
//! Performs actions on the host: spawns programs, reads system metrics and runs shell commands.
//! No path or command validation happens here; the registry decides what can run.

use anyhow::{Context as AnyhowContext, Result};
use async_trait::async_trait;
use std::process::Stdio;

use crate::domain::traits::ActionRunner;
use crate::domain::types::{Action, ActionKind, Parameters, SystemMetric};
use crate::strings::messages;

/// Runs actions against the local machine.
#[derive(Debug, Default, Clone)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    /// Spawn a program and return without waiting for it.
    pub async fn launch(&self, program: &str, args: &[String]) -> Result<String> {
        tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to launch {program}"))?;
        Ok(messages::launched(program))
    }

    pub async fn query_metric(&self, metric: SystemMetric) -> Result<String> {
        match metric {
            SystemMetric::CpuLoad => self.cpu_load().await,
        }
    }

    #[cfg(target_os = "linux")]
    async fn cpu_load(&self) -> Result<String> {
        let raw = tokio::fs::read_to_string("/proc/loadavg")
            .await
            .context("Failed to read /proc/loadavg")?;
        let one_minute = raw
            .split_whitespace()
            .next()
            .context("Empty /proc/loadavg")?;
        Ok(messages::cpu_load(one_minute))
    }

    #[cfg(not(target_os = "linux"))]
    async fn cpu_load(&self) -> Result<String> {
        let probe = if cfg!(target_os = "windows") {
            "wmic cpu get loadpercentage"
        } else {
            "sysctl -n vm.loadavg"
        };
        let output = self.execute_command(probe).await?;
        Ok(messages::cpu_load(output.trim()))
    }

    /// Execute a shell command in the current working directory.
    /// A non-zero exit is an error carrying the captured output.
    pub async fn execute_command(&self, command: &str) -> Result<String> {
        let mut cmd = if cfg!(target_os = "windows") {
            let mut c = tokio::process::Command::new("cmd");
            c.args(["/C", command]);
            c
        } else {
            let mut c = tokio::process::Command::new("sh");
            c.args(["-c", command]);
            c
        };

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        // A cancelled run must not leave the shell behind.
        cmd.kill_on_drop(true);

        let child = cmd.spawn().context("Failed to spawn command shell")?;
        let output = child
            .wait_with_output()
            .await
            .context("Failed to collect command output")?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let mut result = String::new();
        if !stdout.is_empty() {
            result.push_str(stdout.trim_end());
        }
        if !stderr.is_empty() {
            if !result.is_empty() {
                result.push_str("\n--- STDERR ---\n");
            }
            result.push_str(stderr.trim_end());
        }

        if !output.status.success() {
            if !result.is_empty() {
                result.push('\n');
            }
            result.push_str(&format!("[Exit Code: {}]", output.status));
            anyhow::bail!(result);
        }

        if result.is_empty() {
            result = messages::command_succeeded_silently(command);
        }
        Ok(result)
    }
}

#[async_trait]
impl ActionRunner for SystemRunner {
    async fn run(&self, action: &Action, parameters: &Parameters) -> Result<String> {
        match &action.kind {
            ActionKind::LaunchApplication { program, args } => self.launch(program, args).await,
            ActionKind::QuerySystemMetric { metric } => self.query_metric(*metric).await,
            ActionKind::RunShellCommand => {
                let command = parameters
                    .get("command")
                    .filter(|c| !c.trim().is_empty())
                    .with_context(|| messages::missing_parameter("command"))?;
                tracing::warn!("Running unsandboxed shell command: {}", command);
                self.execute_command(command).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::registry::ActionRegistry;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_execute_command_captures_stdout() {
        let runner = SystemRunner::new();
        let output = runner.execute_command("echo hello").await.unwrap();
        assert_eq!(output, "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_error() {
        let runner = SystemRunner::new();
        let err = runner
            .execute_command("echo oops >&2; exit 3")
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("oops"));
        assert!(message.contains("[Exit Code:"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_silent_success_is_reported() {
        let runner = SystemRunner::new();
        let output = runner.execute_command("true").await.unwrap();
        assert_eq!(output, "`true` completed with no output");
    }

    #[tokio::test]
    async fn test_shell_action_requires_command() {
        let registry = ActionRegistry::builtin().unwrap();
        let shell = registry.lookup("execute_shell_command").unwrap();
        let err = SystemRunner::new()
            .run(shell, &Parameters::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("`command`"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_shell_action_runs_bound_command() {
        let registry = ActionRegistry::builtin().unwrap();
        let shell = registry.lookup("execute_shell_command").unwrap();
        let mut parameters = Parameters::new();
        parameters.insert("command".to_string(), "echo bound".to_string());
        let output = SystemRunner::new().run(shell, &parameters).await.unwrap();
        assert_eq!(output, "bound");
    }

    #[tokio::test]
    async fn test_launch_missing_program_fails() {
        let err = SystemRunner::new()
            .launch("definitely-not-a-real-program-4f1c", &[])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to launch"));
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_cpu_load_reads_proc() {
        let report = SystemRunner::new()
            .query_metric(SystemMetric::CpuLoad)
            .await
            .unwrap();
        assert!(report.starts_with("CPU load: "));
    }
}
