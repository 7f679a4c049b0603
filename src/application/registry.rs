//! # Action Registry
//!
//! The static set of actions a prompt can be dispatched to.
//! Built once at startup and only read afterwards; iteration follows registration order,
//! which is what the matcher relies on to break ties.

use anyhow::Result;
use std::collections::HashSet;

use crate::domain::error::DispatchError;
use crate::domain::types::{Action, ActionKind, SystemMetric};

const GOOGLE_URL: &str = "https://www.google.com";

pub struct ActionRegistry {
    actions: Vec<Action>,
}

impl ActionRegistry {
    /// Build a registry from explicit definitions. Names must be unique.
    pub fn new(actions: Vec<Action>) -> Result<Self> {
        let mut seen = HashSet::new();
        for action in &actions {
            if !seen.insert(action.name.as_str()) {
                anyhow::bail!("Duplicate action name '{}'", action.name);
            }
        }
        Ok(Self { actions })
    }

    /// The compiled-in action set.
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_actions())
    }

    pub fn lookup(&self, name: &str) -> Result<&Action, DispatchError> {
        self.actions
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| DispatchError::UnknownAction(name.to_string()))
    }

    pub fn all(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

fn builtin_actions() -> Vec<Action> {
    let browser = browser_launch(GOOGLE_URL);
    let calculator = calculator_launch();

    vec![
        Action::new(
            "open_chrome",
            "Open Google Chrome browser",
            launch_template(&browser),
            "application_control",
            &["chrome", "browser", "google", "web", "internet", "open"],
            browser,
        ),
        Action::new(
            "open_calculator",
            "Open system calculator",
            launch_template(&calculator),
            "application_control",
            &["calculator", "calc", "math", "compute", "open"],
            calculator,
        ),
        Action::new(
            "get_cpu_usage",
            "Retrieve current CPU usage",
            cpu_probe_template(),
            "system_monitoring",
            &["cpu", "processor", "usage", "load", "system", "monitor"],
            ActionKind::QuerySystemMetric {
                metric: SystemMetric::CpuLoad,
            },
        ),
        Action::new(
            "execute_shell_command",
            "Execute a shell command safely",
            shell_template("command"),
            "command_execution",
            &["shell", "command", "execute", "run", "terminal"],
            ActionKind::RunShellCommand,
        )
        .with_parameter("command", "str"),
    ]
}

fn browser_launch(url: &str) -> ActionKind {
    let (program, args): (&str, Vec<&str>) = if cfg!(target_os = "windows") {
        ("cmd", vec!["/C", "start", "", url])
    } else if cfg!(target_os = "macos") {
        ("open", vec![url])
    } else {
        ("xdg-open", vec![url])
    };
    launch(program, &args)
}

fn calculator_launch() -> ActionKind {
    if cfg!(target_os = "windows") {
        launch("calc", &[])
    } else if cfg!(target_os = "macos") {
        launch("open", &["-a", "Calculator"])
    } else {
        launch("gnome-calculator", &[])
    }
}

fn launch(program: &str, args: &[&str]) -> ActionKind {
    ActionKind::LaunchApplication {
        program: program.to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
    }
}

/// Renders a launch as the command line it amounts to.
fn launch_template(kind: &ActionKind) -> String {
    match kind {
        ActionKind::LaunchApplication { program, args } => {
            let mut line = program.clone();
            for arg in args {
                if arg.is_empty() || arg.contains(char::is_whitespace) || arg.contains(':') {
                    line.push_str(&format!(" \"{arg}\""));
                } else {
                    line.push(' ');
                    line.push_str(arg);
                }
            }
            line
        }
        _ => String::new(),
    }
}

fn cpu_probe_template() -> String {
    if cfg!(target_os = "windows") {
        "wmic cpu get loadpercentage".to_string()
    } else if cfg!(target_os = "macos") {
        "sysctl -n vm.loadavg".to_string()
    } else {
        "cat /proc/loadavg".to_string()
    }
}

fn shell_template(parameter: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("cmd /C \"${{{parameter}}}\"")
    } else {
        format!("sh -c \"${{{parameter}}}\"")
    }
}
