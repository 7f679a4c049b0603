//! # Messages
//!
//! Contains constant strings and format functions for messages returned to HTTP clients
//! and embedded in execution outcomes.

pub const NO_MATCH: &str = "No matching function found";

pub fn unknown_action(name: &str) -> String {
    format!("Unknown function '{name}'")
}

pub fn execution_error(err: &str) -> String {
    format!("Error executing function: {err}")
}

pub fn execution_timed_out(secs: u64) -> String {
    format!("Execution timed out after {secs}s")
}

pub fn missing_parameter(name: &str) -> String {
    format!("Missing required parameter `{name}`")
}

pub fn launched(program: &str) -> String {
    format!("Launched {program}")
}

pub fn cpu_load(value: &str) -> String {
    format!("CPU load: {value}")
}

pub fn command_succeeded_silently(command: &str) -> String {
    format!("`{command}` completed with no output")
}
