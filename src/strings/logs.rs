pub const STARTING: &str = "Starting intent-dispatch...";
pub const SHUTDOWN: &str = "Shutting down...";
pub const CONFIG_PARSE_ERROR: &str = "Failed to parse YAML";
pub const UNSANDBOXED_WARN: &str =
    "Actions run without sandboxing or allow-list; expose this service only to trusted callers";

pub fn config_read_error(path: &str) -> String {
    format!("Failed to read {path}")
}

pub fn config_loaded(path: &str) -> String {
    format!("Loaded configuration from {path}")
}

pub fn config_missing(path: &str) -> String {
    format!("No configuration at {path}, using defaults")
}

pub fn listening(addr: &str) -> String {
    format!("Listening on http://{addr}")
}

pub fn registry_loaded(count: usize) -> String {
    format!("Registered {count} actions")
}

pub fn shutdown_fail(err: &str) -> String {
    format!("Unable to listen for shutdown signal: {err}")
}
