//! # Configuration
//!
//! Manages the loading and parsing of the service's configuration file (`config.yaml`).
//! Every section has defaults, so an absent file or an empty section still yields a usable config.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// When a dispatch is written into the context history.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecordPolicy {
    /// Every matched prompt, recorded before the action runs.
    #[default]
    Matched,
    /// Only dispatches whose action ran successfully.
    Succeeded,
    /// Matched prompts plus unmatched ones (with no action).
    All,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DispatchConfig {
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default)]
    pub record_policy: RecordPolicy,
    /// Upper bound on a single action's run. Unbounded when absent.
    #[serde(default)]
    pub execution_timeout_secs: Option<u64>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            record_policy: RecordPolicy::default(),
            execution_timeout_secs: None,
        }
    }
}

impl DispatchConfig {
    pub fn execution_timeout(&self) -> Option<Duration> {
        self.execution_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_file")]
    pub file: String,
    /// `EnvFilter` directives; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            file: default_log_file(),
            filter: default_log_filter(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_history_capacity() -> usize {
    5
}
fn default_log_directory() -> String {
    crate::domain::paths::DATA_DIR.to_string()
}
fn default_log_file() -> String {
    crate::domain::paths::LOG_FILE.to_string()
}
fn default_log_filter() -> String {
    "info,hyper=warn,tower_http=warn".to_string()
}

impl AppConfig {
    /// Parse a YAML document and validate it.
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to `()`, not to a struct.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AppConfig =
            serde_yaml::from_str(content).context(crate::strings::logs::CONFIG_PARSE_ERROR)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| crate::strings::logs::config_read_error(&path.display().to_string()))?;
        Self::from_yaml(&content)
    }

    /// Pick the config to run with. An explicit path must be readable; the default
    /// location falls back to built-in defaults when absent. Returns the path used and
    /// whether a file was actually read.
    pub fn resolve(
        explicit: Option<PathBuf>,
        default_path: PathBuf,
    ) -> Result<(Self, PathBuf, bool)> {
        match explicit {
            Some(path) => Ok((Self::load(&path)?, path, true)),
            None if default_path.exists() => Ok((Self::load(&default_path)?, default_path, true)),
            None => Ok((Self::default(), default_path, false)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.dispatch.history_capacity == 0 {
            anyhow::bail!("dispatch.history_capacity must be at least 1");
        }
        if self.dispatch.execution_timeout_secs == Some(0) {
            anyhow::bail!("dispatch.execution_timeout_secs must be positive when set");
        }
        Ok(())
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.dispatch.history_capacity, 5);
        assert_eq!(config.dispatch.record_policy, RecordPolicy::Matched);
        assert!(config.dispatch.execution_timeout().is_none());
        assert_eq!(config.listen_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml(
            "dispatch:\n  record_policy: succeeded\n  execution_timeout_secs: 10\n",
        )
        .unwrap();
        assert_eq!(config.dispatch.record_policy, RecordPolicy::Succeeded);
        assert_eq!(
            config.dispatch.execution_timeout(),
            Some(Duration::from_secs(10))
        );
        assert_eq!(config.dispatch.history_capacity, 5);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.file, "session.log");
    }

    #[test]
    fn test_empty_document() {
        let config = AppConfig::from_yaml("   \n").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = AppConfig::from_yaml("dispatch:\n  history_capacity: 0\n").unwrap_err();
        assert!(err.to_string().contains("history_capacity"));
    }

    #[test]
    fn test_rejects_unknown_policy() {
        assert!(AppConfig::from_yaml("dispatch:\n  record_policy: sometimes\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "server:\n  host: 127.0.0.1\n  port: 9090\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.listen_address(), "127.0.0.1:9090");
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = AppConfig::load(&temp_dir.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("nope.yaml"));
    }

    #[test]
    fn test_resolve_explicit_path_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.yaml");
        let err = AppConfig::resolve(Some(missing), temp_dir.path().join("default.yaml"))
            .unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn test_resolve_missing_default_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let default_path = temp_dir.path().join("default.yaml");
        let (config, path, found) = AppConfig::resolve(None, default_path.clone()).unwrap();
        assert!(!found);
        assert_eq!(path, default_path);
        assert_eq!(config.listen_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_resolve_reads_default_when_present() {
        let temp_dir = TempDir::new().unwrap();
        let default_path = temp_dir.path().join("default.yaml");
        fs::write(&default_path, "server:\n  port: 9191\n").unwrap();
        let (config, _, found) = AppConfig::resolve(None, default_path).unwrap();
        assert!(found);
        assert_eq!(config.server.port, 9191);
    }
}
