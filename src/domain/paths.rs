//! # Paths
//!
//! Centralized definitions for where the service keeps its files.
//! Acts as the single source of truth for the data directory, config file and session log.

use std::path::PathBuf;

pub const DATA_DIR: &str = "data";
pub const CONFIG_FILE: &str = "config.yaml";
pub const LOG_FILE: &str = "session.log";
pub const APP_DIR: &str = "intent-dispatch";

/// Returns the relative path to the local config file (e.g. "data/config.yaml")
pub fn local_config_path() -> PathBuf {
    PathBuf::from(DATA_DIR).join(CONFIG_FILE)
}

/// Returns the per-user config path (e.g. "~/.config/intent-dispatch/config.yaml"), if the platform has one
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Picks the config file used when `--config` is not given.
/// The local file wins; the per-user file is used only when it exists.
pub fn default_config_path() -> PathBuf {
    let local = local_config_path();
    if local.exists() {
        return local;
    }
    match user_config_path() {
        Some(user) if user.exists() => user,
        _ => local,
    }
}
