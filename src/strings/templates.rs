//! # Templates
//!
//! Exposes the code templates from the `templates/` directory.

/// Guarded-execution wrapper rendered around an action's template.
/// Placeholders: `{name}`, `{description}`, `{code}`.
pub const GUARDED_EXECUTION: &str = include_str!("../../templates/guarded_execution.sh");
