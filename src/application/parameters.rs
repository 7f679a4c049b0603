//! Binds an action's declared parameters from the free-text prompt.
//!
//! A parameter `name` takes the text after a `name:` marker (case-insensitive); when the prompt
//! has no such marker, it takes the text after the first `:`. Empty values are left unbound and
//! the runner reports them as missing.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::types::{Action, Parameters};

/// A `word:` marker; the value is everything after it.
static MARKER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\b(\w+)\s*:"));

pub fn bind_parameters(action: &Action, prompt: &str) -> Parameters {
    let mut bound = Parameters::new();

    for name in action.parameters.keys() {
        if let Some(value) = named_value(name, prompt).or_else(|| trailing_value(prompt)) {
            bound.insert(name.clone(), value);
        }
    }

    bound
}

fn named_value(name: &str, prompt: &str) -> Option<String> {
    let marker = match MARKER.as_ref() {
        Ok(marker) => marker,
        Err(e) => {
            tracing::error!("Parameter marker pattern failed to compile: {e}");
            return None;
        }
    };
    marker
        .captures_iter(prompt)
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .and_then(|caps| caps.get(0))
        .map(|m| prompt[m.end()..].trim().to_string())
        .filter(|v| !v.is_empty())
}

fn trailing_value(prompt: &str) -> Option<String> {
    prompt
        .split_once(':')
        .map(|(_, rest)| rest.trim().to_string())
        .filter(|v| !v.is_empty())
}
