//! # Code Generator
//!
//! Renders the human-readable snippet returned with every dispatch: the action's raw template
//! wrapped in a guard that reports success or the failure's exit status.

use crate::domain::types::Action;
use crate::strings::templates::GUARDED_EXECUTION;

/// Pure function of the action; nothing volatile goes into the output.
pub fn render(action: &Action) -> String {
    fill(GUARDED_EXECUTION, action)
}

/// Fills `{name}`, `{description}` and `{code}` in one pass over the template, so text
/// coming from the action is copied verbatim and never expanded again.
fn fill(template: &str, action: &Action) -> String {
    let mut out = String::with_capacity(template.len() + action.template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let value = [
            ("{name}", action.name.as_str()),
            ("{description}", action.description.as_str()),
            ("{code}", action.template.as_str()),
        ]
        .into_iter()
        .find(|(placeholder, _)| tail.starts_with(placeholder));

        match value {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
