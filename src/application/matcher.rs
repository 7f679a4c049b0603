//! # Matcher
//!
//! Picks the action a prompt refers to by plain word overlap.
//!
//! The prompt becomes a set of lower-cased, whitespace-delimited words. Each action is compared
//! against the union of its keywords and the words of its description; the score is the size of
//! the intersection. Highest score wins, the earlier registration wins a tie, and a best score
//! of zero means no match. There is no stemming, weighting or stop-word filtering, and
//! punctuation stays attached to its word.

use std::collections::HashSet;

use crate::application::registry::ActionRegistry;
use crate::domain::types::Action;

/// Lower-cased set of whitespace-delimited words.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|w| w.to_lowercase()).collect()
}

/// Keywords plus description words for an action.
pub fn comparison_set(action: &Action) -> HashSet<String> {
    let mut words = tokenize(&action.description);
    words.extend(action.keywords.iter().map(|k| k.to_lowercase()));
    words
}

pub fn score(prompt_words: &HashSet<String>, action: &Action) -> usize {
    comparison_set(action)
        .intersection(prompt_words)
        .count()
}

/// Score of every action, in registration order.
pub fn rank<'r>(registry: &'r ActionRegistry, prompt: &str) -> Vec<(&'r str, usize)> {
    let prompt_words = tokenize(prompt);
    registry
        .all()
        .map(|action| (action.name.as_str(), score(&prompt_words, action)))
        .collect()
}

/// Name of the best-scoring action, or `None` when nothing overlaps.
pub fn best_match<'r>(registry: &'r ActionRegistry, prompt: &str) -> Option<&'r str> {
    let prompt_words = tokenize(prompt);
    if prompt_words.is_empty() {
        return None;
    }

    let mut best: Option<&Action> = None;
    let mut best_score = 0;

    for action in registry.all() {
        let current = score(&prompt_words, action);
        // Strictly greater: the first registered action keeps a tie.
        if current > best_score {
            best_score = current;
            best = Some(action);
        }
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        tracing::debug!("Match scores for '{}': {:?}", prompt, rank(registry, prompt));
    }

    best.map(|action| action.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ActionKind;

    fn best(prompt: &str) -> Option<String> {
        let registry = ActionRegistry::builtin().unwrap();
        best_match(&registry, prompt).map(str::to_string)
    }

    #[test]
    fn test_tokenize_lowercases_and_dedupes() {
        let words = tokenize("Open  OPEN chrome\tplease\n");
        assert_eq!(words.len(), 3);
        assert!(words.contains("open"));
        assert!(words.contains("chrome"));
        assert!(words.contains("please"));
    }

    #[test]
    fn test_open_chrome_please() {
        assert_eq!(best("open chrome please").as_deref(), Some("open_chrome"));
    }

    #[test]
    fn test_no_overlap_is_no_match() {
        assert_eq!(best("what's the weather"), None);
        assert_eq!(best(""), None);
        assert_eq!(best("   "), None);
    }

    #[test]
    fn test_punctuation_is_not_stripped() {
        assert_eq!(best("chrome,"), None);
    }

    #[test]
    fn test_tie_goes_to_first_registered() {
        // "open" is a keyword of both launch actions.
        assert_eq!(best("open").as_deref(), Some("open_chrome"));
    }

    #[test]
    fn test_single_keyword_selects_action() {
        assert_eq!(best("calc").as_deref(), Some("open_calculator"));
        assert_eq!(best("how busy is the processor").as_deref(), Some("get_cpu_usage"));
        assert_eq!(
            best("run command: list files").as_deref(),
            Some("execute_shell_command")
        );
    }

    #[test]
    fn test_description_words_count() {
        // "retrieve" and "current" only appear in the description.
        assert_eq!(best("retrieve current").as_deref(), Some("get_cpu_usage"));
    }

    #[test]
    fn test_higher_score_beats_registration_order() {
        // open_chrome: open. open_calculator: open, calculator, math.
        assert_eq!(best("open calculator math").as_deref(), Some("open_calculator"));
    }

    #[test]
    fn test_stop_words_in_descriptions_still_match() {
        let registry = ActionRegistry::new(vec![Action::new(
            "noop",
            "Do a thing",
            "true",
            "test",
            &["noop"],
            ActionKind::RunShellCommand,
        )])
        .unwrap();
        assert_eq!(best_match(&registry, "a"), Some("noop"));
    }

    #[test]
    fn test_rank_preserves_registration_order() {
        let registry = ActionRegistry::builtin().unwrap();
        let scores = rank(&registry, "open chrome please");
        assert_eq!(
            scores,
            vec![
                ("open_chrome", 2),
                ("open_calculator", 1),
                ("get_cpu_usage", 0),
                ("execute_shell_command", 0),
            ]
        );
    }
}
