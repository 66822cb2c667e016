//! Property tests against a regular-expression reference matcher.

use proptest::prelude::*;
use regex::Regex;
use std::ops::ControlFlow;
use tenvis_matchtree_core::MatchTree;

/// Compile a pattern into a regex over the key with a leading dot, so every
/// token (including the first) is written as `.token`.
fn pattern_regex(pattern: &str) -> Regex {
    let mut expr = String::from("^");
    for token in pattern.split('.') {
        match token {
            "*" => expr.push_str(r"\.[^.]*"),
            "#" => expr.push_str(r"(?:\.[^.]*)*"),
            literal => {
                expr.push_str(r"\.");
                expr.push_str(&regex::escape(literal));
            }
        }
    }
    expr.push('$');
    Regex::new(&expr).unwrap()
}

fn reference_matches(patterns: &[(String, usize)], key: &str) -> Vec<usize> {
    let dotted = format!(".{key}");
    let mut values: Vec<usize> = patterns
        .iter()
        .filter(|(pattern, _)| pattern_regex(pattern).is_match(&dotted))
        .map(|(_, value)| *value)
        .collect();
    values.sort_unstable();
    values
}

fn pattern_strategy() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        6 => "[a-c]",
        2 => Just("*".to_string()),
        2 => Just("#".to_string()),
    ];
    prop::collection::vec(token, 1..6).prop_map(|tokens| tokens.join("."))
}

fn key_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-c]", 1..7).prop_map(|tokens| tokens.join("."))
}

fn entries(tree: &MatchTree<usize>) -> Vec<(String, Vec<usize>)> {
    let mut entries = Vec::new();
    let _ = tree.walk(|path, values| {
        entries.push((path.to_string(), values.to_vec()));
        ControlFlow::Continue(())
    });
    entries
}

#[test]
fn test_reference_regex() {
    let re = pattern_regex("a.#.b");
    assert!(re.is_match(".a.b"));
    assert!(re.is_match(".a.x.y.b"));
    assert!(!re.is_match(".a.xb"));

    let re = pattern_regex("*.c");
    assert!(re.is_match(".a.c"));
    assert!(!re.is_match(".c"));
}

proptest! {
    #[test]
    fn prop_matches_uniq_agrees_with_reference(
        patterns in prop::collection::vec(pattern_strategy(), 1..40),
        keys in prop::collection::vec(key_strategy(), 1..10),
    ) {
        let patterns: Vec<(String, usize)> =
            patterns.into_iter().enumerate().map(|(i, p)| (p, i)).collect();

        let mut tree = MatchTree::new();
        for (pattern, value) in &patterns {
            tree.insert(pattern, *value);
        }

        for key in &keys {
            let mut uniq = tree.matches_uniq(key);
            uniq.sort_unstable();
            prop_assert_eq!(&uniq, &reference_matches(&patterns, key), "key {}", key);

            let mut all = tree.matches(key);
            all.sort_unstable();
            prop_assert_eq!(all, uniq);
        }
    }

    #[test]
    fn prop_clone_isolation(
        base in prop::collection::vec(pattern_strategy(), 0..20),
        extra in prop::collection::vec(pattern_strategy(), 1..20),
    ) {
        let mut tree = MatchTree::new();
        for (i, pattern) in base.iter().enumerate() {
            tree.insert(pattern, i);
        }
        let before = entries(&tree);

        let mut clone = tree.clone();
        for (i, pattern) in extra.iter().enumerate() {
            clone.insert(pattern, 1000 + i);
        }
        for (i, pattern) in base.iter().enumerate() {
            clone.remove(pattern, &i);
        }

        prop_assert_eq!(entries(&tree), before);
        prop_assert_eq!(clone.len(), extra.len());
        prop_assert_eq!(tree.len(), base.len());
    }

    #[test]
    fn prop_insert_remove_inverse(
        base in prop::collection::vec(pattern_strategy(), 0..20),
        pattern in pattern_strategy(),
    ) {
        let mut tree = MatchTree::new();
        for (i, p) in base.iter().enumerate() {
            tree.insert(p, i);
        }
        let before = entries(&tree);
        let stats = tree.stats();

        tree.insert(&pattern, usize::MAX);
        tree.remove(&pattern, &usize::MAX);

        prop_assert_eq!(entries(&tree), before);
        prop_assert_eq!(tree.stats(), stats);
    }
}
