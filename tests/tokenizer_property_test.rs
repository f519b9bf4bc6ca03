//! Property-based tests for the tokenizer.
//!
//! Inputs are random token sequences joined by random whitespace runs, with
//! no leading whitespace.

use std::collections::BTreeSet;

use proptest::prelude::*;

use mono::domain::tokenize;

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9./_]{1,8}"
}

/// Plain words, single-hyphen words, options, triple-hyphen words and bare `--`.
fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => word(),
        1 => word().prop_map(|w| format!("-{w}")),
        2 => "[a-z][a-z0-9-]{0,6}".prop_map(|n| format!("--{n}")),
        1 => word().prop_map(|w| format!("---{w}")),
        1 => Just("--".to_string()),
    ]
}

fn whitespace() -> impl Strategy<Value = String> {
    "[ \t\n]{1,4}"
}

/// Tokens plus the input built from them.
fn input() -> impl Strategy<Value = (Vec<String>, String)> {
    (
        prop::collection::vec((token(), whitespace()), 0..12),
        prop::option::of(whitespace()),
    )
        .prop_map(|(pairs, trailing)| {
            let tokens: Vec<String> = pairs.iter().map(|(t, _)| t.clone()).collect();
            let mut line = pairs
                .iter()
                .map(|(t, ws)| format!("{t}{ws}"))
                .collect::<String>()
                .trim_end()
                .to_string();
            if let Some(ws) = trailing.filter(|_| !line.is_empty()) {
                line.push_str(&ws);
            }
            (tokens, line)
        })
}

proptest! {
    /// Rendering the canonical form and tokenizing it again changes nothing.
    #[test]
    fn canonical_form_tokenizes_to_same_input((_, line) in input()) {
        let first = tokenize(&line).unwrap();
        let second = tokenize(&first.to_string()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Each `--name` token yields exactly one `name = true` entry and nothing else.
    #[test]
    fn option_tokens_map_to_true_flags((tokens, line) in input()) {
        let parsed = tokenize(&line).unwrap();

        let expected: BTreeSet<&str> = tokens
            .iter()
            .filter_map(|t| t.strip_prefix("--"))
            .filter(|name| !name.is_empty() && !name.starts_with('-'))
            .collect();
        let actual: BTreeSet<&str> = parsed.options.keys().map(String::as_str).collect();

        prop_assert_eq!(actual, expected);
        prop_assert!(parsed.options.values().all(|&v| v));
    }

    /// Every non-option token survives as the name or a positional, in order.
    #[test]
    fn positional_tokens_keep_input_order((tokens, line) in input()) {
        let parsed = tokenize(&line).unwrap();

        let expected: Vec<&str> = tokens
            .iter()
            .map(String::as_str)
            .filter(|t| !(t.starts_with("--") && t.len() > 2 && !t[2..].starts_with('-')))
            .collect();
        let actual: Vec<&str> = std::iter::once(parsed.name.as_str())
            .filter(|n| !n.is_empty())
            .chain(parsed.positionals.iter().map(String::as_str))
            .collect();

        prop_assert_eq!(actual, expected);
    }
}
