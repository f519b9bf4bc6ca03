//! Tokenizer for shell-style command input.
//!
//! The input is split on whitespace only; there is no quoting or escaping.
//! A token with exactly two leading hyphens and a non-empty rest is an
//! option (`--docker`), every other token is a positional. Options are
//! boolean presence flags and never carry a value.
//!
//! Tokenizing is a reduction over immutable [`ParseState`] values: each
//! recognizer looks at a state and either declines or returns the next state.
//! The driving loop owns the only mutable binding and fails as soon as no
//! recognizer moves the read position forward.
//!
//! Each step copies the accumulated tokens into the new state, so cost grows
//! quadratically with the token count. Command lines are short.

use std::collections::BTreeMap;

use tracing::{instrument, trace};

use crate::domain::entities::ParsedInput;
use crate::domain::error::{DomainError, DomainResult};

/// Intermediate tokenizer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseState<'a> {
    data: &'a str,
    index: usize,
    positionals: Vec<String>,
    options: BTreeMap<String, bool>,
}

impl<'a> ParseState<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            index: 0,
            positionals: Vec::new(),
            options: BTreeMap::new(),
        }
    }

    /// Byte offset of the read position.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn options(&self) -> &BTreeMap<String, bool> {
        &self.options
    }

    pub fn is_done(&self) -> bool {
        self.index >= self.data.len()
    }

    fn rest(&self) -> &'a str {
        &self.data[self.index..]
    }

    /// Token at the read position and the number of bytes it occupies,
    /// including the whitespace run that follows it.
    fn next_token(&self) -> (&'a str, usize) {
        let rest = self.rest();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let after = rest[end..].trim_start();
        (&rest[..end], rest.len() - after.len())
    }

    /// Copy of this state with the read position moved by `consumed` bytes.
    fn advanced(&self, consumed: usize) -> Self {
        Self {
            data: self.data,
            index: self.index + consumed,
            positionals: self.positionals.clone(),
            options: self.options.clone(),
        }
    }

    fn into_parsed(self) -> ParsedInput {
        let mut positionals = self.positionals.into_iter();
        ParsedInput {
            name: positionals.next().unwrap_or_default(),
            positionals: positionals.collect(),
            options: self.options,
        }
    }
}

/// A recognizer either declines (`None`) or returns the next state.
pub type Recognizer = for<'a> fn(&ParseState<'a>) -> Option<ParseState<'a>>;

/// Recognizers in priority order.
const RECOGNIZERS: [Recognizer; 2] = [recognize_option, recognize_positional];

/// Option name of a `--name` token.
///
/// Only a run of exactly two leading hyphens counts; `-x`, `---x` and a bare
/// `--` are not options.
fn option_name(token: &str) -> Option<&str> {
    let hyphens = token.chars().take_while(|&c| c == '-').count();
    if hyphens != 2 {
        return None;
    }
    let name = &token[hyphens..];
    (!name.is_empty()).then_some(name)
}

/// Recognizes `--name` and records `name = true`.
pub fn recognize_option<'a>(state: &ParseState<'a>) -> Option<ParseState<'a>> {
    let (token, consumed) = state.next_token();
    let name = option_name(token)?;
    trace!(name, "option");
    let mut next = state.advanced(consumed);
    next.options.insert(name.to_string(), true);
    Some(next)
}

/// Recognizes any non-empty token and records it verbatim.
pub fn recognize_positional<'a>(state: &ParseState<'a>) -> Option<ParseState<'a>> {
    let (token, consumed) = state.next_token();
    if token.is_empty() {
        return None;
    }
    trace!(token, "positional");
    let mut next = state.advanced(consumed);
    next.positionals.push(token.to_string());
    Some(next)
}

/// Tokenize `input` into a command name, positionals and options.
///
/// Fails with [`DomainError::Tokenize`] when no recognizer advances the read
/// position, which only happens on whitespace that no token precedes
/// (leading whitespace).
#[instrument(level = "debug")]
pub fn tokenize(input: &str) -> DomainResult<ParsedInput> {
    let mut state = ParseState::new(input);

    while !state.is_done() {
        match RECOGNIZERS.iter().find_map(|recognize| recognize(&state)) {
            Some(next) if next.index > state.index => state = next,
            _ => {
                return Err(DomainError::Tokenize {
                    index: state.index,
                    remaining: state.rest().to_string(),
                })
            }
        }
    }

    Ok(state.into_parsed())
}
