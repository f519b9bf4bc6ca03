//! Domain entities: core data structures

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Tokenizer output: the command name plus everything that followed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    /// First positional token, empty when the input had none
    pub name: String,
    /// Remaining positional tokens, in input order
    pub positionals: Vec<String>,
    /// Options present in the input; values are always `true`
    pub options: BTreeMap<String, bool>,
}

impl fmt::Display for ParsedInput {
    /// Canonical form: name, positionals, then `--option` tokens in name order,
    /// separated by single spaces. Tokenizing it yields an equal value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens = std::iter::once(self.name.clone())
            .filter(|name| !name.is_empty())
            .chain(self.positionals.iter().cloned())
            .chain(self.options.keys().map(|name| format!("--{name}")));
        write!(f, "{}", itertools::join(tokens, " "))
    }
}

/// Options for a declared flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionOpts {
    /// Declared default. Shown in usage output; not applied during dispatch.
    pub default: bool,
}

impl Default for OptionOpts {
    fn default() -> Self {
        Self { default: true }
    }
}

/// Arguments handed to every action of the dispatched command.
///
/// Positionals are keyed by their declared name. A declared positional the
/// input did not supply is present with value `None`. Options appear only when
/// they were both declared and present in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchResult {
    positionals: BTreeMap<String, Option<String>>,
    options: BTreeMap<String, bool>,
}

impl DispatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a positional binding.
    pub fn with_positional(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
        self.positionals
            .insert(name.into(), value.map(str::to_string));
        self
    }

    /// Builder-style insert of an option binding.
    pub fn with_option(mut self, name: impl Into<String>, value: bool) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    /// Value bound to a declared positional, `None` when absent or under-supplied.
    pub fn positional(&self, name: &str) -> Option<&str> {
        self.positionals.get(name).and_then(|v| v.as_deref())
    }

    /// Whether the positional was declared on the dispatched command.
    pub fn has_positional(&self, name: &str) -> bool {
        self.positionals.contains_key(name)
    }

    /// Option value if the option was declared and present.
    pub fn option(&self, name: &str) -> Option<bool> {
        self.options.get(name).copied()
    }

    /// Convenience: `true` only if the flag was given.
    pub fn flag(&self, name: &str) -> bool {
        self.option(name).unwrap_or(false)
    }

    pub fn positionals(&self) -> &BTreeMap<String, Option<String>> {
        &self.positionals
    }

    pub fn options(&self) -> &BTreeMap<String, bool> {
        &self.options
    }
}

/// Kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    Symlink,
    File,
}

/// Where a workspace lives in the monorepo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceKind {
    App,
    Package,
}

impl fmt::Display for WorkspaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceKind::App => write!(f, "app"),
            WorkspaceKind::Package => write!(f, "package"),
        }
    }
}

/// A workspace directory (application or shared package).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Workspace {
    pub kind: WorkspaceKind,
    /// Directory name, e.g. `api`
    pub name: String,
    /// Path relative to the monorepo root, e.g. `apps/api`
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_input_with_options_when_display_then_renders_canonical_form() {
        let mut options = BTreeMap::new();
        options.insert("docker".to_string(), true);
        options.insert("a".to_string(), true);
        let parsed = ParsedInput {
            name: "build".to_string(),
            positionals: vec!["./apps".to_string()],
            options,
        };

        assert_eq!(parsed.to_string(), "build ./apps --a --docker");
    }

    #[test]
    fn given_nameless_input_when_display_then_has_no_leading_space() {
        let mut options = BTreeMap::new();
        options.insert("docker".to_string(), true);
        let parsed = ParsedInput {
            options,
            ..ParsedInput::default()
        };

        assert_eq!(parsed.to_string(), "--docker");
    }

    #[test]
    fn given_default_option_opts_then_default_is_true() {
        assert!(OptionOpts::default().default);
    }

    #[test]
    fn given_dispatch_result_when_querying_then_distinguishes_absent_and_unset() {
        let result = DispatchResult::new()
            .with_positional("path", None)
            .with_option("docker", true);

        assert!(result.has_positional("path"));
        assert_eq!(result.positional("path"), None);
        assert!(!result.has_positional("other"));
        assert_eq!(result.option("docker"), Some(true));
        assert_eq!(result.option("dry-run"), None);
        assert!(!result.flag("dry-run"));
    }
}
