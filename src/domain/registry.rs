//! Command registry: owns every registered command definition.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::entities::{DispatchResult, OptionOpts, ParsedInput};

/// Callback invoked with the bound arguments of its command.
pub type Action<'a, E> = Box<dyn FnMut(&DispatchResult) -> Result<(), E> + 'a>;

/// A named command with its declared arguments and actions.
pub struct CommandDefinition<'a, E> {
    name: String,
    about: Option<String>,
    positionals: Vec<String>,
    options: BTreeMap<String, OptionOpts>,
    actions: Vec<Action<'a, E>>,
}

impl<'a, E> CommandDefinition<'a, E> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: None,
            positionals: Vec::new(),
            options: BTreeMap::new(),
            actions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }

    /// Declared positional names, in binding order.
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// Declared options and their defaults.
    pub fn options(&self) -> &BTreeMap<String, OptionOpts> {
        &self.options
    }

    pub(crate) fn set_about(&mut self, about: String) {
        self.about = Some(about);
    }

    pub(crate) fn push_positional(&mut self, name: String) {
        self.positionals.push(name);
    }

    pub(crate) fn insert_option(&mut self, name: String, opts: OptionOpts) {
        self.options.insert(name, opts);
    }

    pub(crate) fn push_action(&mut self, action: Action<'a, E>) {
        self.actions.push(action);
    }

    pub(crate) fn actions_mut(&mut self) -> impl Iterator<Item = &mut Action<'a, E>> {
        self.actions.iter_mut()
    }

    /// Bind parsed input to the declared arguments.
    ///
    /// The i-th declared positional takes the i-th parsed positional, or
    /// `None`. Only declared options that appear in the input are copied.
    pub fn bind(&self, parsed: &ParsedInput) -> DispatchResult {
        let result = self
            .positionals
            .iter()
            .enumerate()
            .fold(DispatchResult::new(), |acc, (i, name)| {
                acc.with_positional(name, parsed.positionals.get(i).map(String::as_str))
            });

        self.options
            .keys()
            .filter_map(|name| parsed.options.get(name).map(|&v| (name, v)))
            .fold(result, |acc, (name, value)| acc.with_option(name, value))
    }

    /// Usage line, e.g. `build [path] [--docker]`.
    pub fn usage(&self) -> String {
        let positionals = self.positionals.iter().map(|p| format!("[{p}]"));
        let options = self.options.iter().map(|(name, opts)| {
            if opts.default {
                format!("[--{name}]")
            } else {
                format!("[--{name} (default: off)]")
            }
        });
        itertools::join(
            std::iter::once(self.name.clone())
                .chain(positionals)
                .chain(options),
            " ",
        )
    }
}

impl<E> fmt::Debug for CommandDefinition<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("about", &self.about)
            .field("positionals", &self.positionals)
            .field("options", &self.options)
            .field("actions", &self.actions.len())
            .finish()
    }
}

/// Ordered collection of command definitions, unique by name.
pub struct CommandRegistry<'a, E> {
    commands: Vec<CommandDefinition<'a, E>>,
}

impl<E> Default for CommandRegistry<'_, E> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
        }
    }
}

impl<'a, E> CommandRegistry<'a, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the command named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.commands.iter().position(|c| c.name == name)
    }

    /// Append a definition and return its index.
    pub fn push(&mut self, command: CommandDefinition<'a, E>) -> usize {
        self.commands.push(command);
        self.commands.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&CommandDefinition<'a, E>> {
        self.commands.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut CommandDefinition<'a, E>> {
        self.commands.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition<'a, E>> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<E> fmt::Debug for CommandRegistry<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.commands.iter()).finish()
    }
}
