//! Fluent command builder and dispatcher.
//!
//! ```ignore
//! let mut cli = Cli::<MyError>::new()
//!     .add_command("build")
//!     .add_positional("path")?
//!     .add_option("docker")?
//!     .action(|args| run_build(args.positional("path"), args.flag("docker")))?;
//!
//! cli.parse("build ./apps --docker")?;
//! ```
//!
//! Builder calls take the `Cli` by value and thread the selected command (the
//! cursor) along with the registry. Calls that need a selected command fail
//! with [`DomainError::NoCommandSelected`] when there is none.

use tracing::{debug, instrument, trace};

use crate::domain::entities::{DispatchResult, OptionOpts};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::registry::{CommandDefinition, CommandRegistry};
use crate::domain::tokenizer::tokenize;

/// Command registry plus the builder cursor.
///
/// `E` is the error type of the registered actions. Action errors are returned
/// from [`Cli::parse`] unchanged; engine errors are converted with `From`.
#[derive(Debug)]
pub struct Cli<'a, E> {
    registry: CommandRegistry<'a, E>,
    cursor: Option<usize>,
}

impl<E> Default for Cli<'_, E> {
    fn default() -> Self {
        Self {
            registry: CommandRegistry::new(),
            cursor: None,
        }
    }
}

impl<'a, E> Cli<'a, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command and select it.
    ///
    /// Adding a name that is already registered selects the existing command.
    pub fn add_command(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let index = match self.registry.position(&name) {
            Some(index) => {
                debug!(%name, "command already registered, selecting it");
                index
            }
            None => self.registry.push(CommandDefinition::new(name)),
        };
        self.cursor = Some(index);
        self
    }

    /// Set the description of the selected command.
    pub fn describe(mut self, about: impl Into<String>) -> DomainResult<Self> {
        self.selected_mut()?.set_about(about.into());
        Ok(self)
    }

    /// Declare the next positional of the selected command.
    pub fn add_positional(mut self, name: impl Into<String>) -> DomainResult<Self> {
        self.selected_mut()?.push_positional(name.into());
        Ok(self)
    }

    /// Declare an option of the selected command with the default options.
    pub fn add_option(self, name: impl Into<String>) -> DomainResult<Self> {
        self.add_option_with(name, OptionOpts::default())
    }

    pub fn add_option_with(mut self, name: impl Into<String>, opts: OptionOpts) -> DomainResult<Self> {
        self.selected_mut()?.insert_option(name.into(), opts);
        Ok(self)
    }

    /// Append an action to the selected command.
    pub fn action<F>(mut self, action: F) -> DomainResult<Self>
    where
        F: FnMut(&DispatchResult) -> Result<(), E> + 'a,
    {
        self.selected_mut()?.push_action(Box::new(action));
        Ok(self)
    }

    /// Move the cursor to `name`, or clear it if no such command exists.
    pub fn select(mut self, name: &str) -> Self {
        self.select_in_place(name);
        self
    }

    /// Currently selected command.
    pub fn selected(&self) -> Option<&CommandDefinition<'a, E>> {
        self.cursor.and_then(|index| self.registry.get(index))
    }

    /// Registered commands, in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &CommandDefinition<'a, E>> {
        self.registry.iter()
    }

    /// Usage lines of every registered command.
    pub fn usage(&self) -> Vec<String> {
        self.commands().map(CommandDefinition::usage).collect()
    }

    fn select_in_place(&mut self, name: &str) -> Option<usize> {
        self.cursor = self.registry.position(name);
        self.cursor
    }

    fn selected_mut(&mut self) -> DomainResult<&mut CommandDefinition<'a, E>> {
        let index = self.cursor.ok_or(DomainError::NoCommandSelected)?;
        self.registry
            .get_mut(index)
            .ok_or(DomainError::NoCommandSelected)
    }

    /// Tokenize `input`, select the named command and run its actions in
    /// registration order.
    ///
    /// Stops at the first failing action and returns its error unchanged.
    #[instrument(level = "debug", skip(self))]
    pub fn parse(&mut self, input: &str) -> Result<(), E>
    where
        E: From<DomainError>,
    {
        let parsed = tokenize(input)?;
        trace!(?parsed, "tokenized");

        if self.select_in_place(&parsed.name).is_none() {
            return Err(DomainError::CommandNotFound(parsed.name).into());
        }
        let command = self.selected_mut()?;
        let args = command.bind(&parsed);
        debug!(command = command.name(), ?args, "dispatching");

        for action in command.actions_mut() {
            action(&args)?;
        }
        Ok(())
    }
}
