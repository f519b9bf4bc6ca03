//! Domain layer: tokenizer, command registry and dispatcher
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod dispatcher;
pub mod entities;
pub mod error;
pub mod registry;
pub mod tokenizer;

pub use dispatcher::Cli;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use registry::{Action, CommandDefinition, CommandRegistry};
pub use tokenizer::{tokenize, ParseState};
