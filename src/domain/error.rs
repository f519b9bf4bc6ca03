//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors raised by the tokenizer, the registry and the dispatcher.
///
/// Errors returned by user actions are not wrapped here; they reach the
/// caller of [`Cli::parse`](crate::domain::Cli::parse) unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Neither recognizer advanced the read position.
    #[error("infinite loop detected at index {index}: {remaining:?}")]
    Tokenize { index: usize, remaining: String },

    #[error("command not found: {0:?}")]
    CommandNotFound(String),

    #[error("no command selected")]
    NoCommandSelected,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
