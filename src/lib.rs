//! mono: monorepo maintenance CLI
//!
//! The core is a small command-line engine ([`domain::Cli`]): a tokenizer that
//! splits raw input into a command name, positionals and `--flags`, and a
//! fluent registry that binds them to declared commands and runs their
//! actions. The `mono` binary registers its vocabulary (install, build, dev,
//! prod, down, clean, ...) on top of it.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
