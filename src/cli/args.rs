//! CLI argument definitions using clap
//!
//! clap only handles the global flags. Everything after them is joined with
//! single spaces and handed to the embedded command dispatcher.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};
use clap_complete::Shell;

/// Monorepo maintenance: install, build, run and clean workspaces
#[derive(Parser, Debug)]
#[command(name = "mono")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run `mono help` to list the available commands.")]
pub struct Args {
    /// Verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Monorepo root (default: cwd)
    #[arg(short = 'C', long, env = "MONO_ROOT", value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Print shell completions for the given shell
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    /// Command and its arguments, e.g. `build apps/api --docker`
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl Args {
    /// Raw command line for the dispatcher.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}
