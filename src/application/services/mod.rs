//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, CommandRunner)
//! but are themselves concrete structs, not traits.

mod docker;
mod tasks;
mod workspace;

use std::process::ExitStatus;

use crate::application::{ApplicationError, ApplicationResult};
use crate::infrastructure::InfraError;

pub use docker::{DockerService, Stage};
pub use tasks::TaskService;
pub use workspace::{EntryFilter, WorkspaceService};

/// Split a configured command line such as `docker compose` into the program
/// and its leading arguments.
pub(crate) fn command_parts(line: &str) -> (&str, Vec<&str>) {
    let mut parts = line.split_whitespace();
    let program = parts.next().unwrap_or_default();
    (program, parts.collect())
}

/// Turn a non-zero exit status into an error naming the command.
pub(crate) fn check_status(program: &str, args: &[&str], status: ExitStatus) -> ApplicationResult<()> {
    if status.success() {
        return Ok(());
    }
    Err(ApplicationError::OperationFailed {
        context: format!("{} {}", program, args.join(" ")),
        source: Box::new(InfraError::Process {
            program: program.to_string(),
            exit_code: status.code(),
        }),
    })
}
