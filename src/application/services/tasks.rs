//! Package manager tasks (install, build, dev, prod)

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::services::{check_status, command_parts};
use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::infrastructure::traits::CommandRunner;

/// Runs package-manager scripts in the monorepo root.
pub struct TaskService {
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
}

impl TaskService {
    pub fn new(cmd: Arc<dyn CommandRunner>, settings: Arc<Settings>) -> Self {
        Self { cmd, settings }
    }

    /// Install root dependencies, then every workspace's.
    #[instrument(level = "debug", skip(self))]
    pub fn install(&self, root: &Path) -> ApplicationResult<()> {
        self.package_manager(root, &["install"])?;
        self.package_manager(root, &["install", "-ws"])
    }

    /// `npm run build`, optionally for one workspace.
    pub fn build(&self, root: &Path, workspace: Option<&str>) -> ApplicationResult<()> {
        self.run_script(root, "build", workspace)
    }

    /// `npm run dev`, optionally for one workspace.
    pub fn dev(&self, root: &Path, workspace: Option<&str>) -> ApplicationResult<()> {
        self.run_script(root, "dev", workspace)
    }

    /// `npm run start`, optionally for one workspace.
    pub fn prod(&self, root: &Path, workspace: Option<&str>) -> ApplicationResult<()> {
        self.run_script(root, "start", workspace)
    }

    #[instrument(level = "debug", skip(self))]
    fn run_script(&self, root: &Path, script: &str, workspace: Option<&str>) -> ApplicationResult<()> {
        let mut args = vec!["run", script];
        if let Some(workspace) = workspace {
            args.extend(["--workspace", workspace]);
        }
        self.package_manager(root, &args)
    }

    fn package_manager(&self, root: &Path, args: &[&str]) -> ApplicationResult<()> {
        let (program, mut full_args) = command_parts(&self.settings.package_manager);
        full_args.extend_from_slice(args);
        debug!("{} {}", program, full_args.join(" "));

        let status = self
            .cmd
            .run_interactive(program, &full_args, root)
            .with_command_context(program, &full_args)?;
        check_status(program, &full_args, status)
    }
}
