//! Docker compose orchestration
//!
//! Containers are grouped by name suffix: `-dev`, `-prod` and `-service`
//! (backing services such as databases). Switching between development and
//! production first takes the other stage down.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::services::{check_status, command_parts};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::infrastructure::traits::CommandRunner;

/// Container group selected by name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Dev,
    Prod,
    Service,
}

/// Service for docker compose operations.
pub struct DockerService {
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
}

impl DockerService {
    pub fn new(cmd: Arc<dyn CommandRunner>, settings: Arc<Settings>) -> Self {
        Self { cmd, settings }
    }

    fn suffix(&self, stage: Stage) -> &str {
        match stage {
            Stage::Dev => &self.settings.dev_suffix,
            Stage::Prod => &self.settings.prod_suffix,
            Stage::Service => &self.settings.service_suffix,
        }
    }

    /// Verify docker and docker compose are callable.
    #[instrument(level = "debug", skip(self))]
    pub fn check_requirements(&self) -> ApplicationResult<()> {
        let docker = self.settings.docker_command.as_str();
        if !self.responds(docker, &["--version"]) {
            return Err(ApplicationError::MissingRequirement(docker.to_string()));
        }
        let (program, mut args) = command_parts(&self.settings.compose_command);
        args.push("version");
        if !self.responds(program, &args) {
            return Err(ApplicationError::MissingRequirement(
                self.settings.compose_command.clone(),
            ));
        }
        Ok(())
    }

    fn responds(&self, program: &str, args: &[&str]) -> bool {
        match self.cmd.run(program, args) {
            Ok(output) => output.status.success(),
            Err(e) => {
                debug!("{} not callable: {}", program, e);
                false
            }
        }
    }

    /// All services declared in the compose file.
    #[instrument(level = "debug", skip(self))]
    pub fn services(&self) -> ApplicationResult<Vec<String>> {
        let (program, mut args) = command_parts(&self.settings.compose_command);
        args.extend(["config", "--services"]);

        let output = self
            .cmd
            .run(program, &args)
            .with_command_context(program, &args)?;
        check_status(program, &args, output.status)?;

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Services of `stage`, narrowed to those whose name starts with the
    /// workspace's directory name when one is given.
    pub fn containers(&self, stage: Option<Stage>, workspace: Option<&str>) -> ApplicationResult<Vec<String>> {
        let prefix = workspace
            .and_then(|w| Path::new(w).file_name())
            .map(|n| n.to_string_lossy().into_owned());

        Ok(self
            .services()?
            .into_iter()
            .filter(|name| stage.map_or(true, |s| name.ends_with(self.suffix(s))))
            .filter(|name| prefix.as_deref().map_or(true, |p| name.starts_with(p)))
            .collect())
    }

    /// `up --remove-orphans -d <containers>`
    pub fn up(&self, root: &Path, containers: &[String]) -> ApplicationResult<()> {
        self.compose(root, &["up", "--remove-orphans", "-d"], containers, &[])
    }

    /// `stop <containers> -t 0`
    pub fn stop(&self, root: &Path, containers: &[String]) -> ApplicationResult<()> {
        self.compose(root, &["stop"], containers, &["-t", "0"])
    }

    /// `rm -f <containers>`
    pub fn remove(&self, root: &Path, containers: &[String]) -> ApplicationResult<()> {
        self.compose(root, &["rm", "-f"], containers, &[])
    }

    /// `build <containers>`
    pub fn build(&self, root: &Path, containers: &[String]) -> ApplicationResult<()> {
        self.compose(root, &["build"], containers, &[])
    }

    /// Follow the logs of every container.
    pub fn logs(&self, root: &Path) -> ApplicationResult<()> {
        let (program, mut args) = command_parts(&self.settings.compose_command);
        args.extend(["logs", "-f"]);
        self.run(root, program, &args)
    }

    /// Stop and remove the containers of `stage` (all containers for `None`).
    #[instrument(level = "debug", skip(self))]
    pub fn down(&self, root: &Path, stage: Option<Stage>, workspace: Option<&str>) -> ApplicationResult<()> {
        let containers = self.containers(stage, workspace)?;
        self.stop(root, &containers)?;
        self.remove(root, &containers)
    }

    /// Take production down, then start development containers.
    #[instrument(level = "debug", skip(self))]
    pub fn dev_up(&self, root: &Path, workspace: Option<&str>) -> ApplicationResult<()> {
        self.down(root, Some(Stage::Prod), workspace)?;
        let containers = self.containers(Some(Stage::Dev), workspace)?;
        self.up(root, &containers)
    }

    /// Take development down, then start production containers.
    #[instrument(level = "debug", skip(self))]
    pub fn prod_up(&self, root: &Path, workspace: Option<&str>) -> ApplicationResult<()> {
        self.down(root, Some(Stage::Dev), workspace)?;
        let containers = self.containers(Some(Stage::Prod), workspace)?;
        self.up(root, &containers)
    }

    /// Build the images of `stage`.
    pub fn build_stage(&self, root: &Path, stage: Stage, workspace: Option<&str>) -> ApplicationResult<()> {
        let containers = self.containers(Some(stage), workspace)?;
        self.build(root, &containers)
    }

    pub fn services_up(&self, root: &Path) -> ApplicationResult<()> {
        let containers = self.containers(Some(Stage::Service), None)?;
        self.up(root, &containers)
    }

    pub fn services_down(&self, root: &Path) -> ApplicationResult<()> {
        let containers = self.containers(Some(Stage::Service), None)?;
        self.stop(root, &containers)
    }

    fn compose(&self, root: &Path, verb: &[&str], containers: &[String], trailing: &[&str]) -> ApplicationResult<()> {
        if containers.is_empty() {
            warn!("No containers found.");
            return Ok(());
        }
        let (program, mut args) = command_parts(&self.settings.compose_command);
        args.extend_from_slice(verb);
        args.extend(containers.iter().map(String::as_str));
        args.extend_from_slice(trailing);
        self.run(root, program, &args)
    }

    fn run(&self, root: &Path, program: &str, args: &[&str]) -> ApplicationResult<()> {
        debug!("{} {}", program, args.join(" "));
        let status = self
            .cmd
            .run_interactive(program, args, root)
            .with_command_context(program, args)?;
        check_status(program, args, status)
    }
}
