//! Command vocabulary of the `mono` binary
//!
//! Commands are registered on the embedded [`Cli`] dispatcher; the raw command
//! line collected by clap is then parsed and dispatched in one go.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::application::services::Stage;
use crate::cli::args::Args;
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, project_config_path, Settings};
use crate::domain::{Cli, DispatchResult, OptionOpts};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Load settings for the selected root and dispatch the command line.
pub fn execute_command(args: &Args) -> CliResult<()> {
    let root = match &args.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("resolve current directory", e))?,
    };
    let settings = Settings::load(Some(root.as_path()))?;
    let container = ServiceContainer::new(settings);

    let line = args.command_line();
    run(&container, &root, if line.is_empty() { "help" } else { line.as_str() })
}

/// Build the command set and dispatch `line`.
#[instrument(level = "debug", skip(services))]
pub fn run(services: &ServiceContainer, root: &Path, line: &str) -> CliResult<()> {
    let mut cli = mono_cli(services, root)?;
    cli.parse(line)
}

/// Register the mono commands.
pub fn mono_cli<'a>(services: &'a ServiceContainer, root: &'a Path) -> CliResult<Cli<'a, CliError>> {
    let cli = Cli::<CliError>::new()
        .add_command("install")
        .describe("Install root and workspace dependencies")?
        .action(move |_| {
            services.tasks.install(root)?;
            output::success("dependencies installed");
            Ok(())
        })?
        .add_command("build")
        .describe("Build workspaces, or the prod (--dev: dev) images with --docker")?
        .add_positional("path")?
        .add_option("docker")?
        .add_option_with("dev", OptionOpts { default: false })?
        .action(move |args| {
            let path = args.positional("path");
            if args.flag("docker") {
                let stage = if args.flag("dev") { Stage::Dev } else { Stage::Prod };
                services.docker.check_requirements()?;
                services.docker.build_stage(root, stage, path)?;
            } else {
                resolve(services, root, path)?;
                services.tasks.build(root, path)?;
            }
            output::success("build finished");
            Ok(())
        })?
        .add_command("dev")
        .describe("Start in development mode, or the dev containers with --docker")?
        .add_positional("path")?
        .add_option("docker")?
        .action(move |args| {
            let path = args.positional("path");
            if args.flag("docker") {
                services.docker.check_requirements()?;
                services.docker.dev_up(root, path)?;
            } else {
                resolve(services, root, path)?;
                services.tasks.dev(root, path)?;
            }
            Ok(())
        })?
        .add_command("prod")
        .describe("Start in production mode, or the prod containers with --docker")?
        .add_positional("path")?
        .add_option("docker")?
        .action(move |args| {
            let path = args.positional("path");
            if args.flag("docker") {
                services.docker.check_requirements()?;
                services.docker.prod_up(root, path)?;
            } else {
                resolve(services, root, path)?;
                services.tasks.prod(root, path)?;
            }
            Ok(())
        })?
        .add_command("down")
        .describe("Stop and remove containers, optionally one stage (--dev, --prod) or workspace")?
        .add_positional("path")?
        .add_option_with("dev", OptionOpts { default: false })?
        .add_option_with("prod", OptionOpts { default: false })?
        .action(move |args| {
            let stage = match (args.flag("dev"), args.flag("prod")) {
                (true, false) => Some(Stage::Dev),
                (false, true) => Some(Stage::Prod),
                _ => None,
            };
            services.docker.check_requirements()?;
            services.docker.down(root, stage, args.positional("path"))?;
            Ok(())
        })?
        .add_command("clean")
        .describe("Remove build output and installed dependencies")?
        .add_positional("path")?
        .add_option("dry-run")?
        .action(move |args| clean(services, root, args))?
        .add_command("list")
        .describe("List applications and packages")?
        .action(move |_| {
            let workspaces = services.workspaces.workspaces(root)?;
            output::header(&format!("Workspaces ({})", workspaces.len()));
            for workspace in &workspaces {
                output::detail(&format!("{:<8} {}", workspace.kind, workspace.path.display()));
            }
            Ok(())
        })?
        .add_command("logs")
        .describe("Follow container logs")?
        .action(move |_| {
            services.docker.check_requirements()?;
            services.docker.logs(root)?;
            Ok(())
        })?
        .add_command("services")
        .describe("Start (up) or stop (down) backing service containers")?
        .add_positional("state")?
        .action(move |args| {
            services.docker.check_requirements()?;
            match args.positional("state").unwrap_or("up") {
                "up" => services.docker.services_up(root)?,
                "down" => services.docker.services_down(root)?,
                other => {
                    return Err(CliError::InvalidArgs(format!(
                        "unknown services state: {other} (expected up or down)"
                    )))
                }
            }
            Ok(())
        })?
        .add_command("config")
        .describe("Show the effective config (show), a template (template) or file locations (path)")?
        .add_positional("action")?
        .action(move |args| config(services, root, args))?;

    let listing: Vec<(String, String)> = cli
        .commands()
        .map(|c| (c.usage(), c.about().unwrap_or_default().to_string()))
        .chain(std::iter::once(("help".to_string(), "Show this help".to_string())))
        .collect();
    debug!("registered {} commands", listing.len());

    Ok(cli
        .add_command("help")
        .describe("Show this help")?
        .action(move |_| {
            output::header("Usage: mono [-d] [-C <dir>] <command> [args]");
            for (usage, about) in &listing {
                output::detail(&format!("{usage:<28} {about}"));
            }
            Ok(())
        })?)
}

/// Fail early with a clear message when an explicit workspace does not exist.
fn resolve(services: &ServiceContainer, root: &Path, path: Option<&str>) -> CliResult<Option<PathBuf>> {
    Ok(path
        .map(|p| services.workspaces.resolve(root, p))
        .transpose()?)
}

fn clean(services: &ServiceContainer, root: &Path, args: &DispatchResult) -> CliResult<()> {
    let dry_run = args.flag("dry-run");
    let removed = services
        .workspaces
        .clean(root, args.positional("path"), dry_run)?;

    if removed.is_empty() {
        output::warning("nothing to clean");
        return Ok(());
    }
    let label = if dry_run { "would remove" } else { "removed" };
    for path in &removed {
        let shown = path.strip_prefix(root).unwrap_or(path);
        output::action(label, &shown.display());
    }
    Ok(())
}

fn config(services: &ServiceContainer, root: &Path, args: &DispatchResult) -> CliResult<()> {
    match args.positional("action").unwrap_or("show") {
        "show" => output::info(&services.settings.to_toml()?),
        "template" => output::info(&Settings::template()),
        "path" => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", "unavailable"),
            }
            output::action("project", &project_config_path(root).display());
        }
        other => {
            return Err(CliError::InvalidArgs(format!(
                "unknown config action: {other} (expected show, template or path)"
            )))
        }
    }
    Ok(())
}
