//! End-to-end tests of the mono command vocabulary

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use mono::cli::commands::{mono_cli, run};
use mono::cli::CliError;
use mono::config::Settings;
use mono::exitcode;
use mono::infrastructure::di::ServiceContainer;
use mono::infrastructure::traits::RealFileSystem;
use mono::util::testing::{init_test_setup, RecordingRunner};

fn container(runner: &Arc<RecordingRunner>) -> ServiceContainer {
    ServiceContainer::with_deps(Settings::default(), Arc::new(RealFileSystem), runner.clone())
}

fn monorepo() -> TempDir {
    let temp = TempDir::new().unwrap();
    for dir in ["apps/api/dist", "apps/web", "packages/ui/node_modules"] {
        std::fs::create_dir_all(temp.path().join(dir)).unwrap();
    }
    temp
}

fn compose_runner() -> Arc<RecordingRunner> {
    Arc::new(
        RecordingRunner::new().with_stdout("docker compose config --services", "api-dev\napi-prod\nweb-prod\n"),
    )
}

#[test]
fn given_build_with_workspace_when_running_then_package_manager_builds_it() {
    // Arrange
    init_test_setup();
    let temp = monorepo();
    let runner = Arc::new(RecordingRunner::new());
    let services = container(&runner);

    // Act
    run(&services, temp.path(), "build apps/api").unwrap();

    // Assert
    assert_eq!(runner.lines(), vec!["npm run build --workspace apps/api"]);
}

#[test]
fn given_build_with_docker_when_running_then_prod_images_are_built() {
    // Arrange
    let temp = monorepo();
    let runner = compose_runner();
    let services = container(&runner);

    // Act
    run(&services, temp.path(), "build --docker").unwrap();

    // Assert
    assert_eq!(
        runner.lines(),
        vec![
            "docker --version",
            "docker compose version",
            "docker compose config --services",
            "docker compose build api-prod web-prod",
        ]
    );
}

#[test]
fn given_dev_with_docker_for_workspace_when_running_then_switches_stage() {
    let temp = monorepo();
    let runner = compose_runner();
    let services = container(&runner);

    run(&services, temp.path(), "dev apps/api --docker").unwrap();

    let lines = runner.lines();
    assert!(lines.contains(&"docker compose stop api-prod -t 0".to_string()));
    assert_eq!(
        lines.last().map(String::as_str),
        Some("docker compose up --remove-orphans -d api-dev")
    );
}

#[test]
fn given_missing_workspace_when_building_then_noinput_and_nothing_runs() {
    // Arrange
    let temp = monorepo();
    let runner = Arc::new(RecordingRunner::new());
    let services = container(&runner);

    // Act
    let err = run(&services, temp.path(), "build apps/missing").unwrap_err();

    // Assert
    assert_eq!(err.exit_code(), exitcode::NOINPUT);
    assert!(runner.lines().is_empty());
}

#[test]
fn given_unknown_command_when_running_then_usage_error() {
    let temp = monorepo();
    let runner = Arc::new(RecordingRunner::new());
    let services = container(&runner);

    let err = run(&services, temp.path(), "deploy").unwrap_err();

    assert_eq!(err.to_string(), "command not found: \"deploy\"");
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_clean_dry_run_when_running_then_nothing_is_removed() {
    let temp = monorepo();
    let runner = Arc::new(RecordingRunner::new());
    let services = container(&runner);

    run(&services, temp.path(), "clean --dry-run").unwrap();

    assert!(temp.path().join("apps/api/dist").is_dir());
    assert!(temp.path().join("packages/ui/node_modules").is_dir());
}

#[test]
fn given_clean_when_running_then_targets_are_removed() {
    let temp = monorepo();
    let runner = Arc::new(RecordingRunner::new());
    let services = container(&runner);

    run(&services, temp.path(), "clean").unwrap();

    assert!(!temp.path().join("apps/api/dist").exists());
    assert!(!temp.path().join("packages/ui/node_modules").exists());
    assert!(temp.path().join("apps/web").is_dir());
}

#[test]
fn given_unknown_services_state_when_running_then_invalid_args() {
    let temp = monorepo();
    let runner = compose_runner();
    let services = container(&runner);

    let err = run(&services, temp.path(), "services sideways").unwrap_err();

    assert!(matches!(err, CliError::InvalidArgs(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_missing_docker_when_logs_then_unavailable() {
    let temp = monorepo();
    let runner = Arc::new(RecordingRunner::new().without_program("docker"));
    let services = container(&runner);

    let err = run(&services, temp.path(), "logs").unwrap_err();

    assert_eq!(err.exit_code(), exitcode::UNAVAILABLE);
}

#[test]
fn given_help_and_config_when_running_then_succeed_without_commands() {
    let temp = monorepo();
    let runner = Arc::new(RecordingRunner::new());
    let services = container(&runner);

    run(&services, temp.path(), "help").unwrap();
    run(&services, temp.path(), "config").unwrap();
    run(&services, temp.path(), "config path").unwrap();
    run(&services, temp.path(), "list").unwrap();

    assert!(runner.lines().is_empty());
}

#[test]
fn given_vocabulary_when_listing_usage_then_every_command_is_registered() {
    let runner = Arc::new(RecordingRunner::new());
    let services = container(&runner);

    let cli = mono_cli(&services, Path::new("/repo")).unwrap();

    let names: Vec<_> = cli.commands().map(|c| c.name().to_string()).collect();
    assert_eq!(
        names,
        vec![
            "install", "build", "dev", "prod", "down", "clean", "list", "logs", "services", "config",
            "help"
        ]
    );
    assert!(cli.usage().contains(&"clean [path] [--dry-run]".to_string()));
}

#[test]
fn given_build_with_docker_and_dev_when_running_then_dev_images_are_built() {
    // Arrange
    let temp = monorepo();
    let runner = compose_runner();
    let services = container(&runner);

    // Act
    run(&services, temp.path(), "build --docker --dev").unwrap();

    // Assert
    assert_eq!(
        runner.lines().last().map(String::as_str),
        Some("docker compose build api-dev")
    );
}

#[test]
fn given_down_with_dev_when_running_then_only_dev_containers_stop() {
    // Arrange
    let temp = monorepo();
    let runner = compose_runner();
    let services = container(&runner);

    // Act
    run(&services, temp.path(), "down --dev").unwrap();

    // Assert
    let interactive: Vec<_> = runner
        .calls()
        .into_iter()
        .filter(|c| c.cwd.is_some())
        .map(|c| c.line)
        .collect();
    assert_eq!(
        interactive,
        vec!["docker compose stop api-dev -t 0", "docker compose rm -f api-dev"]
    );
}

#[test]
fn given_down_with_prod_for_workspace_when_running_then_scoped_to_both() {
    let temp = monorepo();
    let runner = compose_runner();
    let services = container(&runner);

    run(&services, temp.path(), "down apps/web --prod").unwrap();

    let lines = runner.lines();
    assert!(lines.contains(&"docker compose stop web-prod -t 0".to_string()));
    assert!(lines.contains(&"docker compose rm -f web-prod".to_string()));
    assert!(!lines.iter().any(|l| l.contains("api-")));
}

#[test]
fn given_down_without_stage_when_running_then_every_container_stops() {
    let temp = monorepo();
    let runner = compose_runner();
    let services = container(&runner);

    run(&services, temp.path(), "down").unwrap();

    assert!(runner
        .lines()
        .contains(&"docker compose stop api-dev api-prod web-prod -t 0".to_string()));
}
