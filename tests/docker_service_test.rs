//! Tests for DockerService (commands recorded, nothing spawned)

use std::path::Path;
use std::sync::Arc;

use mono::application::services::{DockerService, Stage};
use mono::application::ApplicationError;
use mono::config::Settings;
use mono::util::testing::RecordingRunner;

const SERVICES: &str = "docker compose config --services";
const LISTING: &str = "api-dev\napi-prod\nweb-dev\nweb-prod\npostgres-service\n\n";

fn docker(runner: &Arc<RecordingRunner>) -> DockerService {
    DockerService::new(runner.clone(), Arc::new(Settings::default()))
}

fn runner() -> Arc<RecordingRunner> {
    Arc::new(RecordingRunner::new().with_stdout(SERVICES, LISTING))
}

#[test]
fn given_compose_services_when_filtering_by_stage_then_suffix_selects() {
    // Arrange
    let runner = runner();

    // Act
    let dev = docker(&runner).containers(Some(Stage::Dev), None).unwrap();
    let all = docker(&runner).containers(None, None).unwrap();

    // Assert
    assert_eq!(dev, vec!["api-dev", "web-dev"]);
    assert_eq!(all.len(), 5);
}

#[test]
fn given_workspace_path_when_filtering_then_directory_name_is_prefix() {
    let runner = runner();

    let containers = docker(&runner)
        .containers(Some(Stage::Prod), Some("./apps/web"))
        .unwrap();

    assert_eq!(containers, vec!["web-prod"]);
}

#[test]
fn given_dev_up_when_running_then_prod_goes_down_first() {
    // Arrange
    let runner = runner();
    let root = Path::new("/repo");

    // Act
    docker(&runner).dev_up(root, None).unwrap();

    // Assert
    let interactive: Vec<_> = runner
        .calls()
        .into_iter()
        .filter(|c| c.cwd.is_some())
        .map(|c| c.line)
        .collect();
    assert_eq!(
        interactive,
        vec![
            "docker compose stop api-prod web-prod -t 0",
            "docker compose rm -f api-prod web-prod",
            "docker compose up --remove-orphans -d api-dev web-dev",
        ]
    );
    assert!(runner
        .calls()
        .iter()
        .filter(|c| c.cwd.is_some())
        .all(|c| c.cwd.as_deref() == Some(root)));
}

#[test]
fn given_prod_up_for_workspace_when_running_then_scoped_to_it() {
    let runner = runner();

    docker(&runner).prod_up(Path::new("/repo"), Some("apps/api")).unwrap();

    let lines = runner.lines();
    assert!(lines.contains(&"docker compose stop api-dev -t 0".to_string()));
    assert!(lines.contains(&"docker compose up --remove-orphans -d api-prod".to_string()));
    assert!(!lines.iter().any(|l| l.contains("web-")));
}

#[test]
fn given_no_matching_containers_when_down_then_no_compose_call() {
    // Arrange
    let runner = runner();

    // Act
    docker(&runner)
        .down(Path::new("/repo"), None, Some("apps/unknown"))
        .unwrap();

    // Assert
    assert_eq!(runner.lines(), vec![SERVICES]);
}

#[test]
fn given_build_stage_when_running_then_builds_prod_images() {
    let runner = runner();

    docker(&runner)
        .build_stage(Path::new("/repo"), Stage::Prod, None)
        .unwrap();

    assert_eq!(
        runner.lines().last().map(String::as_str),
        Some("docker compose build api-prod web-prod")
    );
}

#[test]
fn given_services_when_up_and_down_then_only_backing_services() {
    let runner = runner();
    let svc = docker(&runner);

    svc.services_up(Path::new("/repo")).unwrap();
    svc.services_down(Path::new("/repo")).unwrap();

    let lines = runner.lines();
    assert!(lines.contains(&"docker compose up --remove-orphans -d postgres-service".to_string()));
    assert!(lines.contains(&"docker compose stop postgres-service -t 0".to_string()));
}

#[test]
fn given_missing_docker_when_checking_requirements_then_missing_requirement() {
    let runner = Arc::new(RecordingRunner::new().without_program("docker"));

    let err = docker(&runner).check_requirements().unwrap_err();

    assert!(matches!(err, ApplicationError::MissingRequirement(ref p) if p == "docker"));
}

#[test]
fn given_compose_plugin_missing_when_checking_requirements_then_names_compose() {
    let runner = Arc::new(RecordingRunner::new().with_exit_code("docker compose version", 1));

    let err = docker(&runner).check_requirements().unwrap_err();

    assert_eq!(
        err.to_string(),
        "docker compose is not installed or could not be found"
    );
    assert_eq!(runner.lines(), vec!["docker --version", "docker compose version"]);
}

#[test]
fn given_failing_compose_when_up_then_operation_failed() {
    let runner = Arc::new(
        RecordingRunner::new()
            .with_stdout(SERVICES, LISTING)
            .with_exit_code("docker compose up --remove-orphans -d postgres-service", 1),
    );

    let err = docker(&runner).services_up(Path::new("/repo")).unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
}

#[test]
fn given_custom_compose_command_when_listing_then_used_verbatim() {
    // Arrange
    let runner = Arc::new(RecordingRunner::new().with_stdout("podman-compose config --services", "db-service\n"));
    let settings = Settings {
        compose_command: "podman-compose".into(),
        ..Settings::default()
    };
    let svc = DockerService::new(runner.clone(), Arc::new(settings));

    // Act
    let services = svc.services().unwrap();

    // Assert
    assert_eq!(services, vec!["db-service"]);
}
