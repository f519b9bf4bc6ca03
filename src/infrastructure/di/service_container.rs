//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{DockerService, TaskService, WorkspaceService};
use crate::config::Settings;
use crate::infrastructure::traits::{CommandRunner, FileSystem, RealCommandRunner, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    pub workspaces: WorkspaceService,
    pub tasks: TaskService,
    pub docker: DockerService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(RealCommandRunner),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            workspaces: WorkspaceService::new(fs, Arc::clone(&settings)),
            tasks: TaskService::new(Arc::clone(&cmd), Arc::clone(&settings)),
            docker: DockerService::new(cmd, Arc::clone(&settings)),
            settings,
        }
    }
}
