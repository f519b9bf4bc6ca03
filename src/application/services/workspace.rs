//! Workspace service
//!
//! Discovers applications and packages and removes build output.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{EntryKind, Workspace, WorkspaceKind};
use crate::infrastructure::traits::FileSystem;

/// Filter for directory listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Keep only entries of this kind
    pub kind: Option<EntryKind>,
    /// Keep only entries with this file name
    pub name: Option<String>,
    /// Descend into sub-directories
    pub recursive: bool,
}

impl EntryFilter {
    pub fn directories() -> Self {
        Self {
            kind: Some(EntryKind::Directory),
            ..Self::default()
        }
    }

    pub fn directories_named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::directories()
        }
    }
}

/// Service for workspace discovery and cleanup.
pub struct WorkspaceService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl WorkspaceService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// List entries inside `dir` that pass `filter`.
    #[instrument(level = "debug", skip(self))]
    pub fn entries(&self, dir: &Path, filter: &EntryFilter) -> ApplicationResult<Vec<PathBuf>> {
        let paths = self
            .fs
            .read_dir(dir, filter.recursive)
            .with_path_context("read directory", dir)?;

        let mut matches = Vec::new();
        for path in paths {
            if let Some(name) = &filter.name {
                if path.file_name().map_or(true, |n| n != name.as_str()) {
                    continue;
                }
            }
            if let Some(kind) = filter.kind {
                let actual = self
                    .fs
                    .entry_kind(&path)
                    .with_path_context("inspect entry", &path)?;
                if actual != kind {
                    continue;
                }
            }
            matches.push(path);
        }
        Ok(matches)
    }

    /// Applications and packages found under the root, apps first.
    #[instrument(level = "debug", skip(self))]
    pub fn workspaces(&self, root: &Path) -> ApplicationResult<Vec<Workspace>> {
        let mut workspaces = Vec::new();
        for (kind, dir) in [
            (WorkspaceKind::App, &self.settings.apps_dir),
            (WorkspaceKind::Package, &self.settings.packages_dir),
        ] {
            let base = root.join(dir);
            if !self.fs.is_dir(&base) {
                debug!("workspaces: no {} directory at {}", kind, base.display());
                continue;
            }
            for path in self.entries(&base, &EntryFilter::directories())? {
                let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                    continue;
                };
                workspaces.push(Workspace {
                    kind,
                    path: dir.join(&name),
                    name,
                });
            }
        }
        debug!("workspaces: found {}", workspaces.len());
        Ok(workspaces)
    }

    /// Validate an explicit workspace path given relative to the root.
    pub fn resolve(&self, root: &Path, path: &str) -> ApplicationResult<PathBuf> {
        let candidate = root.join(path);
        if self.fs.is_dir(&candidate) {
            Ok(candidate)
        } else {
            Err(ApplicationError::PathNotFound(PathBuf::from(path)))
        }
    }

    /// Directories `clean` would remove.
    ///
    /// Looks directly inside the root and inside each workspace (or only
    /// inside `path` when given) for directories named in `clean_targets`.
    #[instrument(level = "debug", skip(self))]
    pub fn clean_targets(&self, root: &Path, path: Option<&str>) -> ApplicationResult<Vec<PathBuf>> {
        let dirs = match path {
            Some(path) => vec![self.resolve(root, path)?],
            None => std::iter::once(root.to_path_buf())
                .chain(self.workspaces(root)?.into_iter().map(|w| root.join(w.path)))
                .collect(),
        };

        let mut targets = Vec::new();
        for dir in &dirs {
            for name in &self.settings.clean_targets {
                targets.extend(self.entries(dir, &EntryFilter::directories_named(name))?);
            }
        }
        targets.sort();
        targets.dedup();
        Ok(targets)
    }

    /// Remove build output and dependency directories.
    ///
    /// Returns the directories removed (or, with `dry_run`, that would be).
    pub fn clean(&self, root: &Path, path: Option<&str>, dry_run: bool) -> ApplicationResult<Vec<PathBuf>> {
        let targets = self.clean_targets(root, path)?;
        if dry_run {
            debug!("clean: dry run, {} targets", targets.len());
            return Ok(targets);
        }
        for target in &targets {
            self.fs
                .remove_dir_all(target)
                .with_path_context("remove directory", target)?;
            info!("clean: removed {}", target.display());
        }
        Ok(targets)
    }
}
