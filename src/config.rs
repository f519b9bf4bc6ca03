//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/mono/mono.toml`
//! 3. Project config: `<root>/mono.toml`
//! 4. Environment variables: `MONO_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for mono.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding applications, relative to the root (default: apps)
    pub apps_dir: PathBuf,
    /// Directory holding shared packages, relative to the root (default: packages)
    pub packages_dir: PathBuf,
    /// Package manager executable (default: npm)
    pub package_manager: String,
    /// Docker executable, used for the requirement check (default: docker)
    pub docker_command: String,
    /// Compose command line, may contain spaces (default: "docker compose")
    pub compose_command: String,
    /// Suffix of development containers
    pub dev_suffix: String,
    /// Suffix of production containers
    pub prod_suffix: String,
    /// Suffix of backing service containers (databases, queues)
    pub service_suffix: String,
    /// Directory names removed by `clean`
    pub clean_targets: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            apps_dir: PathBuf::from("apps"),
            packages_dir: PathBuf::from("packages"),
            package_manager: "npm".into(),
            docker_command: "docker".into(),
            compose_command: "docker compose".into(),
            dev_suffix: "-dev".into(),
            prod_suffix: "-prod".into(),
            service_suffix: "-service".into(),
            clean_targets: vec!["dist".into(), "node_modules".into()],
        }
    }
}

/// Raw settings for intermediate parsing.
///
/// Used during layered config merging to distinguish between:
/// - `None` → field not specified, inherit from base
/// - `Some([])` → explicit empty array
/// - `Some([...])` → explicit values to merge
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub apps_dir: Option<PathBuf>,
    pub packages_dir: Option<PathBuf>,
    pub package_manager: Option<String>,
    pub docker_command: Option<String>,
    pub compose_command: Option<String>,
    pub dev_suffix: Option<String>,
    pub prod_suffix: Option<String>,
    pub service_suffix: Option<String>,
    pub clean_targets: Option<Vec<String>>,
}

/// Get the XDG config directory for mono.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mono").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("mono.toml"))
}

/// Get the path to the project config file.
pub fn project_config_path(root: &Path) -> PathBuf {
    root.join("mono.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~` and `$VAR` in a path; unknown variables leave it unchanged.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(raw.as_ref()) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

impl Settings {
    /// Merge arrays with union semantics and negation support.
    ///
    /// - Items from overlay are added to base
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are de-duplicated
    ///
    /// # Examples
    /// ```ignore
    /// merge_array(&["dist"], &["build"])         // → ["build", "dist"]
    /// merge_array(&["dist", "node_modules"], &["!dist"]) // → ["node_modules"]
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: HashSet<String> = base.iter().cloned().collect();

        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                result.remove(negated);
            } else {
                result.insert(pattern.clone());
            }
        }

        // Convert to sorted Vec for deterministic output
        let mut vec: Vec<String> = result.into_iter().collect();
        vec.sort();
        vec
    }

    /// Merge project config onto self (base).
    ///
    /// - Scalar options: overlay wins if Some, otherwise keep base
    /// - Arrays: union merge with negation support (if overlay specified)
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let mut merged = self.apply_scalars(overlay);
        merged.clean_targets = overlay
            .clean_targets
            .as_ref()
            .map(|o| Self::merge_array(&self.clean_targets, o))
            .unwrap_or_else(|| self.clean_targets.clone());
        merged
    }

    /// Apply global config onto defaults with REPLACE semantics for arrays.
    ///
    /// Defaults are only a starting point; the global file defines the
    /// user's baseline. Project config (`merge_with`) then adds to it.
    fn apply_global(&self, global: &RawSettings) -> Self {
        let mut merged = self.apply_scalars(global);
        merged.clean_targets = global
            .clean_targets
            .clone()
            .unwrap_or_else(|| self.clean_targets.clone());
        merged
    }

    fn apply_scalars(&self, raw: &RawSettings) -> Self {
        Self {
            apps_dir: raw.apps_dir.clone().unwrap_or_else(|| self.apps_dir.clone()),
            packages_dir: raw
                .packages_dir
                .clone()
                .unwrap_or_else(|| self.packages_dir.clone()),
            package_manager: raw
                .package_manager
                .clone()
                .unwrap_or_else(|| self.package_manager.clone()),
            docker_command: raw
                .docker_command
                .clone()
                .unwrap_or_else(|| self.docker_command.clone()),
            compose_command: raw
                .compose_command
                .clone()
                .unwrap_or_else(|| self.compose_command.clone()),
            dev_suffix: raw.dev_suffix.clone().unwrap_or_else(|| self.dev_suffix.clone()),
            prod_suffix: raw
                .prod_suffix
                .clone()
                .unwrap_or_else(|| self.prod_suffix.clone()),
            service_suffix: raw
                .service_suffix
                .clone()
                .unwrap_or_else(|| self.service_suffix.clone()),
            clean_targets: self.clean_targets.clone(),
        }
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.apps_dir = expand_path(&self.apps_dir);
        self.packages_dir = expand_path(&self.packages_dir);
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `root` - Optional monorepo root holding a `mono.toml`
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Project: UNION with negation support
    /// - Any → Env vars: REPLACE
    pub fn load(root: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(root) = root {
            let local_path = project_config_path(root);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply MONO_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("MONO")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("clean_targets")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("apps_dir") {
            settings.apps_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("packages_dir") {
            settings.packages_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("package_manager") {
            settings.package_manager = val;
        }
        if let Ok(val) = config.get_string("docker_command") {
            settings.docker_command = val;
        }
        if let Ok(val) = config.get_string("compose_command") {
            settings.compose_command = val;
        }
        if let Ok(val) = config.get_string("dev_suffix") {
            settings.dev_suffix = val;
        }
        if let Ok(val) = config.get_string("prod_suffix") {
            settings.prod_suffix = val;
        }
        if let Ok(val) = config.get_string("service_suffix") {
            settings.service_suffix = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("clean_targets") {
            settings.clean_targets = val;
        }

        Ok(settings)
    }

    /// Reject settings no command could run with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let required = [
            ("package_manager", &self.package_manager),
            ("docker_command", &self.docker_command),
            ("compose_command", &self.compose_command),
            ("dev_suffix", &self.dev_suffix),
            ("prod_suffix", &self.prod_suffix),
            ("service_suffix", &self.service_suffix),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ApplicationError::Config {
                message: format!("{field} must not be empty"),
            });
        }
        if self.clean_targets.iter().any(|t| t.trim().is_empty() || t.contains(['/', '\\'])) {
            return Err(ApplicationError::Config {
                message: "clean_targets must be plain directory names".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# mono configuration
#
# Locations (by precedence, lowest to highest):
#   Global:  ~/.config/mono/mono.toml   (defines your baseline)
#   Project: <root>/mono.toml           (project-specific additions)
#   Env:     MONO_* environment variables (explicit overrides)
#
# Array Merge Semantics:
#   Global config REPLACES compiled defaults.
#   Project config UNIONS with global.
#   Use "!name" in project config to REMOVE an inherited item:
#     clean_targets = ["build", "!dist"]

# Workspace directories, relative to the monorepo root
# apps_dir = "apps"
# packages_dir = "packages"

# Package manager used for install/build/dev/prod
# package_manager = "npm"

# Docker and compose command lines
# docker_command = "docker"
# compose_command = "docker compose"

# Container name suffixes (see `docker compose config --services`)
# dev_suffix = "-dev"
# prod_suffix = "-prod"
# service_suffix = "-service"

# Directory names removed by `mono clean`
# clean_targets = ["dist", "node_modules"]
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
