//! Installer settings: where the stack lives and where it is fetched from.
//!
//! Every field has a default matching the stock Intercity deployment, so the
//! settings file is optional. It is looked up from `--config`, then the
//! `INTERCITY_SERVER_CONFIG` environment variable, then
//! [`DEFAULT_SETTINGS_PATH`].
pub mod toml_loader;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::InstallError;

/// Settings file consulted when neither `--config` nor the env var is set.
pub const DEFAULT_SETTINGS_PATH: &str = "/etc/intercity-server/config.toml";

/// Environment variable overriding the settings file location.
pub const SETTINGS_ENV_VAR: &str = "INTERCITY_SERVER_CONFIG";

/// Location and source of the Intercity deployment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Installation directory; its existence marks the stack as installed.
    pub install_dir: PathBuf,
    /// Git URL of the deployment repository.
    pub repository_url: String,
    /// Branch of the deployment repository to clone.
    pub branch: String,
    /// URL of the Docker convenience install script.
    pub docker_install_url: String,
    /// Container definition name passed to the launcher.
    pub container: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            install_dir: PathBuf::from("/var/intercity"),
            repository_url: "https://github.com/intercity/intercity-docker.git".to_string(),
            branch: "0-4-stable".to_string(),
            docker_install_url: "https://get.docker.com".to_string(),
            container: "app".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is not valid TOML or contains
    /// unknown keys.
    pub fn load(path: &Path) -> Result<Self, InstallError> {
        toml_loader::load_config(path)
    }

    /// Settings with everything rooted under `install_dir` (test helper and
    /// programmatic use).
    #[must_use]
    pub fn with_install_dir(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            install_dir: install_dir.into(),
            ..Self::default()
        }
    }

    /// Path of the installation marker.
    #[must_use]
    pub fn marker(&self) -> &Path {
        &self.install_dir
    }

    /// The deployment repository's launcher script.
    #[must_use]
    pub fn launcher(&self) -> PathBuf {
        self.install_dir.join("launcher")
    }

    /// Sample configuration shipped with the deployment repository.
    #[must_use]
    pub fn sample_config(&self) -> PathBuf {
        self.install_dir.join("samples").join("app.yml")
    }

    /// Container configuration that the launcher reads.
    #[must_use]
    pub fn container_config(&self) -> PathBuf {
        self.install_dir
            .join("containers")
            .join(format!("{}.yml", self.container))
    }
}

/// Resolve which settings file to read.
#[must_use]
pub fn resolve_settings_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    std::env::var_os(SETTINGS_ENV_VAR)
        .filter(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH), PathBuf::from)
}
