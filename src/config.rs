//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/socgraph/socgraph.toml`
//! 3. Local config: `<dir>/.socgraph.toml` (working directory by default)
//! 4. Environment variables: `SOCGRAPH_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for socgraph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Dataset file with USER/FRIEND records (default: veriseti.txt)
    pub dataset: PathBuf,
    /// Maximum number of users, 0 for unbounded
    pub max_users: usize,
    /// Maximum display name length in characters, 0 for unbounded
    pub max_name_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("veriseti.txt"),
            max_users: 100,
            max_name_length: 49,
        }
    }
}

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub dataset: Option<PathBuf>,
    pub max_users: Option<usize>,
    pub max_name_length: Option<usize>,
}

/// Get the XDG config directory for socgraph.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "socgraph").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("socgraph.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".socgraph.toml")
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

/// Expand shell variables and tilde in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Directory capacity, None when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        (self.max_users > 0).then_some(self.max_users)
    }

    /// Name length bound, None when unbounded.
    pub fn name_limit(&self) -> Option<usize> {
        (self.max_name_length > 0).then_some(self.max_name_length)
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            dataset: overlay
                .dataset
                .clone()
                .unwrap_or_else(|| self.dataset.clone()),
            max_users: overlay.max_users.unwrap_or(self.max_users),
            max_name_length: overlay.max_name_length.unwrap_or(self.max_name_length),
        }
    }

    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.dataset.to_string_lossy().as_ref());
        self.dataset = PathBuf::from(expanded);
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Directory searched for `.socgraph.toml`, None to skip
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply SOCGRAPH_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SOCGRAPH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("dataset") {
            settings.dataset = PathBuf::from(val);
        }
        match config.get::<usize>("max_users") {
            Ok(val) => settings.max_users = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get::<usize>("max_name_length") {
            Ok(val) => settings.max_name_length = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Serialize to TOML, e.g. for `config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
