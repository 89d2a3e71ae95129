//! Configuration for the `skilltree` command.
//!
//! The config file is TOML. Every field is optional; missing fields take
//! their defaults, and a missing file is the same as an empty one.
//!
//! ```toml
//! save_path = "skill_tree/skill_tree.json"
//! grid_size = 60.0
//! autosave = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use skilltree_core::DEFAULT_GRID_SIZE;
use skilltree_persist::PersistenceEngine;

use crate::error::{Error, Result};

/// Name used for the config directory and in help messages.
pub const PROJECT_NAME: &str = "skilltree";

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "SKILLTREE_CONFIG";

/// Default location of the primary save file, relative to the working directory.
pub const DEFAULT_SAVE_PATH: &str = "skill_tree/skill_tree.json";

/// Settings for the skill tree tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillTreeConfig {
    /// Primary save file.
    pub save_path: PathBuf,

    /// Snapping grid spacing.
    pub grid_size: f64,

    /// Write an autosave after every change.
    pub autosave: bool,

    /// Autosave file (defaults to `<save stem>.autosave.json`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosave_path: Option<PathBuf>,

    /// Backup file (defaults to `<save stem>.backup.json`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,
}

impl Default for SkillTreeConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            grid_size: DEFAULT_GRID_SIZE,
            autosave: true,
            autosave_path: None,
            backup_path: None,
        }
    }
}

impl SkillTreeConfig {
    /// `<config dir>/skilltree/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Picks the config file: explicit path, then `SKILLTREE_CONFIG`, then
    /// the platform default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => Self::default_config_path(),
        }
    }

    /// Loads the resolved config file, or defaults if there is none.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Loads and validates a specific config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no editor could work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(Error::config(format!(
                "grid_size must be a positive number, got {}",
                self.grid_size
            )));
        }
        if self.save_path.as_os_str().is_empty() {
            return Err(Error::config("save_path must not be empty"));
        }
        Ok(())
    }

    /// Serializes to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builds a persistence engine for the configured files.
    pub fn engine(&self) -> PersistenceEngine {
        let mut engine = PersistenceEngine::new(&self.save_path);
        if let Some(path) = &self.autosave_path {
            engine = engine.with_autosave_path(path);
        }
        if let Some(path) = &self.backup_path {
            engine = engine.with_backup_path(path);
        }
        engine
    }
}
