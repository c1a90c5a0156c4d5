//! Project configuration (`seraf.toml`).
//!
//! Every key is optional; a missing file means defaults.
//!
//! ```toml
//! [paths]
//! modules_dir = "api/src/modules"
//!
//! [generation]
//! filter_keys = ["email", "status"]
//! list_limit = 10
//! list_offset = 0
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::entity::EntityName;
use crate::error::{SerafError, SerafResult};

/// Name of the configuration file looked up in the project directory.
pub const CONFIG_FILE: &str = "seraf.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SerafConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Where modules live, relative to the project directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_modules_dir")]
    pub modules_dir: PathBuf,
}

/// Defaults applied to generated code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Field names usable as list filters when none are given on the CLI.
    #[serde(default)]
    pub filter_keys: Vec<String>,

    #[serde(default = "default_list_limit")]
    pub list_limit: u32,

    #[serde(default)]
    pub list_offset: u32,
}

fn default_modules_dir() -> PathBuf {
    PathBuf::from("api/src/modules")
}

fn default_list_limit() -> u32 {
    10
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            modules_dir: default_modules_dir(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            filter_keys: Vec::new(),
            list_limit: default_list_limit(),
            list_offset: 0,
        }
    }
}

impl SerafConfig {
    /// Load `seraf.toml` from the project directory, falling back to defaults.
    pub fn load(project_dir: &Path) -> SerafResult<Self> {
        let path = project_dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> SerafResult<Self> {
        toml::from_str(content).map_err(|e| SerafError::Config(e.to_string()))
    }

    /// Absolute modules directory for a project.
    pub fn modules_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.paths.modules_dir)
    }

    /// Directory of one entity's module.
    pub fn module_dir(&self, project_dir: &Path, entity: &EntityName) -> PathBuf {
        self.modules_dir(project_dir).join(entity.as_str())
    }

    /// Default location of an entity's model interface.
    pub fn model_path(&self, project_dir: &Path, entity: &EntityName) -> PathBuf {
        self.module_dir(project_dir, entity)
            .join("models")
            .join(format!("{}.ts", entity.model_name()))
    }
}
