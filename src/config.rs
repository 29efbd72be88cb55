//! Configuration management for tasker.
//!
//! Settings come from an optional `tasker.toml` in the base directory.
//! Command-line flags override anything read from the file.
//!
//! # Example tasker.toml
//!
//! ```toml
//! tasks_file = "data/tasks.txt"
//! verbose = true
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, TaskerError};
use crate::store::DEFAULT_TASKS_FILE;

/// Name of the config file looked up in the base directory.
pub const CONFIG_FILE: &str = "tasker.toml";

/// Settings loaded from `tasker.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskerConfig {
    /// Task file location; relative paths are resolved against the base
    /// directory.
    #[serde(default = "default_tasks_file")]
    pub tasks_file: PathBuf,

    /// Enable debug logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_tasks_file() -> PathBuf {
    PathBuf::from(DEFAULT_TASKS_FILE)
}

impl Default for TaskerConfig {
    fn default() -> Self {
        Self {
            tasks_file: default_tasks_file(),
            verbose: false,
        }
    }
}

impl TaskerConfig {
    /// Load configuration from a base directory.
    ///
    /// Returns the defaults when no config file exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskerError::Config`] if the file exists but cannot be read
    /// or parsed.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = Self::config_path(base_dir);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            TaskerError::config_with_path(format!("failed to read: {e}"), path.clone())
        })?;
        Self::parse(&content).map_err(|e| match e {
            TaskerError::Config { message, .. } => TaskerError::config_with_path(message, path),
            other => other,
        })
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| TaskerError::config(e.to_string()))
    }

    /// Get the config file path for a base directory
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Resolve the task file path, honouring an explicit override.
    #[must_use]
    pub fn resolve_tasks_file(&self, base_dir: &Path, override_path: Option<&Path>) -> PathBuf {
        let path = override_path.unwrap_or(self.tasks_file.as_path());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }
}
