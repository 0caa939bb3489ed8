//! Configuration types and loading.
//!
//! Configuration comes from an optional YAML file with per-field defaults;
//! CLI flags override individual values after loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default port for the HTTP API.
pub const DEFAULT_PORT: u16 = 8077;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "taskboard.yaml";

/// Server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind (default: 127.0.0.1).
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind (default: 8077).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the store files (default: data).
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// File name for the task list store (default: task_lists.json).
    #[serde(default = "default_lists_file")]
    pub lists_file: String,

    /// File name for the task store (default: tasks.json).
    #[serde(default = "default_tasks_file")]
    pub tasks_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            lists_file: default_lists_file(),
            tasks_file: default_tasks_file(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_lists_file() -> String {
    "task_lists.json".to_string()
}

fn default_tasks_file() -> String {
    "tasks.json".to_string()
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// config file is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Create the data directory when missing.
    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.server.data_dir).with_context(|| {
            format!(
                "Failed to create data directory {}",
                self.server.data_dir.display()
            )
        })
    }

    /// Path of the task list store file.
    pub fn lists_path(&self) -> PathBuf {
        self.server.data_dir.join(&self.server.lists_file)
    }

    /// Path of the task store file.
    pub fn tasks_path(&self) -> PathBuf {
        self.server.data_dir.join(&self.server.tasks_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_file() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.lists_path(), PathBuf::from("data/task_lists.json"));
        assert_eq!(config.tasks_path(), PathBuf::from("data/tasks.json"));
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("server:\n  port: 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.tasks_file, "tasks.json");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let result = Config::load(Some(Path::new("does-not-exist.yaml")));
        assert!(result.is_err());
    }
}
