//! Configuration loading for prasatd.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.prasat/config.toml` (user)
//! 3. `/etc/prasat/config.toml` (system)
//!
//! When no file exists the built-in defaults are used, so a bare `prasatd`
//! serves the model found at `models/temple_classifier.onnx` (or
//! `$PRASAT_MODEL_PATH`).

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::ContentTable;
use crate::model::ModelConfig;
use crate::preprocess::PreprocessConfig;
use crate::{PrasatError, Result};

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub preprocess: PreprocessConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

/// Server network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:9742).
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            limits: LimitsConfig::default(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1:9742".to_string()
}

/// Resource limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum concurrent requests per connection (default: 100).
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Largest accepted upload in bytes (default: 16 MiB).
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: default_max_concurrent(),
            request_timeout_secs: default_timeout(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

fn default_max_concurrent() -> usize {
    100
}

fn default_timeout() -> u64 {
    30
}

fn default_max_image_bytes() -> usize {
    16 * 1024 * 1024
}

/// Display content configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// Replacement for the built-in content table.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl ContentConfig {
    /// Load the configured table, or the built-in one.
    pub fn load_table(&self) -> Result<ContentTable> {
        match &self.path {
            Some(path) => ContentTable::from_path(path),
            None => ContentTable::embedded(),
        }
    }
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided; must exist)
    /// 2. `~/.prasat/config.toml`
    /// 3. `/etc/prasat/config.toml`
    /// 4. Built-in defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::info!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PrasatError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        let config = toml::from_str(&content).map_err(|e| {
            PrasatError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(PrasatError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".prasat").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/prasat/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }
}
