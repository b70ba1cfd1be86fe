// Secret Defines Configuration Module
//
// This module handles loading and parsing the optional secret-defines.yaml

use crate::render::OutputFormat;
use crate::store::{SecretTool, DEFAULT_PROGRAM};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the configuration file looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "secret-defines.yaml";

/// Secret store configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// Store program (default: secret-tool)
    pub program: String,

    /// Fixed arguments placed before collection and attribute
    pub args: Vec<String>,

    /// Remove one trailing newline from the program's output
    pub trim_trailing_newline: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args: vec!["lookup".to_string()],
            trim_trailing_newline: true,
        }
    }
}

/// Output configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format when --format is not given
    pub format: OutputFormat,
}

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))
    }

    /// Parse configuration from YAML text. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load the configuration for this invocation.
    ///
    /// An explicit path must exist. Without one, the first file found among
    /// [`default_locations`] is used, falling back to the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for candidate in default_locations() {
            if candidate.is_file() {
                debug!(path = %candidate.display(), "loading configuration");
                return Self::from_file(&candidate);
            }
        }

        debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.store.program.trim().is_empty() {
            anyhow::bail!("Store program cannot be empty");
        }

        if self.store.args.iter().any(|arg| arg.contains('\0')) {
            anyhow::bail!("Store arguments cannot contain NUL bytes");
        }

        Ok(())
    }

    /// Build the secret store described by this configuration
    pub fn secret_tool(&self) -> SecretTool {
        SecretTool::new(self.store.program.as_str(), self.store.args.clone())
            .trim_trailing_newline(self.store.trim_trailing_newline)
    }
}

/// Configuration files tried in order when no path is given:
/// `./secret-defines.yaml`, then `<config dir>/secret-defines/config.yaml`.
pub fn default_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(CONFIG_FILE_NAME)];

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("secret-defines").join("config.yaml"));
    }

    locations
}
