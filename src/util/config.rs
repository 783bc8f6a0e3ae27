//! Configuration file support for pmshim.
//!
//! The user configuration lives in `config.toml` under the platform config
//! directory (e.g. `~/.config/pmshim/config.toml`), or wherever `--config` /
//! `PMSHIM_CONFIG` points. Command-line flags take precedence over it.
//!
//! There is no install directory setting: it is always passed
//! explicitly or rediscovered from PATH.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::util::shell::ColorChoice;

/// pmshim configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// `pmshim disable` settings
    pub disable: DisableConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Color mode used when `--color` is not given
    pub color: Option<ColorChoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisableConfig {
    /// Worker threads for removing shims (defaults to one per CPU)
    pub jobs: Option<usize>,
}

impl Config {
    /// Default location of the user configuration file.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "pmshim").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Load from an explicit path, or from the default location.
    pub fn discover(explicit: Option<&Path>) -> Self {
        match explicit {
            Some(path) => Self::load_or_default(path),
            None => Self::default_path()
                .map(|path| Self::load_or_default(&path))
                .unwrap_or_default(),
        }
    }
}
