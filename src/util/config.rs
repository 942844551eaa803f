//! Configuration file support for jnilibs.
//!
//! jnilibs supports two configuration file locations:
//! - Global: `~/.jnilibs/config.toml` - User-wide defaults
//! - Project: `.jnilibs/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::abi::Abi;

/// jnilibs configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Staging settings
    pub stage: StageConfig,

    /// NDK lookup settings
    pub ndk: NdkConfig,
}

/// Staging-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Staging root relative to the project root (default `app/src/main/jniLibs`)
    pub jni_libs_dir: Option<PathBuf>,

    /// ABIs to stage (default: all supported ABIs)
    pub abis: Option<Vec<Abi>>,
}

/// NDK lookup configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NdkConfig {
    /// Properties file holding `ndk.dir`, relative to the project root
    pub properties_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
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

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.stage.jni_libs_dir.is_some() {
            self.stage.jni_libs_dir = other.stage.jni_libs_dir;
        }
        if other.stage.abis.is_some() {
            self.stage.abis = other.stage.abis;
        }
        if other.ndk.properties_file.is_some() {
            self.ndk.properties_file = other.ndk.properties_file;
        }
    }

    /// Get the configured ABI selection, if any.
    pub fn abis(&self) -> Option<Vec<Abi>> {
        self.stage.abis.clone()
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.jnilibs/config.toml)
/// 2. Global config (~/.jnilibs/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global jnilibs config directory (~/.jnilibs).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".jnilibs"))
}

/// Get the global config path (~/.jnilibs/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.jnilibs/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".jnilibs").join("config.toml")
}
