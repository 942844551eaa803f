//! Global context for jnilibs operations.
//!
//! Provides centralized access to the project root and configuration paths.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{global_config_path, load_config, project_config_path, Config};

/// Global context containing the project location and config paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Android project root (defaults to cwd)
    project_root: PathBuf,

    /// Global configuration file (~/.jnilibs/config.toml), if a home exists
    global_config: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        Ok(GlobalContext {
            project_root: cwd.clone(),
            cwd,
            global_config: global_config_path(),
        })
    }

    /// Create a GlobalContext for a specific project root.
    ///
    /// Relative roots are taken from the current directory.
    pub fn with_project_root(root: impl AsRef<Path>) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.project_root = ctx.cwd.join(root.as_ref());
        Ok(ctx)
    }

    /// Override the global configuration path (None disables it).
    pub fn with_global_config(mut self, path: Option<PathBuf>) -> Self {
        self.global_config = path;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the Android project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the global configuration file path.
    pub fn global_config_path(&self) -> Option<&Path> {
        self.global_config.as_deref()
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        project_config_path(&self.project_root)
    }

    /// Load merged global and project configuration.
    pub fn load_config(&self) -> Config {
        load_config(self.global_config_path(), &self.project_config_path())
    }

    /// Render a path relative to the project root when it lies inside it.
    pub fn display_path(&self, path: &Path) -> String {
        if path.starts_with(&self.project_root) {
            if let Some(rel) = pathdiff::diff_paths(path, &self.project_root) {
                return rel.display().to_string();
            }
        }
        path.display().to_string()
    }
}
