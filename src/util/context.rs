//! Global context for slipway operations.
//!
//! Provides centralized access to configuration paths and environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{self, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global slipway data (~/.slipway/)
    home: Option<PathBuf>,
}

impl GlobalContext {
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(GlobalContext {
            cwd,
            home: config::global_config_dir(),
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Use a different home directory (or none) for global configuration.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The slipway home directory (~/.slipway/), if one could be determined.
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Get the global configuration file path.
    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.home.as_ref().map(|h| h.join("config.toml"))
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        config::project_config_path(&self.cwd)
    }

    /// Load the merged global and project configuration.
    pub fn load_config(&self) -> Config {
        let global = self.global_config_path();
        config::load_config(global.as_deref(), &self.project_config_path())
    }

    /// Resolve a user-supplied path against the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
