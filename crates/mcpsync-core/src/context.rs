//! Application context for unified path resolution.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::LayerStore;
use crate::config::settings::PathSettings;

/// Default location of the canonical Claude Code plugin mapping, relative to home.
pub const DEFAULT_PLUGINS_PATH: &str = ".local/share/chezmoi/scripts/claude-enabled-plugins.json";

/// Unified application context for dependency injection.
///
/// Every file the sync reads or writes is resolved from here, so tests and
/// the `--home` flag can point a whole run at a throw-away directory.
#[derive(Debug, Clone)]
pub struct AppContext {
    home_dir: PathBuf,
    mcp_config_dir: PathBuf,
    master_path: PathBuf,
    templates_dir: PathBuf,
    overrides_dir: PathBuf,
    plugins_path: PathBuf,
}

impl AppContext {
    /// Create a context rooted at `home_dir` with the default layout.
    pub fn new(home_dir: PathBuf) -> Self {
        let mcp_config_dir = home_dir.join(".config").join("mcp");
        Self {
            master_path: mcp_config_dir.join("mcp-master.json"),
            templates_dir: mcp_config_dir.join("templates"),
            overrides_dir: mcp_config_dir.join("overrides"),
            plugins_path: home_dir.join(DEFAULT_PLUGINS_PATH),
            mcp_config_dir,
            home_dir,
        }
    }

    /// Create a context for the current user's home directory.
    pub fn from_env() -> anyhow::Result<Self> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(Self::new(home))
    }

    pub fn with_master_path(mut self, master_path: PathBuf) -> Self {
        self.master_path = master_path;
        self
    }

    /// Apply path overrides from `sync.toml`.
    pub fn with_path_settings(mut self, paths: &PathSettings) -> Self {
        if let Some(plugins) = &paths.plugins {
            self.plugins_path = self.resolve_user_path(plugins);
        }
        if let Some(templates) = &paths.templates {
            self.templates_dir = self.resolve_user_path(templates);
        }
        if let Some(overrides) = &paths.overrides {
            self.overrides_dir = self.resolve_user_path(overrides);
        }
        self
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn mcp_config_dir(&self) -> &Path {
        &self.mcp_config_dir
    }

    pub fn master_path(&self) -> &Path {
        &self.master_path
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    pub fn overrides_dir(&self) -> &Path {
        &self.overrides_dir
    }

    pub fn plugins_path(&self) -> &Path {
        &self.plugins_path
    }

    pub fn settings_path(&self) -> PathBuf {
        self.mcp_config_dir.join("sync.toml")
    }

    /// Path below the home directory.
    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home_dir.join(relative)
    }

    /// Get a LayerStore over the template and override directories.
    pub fn layer_store(&self) -> LayerStore {
        LayerStore::new(self.templates_dir.clone(), self.overrides_dir.clone())
    }

    /// `~/` expands to the home directory; other relative paths are taken
    /// from the MCP config directory.
    fn resolve_user_path(&self, path: &Path) -> PathBuf {
        if let Ok(rest) = path.strip_prefix("~") {
            return self.home_dir.join(rest);
        }
        if path.is_relative() {
            return self.mcp_config_dir.join(path);
        }
        path.to_path_buf()
    }
}
