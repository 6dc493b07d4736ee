//! Optional `sync.toml` settings: per-target switches and path overrides.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncSettings {
    pub paths: PathSettings,
    pub targets: BTreeMap<String, TargetSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathSettings {
    /// Canonical Claude Code enabled-plugins mapping
    pub plugins: Option<PathBuf>,
    pub templates: Option<PathBuf>,
    pub overrides: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Replaces the target's built-in context value
    #[serde(default)]
    pub context: Option<String>,
}

impl Default for TargetSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            context: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

impl SyncSettings {
    pub fn is_enabled(&self, target: &str) -> bool {
        self.targets.get(target).is_none_or(|t| t.enabled)
    }

    pub fn context_override(&self, target: &str) -> Option<&str> {
        self.targets.get(target).and_then(|t| t.context.as_deref())
    }

    /// Target ids named in the settings that no adapter answers to.
    pub fn unknown_targets<'a>(&'a self, known: &[&str]) -> Vec<&'a str> {
        self.targets
            .keys()
            .map(String::as_str)
            .filter(|id| !known.iter().any(|k| k == id))
            .collect()
    }
}

/// Load settings from `path`; a missing file yields defaults.
pub fn load_settings(path: &Path) -> Result<SyncSettings> {
    if !path.is_file() {
        return Ok(SyncSettings::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    parse_settings_str(&content)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))
}

pub fn parse_settings_str(content: &str) -> Result<SyncSettings> {
    let settings: SyncSettings = toml::from_str(content)?;
    for (id, target) in &settings.targets {
        if let Some(context) = &target.context
            && context.trim().is_empty()
        {
            anyhow::bail!("Target '{}' has an empty context value", id);
        }
    }
    Ok(settings)
}
