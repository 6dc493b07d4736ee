//! Template and override documents layered around generated content.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::{Map, Value};

use super::document::read_json_map;

/// Locates per-target template and override fragments by target id.
#[derive(Debug, Clone)]
pub struct LayerStore {
    templates_dir: PathBuf,
    overrides_dir: PathBuf,
}

impl LayerStore {
    pub fn new(templates_dir: PathBuf, overrides_dir: PathBuf) -> Self {
        Self {
            templates_dir,
            overrides_dir,
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    pub fn overrides_dir(&self) -> &Path {
        &self.overrides_dir
    }

    pub fn template_path(&self, id: &str) -> PathBuf {
        self.templates_dir.join(format!("{id}.json"))
    }

    pub fn override_path(&self, id: &str) -> PathBuf {
        self.overrides_dir.join(format!("{id}.json"))
    }

    /// Base skeleton for `id`, if one exists.
    pub fn load_template(&self, id: &str) -> anyhow::Result<Option<Map<String, Value>>> {
        read_json_map(&self.template_path(id))
    }

    /// User override for `id`, if one exists.
    pub fn load_override(&self, id: &str) -> anyhow::Result<Option<Map<String, Value>>> {
        read_json_map(&self.override_path(id))
    }

    /// Raw text template such as `codex.toml`.
    pub fn load_text_template(&self, file_name: &str) -> anyhow::Result<Option<String>> {
        let path = self.templates_dir.join(file_name);
        if !path.is_file() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read template: {}", path.display()))
            .map(Some)
    }
}
