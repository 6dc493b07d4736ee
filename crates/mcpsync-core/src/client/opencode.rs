//! OpenCode client implementation.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::client::{ClientAdapter, SyncContext};
use crate::config::{deep_merge_maps, read_json_map, render_json};
use crate::context::AppContext;
use crate::fs::write_atomic;
use crate::report::{Reporter, TargetOutcome};
use crate::transform::{apply_context, to_opencode_format};

#[derive(Debug, Default)]
pub struct OpenCodeClient;

impl OpenCodeClient {
    pub fn new() -> Self {
        Self
    }

    /// Template overlaid by the current file, so the user's keys win.
    ///
    /// `None` when neither exists.
    fn base_document(
        &self,
        ctx: &SyncContext<'_>,
        path: &Path,
        reporter: &mut dyn Reporter,
    ) -> anyhow::Result<Option<Map<String, Value>>> {
        let template = ctx.template(self.id(), reporter);
        let existing = read_json_map(path)?;

        Ok(match (template, existing) {
            (Some(template), Some(existing)) => Some(deep_merge_maps(&template, &existing)),
            (template, existing) => existing.or(template),
        })
    }
}

impl ClientAdapter for OpenCodeClient {
    fn id(&self) -> &'static str {
        "opencode"
    }

    fn config_path(&self, app: &AppContext) -> PathBuf {
        app.home_path(".config/opencode/opencode.json")
    }

    fn default_context(&self) -> Option<&'static str> {
        Some("ide")
    }

    fn sync(
        &self,
        ctx: &SyncContext<'_>,
        reporter: &mut dyn Reporter,
    ) -> anyhow::Result<TargetOutcome> {
        let path = self.config_path(ctx.app);
        let Some(base) = self.base_document(ctx, &path, reporter)? else {
            return Ok(TargetOutcome::skipped("file not found"));
        };

        let mut config = to_opencode_format(ctx.master, base);
        if let Some(context) = ctx.context_for(self.default_context()) {
            apply_context(&mut config, context);
        }
        if let Some(overrides) = ctx.override_layer(self.id(), reporter) {
            config = deep_merge_maps(&config, &overrides);
        }

        write_atomic(&path, &render_json(&config)?)?;
        tracing::info!(path = %path.display(), "Wrote OpenCode config");

        Ok(TargetOutcome::synced(path))
    }
}
