//! Codex client implementation.
//!
//! Codex keeps its MCP servers as `[mcp_servers.<name>]` tables inside
//! `~/.codex/config.toml`, next to settings the sync must not touch. Only
//! those tables are rewritten; the rest of the file is copied through as text.

use std::path::PathBuf;

use anyhow::Context;

use crate::client::{ClientAdapter, SyncContext};
use crate::context::AppContext;
use crate::fs::write_atomic;
use crate::report::{Reporter, TargetOutcome};
use crate::transform::rewrite_mcp_sections;

/// Template consulted when `config.toml` does not exist yet.
pub const CODEX_TEMPLATE: &str = "codex.toml";

#[derive(Debug, Default)]
pub struct CodexClient;

impl CodexClient {
    pub fn new() -> Self {
        Self
    }

    fn base_text(
        &self,
        ctx: &SyncContext<'_>,
        path: &std::path::Path,
    ) -> anyhow::Result<Option<String>> {
        if path.is_file() {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read Codex config: {}", path.display()))?;
            return Ok(Some(text));
        }
        ctx.layers.load_text_template(CODEX_TEMPLATE)
    }
}

impl ClientAdapter for CodexClient {
    fn id(&self) -> &'static str {
        "codex"
    }

    fn config_path(&self, app: &AppContext) -> PathBuf {
        app.home_path(".codex/config.toml")
    }

    fn default_context(&self) -> Option<&'static str> {
        Some("codex")
    }

    fn sync(
        &self,
        ctx: &SyncContext<'_>,
        _reporter: &mut dyn Reporter,
    ) -> anyhow::Result<TargetOutcome> {
        let path = self.config_path(ctx.app);
        let Some(source) = self.base_text(ctx, &path)? else {
            return Ok(TargetOutcome::skipped("file not found"));
        };

        let context = ctx.context_for(self.default_context()).unwrap_or("codex");
        let text = rewrite_mcp_sections(&source, &ctx.master.servers(), context);
        write_atomic(&path, text.as_bytes())?;
        tracing::info!(path = %path.display(), context, "Wrote Codex MCP sections");

        Ok(TargetOutcome::synced(path))
    }
}
