//! Template-driven JSON destinations.
//!
//! Each sync renders the master record into the destination's shape, stamps
//! the context marker, and layers it between the optional template and
//! override. The result replaces the destination file and, when the tool's
//! legacy directory exists, is copied there byte for byte.

use std::path::PathBuf;

use crate::client::{ClientAdapter, SyncContext};
use crate::config::{merge_layers, render_json};
use crate::context::AppContext;
use crate::fs::{LegacyMirror, write_atomic};
use crate::report::{Reporter, TargetOutcome};
use crate::transform::{TargetFormat, apply_context};

/// Pre-XDG location some tools still read from, relative to home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LegacyLocation {
    dir: &'static str,
    path: &'static str,
}

#[derive(Debug, Clone)]
pub struct JsonTarget {
    id: &'static str,
    relative_path: &'static str,
    format: TargetFormat,
    context: Option<&'static str>,
    legacy: Option<LegacyLocation>,
}

impl JsonTarget {
    pub const fn new(id: &'static str, relative_path: &'static str, format: TargetFormat) -> Self {
        Self {
            id,
            relative_path,
            format,
            context: None,
            legacy: None,
        }
    }

    pub const fn with_context(mut self, context: &'static str) -> Self {
        self.context = Some(context);
        self
    }

    pub const fn with_legacy(mut self, dir: &'static str, path: &'static str) -> Self {
        self.legacy = Some(LegacyLocation { dir, path });
        self
    }

    fn legacy_mirror(&self, app: &AppContext) -> Option<LegacyMirror> {
        self.legacy
            .map(|legacy| LegacyMirror::new(app.home_path(legacy.dir), app.home_path(legacy.path)))
    }
}

/// The eight destinations sharing the JSON pipeline, in sync order.
pub fn default_json_targets() -> Vec<JsonTarget> {
    vec![
        JsonTarget::new("copilot-xdg", ".config/.copilot/mcp-config.json", TargetFormat::Copilot)
            .with_context("ide"),
        JsonTarget::new(
            "github-copilot-intellij",
            ".config/github-copilot/intellij/mcp.json",
            TargetFormat::Servers,
        )
        .with_context("ide"),
        JsonTarget::new("github-copilot", ".config/github-copilot/mcp.json", TargetFormat::Servers)
            .with_context("ide"),
        JsonTarget::new("generic-mcp", ".config/mcp/mcp_config.json", TargetFormat::GenericMcp),
        JsonTarget::new("cursor", ".config/cursor/mcp.json", TargetFormat::McpServers)
            .with_context("ide")
            .with_legacy(".cursor", ".cursor/mcp.json"),
        JsonTarget::new("vscode", ".config/vscode/mcp.json", TargetFormat::Servers)
            .with_context("ide")
            .with_legacy(".vscode", ".vscode/mcp.json"),
        JsonTarget::new("junie", ".config/junie/mcp/mcp.json", TargetFormat::McpServers)
            .with_context("agent")
            .with_legacy(".junie", ".junie/mcp/mcp.json"),
        JsonTarget::new("lmstudio", ".config/lmstudio/mcp.json", TargetFormat::McpServers)
            .with_context("desktop-app")
            .with_legacy(".lmstudio", ".lmstudio/mcp.json"),
    ]
}

impl ClientAdapter for JsonTarget {
    fn id(&self) -> &'static str {
        self.id
    }

    fn config_path(&self, app: &AppContext) -> PathBuf {
        app.home_path(self.relative_path)
    }

    fn default_context(&self) -> Option<&'static str> {
        self.context
    }

    fn sync(
        &self,
        ctx: &SyncContext<'_>,
        reporter: &mut dyn Reporter,
    ) -> anyhow::Result<TargetOutcome> {
        let path = self.config_path(ctx.app);

        let template = ctx.template(self.id, reporter);
        let mut generated = self.format.render(ctx.master);
        if let Some(context) = ctx.context_for(self.context) {
            apply_context(&mut generated, context);
        }
        let overrides = ctx.override_layer(self.id, reporter);

        let document = merge_layers(
            [template.as_ref(), Some(&generated), overrides.as_ref()]
                .into_iter()
                .flatten(),
        );
        let bytes = render_json(&document)?;
        write_atomic(&path, &bytes)?;
        tracing::info!(target_id = self.id, path = %path.display(), "Wrote MCP config");

        let mut mirrored = Vec::new();
        if let Some(mirror) = self.legacy_mirror(ctx.app)
            && let Some(legacy) = mirror.mirror(&bytes)?
        {
            mirrored.push(legacy);
        }

        Ok(TargetOutcome::Synced { path, mirrored })
    }
}
