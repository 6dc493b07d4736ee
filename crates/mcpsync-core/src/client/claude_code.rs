//! Claude Code client implementation.
//!
//! `~/.claude.json` is owned by Claude Code and holds far more than MCP
//! servers (projects, auth, caches), so the sync patches it in place instead
//! of regenerating it: master servers are overlaid on `mcpServers`, the
//! canonical plugin list is merged into `enabledPlugins`, and the user
//! override is applied last.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::client::{ClientAdapter, SyncContext};
use crate::config::{deep_merge_maps, read_json_map, render_json};
use crate::context::AppContext;
use crate::fs::write_atomic;
use crate::report::{Reporter, TargetOutcome};
use crate::transform::apply_context;
use crate::types::ServerContainer;

const ENABLED_PLUGINS_KEY: &str = "enabledPlugins";

#[derive(Debug, Default)]
pub struct ClaudeCodeClient;

impl ClaudeCodeClient {
    pub fn new() -> Self {
        Self
    }
}

impl ClientAdapter for ClaudeCodeClient {
    fn id(&self) -> &'static str {
        "claude-code"
    }

    fn config_path(&self, app: &AppContext) -> PathBuf {
        app.home_path(".claude.json")
    }

    fn default_context(&self) -> Option<&'static str> {
        Some("claude-code")
    }

    fn sync(
        &self,
        ctx: &SyncContext<'_>,
        reporter: &mut dyn Reporter,
    ) -> anyhow::Result<TargetOutcome> {
        let path = self.config_path(ctx.app);
        let Some(mut config) = read_json_map(&path)? else {
            return Ok(TargetOutcome::skipped("file not found"));
        };

        let key = ServerContainer::McpServers.key();
        let mut servers = match config.remove(key) {
            Some(Value::Object(existing)) => existing,
            _ => Map::new(),
        };
        servers.extend(ctx.master.servers());
        config.insert(key.to_string(), Value::Object(servers));

        if let Some(context) = ctx.context_for(self.default_context()) {
            apply_context(&mut config, context);
        }

        let plugins_path = ctx.app.plugins_path();
        if let Some(count) = merge_enabled_plugins(&mut config, plugins_path, self.id(), reporter) {
            tracing::info!(count, "Synced enabledPlugins from canonical list");
        }

        if let Some(overrides) = ctx.override_layer(self.id(), reporter) {
            config = deep_merge_maps(&config, &overrides);
        }

        write_atomic(&path, &render_json(&config)?)?;
        tracing::info!(path = %path.display(), "Patched Claude Code config");

        Ok(TargetOutcome::synced(path))
    }
}

/// Merge the canonical plugin mapping at `plugins_path` into `enabledPlugins`.
///
/// Canonical entries win over existing ones; existing entries not named in
/// the canonical mapping are kept. Returns the number of canonical entries
/// applied, or `None` when nothing was merged.
pub fn merge_enabled_plugins(
    config: &mut Map<String, Value>,
    plugins_path: &Path,
    target: &str,
    reporter: &mut dyn Reporter,
) -> Option<usize> {
    if !plugins_path.is_file() {
        return None;
    }

    let canonical = match std::fs::read(plugins_path)
        .map_err(anyhow::Error::from)
        .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).map_err(anyhow::Error::from))
    {
        Ok(value) => normalize_plugins(&value),
        Err(err) => {
            reporter.warning(
                target,
                &format!("Skipping plugins: {} ({err})", plugins_path.display()),
            );
            return None;
        }
    };
    if canonical.is_empty() {
        tracing::debug!(path = %plugins_path.display(), "Canonical plugin list is empty");
        return None;
    }

    let mut merged = normalize_plugins(config.get(ENABLED_PLUGINS_KEY).unwrap_or(&Value::Null));
    let count = canonical.len();
    merged.extend(canonical);
    config.insert(ENABLED_PLUGINS_KEY.to_string(), Value::Object(merged));
    Some(count)
}

/// `{name: bool}` from either a mapping (values coerced by truthiness) or a
/// list of names (each enabled).
pub fn normalize_plugins(value: &Value) -> Map<String, Value> {
    match value {
        Value::Object(entries) => entries
            .iter()
            .map(|(name, enabled)| (name.clone(), Value::Bool(is_truthy(enabled))))
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|name| (name.to_string(), Value::Bool(true)))
            .collect(),
        _ => Map::new(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}
