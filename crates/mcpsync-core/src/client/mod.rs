//! Client adapter layer: one adapter per destination config file.
//!
//! Most destinations share the template-driven JSON pipeline in
//! [`json_target`]. Codex, Claude Code, OpenCode and the Copilot CLI each
//! need bespoke handling and get their own adapter.

pub mod claude_code;
pub mod codex;
pub mod copilot_cli;
pub mod json_target;
pub mod opencode;
pub mod registry;

use std::fmt;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::config::LayerStore;
use crate::context::AppContext;
use crate::master::MasterRecord;
use crate::report::{Reporter, TargetOutcome};

pub use claude_code::ClaudeCodeClient;
pub use codex::CodexClient;
pub use copilot_cli::CopilotCliClient;
pub use json_target::JsonTarget;
pub use opencode::OpenCodeClient;
pub use registry::ClientRegistry;

/// Everything an adapter needs for one sync.
pub struct SyncContext<'a> {
    pub app: &'a AppContext,
    pub master: &'a MasterRecord,
    pub layers: LayerStore,
    /// Replaces the adapter's built-in context value when set.
    pub context_override: Option<&'a str>,
}

impl<'a> SyncContext<'a> {
    pub fn new(app: &'a AppContext, master: &'a MasterRecord) -> Self {
        Self {
            app,
            master,
            layers: app.layer_store(),
            context_override: None,
        }
    }

    pub fn with_context_override(mut self, context: Option<&'a str>) -> Self {
        self.context_override = context;
        self
    }

    /// Context value to write, preferring the configured override.
    pub fn context_for<'b>(&'b self, default: Option<&'b str>) -> Option<&'b str> {
        self.context_override.or(default)
    }

    /// Template for `id`; an unreadable template is reported and treated as absent.
    pub fn template(&self, id: &str, reporter: &mut dyn Reporter) -> Option<Map<String, Value>> {
        soft_layer(self.layers.load_template(id), id, "template", reporter)
    }

    /// Override for `id`; an unreadable override is reported and treated as absent.
    pub fn override_layer(
        &self,
        id: &str,
        reporter: &mut dyn Reporter,
    ) -> Option<Map<String, Value>> {
        soft_layer(self.layers.load_override(id), id, "override", reporter)
    }
}

fn soft_layer(
    loaded: anyhow::Result<Option<Map<String, Value>>>,
    id: &str,
    kind: &str,
    reporter: &mut dyn Reporter,
) -> Option<Map<String, Value>> {
    match loaded {
        Ok(layer) => layer,
        Err(err) => {
            reporter.warning(id, &format!("Ignoring {kind}: {err:#}"));
            None
        }
    }
}

/// Trait for destination-specific sync adapters.
pub trait ClientAdapter: Send + Sync + fmt::Debug {
    /// Stable identifier used by `--target` and `sync.toml`.
    fn id(&self) -> &'static str;

    /// Primary file this adapter writes.
    fn config_path(&self, app: &AppContext) -> PathBuf;

    /// Context value written into the `serena` arguments, if any.
    fn default_context(&self) -> Option<&'static str>;

    fn sync(&self, ctx: &SyncContext<'_>, reporter: &mut dyn Reporter)
    -> anyhow::Result<TargetOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemoryReporter;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn context_override_wins() {
        let temp = TempDir::new().unwrap();
        let app = AppContext::new(temp.path().to_path_buf());
        let master = MasterRecord::default();

        let ctx = SyncContext::new(&app, &master);
        assert_eq!(ctx.context_for(Some("ide")), Some("ide"));
        assert_eq!(ctx.context_for(None), None);

        let ctx = ctx.with_context_override(Some("agent"));
        assert_eq!(ctx.context_for(Some("ide")), Some("agent"));
        assert_eq!(ctx.context_for(None), Some("agent"));
    }

    #[test]
    fn broken_layers_become_warnings() {
        let temp = TempDir::new().unwrap();
        let app = AppContext::new(temp.path().to_path_buf());
        let master = MasterRecord::default();
        std::fs::create_dir_all(app.overrides_dir()).unwrap();
        std::fs::write(app.overrides_dir().join("cursor.json"), "not json").unwrap();
        std::fs::create_dir_all(app.templates_dir()).unwrap();
        std::fs::write(app.templates_dir().join("cursor.json"), r#"{"a": 1}"#).unwrap();
        let ctx = SyncContext::new(&app, &master);
        let mut reporter = MemoryReporter::new();

        assert!(ctx.override_layer("cursor", &mut reporter).is_none());
        assert_eq!(ctx.template("cursor", &mut reporter).unwrap()["a"], json!(1));
        assert_eq!(reporter.warnings_for("cursor").len(), 1);
    }
}
