//! GitHub Copilot CLI client implementation.
//!
//! Deploying dotfiles replaces `config.json` wholesale, which logs the user
//! out. The sync restores the login state from `config.backup.json` and then
//! refreshes the backup so the next deploy can be repaired the same way.

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::client::{ClientAdapter, SyncContext};
use crate::config::{read_json_map, render_json};
use crate::context::AppContext;
use crate::fs::write_atomic;
use crate::report::{Reporter, TargetOutcome};

const LOGGED_IN_USERS: &str = "logged_in_users";
const LAST_LOGGED_IN_USER: &str = "last_logged_in_user";

#[derive(Debug, Default)]
pub struct CopilotCliClient;

impl CopilotCliClient {
    pub fn new() -> Self {
        Self
    }

    pub fn backup_path(&self, app: &AppContext) -> PathBuf {
        app.home_path(".config/.copilot/config.backup.json")
    }
}

impl ClientAdapter for CopilotCliClient {
    fn id(&self) -> &'static str {
        "copilot-cli"
    }

    fn config_path(&self, app: &AppContext) -> PathBuf {
        app.home_path(".config/.copilot/config.json")
    }

    fn default_context(&self) -> Option<&'static str> {
        None
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

        let backup_path = self.backup_path(ctx.app);
        match read_json_map(&backup_path) {
            Ok(Some(backup)) => restore_auth(&mut config, &backup),
            Ok(None) => {}
            Err(err) => reporter.warning(
                self.id(),
                &format!("Skipping auth restore: {err:#}"),
            ),
        }

        let bytes = render_json(&config)?;
        write_atomic(&path, &bytes)?;
        write_atomic(&backup_path, &bytes)?;
        tracing::info!(path = %path.display(), "Preserved Copilot CLI auth state");

        Ok(TargetOutcome::synced(path))
    }
}

/// Copy login state from `backup` into `config`.
///
/// `logged_in_users` is always written (empty when the backup has none);
/// `last_logged_in_user` only when the backup holds a non-empty value.
pub fn restore_auth(config: &mut Map<String, Value>, backup: &Map<String, Value>) {
    let users = backup
        .get(LOGGED_IN_USERS)
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()));
    config.insert(LOGGED_IN_USERS.to_string(), users);

    if let Some(last) = backup.get(LAST_LOGGED_IN_USER)
        && !is_blank(last)
    {
        config.insert(LAST_LOGGED_IN_USER.to_string(), last.clone());
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n == 0.0),
    }
}
