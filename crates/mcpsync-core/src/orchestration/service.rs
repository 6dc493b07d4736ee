//! Whole-run driver: load the master once, then sync every selected target.

use std::path::PathBuf;

use crate::client::{ClientAdapter, ClientRegistry, SyncContext};
use crate::config::{SyncSettings, load_settings};
use crate::context::AppContext;
use crate::error::SyncError;
use crate::master::MasterRecord;
use crate::report::{Reporter, SyncReport, TargetOutcome};

/// Target selection from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Whitelist; takes precedence over `ignore_targets`.
    pub targets: Option<Vec<String>>,
    pub ignore_targets: Option<Vec<String>>,
}

/// One row of the `targets` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetInfo {
    pub id: &'static str,
    pub path: PathBuf,
    pub context: Option<String>,
    pub enabled: bool,
}

#[derive(Debug)]
pub struct SyncService {
    app: AppContext,
    registry: ClientRegistry,
    options: SyncOptions,
}

impl SyncService {
    pub fn new(app: AppContext) -> Self {
        Self {
            app,
            registry: ClientRegistry::with_default_clients(),
            options: SyncOptions::default(),
        }
    }

    pub fn with_registry(mut self, registry: ClientRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn app(&self) -> &AppContext {
        &self.app
    }

    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    /// Load `sync.toml`; a malformed file is fatal.
    pub fn load_settings(&self) -> Result<SyncSettings, SyncError> {
        let path = self.app.settings_path();
        load_settings(&path).map_err(|source| SyncError::Settings { path, source })
    }

    /// Every registered target with its resolved path and effective context.
    pub fn describe_targets(&self) -> Result<Vec<TargetInfo>, SyncError> {
        let settings = self.load_settings()?;
        let app = self.app.clone().with_path_settings(&settings.paths);
        Ok(self
            .registry
            .all()
            .iter()
            .map(|client| TargetInfo {
                id: client.id(),
                path: client.config_path(&app),
                context: settings
                    .context_override(client.id())
                    .or(client.default_context())
                    .map(str::to_string),
                enabled: settings.is_enabled(client.id()),
            })
            .collect())
    }

    /// Sync every selected target.
    ///
    /// Only master and settings problems abort the run. A failing target is
    /// recorded as [`TargetOutcome::Failed`] and the remaining targets still run.
    pub fn run(&self, reporter: &mut dyn Reporter) -> Result<SyncReport, SyncError> {
        let master = MasterRecord::load(self.app.master_path())?;
        let settings = self.load_settings()?;
        let app = self.app.clone().with_path_settings(&settings.paths);

        let known = self.registry.client_ids();
        for id in settings.unknown_targets(&known) {
            reporter.warning(id, "Unknown target in sync.toml, ignoring");
        }
        for id in self.requested_ids() {
            if !known.iter().any(|k| *k == id) {
                reporter.warning(id, "Unknown target requested, ignoring");
            }
        }

        tracing::info!(
            master = %app.master_path().display(),
            servers = master.len(),
            "Syncing MCP configurations from master"
        );

        let mut report = SyncReport::default();
        for client in self.selected_clients() {
            let outcome = self.sync_one(client, &app, &master, &settings, reporter);
            reporter.outcome(client.id(), &outcome);
            report.push(client.id(), outcome);
        }

        reporter.finished(&report);
        Ok(report)
    }

    fn sync_one(
        &self,
        client: &dyn ClientAdapter,
        app: &AppContext,
        master: &MasterRecord,
        settings: &SyncSettings,
        reporter: &mut dyn Reporter,
    ) -> TargetOutcome {
        let id = client.id();
        if !settings.is_enabled(id) {
            return TargetOutcome::skipped("disabled in sync.toml");
        }

        let ctx = SyncContext::new(app, master).with_context_override(settings.context_override(id));
        match client.sync(&ctx, reporter) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::debug!(target_id = id, error = ?err, "Target sync failed");
                TargetOutcome::failed(format!("{err:#}"))
            }
        }
    }

    fn selected_clients(&self) -> Vec<&dyn ClientAdapter> {
        self.registry.applicable_clients(
            self.options.targets.as_deref(),
            self.options.ignore_targets.as_deref(),
        )
    }

    fn requested_ids(&self) -> impl Iterator<Item = &str> {
        self.options
            .targets
            .iter()
            .chain(self.options.ignore_targets.iter())
            .flatten()
            .map(String::as_str)
    }
}
