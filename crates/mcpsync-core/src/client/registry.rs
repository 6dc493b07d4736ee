//! Client registry for managing available client adapters.
//!
//! The registry fixes the order destinations are synced in and provides the
//! whitelist/blacklist filtering behind `--target` and `--ignore-target`.

use super::{
    ClientAdapter, claude_code::ClaudeCodeClient, codex::CodexClient,
    copilot_cli::CopilotCliClient, json_target::default_json_targets, opencode::OpenCodeClient,
};

/// Registry of available client adapters, in sync order.
#[derive(Debug)]
pub struct ClientRegistry {
    clients: Vec<Box<dyn ClientAdapter>>,
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::with_default_clients()
    }
}

impl ClientRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            clients: Vec::new(),
        }
    }

    /// Create a registry with all default clients: the JSON destinations
    /// first, then the bespoke adapters.
    pub fn with_default_clients() -> Self {
        let mut clients: Vec<Box<dyn ClientAdapter>> = default_json_targets()
            .into_iter()
            .map(|target| Box::new(target) as Box<dyn ClientAdapter>)
            .collect();
        clients.push(Box::new(CodexClient::new()));
        clients.push(Box::new(ClaudeCodeClient::new()));
        clients.push(Box::new(OpenCodeClient::new()));
        clients.push(Box::new(CopilotCliClient::new()));
        Self { clients }
    }

    /// Register a client adapter.
    pub fn register(&mut self, client: Box<dyn ClientAdapter>) {
        self.clients.push(client);
    }

    /// Get all registered clients.
    pub fn all(&self) -> &[Box<dyn ClientAdapter>] {
        &self.clients
    }

    /// Get a client by ID.
    pub fn get(&self, id: &str) -> Option<&dyn ClientAdapter> {
        self.clients
            .iter()
            .find(|c| c.id() == id)
            .map(|c| c.as_ref())
    }

    /// Filter clients by explicit target list (whitelist).
    pub fn filter_by_targets<'a>(&'a self, targets: &[String]) -> Vec<&'a dyn ClientAdapter> {
        self.clients
            .iter()
            .filter(|c| targets.iter().any(|t| t == c.id()))
            .map(|c| c.as_ref())
            .collect()
    }

    /// Filter clients by ignoring specific targets (blacklist).
    pub fn filter_excluding_targets<'a>(
        &'a self,
        ignore_targets: &[String],
    ) -> Vec<&'a dyn ClientAdapter> {
        self.clients
            .iter()
            .filter(|c| !ignore_targets.iter().any(|t| t == c.id()))
            .map(|c| c.as_ref())
            .collect()
    }

    /// Get applicable clients based on target/ignore configuration.
    ///
    /// - If `targets` is provided, only those clients are returned (whitelist).
    /// - If `ignore_targets` is provided, those clients are excluded (blacklist).
    /// - If neither is provided, all clients are returned.
    ///
    /// Registry order is kept in every case.
    pub fn applicable_clients<'a>(
        &'a self,
        targets: Option<&[String]>,
        ignore_targets: Option<&[String]>,
    ) -> Vec<&'a dyn ClientAdapter> {
        match (targets, ignore_targets) {
            (Some(t), _) => self.filter_by_targets(t),
            (None, Some(i)) => self.filter_excluding_targets(i),
            (None, None) => self.clients.iter().map(|c| c.as_ref()).collect(),
        }
    }

    /// List all client IDs.
    pub fn client_ids(&self) -> Vec<&'static str> {
        self.clients.iter().map(|c| c.id()).collect()
    }
}
