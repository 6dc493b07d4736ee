//! Format transformers: one pure function per target document shape.
//!
//! Every transformer borrows the master record and returns an owned document,
//! so no target can observe another target's edits.

pub mod context;
pub mod toml_sections;

use serde_json::{Map, Value, json};

use crate::master::{MasterRecord, server_args, server_command};
use crate::types::ServerContainer;

pub use context::{apply_context, apply_context_arg, set_context};
pub use toml_sections::rewrite_mcp_sections;

/// Schema identifier written into the generic MCP config.
pub const GENERIC_MCP_SCHEMA: &str = "https://modelcontextprotocol.io/schema/config.json";

/// Timeout (ms) written for every OpenCode server.
pub const OPENCODE_TIMEOUT_MS: u64 = 30_000;

/// JSON document shapes produced for the template-driven targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    /// `{"servers": {...}}`
    Servers,
    /// `{"mcpServers": {...}}`
    McpServers,
    /// `{"$schema": ..., "mcpServers": {...}}`
    GenericMcp,
    /// `{"mcpServers": {...}}` with `tools: ["*"]` on each server
    Copilot,
}

impl TargetFormat {
    pub fn render(self, master: &MasterRecord) -> Map<String, Value> {
        match self {
            TargetFormat::Servers => to_servers_format(master),
            TargetFormat::McpServers => to_mcp_servers_format(master),
            TargetFormat::GenericMcp => to_generic_mcp_format(master),
            TargetFormat::Copilot => to_copilot_format(master),
        }
    }

    pub fn container(self) -> ServerContainer {
        match self {
            TargetFormat::Servers => ServerContainer::Servers,
            TargetFormat::McpServers | TargetFormat::GenericMcp | TargetFormat::Copilot => {
                ServerContainer::McpServers
            }
        }
    }
}

fn wrap(container: ServerContainer, servers: Map<String, Value>) -> Map<String, Value> {
    let mut document = Map::new();
    document.insert(container.key().to_string(), Value::Object(servers));
    document
}

pub fn to_servers_format(master: &MasterRecord) -> Map<String, Value> {
    wrap(ServerContainer::Servers, master.servers())
}

pub fn to_mcp_servers_format(master: &MasterRecord) -> Map<String, Value> {
    wrap(ServerContainer::McpServers, master.servers())
}

pub fn to_generic_mcp_format(master: &MasterRecord) -> Map<String, Value> {
    let mut document = to_mcp_servers_format(master);
    document.insert("$schema".to_string(), json!(GENERIC_MCP_SCHEMA));
    document
}

/// GitHub Copilot format: every server exposes all tools and defaults to `type: "local"`.
pub fn to_copilot_format(master: &MasterRecord) -> Map<String, Value> {
    let servers = master
        .servers()
        .into_iter()
        .map(|(name, server)| {
            let mut entry = match server {
                Value::Object(fields) => fields,
                _ => Map::new(),
            };
            entry.insert("tools".to_string(), json!(["*"]));
            entry
                .entry("type")
                .or_insert_with(|| Value::String("local".to_string()));
            (name, Value::Object(entry))
        })
        .collect();

    wrap(ServerContainer::McpServers, servers)
}

/// OpenCode format, written into `existing` under `mcp`.
///
/// OpenCode expects a single `command` array holding the executable followed
/// by its arguments. Every other key of `existing` is kept.
pub fn to_opencode_format(
    master: &MasterRecord,
    mut existing: Map<String, Value>,
) -> Map<String, Value> {
    let mut mcp = Map::new();
    for (name, server) in master.servers() {
        let mut command = Vec::new();
        if let Some(executable) = server_command(&server) {
            command.push(Value::String(executable.to_string()));
        }
        command.extend(server_args(&server));

        let mut entry = Map::new();
        entry.insert("type".to_string(), json!("local"));
        entry.insert("command".to_string(), Value::Array(command));
        entry.insert("enabled".to_string(), json!(true));
        entry.insert("timeout".to_string(), json!(OPENCODE_TIMEOUT_MS));
        if let Some(env) = server.get("env") {
            entry.insert("environment".to_string(), env.clone());
        }
        mcp.insert(name, Value::Object(entry));
    }

    existing.insert(ServerContainer::Mcp.key().to_string(), Value::Object(mcp));
    existing
}
