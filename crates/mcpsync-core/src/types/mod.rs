//! Shared core types used across transformers and client adapters.

use serde_json::{Map, Value};

/// Name of the server whose argument list carries the context marker.
pub const CONTEXT_SERVER: &str = "serena";

/// Prefix of the context marker argument.
pub const CONTEXT_FLAG: &str = "--context=";

/// The three known places a config document keeps its MCP servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerContainer {
    /// `{"servers": {...}}` (VS Code, GitHub Copilot).
    Servers,
    /// `{"mcpServers": {...}}` (Cursor, Claude Code, Junie, ...).
    McpServers,
    /// `{"mcp": {...}}` (OpenCode). Arguments live inside the `command` array.
    Mcp,
}

impl ServerContainer {
    /// Lookup order used when a document could carry more than one shape.
    pub const SEARCH_ORDER: [ServerContainer; 3] = [
        ServerContainer::Servers,
        ServerContainer::McpServers,
        ServerContainer::Mcp,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ServerContainer::Servers => "servers",
            ServerContainer::McpServers => "mcpServers",
            ServerContainer::Mcp => "mcp",
        }
    }

    /// Whether arguments may be embedded in a `command` array.
    pub fn embeds_args_in_command(self) -> bool {
        matches!(self, ServerContainer::Mcp)
    }

    /// Find the first container holding an entry called `server`.
    pub fn resolve(config: &Map<String, Value>, server: &str) -> Option<ServerContainer> {
        Self::SEARCH_ORDER.into_iter().find(|container| {
            config
                .get(container.key())
                .and_then(Value::as_object)
                .is_some_and(|servers| servers.contains_key(server))
        })
    }
}

/// Context value written into the marker for one destination.
pub fn context_arg(context: &str) -> String {
    format!("{CONTEXT_FLAG}{context}")
}
