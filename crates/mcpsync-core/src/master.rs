//! The master record: canonical MCP server definitions every target is derived from.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::SyncError;

/// Descriptor fields that never leave the master record.
const METADATA_FIELDS: &[&str] = &["note"];

/// Canonical server list, loaded once per run and lent immutably to every target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasterRecord {
    servers: Map<String, Value>,
}

impl MasterRecord {
    /// Build a record from a parsed master document.
    ///
    /// An absent, `null` or otherwise non-object `servers` field yields an
    /// empty record.
    pub fn from_value(document: &Value) -> Self {
        let servers = document
            .get("servers")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        Self { servers }
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let document: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&document))
    }

    /// Load the master record from disk. Every failure here is fatal for a run.
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        if !path.is_file() {
            return Err(SyncError::MasterNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| SyncError::MasterRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| SyncError::MasterParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Server descriptors exactly as written in the master file.
    pub fn raw_servers(&self) -> &Map<String, Value> {
        &self.servers
    }

    /// Owned copy of the servers with metadata fields such as `note` removed.
    pub fn servers(&self) -> Map<String, Value> {
        self.servers
            .iter()
            .map(|(name, server)| (name.clone(), strip_metadata(server)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }
}

fn strip_metadata(server: &Value) -> Value {
    match server {
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .filter(|(key, _)| !METADATA_FIELDS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// The `command` scalar of a descriptor, if it is a non-empty string.
pub fn server_command(server: &Value) -> Option<&str> {
    server
        .get("command")
        .and_then(Value::as_str)
        .filter(|command| !command.is_empty())
}

/// The `args` list of a descriptor; missing or non-list args read as empty.
pub fn server_args(server: &Value) -> Vec<Value> {
    server
        .get("args")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
