//! Section-granular rewrite of `[mcp_servers.*]` tables in TOML-like text.
//!
//! Removal works on lines, not on a parsed document, so everything outside
//! the removed `mcp_servers.*` sections is copied through byte for byte.
//! The appended block is rendered with `toml_edit`.

use serde_json::{Map, Value};
use toml_edit::{Array, DocumentMut, InlineTable, Item, Table, Value as TomlValue, value};

use crate::master::server_args;
use crate::transform::context::apply_context_arg;
use crate::types::CONTEXT_SERVER;

/// Table prefix owned by the sync.
pub const MCP_SERVERS_TABLE: &str = "mcp_servers";

/// Replace every `[mcp_servers.*]` section of `source` with freshly rendered ones.
///
/// The `serena` server gets a `--context=<context>` argument.
pub fn rewrite_mcp_sections(source: &str, servers: &Map<String, Value>, context: &str) -> String {
    let stripped = remove_sections(source, MCP_SERVERS_TABLE);
    let mut text = trim_trailing_blank_lines(&stripped).to_string();
    let rendered = render_mcp_sections(servers, context);

    if rendered.is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        return text;
    }

    if !text.is_empty() {
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text.push('\n');
    }
    text.push_str(&rendered);
    text
}

/// Drop every section whose header starts with `[<table>.`.
///
/// A section runs from its header line up to, not including, the next line
/// starting with `[`, or the end of the text. Blank lines left in front of a
/// removed section collapse to one when kept text follows it.
pub fn remove_sections(text: &str, table: &str) -> String {
    let header = format!("[{table}.");
    let mut out = String::with_capacity(text.len());
    let mut removing = false;

    for line in text.split_inclusive('\n') {
        if line.starts_with('[') {
            let was_removing = removing;
            removing = line.starts_with(&header);
            if was_removing && !removing {
                collapse_blank_run(&mut out);
            }
        }
        if !removing {
            out.push_str(line);
        }
    }

    out
}

/// Render one `[mcp_servers.<name>]` section per server, separated by blank lines.
pub fn render_mcp_sections(servers: &Map<String, Value>, context: &str) -> String {
    let mut servers_table = Table::new();
    servers_table.set_implicit(true);

    for (name, server) in servers {
        if !server.is_object() {
            tracing::warn!(server = %name, "Skipping non-object server entry");
            continue;
        }

        let mut table = Table::new();
        let separator = if servers_table.is_empty() { "" } else { "\n" };
        table.decor_mut().set_prefix(separator);

        let command = server.get("command").map(value_text).unwrap_or_default();
        table.insert("command", value(command));

        let mut args = server_args(server);
        if name == CONTEXT_SERVER {
            apply_context_arg(&mut args, context);
        }
        let args: Array = args.iter().map(value_text).collect();
        table.insert("args", value(args));

        if let Some(env) = server.get("env").and_then(Value::as_object) {
            let mut env_table = InlineTable::new();
            for (key, val) in env {
                env_table.insert(key.as_str(), TomlValue::from(value_text(val)));
            }
            table.insert("env", value(env_table));
        }

        servers_table.insert(name, Item::Table(table));
    }

    if servers_table.is_empty() {
        return String::new();
    }

    let mut doc = DocumentMut::new();
    doc.insert(MCP_SERVERS_TABLE, Item::Table(servers_table));
    doc.to_string()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn collapse_blank_run(out: &mut String) {
    let kept = trim_trailing_blank_lines(out).len();
    if kept < out.len() {
        out.truncate(kept);
        if !out.is_empty() {
            out.push('\n');
        }
    }
}

fn trim_trailing_blank_lines(text: &str) -> &str {
    let mut end = text.len();
    while let Some(body) = text[..end].strip_suffix('\n') {
        let line_start = body.rfind('\n').map_or(0, |idx| idx + 1);
        if !body[line_start..].trim().is_empty() {
            break;
        }
        end = line_start;
    }
    &text[..end]
}
