//! Context marker normalisation for the `serena` server entry.

use serde_json::{Map, Value};

use crate::types::{CONTEXT_FLAG, CONTEXT_SERVER, ServerContainer, context_arg};

/// Insert or replace `--context=<context>` in the `serena` entry of `config`.
///
/// The entry is looked up in `servers`, then `mcpServers`, then `mcp`. For
/// the `mcp` shape a list-valued `command` is edited in place and no `args`
/// field is introduced. Missing entries and non-list argument fields leave
/// the document unchanged.
pub fn set_context(mut config: Map<String, Value>, context: &str) -> Map<String, Value> {
    apply_context(&mut config, context);
    config
}

/// In-place variant of [`set_context`]. Returns whether a marker was written.
pub fn apply_context(config: &mut Map<String, Value>, context: &str) -> bool {
    let Some(container) = ServerContainer::resolve(config, CONTEXT_SERVER) else {
        return false;
    };

    let Some(entry) = config
        .get_mut(container.key())
        .and_then(Value::as_object_mut)
        .and_then(|servers| servers.get_mut(CONTEXT_SERVER))
        .and_then(Value::as_object_mut)
    else {
        return false;
    };

    let field = if container.embeds_args_in_command()
        && entry.get("command").is_some_and(Value::is_array)
    {
        "command"
    } else {
        "args"
    };

    let args = entry
        .entry(field)
        .or_insert_with(|| Value::Array(Vec::new()));
    match args {
        Value::Array(items) => {
            apply_context_arg(items, context);
            true
        }
        _ => false,
    }
}

/// Replace the first context marker in `args`, or append one.
///
/// Later markers are dropped so exactly one remains.
pub fn apply_context_arg(args: &mut Vec<Value>, context: &str) {
    let marker = Value::String(context_arg(context));

    match args.iter().position(is_context_marker) {
        Some(first) => {
            let mut idx = 0;
            args.retain(|arg| {
                let keep = idx <= first || !is_context_marker(arg);
                idx += 1;
                keep
            });
            args[first] = marker;
        }
        None => args.push(marker),
    }
}

fn is_context_marker(arg: &Value) -> bool {
    arg.as_str().is_some_and(|s| s.starts_with(CONTEXT_FLAG))
}
