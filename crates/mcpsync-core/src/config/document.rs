//! Reading and rendering third-party JSON config documents.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

/// Read a JSON document whose root must be an object.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_json_map(path: &Path) -> Result<Option<Map<String, Value>>> {
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_json_map(&bytes)
        .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        .map(Some)
}

pub fn parse_json_map(bytes: &[u8]) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_slice(bytes)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("Expected JSON object at root"),
    }
}

/// Pretty JSON (2-space indent, sorted keys) with a trailing newline.
pub fn render_json(map: &Map<String, Value>) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(map).context("Failed to serialize JSON config")?;
    bytes.push(b'\n');
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn read_missing_file_is_none() {
        let temp = TempDir::new().unwrap();

        let result = read_json_map(&temp.path().join("missing.json")).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn read_rejects_non_object_root() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("list.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        assert!(read_json_map(&path).is_err());
    }

    #[test]
    fn read_rejects_malformed_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = read_json_map(&path).unwrap_err();
        assert!(format!("{err:#}").contains("bad.json"));
    }

    #[test]
    fn render_sorts_keys_and_ends_with_newline() {
        let map = obj(json!({"b": 1, "a": {"d": true, "c": [1]}}));

        let text = String::from_utf8(render_json(&map).unwrap()).unwrap();

        assert_eq!(
            text,
            "{\n  \"a\": {\n    \"c\": [\n      1\n    ],\n    \"d\": true\n  },\n  \"b\": 1\n}\n"
        );
    }
}
