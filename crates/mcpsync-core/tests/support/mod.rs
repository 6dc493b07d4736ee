#![allow(dead_code)]

use std::path::{Path, PathBuf};

use mcpsync_core::context::AppContext;
use mcpsync_core::orchestration::SyncService;
use mcpsync_core::report::{MemoryReporter, SyncReport};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Throw-away home directory with a master config in place.
pub struct TestHome {
    pub temp: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        let home = Self {
            temp: TempDir::new().expect("create temp home"),
        };
        home.write_json(".config/mcp/mcp-master.json", &master_config());
        home
    }

    pub fn empty() -> Self {
        Self {
            temp: TempDir::new().expect("create temp home"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.temp.path().join(relative)
    }

    pub fn app(&self) -> AppContext {
        AppContext::new(self.temp.path().to_path_buf())
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.join(relative);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        std::fs::write(path, contents).expect("write file");
    }

    pub fn write_json(&self, relative: &str, value: &Value) {
        self.write(relative, &serde_json::to_string_pretty(value).expect("serialize"));
    }

    pub fn mkdir(&self, relative: &str) {
        std::fs::create_dir_all(self.join(relative)).expect("create dir");
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.join(relative)).expect("read file")
    }

    pub fn read_json(&self, relative: &str) -> Value {
        serde_json::from_str(&self.read(relative)).expect("parse json")
    }

    pub fn run(&self) -> (SyncReport, MemoryReporter) {
        let mut reporter = MemoryReporter::new();
        let report = SyncService::new(self.app())
            .run(&mut reporter)
            .expect("sync succeeds");
        (report, reporter)
    }
}

/// Four servers: two plain, one with env, and `serena`.
pub fn master_config() -> Value {
    json!({
        "servers": {
            "filesystem": {
                "command": "node",
                "args": ["/path/to/filesystem-mcp-server/dist/index.js"],
                "type": "local",
                "note": "Local filesystem access"
            },
            "memory": {
                "command": "node",
                "args": ["/path/to/memory-mcp-server/dist/index.js"],
                "type": "local"
            },
            "github": {
                "command": "uv",
                "args": ["run", "github-mcp"],
                "type": "local",
                "env": {"GITHUB_TOKEN": "${GITHUB_TOKEN}"}
            },
            "serena": {
                "command": "bash",
                "args": [
                    "-lc",
                    "exec \"$HOME/.local/share/chezmoi/scripts/serena-mcp\" \"$@\"",
                    "serena-mcp",
                    "start-mcp-server"
                ],
                "type": "local"
            }
        }
    })
}

/// Every `--context=` argument found in `args`.
pub fn context_args(args: &Value) -> Vec<String> {
    args.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|arg| arg.starts_with("--context="))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
