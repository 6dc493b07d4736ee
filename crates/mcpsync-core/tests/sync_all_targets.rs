//! End-to-end runs over a temporary home directory.

mod support;

use mcpsync_core::report::TargetOutcome;
use serde_json::json;
use support::{TestHome, context_args};

const JSON_TARGETS: &[&str] = &[
    ".config/.copilot/mcp-config.json",
    ".config/github-copilot/intellij/mcp.json",
    ".config/github-copilot/mcp.json",
    ".config/mcp/mcp_config.json",
    ".config/cursor/mcp.json",
    ".config/vscode/mcp.json",
    ".config/junie/mcp/mcp.json",
    ".config/lmstudio/mcp.json",
];

const OPENCODE: &str = ".config/opencode/opencode.json";

#[test]
fn full_sync_writes_every_json_target() {
    let home = TestHome::new();

    let (report, _) = home.run();

    for relative in JSON_TARGETS {
        assert!(home.join(relative).is_file(), "{relative} should be written");
    }
    assert_eq!(report.targets.len(), 12);
    assert_eq!(report.synced_count(), 8);
    assert!(!home.join(OPENCODE).exists());
    assert_eq!(
        report.get("opencode"),
        Some(&TargetOutcome::skipped("file not found"))
    );
    assert_eq!(
        report.get("codex"),
        Some(&TargetOutcome::skipped("file not found"))
    );
    assert_eq!(
        report.get("claude-code"),
        Some(&TargetOutcome::skipped("file not found"))
    );
    assert_eq!(
        report.get("copilot-cli"),
        Some(&TargetOutcome::skipped("file not found"))
    );
}

#[test]
fn copilot_format_has_tools_array() {
    let home = TestHome::new();

    home.run();

    let config = home.read_json(".config/.copilot/mcp-config.json");
    for (name, server) in config["mcpServers"].as_object().unwrap() {
        assert_eq!(server["tools"], json!(["*"]), "{name} should expose all tools");
        assert_eq!(server["type"], json!("local"));
    }
}

#[test]
fn generic_config_has_schema_and_no_context() {
    let home = TestHome::new();

    home.run();

    let config = home.read_json(".config/mcp/mcp_config.json");
    assert_eq!(
        config["$schema"],
        json!("https://modelcontextprotocol.io/schema/config.json")
    );
    assert!(context_args(&config["mcpServers"]["serena"]["args"]).is_empty());
}

#[test]
fn each_target_gets_its_own_context() {
    let home = TestHome::new();
    home.write_json(OPENCODE, &json!({}));

    home.run();

    let cases = [
        (".config/.copilot/mcp-config.json", "mcpServers", "--context=ide"),
        (".config/github-copilot/intellij/mcp.json", "servers", "--context=ide"),
        (".config/github-copilot/mcp.json", "servers", "--context=ide"),
        (".config/cursor/mcp.json", "mcpServers", "--context=ide"),
        (".config/vscode/mcp.json", "servers", "--context=ide"),
        (".config/junie/mcp/mcp.json", "mcpServers", "--context=agent"),
        (".config/lmstudio/mcp.json", "mcpServers", "--context=desktop-app"),
    ];
    for (relative, container, expected) in cases {
        let config = home.read_json(relative);
        assert_eq!(
            context_args(&config[container]["serena"]["args"]),
            vec![expected.to_string()],
            "{relative}"
        );
    }

    let opencode = home.read_json(OPENCODE);
    assert_eq!(
        context_args(&opencode["mcp"]["serena"]["command"]),
        vec!["--context=ide".to_string()]
    );
}

#[test]
fn note_is_stripped_and_env_is_kept() {
    let home = TestHome::new();

    home.run();

    let cursor = home.read_json(".config/cursor/mcp.json");
    assert!(cursor["mcpServers"]["filesystem"].get("note").is_none());
    assert_eq!(
        cursor["mcpServers"]["github"]["env"],
        json!({"GITHUB_TOKEN": "${GITHUB_TOKEN}"})
    );
    let vscode = home.read_json(".config/vscode/mcp.json");
    assert!(vscode["servers"]["filesystem"].get("note").is_none());
}

#[test]
fn legacy_mirrors_follow_existing_directories() {
    let home = TestHome::new();
    home.mkdir(".cursor");
    home.mkdir(".junie");

    let (report, _) = home.run();

    assert_eq!(home.read(".cursor/mcp.json"), home.read(".config/cursor/mcp.json"));
    assert_eq!(
        home.read(".junie/mcp/mcp.json"),
        home.read(".config/junie/mcp/mcp.json")
    );
    assert!(!home.join(".vscode").exists());
    assert!(!home.join(".lmstudio").exists());
    assert!(matches!(
        report.get("cursor"),
        Some(TargetOutcome::Synced { mirrored, .. }) if mirrored.len() == 1
    ));
}

#[test]
fn second_run_is_byte_identical() {
    let home = TestHome::new();
    home.write(
        ".codex/config.toml",
        "model = \"gpt-5.2\"\n\n[mcp_servers.stale]\ncommand = \"old\"\n",
    );
    home.write_json(".claude.json", &json!({"numStartups": 3}));
    home.write_json(".config/.copilot/config.json", &json!({"model": "gpt-5"}));
    home.write_json(
        ".config/.copilot/config.backup.json",
        &json!({"logged_in_users": [{"login": "u"}], "last_logged_in_user": {"login": "u"}}),
    );
    home.write_json(OPENCODE, &json!({"theme": "tokyonight"}));
    home.mkdir(".vscode");

    home.run();
    let first: Vec<String> = snapshot(&home);
    home.run();
    let second: Vec<String> = snapshot(&home);

    assert_eq!(first, second);
}

fn snapshot(home: &TestHome) -> Vec<String> {
    JSON_TARGETS
        .iter()
        .chain(&[
            OPENCODE,
            ".codex/config.toml",
            ".claude.json",
            ".config/.copilot/config.json",
            ".vscode/mcp.json",
        ])
        .map(|relative| home.read(relative))
        .collect()
}

#[test]
fn empty_master_produces_empty_containers() {
    let home = TestHome::empty();
    home.write(".config/mcp/mcp-master.json", r#"{"servers": null}"#);
    home.write_json(OPENCODE, &json!({}));

    let (report, _) = home.run();

    assert_eq!(report.failed_count(), 0);
    assert_eq!(home.read_json(".config/cursor/mcp.json"), json!({"mcpServers": {}}));
    assert_eq!(home.read_json(".config/vscode/mcp.json"), json!({"servers": {}}));
    assert_eq!(home.read_json(OPENCODE), json!({"mcp": {}}));
}

#[test]
fn opaque_keys_survive_through_overrides() {
    let home = TestHome::new();
    home.write_json(
        ".config/mcp/overrides/vscode.json",
        &json!({"inputs": [{"id": "token", "type": "promptString"}]}),
    );

    home.run();

    let vscode = home.read_json(".config/vscode/mcp.json");
    assert_eq!(vscode["inputs"][0]["id"], json!("token"));
    assert!(vscode["servers"]["serena"].is_object());
}
