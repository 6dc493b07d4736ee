//! Integration tests for the OpenCode config.

mod support;

use mcpsync_core::report::TargetOutcome;
use serde_json::json;
use support::TestHome;

const OPENCODE: &str = ".config/opencode/opencode.json";

#[test]
fn existing_config_keeps_unrelated_keys() {
    let home = TestHome::new();
    home.write_json(
        OPENCODE,
        &json!({
            "model": "gpt-4",
            "providers": ["openai"],
            "mcp": {"filesystem": {"command": ["old", "filesystem"], "enabled": true, "timeout": 30000}}
        }),
    );

    home.run();

    let config = home.read_json(OPENCODE);
    assert_eq!(config["model"], json!("gpt-4"));
    assert_eq!(config["providers"], json!(["openai"]));
    assert_eq!(
        config["mcp"]["filesystem"],
        json!({
            "type": "local",
            "command": ["node", "/path/to/filesystem-mcp-server/dist/index.js"],
            "enabled": true,
            "timeout": 30000
        })
    );
    assert_eq!(
        config["mcp"]["github"]["environment"],
        json!({"GITHUB_TOKEN": "${GITHUB_TOKEN}"})
    );
}

#[test]
fn template_provides_base_document() {
    let home = TestHome::new();
    home.write_json(
        ".config/mcp/templates/opencode.json",
        &json!({"$schema": "https://opencode.ai/config.json", "provider": {"anthropic": {"models": {}}}}),
    );

    home.run();

    let config = home.read_json(OPENCODE);
    assert_eq!(config["$schema"], json!("https://opencode.ai/config.json"));
    assert_eq!(config["provider"], json!({"anthropic": {"models": {}}}));
    assert_eq!(config["mcp"].as_object().unwrap().len(), 4);
}

#[test]
fn serena_context_lives_in_command_array() {
    let home = TestHome::new();
    home.write_json(OPENCODE, &json!({}));

    home.run();

    let serena = &home.read_json(OPENCODE)["mcp"]["serena"];
    assert!(serena.get("args").is_none());
    let command = serena["command"].as_array().unwrap();
    assert_eq!(command.first(), Some(&json!("bash")));
    assert_eq!(command.last(), Some(&json!("--context=ide")));
}

#[test]
fn template_and_existing_file_are_layered() {
    let home = TestHome::new();
    home.write_json(
        OPENCODE,
        &json!({"model": "anthropic/claude", "theme": "tokyonight"}),
    );
    home.write_json(
        ".config/mcp/templates/opencode.json",
        &json!({"$schema": "https://opencode.ai/config.json", "theme": "default"}),
    );

    home.run();

    let config = home.read_json(OPENCODE);
    assert_eq!(config["$schema"], json!("https://opencode.ai/config.json"));
    assert_eq!(config["model"], json!("anthropic/claude"));
    assert_eq!(config["theme"], json!("tokyonight"));
    assert_eq!(config["mcp"].as_object().unwrap().len(), 4);
}

#[test]
fn missing_config_without_template_is_skipped() {
    let home = TestHome::new();

    let (report, _) = home.run();

    assert_eq!(
        report.get("opencode"),
        Some(&TargetOutcome::skipped("file not found"))
    );
    assert!(!home.join(OPENCODE).exists());
}
