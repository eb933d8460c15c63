//! CLI end-to-end tests that invoke the compiled `price-sync` binary
//! against temporary repository roots.

use assert_cmd::Command;
use predicates::prelude::*;
use price_test_utils::{TestWorkspace, sample_upstream};
use serde_json::json;

/// Get a Command for the price-sync binary rooted at `ws`.
fn price_sync(ws: &TestWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("price-sync").expect("Failed to find price-sync binary");
    cmd.arg("--repo-root")
        .arg(ws.root())
        .env("NO_COLOR", "1")
        .env_remove("PRICE_SYNC_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn seeded_workspace() -> TestWorkspace {
    let ws = TestWorkspace::new();
    ws.write_config(&TestWorkspace::default_config());
    ws.write_upstream(&sample_upstream());
    ws
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).unwrap()
}

// ============================================================================
// sync
// ============================================================================

#[test]
fn test_help_exits_zero() {
    Command::cargo_bin("price-sync")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_first_sync_writes_output_and_hash() {
    let ws = seeded_workspace();

    let stdout = stdout_of(price_sync(&ws).arg("sync"));

    assert!(stdout.contains("CHANGED=true"), "stdout: {stdout}");
    let output = ws.read_json("data/prices.json");
    assert!(output.get("gpt-4").is_some());
    assert!(output.get("claude-3").is_some());
    assert!(output.get("other-model").is_none());

    let hash = ws.read_text("data/prices.sha256");
    assert_eq!(hash.len(), 65);
    assert!(stdout.contains(&format!("HASH={}", hash.trim())));
}

#[test]
fn test_second_sync_reports_unchanged() {
    let ws = seeded_workspace();
    price_sync(&ws).arg("sync").assert().success();
    let before = ws.read_text("data/prices.json");

    price_sync(&ws)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("CHANGED=false"))
        .stdout(predicate::str::contains("No changes detected"));

    assert_eq!(ws.read_text("data/prices.json"), before);
}

#[test]
fn test_sync_is_the_default_command() {
    let ws = seeded_workspace();

    price_sync(&ws)
        .assert()
        .success()
        .stdout(predicate::str::contains("CHANGED=true"));

    ws.assert_file_exists("data/prices.json");
}

#[test]
fn test_dry_run_writes_nothing() {
    let ws = seeded_workspace();

    price_sync(&ws)
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CHANGED=true"))
        .stdout(predicate::str::contains("DRY-RUN"));

    ws.assert_file_not_exists("data/prices.json");
    ws.assert_file_not_exists("data/prices.sha256");
}

#[test]
fn test_sync_json_report() {
    let ws = seeded_workspace();

    let stdout = stdout_of(price_sync(&ws).args(["sync", "--json"]));
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(report["outcome"], json!("updated"));
    assert_eq!(report["total_models"], json!(2));
    assert_eq!(report["merge"]["added"], json!(2));
    assert_eq!(
        report["digest"].as_str().unwrap(),
        ws.read_text("data/prices.sha256").trim()
    );
}

#[test]
fn test_toml_config_with_aliases_and_custom_models() {
    let ws = TestWorkspace::new();
    ws.write_upstream(&sample_upstream());
    ws.write_file(
        "sync.toml",
        r#"
upstream_url = "upstream.json"
output_file = "prices.json"
hash_file = "prices.sha256"
sync_mode = "full"
prefix_filters = ["claude-"]

[aliases.claude-latest]
source = "claude-3"

[aliases.claude-missing]
source = "claude-9"

[custom_models.internal-model]
input_cost_per_token = 0.0
"#,
    );

    price_sync(&ws)
        .args(["--config", "sync.toml", "sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alias claude-latest"))
        .stdout(predicate::str::contains("claude-missing skipped"));

    let output = ws.read_json("prices.json");
    assert_eq!(output["claude-latest"], output["claude-3"]);
    assert!(output.get("claude-missing").is_none());
    assert_eq!(output["internal-model"], json!({"input_cost_per_token": 0.0}));
}

#[test]
fn test_missing_config_exits_one() {
    let ws = TestWorkspace::new();

    price_sync(&ws)
        .arg("sync")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_invalid_mode_exits_one() {
    let ws = TestWorkspace::new();
    let mut config = TestWorkspace::default_config();
    config["sync_mode"] = json!("mirror");
    ws.write_config(&config);

    price_sync(&ws)
        .arg("sync")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("mirror"));
}

#[test]
fn test_unreadable_upstream_leaves_files_untouched() {
    let ws = seeded_workspace();
    price_sync(&ws).arg("sync").assert().success();
    let before = ws.read_text("data/prices.json");

    ws.write_file("upstream.json", "<html>Service Unavailable</html>");

    price_sync(&ws)
        .arg("sync")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"));

    assert_eq!(ws.read_text("data/prices.json"), before);
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_before_sync_reports_missing() {
    let ws = seeded_workspace();

    price_sync(&ws)
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("MISSING"));
}

#[test]
fn test_check_after_sync_is_healthy() {
    let ws = seeded_workspace();
    price_sync(&ws).arg("sync").assert().success();

    price_sync(&ws)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

#[test]
fn test_check_detects_hand_edit() {
    let ws = seeded_workspace();
    price_sync(&ws).arg("sync").assert().success();
    ws.write_json("data/prices.json", &json!({"gpt-4": {"input_cost_per_token": 1}}));

    price_sync(&ws)
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("DRIFTED"))
        .stdout(predicate::str::contains("Checksum mismatch"));

    let output = price_sync(&ws).args(["check", "--json"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["status"], json!("drifted"));
}
