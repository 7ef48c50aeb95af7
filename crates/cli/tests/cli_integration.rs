//! CLI integration tests for the `bem` binary.
//!
//! Uses `assert_cmd` to spawn the binary and verify exit codes, stdout
//! content, and stderr content. Commands run from the workspace root so
//! fixture paths resolve.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn bem() -> Command {
    let mut cmd = cargo_bin_cmd!("bem");
    cmd.current_dir(workspace_root());
    cmd.env_remove("RUST_LOG");
    cmd
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    bem()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolve BEM attributes"));
}

#[test]
fn version_exits_0() {
    bem()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bem"));
}

// ──────────────────────────────────────────────
// 2. Transform
// ──────────────────────────────────────────────

#[test]
fn transform_prints_resolved_tree() {
    bem()
        .args(["transform", "fixtures/card.json"])
        .assert()
        .success()
        .stdout(
            "<div id=\"main\" className={bem(\"card\", null, null, null)}>\n\
             \x20 <h2 className={bem(\"card\", \"title\", { large: isLarge }, null)}>\n\
             \x20   Hello\n\
             \x20 </h2>\n\
             \x20 <p className=\"lead\" />\n\
             </div>\n",
        );
}

#[test]
fn transform_uses_custom_helper() {
    bem()
        .args(["transform", "fixtures/card.json", "--helper", "cn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("className={cn(\"card\""));
}

#[test]
fn transform_json_output_is_a_document() {
    let output = bem()
        .args(["--output", "json", "transform", "fixtures/card.json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["file"], "card.jsx");
    let attrs = doc["roots"][0]["attributes"].as_array().unwrap();
    let names: Vec<&str> = attrs.iter().map(|a| a["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["id", "className"]);
}

#[test]
fn transform_output_is_stable_on_second_run() {
    let tmp = TempDir::new().unwrap();
    let first = bem()
        .args(["--output", "json", "transform", "fixtures/card.json"])
        .output()
        .unwrap();
    assert!(first.status.success());
    let path = tmp.path().join("once.json");
    fs::write(&path, &first.stdout).unwrap();

    let second = bem()
        .args(["--output", "json", "transform"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(second.status.success());
    let a: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    let b: serde_json::Value = serde_json::from_slice(&second.stdout).unwrap();
    assert_eq!(a, b);
}

// ──────────────────────────────────────────────
// 3. Policy violations
// ──────────────────────────────────────────────

#[test]
fn identifier_rejected_by_default() {
    bem()
        .args(["transform", "fixtures/identifier_block.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dynamic.jsx:4:19"))
        .stderr(predicate::str::contains("allowIdentifier"));
}

#[test]
fn identifier_accepted_with_set() {
    bem()
        .args([
            "transform",
            "fixtures/identifier_block.json",
            "--set",
            "allowIdentifier=true",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("bem(blockName, null, null, null)"));
}

#[test]
fn error_json_has_kind_and_locator() {
    let output = bem()
        .args(["--output", "json", "transform", "fixtures/empty_mods.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["kind"], "empty_value");
    assert_eq!(err["attribute"], "mods");
    assert_eq!(err["line"], 2);
    assert_eq!(err["column"], 25);
}

#[test]
fn quiet_suppresses_warning_log() {
    bem()
        .args([
            "--quiet",
            "transform",
            "fixtures/empty_mods.json",
            "--set",
            "allowFalsyValue=true",
        ])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn quiet_suppresses_error_output() {
    bem()
        .args(["--quiet", "transform", "fixtures/empty_mods.json"])
        .assert()
        .failure()
        .stderr(predicate::str::is_empty());
}

#[test]
fn empty_value_warns_under_config() {
    bem()
        .args([
            "transform",
            "fixtures/empty_mods.json",
            "--config",
            "fixtures/permissive.toml",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "empty.jsx:2:25: 'mods' has an empty value",
        ))
        .stderr(predicate::str::contains("WARN"))
        .stdout(predicate::str::contains("bem(\"btn\", null, null, null)"));
}

// ──────────────────────────────────────────────
// 4. Check
// ──────────────────────────────────────────────

#[test]
fn check_reports_counts() {
    bem()
        .args(["check", "fixtures/card.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ok: 1 root(s), 3 element(s), 4 attribute(s) resolved, 0 warning(s)",
        ));
}

#[test]
fn check_json_lists_warnings() {
    let output = bem()
        .args([
            "--output",
            "json",
            "check",
            "fixtures/empty_mods.json",
            "--set",
            "allowFalsyValue=true",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["status"], "ok");
    assert_eq!(report["warnings"][0]["kind"], "empty_value_warning");
    assert_eq!(report["class_names_added"], 1);
}

#[test]
fn check_fails_on_violation() {
    bem()
        .args(["check", "fixtures/identifier_block.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ──────────────────────────────────────────────
// 5. Policy and configuration
// ──────────────────────────────────────────────

#[test]
fn policy_prints_defaults() {
    let output = bem().arg("policy").output().unwrap();
    assert!(output.status.success());
    let policy: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(policy["allowIdentifier"], false);
    assert_eq!(policy["allowCallExpression"], true);
    assert_eq!(policy["arrayMaxLength"], 3);
}

#[test]
fn set_overrides_config_file() {
    let output = bem()
        .args([
            "policy",
            "--config",
            "fixtures/permissive.toml",
            "--set",
            "arrayMaxLength=1",
        ])
        .output()
        .unwrap();
    let policy: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(policy["allowIdentifier"], true);
    assert_eq!(policy["arrayMaxLength"], 1);
}

#[test]
fn unknown_set_key_is_ignored() {
    bem()
        .args(["policy", "--set", "favouriteColour=blue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"allowFalsyValue\": false"));
}

#[test]
fn bad_set_value_fails() {
    bem()
        .args(["policy", "--set", "allowIdentifier=maybe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("allowIdentifier"));
}

#[test]
fn missing_file_fails() {
    bem()
        .args(["transform", "fixtures/does_not_exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error reading"));
}

#[test]
fn file_name_defaults_to_path() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("anon.json");
    fs::write(
        &path,
        r#"{ "roots": [ { "name": "i", "attributes": [
            { "type": "named", "name": "elem", "prov": { "line": 9, "column": 4 } }
        ] } ] }"#,
    )
    .unwrap();
    bem()
        .args(["transform"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("anon.json:9:4"));
}
