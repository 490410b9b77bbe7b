//! CLI integration tests
//!
//! These tests run the built binary against context directories written to
//! a temp dir and check its output and exit status.

use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn bundle(entry_id: &str, bundle_hash: &str) -> Value {
    json!({
        "type": "LogicStampBundle",
        "schemaVersion": "0.1",
        "entryId": entry_id,
        "bundleHash": bundle_hash,
        "graph": {
            "nodes": [{
                "entryId": entry_id,
                "contract": {"semanticHash": format!("sem-{bundle_hash}")}
            }],
            "edges": []
        }
    })
}

fn write_context_dir(root: &Path, folder: &str, bundles: Vec<Value>) {
    let index = json!({
        "type": "LogicStampIndex",
        "schemaVersion": "0.2",
        "projectRoot": ".",
        "summary": {"totalComponents": bundles.len(), "totalBundles": bundles.len(), "totalFolders": 1},
        "folders": [{
            "path": folder,
            "contextFile": format!("{folder}/context.json"),
            "bundles": bundles.len()
        }]
    });
    fs::create_dir_all(root.join(folder)).unwrap();
    fs::write(root.join("context_main.json"), index.to_string()).unwrap();
    fs::write(
        root.join(folder).join("context.json"),
        Value::Array(bundles).to_string(),
    )
    .unwrap();
}

fn setup_pair(temp: &TempDir) {
    write_context_dir(
        &temp.path().join("baseline"),
        "src",
        vec![bundle("src/Button.tsx", "H1"), bundle("src/Input.tsx", "H2")],
    );
    write_context_dir(
        &temp.path().join("current"),
        "src",
        vec![bundle("src/Button.tsx", "H1"), bundle("src/Select.tsx", "H3")],
    );
}

fn run(temp: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ctxdrift-cli"))
        .current_dir(temp.path())
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_cli_compare_prints_markdown_summary() {
    // Scenario: compare two directories with drift
    // When: `ctxdrift compare --baseline baseline --current current`
    // Then: exits 0 and prints the Markdown summary naming both changes

    let temp = TempDir::new().unwrap();
    setup_pair(&temp);

    let output = run(&temp, &["compare", "--baseline", "baseline", "--current", "current"]);

    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("**Status**: DIFF"));
    assert!(stdout.contains("**Input** removed"));
    assert!(stdout.contains("**Select** added"));
}

#[test]
fn test_cli_compare_fail_on_diff_exits_one() {
    // Scenario: CI gate
    // When: `ctxdrift compare ... --fail-on-diff --json`
    // Then: prints the JSON result and exits 1

    let temp = TempDir::new().unwrap();
    setup_pair(&temp);

    let output = run(
        &temp,
        &[
            "compare",
            "--baseline",
            "baseline",
            "--current",
            "current",
            "--json",
            "--fail-on-diff",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["status"], json!("diff"));
    assert_eq!(result["summary"]["changedFolders"], json!(1));
}

#[test]
fn test_cli_compare_identical_passes_with_fail_on_diff() {
    let temp = TempDir::new().unwrap();
    setup_pair(&temp);

    let output = run(
        &temp,
        &["compare", "--baseline", "baseline", "--current", "baseline", "--fail-on-diff"],
    );

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("**Status**: PASS"));
}

#[test]
fn test_cli_compare_bad_config_exits_one() {
    // Scenario: malformed config file
    // Then: no compare runs, stderr carries the error code

    let temp = TempDir::new().unwrap();
    setup_pair(&temp);
    fs::write(temp.path().join("ctxdrift.toml"), "snapshot_ttl_ms = \"soon\"").unwrap();

    let output = run(
        &temp,
        &[
            "compare",
            "--baseline",
            "baseline",
            "--current",
            "current",
            "--config",
            "ctxdrift.toml",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_INPUT"));
}

#[test]
fn test_cli_index_filters_by_prefix() {
    let temp = TempDir::new().unwrap();
    setup_pair(&temp);

    let output = run(&temp, &["index", "--dir", "baseline", "--prefix", "lib/"]);

    assert!(output.status.success());
    let index: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(index["folders"], json!([]));
}

#[test]
fn test_cli_bundle_by_component() {
    let temp = TempDir::new().unwrap();
    setup_pair(&temp);

    let output = run(
        &temp,
        &["bundle", "--dir", "current", "--folder", "src", "--component", "Select"],
    );

    assert!(output.status.success());
    let bundles: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(bundles.as_array().unwrap().len(), 1);
    assert_eq!(bundles[0]["bundleHash"], json!("H3"));
}

#[test]
fn test_cli_bundle_unknown_component_exits_one() {
    let temp = TempDir::new().unwrap();
    setup_pair(&temp);

    let output = run(
        &temp,
        &["bundle", "--dir", "current", "--folder", "src", "--component", "Input"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_NOT_FOUND"));
}
