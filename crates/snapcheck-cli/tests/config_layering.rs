//! Integration tests for configuration layering.
//!
//! Tests the full priority chain: hardcoded defaults < XDG config < project config < CLI args

#![allow(clippy::unwrap_used)]

mod common;

use common::{jsonl, Sandbox};
use predicates::prelude::*;
use serde_json::Value;

fn models_config(sandbox: &Sandbox) -> String {
    format!(
        "[models]\nrotation = '{}'\ncrop = '{}'\n",
        sandbox.rotation_model().display(),
        sandbox.crop_model().display()
    )
}

#[test]
fn test_project_config_supplies_models() {
    let sandbox = Sandbox::passing();
    let image = sandbox.sharp_image("a.png");
    sandbox.write_project_config(&models_config(&sandbox));

    sandbox.command().arg("--quiet").arg(&image).assert().code(0);
}

#[test]
fn test_xdg_config_supplies_models() {
    let sandbox = Sandbox::passing();
    let image = sandbox.sharp_image("a.png");
    sandbox.write_xdg_config(&models_config(&sandbox));

    sandbox.command().arg("--quiet").arg(&image).assert().code(0);
}

#[test]
fn test_project_config_applies_format() {
    let sandbox = Sandbox::passing();
    let image = sandbox.sharp_image("a.png");
    sandbox.write_project_config("[output]\nformat = 'json'\n");

    let output = sandbox.check().arg(&image).output().unwrap();
    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(parsed.is_array());
}

#[test]
fn test_project_config_overrides_xdg() {
    let sandbox = Sandbox::passing();
    let image = sandbox.sharp_image("a.png");
    sandbox.write_xdg_config("[output]\nformat = 'json'\n");
    sandbox.write_project_config("[output]\nformat = 'jsonl'\n");

    let output = sandbox.check().arg(&image).output().unwrap();
    let records = jsonl(&output.stdout);
    assert_eq!(records.len(), 1);
    assert!(records[0].is_object());
}

#[test]
fn test_cli_overrides_project_config() {
    let sandbox = Sandbox::passing();
    let image = sandbox.sharp_image("a.png");
    sandbox.write_project_config("[output]\nformat = 'json'\n");

    let output = sandbox
        .check()
        .args(["--format", "jsonl"])
        .arg(&image)
        .output()
        .unwrap();
    assert!(jsonl(&output.stdout)[0].is_object());
}

#[test]
fn test_policy_config_ignores_blur() {
    let sandbox = Sandbox::passing();
    let image = sandbox.blurry_image("gray.png");
    sandbox.write_project_config("[policy]\nblur_affects_validity = false\n");

    let output = sandbox.check().arg(&image).output().unwrap();
    assert_eq!(output.status.code(), Some(0));

    let report = &jsonl(&output.stdout)[0]["report"];
    assert_eq!(report["blur"]["blurred"], true);
    assert_eq!(report["valid"], true);
}

#[test]
fn test_config_checksum_mismatch_is_fatal() {
    let sandbox = Sandbox::passing();
    let image = sandbox.sharp_image("a.png");
    sandbox.write_project_config(&format!(
        "{}crop_sha256 = '{}'\n",
        models_config(&sandbox),
        "0".repeat(64)
    ));

    sandbox
        .command()
        .arg("--quiet")
        .arg(&image)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("checksum mismatch"));
}

#[test]
fn test_cli_model_flag_drops_config_checksum() {
    let sandbox = Sandbox::passing();
    let image = sandbox.sharp_image("a.png");
    sandbox.write_project_config(&format!(
        "{}crop_sha256 = '{}'\n",
        models_config(&sandbox),
        "0".repeat(64)
    ));

    sandbox.check().arg(&image).assert().code(0);
}

#[test]
fn test_invalid_config_value_warns() {
    let sandbox = Sandbox::passing();
    let image = sandbox.sharp_image("a.png");
    sandbox.write_project_config("[output]\nformat = 'xml'\n");

    let output = sandbox.check().arg(&image).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("output.format"));
    assert_eq!(jsonl(&output.stdout).len(), 1);
}

#[test]
fn test_malformed_config_file_ignored() {
    let sandbox = Sandbox::passing();
    let image = sandbox.sharp_image("a.png");
    sandbox.write_project_config("[output\nformat = 'json'\n");

    sandbox
        .check()
        .arg(&image)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Failed to parse config file"));
}
