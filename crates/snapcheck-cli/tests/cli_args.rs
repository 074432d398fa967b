//! CLI argument validation tests.
//!
//! Tests command-line argument parsing, startup failures and exit codes.

#![allow(clippy::unwrap_used)]

mod common;

use common::Sandbox;
use predicates::prelude::*;

// === Missing/Invalid Path Tests ===

#[test]
fn test_missing_path_shows_error() {
    let sandbox = Sandbox::passing();
    sandbox.command().assert().code(2).stderr(
        predicate::str::contains("No paths specified")
            .or(predicate::str::contains("required"))
            .or(predicate::str::contains("PATHS")),
    );
}

#[test]
fn test_nonexistent_path_warns_but_continues() {
    let sandbox = Sandbox::passing();
    sandbox
        .check()
        .arg("/nonexistent/path/to/image.jpg")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_empty_directory() {
    let sandbox = Sandbox::passing();
    sandbox
        .check()
        .arg(sandbox.images())
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());
}

// === Startup Failures ===

#[test]
fn test_missing_models_exit_code_2() {
    let sandbox = Sandbox::passing();
    let image = sandbox.sharp_image("a.png");

    sandbox
        .command()
        .arg("--rotation-model")
        .arg(sandbox.root.path().join("nope.safetensors"))
        .arg("--crop-model")
        .arg(sandbox.crop_model())
        .arg(&image)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("rotation model unavailable"));
}

#[test]
fn test_empty_cache_hints_at_fetch() {
    let sandbox = Sandbox::passing();
    let image = sandbox.sharp_image("a.png");

    sandbox
        .command()
        .arg(&image)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("snapcheck models fetch"));
}

#[test]
fn test_malformed_model_exit_code_2() {
    let sandbox = Sandbox::passing();
    std::fs::write(sandbox.crop_model(), b"not safetensors").unwrap();
    let image = sandbox.sharp_image("a.png");

    sandbox
        .check()
        .arg(&image)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("crop model unavailable"));
}

#[test]
fn test_models_loaded_from_models_dir() {
    let sandbox = Sandbox::passing();
    let image = sandbox.sharp_image("a.png");

    sandbox
        .command()
        .arg("--models-dir")
        .arg(sandbox.models_dir())
        .arg("--quiet")
        .arg(&image)
        .assert()
        .code(0);
}

// === Format Validation Tests ===

#[test]
fn test_invalid_format_rejected() {
    let sandbox = Sandbox::passing();
    let image = sandbox.sharp_image("a.png");

    sandbox
        .check()
        .arg("--format")
        .arg("xml")
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("json").or(predicate::str::contains("jsonl")));
}

#[test]
fn test_check_subcommand_matches_default() {
    let sandbox = Sandbox::passing();
    let image = sandbox.sharp_image("a.png");

    let mut cmd = sandbox.command();
    cmd.arg("check")
        .arg("--rotation-model")
        .arg(sandbox.rotation_model())
        .arg("--crop-model")
        .arg(sandbox.crop_model())
        .arg("--quiet")
        .arg(&image);
    cmd.assert().code(0);
}

// === Exit Codes ===

#[test]
fn test_invalid_image_exit_code_1() {
    let sandbox = Sandbox::passing();
    let image = sandbox.blurry_image("gray.png");

    sandbox.check().arg(&image).assert().code(1);
}

#[test]
fn test_ignore_blur_flag() {
    let sandbox = Sandbox::passing();
    let image = sandbox.blurry_image("gray.png");

    sandbox.check().arg("--ignore-blur").arg(&image).assert().code(0);
}

#[test]
fn test_rotated_exit_code_1() {
    let sandbox = Sandbox::with_scores(0.05, common::PASSING_CROP);
    let image = sandbox.sharp_image("a.png");

    sandbox.check().arg(&image).assert().code(1);
}

#[test]
fn test_undecodable_file_exit_code_1() {
    let sandbox = Sandbox::passing();
    sandbox.sharp_image("a.png");
    sandbox.write_image("broken.jpg", b"garbage");

    sandbox.check().arg(sandbox.images()).assert().code(1);
}

// === Help and Version ===

#[test]
fn test_help() {
    let sandbox = Sandbox::passing();
    sandbox
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--rotation-model"))
        .stdout(predicate::str::contains("--ignore-blur"));
}

#[test]
fn test_version() {
    let sandbox = Sandbox::passing();
    sandbox
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("snapcheck"));
}

// === Models Subcommand ===

#[test]
fn test_models_path() {
    let sandbox = Sandbox::passing();
    sandbox
        .command()
        .args(["models", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("snapcheck/models"));
}

#[test]
fn test_models_list_reports_cache() {
    let sandbox = Sandbox::passing();
    sandbox
        .command()
        .args(["models", "list", "--models-dir"])
        .arg(sandbox.models_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("2/2 models installed"));
}

#[test]
fn test_models_fetch_copies_into_cache() {
    let sandbox = Sandbox::passing();
    let cache = sandbox.root.path().join("cache");

    sandbox
        .command()
        .args(["models", "fetch", "--rotation-model"])
        .arg(sandbox.rotation_model())
        .arg("--crop-model")
        .arg(sandbox.crop_model())
        .arg("--models-dir")
        .arg(&cache)
        .assert()
        .success();

    assert!(cache.join("rotation.safetensors").is_file());
    assert!(cache.join("crop.safetensors").is_file());
}

#[test]
fn test_models_fetch_without_sources_fails() {
    let sandbox = Sandbox::passing();
    sandbox
        .command()
        .args(["models", "fetch"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No model sources configured"));
}
