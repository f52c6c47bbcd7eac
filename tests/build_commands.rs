mod common;

use std::process::Command;
use tempfile::TempDir;

use common::helpers::{create_extension_project, write_manifest};
use common::get_extpack_binary;

// ===== BUILD COMMAND TESTS =====

/// Dry-run build logs the configure command with the release profile
#[test]
fn build_dry_run_logs_release_configure() {
    let temp = TempDir::new().unwrap();
    let manifest = create_extension_project(&temp);

    let output = Command::new(get_extpack_binary())
        .args([
            "build",
            "--manifest",
            manifest.to_string_lossy().as_ref(),
            "--dry-run",
        ])
        .output()
        .expect("Failed to execute extpack build --dry-run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "dry-run build should succeed. stderr: {stderr}"
    );
    assert!(
        stdout.contains("-DCMAKE_BUILD_TYPE=Release"),
        "configure command should be logged. stdout: {stdout}"
    );
    assert!(
        stdout.contains("--build"),
        "build command should be logged. stdout: {stdout}"
    );
}

/// The library output directory is named after the module
#[test]
fn build_dry_run_routes_library_to_module_dir() {
    let temp = TempDir::new().unwrap();
    let manifest = create_extension_project(&temp);

    let output = Command::new(get_extpack_binary())
        .args([
            "build",
            "--manifest",
            manifest.to_string_lossy().as_ref(),
            "--out-dir",
            "/dst",
            "--dry-run",
        ])
        .output()
        .expect("Failed to execute extpack build");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("-DCMAKE_LIBRARY_OUTPUT_DIRECTORY_RELEASE=/dst/openpose"),
        "library output should land in /dst/openpose. stdout: {stdout}"
    );
}

/// A debug profile request is promoted to release, with a notice
#[test]
fn build_debug_profile_promoted_with_notice() {
    let temp = TempDir::new().unwrap();
    let manifest = create_extension_project(&temp);

    let output = Command::new(get_extpack_binary())
        .args([
            "build",
            "--manifest",
            manifest.to_string_lossy().as_ref(),
            "--profile",
            "debug",
            "--dry-run",
        ])
        .output()
        .expect("Failed to execute extpack build --profile debug");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("-DCMAKE_BUILD_TYPE=Release"),
        "debug must be promoted to Release. stdout: {stdout}"
    );
    assert!(
        stdout.contains("note:"),
        "the promotion should be called out. stdout: {stdout}"
    );
}

/// Extra configure arguments keep their quoted boundaries
#[test]
fn build_config_args_preserve_quoting() {
    let temp = TempDir::new().unwrap();
    let manifest = create_extension_project(&temp);

    let output = Command::new(get_extpack_binary())
        .args([
            "build",
            "--manifest",
            manifest.to_string_lossy().as_ref(),
            "--config-args",
            "-DGPU_MODE=CPU_ONLY -DCAFFE_FLAGS='-O2 -g'",
            "--dry-run",
        ])
        .output()
        .expect("Failed to execute extpack build --config-args");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("-DGPU_MODE=CPU_ONLY"),
        "plain extra arg should be appended. stdout: {stdout}"
    );
    assert!(
        stdout.contains("-DCAFFE_FLAGS=-O2 -g"),
        "quoted extra arg should stay one word. stdout: {stdout}"
    );
}

/// A manifest pointing at a source root without CMakeLists.txt fails
#[test]
fn build_missing_cmake_lists_fails() {
    let temp = TempDir::new().unwrap();
    let manifest = write_manifest(
        &temp,
        r#"
[package]
name = "openpose"
version = "1.6.0"

[[extension]]
name = "openpose"
source_root = "."
"#,
    );

    let output = Command::new(get_extpack_binary())
        .args([
            "build",
            "--manifest",
            manifest.to_string_lossy().as_ref(),
            "--dry-run",
        ])
        .output()
        .expect("Failed to execute extpack build");

    assert!(!output.status.success(), "build should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("CMakeLists.txt"),
        "error should name the missing build file. stderr: {stderr}"
    );
}

/// A manifest with no extensions is not an error
#[test]
fn build_no_extensions_is_a_noop() {
    let temp = TempDir::new().unwrap();
    let manifest = write_manifest(
        &temp,
        r#"
[package]
name = "openpose"
version = "1.6.0"
"#,
    );

    let output = Command::new(get_extpack_binary())
        .args(["build", "--manifest", manifest.to_string_lossy().as_ref()])
        .output()
        .expect("Failed to execute extpack build");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("nothing to build"), "stdout: {stdout}");
}

/// Missing manifest file errors gracefully
#[test]
fn build_missing_manifest_errors() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nonexistent/extpack.toml");

    let output = Command::new(get_extpack_binary())
        .args(["build", "--manifest", missing.to_string_lossy().as_ref()])
        .output()
        .expect("Failed to execute extpack build");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
}

/// Build --help shows all flags
#[test]
fn build_help() {
    let output = Command::new(get_extpack_binary())
        .args(["build", "--help"])
        .output()
        .expect("Failed to execute extpack build --help");

    assert!(output.status.success(), "build --help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);

    for flag in [
        "--manifest",
        "--profile",
        "--config-args",
        "--build-args",
        "--build-dir",
        "--out-dir",
        "--dry-run",
    ] {
        assert!(stdout.contains(flag), "help should document {flag}");
    }
}
