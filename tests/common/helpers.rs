//! Shared test helpers and utilities

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get the path to the extpack binary (target/debug/extpack)
///
/// This is shared across all integration tests to avoid duplication.
pub(crate) fn get_extpack_binary() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    std::path::Path::new(manifest_dir)
        .join("target/debug/extpack")
        .to_string_lossy()
        .to_string()
}

/// Create a minimal CMake extension project with an `extpack.toml` manifest.
///
/// Layout:
/// - `CMakeLists.txt` (so the descriptor validates)
/// - `models/pose/pose_deploy.prototxt` (a data tree to stage)
/// - `extpack.toml` with one extension and one data entry
///
/// # Returns
/// The path to the created manifest
#[allow(dead_code)]
pub(crate) fn create_extension_project(temp_dir: &TempDir) -> PathBuf {
    fs::write(
        temp_dir.path().join("CMakeLists.txt"),
        "cmake_minimum_required(VERSION 3.10)\nproject(openpose)\n",
    )
    .expect("Failed to write CMakeLists.txt");

    let models = temp_dir.path().join("models/pose");
    fs::create_dir_all(&models).expect("Failed to create models tree");
    fs::write(models.join("pose_deploy.prototxt"), "layers {}\n")
        .expect("Failed to write model file");

    write_manifest(
        temp_dir,
        r#"
[package]
name = "openpose"
version = "1.6.0"
description = "Real-time multi-person keypoint detection library"

[[extension]]
name = "openpose"
source_root = "."

[[data]]
target = "openpose"
sources = ["models"]
"#,
    )
}

/// Write an `extpack.toml` with the given content into the temp dir.
///
/// # Returns
/// The path to the created manifest
#[allow(dead_code)]
pub(crate) fn write_manifest(temp_dir: &TempDir, content: &str) -> PathBuf {
    let manifest_path = temp_dir.path().join("extpack.toml");
    fs::write(&manifest_path, content).expect("Failed to write extpack.toml");
    manifest_path
}
