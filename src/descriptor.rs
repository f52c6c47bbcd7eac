//! Extension descriptor
//!
//! Names a native extension module and the CMake project root that builds
//! it. The descriptor is validated on construction and immutable afterwards.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("extension source root does not exist: {}", .0.display())]
    MissingSourceRoot(PathBuf),

    #[error("no CMakeLists.txt found in {}", .0.display())]
    MissingCmakeLists(PathBuf),
}

/// One native extension module to build
#[derive(Debug, Clone)]
pub struct ExtensionDescriptor {
    name: String,
    source_root: PathBuf,
}

impl ExtensionDescriptor {
    /// Create a descriptor, checking that `source_root` exists and is a
    /// CMake project. The root is normalized to an absolute path so the
    /// configure invocation is independent of the scratch working directory.
    pub fn new(
        name: impl Into<String>,
        source_root: impl AsRef<Path>,
    ) -> Result<Self, DescriptorError> {
        let source_root = source_root.as_ref();

        if !source_root.is_dir() {
            return Err(DescriptorError::MissingSourceRoot(
                source_root.to_path_buf(),
            ));
        }
        if !source_root.join("CMakeLists.txt").is_file() {
            return Err(DescriptorError::MissingCmakeLists(
                source_root.to_path_buf(),
            ));
        }

        let source_root = source_root
            .canonicalize()
            .map_err(|_| DescriptorError::MissingSourceRoot(source_root.to_path_buf()))?;

        Ok(Self {
            name: name.into(),
            source_root,
        })
    }

    /// Name of the produced module (also the package subdirectory the
    /// compiled library is routed into)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path to the CMake project root
    #[must_use]
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn valid_cmake_project() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("CMakeLists.txt"),
            "cmake_minimum_required(VERSION 3.10)\n",
        )
        .unwrap();

        let descriptor = ExtensionDescriptor::new("openpose", dir.path()).unwrap();

        assert_eq!(descriptor.name(), "openpose");
        assert!(descriptor.source_root().is_absolute());
        assert!(descriptor.source_root().join("CMakeLists.txt").is_file());
    }

    #[test]
    fn missing_source_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = ExtensionDescriptor::new("openpose", &missing).unwrap_err();

        assert!(matches!(err, DescriptorError::MissingSourceRoot(_)));
    }

    #[test]
    fn missing_cmake_lists() {
        let dir = TempDir::new().unwrap();

        let err = ExtensionDescriptor::new("openpose", dir.path()).unwrap_err();

        assert!(matches!(err, DescriptorError::MissingCmakeLists(_)));
        assert!(err.to_string().contains("CMakeLists.txt"));
    }
}
