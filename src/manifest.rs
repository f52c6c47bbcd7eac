//! Project manifest (`extpack.toml`)
//!
//! Declares the package metadata, the native extension modules to build, and
//! the data files/directories to stage alongside them.
//!
//! ```toml
//! [package]
//! name = "openpose"
//! version = "1.6.0"
//! description = "Real-time multi-person keypoint detection library"
//!
//! [[extension]]
//! name = "openpose"
//! source_root = "."
//!
//! [[data]]
//! target = "openpose"
//! sources = ["models"]
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default manifest file name, looked up in the current directory
pub const MANIFEST_FILE: &str = "extpack.toml";

/// Default scratch directory for CMake intermediates
pub const DEFAULT_BUILD_DIR: &str = "build/temp";

/// Default root of the assembled package layout
pub const DEFAULT_OUT_DIR: &str = "build/lib";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
}

/// Parsed project manifest
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub package: PackageMeta,

    /// Native extension modules to build
    #[serde(default, rename = "extension")]
    pub extensions: Vec<ExtensionEntry>,

    /// Data files and directories to stage alongside the modules
    #[serde(default, rename = "data")]
    pub data: Vec<DataEntry>,

    #[serde(default)]
    pub build: BuildSettings,
}

/// Package metadata (name, version, description)
#[derive(Debug, Clone, Deserialize)]
pub struct PackageMeta {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
}

/// One `[[extension]]` block
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionEntry {
    /// Name of the produced module
    pub name: String,

    /// CMake project root, relative to the manifest's directory
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,
}

fn default_source_root() -> PathBuf {
    PathBuf::from(".")
}

/// One `[[data]]` block: either a bare file destined for the install root,
/// or a target directory plus the files/directories to copy into it. An
/// explicit empty `sources` list means "create this directory".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DataEntry {
    Tree {
        target: PathBuf,
        #[serde(default)]
        sources: Vec<PathBuf>,
    },
    File {
        path: PathBuf,
    },
}

/// Optional `[build]` overrides
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildSettings {
    /// Scratch directory for CMake intermediates
    #[serde(default)]
    pub build_dir: Option<PathBuf>,

    /// Directory receiving the assembled package layout
    #[serde(default)]
    pub out_dir: Option<PathBuf>,

    /// Python interpreter override for the configure step
    #[serde(default)]
    pub python: Option<PathBuf>,
}

impl Manifest {
    /// Read and parse a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }
}
