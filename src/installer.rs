//! Artifact installation
//!
//! Stages the package's data manifest into the install tree. Manifest
//! entries may name whole directories (e.g. a `models/` tree of network
//! weights), not just single files, which is the reason this module exists:
//! plain file copies are what packaging layers usually offer.
//!
//! Every produced destination path is recorded in order, so the caller can
//! write an install record for later uninstall support.

use crate::manifest::DataEntry;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("can't copy {}: doesn't exist or is not a regular file or a directory", .path.display())]
    InvalidSource { path: PathBuf },

    #[error("failed to copy {}: {source}", .path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Installs a data manifest into an install tree
#[derive(Debug)]
pub struct Installer {
    install_root: PathBuf,
    /// Active staging root for sandboxed installs. Absolute manifest targets
    /// are re-rooted under it.
    staging_root: Option<PathBuf>,
    produced: Vec<PathBuf>,
}

impl Installer {
    #[must_use]
    pub fn new(install_root: impl Into<PathBuf>, staging_root: Option<PathBuf>) -> Self {
        Self {
            install_root: install_root.into(),
            staging_root,
            produced: Vec::new(),
        }
    }

    /// Destination paths produced so far, in install order. Still valid
    /// after a failed `install`, reflecting what was completed before the
    /// failing entry.
    #[must_use]
    pub fn produced(&self) -> &[PathBuf] {
        &self.produced
    }

    /// Create the install root and its parents. Idempotent.
    pub fn ensure_install_root(&self) -> Result<(), InstallError> {
        fs::create_dir_all(&self.install_root).map_err(|source| InstallError::CreateDir {
            path: self.install_root.clone(),
            source,
        })
    }

    /// Install every manifest entry, aborting on the first failure.
    pub fn install(&mut self, entries: &[DataEntry]) -> Result<(), InstallError> {
        self.ensure_install_root()?;

        for entry in entries {
            match entry {
                DataEntry::File { path } => {
                    // Permissive on purpose: a bare file lands at the top
                    // level rather than rejecting the manifest
                    eprintln!(
                        "warning: no target directory given for '{}' -- installing right in '{}'",
                        path.display(),
                        self.install_root.display()
                    );
                    let dest = copy_entry(path, &self.install_root)?;
                    self.produced.push(dest);
                }
                DataEntry::Tree { target, sources } => {
                    let dir = self.resolve_target(target);
                    fs::create_dir_all(&dir).map_err(|source| InstallError::CreateDir {
                        path: dir.clone(),
                        source,
                    })?;

                    if sources.is_empty() {
                        // An empty source list means "create this directory"
                        self.produced.push(dir);
                    } else {
                        for source in sources {
                            let dest = copy_entry(source, &dir)?;
                            self.produced.push(dest);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Resolve a manifest target directory. Relative targets nest under the
    /// install root; absolute targets are re-rooted under the staging root
    /// when one is active.
    fn resolve_target(&self, target: &Path) -> PathBuf {
        if target.is_relative() {
            return self.install_root.join(target);
        }

        match &self.staging_root {
            Some(root) => reroot(root, target),
            None => target.to_path_buf(),
        }
    }
}

/// Rewrite an absolute path so it lives under `root`.
fn reroot(root: &Path, absolute: &Path) -> PathBuf {
    let mut out = root.to_path_buf();
    for component in absolute.components() {
        match component {
            Component::RootDir | Component::Prefix(_) => {}
            other => out.push(other),
        }
    }
    out
}

/// Copy one manifest source into `target_dir`, returning the destination.
///
/// A directory is copied recursively under `target_dir/<basename>`; a
/// regular file is copied directly into `target_dir`. Anything else
/// (missing path, device node, broken link) is an `InvalidSource` error.
pub fn copy_entry(source: &Path, target_dir: &Path) -> Result<PathBuf, InstallError> {
    let Some(name) = source.file_name() else {
        return Err(InstallError::InvalidSource {
            path: source.to_path_buf(),
        });
    };
    let dest = target_dir.join(name);

    if source.is_dir() {
        copy_tree(source, &dest)?;
        Ok(dest)
    } else if source.is_file() {
        crate::debug!("copying {} -> {}", source.display(), dest.display());
        fs::copy(source, &dest).map_err(|io| InstallError::Copy {
            path: source.to_path_buf(),
            source: io,
        })?;
        Ok(dest)
    } else {
        Err(InstallError::InvalidSource {
            path: source.to_path_buf(),
        })
    }
}

/// Recursively copy a directory tree. Symlinks and special files are
/// skipped.
fn copy_tree(src: &Path, dst: &Path) -> Result<(), InstallError> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let dest = dst.join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&dest).map_err(|source| InstallError::CreateDir {
                path: dest.clone(),
                source,
            })?;
        } else if file_type.is_file() {
            crate::debug!("copying {} -> {}", entry.path().display(), dest.display());
            fs::copy(entry.path(), &dest).map_err(|io| InstallError::Copy {
                path: entry.path().to_path_buf(),
                source: io,
            })?;
        }
    }

    Ok(())
}
