//! Stage command
//!
//! Install the manifest's data entries (model trees, licenses, empty
//! directories) into the package layout produced by the build step.

use super::build::{project_dir, resolve};
use anyhow::{Context, Result};
use extpack::manifest::DEFAULT_OUT_DIR;
use extpack::{DataEntry, Installer, Manifest};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) struct StageOptions {
    pub manifest: PathBuf,
    pub dest: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub record: Option<PathBuf>,
}

/// Run the artifact installer over the manifest's data entries.
pub(crate) fn run(options: &StageOptions) -> Result<()> {
    let manifest = Manifest::load(&options.manifest)
        .with_context(|| format!("failed to load {}", options.manifest.display()))?;
    let project_dir = project_dir(&options.manifest);

    let dest = resolve(
        &project_dir,
        options
            .dest
            .as_deref()
            .or(manifest.build.out_dir.as_deref())
            .unwrap_or(Path::new(DEFAULT_OUT_DIR)),
    );

    let entries = resolve_entries(&project_dir, &manifest.data);

    let mut installer = Installer::new(&dest, options.root.clone());
    installer
        .install(&entries)
        .with_context(|| format!("failed to stage artifacts into {}", dest.display()))?;

    for path in installer.produced() {
        println!("staged {}", path.display());
    }

    if let Some(record) = &options.record {
        write_record(record, installer.produced())
            .with_context(|| format!("failed to write record {}", record.display()))?;
        println!("wrote install record to {}", record.display());
    }

    println!(
        "staged {} artifact(s) into {}",
        installer.produced().len(),
        dest.display()
    );
    Ok(())
}

/// Manifest sources are written relative to the manifest's directory; the
/// installer expects paths it can open directly.
fn resolve_entries(project_dir: &Path, entries: &[DataEntry]) -> Vec<DataEntry> {
    entries
        .iter()
        .map(|entry| match entry {
            DataEntry::File { path } => DataEntry::File {
                path: resolve(project_dir, path),
            },
            DataEntry::Tree { target, sources } => DataEntry::Tree {
                // Targets are install-tree-relative, not project-relative
                target: target.clone(),
                sources: sources
                    .iter()
                    .map(|source| resolve(project_dir, source))
                    .collect(),
            },
        })
        .collect()
}

/// One produced path per line, in install order.
fn write_record(record: &Path, produced: &[PathBuf]) -> Result<()> {
    let mut content = String::new();
    for path in produced {
        writeln!(&mut content, "{}", path.display())?;
    }
    fs::write(record, content)?;
    Ok(())
}
