//! Build command
//!
//! Configure and compile every extension declared in the manifest. The
//! compiled module lands under `<out-dir>/<extension name>/`, ready for the
//! stage step to add the data manifest next to it.

use anyhow::{Context, Result};
use extpack::cmake::{self, CmakeBuilder, Profile};
use extpack::manifest::{DEFAULT_BUILD_DIR, DEFAULT_OUT_DIR};
use extpack::{ExtensionDescriptor, Manifest, PlatformInfo};
use std::path::{Path, PathBuf};

pub(crate) struct BuildOptions {
    pub manifest: PathBuf,
    pub profile: Profile,
    pub config_args: String,
    pub build_args: String,
    pub build_dir: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub dry_run: bool,
}

/// Run the configure and build phases for every declared extension.
pub(crate) fn run(options: &BuildOptions) -> Result<()> {
    let manifest = Manifest::load(&options.manifest)
        .with_context(|| format!("failed to load {}", options.manifest.display()))?;
    let project_dir = project_dir(&options.manifest);

    if manifest.extensions.is_empty() {
        println!(
            "no extensions declared in {}; nothing to build",
            options.manifest.display()
        );
        return Ok(());
    }

    let scratch_dir = resolve(
        &project_dir,
        options
            .build_dir
            .as_deref()
            .or(manifest.build.build_dir.as_deref())
            .unwrap_or(Path::new(DEFAULT_BUILD_DIR)),
    );
    let out_root = resolve(
        &project_dir,
        options
            .out_dir
            .as_deref()
            .or(manifest.build.out_dir.as_deref())
            .unwrap_or(Path::new(DEFAULT_OUT_DIR)),
    );

    let mut platform = PlatformInfo::detect();
    if let Some(python) = &manifest.build.python {
        platform.interpreter = Some(python.clone());
    }
    extpack::debug!("platform: {platform:?}");

    let builder = CmakeBuilder::new(options.dry_run)?;
    builder.verify_tool()?;

    for extension in &manifest.extensions {
        let source_root = resolve(&project_dir, &extension.source_root);
        let descriptor = ExtensionDescriptor::new(&extension.name, &source_root)
            .with_context(|| format!("invalid extension '{}'", extension.name))?;

        let args = cmake::configure_args(
            &descriptor,
            &platform,
            &out_root,
            &scratch_dir,
            options.profile,
        );
        builder
            .run(
                &descriptor,
                &args,
                &options.config_args,
                &options.build_args,
                &scratch_dir,
            )
            .with_context(|| format!("failed to build extension '{}'", extension.name))?;

        if !options.dry_run {
            println!(
                "built extension '{}' -> {}",
                extension.name,
                out_root.join(&extension.name).display()
            );
        }
    }

    Ok(())
}

/// Directory containing the manifest; every relative path in it resolves
/// against this.
pub(crate) fn project_dir(manifest_path: &Path) -> PathBuf {
    match manifest_path.parent() {
        Some(parent) if parent != Path::new("") => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub(crate) fn resolve(project_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}
