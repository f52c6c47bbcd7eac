//! Package command
//!
//! The whole pipeline in order: toolchain check, extension build, artifact
//! staging. Any failure aborts the rest.

use super::build::{self, BuildOptions};
use super::stage::{self, StageOptions};
use anyhow::Result;
use extpack::Manifest;

/// Build every extension, then stage the data manifest next to it.
pub(crate) fn run(build_options: &BuildOptions, stage_options: &StageOptions) -> Result<()> {
    let manifest = Manifest::load(&build_options.manifest)?;
    println!(
        "packaging {} {}",
        manifest.package.name, manifest.package.version
    );

    build::run(build_options)?;

    if build_options.dry_run {
        println!("dry run: skipping artifact staging");
        return Ok(());
    }

    stage::run(stage_options)
}
