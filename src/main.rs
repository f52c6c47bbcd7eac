//! Extpack command-line interface
//!
//! Builds CMake-based native extension modules and stages them into
//! installable package layouts.

use clap::{Parser, Subcommand};
use extpack::Profile;
use std::path::PathBuf;
use std::process;

mod commands;

use commands::build::BuildOptions;
use commands::stage::StageOptions;

/// Display an error with its full cause chain
fn display_error(err: &anyhow::Error) {
    eprintln!("error: {err}");

    let mut source = err.source();
    while let Some(err) = source {
        eprintln!("caused by: {err}");
        source = err.source();
    }
}

#[derive(Parser)]
#[command(name = "extpack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Build and package CMake-based native extension modules",
    long_about = None
)]
pub(crate) struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the CMake toolchain is available
    Check,

    /// Configure and build the native extension modules
    Build {
        /// Path to the project manifest
        #[arg(long, default_value = extpack::MANIFEST_FILE)]
        manifest: PathBuf,

        /// Requested build profile (debug is always promoted to release)
        #[arg(long, value_enum, default_value_t = Profile::Release)]
        profile: Profile,

        /// Extra CMake configure arguments, as one shell-style string
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        config_args: String,

        /// Extra CMake build arguments, as one shell-style string
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        build_args: String,

        /// Scratch directory for CMake intermediates
        #[arg(long)]
        build_dir: Option<PathBuf>,

        /// Directory receiving the assembled package layout
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Log the commands without executing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Stage the data manifest into the install tree
    Stage {
        /// Path to the project manifest
        #[arg(long, default_value = extpack::MANIFEST_FILE)]
        manifest: PathBuf,

        /// Install root for staged artifacts
        #[arg(long)]
        dest: Option<PathBuf>,

        /// Re-root absolute manifest targets under this directory
        /// (sandboxed/staged installs)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Write the list of produced paths to this file
        #[arg(long)]
        record: Option<PathBuf>,
    },

    /// Check, build, and stage in one pass
    Package {
        /// Path to the project manifest
        #[arg(long, default_value = extpack::MANIFEST_FILE)]
        manifest: PathBuf,

        /// Requested build profile (debug is always promoted to release)
        #[arg(long, value_enum, default_value_t = Profile::Release)]
        profile: Profile,

        /// Extra CMake configure arguments, as one shell-style string
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        config_args: String,

        /// Extra CMake build arguments, as one shell-style string
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        build_args: String,

        /// Scratch directory for CMake intermediates
        #[arg(long)]
        build_dir: Option<PathBuf>,

        /// Directory receiving the assembled package layout
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Re-root absolute manifest targets under this directory
        #[arg(long)]
        root: Option<PathBuf>,

        /// Write the list of produced paths to this file
        #[arg(long)]
        record: Option<PathBuf>,

        /// Log the commands without executing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    extpack::init_debug(cli.verbose);

    let result = match cli.command {
        Commands::Check => commands::check::run(),
        Commands::Build {
            manifest,
            profile,
            config_args,
            build_args,
            build_dir,
            out_dir,
            dry_run,
        } => commands::build::run(&BuildOptions {
            manifest,
            profile,
            config_args,
            build_args,
            build_dir,
            out_dir,
            dry_run,
        }),
        Commands::Stage {
            manifest,
            dest,
            root,
            record,
        } => commands::stage::run(&StageOptions {
            manifest,
            dest,
            root,
            record,
        }),
        Commands::Package {
            manifest,
            profile,
            config_args,
            build_args,
            build_dir,
            out_dir,
            root,
            record,
            dry_run,
        } => commands::package::run(
            &BuildOptions {
                manifest: manifest.clone(),
                profile,
                config_args,
                build_args,
                build_dir,
                out_dir: out_dir.clone(),
                dry_run,
            },
            &StageOptions {
                manifest,
                dest: out_dir,
                root,
                record,
            },
        ),
        Commands::Completion { shell } => commands::completion::run(shell),
    };

    if let Err(err) = result {
        display_error(&err);
        process::exit(1);
    }
}
