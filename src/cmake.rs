//! CMake build orchestration
//!
//! Drives the external CMake toolchain to compile a native extension module.
//! Two phases, both blocking, both run from a private scratch directory:
//!
//! ```bash
//! cmake <source_root> -DCMAKE_BUILD_TYPE=Release ...
//! cmake --build . --config Release
//! ```
//!
//! Output locations are redirected through the configure arguments so the
//! finished shared library lands directly inside the module's package
//! directory, while intermediate static libraries stay in the scratch tree.

use crate::descriptor::ExtensionDescriptor;
use crate::platform::{Compiler, OsFamily, PlatformInfo, PointerWidth};
use crate::shellwords;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("CMake executable not found. Install CMake from https://cmake.org")]
    ToolNotFound,

    #[error("command `{}` failed with exit code {code}", shellwords::join(.command))]
    CommandFailed { command: Vec<String>, code: i32 },

    #[error("command `{}` failed to start: {source}", shellwords::join(.command))]
    Spawn {
        command: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid extra arguments: {0}")]
    BadExtraArgs(#[from] shellwords::SplitError),

    #[error("failed to create build directory {}: {source}", .path.display())]
    ScratchDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Requested build profile.
///
/// `Debug` is accepted but always promoted to `Release`: the produced module
/// is a performance-sensitive inference library, so optimization wins over
/// symbol availability. The promotion is logged, never silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Profile {
    Debug,
    #[default]
    Release,
}

/// The build configuration CMake always receives
const BUILD_TYPE: &str = "Release";

/// Compute the configure-phase argument list.
///
/// Deterministic given its inputs; the platform is passed in rather than
/// detected here so tests can exercise every branch.
#[must_use]
pub fn configure_args(
    descriptor: &ExtensionDescriptor,
    platform: &PlatformInfo,
    module_root: &Path,
    scratch_dir: &Path,
    requested: Profile,
) -> Vec<String> {
    if requested == Profile::Debug {
        println!("note: debug profile requested; native modules are always built {BUILD_TYPE}");
    }

    let cfg_suffix = BUILD_TYPE.to_uppercase();
    let module_dir = module_root.join(descriptor.name());

    let mut args = vec![
        format!("-DCMAKE_BUILD_TYPE={BUILD_TYPE}"),
        // The finished shared library goes straight into the module's
        // package directory
        format!(
            "-DCMAKE_LIBRARY_OUTPUT_DIRECTORY_{cfg_suffix}={}",
            module_dir.display()
        ),
        // Intermediate static libraries stay in the scratch tree
        format!(
            "-DCMAKE_ARCHIVE_OUTPUT_DIRECTORY_{cfg_suffix}={}",
            scratch_dir.display()
        ),
        "-DBUILD_PYTHON=ON".to_string(),
    ];

    if let Some(interpreter) = &platform.interpreter {
        // Pin the interpreter so CMake cannot pick a different Python than
        // the one the package targets
        args.push(format!("-DPYTHON_EXECUTABLE={}", interpreter.display()));
    }

    if platform.os_family == OsFamily::Windows {
        // MSVC and MinGW do not export shared-library symbols by default,
        // and route runtime outputs (DLLs) separately from libraries
        args.push("-DCMAKE_WINDOWS_EXPORT_ALL_SYMBOLS=TRUE".to_string());
        args.push(format!(
            "-DCMAKE_RUNTIME_OUTPUT_DIRECTORY_{cfg_suffix}={}",
            module_dir.display()
        ));

        if platform.compiler == Compiler::Msvc {
            let generator_platform = match platform.pointer_width {
                PointerWidth::Bits64 => "x64",
                PointerWidth::Bits32 => "Win32",
            };
            args.push(format!("-DCMAKE_GENERATOR_PLATFORM={generator_platform}"));
        }
    }

    args
}

/// Runs the external CMake tool
///
/// Discovery order for the executable:
/// 1. `CMAKE` environment variable
/// 2. `cmake` in `PATH`
/// 3. `BuildError::ToolNotFound` (tolerated in dry-run mode, where no
///    process is ever spawned)
#[derive(Debug)]
pub struct CmakeBuilder {
    cmake_path: PathBuf,
    dry_run: bool,
}

impl CmakeBuilder {
    /// Create a builder, discovering the CMake executable.
    pub fn new(dry_run: bool) -> Result<Self, BuildError> {
        match find_cmake_executable() {
            Some(cmake_path) => Ok(Self {
                cmake_path,
                dry_run,
            }),
            // Dry-run never executes anything, so a bare program name is
            // enough for the logged commands
            None if dry_run => Ok(Self {
                cmake_path: PathBuf::from("cmake"),
                dry_run,
            }),
            None => Err(BuildError::ToolNotFound),
        }
    }

    /// Create a builder around an explicit tool path (tests, overrides).
    #[must_use]
    pub fn with_tool(cmake_path: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            cmake_path: cmake_path.into(),
            dry_run,
        }
    }

    /// Path to the CMake executable in use
    #[must_use]
    pub fn tool_path(&self) -> &Path {
        &self.cmake_path
    }

    /// Prove the tool is present and runnable by asking for its version.
    ///
    /// A launch failure here is reported as `ToolNotFound`, distinct from a
    /// build that runs and fails.
    pub fn verify_tool(&self) -> Result<(), BuildError> {
        self.spawn(vec!["--version".to_string()], None)
            .map_err(|err| match err {
                BuildError::Spawn { .. } => BuildError::ToolNotFound,
                other => other,
            })
    }

    /// Configure then build, in that order.
    ///
    /// `extra_config_args` and `extra_build_args` are shell-style strings
    /// tokenized with [`shellwords::split`] and appended after the computed
    /// arguments, so callers can override or extend any native build flag.
    ///
    /// Either phase failing aborts with the full argument vector and exit
    /// code attached. No retries.
    pub fn run(
        &self,
        descriptor: &ExtensionDescriptor,
        configure_args: &[String],
        extra_config_args: &str,
        extra_build_args: &str,
        scratch_dir: &Path,
    ) -> Result<(), BuildError> {
        let extra_config = shellwords::split(extra_config_args)?;
        let extra_build = shellwords::split(extra_build_args)?;

        if !self.dry_run {
            std::fs::create_dir_all(scratch_dir).map_err(|source| BuildError::ScratchDir {
                path: scratch_dir.to_path_buf(),
                source,
            })?;
        }

        // Configure
        let mut args = vec![descriptor.source_root().display().to_string()];
        args.extend(configure_args.iter().cloned());
        args.extend(extra_config);
        self.spawn(args, Some(scratch_dir))?;

        // Build
        let mut args = vec![
            "--build".to_string(),
            ".".to_string(),
            "--config".to_string(),
            BUILD_TYPE.to_string(),
        ];
        args.extend(extra_build);
        self.spawn(args, Some(scratch_dir))
    }

    /// Run one external command, logging the argv first. Dry-run stops
    /// right after the log line.
    fn spawn(&self, args: Vec<String>, cwd: Option<&Path>) -> Result<(), BuildError> {
        let mut command = vec![self.cmake_path.display().to_string()];
        command.extend(args);

        println!("{}", shellwords::join(&command));
        if self.dry_run {
            return Ok(());
        }

        let mut cmd = Command::new(&self.cmake_path);
        cmd.args(command.iter().skip(1));
        if let Some(dir) = cwd {
            crate::debug!("running in {}", dir.display());
            cmd.current_dir(dir);
        }

        let status = cmd.status().map_err(|source| BuildError::Spawn {
            command: command.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(BuildError::CommandFailed {
                command,
                // None means the process died to a signal
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

fn find_cmake_executable() -> Option<PathBuf> {
    if let Ok(cmake_env) = std::env::var("CMAKE") {
        let path = PathBuf::from(cmake_env);
        if path.exists() {
            return Some(path);
        }
    }

    if let Ok(output) = Command::new("which").arg("cmake").output()
        && output.status.success()
    {
        let path_str = String::from_utf8_lossy(&output.stdout);
        let path = PathBuf::from(path_str.trim());
        if path.exists() {
            return Some(path);
        }
    }

    None
}
