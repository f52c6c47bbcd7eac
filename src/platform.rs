//! Host platform description
//!
//! The configure step branches on the host OS family, pointer width, and
//! native compiler. Rather than consulting ambient process state at each
//! decision point, the whole picture is captured once at startup as a
//! `PlatformInfo` value and threaded explicitly, so tests can inject
//! arbitrary platforms.

use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Host operating system family
///
/// Only the Windows/non-Windows split matters for configuration: the default
/// Windows toolchains do not export shared-library symbols and route runtime
/// outputs differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Unix,
}

/// Native toolchain flavor, used to decide whether the CMake generator
/// platform must be pinned explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compiler {
    Msvc,
    Gnu,
    Other,
}

/// Pointer width of the host CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerWidth {
    Bits64,
    Bits32,
}

/// Everything the configure step needs to know about the host
#[derive(Debug, Clone)]
pub struct PlatformInfo {
    pub os_family: OsFamily,
    pub compiler: Compiler,
    pub pointer_width: PointerWidth,
    /// Python interpreter the produced module will be loaded by. Pinned into
    /// the configure arguments so CMake cannot pick a different installation
    /// when several are present.
    pub interpreter: Option<PathBuf>,
}

impl PlatformInfo {
    /// Detect the current host. Called once at process start.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            os_family: if cfg!(windows) {
                OsFamily::Windows
            } else {
                OsFamily::Unix
            },
            compiler: detect_compiler(),
            pointer_width: if cfg!(target_pointer_width = "64") {
                PointerWidth::Bits64
            } else {
                PointerWidth::Bits32
            },
            interpreter: detect_interpreter(),
        }
    }
}

fn detect_compiler() -> Compiler {
    if cfg!(target_env = "msvc") {
        Compiler::Msvc
    } else if cfg!(target_env = "gnu") {
        Compiler::Gnu
    } else {
        Compiler::Other
    }
}

/// Find the Python interpreter to hand to CMake.
/// Priority: `PYTHON` env var -> `python3` in `PATH` -> `python` in `PATH`.
fn detect_interpreter() -> Option<PathBuf> {
    if let Ok(python) = env::var("PYTHON") {
        let path = PathBuf::from(python);
        if path.exists() {
            return Some(path);
        }
    }

    for candidate in ["python3", "python"] {
        if let Ok(output) = Command::new("which").arg(candidate).output()
            && output.status.success()
        {
            let path_str = String::from_utf8_lossy(&output.stdout);
            let path = PathBuf::from(path_str.trim());
            if path.exists() {
                return Some(path);
            }
        }
    }

    None
}
