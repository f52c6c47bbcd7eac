//! Extpack CLI internal library code
//!
//! Builds CMake-based native extension modules and stages them, together
//! with their data manifests (model files, licenses, empty plugin
//! directories), into an installable package layout.

pub mod cmake;
pub mod debug;
pub mod descriptor;
pub mod installer;
pub mod manifest;
pub mod platform;
pub mod shellwords;

// Re-export common types for convenience
pub use cmake::{BuildError, CmakeBuilder, Profile, configure_args};
pub use debug::{init_debug, is_debug_enabled};
pub use descriptor::{DescriptorError, ExtensionDescriptor};
pub use installer::{InstallError, Installer, copy_entry};
pub use manifest::{
    BuildSettings, DEFAULT_BUILD_DIR, DEFAULT_OUT_DIR, DataEntry, ExtensionEntry, MANIFEST_FILE,
    Manifest, ManifestError, PackageMeta,
};
pub use platform::{Compiler, OsFamily, PlatformInfo, PointerWidth};
pub use shellwords::SplitError;
