//! Check command
//!
//! Verify the external CMake toolchain is available and runnable.

use anyhow::Result;
use extpack::CmakeBuilder;

/// Run the toolchain availability check.
pub(crate) fn run() -> Result<()> {
    let builder = CmakeBuilder::new(false)?;
    builder.verify_tool()?;

    println!("cmake toolchain OK: {}", builder.tool_path().display());
    Ok(())
}
