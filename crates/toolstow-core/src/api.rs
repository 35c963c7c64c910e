//! High-level public API for tool installation.

use std::path::Path;

use crate::InstallConfig;
use crate::InstallReport;
use crate::Installer;
use crate::Result;
use crate::ToolMetadata;

/// Installs an artifact under the configured root.
///
/// Shorthand for [`Installer::install`] with a one-off installer.
///
/// # Errors
///
/// Returns an error if:
/// - The artifact does not exist
/// - The artifact format is unsupported
/// - Any archive member fails a security check
/// - I/O operations fail
///
/// # Examples
///
/// ```no_run
/// use toolstow_core::{InstallConfig, ToolMetadata, install_tool};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let meta = ToolMetadata::new("foo", "1.0.0");
/// let report = install_tool("foo-1.0.0.tar.gz", &meta, &InstallConfig::default())?;
/// println!("Installed {} members", report.members_extracted);
/// # Ok(())
/// # }
/// ```
pub fn install_tool<P: AsRef<Path>>(
    artifact: P,
    metadata: &ToolMetadata,
    config: &InstallConfig,
) -> Result<InstallReport> {
    Installer::new(config.clone()).install(artifact.as_ref(), metadata)
}
