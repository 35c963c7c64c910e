//! Install directory resolution.

use std::path::PathBuf;

use crate::InstallConfig;
use crate::ToolMetadata;

/// Resolves the directory a tool is installed into.
///
/// Returns the metadata's `install_path` verbatim when set, otherwise
/// `<root>/tools/<name>/<version>`. Performs no I/O.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use toolstow_core::{InstallConfig, ToolMetadata, resolve_install_dir};
///
/// let config = InstallConfig::with_root("/home/dev/.provide-foundation");
/// let meta = ToolMetadata::new("foo", "1.0.0");
/// assert_eq!(
///     resolve_install_dir(&meta, &config),
///     PathBuf::from("/home/dev/.provide-foundation/tools/foo/1.0.0")
/// );
///
/// let meta = meta.with_install_path("/custom/dir");
/// assert_eq!(resolve_install_dir(&meta, &config), PathBuf::from("/custom/dir"));
/// ```
#[must_use]
pub fn resolve_install_dir(metadata: &ToolMetadata, config: &InstallConfig) -> PathBuf {
    if let Some(path) = &metadata.install_path {
        return path.clone();
    }
    config
        .tools_dir()
        .join(&metadata.name)
        .join(&metadata.version)
}
