//! Installation root configuration.

use std::path::Path;
use std::path::PathBuf;

use directories_next::BaseDirs;

/// Name of the per-user directory that holds every installed tool.
pub const ROOT_DIR_NAME: &str = ".provide-foundation";

/// Name of the directory under the root that holds per-tool version trees.
pub const TOOLS_DIR_NAME: &str = "tools";

/// Installation configuration.
///
/// The root is resolved once, when the configuration is built, so that
/// install-directory resolution never touches the environment.
///
/// # Examples
///
/// ```
/// use toolstow_core::InstallConfig;
///
/// let config = InstallConfig::with_root("/opt/provide");
/// assert_eq!(config.tools_dir(), std::path::Path::new("/opt/provide/tools"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    /// Per-user root directory; tools live under `<root>/tools`.
    pub root: PathBuf,
}

impl Default for InstallConfig {
    /// Uses `<home>/.provide-foundation`, or a relative `.provide-foundation`
    /// when the home directory cannot be determined.
    fn default() -> Self {
        let root = BaseDirs::new().map_or_else(
            || PathBuf::from(ROOT_DIR_NAME),
            |dirs| dirs.home_dir().join(ROOT_DIR_NAME),
        );
        Self { root }
    }
}

impl InstallConfig {
    /// Creates a configuration rooted at an explicit directory.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns `<root>/tools`.
    #[must_use]
    pub fn tools_dir(&self) -> PathBuf {
        self.root.join(TOOLS_DIR_NAME)
    }
}
