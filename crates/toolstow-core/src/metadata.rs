//! Tool metadata supplied by the version resolver.

use std::path::PathBuf;

use crate::InstallError;
use crate::Result;

/// Describes the tool being installed.
///
/// Produced by the caller; the installer never mutates it.
///
/// # Examples
///
/// ```
/// use toolstow_core::ToolMetadata;
///
/// let meta = ToolMetadata::new("terraform", "1.9.0").with_executable_name("tf");
/// assert_eq!(meta.executable_name.as_deref(), Some("tf"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMetadata {
    /// Tool name, used as a directory component.
    pub name: String,
    /// Tool version, used as a directory component.
    pub version: String,
    /// Explicit install directory; replaces the default layout when set.
    pub install_path: Option<PathBuf>,
    /// Name the installed executable should have.
    pub executable_name: Option<String>,
}

impl ToolMetadata {
    /// Creates metadata with no overrides.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            install_path: None,
            executable_name: None,
        }
    }

    /// Sets the install directory override.
    #[must_use]
    pub fn with_install_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.install_path = Some(path.into());
        self
    }

    /// Sets the executable name override.
    #[must_use]
    pub fn with_executable_name(mut self, name: impl Into<String>) -> Self {
        self.executable_name = Some(name.into());
        self
    }

    /// Returns `true` when both name and version are non-empty.
    #[must_use]
    pub fn is_versioned(&self) -> bool {
        !self.name.is_empty() && !self.version.is_empty()
    }

    /// Returns the executable name override, if any.
    ///
    /// # Errors
    ///
    /// Returns `InstallError::UnsafePath` when the override is not a single
    /// plain path component, e.g. `../x`, `/usr/bin/x` or `bin/x`.
    pub fn checked_executable_name(&self) -> Result<Option<&str>> {
        match self.executable_name.as_deref() {
            Some(name) if !is_plain_name(name) => Err(InstallError::UnsafePath {
                member: name.to_string(),
            }),
            name => Ok(name),
        }
    }
}

/// A single path component with no separators.
pub(crate) fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
