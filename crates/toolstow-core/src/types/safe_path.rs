//! Validated safe member path.

use crate::InstallError;
use crate::Result;
use crate::security::PathResolver;
use crate::security::path::is_within;
use std::path::Path;
use std::path::PathBuf;

use super::DestDir;

/// A member path that has passed both name and containment checks.
///
/// `SafePath` stores the member name normalized to plain relative
/// components. It can only be constructed through [`SafePath::validate`].
///
/// # Examples
///
/// ```no_run
/// use toolstow_core::security::PathResolver;
/// use toolstow_core::types::DestDir;
/// use toolstow_core::types::SafePath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("/tmp/tools/foo/1.0.0")?;
/// let resolver = PathResolver::new();
///
/// let safe = SafePath::validate("bin/foo", &dest, &resolver)?;
/// assert!(SafePath::validate("../etc/passwd", &dest, &resolver).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Rejects names that are absolute or contain a `..` segment.
    ///
    /// Both `/` and `\` are treated as separators so that archives written
    /// on Windows cannot smuggle a traversal past a Unix reader.
    ///
    /// # Errors
    ///
    /// Returns `InstallError::UnsafePath` naming the member.
    pub fn check_name(name: &str) -> Result<()> {
        let unsafe_name = name.starts_with('/')
            || name.starts_with('\\')
            || name.contains('\0')
            || name.split(['/', '\\']).any(|segment| segment == "..");

        if unsafe_name {
            return Err(InstallError::UnsafePath {
                member: name.to_string(),
            });
        }
        Ok(())
    }

    /// Validates a member name and constructs a `SafePath`.
    ///
    /// # Validation Steps
    ///
    /// 1. Name check (see [`SafePath::check_name`])
    /// 2. Resolve `dest/name`, following existing and pending symlinks
    /// 3. Verify the result equals `dest` or lies beneath it
    ///
    /// # Errors
    ///
    /// - `InstallError::UnsafePath` for absolute names or `..` segments
    /// - `InstallError::PathTraversal` when the resolved path escapes `dest`
    /// - `InstallError::Io` when resolution fails
    pub fn validate(name: &str, dest: &DestDir, resolver: &PathResolver) -> Result<Self> {
        Self::check_name(name)?;
        let relative = normalize(name);

        let resolved = resolver.resolve(&dest.join_path(&relative))?;
        if !is_within(&resolved, dest.as_path()) {
            return Err(InstallError::PathTraversal {
                member: name.to_string(),
            });
        }

        Ok(Self(relative))
    }

    /// Builds a `SafePath` from a name that already passed
    /// [`SafePath::check_name`], skipping the containment check.
    pub(crate) fn from_checked_name(name: &str) -> Self {
        Self(normalize(name))
    }

    /// Returns the normalized relative path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns `true` when the member refers to the install directory itself.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }
}

/// Splits a member name on either separator and drops empty and `.` segments.
fn normalize(name: &str) -> PathBuf {
    name.split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}
