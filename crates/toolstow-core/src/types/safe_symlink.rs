//! Validated link member type.

use crate::InstallError;
use crate::Result;
use crate::security::PathResolver;
use crate::security::path::is_within;
use std::path::Path;
use std::path::PathBuf;

use super::DestDir;
use super::SafePath;

/// How a link target is interpreted on extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Symbolic link; relative targets resolve from the link's directory.
    Symbolic,
    /// Hard link; tar resolves relative targets from the archive root.
    Hard,
}

/// A link member whose target stays inside the install directory.
///
/// Link-name safety is carried by the contained [`SafePath`]; link-target
/// safety is established by [`SafeLink::validate`]. Both are independent and
/// both must hold.
///
/// # Examples
///
/// ```no_run
/// use toolstow_core::security::PathResolver;
/// use toolstow_core::types::{DestDir, LinkKind, SafeLink, SafePath};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("/tmp/tools/foo/1.0.0")?;
/// let resolver = PathResolver::new();
///
/// let link = SafePath::validate("bin/foo", &dest, &resolver)?;
/// let safe = SafeLink::validate(&link, "bin/foo", "../libexec/foo", LinkKind::Symbolic, &dest, &resolver)?;
///
/// let escape = SafeLink::validate(&link, "bin/foo", "/etc/passwd", LinkKind::Symbolic, &dest, &resolver);
/// assert!(escape.is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeLink {
    link_path: SafePath,
    target: PathBuf,
    kind: LinkKind,
}

impl SafeLink {
    /// Validates that a link target resolves inside `dest`.
    ///
    /// Relative targets are joined against the link's parent directory inside
    /// `dest`; absolute targets are resolved as-is. Hard links are also
    /// resolved from the archive root, because that is how tar writes them,
    /// and must stay inside under both readings.
    ///
    /// # Errors
    ///
    /// - `InstallError::UnsafeSymlink` naming the member and target when the
    ///   resolved target escapes `dest`
    /// - `InstallError::Io` when resolution fails
    pub fn validate(
        link: &SafePath,
        member: &str,
        target: &str,
        kind: LinkKind,
        dest: &DestDir,
        resolver: &PathResolver,
    ) -> Result<Self> {
        let target_path = PathBuf::from(target);
        let link_parent = link.as_path().parent().unwrap_or_else(|| Path::new(""));

        let mut candidates = vec![dest.join_path(link_parent).join(&target_path)];
        if kind == LinkKind::Hard {
            candidates.push(dest.join_path(&target_path));
        }

        for candidate in candidates {
            let resolved = resolver.resolve(&candidate)?;
            if !is_within(&resolved, dest.as_path()) {
                return Err(InstallError::UnsafeSymlink {
                    member: member.to_string(),
                    target: target.to_string(),
                });
            }
        }

        Ok(Self {
            link_path: link.clone(),
            target: target_path,
            kind,
        })
    }

    /// Returns the validated link path.
    #[inline]
    #[must_use]
    pub fn link_path(&self) -> &SafePath {
        &self.link_path
    }

    /// Returns the target exactly as stored in the archive.
    #[inline]
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Returns the link kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> LinkKind {
        self.kind
    }
}
