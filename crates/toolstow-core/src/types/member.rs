//! Archive member description.

/// Kind of an archive member.
///
/// Link targets are stored exactly as they appear in the archive and have
/// NOT been validated.
///
/// # Examples
///
/// ```
/// use toolstow_core::types::MemberKind;
///
/// let link = MemberKind::Symlink {
///     target: "../lib/libfoo.so".into(),
/// };
/// assert_eq!(link.link_target(), Some("../lib/libfoo.so"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Regular file.
    File,

    /// Directory.
    Directory,

    /// Symbolic link.
    Symlink {
        /// The link target (not yet validated).
        target: String,
    },

    /// Hard link.
    Hardlink {
        /// The link target (not yet validated).
        target: String,
    },
}

impl MemberKind {
    /// Returns the link target for symlinks and hardlinks.
    #[must_use]
    pub fn link_target(&self) -> Option<&str> {
        match self {
            Self::Symlink { target } | Self::Hardlink { target } => Some(target),
            Self::File | Self::Directory => None,
        }
    }

    /// Returns `true` for symlinks and hardlinks.
    #[must_use]
    pub const fn is_link(&self) -> bool {
        matches!(self, Self::Symlink { .. } | Self::Hardlink { .. })
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// One entry listed from an archive, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveMember {
    /// Member name exactly as stored in the archive.
    pub name: String,
    /// Member kind, including the raw link target for links.
    pub kind: MemberKind,
}

impl ArchiveMember {
    /// Creates a regular file member.
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::File,
        }
    }

    /// Creates a directory member.
    #[must_use]
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Directory,
        }
    }

    /// Creates a symlink member.
    #[must_use]
    pub fn symlink(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Symlink {
                target: target.into(),
            },
        }
    }

    /// Creates a hardlink member.
    #[must_use]
    pub fn hardlink(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Hardlink {
                target: target.into(),
            },
        }
    }
}
