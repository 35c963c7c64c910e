//! Error types for tool installation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `InstallError`.
pub type Result<T> = std::result::Result<T, InstallError>;

/// Discriminant of an [`InstallError`], for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The artifact does not exist.
    NotFound,
    /// The artifact could not be classified.
    UnsupportedFormat,
    /// A member name is absolute or contains a `..` segment.
    UnsafePath,
    /// A member resolves outside the install directory.
    PathTraversal,
    /// A link member points outside the install directory.
    UnsafeSymlink,
    /// Filesystem operation failed.
    Io,
    /// The container could not be parsed.
    InvalidArchive,
}

/// Errors that can occur while installing an artifact.
#[derive(Error, Debug)]
pub enum InstallError {
    /// The artifact path does not exist.
    #[error("artifact not found: {path}")]
    NotFound {
        /// The missing artifact.
        path: PathBuf,
    },

    /// The artifact is neither a supported archive nor a recognised executable.
    #[error("unsupported artifact format: {path}")]
    UnsupportedFormat {
        /// The unclassifiable artifact.
        path: PathBuf,
    },

    /// Member name is absolute or contains a parent-directory segment.
    #[error("unsafe path in archive: {member}")]
    UnsafePath {
        /// The offending member name.
        member: String,
    },

    /// Member resolves outside the install directory once canonicalized.
    #[error("path traversal detected: {member} resolves outside the install directory")]
    PathTraversal {
        /// The offending member name.
        member: String,
    },

    /// Link member points outside the install directory.
    #[error("unsafe symlink in archive: {member} -> {target}")]
    UnsafeSymlink {
        /// The link member name.
        member: String,
        /// The link target as stored in the archive.
        target: String,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive is corrupted or could not be read.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),
}

impl InstallError {
    /// Returns the kind of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolstow_core::{ErrorKind, InstallError};
    ///
    /// let err = InstallError::UnsafePath {
    ///     member: "../evil".into(),
    /// };
    /// assert_eq!(err.kind(), ErrorKind::UnsafePath);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::UnsafePath { .. } => ErrorKind::UnsafePath,
            Self::PathTraversal { .. } => ErrorKind::PathTraversal,
            Self::UnsafeSymlink { .. } => ErrorKind::UnsafeSymlink,
            Self::Io(_) => ErrorKind::Io,
            Self::InvalidArchive(_) => ErrorKind::InvalidArchive,
        }
    }

    /// Returns `true` if this error was raised by archive member validation.
    ///
    /// Security violations are:
    /// - Unsafe member names
    /// - Path traversal after canonicalization
    /// - Link targets escaping the install directory
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::UnsafePath { .. } | Self::PathTraversal { .. } | Self::UnsafeSymlink { .. }
        )
    }

    /// Returns the archive member this error refers to, if any.
    #[must_use]
    pub fn member(&self) -> Option<&str> {
        match self {
            Self::UnsafePath { member }
            | Self::PathTraversal { member }
            | Self::UnsafeSymlink { member, .. } => Some(member),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for InstallError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}
