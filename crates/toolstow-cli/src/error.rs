//! Error conversion utilities for CLI.
//!
//! Converts toolstow-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::Result;
use anyhow::anyhow;
use std::path::Path;
use toolstow_core::InstallError;

/// Converts `InstallError` to user-friendly anyhow error with context
pub fn convert_install_error(err: InstallError, artifact: &Path) -> anyhow::Error {
    match err {
        InstallError::NotFound { path } => {
            anyhow!(
                "Artifact not found: {}\n\
                 HINT: Check the path; the artifact must be downloaded before installing.",
                path.display()
            )
        }
        InstallError::UnsupportedFormat { path } => {
            anyhow!(
                "Artifact format not supported: {}\n\
                 HINT: Supported formats: zip, tar, tar.gz, tgz, tar.bz2, tar.xz, \
                 and ELF/PE/Mach-O executables",
                path.display()
            )
        }
        InstallError::UnsafePath { member } => {
            anyhow!(
                "Security violation: Artifact '{}' contains unsafe member name '{}'\n\
                 HINT: This archive may be malicious. Do not install from untrusted sources.",
                artifact.display(),
                member
            )
        }
        InstallError::PathTraversal { member } => {
            anyhow!(
                "Security violation: Artifact '{}' attempted path traversal with '{}'\n\
                 HINT: This archive may be malicious. Do not install from untrusted sources.",
                artifact.display(),
                member
            )
        }
        InstallError::UnsafeSymlink { member, target } => {
            anyhow!(
                "Security violation: Artifact '{}' contains link '{}' pointing outside the \
                 install directory ('{}')\n\
                 HINT: This archive may be malicious. Do not install from untrusted sources.",
                artifact.display(),
                member,
                target
            )
        }
        InstallError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The artifact may be corrupted or truncated. Try downloading it again.",
                artifact.display(),
                reason
            )
        }
        InstallError::Io(io_err) => {
            anyhow!(
                "I/O error while installing '{}': {}",
                artifact.display(),
                io_err
            )
        }
    }
}

/// Adds context to a generic error about install operations
pub fn add_artifact_context<T>(
    result: Result<T, InstallError>,
    artifact: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_install_error(e, artifact))
}
