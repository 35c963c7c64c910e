//! The install facade.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use log::warn;

use crate::InstallConfig;
use crate::InstallError;
use crate::InstallReport;
use crate::Result;
use crate::ToolMetadata;
use crate::extraction::extract_validated;
use crate::finalize::normalize_permissions;
use crate::finalize::publish_latest;
use crate::formats::ArtifactFormat;
use crate::formats::TarSource;
use crate::formats::ZipSource;
use crate::formats::classify;
use crate::formats::install_binary;
use crate::resolve::resolve_install_dir;
use crate::types::DestDir;

/// Installs artifacts into the versioned tool layout.
///
/// Each call runs one fixed sequence: check the artifact, resolve the
/// install directory, classify, extract or copy, normalize permissions, and
/// publish the `latest` link. The last two steps are best-effort.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use toolstow_core::{InstallConfig, Installer, ToolMetadata};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let installer = Installer::new(InstallConfig::default());
/// let meta = ToolMetadata::new("terraform", "1.9.0");
/// let report = installer.install(Path::new("terraform_1.9.0.zip"), &meta)?;
/// println!("installed into {}", report.install_dir.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Installer {
    config: InstallConfig,
}

impl Installer {
    /// Creates an installer rooted at `config`.
    #[must_use]
    pub fn new(config: InstallConfig) -> Self {
        Self { config }
    }

    /// Returns the installer configuration.
    #[must_use]
    pub fn config(&self) -> &InstallConfig {
        &self.config
    }

    /// Installs `artifact` for the tool described by `metadata`.
    ///
    /// # Errors
    ///
    /// - `InstallError::NotFound` if the artifact does not exist
    /// - `InstallError::UnsupportedFormat` if it cannot be classified
    /// - `InstallError::UnsafePath` if the executable name override is not a
    ///   plain file name; nothing is created in that case
    /// - `InstallError::UnsafePath`, `PathTraversal` or `UnsafeSymlink` if an
    ///   archive member is unsafe; nothing is extracted in that case
    /// - `InstallError::InvalidArchive` or `InstallError::Io` for unreadable
    ///   archives and filesystem failures
    ///
    /// After a failure during extraction the install directory may exist
    /// and be partially populated.
    pub fn install(&self, artifact: &Path, metadata: &ToolMetadata) -> Result<InstallReport> {
        check_artifact(artifact)?;
        metadata.checked_executable_name()?;
        debug!("installing {} as {}", artifact.display(), describe(metadata));

        let target = resolve_install_dir(metadata, &self.config);
        debug!("resolved install dir {}", target.display());

        let format = classify(artifact);
        debug!("classified {} as {format}", artifact.display());

        let (dest, members_extracted) = match format {
            ArtifactFormat::Zip => {
                let dest = DestDir::create(&target)?;
                let mut source = ZipSource::open(artifact)?;
                let written = extract_validated(&mut source, &dest)?;
                (dest, written)
            }
            ArtifactFormat::TarFamily => {
                let dest = DestDir::create(&target)?;
                let mut source = TarSource::new(artifact);
                let written = extract_validated(&mut source, &dest)?;
                (dest, written)
            }
            ArtifactFormat::Binary => {
                let dest = DestDir::create(&target)?;
                install_binary(artifact, &dest, metadata)?;
                (dest, 1)
            }
            ArtifactFormat::Unknown => {
                return Err(InstallError::UnsupportedFormat {
                    path: artifact.to_path_buf(),
                });
            }
        };

        let mut report = InstallReport::new(target, format);
        report.members_extracted = members_extracted;

        match normalize_permissions(&dest, metadata) {
            Ok(count) => {
                debug!("normalized {count} executables");
                report.executables_normalized = count;
            }
            Err(e) => {
                let message = format!("could not normalize permissions: {e}");
                warn!("{message}");
                report.add_warning(message);
            }
        }

        match publish_latest(&dest, metadata) {
            Ok(link) => report.latest_link = link,
            Err(e) => {
                let message = format!("could not publish latest link: {e}");
                warn!("{message}");
                report.add_warning(message);
            }
        }

        debug!("install of {} complete", describe(metadata));
        Ok(report)
    }
}

fn check_artifact(artifact: &Path) -> Result<()> {
    match fs::metadata(artifact) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(InstallError::NotFound {
            path: artifact.to_path_buf(),
        }),
        Err(e) => Err(e.into()),
    }
}

fn describe(metadata: &ToolMetadata) -> String {
    format!("{} {}", metadata.name, metadata.version)
}
