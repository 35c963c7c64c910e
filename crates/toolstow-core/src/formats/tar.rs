//! Tar archive source (plain, gzip, bzip2, xz).
//!
//! Tar streams cannot be rewound, so the artifact is opened once for listing
//! and again for extraction.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use log::debug;
use log::trace;
use tar::Archive;
use tar::Entry;
use tar::EntryType;

use crate::InstallError;
use crate::Result;
use crate::security::ValidatedKind;
use crate::security::ValidatedMemberSet;
use crate::types::ArchiveMember;
use crate::types::DestDir;
use crate::types::LinkKind;

use super::common;
use super::compression::TarCompression;
use super::traits::ArchiveSource;

/// A tar artifact, optionally compressed.
#[derive(Debug, Clone)]
pub struct TarSource {
    path: PathBuf,
    compression: TarCompression,
}

impl TarSource {
    /// Creates a source for `path`, choosing the codec from its suffix.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self::with_compression(path, TarCompression::from_path(path))
    }

    /// Creates a source with an explicit codec.
    #[must_use]
    pub fn with_compression(path: &Path, compression: TarCompression) -> Self {
        Self {
            path: path.to_path_buf(),
            compression,
        }
    }

    /// Returns the codec used to read this artifact.
    #[must_use]
    pub const fn compression(&self) -> TarCompression {
        self.compression
    }

    fn open(&self) -> Result<Archive<Box<dyn Read>>> {
        let file = File::open(&self.path)?;
        Ok(Archive::new(self.compression.reader(file)))
    }
}

/// Builds the member description of one tar entry.
///
/// Returns `None` for metadata-only headers that never produce a file.
fn describe<R: Read>(entry: &Entry<'_, R>) -> Result<Option<ArchiveMember>> {
    let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
    let entry_type = entry.header().entry_type();

    let member = match entry_type {
        EntryType::XGlobalHeader
        | EntryType::XHeader
        | EntryType::GNULongName
        | EntryType::GNULongLink => return Ok(None),
        EntryType::Directory => ArchiveMember::directory(name),
        EntryType::Symlink => ArchiveMember::symlink(name.clone(), link_target(entry, &name)?),
        EntryType::Link => ArchiveMember::hardlink(name.clone(), link_target(entry, &name)?),
        EntryType::Char | EntryType::Block | EntryType::Fifo => {
            return Err(InstallError::InvalidArchive(format!(
                "special file {name} (device or FIFO) is not supported"
            )));
        }
        _ => ArchiveMember::file(name),
    };
    Ok(Some(member))
}

fn link_target<R: Read>(entry: &Entry<'_, R>, name: &str) -> Result<String> {
    entry
        .link_name_bytes()
        .map(|target| String::from_utf8_lossy(&target).into_owned())
        .ok_or_else(|| InstallError::InvalidArchive(format!("link {name} has no target")))
}

fn invalid(e: &std::io::Error) -> InstallError {
    InstallError::InvalidArchive(format!("failed to read tar entry: {e}"))
}

impl ArchiveSource for TarSource {
    fn list_members(&mut self) -> Result<Vec<ArchiveMember>> {
        let mut archive = self.open()?;
        let mut members = Vec::new();

        for entry in archive.entries().map_err(|e| invalid(&e))? {
            let entry = entry.map_err(|e| invalid(&e))?;
            if let Some(member) = describe(&entry)? {
                members.push(member);
            }
        }

        debug!(
            "listed {} members from {} ({})",
            members.len(),
            self.path.display(),
            self.compression.name()
        );
        Ok(members)
    }

    fn extract_selected(&mut self, members: &ValidatedMemberSet, dest: &DestDir) -> Result<usize> {
        let mut archive = self.open()?;
        let mut extracted = 0;

        for entry in archive.entries().map_err(|e| invalid(&e))? {
            let mut entry = entry.map_err(|e| invalid(&e))?;
            let Some(member) = describe(&entry)? else {
                continue;
            };
            let Some(validated) = members.admitted(&member) else {
                return Err(InstallError::InvalidArchive(format!(
                    "entry {} was not validated",
                    member.name
                )));
            };

            match &validated.kind {
                ValidatedKind::Directory => common::create_directory(&validated.safe_path, dest)?,
                ValidatedKind::File => {
                    let mode = entry.header().mode().ok();
                    common::write_file(&mut entry, &validated.safe_path, dest, mode)?;
                }
                ValidatedKind::Link(link) => match link.kind() {
                    LinkKind::Symbolic => common::create_symlink(link, dest)?,
                    LinkKind::Hard => common::create_hardlink(link, dest)?,
                },
            }
            trace!("extracted {}", member.name);
            extracted += 1;
        }

        Ok(extracted)
    }

    fn format_name(&self) -> &str {
        "tar"
    }
}
