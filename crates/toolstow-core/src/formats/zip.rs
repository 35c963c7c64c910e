//! ZIP archive source.
//!
//! Members are listed from the central directory. A member whose Unix mode
//! has the symlink file type is treated as a symbolic link whose target is
//! the member's content, the way Info-ZIP stores links.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use log::debug;
use log::trace;
use zip::ZipArchive;
use zip::read::ZipFile;

use crate::InstallError;
use crate::Result;
use crate::security::ValidatedKind;
use crate::security::ValidatedMemberSet;
use crate::types::ArchiveMember;
use crate::types::DestDir;

use super::common;
use super::traits::ArchiveSource;

const S_IFMT: u32 = 0o170_000;
const S_IFLNK: u32 = 0o120_000;

/// Symlink targets longer than this are not plausible paths.
const MAX_LINK_TARGET_LEN: u64 = 4096;

/// A ZIP artifact opened for listing and extraction.
pub struct ZipSource {
    archive: ZipArchive<BufReader<File>>,
}

impl ZipSource {
    /// Opens a ZIP artifact and reads its central directory.
    ///
    /// # Errors
    ///
    /// Returns `InstallError::Io` if the file cannot be opened, or
    /// `InstallError::InvalidArchive` if it is not a readable ZIP.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(BufReader::new(file)).map_err(|e| {
            InstallError::InvalidArchive(format!("failed to open ZIP archive: {e}"))
        })?;
        debug!("opened ZIP {} with {} entries", path.display(), archive.len());
        Ok(Self { archive })
    }

    fn read_member(&mut self, index: usize) -> Result<ArchiveMember> {
        let mut entry = self.archive.by_index(index).map_err(|e| {
            InstallError::InvalidArchive(format!("failed to read ZIP entry {index}: {e}"))
        })?;
        describe(&mut entry)
    }
}

/// Builds the member description of one ZIP entry.
fn describe<R: Read>(entry: &mut ZipFile<'_, R>) -> Result<ArchiveMember> {
    let name = entry.name().to_string();
    if entry.is_dir() {
        return Ok(ArchiveMember::directory(name));
    }
    if is_symlink_mode(entry.unix_mode()) {
        let mut target = String::new();
        entry
            .by_ref()
            .take(MAX_LINK_TARGET_LEN)
            .read_to_string(&mut target)
            .map_err(|e| {
                InstallError::InvalidArchive(format!("unreadable symlink target for {name}: {e}"))
            })?;
        return Ok(ArchiveMember::symlink(name, target));
    }
    Ok(ArchiveMember::file(name))
}

fn is_symlink_mode(mode: Option<u32>) -> bool {
    mode.is_some_and(|mode| mode & S_IFMT == S_IFLNK)
}

impl ArchiveSource for ZipSource {
    fn list_members(&mut self) -> Result<Vec<ArchiveMember>> {
        (0..self.archive.len())
            .map(|index| self.read_member(index))
            .collect()
    }

    fn extract_selected(&mut self, members: &ValidatedMemberSet, dest: &DestDir) -> Result<usize> {
        let mut extracted = 0;

        for index in 0..self.archive.len() {
            let mut entry = self.archive.by_index(index).map_err(|e| {
                InstallError::InvalidArchive(format!("failed to read ZIP entry {index}: {e}"))
            })?;
            let mode = entry.unix_mode();
            let member = describe(&mut entry)?;

            let Some(validated) = members.admitted(&member) else {
                return Err(InstallError::InvalidArchive(format!(
                    "entry {} was not validated",
                    member.name
                )));
            };

            match &validated.kind {
                ValidatedKind::Directory => common::create_directory(&validated.safe_path, dest)?,
                ValidatedKind::File => {
                    common::write_file(&mut entry, &validated.safe_path, dest, mode)?;
                }
                ValidatedKind::Link(link) => common::create_symlink(link, dest)?,
            }
            trace!("extracted {}", member.name);
            extracted += 1;
        }

        Ok(extracted)
    }

    fn format_name(&self) -> &str {
        "zip"
    }
}
