//! Test utilities for building artifacts.
//!
//! This module provides in-memory tar and zip builders, including entries the
//! regular archive writers refuse to produce (absolute names, `..` segments),
//! plus helpers to compress and write artifacts to disk.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::fs;
use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::formats::TarCompression;

/// Leading bytes of a 64-bit little-endian ELF executable.
pub const ELF_STUB: &[u8] = b"\x7fELF\x02\x01\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00";

/// Builder for tar test archives.
///
/// Every header is written field by field, so names and link targets are
/// stored exactly as given, hostile or not. Names and targets are limited to
/// 100 bytes.
///
/// # Examples
///
/// ```
/// use toolstow_core::test_utils::TarTestBuilder;
///
/// let tar_data = TarTestBuilder::new()
///     .directory("bin/")
///     .file("bin/foo", b"content")
///     .symlink("foo", "bin/foo")
///     .raw_file("../evil", b"payload")
///     .build();
/// ```
pub struct TarTestBuilder {
    builder: tar::Builder<Vec<u8>>,
}

impl TarTestBuilder {
    /// Creates a new tar test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    /// Adds a regular file with mode `0644`.
    #[must_use]
    pub fn file(self, name: &str, data: &[u8]) -> Self {
        self.file_with_mode(name, data, 0o644)
    }

    /// Adds a regular file with a custom mode.
    #[must_use]
    pub fn file_with_mode(self, name: &str, data: &[u8], mode: u32) -> Self {
        self.entry(name, tar::EntryType::Regular, None, mode, data)
    }

    /// Adds a regular file without any name checks. Identical to
    /// [`TarTestBuilder::file`]; the separate name documents intent at the
    /// call site.
    #[must_use]
    pub fn raw_file(self, name: &str, data: &[u8]) -> Self {
        self.file(name, data)
    }

    /// Adds a directory.
    #[must_use]
    pub fn directory(self, name: &str) -> Self {
        self.entry(name, tar::EntryType::Directory, None, 0o755, &[])
    }

    /// Adds a symbolic link.
    #[must_use]
    pub fn symlink(self, name: &str, target: &str) -> Self {
        self.entry(name, tar::EntryType::Symlink, Some(target), 0o777, &[])
    }

    /// Adds a hard link; `target` is relative to the archive root.
    #[must_use]
    pub fn hardlink(self, name: &str, target: &str) -> Self {
        self.entry(name, tar::EntryType::Link, Some(target), 0o644, &[])
    }

    /// Adds a FIFO.
    #[must_use]
    pub fn fifo(self, name: &str) -> Self {
        self.entry(name, tar::EntryType::Fifo, None, 0o644, &[])
    }

    fn entry(
        mut self,
        name: &str,
        entry_type: tar::EntryType,
        link: Option<&str>,
        mode: u32,
        data: &[u8],
    ) -> Self {
        let mut header = tar::Header::new_gnu();
        set_field(&mut header.as_old_mut().name, name);
        if let Some(target) = link {
            set_field(&mut header.as_old_mut().linkname, target);
        }
        header.set_entry_type(entry_type);
        header.set_size(data.len() as u64);
        header.set_mode(mode);
        header.set_mtime(1_700_000_000);
        header.set_cksum();
        self.builder.append(&header, data).unwrap();
        self
    }

    /// Builds and returns the uncompressed tar data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.builder.into_inner().unwrap()
    }
}

impl Default for TarTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn set_field(slot: &mut [u8; 100], value: &str) {
    let bytes = value.as_bytes();
    assert!(bytes.len() <= slot.len(), "tar field too long: {value}");
    slot.fill(0);
    slot[..bytes.len()].copy_from_slice(bytes);
}

/// Builder for zip test archives.
///
/// # Examples
///
/// ```
/// use toolstow_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .directory("bin/")
///     .file("bin/foo", b"content")
///     .symlink("foo", "bin/foo")
///     .build();
/// ```
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new zip test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a deflated file with mode `0644`.
    #[must_use]
    pub fn file(self, name: &str, data: &[u8]) -> Self {
        self.file_with_mode(name, data, 0o644)
    }

    /// Adds a deflated file with a custom mode.
    #[must_use]
    pub fn file_with_mode(mut self, name: &str, data: &[u8], mode: u32) -> Self {
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(mode);
        self.zip.start_file(name, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory.
    #[must_use]
    pub fn directory(mut self, name: &str) -> Self {
        let options = zip::write::SimpleFileOptions::default();
        self.zip.add_directory(name, options).unwrap();
        self
    }

    /// Adds a symlink stored the Info-ZIP way.
    #[must_use]
    pub fn symlink(mut self, name: &str, target: &str) -> Self {
        let options = zip::write::SimpleFileOptions::default();
        self.zip.add_symlink(name, target, options).unwrap();
        self
    }

    /// Builds and returns the zip data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compresses tar data with the given codec.
#[must_use]
pub fn compress(data: &[u8], compression: TarCompression) -> Vec<u8> {
    match compression {
        TarCompression::None => data.to_vec(),
        TarCompression::Gzip => {
            let mut encoder =
                flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
        TarCompression::Bzip2 => {
            let mut encoder =
                bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
        TarCompression::Xz => {
            let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
    }
}

/// Writes artifact bytes to `dir/name` and returns the path.
pub fn write_artifact(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tar_builder_keeps_hostile_names() {
        let data = TarTestBuilder::new()
            .raw_file("/etc/passwd", b"x")
            .raw_file("a/../../b", b"y")
            .build();

        let mut archive = tar::Archive::new(Cursor::new(data));
        let names: Vec<String> = archive
            .entries()
            .unwrap()
            .map(|e| String::from_utf8_lossy(&e.unwrap().path_bytes()).into_owned())
            .collect();
        assert_eq!(names, vec!["/etc/passwd", "a/../../b"]);
    }

    #[test]
    fn test_zip_builder_roundtrips_names() {
        let data = ZipTestBuilder::new().file("bin/foo", b"x").build();
        let archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 1);
    }
}
