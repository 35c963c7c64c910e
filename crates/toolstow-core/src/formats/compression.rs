//! Decompression selection for tar artifacts.
//!
//! The codec is chosen from the artifact's final suffix only:
//!
//! - **Gzip** (`.gz`, `.tgz`)
//! - **Bzip2** (`.bz2`)
//! - **Xz** (`.xz`)
//! - anything else is read as an uncompressed tar stream

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use xz2::read::XzDecoder;

/// Compression codec wrapped around a tar stream.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use toolstow_core::formats::compression::TarCompression;
///
/// assert_eq!(TarCompression::from_path(Path::new("tool.tar.gz")), TarCompression::Gzip);
/// assert_eq!(TarCompression::from_path(Path::new("tool.tgz")), TarCompression::Gzip);
/// assert_eq!(TarCompression::from_path(Path::new("tool.tar")), TarCompression::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TarCompression {
    /// Plain tar.
    None,

    /// Gzip (deflate).
    Gzip,

    /// Bzip2 (Burrows-Wheeler).
    Bzip2,

    /// Xz (LZMA2).
    Xz,
}

impl TarCompression {
    /// Chooses the codec from the final suffix, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("gz" | "tgz") => Self::Gzip,
            Some("bz2") => Self::Bzip2,
            Some("xz") => Self::Xz,
            _ => Self::None,
        }
    }

    /// Returns a human-readable name for this codec.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
        }
    }

    /// Wraps a file in the matching decoder.
    #[must_use]
    pub fn reader(self, file: File) -> Box<dyn Read> {
        let buffered = BufReader::new(file);
        match self {
            Self::None => Box::new(buffered),
            Self::Gzip => Box::new(GzDecoder::new(buffered)),
            Self::Bzip2 => Box::new(BzDecoder::new(buffered)),
            Self::Xz => Box::new(XzDecoder::new(buffered)),
        }
    }
}
