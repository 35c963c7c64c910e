//! Artifact format detection.

use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;

use log::debug;

/// Leading bytes of executable formats accepted as single-binary artifacts.
const EXECUTABLE_MAGIC: &[&[u8]] = &[
    // ELF
    b"\x7fELF",
    // PE / DOS stub
    b"MZ",
    // Mach-O 32/64-bit, big- and little-endian
    b"\xfe\xed\xfa\xce",
    b"\xfe\xed\xfa\xcf",
    b"\xce\xfa\xed\xfe",
    b"\xcf\xfa\xed\xfe",
    // Mach-O universal
    b"\xca\xfe\xba\xbe",
];

/// How an artifact will be installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactFormat {
    /// ZIP archive.
    Zip,
    /// Tar archive, optionally gzip/bzip2/xz compressed.
    TarFamily,
    /// Single executable file.
    Binary,
    /// Not installable.
    Unknown,
}

impl ArtifactFormat {
    /// Returns a short lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarFamily => "tar",
            Self::Binary => "binary",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifies an artifact.
///
/// The suffix decides first: `.zip` is [`ArtifactFormat::Zip`], and `.tar`,
/// `.gz`, `.tgz`, `.bz2`, `.xz` are [`ArtifactFormat::TarFamily`]. A file
/// with no suffix, or with `.exe`/`.bin`, is probed for an executable magic
/// number. I/O errors while probing are not reported; the artifact is then
/// simply [`ArtifactFormat::Unknown`].
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use toolstow_core::formats::{ArtifactFormat, classify};
///
/// assert_eq!(classify(Path::new("tool-1.0.tar.gz")), ArtifactFormat::TarFamily);
/// ```
#[must_use]
pub fn classify(path: &Path) -> ArtifactFormat {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        Some("zip") => ArtifactFormat::Zip,
        Some("tar" | "gz" | "tgz" | "bz2" | "xz") => ArtifactFormat::TarFamily,
        None | Some("exe" | "bin") => match probe_executable_magic(path) {
            Ok(true) => ArtifactFormat::Binary,
            Ok(false) => ArtifactFormat::Unknown,
            Err(e) => {
                debug!("could not probe {} for a magic number: {e}", path.display());
                ArtifactFormat::Unknown
            }
        },
        Some(_) => ArtifactFormat::Unknown,
    }
}

/// Reads up to four leading bytes and matches them against known
/// executable magic numbers.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn probe_executable_magic(path: &Path) -> io::Result<bool> {
    let mut head = Vec::with_capacity(4);
    File::open(path)?.take(4).read_to_end(&mut head)?;
    Ok(is_executable_magic(&head))
}

/// Returns `true` if `head` starts with a known executable magic number.
#[must_use]
pub fn is_executable_magic(head: &[u8]) -> bool {
    EXECUTABLE_MAGIC.iter().any(|magic| head.starts_with(magic))
}
