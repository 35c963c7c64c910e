//! Executable-bit normalization after install.

use std::io;
#[cfg(unix)]
use std::path::Path;

#[cfg(unix)]
use log::trace;

#[cfg(unix)]
use crate::metadata::is_plain_name;
use crate::metadata::ToolMetadata;
use crate::types::DestDir;

/// Mode given to every installed executable.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Sets mode `0755` on installed executables and returns how many files were
/// changed.
///
/// Two locations are considered:
///
/// - every regular file directly inside `<dest>/bin` (not recursive)
/// - `<dest>/<executable_name>`, when the metadata names one and it is a
///   regular file
///
/// Symlinks are never followed. On platforms without POSIX permission bits
/// this does nothing.
///
/// # Errors
///
/// Returns the first I/O error; files handled before it keep their new mode.
pub fn normalize_permissions(dest: &DestDir, metadata: &ToolMetadata) -> io::Result<usize> {
    #[cfg(unix)]
    {
        let mut changed = 0;

        let bin_dir = dest.as_path().join(crate::formats::binary::BIN_DIR_NAME);
        if bin_dir.is_dir() {
            for entry in std::fs::read_dir(&bin_dir)? {
                let entry = entry?;
                if entry.file_type()?.is_file() {
                    make_executable(&entry.path())?;
                    changed += 1;
                }
            }
        }

        if let Some(name) = metadata.executable_name.as_deref().filter(|n| is_plain_name(n)) {
            let top_level = dest.as_path().join(name);
            let is_file = std::fs::symlink_metadata(&top_level).is_ok_and(|m| m.is_file());
            if is_file {
                make_executable(&top_level)?;
                changed += 1;
            }
        }

        Ok(changed)
    }

    #[cfg(not(unix))]
    {
        let _ = (dest, metadata);
        Ok(0)
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(EXECUTABLE_MODE))?;
    trace!("set mode {EXECUTABLE_MODE:o} on {}", path.display());
    Ok(())
}
