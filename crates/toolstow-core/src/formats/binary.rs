//! Single-binary artifact installation.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use log::debug;

use crate::InstallError;
use crate::Result;
use crate::metadata::ToolMetadata;
use crate::types::DestDir;

/// Directory under the install directory that receives executables.
pub const BIN_DIR_NAME: &str = "bin";

/// Copies a single executable into `<dest>/bin/`.
///
/// The file is named after the metadata's executable name override, or else
/// after the source file. The copy is made executable (`0755` on Unix) and
/// keeps the source's modification time. Read-only sources are fine.
///
/// # Errors
///
/// Returns `InstallError::UnsafePath` if the executable name override is
/// not a single plain file name, `InstallError::Io` if `bin/` cannot be
/// created or the copy fails, and `InstallError::UnsupportedFormat` if the
/// source path has no file name.
pub fn install_binary(source: &Path, dest: &DestDir, metadata: &ToolMetadata) -> Result<PathBuf> {
    let file_name = match metadata.checked_executable_name()? {
        Some(name) => PathBuf::from(name),
        None => source
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| InstallError::UnsupportedFormat {
                path: source.to_path_buf(),
            })?,
    };

    let bin_dir = dest.as_path().join(BIN_DIR_NAME);
    fs::create_dir_all(&bin_dir)?;
    let target = bin_dir.join(file_name);

    fs::copy(source, &target)?;
    make_writable_executable(&target)?;

    // The copy is writable now; mtime is carried over by hand.
    let modified = fs::metadata(source)?.modified()?;
    fs::File::options()
        .write(true)
        .open(&target)?
        .set_modified(modified)?;

    debug!("copied {} to {}", source.display(), target.display());
    Ok(target)
}

#[cfg(unix)]
fn make_writable_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_writable_executable(path: &Path) -> Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)?;
    Ok(())
}
