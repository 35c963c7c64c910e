//! Member writers shared by the archive sources.
//!
//! Every function here takes paths that were already validated; none of them
//! performs security checks of its own.

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::Result;
use crate::types::DestDir;
use crate::types::SafeLink;
use crate::types::SafePath;

const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Writes a regular file member, creating parent directories as needed.
///
/// `mode` is applied on Unix after the data is flushed, masked to the
/// permission bits. Returns the number of bytes written.
///
/// # Errors
///
/// Returns an error if a parent directory cannot be created or the copy
/// fails.
pub fn write_file<R: Read>(
    reader: &mut R,
    safe_path: &SafePath,
    dest: &DestDir,
    mode: Option<u32>,
) -> Result<u64> {
    let output_path = dest.join(safe_path);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    remove_existing_link(&output_path)?;

    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, File::create(&output_path)?);
    let written = io::copy(reader, &mut writer)?;
    writer.flush()?;

    #[cfg(unix)]
    if let Some(mode) = mode {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&output_path, fs::Permissions::from_mode(mode & 0o777))?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(written)
}

/// Creates a directory member. Existing directories are left alone.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn create_directory(safe_path: &SafePath, dest: &DestDir) -> Result<()> {
    fs::create_dir_all(dest.join(safe_path))?;
    Ok(())
}

/// Creates a symbolic link member, replacing a file or link already at the
/// link path.
///
/// # Errors
///
/// Returns an error if the link cannot be created, or always on platforms
/// without symlink support.
pub fn create_symlink(link: &SafeLink, dest: &DestDir) -> Result<()> {
    let link_path = dest.join(link.link_path());
    if let Some(parent) = link_path.parent() {
        fs::create_dir_all(parent)?;
    }
    remove_existing_link(&link_path)?;

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(link.target(), &link_path)?;
        Ok(())
    }

    #[cfg(not(unix))]
    {
        Err(crate::InstallError::Io(io::Error::new(
            io::ErrorKind::Unsupported,
            format!(
                "symlinks are not supported on this platform: {}",
                link_path.display()
            ),
        )))
    }
}

/// Creates a hard link member. The target is taken relative to the install
/// directory root and must already have been extracted.
///
/// # Errors
///
/// Returns an error if the target does not exist or the link cannot be
/// created.
pub fn create_hardlink(link: &SafeLink, dest: &DestDir) -> Result<()> {
    let link_path = dest.join(link.link_path());
    if let Some(parent) = link_path.parent() {
        fs::create_dir_all(parent)?;
    }
    remove_existing_link(&link_path)?;
    fs::hard_link(dest.join_path(link.target()), &link_path)?;
    Ok(())
}

/// Removes a symlink or regular file so a new member can take its place.
///
/// Directories are never removed.
fn remove_existing_link(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if !meta.is_dir() => fs::remove_file(path),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::security::PathResolver;
    use crate::types::LinkKind;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn create_test_dest() -> (TempDir, DestDir) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::create(temp.path()).expect("failed to create dest");
        (temp, dest)
    }

    #[test]
    fn test_write_file_creates_parents() {
        let (_temp, dest) = create_test_dest();
        let safe = SafePath::validate("bin/sub/foo", &dest, &PathResolver::new()).unwrap();

        let written = write_file(&mut Cursor::new(b"data"), &safe, &dest, None).unwrap();
        assert_eq!(written, 4);
        assert_eq!(fs::read(dest.join(&safe)).unwrap(), b"data");
    }

    #[test]
    #[cfg(unix)]
    fn test_write_file_applies_mode() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp, dest) = create_test_dest();
        let safe = SafePath::validate("foo", &dest, &PathResolver::new()).unwrap();
        write_file(&mut Cursor::new(b"x"), &safe, &dest, Some(0o100_750)).unwrap();

        let mode = fs::metadata(dest.join(&safe)).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
    }

    #[test]
    fn test_create_directory_idempotent() {
        let (_temp, dest) = create_test_dest();
        let safe = SafePath::validate("share/doc", &dest, &PathResolver::new()).unwrap();
        create_directory(&safe, &dest).unwrap();
        create_directory(&safe, &dest).unwrap();
        assert!(dest.join(&safe).is_dir());
    }

    #[test]
    #[cfg(unix)]
    fn test_create_symlink_replaces_existing_file() {
        let (_temp, dest) = create_test_dest();
        let resolver = PathResolver::new();
        fs::write(dest.as_path().join("foo"), b"real").unwrap();
        fs::write(dest.as_path().join("alias"), b"stale").unwrap();

        let link_path = SafePath::validate("alias", &dest, &resolver).unwrap();
        let link =
            SafeLink::validate(&link_path, "alias", "foo", LinkKind::Symbolic, &dest, &resolver)
                .unwrap();
        create_symlink(&link, &dest).unwrap();

        let alias = dest.as_path().join("alias");
        assert!(fs::symlink_metadata(&alias).unwrap().file_type().is_symlink());
        assert_eq!(fs::read(&alias).unwrap(), b"real");
    }

    #[test]
    fn test_create_hardlink_from_root() {
        let (_temp, dest) = create_test_dest();
        let resolver = PathResolver::new();
        fs::create_dir(dest.as_path().join("bin")).unwrap();
        fs::write(dest.as_path().join("bin/foo"), b"shared").unwrap();

        let link_path = SafePath::validate("bin/foo2", &dest, &resolver).unwrap();
        let link =
            SafeLink::validate(&link_path, "bin/foo2", "bin/foo", LinkKind::Hard, &dest, &resolver)
                .unwrap();
        create_hardlink(&link, &dest).unwrap();

        assert_eq!(fs::read(dest.as_path().join("bin/foo2")).unwrap(), b"shared");
    }
}
