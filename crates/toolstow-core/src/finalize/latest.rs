//! The per-tool `latest` pointer.

use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;

use log::debug;

use crate::metadata::ToolMetadata;
use crate::types::DestDir;

/// Name of the link, created next to the version directories of a tool.
pub const LATEST_LINK_NAME: &str = "latest";

/// Points `<dest>/../latest` at `dest`, replacing whatever was there.
///
/// Returns the link path, or `None` when nothing was published: the metadata
/// lacks a name or version, `dest` has no parent, `dest` is itself named
/// `latest`, or the platform has no symlinks.
///
/// Replacement is remove-then-create and not atomic; concurrent publishers
/// race and the last one wins.
///
/// # Errors
///
/// Returns an error if the old entry cannot be removed or the link cannot be
/// created.
pub fn publish_latest(dest: &DestDir, metadata: &ToolMetadata) -> io::Result<Option<PathBuf>> {
    if !metadata.is_versioned() {
        debug!("skipping {LATEST_LINK_NAME} link: tool has no name or version");
        return Ok(None);
    }
    let Some(parent) = dest.as_path().parent() else {
        return Ok(None);
    };
    if dest.as_path().file_name() == Some(OsStr::new(LATEST_LINK_NAME)) {
        debug!("skipping {LATEST_LINK_NAME} link: install dir has the same name");
        return Ok(None);
    }

    #[cfg(unix)]
    {
        let link = parent.join(LATEST_LINK_NAME);
        remove_existing(&link)?;
        std::os::unix::fs::symlink(dest.as_path(), &link)?;
        debug!("{} -> {}", link.display(), dest.as_path().display());
        Ok(Some(link))
    }

    #[cfg(not(unix))]
    {
        let _ = parent;
        Ok(None)
    }
}

/// Removes a file, symlink (dangling or not), or directory tree at `path`.
#[cfg(unix)]
fn remove_existing(path: &std::path::Path) -> io::Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(path),
        Ok(_) => std::fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::symlink;
    use tempfile::TempDir;

    fn version_dir(temp: &TempDir, version: &str) -> DestDir {
        DestDir::create(temp.path().join("tools/foo").join(version)).unwrap()
    }

    #[test]
    fn test_creates_link() {
        let temp = TempDir::new().unwrap();
        let dest = version_dir(&temp, "1.0.0");

        let link = publish_latest(&dest, &ToolMetadata::new("foo", "1.0.0"))
            .unwrap()
            .unwrap();
        assert_eq!(link, dest.as_path().parent().unwrap().join("latest"));
        assert_eq!(fs::read_link(&link).unwrap(), dest.as_path());
    }

    #[test]
    fn test_replaces_previous_version() {
        let temp = TempDir::new().unwrap();
        let old = version_dir(&temp, "1.0.0");
        let new = version_dir(&temp, "2.0.0");

        publish_latest(&old, &ToolMetadata::new("foo", "1.0.0")).unwrap();
        let link = publish_latest(&new, &ToolMetadata::new("foo", "2.0.0"))
            .unwrap()
            .unwrap();
        assert_eq!(fs::read_link(link).unwrap(), new.as_path());
    }

    #[test]
    fn test_replaces_dangling_link_file_and_directory() {
        let temp = TempDir::new().unwrap();
        let dest = version_dir(&temp, "1.0.0");
        let latest = dest.as_path().parent().unwrap().join("latest");
        let meta = ToolMetadata::new("foo", "1.0.0");

        symlink(temp.path().join("gone"), &latest).unwrap();
        publish_latest(&dest, &meta).unwrap();
        assert_eq!(fs::read_link(&latest).unwrap(), dest.as_path());

        fs::remove_file(&latest).unwrap();
        fs::write(&latest, b"stale").unwrap();
        publish_latest(&dest, &meta).unwrap();
        assert_eq!(fs::read_link(&latest).unwrap(), dest.as_path());

        fs::remove_file(&latest).unwrap();
        fs::create_dir_all(latest.join("junk")).unwrap();
        publish_latest(&dest, &meta).unwrap();
        assert_eq!(fs::read_link(&latest).unwrap(), dest.as_path());
    }

    #[test]
    fn test_unversioned_metadata_skipped() {
        let temp = TempDir::new().unwrap();
        let dest = version_dir(&temp, "1.0.0");

        assert_eq!(publish_latest(&dest, &ToolMetadata::new("foo", "")).unwrap(), None);
        assert_eq!(publish_latest(&dest, &ToolMetadata::new("", "1.0.0")).unwrap(), None);
        assert!(!dest.as_path().parent().unwrap().join("latest").exists());
    }

    #[test]
    fn test_dest_named_latest_is_kept() {
        let temp = TempDir::new().unwrap();
        let dest = version_dir(&temp, "latest");
        fs::write(dest.as_path().join("payload"), b"x").unwrap();

        assert_eq!(
            publish_latest(&dest, &ToolMetadata::new("foo", "latest")).unwrap(),
            None
        );
        assert!(dest.as_path().join("payload").exists());
    }
}
