//! Path resolution for containment checks.
//!
//! Archive members do not exist on disk while they are being validated, so
//! `Path::canonicalize` cannot be used directly. [`PathResolver`] walks a path
//! component by component, following symlinks that already exist on disk as
//! well as symlinks declared earlier in the same archive, and folds `.` and
//! `..` lexically once it leaves the existing part of the tree.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Upper bound on symlinks followed while resolving one path.
const MAX_LINK_HOPS: usize = 40;

/// Resolves paths to their canonical form without requiring them to exist.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use toolstow_core::security::PathResolver;
///
/// # fn main() -> std::io::Result<()> {
/// let resolver = PathResolver::new();
/// let resolved = resolver.resolve(Path::new("/tmp/dest/not/yet/../created"))?;
/// assert!(resolved.ends_with("not/created"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct PathResolver {
    /// Archive symlinks keyed by absolute link path, valued by raw target.
    pending_links: HashMap<PathBuf, PathBuf>,
}

impl PathResolver {
    /// Creates a resolver that only consults the filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a symlink that will exist once the archive is extracted.
    ///
    /// `link` must be absolute. Later resolutions passing through `link`
    /// follow `target` exactly as the filesystem would after extraction.
    pub fn add_pending_link(&mut self, link: PathBuf, target: PathBuf) {
        self.pending_links.insert(link, target);
    }

    /// Returns the number of recorded archive symlinks.
    #[must_use]
    pub fn pending_link_count(&self) -> usize {
        self.pending_links.len()
    }

    /// Resolves `path` to an absolute, symlink-free form.
    ///
    /// # Errors
    ///
    /// Returns an error if filesystem metadata cannot be read, or if more
    /// than 40 symlinks are followed (a link cycle).
    pub fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        let mut hops = MAX_LINK_HOPS;
        self.resolve_with_budget(path, &mut hops)
    }

    fn resolve_with_budget(&self, path: &Path, hops: &mut usize) -> io::Result<PathBuf> {
        let mut resolved = PathBuf::new();
        let mut on_disk = true;

        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => resolved.push(component),
                Component::CurDir => {}
                Component::ParentDir => {
                    resolved.pop();
                    on_disk = true;
                }
                Component::Normal(part) => {
                    resolved.push(part);

                    let target = if let Some(target) = self.pending_links.get(&resolved) {
                        Some(target.clone())
                    } else if on_disk {
                        match fs::symlink_metadata(&resolved) {
                            Ok(meta) if meta.file_type().is_symlink() => {
                                Some(fs::read_link(&resolved)?)
                            }
                            Ok(_) => None,
                            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                                on_disk = false;
                                None
                            }
                            Err(e) => return Err(e),
                        }
                    } else {
                        None
                    };

                    if let Some(target) = target {
                        if *hops == 0 {
                            return Err(io::Error::new(
                                io::ErrorKind::InvalidInput,
                                format!("too many levels of symbolic links: {}", resolved.display()),
                            ));
                        }
                        *hops -= 1;
                        resolved.pop();
                        // An absolute target replaces the accumulated prefix.
                        let joined = resolved.join(target);
                        resolved = self.resolve_with_budget(&joined, hops)?;
                        on_disk = true;
                    }
                }
            }
        }

        Ok(resolved)
    }
}

/// Returns `true` if `path` equals `root` or lies beneath it.
///
/// Comparison is component-wise, so `/a/bc` is not considered inside `/a/b`.
#[must_use]
pub fn is_within(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}
