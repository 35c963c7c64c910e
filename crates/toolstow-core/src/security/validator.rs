//! Member validation orchestrator.
//!
//! This module provides [`MemberValidator`], which runs every security check
//! over the full member list of an archive and produces a
//! [`ValidatedMemberSet`]. Extraction only ever consumes that set.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use log::trace;

use crate::InstallError;
use crate::Result;
use crate::security::PathResolver;
use crate::types::ArchiveMember;
use crate::types::DestDir;
use crate::types::LinkKind;
use crate::types::MemberKind;
use crate::types::SafeLink;
use crate::types::SafePath;

/// Validated member kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedKind {
    /// Regular file.
    File,

    /// Directory.
    Directory,

    /// Link whose target passed validation.
    Link(SafeLink),
}

/// A member that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMember {
    /// Member name exactly as stored in the archive.
    pub name: String,

    /// Validated path within the install directory.
    pub safe_path: SafePath,

    /// Validated kind.
    pub kind: ValidatedKind,
}

/// The members of one archive that passed all security checks.
///
/// Only [`MemberValidator::validate_all`] can build this set, and it only
/// does so when every member of the archive passed.
#[derive(Debug, Default)]
pub struct ValidatedMemberSet {
    members: Vec<ValidatedMember>,
    names: HashSet<String>,
}

impl ValidatedMemberSet {
    /// Returns `true` if a member with this raw name was validated.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns the validated member with this raw name.
    ///
    /// When an archive repeats a name, the last occurrence wins, matching
    /// what extraction leaves on disk.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ValidatedMember> {
        self.members.iter().rev().find(|member| member.name == name)
    }

    /// Returns the validated member matching `member` by name, kind and
    /// link target.
    ///
    /// Sources look up every entry they are about to write, so an entry that
    /// differs from what was listed is never extracted.
    #[must_use]
    pub fn admitted(&self, member: &ArchiveMember) -> Option<&ValidatedMember> {
        if !self.names.contains(&member.name) {
            return None;
        }
        self.members
            .iter()
            .rev()
            .filter(|validated| validated.name == member.name)
            .find(|validated| match (&validated.kind, &member.kind) {
                (ValidatedKind::File, MemberKind::File)
                | (ValidatedKind::Directory, MemberKind::Directory) => true,
                (ValidatedKind::Link(link), MemberKind::Symlink { target }) => {
                    link.kind() == LinkKind::Symbolic && link.target() == Path::new(target)
                }
                (ValidatedKind::Link(link), MemberKind::Hardlink { target }) => {
                    link.kind() == LinkKind::Hard && link.target() == Path::new(target)
                }
                _ => false,
            })
    }

    /// Iterates over validated members in archive order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidatedMember> {
        self.members.iter()
    }

    /// Returns the number of validated members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` when the archive had no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Validates archive members against an install directory.
///
/// Checks run in three passes over the whole member list, so that the error
/// reported for a hostile archive does not depend on member order within a
/// pass:
///
/// 1. Name check on every member (`UnsafePath`)
/// 2. Target check on every link member (`UnsafeSymlink`), with every
///    symlink of the archive already known to the resolver
/// 3. Containment check on every member path (`PathTraversal`)
///
/// # Examples
///
/// ```no_run
/// use toolstow_core::security::MemberValidator;
/// use toolstow_core::types::{ArchiveMember, DestDir};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("/tmp/tools/foo/1.0.0")?;
/// let members = vec![
///     ArchiveMember::directory("bin/"),
///     ArchiveMember::file("bin/foo"),
///     ArchiveMember::symlink("bin/link", "/etc/passwd"),
/// ];
///
/// let validator = MemberValidator::new(&dest);
/// assert!(validator.validate_all(&members).is_err());
/// # Ok(())
/// # }
/// ```
pub struct MemberValidator<'a> {
    dest: &'a DestDir,
}

impl<'a> MemberValidator<'a> {
    /// Creates a validator for the given install directory.
    #[must_use]
    pub fn new(dest: &'a DestDir) -> Self {
        Self { dest }
    }

    /// Validates every member; returns the set only if all of them pass.
    ///
    /// # Errors
    ///
    /// Returns the first failure of the earliest failing pass:
    /// - `InstallError::UnsafePath` - absolute name or `..` segment
    /// - `InstallError::UnsafeSymlink` - link target escapes the install dir
    /// - `InstallError::PathTraversal` - member path escapes after resolution
    pub fn validate_all(&self, members: &[ArchiveMember]) -> Result<ValidatedMemberSet> {
        for member in members {
            SafePath::check_name(&member.name)?;
        }

        // Every symlink is pending before any target is checked, so a target
        // that climbs through a link declared later in the archive is seen.
        let mut resolver = PathResolver::new();
        for member in members {
            if let MemberKind::Symlink { target } = &member.kind {
                let link_path = SafePath::from_checked_name(&member.name);
                resolver.add_pending_link(self.dest.join(&link_path), PathBuf::from(target));
            }
        }

        let mut links: Vec<Option<SafeLink>> = vec![None; members.len()];
        for (index, member) in members.iter().enumerate() {
            let (target, kind) = match &member.kind {
                MemberKind::Symlink { target } => (target, LinkKind::Symbolic),
                MemberKind::Hardlink { target } => (target, LinkKind::Hard),
                MemberKind::File | MemberKind::Directory => continue,
            };

            let link_path = SafePath::from_checked_name(&member.name);
            let link = SafeLink::validate(
                &link_path,
                &member.name,
                target,
                kind,
                self.dest,
                &resolver,
            )?;
            trace!("link member {} -> {} accepted", member.name, target);
            links[index] = Some(link);
        }

        let mut set = ValidatedMemberSet::default();
        for (index, member) in members.iter().enumerate() {
            let (safe_path, kind) = match &member.kind {
                MemberKind::File => (
                    SafePath::validate(&member.name, self.dest, &resolver)?,
                    ValidatedKind::File,
                ),
                MemberKind::Directory => (
                    SafePath::validate(&member.name, self.dest, &resolver)?,
                    ValidatedKind::Directory,
                ),
                MemberKind::Symlink { .. } | MemberKind::Hardlink { .. } => (
                    validate_link_location(&member.name, self.dest, &resolver)?,
                    links[index]
                        .take()
                        .map_or(ValidatedKind::File, ValidatedKind::Link),
                ),
            };

            trace!("member {} validated", member.name);
            set.names.insert(member.name.clone());
            set.members.push(ValidatedMember {
                name: member.name.clone(),
                safe_path,
                kind,
            });
        }

        Ok(set)
    }
}

/// Validates the directory a link lives in, without following the link.
///
/// The final component is replaced by the link on extraction, so only its
/// parent has to resolve inside the install directory.
fn validate_link_location(name: &str, dest: &DestDir, resolver: &PathResolver) -> Result<SafePath> {
    let trimmed = name.trim_end_matches(['/', '\\']);
    let parent = trimmed.rfind(['/', '\\']).map_or("", |pos| &trimmed[..pos]);
    SafePath::validate(parent, dest, resolver).map_err(|err| match err {
        InstallError::PathTraversal { .. } => InstallError::PathTraversal {
            member: name.to_string(),
        },
        other => other,
    })?;
    Ok(SafePath::from_checked_name(name))
}
