//! Common trait for archive format handlers.

use crate::Result;
use crate::security::ValidatedMemberSet;
use crate::types::ArchiveMember;
use crate::types::DestDir;

/// Minimal view of an archive that the validate-then-extract algorithm needs.
///
/// Implementations list members without writing anything, and write only the
/// members of a [`ValidatedMemberSet`].
pub trait ArchiveSource {
    /// Lists every member with its kind and raw link target.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be read.
    fn list_members(&mut self) -> Result<Vec<ArchiveMember>>;

    /// Extracts the members of `members` into `dest`, returning how many
    /// were written.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the archive or writing a member fails.
    fn extract_selected(&mut self, members: &ValidatedMemberSet, dest: &DestDir) -> Result<usize>;

    /// Returns the archive format name.
    fn format_name(&self) -> &str;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::security::MemberValidator;
    use tempfile::TempDir;

    struct ListOnly(Vec<ArchiveMember>);

    impl ArchiveSource for ListOnly {
        fn list_members(&mut self) -> Result<Vec<ArchiveMember>> {
            Ok(self.0.clone())
        }

        fn extract_selected(&mut self, members: &ValidatedMemberSet, _dest: &DestDir) -> Result<usize> {
            Ok(members.len())
        }

        fn format_name(&self) -> &str {
            "test"
        }
    }

    #[test]
    fn test_trait_implementation() {
        let temp = TempDir::new().unwrap();
        let dest = DestDir::create(temp.path()).unwrap();
        let mut source = ListOnly(vec![ArchiveMember::file("a"), ArchiveMember::file("b")]);

        let members = source.list_members().unwrap();
        let set = MemberValidator::new(&dest).validate_all(&members).unwrap();
        assert_eq!(source.extract_selected(&set, &dest).unwrap(), 2);
        assert_eq!(source.format_name(), "test");
    }
}
