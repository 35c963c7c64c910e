//! Validate-then-extract engine shared by every archive format.

use log::debug;

use crate::Result;
use crate::formats::ArchiveSource;
use crate::security::MemberValidator;
use crate::types::DestDir;

/// Lists, validates, and extracts an archive into `dest`.
///
/// Every member is validated before anything is written: a single unsafe
/// member fails the whole archive and leaves `dest` untouched. Returns the
/// number of members written.
///
/// # Errors
///
/// Returns the validation error of the first unsafe member, or an error
/// from reading the archive or writing a member.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use toolstow_core::extraction::extract_validated;
/// use toolstow_core::formats::TarSource;
/// use toolstow_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("/tmp/tools/foo/1.0.0")?;
/// let mut source = TarSource::new(Path::new("foo-1.0.0.tar.gz"));
/// let written = extract_validated(&mut source, &dest)?;
/// println!("wrote {written} members");
/// # Ok(())
/// # }
/// ```
pub fn extract_validated(source: &mut dyn ArchiveSource, dest: &DestDir) -> Result<usize> {
    let members = source.list_members()?;
    debug!(
        "validating {} {} members against {}",
        members.len(),
        source.format_name(),
        dest.as_path().display()
    );

    let validated = MemberValidator::new(dest).validate_all(&members)?;
    let written = source.extract_selected(&validated, dest)?;

    debug!("extracted {written} members");
    Ok(written)
}
