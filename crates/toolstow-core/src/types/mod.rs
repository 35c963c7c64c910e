//! Type-safe wrappers for install operations.
//!
//! The safety-carrying types here can only be built through validation:
//!
//! - [`DestDir`]: created, canonical install directory
//! - [`SafePath`]: member name that passed the name and containment checks
//! - [`SafeLink`]: link member whose target stays inside the install directory
//!
//! None of them implement `From` for raw path types.

pub mod dest_dir;
pub mod member;
pub mod safe_path;
pub mod safe_symlink;

pub use dest_dir::DestDir;
pub use member::ArchiveMember;
pub use member::MemberKind;
pub use safe_path::SafePath;
pub use safe_symlink::LinkKind;
pub use safe_symlink::SafeLink;
