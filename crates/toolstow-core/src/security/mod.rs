//! Security validation modules.

pub mod path;
pub mod validator;

// Re-export public types and functions
pub use path::PathResolver;
pub use path::is_within;
pub use validator::MemberValidator;
pub use validator::ValidatedKind;
pub use validator::ValidatedMember;
pub use validator::ValidatedMemberSet;
