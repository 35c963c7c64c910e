//! Best-effort steps that run after the payload is in place.
//!
//! Failures here are reported by the installer as warnings and never undo
//! an install.

pub mod latest;
pub mod permissions;

pub use latest::publish_latest;
pub use permissions::normalize_permissions;
