//! Safe installation of downloaded tool artifacts.
//!
//! `toolstow-core` installs a zip archive, a tar archive (plain, gzip, bzip2
//! or xz) or a single executable into a versioned per-user layout:
//!
//! ```text
//! <home>/.provide-foundation/tools/<name>/<version>/[bin/<executable>]
//! <home>/.provide-foundation/tools/<name>/latest -> <version>
//! ```
//!
//! Archive members are untrusted. Every member is checked before anything is
//! written, and one unsafe member fails the whole install:
//!
//! - names that are absolute or contain `..` are rejected
//! - link targets that resolve outside the install directory are rejected
//! - member paths that resolve outside the install directory, through
//!   existing symlinks or links declared earlier in the same archive, are
//!   rejected
//!
//! # Examples
//!
//! ```no_run
//! use toolstow_core::{InstallConfig, Installer, ToolMetadata};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let installer = Installer::new(InstallConfig::default());
//! let meta = ToolMetadata::new("foo", "1.0.0");
//! let report = installer.install("foo-1.0.0.tar.gz".as_ref(), &meta)?;
//! println!("Installed into {}", report.install_dir.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod extraction;
pub mod finalize;
pub mod formats;
pub mod installer;
pub mod metadata;
pub mod report;
pub mod resolve;
pub mod security;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export main API types
pub use api::install_tool;
pub use config::InstallConfig;
pub use error::ErrorKind;
pub use error::InstallError;
pub use error::Result;
pub use formats::ArtifactFormat;
pub use formats::classify;
pub use installer::Installer;
pub use metadata::ToolMetadata;
pub use report::InstallReport;
pub use resolve::resolve_install_dir;

// Re-export types module for easier access
pub use types::DestDir;
pub use types::SafeLink;
pub use types::SafePath;
