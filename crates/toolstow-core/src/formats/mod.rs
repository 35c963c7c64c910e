//! Artifact formats: detection, archive sources, and binary copies.

pub mod binary;
pub(crate) mod common;
pub mod compression;
pub mod detect;
pub mod tar;
pub mod traits;
pub mod zip;

pub use binary::install_binary;
pub use compression::TarCompression;
pub use detect::ArtifactFormat;
pub use detect::classify;
pub use tar::TarSource;
pub use traits::ArchiveSource;
pub use zip::ZipSource;
