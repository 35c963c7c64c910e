//! Install operation reporting.

use std::path::PathBuf;

use crate::formats::ArtifactFormat;

/// Report of a successful install.
///
/// Best-effort steps that failed are listed in `warnings`; their failure
/// never turns an install into an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Directory the tool was installed into.
    pub install_dir: PathBuf,

    /// Format the artifact was classified as.
    pub format: ArtifactFormat,

    /// Number of archive members written (1 for a binary artifact).
    pub members_extracted: usize,

    /// Number of files whose mode was set to `0755`.
    pub executables_normalized: usize,

    /// The `latest` link, when one was published.
    pub latest_link: Option<PathBuf>,

    /// One message per best-effort step that failed.
    pub warnings: Vec<String>,
}

impl InstallReport {
    /// Creates a report with nothing recorded yet.
    #[must_use]
    pub fn new(install_dir: PathBuf, format: ArtifactFormat) -> Self {
        Self {
            install_dir,
            format,
            members_extracted: 0,
            executables_normalized: 0,
            latest_link: None,
            warnings: Vec::new(),
        }
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
