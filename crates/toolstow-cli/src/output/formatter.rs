//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use toolstow_core::ArtifactFormat;
use toolstow_core::InstallReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format install result
    fn format_install_result(&self, report: &InstallReport) -> Result<()>;

    /// Format detection result
    fn format_detection(&self, artifact: &Path, format: ArtifactFormat) -> Result<()>;

    /// Format resolved install directory
    fn format_resolution(&self, install_dir: &Path) -> Result<()>;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}
