//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use toolstow_core::ArtifactFormat;
use toolstow_core::InstallReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct InstallOutput {
    install_dir: String,
    format: &'static str,
    members_extracted: usize,
    executables_normalized: usize,
    latest_link: Option<String>,
    warnings: Vec<String>,
}

impl From<&InstallReport> for InstallOutput {
    fn from(report: &InstallReport) -> Self {
        Self {
            install_dir: report.install_dir.display().to_string(),
            format: report.format.name(),
            members_extracted: report.members_extracted,
            executables_normalized: report.executables_normalized,
            latest_link: report
                .latest_link
                .as_ref()
                .map(|link| link.display().to_string()),
            warnings: report.warnings.clone(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_install_result(&self, report: &InstallReport) -> Result<()> {
        Self::output(&JsonOutput::success("install", InstallOutput::from(report)))
    }

    fn format_detection(&self, artifact: &Path, format: ArtifactFormat) -> Result<()> {
        #[derive(Serialize)]
        struct DetectionOutput {
            artifact: String,
            format: &'static str,
        }

        let data = DetectionOutput {
            artifact: artifact.display().to_string(),
            format: format.name(),
        };
        Self::output(&JsonOutput::success("detect", data))
    }

    fn format_resolution(&self, install_dir: &Path) -> Result<()> {
        #[derive(Serialize)]
        struct ResolutionOutput {
            install_dir: String,
        }

        let data = ResolutionOutput {
            install_dir: install_dir.display().to_string(),
        };
        Self::output(&JsonOutput::success("resolve", data))
    }
}
