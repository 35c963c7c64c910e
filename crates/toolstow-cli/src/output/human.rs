//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use toolstow_core::ArtifactFormat;
use toolstow_core::InstallReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn describe_format(format: ArtifactFormat) -> &'static str {
        match format {
            ArtifactFormat::Zip => "zip archive",
            ArtifactFormat::TarFamily => "tar archive",
            ArtifactFormat::Binary => "single executable",
            ArtifactFormat::Unknown => "unknown",
        }
    }

    fn heading(&self, text: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {text}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(text);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_install_result(&self, report: &InstallReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.heading(&format!("Installed into {}", report.install_dir.display()));
        let _ = self.term.write_line(&format!(
            "  Format:      {}",
            Self::describe_format(report.format)
        ));
        let _ = self
            .term
            .write_line(&format!("  Members:     {}", report.members_extracted));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Executables: {}", report.executables_normalized));
            if let Some(link) = &report.latest_link {
                let _ = self
                    .term
                    .write_line(&format!("  Latest:      {}", link.display()));
            }
        }

        if report.has_warnings() {
            let _ = self.term.write_line("");
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                let _ = self.term.write_line("Warnings:");
            }
            for warning in &report.warnings {
                let _ = self.term.write_line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_detection(&self, artifact: &Path, format: ArtifactFormat) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        let _ = self.term.write_line(&format!(
            "{}: {}",
            artifact.display(),
            Self::describe_format(format)
        ));
        Ok(())
    }

    fn format_resolution(&self, install_dir: &Path) -> Result<()> {
        // Printed even when quiet: the path is the command's only output.
        let _ = self.term.write_line(&install_dir.display().to_string());
        Ok(())
    }
}
