//! Detect command implementation.

use crate::cli::DetectArgs;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use toolstow_core::classify;

pub fn execute(args: &DetectArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    if !args.artifact.is_file() {
        bail!("Artifact not found: {}", args.artifact.display());
    }

    formatter.format_detection(&args.artifact, classify(&args.artifact))
}
