//! Resolve command implementation.

use crate::cli::ResolveArgs;
use crate::output::OutputFormatter;
use anyhow::Result;
use toolstow_core::resolve_install_dir;

pub fn execute(args: &ResolveArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let install_dir = resolve_install_dir(&args.tool.metadata(), &args.tool.config());
    formatter.format_resolution(&install_dir)
}
