//! Install command implementation.

use crate::cli::InstallArgs;
use crate::error::add_artifact_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use log::info;
use toolstow_core::Installer;

pub fn execute(args: &InstallArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let mut metadata = args.tool.metadata();
    metadata.executable_name.clone_from(&args.executable_name);

    info!(
        "installing {} {} from {}",
        metadata.name,
        metadata.version,
        args.artifact.display()
    );

    let installer = Installer::new(args.tool.config());
    let report = add_artifact_context(
        installer.install(&args.artifact, &metadata),
        &args.artifact,
    )?;

    formatter.format_install_result(&report)?;

    Ok(())
}
