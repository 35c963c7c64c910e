//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;
use toolstow_core::InstallConfig;
use toolstow_core::ToolMetadata;

#[derive(Parser)]
#[command(name = "toolstow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install a downloaded artifact
    Install(InstallArgs),
    /// Show how an artifact would be installed
    Detect(DetectArgs),
    /// Print the directory a tool version installs into
    Resolve(ResolveArgs),
}

/// Tool identity shared by `install` and `resolve`.
#[derive(clap::Args)]
pub struct ToolArgs {
    /// Tool name
    #[arg(long)]
    pub name: String,

    /// Tool version
    #[arg(long = "version", value_name = "VERSION")]
    pub tool_version: String,

    /// Install into this directory instead of <root>/tools/<name>/<version>
    #[arg(long, value_name = "DIR")]
    pub install_path: Option<PathBuf>,

    /// Per-user root directory (default: ~/.provide-foundation)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

impl ToolArgs {
    pub fn metadata(&self) -> ToolMetadata {
        let mut meta = ToolMetadata::new(&self.name, &self.tool_version);
        meta.install_path.clone_from(&self.install_path);
        meta
    }

    pub fn config(&self) -> InstallConfig {
        self.root
            .as_ref()
            .map_or_else(InstallConfig::default, InstallConfig::with_root)
    }
}

#[derive(clap::Args)]
pub struct InstallArgs {
    /// Path to the downloaded artifact
    #[arg(value_name = "ARTIFACT")]
    pub artifact: PathBuf,

    #[command(flatten)]
    pub tool: ToolArgs,

    /// Name for the installed executable
    #[arg(long, value_name = "NAME")]
    pub executable_name: Option<String>,
}

#[derive(clap::Args)]
pub struct DetectArgs {
    /// Path to the artifact
    #[arg(value_name = "ARTIFACT")]
    pub artifact: PathBuf,
}

#[derive(clap::Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub tool: ToolArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_tool_args_metadata() {
        let cli = Cli::parse_from([
            "toolstow",
            "resolve",
            "--name",
            "foo",
            "--version",
            "1.0.0",
            "--install-path",
            "/custom/dir",
        ]);
        let Commands::Resolve(args) = cli.command else {
            panic!("expected resolve");
        };
        let meta = args.tool.metadata();
        assert_eq!(meta.name, "foo");
        assert_eq!(meta.version, "1.0.0");
        assert_eq!(meta.install_path.as_deref(), Some(Path::new("/custom/dir")));
    }

    #[test]
    fn test_root_flag_overrides_config() {
        let cli = Cli::parse_from([
            "toolstow", "resolve", "--name", "foo", "--version", "1", "--root", "/opt/tools",
        ]);
        let Commands::Resolve(args) = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(args.tool.config().root(), Path::new("/opt/tools"));
    }
}
