//! Toolstow CLI - Command-line utility for installing downloaded tool
//! artifacts.

mod cli;
mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::Install(args) => commands::install::execute(args, &*formatter),
        cli::Commands::Detect(args) => commands::detect::execute(args, &*formatter),
        cli::Commands::Resolve(args) => commands::resolve::execute(args, &*formatter),
    }
}
