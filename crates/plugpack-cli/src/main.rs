//! Plugpack CLI - Command-line build tool for QGIS-style desktop plugins.

mod cli;
mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use plugpack_core::ExclusionProfile;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let root = match &cli.project {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    match &cli.command {
        cli::Commands::Package(args) => {
            commands::package::execute(args, ExclusionProfile::Full, &root, &*formatter)
        }
        cli::Commands::PackageWithTests(args) => {
            commands::package::execute(args, ExclusionProfile::Minimal, &root, &*formatter)
        }
        cli::Commands::Install => commands::install::execute(&root, &*formatter),
        cli::Commands::Setup(args) => commands::setup::execute(args, &root, &*formatter),
        cli::Commands::Upload(args) => commands::upload::execute(args, &root, &*formatter),
        cli::Commands::Docs(args) => commands::docs::execute(args, &root, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}
