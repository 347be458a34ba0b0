//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plugpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root containing plugpack.toml (default: current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub project: Option<PathBuf>,

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
    /// Create a release package with tests and scaffolding excluded
    Package(PackageArgs),
    /// Create a package that keeps the test suite
    #[command(name = "package-with-tests")]
    PackageWithTests(PackageArgs),
    /// Link the plugin into the host application's plugin directory
    Install,
    /// Install runtime and test dependencies from requirements.txt
    Setup(SetupArgs),
    /// Package the plugin and upload it to the plugin repository
    Upload(UploadArgs),
    /// Build the plugin documentation
    Docs(DocsArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct PackageArgs {
    /// Directory to write the archive into (default: from plugpack.toml)
    #[arg(long, value_name = "DIR")]
    pub package_dir: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct SetupArgs {
    /// Remove previously installed dependencies first
    #[arg(short, long)]
    pub clean: bool,

    /// Leave editable requirements as local checkouts
    #[arg(short, long)]
    pub develop: bool,
}

#[derive(clap::Args)]
pub struct UploadArgs {
    /// Repository user name
    #[arg(short, long, value_name = "NAME")]
    pub user: String,

    /// Repository password
    #[arg(short, long, value_name = "PASSWD")]
    pub passwd: String,

    /// Override the repository host
    #[arg(short, long, value_name = "HOST")]
    pub server: Option<String>,

    /// Override the repository port
    #[arg(short = 't', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Override the XML-RPC endpoint path
    #[arg(short, long = "end-point", value_name = "PATH")]
    pub end_point: Option<String>,

    /// Override the URL scheme (http or https)
    #[arg(long, value_name = "SCHEME")]
    pub protocol: Option<String>,
}

#[derive(clap::Args)]
pub struct DocsArgs {
    /// Remove the build directory before building
    #[arg(short, long)]
    pub clean: bool,

    /// Override the sphinx html_theme for this build
    #[arg(short = 's', long, value_name = "THEME")]
    pub sphinx_theme: Option<String>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
