use anyhow::Result;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
pub struct Cli {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ensure a machine profile is ready to be applied
    Precheck {
        #[command(subcommand)]
        source: SourceCommands,
    },

    /// Apply a machine profile to this system
    Apply(ApplyArgs),

    /// Report the macforge version
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    #[command(subcommand)]
    pub source: SourceCommands,

    /// Do not run, just show what would be done
    #[arg(long, global = true)]
    pub dry_run: bool,
}

/// Where the machine profile comes from.
#[derive(Subcommand, Debug)]
pub enum SourceCommands {
    /// A profile in a local filesystem folder
    Folder(FolderArgs),

    /// A profile in a public GitHub repository
    Github(GithubArgs),

    /// An existing spec file referencing a staged profile
    Spec(SpecArgs),
}

#[derive(Args, Debug)]
pub struct FolderArgs {
    /// Path to a folder containing a machine profile
    pub path: Utf8PathBuf,
}

#[derive(Args, Debug)]
pub struct GithubArgs {
    /// URL of a GitHub repo containing a machine profile
    pub url: String,

    /// Specific branch (or tag) of the GitHub repo
    #[arg(long)]
    pub branch: Option<String>,
}

#[derive(Args, Debug)]
pub struct SpecArgs {
    /// Path to a spec.json file
    pub path: Utf8PathBuf,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn parse_args() -> Result<Cli> {
    Ok(Cli::parse())
}
