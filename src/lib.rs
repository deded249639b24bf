pub mod ansible;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod github;
pub mod jobs;
pub mod precheck;
pub mod spec;
pub mod sudo;
pub mod workspace;

use anyhow::{Context, Result};
use clap::CommandFactory;
use tracing_subscriber::{FmtSubscriber, filter::LevelFilter};

use crate::ansible::RunOutcome;
use crate::executor::RealCommandExecutor;
use crate::jobs::{
    FolderJob, GitHubJob, PrecheckOutcome, ProvisionerJob, SpecFileJob, SpecSource, VersionJob,
};
use crate::sudo::BecomePassword;

/// Exit code for a fully successful invocation.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when precheck finds environment violations.
pub const EXIT_PRECHECK_FAILED: i32 = 1;
/// Exit code when an external Ansible command exits non-zero.
pub const EXIT_EXTERNAL_TOOL_FAILED: i32 = 2;

pub fn init_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(filter).finish(),
    )
    .context("failed to set global default tracing subscriber")
}

/// Dispatches a parsed CLI invocation and returns the process exit code.
///
/// All outcome-to-exit-code mapping happens here; jobs report typed
/// outcomes instead of exiting from the middle of the workflow.
pub fn run(args: cli::Cli) -> Result<i32> {
    match args.command {
        cli::Commands::Precheck { source } => match source {
            cli::SourceCommands::Folder(opts) => {
                run_precheck(FolderJob::from_folder(opts.path).with_debug(args.debug))
            }
            cli::SourceCommands::Github(opts) => run_precheck(
                GitHubJob::from_repository(opts.url, opts.branch).with_debug(args.debug),
            ),
            cli::SourceCommands::Spec(opts) => {
                run_precheck(SpecFileJob::from_spec_file(opts.path).with_debug(args.debug))
            }
        },
        cli::Commands::Apply(opts) => match opts.source {
            cli::SourceCommands::Folder(source) => run_apply(
                FolderJob::from_folder(source.path),
                args.debug,
                opts.dry_run,
            ),
            cli::SourceCommands::Github(source) => run_apply(
                GitHubJob::from_repository(source.url, source.branch),
                args.debug,
                opts.dry_run,
            ),
            cli::SourceCommands::Spec(source) => run_apply(
                SpecFileJob::from_spec_file(source.path),
                args.debug,
                opts.dry_run,
            ),
        },
        cli::Commands::Version => {
            VersionJob.invoke();
            Ok(EXIT_SUCCESS)
        }
        cli::Commands::Completions(opts) => {
            clap_complete::generate(
                opts.shell,
                &mut cli::Cli::command(),
                env!("CARGO_PKG_NAME"),
                &mut std::io::stdout(),
            );
            Ok(EXIT_SUCCESS)
        }
    }
}

fn run_precheck<S: SpecSource>(mut job: ProvisionerJob<S>) -> Result<i32> {
    match job.precheck(true)? {
        PrecheckOutcome::Ready => Ok(EXIT_SUCCESS),
        PrecheckOutcome::Violations(_) => Ok(EXIT_PRECHECK_FAILED),
    }
}

fn run_apply<S: SpecSource>(job: ProvisionerJob<S>, debug: bool, dry_run: bool) -> Result<i32> {
    let mut job = job.with_debug(debug).with_dry_run(dry_run);

    // Notes are suppressed here; precheck already printed them when the
    // user ran the standalone precheck command.
    if let PrecheckOutcome::Violations(_) = job.precheck(false)? {
        return Ok(EXIT_PRECHECK_FAILED);
    }

    let become_password = if dry_run {
        BecomePassword::from_value("")
    } else {
        BecomePassword::acquire()?
    };

    let executor = RealCommandExecutor { dry_run };
    match job.provision(&executor, &become_password)? {
        RunOutcome::Completed => Ok(EXIT_SUCCESS),
        RunOutcome::Aborted { .. } => Ok(EXIT_EXTERNAL_TOOL_FAILED),
    }
}
