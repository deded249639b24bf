//! Provisioning jobs.
//!
//! A job pairs a [`SpecSource`] (how a spec is obtained: local folder,
//! GitHub repository, or an existing spec file) with the two operations
//! every variant shares: `precheck()` and `provision()`. Spec resolution
//! is memoized, so a job never downloads or copies its profile more than
//! once per instance.

pub mod folder;
pub mod github;
pub mod spec_file;
pub mod version;

use std::collections::BTreeMap;

use anyhow::{Context, Result};

use crate::ansible::{AnsibleRunner, InventoryFile, RunOutcome, environment};
use crate::config;
use crate::executor::CommandExecutor;
use crate::precheck::{self, PrecheckValidator};
use crate::spec::Spec;
use crate::sudo::BecomePassword;

pub use folder::{FolderJob, FolderProfileSource};
pub use github::{GitHubJob, GithubProfileSource};
pub use spec_file::{SpecFileJob, SpecFileSource};
pub use version::VersionJob;

/// How a spec is obtained for a job.
///
/// Implementations perform the full resolution (staging included) exactly
/// once; memoization lives in [`ProvisionerJob`].
pub trait SpecSource {
    /// Resolves a spec, staging the profile as needed.
    fn resolve(&mut self) -> Result<Spec>;
}

/// Result of a precheck run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrecheckOutcome {
    /// Every declared environment variable is present.
    Ready,
    /// One or more declared variables are missing; each violation has
    /// already been printed.
    Violations(Vec<String>),
}

/// A provisioning job over some spec source.
pub struct ProvisionerJob<S> {
    source: S,
    spec: Option<Spec>,
    environment: BTreeMap<String, String>,
    debug: bool,
    dry_run: bool,
}

impl<S: SpecSource> ProvisionerJob<S> {
    /// Creates a job, snapshotting the process environment it will
    /// validate against and compose from.
    pub fn new(source: S) -> Self {
        Self {
            source,
            spec: None,
            environment: std::env::vars().collect(),
            debug: false,
            dry_run: false,
        }
    }

    /// Replaces the environment snapshot.
    #[must_use]
    pub fn with_environment(mut self, environment: BTreeMap<String, String>) -> Self {
        self.environment = environment;
        self
    }

    /// Enables verbose external-tool output.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Skips filesystem writes and command execution during provisioning.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the job's spec, resolving it on first use.
    ///
    /// Subsequent calls reuse the cached value, so the underlying
    /// download/copy happens at most once per job instance.
    pub fn spec(&mut self) -> Result<&Spec> {
        if self.spec.is_none() {
            self.spec = Some(self.source.resolve()?);
        }
        self.spec.as_ref().context("spec resolution left no spec behind")
    }

    /// Validates the profile's precheck document and the environment.
    ///
    /// On violations, each one is printed on its own line and
    /// [`PrecheckOutcome::Violations`] is returned; the notes are never
    /// printed in that case. Otherwise the notes are printed verbatim
    /// (unless suppressed via `notes`) followed by a fixed success banner.
    pub fn precheck(&mut self, notes: bool) -> Result<PrecheckOutcome> {
        self.spec()?;
        let spec = self.spec.as_ref().context("spec resolution left no spec behind")?;

        let data = precheck::read_precheck_data(spec)?;
        let validator = PrecheckValidator::new(&data.env)?;
        validator.validate_config()?;

        let report = validator.validate_environment_against(&self.environment)?;
        if !report.is_valid {
            for violation in &report.violations {
                println!("{}", violation);
            }
            return Ok(PrecheckOutcome::Violations(report.violations));
        }

        if notes {
            println!("{}", data.notes);
        }
        println!("{}", config::MSG_PRECHECK_SUCCESS);
        Ok(PrecheckOutcome::Ready)
    }

    /// Writes the runtime inventory and runs the Ansible command sequence.
    ///
    /// A failing external command aborts the remaining sequence without
    /// raising; the outcome reports which command failed.
    pub fn provision(
        &mut self,
        executor: &dyn CommandExecutor,
        become_password: &BecomePassword,
    ) -> Result<RunOutcome> {
        self.spec()?;
        let spec = self.spec.as_ref().context("spec resolution left no spec behind")?;

        if self.dry_run {
            tracing::info!("dry run: skipping inventory write");
        } else {
            InventoryFile::new(spec).write()?;
        }

        let env = environment::compose(spec, &self.environment, become_password.expose());
        AnsibleRunner::new(spec, env, self.debug).start(executor)
    }
}
