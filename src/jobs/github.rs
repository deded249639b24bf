//! A provisioning job for a profile in a GitHub repository.

use anyhow::Result;
use camino::Utf8PathBuf;

use crate::config;
use crate::github::GithubRepository;
use crate::spec::{Spec, SpecFile};
use crate::workspace::Workspace;

use super::{ProvisionerJob, SpecSource};

/// Resolves a spec by downloading and staging a GitHub repository branch.
pub struct GithubProfileSource {
    repository_url: String,
    branch: Option<String>,
    workspace_root: Option<Utf8PathBuf>,
}

impl GithubProfileSource {
    /// Creates a source over the given repository URL and optional branch.
    pub fn new(repository_url: impl Into<String>, branch: Option<String>) -> Self {
        Self {
            repository_url: repository_url.into(),
            branch,
            workspace_root: None,
        }
    }

    /// Overrides the workspace location (the configured default otherwise).
    #[must_use]
    pub fn with_workspace_root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    fn workspace(&self) -> Result<Workspace, crate::error::MacforgeError> {
        match &self.workspace_root {
            Some(root) => Workspace::at(root),
            None => Workspace::new(),
        }
    }
}

impl SpecSource for GithubProfileSource {
    fn resolve(&mut self) -> Result<Spec> {
        println!("{}", config::MSG_RETRIEVE_REMOTE_PROFILE);

        let repo = GithubRepository::parse(&self.repository_url)?;
        let mut workspace = self.workspace()?;
        workspace.add_repository(&repo, self.branch.as_deref())?;
        let spec_file = workspace.add_spec_file()?;

        println!("{}", config::MSG_SPEC_CREATED);
        println!("{}", spec_file);

        Ok(SpecFile::new(spec_file).load()?)
    }
}

/// A provisioning job for a profile in a GitHub repository.
pub type GitHubJob = ProvisionerJob<GithubProfileSource>;

impl GitHubJob {
    /// Creates a GitHub job for the given repository URL and branch.
    pub fn from_repository(url: impl Into<String>, branch: Option<String>) -> Self {
        Self::new(GithubProfileSource::new(url, branch))
    }
}
