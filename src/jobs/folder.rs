//! A provisioning job for a profile in a local filesystem folder.

use anyhow::Result;
use camino::Utf8PathBuf;

use crate::config;
use crate::spec::{Spec, SpecFile};
use crate::workspace::Workspace;

use super::{ProvisionerJob, SpecSource};

/// Resolves a spec by staging a local profile folder.
pub struct FolderProfileSource {
    folder: Utf8PathBuf,
    workspace_root: Option<Utf8PathBuf>,
}

impl FolderProfileSource {
    /// Creates a source over the given profile folder.
    pub fn new(folder: impl Into<Utf8PathBuf>) -> Self {
        Self {
            folder: folder.into(),
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

impl SpecSource for FolderProfileSource {
    fn resolve(&mut self) -> Result<Spec> {
        println!("{}", config::MSG_LOAD_FOLDER_PROFILE);

        let mut workspace = self.workspace()?;
        workspace.add_folder(&self.folder)?;
        let spec_file = workspace.add_spec_file()?;

        Ok(SpecFile::new(spec_file).load()?)
    }
}

/// A provisioning job for a profile in a local folder.
pub type FolderJob = ProvisionerJob<FolderProfileSource>;

impl FolderJob {
    /// Creates a folder job for the given profile path.
    pub fn from_folder(folder: impl Into<Utf8PathBuf>) -> Self {
        Self::new(FolderProfileSource::new(folder))
    }
}
