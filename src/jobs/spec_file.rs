//! A provisioning job for an existing spec file on the local filesystem.

use anyhow::Result;
use camino::Utf8PathBuf;

use crate::spec::{Spec, SpecFile};

use super::{ProvisionerJob, SpecSource};

/// Resolves a spec by loading an existing spec file — no staging; the file
/// already points at a materialized profile layout.
pub struct SpecFileSource {
    path: Utf8PathBuf,
}

impl SpecFileSource {
    /// Creates a source over the given spec file path.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SpecSource for SpecFileSource {
    fn resolve(&mut self) -> Result<Spec> {
        Ok(SpecFile::new(self.path.clone()).load()?)
    }
}

/// A provisioning job for an existing spec file.
pub type SpecFileJob = ProvisionerJob<SpecFileSource>;

impl SpecFileJob {
    /// Creates a spec-file job for the given path.
    pub fn from_spec_file(path: impl Into<Utf8PathBuf>) -> Self {
        Self::new(SpecFileSource::new(path))
    }
}
