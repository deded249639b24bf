//! The workspace — a disposable staging directory for profiles.
//!
//! One workspace exists per job invocation. Construction destructively
//! recreates the staging directory, so two concurrent invocations against
//! the same configured path are unsafe; the process owns it exclusively.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::config;
use crate::error::MacforgeError;
use crate::github::GithubRepository;
use crate::spec::{self, Spec, SpecFile};

/// A filesystem staging directory into which a profile is materialized.
#[derive(Debug)]
pub struct Workspace {
    root: Utf8PathBuf,
    profile_root: Option<Utf8PathBuf>,
    spec_file: Option<Utf8PathBuf>,
}

impl Workspace {
    /// Creates the workspace at the configured default location under the
    /// current directory.
    pub fn new() -> Result<Self, MacforgeError> {
        Self::at(Utf8Path::new(config::WORKSPACE_DIR))
    }

    /// Creates a workspace rooted at `root`.
    ///
    /// Any pre-existing directory at that path is deleted recursively, then
    /// recreated empty.
    pub fn at(root: &Utf8Path) -> Result<Self, MacforgeError> {
        let root = spec::absolute_path(root)?;

        if root.exists() {
            fs::remove_dir_all(&root)
                .map_err(|e| MacforgeError::io(format!("failed to clear workspace: {}", root), e))?;
        }
        fs::create_dir_all(&root)
            .map_err(|e| MacforgeError::io(format!("failed to create workspace: {}", root), e))?;

        let root = root
            .canonicalize_utf8()
            .map_err(|e| MacforgeError::io(format!("failed to resolve workspace: {}", root), e))?;
        debug!("workspace created at: {}", root);

        Ok(Self {
            root,
            profile_root: None,
            spec_file: None,
        })
    }

    /// Returns the workspace's root directory.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the staged profile's root, once a profile has been added.
    pub fn profile_root(&self) -> Option<&Utf8Path> {
        self.profile_root.as_deref()
    }

    /// Returns the generated spec file's location, once one has been written.
    pub fn spec_file(&self) -> Option<&Utf8Path> {
        self.spec_file.as_deref()
    }

    /// Recursively copies a local profile folder into the workspace under
    /// the source's base name.
    ///
    /// # Errors
    ///
    /// Returns [`MacforgeError::StagingCopy`] when the copy fails for any
    /// reason; the profile root stays unset in that case.
    pub fn add_folder(&mut self, source: &Utf8Path) -> Result<(), MacforgeError> {
        let source = spec::absolute_path(source)?;
        let name = source.file_name().ok_or_else(|| {
            MacforgeError::staging_copy(
                source.as_str(),
                io::Error::new(io::ErrorKind::InvalidInput, "source folder has no base name"),
            )
        })?;

        let destination = self.root.join(name);
        copy_dir_recursive(&source, &destination)
            .map_err(|e| MacforgeError::staging_copy(source.as_str(), e))?;

        debug!("staged local profile folder at: {}", destination);
        self.profile_root = Some(destination);
        Ok(())
    }

    /// Downloads a GitHub repository's branch bundle into the workspace and
    /// records the bundle's top-level folder as the profile root.
    pub fn add_repository(
        &mut self,
        repo: &GithubRepository,
        branch: Option<&str>,
    ) -> Result<(), MacforgeError> {
        repo.download_zip_bundle(&self.root, branch)?;

        let profile_root = self.root.join(repo.zip_bundle_root_folder(branch));
        debug!("attached GitHub repository to workspace: {}", profile_root);
        self.profile_root = Some(profile_root);
        Ok(())
    }

    /// Derives a spec from the staged profile's layout and persists it at
    /// the profile's conventional spec-file location.
    ///
    /// # Errors
    ///
    /// Returns [`MacforgeError::WorkspaceInvalid`] when no profile source
    /// has been added yet.
    pub fn add_spec_file(&mut self) -> Result<Utf8PathBuf, MacforgeError> {
        let profile_root = self.profile_root.as_deref().ok_or_else(|| {
            MacforgeError::WorkspaceInvalid("No profile source has been added.".to_string())
        })?;

        let spec = Spec::from_profile_root(profile_root)?;
        let location = spec.spec_file_location();
        SpecFile::new(location.clone()).write(&spec)?;

        debug!("wrote spec file to workspace: {}", location);
        self.spec_file = Some(location.clone());
        Ok(location)
    }
}

/// Copies `src` into `dest` recursively, creating directories as needed.
fn copy_dir_recursive(src: &Utf8Path, dest: &Utf8Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in src.read_dir_utf8()? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
