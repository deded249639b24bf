//! The provisioning spec — the resolved set of absolute paths describing
//! where a staged profile's provisioning inputs live.
//!
//! A [`Spec`] is constructed once per job, either derived from a staged
//! profile's conventional directory layout ([`Spec::from_profile_root`],
//! pure path arithmetic, no existence checks) or loaded from a persisted
//! JSON document through [`SpecFile`], which schema-validates it first.

pub mod file;

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::MacforgeError;

pub use file::SpecFile;

/// Resolves a path to absolute form without touching the filesystem.
///
/// Relative paths are resolved against the current directory; existing
/// absolute paths pass through unchanged. Unlike `canonicalize`, the
/// target does not have to exist.
pub(crate) fn absolute_path(path: &Utf8Path) -> Result<Utf8PathBuf, MacforgeError> {
    let resolved = std::path::absolute(path.as_std_path())
        .map_err(|e| MacforgeError::io(format!("failed to resolve path: {}", path), e))?;
    Utf8PathBuf::from_path_buf(resolved).map_err(|p| {
        MacforgeError::io(
            format!("path is not valid UTF-8: {}", p.display()),
            io::Error::new(io::ErrorKind::InvalidData, "non-UTF-8 path"),
        )
    })
}

/// The resolved, validated description of a staged profile's layout.
///
/// Field names match the serialized JSON document exactly. All paths are
/// absolute at construction time; existence is checked later by consumers.
/// Immutable after construction within a single job run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    /// Root of the materialized profile.
    pub workspace_root_path: Utf8PathBuf,
    /// Subdirectory holding the provisioning inputs.
    pub profile_data_path: Utf8PathBuf,
    /// Ansible Galaxy requirements file.
    pub galaxy_requirements_file: Utf8PathBuf,
    /// Main playbook file.
    pub playbook: Utf8PathBuf,
    /// Role install targets. Never empty.
    pub roles_path: Vec<Utf8PathBuf>,
    /// Collection install targets. Never empty.
    pub collections_path: Vec<Utf8PathBuf>,
    /// Generated runtime inventory file.
    pub inventory: Utf8PathBuf,
}

impl Spec {
    /// Derives a spec from a staged profile root's conventional layout.
    ///
    /// Pure path joining; nothing is read from disk. `roles_path` and
    /// `collections_path` come out as single-element lists (the data model
    /// supports more for forward compatibility).
    pub fn from_profile_root(profile_root: &Utf8Path) -> Result<Self, MacforgeError> {
        let root = absolute_path(profile_root)?;
        let profile_data = root.join(config::PROFILE_FOLDER);

        Ok(Self {
            galaxy_requirements_file: profile_data.join(config::PROFILE_GALAXY_REQUIREMENTS_FILE),
            playbook: profile_data.join(config::PROFILE_INSTALLER_FILE),
            roles_path: vec![profile_data.join(config::PROFILE_ROLES_FOLDER)],
            collections_path: vec![profile_data.join(config::PROFILE_COLLECTIONS_FOLDER)],
            inventory: profile_data.join(config::PROFILE_INVENTORY_FILE),
            profile_data_path: profile_data,
            workspace_root_path: root,
        })
    }

    /// Returns the conventional location of the serialized spec file for
    /// this profile.
    pub fn spec_file_location(&self) -> Utf8PathBuf {
        self.workspace_root_path.join(config::SPEC_FILE_NAME)
    }
}
