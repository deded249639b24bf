//! Fixed configuration values for macforge.
//!
//! Paths, URL patterns, environment variable names and user-facing
//! messages live here so the rest of the crate never hard-codes them.

/// Environment variable holding the become (sudo) password for Ansible.
pub const ENV_ANSIBLE_BECOME_PASSWORD: &str = "ANSIBLE_BECOME_PASSWORD";

/// Environment variable listing Ansible role search paths.
pub const ENV_ANSIBLE_ROLES_PATH: &str = "ANSIBLE_ROLES_PATH";

/// Environment variable listing Ansible collection search paths.
pub const ENV_ANSIBLE_COLLECTIONS_PATH: &str = "ANSIBLE_COLLECTIONS_PATH";

/// Pattern matching the HTTP form of a GitHub repository URL.
///
/// Named captures `org` and `repo`; the repo capture excludes a
/// trailing `.git` suffix.
pub const GITHUB_HTTP_REGEX: &str =
    r"(?i)^https?://github\.com/(?P<org>.+)/(?P<repo>[^.]+)(\.git)?";

/// Pattern matching the SSH form of a GitHub repository URL.
pub const GITHUB_SSH_REGEX: &str = r"(?i)^git@github\.com:(?P<org>.+)/(?P<repo>[^.]+)(\.git)?";

/// Branch used when no branch is given on the command line.
pub const GITHUB_DEFAULT_BRANCH: &str = "master";

/// Timeout in seconds for downloading a repository zip bundle.
pub const GITHUB_DOWNLOAD_TIMEOUT_SECS: u64 = 10;

/// Name of the staging directory, created under the current directory.
pub const WORKSPACE_DIR: &str = "installer.workspace";

/// Subdirectory of a profile holding the provisioning inputs.
pub const PROFILE_FOLDER: &str = "profile";

/// Main playbook file inside the profile data directory.
pub const PROFILE_INSTALLER_FILE: &str = "install.yml";

/// Ansible Galaxy requirements file inside the profile data directory.
pub const PROFILE_GALAXY_REQUIREMENTS_FILE: &str = "requirements.yml";

/// Generated runtime inventory file inside the profile data directory.
pub const PROFILE_INVENTORY_FILE: &str = "inventory";

/// Roles install target inside the profile data directory.
pub const PROFILE_ROLES_FOLDER: &str = "roles";

/// Collections install target inside the profile data directory.
pub const PROFILE_COLLECTIONS_FOLDER: &str = "collections";

/// Precheck notes file, relative to the staged profile root.
pub const PRECHECK_NOTES_FILE: &str = "__precheck__/notes.txt";

/// Precheck environment declaration file, relative to the staged profile root.
pub const PRECHECK_ENV_FILE: &str = "__precheck__/env.yml";

/// Name of the serialized spec file inside a staged profile.
pub const SPEC_FILE_NAME: &str = "spec.json";

/// Prompt shown when asking for the sudo password.
pub const SUDO_PROMPT: &str = "Please enter the SUDO password for your Mac: ";

pub const MSG_LOAD_FOLDER_PROFILE: &str = "--- Loading Folder Profile ---";
pub const MSG_RETRIEVE_REMOTE_PROFILE: &str = "--- Retrieving Remote Profile ---";
pub const MSG_SPEC_CREATED: &str = "--- Job Spec Created ---";
pub const MSG_PRECHECK_SUCCESS: &str = "--- Precheck Passed: this profile is ready to apply ---";
pub const MSG_INSTALL_ROLES: &str = "--- Installing Profile Roles ---";
pub const MSG_INSTALL_COLLECTIONS: &str = "--- Installing Profile Collections ---";
pub const MSG_INVOKE_ANSIBLE: &str = "--- Invoking Ansible Runner ---";
pub const MSG_ANSIBLE_ERROR: &str = "ANSIBLE ERROR: Non zero exit code.";
