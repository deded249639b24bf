//! Precheck — the pre-flight gate confirming the local environment
//! declares everything a profile's provisioning step will need.
//!
//! A profile carries two precheck inputs directly under its staged root:
//! free-form notes shown to the user, and a YAML document declaring the
//! environment variables provisioning requires.

pub mod validator;

use std::fs;

use crate::config;
use crate::error::MacforgeError;
use crate::spec::Spec;

pub use validator::{PrecheckReport, PrecheckValidator};

/// A profile's complete precheck contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecheckData {
    /// Free-form notes, printed verbatim after a passing precheck.
    pub notes: String,
    /// Raw YAML text of the environment declaration document.
    pub env: String,
}

/// Reads a profile's precheck files from the locations named by `spec`.
///
/// No caching; each call re-reads from disk.
pub fn read_precheck_data(spec: &Spec) -> Result<PrecheckData, MacforgeError> {
    let notes_path = spec.workspace_root_path.join(config::PRECHECK_NOTES_FILE);
    let env_path = spec.workspace_root_path.join(config::PRECHECK_ENV_FILE);

    Ok(PrecheckData {
        notes: fs::read_to_string(&notes_path)
            .map_err(|e| MacforgeError::io(notes_path.as_str(), e))?,
        env: fs::read_to_string(&env_path).map_err(|e| MacforgeError::io(env_path.as_str(), e))?,
    })
}
