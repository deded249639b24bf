//! Composition of the Ansible runtime environment.
//!
//! The composed variables are returned as an explicit map and injected
//! into each command's [`crate::executor::CommandSpec`]; the process
//! environment itself is never mutated.

use std::collections::BTreeMap;

use camino::Utf8PathBuf;
use tracing::debug;

use crate::config;
use crate::spec::Spec;

/// Composes the environment for the Ansible command sequence.
///
/// Role and collection search paths from the spec are prepended to any
/// values inherited from `base`, and the become password is carried in
/// the variable the playbook command looks it up from.
pub fn compose(
    spec: &Spec,
    base: &BTreeMap<String, String>,
    become_password: &str,
) -> Vec<(String, String)> {
    debug!("composing Ansible runtime environment variables");

    vec![
        (
            config::ENV_ANSIBLE_ROLES_PATH.to_string(),
            prepend_paths(&spec.roles_path, base.get(config::ENV_ANSIBLE_ROLES_PATH)),
        ),
        (
            config::ENV_ANSIBLE_COLLECTIONS_PATH.to_string(),
            prepend_paths(
                &spec.collections_path,
                base.get(config::ENV_ANSIBLE_COLLECTIONS_PATH),
            ),
        ),
        (
            config::ENV_ANSIBLE_BECOME_PASSWORD.to_string(),
            become_password.to_string(),
        ),
    ]
}

/// Joins spec paths ahead of an inherited `:`-separated value.
fn prepend_paths(paths: &[Utf8PathBuf], inherited: Option<&String>) -> String {
    let mut parts: Vec<&str> = paths.iter().map(|p| p.as_str()).collect();
    if let Some(inherited) = inherited {
        parts.extend(inherited.split(':'));
    }
    parts.join(":")
}
