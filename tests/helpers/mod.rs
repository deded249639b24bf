use std::collections::BTreeMap;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::sync::Mutex;

use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use macforge::executor::{CommandExecutor, CommandSpec, ExecutionResult};

/// Converts a `std::path::Path` (e.g. from tempfile) into a UTF-8 path.
#[allow(dead_code)]
pub fn utf8(path: &std::path::Path) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path.to_path_buf()).expect("test paths must be UTF-8")
}

/// Creates a conventional profile layout under `root`, returning the
/// profile root.
///
/// The layout matches what a staged profile looks like: provisioning
/// inputs under `profile/`, precheck inputs under `__precheck__/`.
#[allow(dead_code)]
pub fn create_profile_fixture(
    root: &Utf8Path,
    name: &str,
    env_yaml: &str,
    notes: &str,
) -> Utf8PathBuf {
    let profile_root = root.join(name);
    let data = profile_root.join("profile");

    std::fs::create_dir_all(data.join("roles")).unwrap();
    std::fs::create_dir_all(data.join("collections")).unwrap();
    std::fs::create_dir_all(profile_root.join("__precheck__")).unwrap();

    std::fs::write(data.join("requirements.yml"), "roles: []\ncollections: []\n").unwrap();
    std::fs::write(data.join("install.yml"), "- hosts: all\n  tasks: []\n").unwrap();
    std::fs::write(profile_root.join("__precheck__").join("notes.txt"), notes).unwrap();
    std::fs::write(profile_root.join("__precheck__").join("env.yml"), env_yaml).unwrap();

    profile_root
}

/// Builds an environment snapshot from the given variable names.
#[allow(dead_code)]
pub fn environment(keys: &[&str]) -> BTreeMap<String, String> {
    keys.iter().map(|k| (k.to_string(), "set".to_string())).collect()
}

/// A recording command executor with an optional scripted failure.
///
/// Every executed spec is recorded; the call at `fail_on` (zero-based)
/// reports a non-zero exit status.
#[allow(dead_code)]
pub struct MockExecutor {
    recorded: Mutex<Vec<CommandSpec>>,
    fail_on: Option<usize>,
}

#[allow(dead_code)]
impl MockExecutor {
    pub fn new() -> Self {
        Self {
            recorded: Mutex::new(Vec::new()),
            fail_on: None,
        }
    }

    pub fn failing_on(index: usize) -> Self {
        Self {
            recorded: Mutex::new(Vec::new()),
            fail_on: Some(index),
        }
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.recorded.lock().unwrap().clone()
    }
}

impl CommandExecutor for MockExecutor {
    fn execute(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
        let mut recorded = self.recorded.lock().unwrap();
        let index = recorded.len();
        recorded.push(spec.clone());

        // Raw wait status: 0 is success, 256 decodes to exit code 1.
        let raw = if self.fail_on == Some(index) { 256 } else { 0 };
        Ok(ExecutionResult {
            status: Some(ExitStatus::from_raw(raw)),
        })
    }
}
