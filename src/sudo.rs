//! Become-password acquisition.
//!
//! The password is taken from the environment when present, otherwise
//! prompted for and verified against `sudo -kS /bin/echo`, re-prompting
//! until verification succeeds. The accepted value lives only in composed
//! environment maps handed to child commands; the process environment is
//! never written back.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config;

/// The become (sudo) password handed to Ansible.
pub struct BecomePassword(String);

impl BecomePassword {
    /// Wraps an already-known password value.
    pub fn from_value(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Acquires the password: environment first, interactive prompt
    /// otherwise.
    ///
    /// Prompting loops until the entered password passes the sudo check;
    /// there is no retry cap.
    pub fn acquire() -> Result<Self> {
        if let Some(value) = std::env::var(config::ENV_ANSIBLE_BECOME_PASSWORD)
            .ok()
            .filter(|value| !value.is_empty())
        {
            debug!("become password taken from the environment");
            return Ok(Self(value));
        }

        loop {
            let candidate = rpassword::prompt_password(config::SUDO_PROMPT)
                .context("failed to read password from terminal")?;
            if verify(&candidate)? {
                return Ok(Self(candidate));
            }
        }
    }

    /// Returns the password value for environment composition.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BecomePassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BecomePassword(<redacted>)")
    }
}

/// Checks a candidate password by piping it to a no-op privileged command.
fn verify(candidate: &str) -> Result<bool> {
    let mut child = Command::new("sudo")
        .args(["-kS", "/bin/echo"])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("failed to spawn sudo check command")?;

    if let Some(mut stdin) = child.stdin.take() {
        // The child may exit before reading; a write failure here just
        // means the candidate fails verification.
        let _ = stdin.write_all(candidate.as_bytes());
        let _ = stdin.write_all(b"\n");
    }

    let status = child
        .wait()
        .context("failed to wait for sudo check command")?;
    Ok(status.success())
}
