//! GitHub repository resolution and retrieval.
//!
//! This module provides [`GithubRepository`], which parses an HTTP or SSH
//! repository URL into its org/repo components, derives canonical URLs and
//! the zip-bundle download URL for a branch, and downloads and unpacks a
//! branch bundle into a destination directory.

use std::io::{Cursor, Read};
use std::sync::LazyLock;
use std::time::Duration;

use camino::Utf8Path;
use regex::Regex;
use tracing::{debug, info};

use crate::config;
use crate::error::MacforgeError;

static MATCH_HTTP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(config::GITHUB_HTTP_REGEX).expect("GITHUB_HTTP_REGEX must compile")
});

static MATCH_SSH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(config::GITHUB_SSH_REGEX).expect("GITHUB_SSH_REGEX must compile")
});

/// A parsed GitHub repository reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubRepository {
    org: String,
    repo: String,
}

impl GithubRepository {
    /// Parses an HTTP or SSH GitHub repository URL.
    ///
    /// The HTTP pattern is tried first, then the SSH pattern.
    ///
    /// # Errors
    ///
    /// Returns [`MacforgeError::InvalidRepository`] when neither pattern
    /// matches.
    pub fn parse(repository: &str) -> Result<Self, MacforgeError> {
        let captures = MATCH_HTTP
            .captures(repository)
            .or_else(|| MATCH_SSH.captures(repository))
            .ok_or_else(|| {
                tracing::error!("cannot parse a GitHub repository URL from: {}", repository);
                MacforgeError::InvalidRepository(repository.to_string())
            })?;

        // Both patterns carry the same named groups, so a match always has them.
        let org = captures.name("org").map(|m| m.as_str()).unwrap_or_default();
        let repo = captures.name("repo").map(|m| m.as_str()).unwrap_or_default();

        Ok(Self {
            org: org.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Returns the given branch name, or the default branch when none given.
    pub fn branch_name<'a>(&self, branch: Option<&'a str>) -> &'a str {
        branch.unwrap_or(config::GITHUB_DEFAULT_BRANCH)
    }

    /// Returns GitHub's name for the repository.
    pub fn repo_name(&self) -> &str {
        &self.repo
    }

    /// Returns the org (or user) name for the repository.
    pub fn org_name(&self) -> &str {
        &self.org
    }

    /// Returns the canonical HTTP URL for the repository.
    pub fn http_url(&self) -> String {
        format!("https://github.com/{}/{}.git", self.org, self.repo)
    }

    /// Returns the canonical SSH URL for the repository.
    pub fn ssh_url(&self) -> String {
        format!("git@github.com:{}/{}.git", self.org, self.repo)
    }

    /// Returns the zip bundle URL for the given branch.
    pub fn zip_bundle_url(&self, branch: Option<&str>) -> String {
        format!(
            "https://github.com/{}/{}/archive/refs/heads/{}.zip",
            self.org,
            self.repo,
            self.branch_name(branch)
        )
    }

    /// Returns the top-level folder name inside the branch's zip bundle.
    pub fn zip_bundle_root_folder(&self, branch: Option<&str>) -> String {
        format!("{}-{}", self.repo, self.branch_name(branch))
    }

    /// Downloads the branch's zip bundle and extracts its full contents
    /// into `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`MacforgeError::RemoteCommunication`] when the download
    /// fails at the transport level or with a non-success HTTP status, or
    /// when the retrieved bytes are not a readable zip bundle.
    pub fn download_zip_bundle(
        &self,
        destination: &Utf8Path,
        branch: Option<&str>,
    ) -> Result<(), MacforgeError> {
        let url = self.zip_bundle_url(branch);
        let bytes = fetch(&url)?;

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            MacforgeError::RemoteCommunication {
                url: url.clone(),
                message: format!("retrieved content is not a zip bundle: {}", e),
            }
        })?;
        archive
            .extract(destination.as_std_path())
            .map_err(|e| MacforgeError::RemoteCommunication {
                url: url.clone(),
                message: format!("failed to extract zip bundle: {}", e),
            })?;

        debug!("extracted zip bundle into: {}", destination);
        Ok(())
    }
}

/// Performs the HTTP GET of a zip bundle with a bounded timeout.
///
/// Non-2xx statuses surface as `ureq` errors and therefore map to
/// [`MacforgeError::RemoteCommunication`], same as transport failures.
fn fetch(url: &str) -> Result<Vec<u8>, MacforgeError> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(config::GITHUB_DOWNLOAD_TIMEOUT_SECS)))
        .build()
        .into();

    let response = agent.get(url).call().map_err(|e| {
        tracing::error!("cannot download '{}'", url);
        MacforgeError::RemoteCommunication {
            url: url.to_string(),
            message: e.to_string(),
        }
    })?;

    let mut bytes = Vec::new();
    response
        .into_body()
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| MacforgeError::RemoteCommunication {
            url: url.to_string(),
            message: format!("failed to read response body: {}", e),
        })?;

    info!("retrieved zip content from: {}", url);
    Ok(bytes)
}
