use anyhow::Result;
use macforge::error::MacforgeError;
use macforge::github::GithubRepository;

#[test]
fn test_zip_bundle_derivation_for_default_branch() -> Result<()> {
    // A `.git`-suffixed HTTP URL with no branch resolves to the master
    // bundle and its conventional extraction root.
    let repo = GithubRepository::parse("https://github.com/org/repo.git")?;

    assert_eq!(
        repo.zip_bundle_url(None),
        "https://github.com/org/repo/archive/refs/heads/master.zip"
    );
    assert_eq!(repo.zip_bundle_root_folder(None), "repo-master");

    Ok(())
}

#[test]
fn test_zip_bundle_derivation_for_named_branch() -> Result<()> {
    let repo = GithubRepository::parse("git@github.com:org/repo.git")?;

    assert_eq!(
        repo.zip_bundle_url(Some("develop")),
        "https://github.com/org/repo/archive/refs/heads/develop.zip"
    );
    assert_eq!(repo.zip_bundle_root_folder(Some("develop")), "repo-develop");

    Ok(())
}

#[test]
fn test_http_and_ssh_forms_parse_to_the_same_repository() -> Result<()> {
    let from_http = GithubRepository::parse("https://github.com/org/repo.git")?;
    let from_ssh = GithubRepository::parse("git@github.com:org/repo.git")?;

    assert_eq!(from_http, from_ssh);
    assert_eq!(from_http.http_url(), "https://github.com/org/repo.git");
    assert_eq!(from_http.ssh_url(), "git@github.com:org/repo.git");

    Ok(())
}

#[test]
fn test_unparseable_url_is_rejected() {
    let result = GithubRepository::parse("ftp://github.com/org/repo");
    assert!(matches!(result, Err(MacforgeError::InvalidRepository(_))));
}

// Requires network access; run with `cargo test -- --ignored` when online.
#[test]
#[ignore]
fn test_download_from_unroutable_host_is_a_communication_error() {
    let repo = GithubRepository::parse("https://github.com/org/this-repo-does-not-exist").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let dest = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

    let result = repo.download_zip_bundle(&dest, None);
    assert!(matches!(result, Err(MacforgeError::RemoteCommunication { .. })));
}
