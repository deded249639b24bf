mod helpers;

use anyhow::Result;
use macforge::error::MacforgeError;
use macforge::precheck::{self, PrecheckValidator};
use macforge::spec::Spec;

use helpers::{create_profile_fixture, environment, utf8};

const ENV_DOCUMENT: &str = concat!(
    "- name: JUMPCLOUD_CONNECT_KEY\n",
    "  description: The JumpCloud enrollment key for this machine.\n",
);

#[test]
fn test_read_precheck_data_from_a_staged_profile() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let profile_root = create_profile_fixture(
        &utf8(dir.path()),
        "my-profile",
        ENV_DOCUMENT,
        "Read this before applying.\n",
    );

    let spec = Spec::from_profile_root(&profile_root)?;
    let data = precheck::read_precheck_data(&spec)?;

    assert_eq!(data.notes, "Read this before applying.\n");
    assert_eq!(data.env, ENV_DOCUMENT);

    Ok(())
}

#[test]
fn test_read_precheck_data_each_call_rereads_from_disk() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let profile_root =
        create_profile_fixture(&utf8(dir.path()), "my-profile", ENV_DOCUMENT, "old notes\n");
    let spec = Spec::from_profile_root(&profile_root)?;

    let first = precheck::read_precheck_data(&spec)?;
    std::fs::write(profile_root.join("__precheck__").join("notes.txt"), "new notes\n")?;
    let second = precheck::read_precheck_data(&spec)?;

    assert_eq!(first.notes, "old notes\n");
    assert_eq!(second.notes, "new notes\n");

    Ok(())
}

#[test]
fn test_read_precheck_data_missing_file_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let profile_root =
        create_profile_fixture(&utf8(dir.path()), "my-profile", ENV_DOCUMENT, "notes\n");
    std::fs::remove_file(profile_root.join("__precheck__").join("env.yml"))?;

    let spec = Spec::from_profile_root(&profile_root)?;
    let result = precheck::read_precheck_data(&spec);

    assert!(matches!(result, Err(MacforgeError::Io { .. })));

    Ok(())
}

#[test]
fn test_environment_validation_is_deterministic_across_calls() -> Result<()> {
    // Same declarations, same snapshot: identical violation lists.
    let document = concat!(
        "- name: FIRST_VARIABLE\n",
        "  description: first\n",
        "- name: SECOND_VARIABLE\n",
        "  description: second\n",
        "- name: THIRD_VARIABLE\n",
        "  description: third\n",
    );
    let validator = PrecheckValidator::new(document)?;
    let snapshot = environment(&["SECOND_VARIABLE"]);

    let reports: Vec<_> = (0..3)
        .map(|_| validator.validate_environment_against(&snapshot).unwrap())
        .collect();

    assert!(reports.iter().all(|r| r == &reports[0]));
    assert_eq!(reports[0].violations.len(), 2);
    assert!(reports[0].violations[0].contains("FIRST_VARIABLE"));
    assert!(reports[0].violations[1].contains("THIRD_VARIABLE"));

    Ok(())
}
