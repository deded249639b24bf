//! Load/save wrapper around a spec's JSON serialization.
//!
//! [`SpecFile`] owns the schema-validation step: `load()` collects every
//! schema violation (not just the first), sorts them alphabetically and
//! raises them as one [`MacforgeError::SpecValidation`].

use std::fs;
use std::sync::LazyLock;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::MacforgeError;

static SPEC_SCHEMA: LazyLock<serde_json::Value> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../schemas/spec_v1.json"))
        .expect("embedded spec_v1.json must parse")
});

/// A spec's location on disk, with load and write operations.
#[derive(Debug, Clone)]
pub struct SpecFile {
    path: Utf8PathBuf,
}

impl SpecFile {
    /// Creates a wrapper for the spec file at `path`.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the wrapped path.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Reads the JSON document at the wrapped path, schema-validates it and
    /// constructs a [`super::Spec`].
    ///
    /// # Errors
    ///
    /// Returns [`MacforgeError::Io`] when the file cannot be read and
    /// [`MacforgeError::SpecValidation`] when the document is not valid
    /// JSON or violates the spec schema. Validation errors carry every
    /// violation message, sorted alphabetically.
    pub fn load(&self) -> Result<super::Spec, MacforgeError> {
        debug!("loading runtime state from spec file: {}", self.path);

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| MacforgeError::io(self.path.as_str(), e))?;
        let document: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            MacforgeError::SpecValidation(vec![format!("invalid JSON document: {}", e)])
        })?;

        validate_spec_document(&document)?;

        let spec = serde_json::from_value(document)
            .map_err(|e| MacforgeError::SpecValidation(vec![e.to_string()]))?;
        debug!("runtime state has been built");
        Ok(spec)
    }

    /// Serializes `spec` as JSON to the wrapped path.
    pub fn write(&self, spec: &super::Spec) -> Result<(), MacforgeError> {
        debug!("saving runtime state as spec file: {}", self.path);

        let json = serde_json::to_string(spec)
            .map_err(|e| MacforgeError::SpecValidation(vec![e.to_string()]))?;
        fs::write(&self.path, json).map_err(|e| MacforgeError::io(self.path.as_str(), e))
    }
}

/// Validates a JSON document against the spec schema, collecting all
/// violation messages and sorting them alphabetically.
pub(crate) fn validate_spec_document(document: &serde_json::Value) -> Result<(), MacforgeError> {
    let validator = jsonschema::validator_for(&SPEC_SCHEMA)
        .map_err(|e| MacforgeError::SpecValidation(vec![e.to_string()]))?;

    let mut errors: Vec<String> = validator
        .iter_errors(document)
        .map(|e| e.to_string())
        .collect();
    if !errors.is_empty() {
        errors.sort();
        tracing::error!("the loaded spec file is invalid");
        return Err(MacforgeError::SpecValidation(errors));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_document() -> serde_json::Value {
        json!({
            "workspace_root_path": "/workspace/repo-master",
            "profile_data_path": "/workspace/repo-master/profile",
            "galaxy_requirements_file": "/workspace/repo-master/profile/requirements.yml",
            "playbook": "/workspace/repo-master/profile/install.yml",
            "roles_path": ["/workspace/repo-master/profile/roles"],
            "collections_path": ["/workspace/repo-master/profile/collections"],
            "inventory": "/workspace/repo-master/profile/inventory",
        })
    }

    #[test]
    fn valid_document_passes() {
        assert!(validate_spec_document(&valid_document()).is_ok());
    }

    #[test]
    fn missing_required_fields_are_all_reported_sorted() {
        let mut document = valid_document();
        document.as_object_mut().unwrap().remove("roles_path");
        document.as_object_mut().unwrap().remove("collections_path");

        let err = validate_spec_document(&document).unwrap_err();
        match err {
            MacforgeError::SpecValidation(errors) => {
                assert_eq!(errors.len(), 2);
                // Alphabetical: collections_path before roles_path.
                assert!(errors[0].contains("collections_path"));
                assert!(errors[1].contains("roles_path"));
                let mut sorted = errors.clone();
                sorted.sort();
                assert_eq!(errors, sorted);
            }
            other => panic!("expected SpecValidation, got: {:?}", other),
        }
    }

    #[test]
    fn empty_path_list_is_rejected() {
        let mut document = valid_document();
        document["roles_path"] = json!([]);
        let err = validate_spec_document(&document).unwrap_err();
        assert!(matches!(err, MacforgeError::SpecValidation(_)));
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let mut document = valid_document();
        document["playbook"] = json!(42);
        let err = validate_spec_document(&document).unwrap_err();
        assert!(matches!(err, MacforgeError::SpecValidation(_)));
    }
}
