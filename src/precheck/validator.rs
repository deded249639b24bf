//! Two-stage precheck validation.
//!
//! Stage one checks the declaration document itself: YAML syntax at
//! construction, document shape in [`PrecheckValidator::validate_config`].
//! Stage two ([`PrecheckValidator::validate_environment`]) checks the
//! environment for every declared variable, producing a report rather than
//! an error — violations gate the CLI, they are not exceptions.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::error::MacforgeError;

/// Error message for an unparseable or misshapen declaration document.
///
/// Shape violations reuse the syntax message; the two cases are not
/// distinguished in user-facing output.
const SYNTAX_ERROR: &str = "Invalid YAML syntax.";

static ENV_SCHEMA: LazyLock<serde_json::Value> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../schemas/env_v1.json"))
        .expect("embedded env_v1.json must parse")
});

/// One required-environment-variable declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrecheckDeclaration {
    /// The environment variable's name.
    pub name: String,
    /// Human-readable rationale for requiring it.
    pub description: String,
}

/// Result of validating the environment against the declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecheckReport {
    /// True iff `violations` is empty.
    pub is_valid: bool,
    /// One formatted message per missing variable, in declaration order.
    pub violations: Vec<String>,
}

/// Validator for a precheck environment declaration document.
#[derive(Debug)]
pub struct PrecheckValidator {
    document: serde_json::Value,
}

impl PrecheckValidator {
    /// Parses a raw YAML declaration document.
    ///
    /// # Errors
    ///
    /// Returns [`MacforgeError::PrecheckValidation`] when the text is not
    /// parseable YAML.
    pub fn new(raw_yaml: &str) -> Result<Self, MacforgeError> {
        let parsed: serde_yaml::Value = serde_yaml::from_str(raw_yaml)
            .map_err(|_| MacforgeError::PrecheckValidation(SYNTAX_ERROR.to_string()))?;
        let document = serde_json::to_value(&parsed)
            .map_err(|_| MacforgeError::PrecheckValidation(SYNTAX_ERROR.to_string()))?;
        Ok(Self { document })
    }

    /// Validates the parsed document's shape: a list of objects each with
    /// `name` and `description` string fields.
    pub fn validate_config(&self) -> Result<(), MacforgeError> {
        let validator = jsonschema::validator_for(&ENV_SCHEMA)
            .map_err(|_| MacforgeError::PrecheckValidation(SYNTAX_ERROR.to_string()))?;
        if !validator.is_valid(&self.document) {
            return Err(MacforgeError::PrecheckValidation(SYNTAX_ERROR.to_string()));
        }
        Ok(())
    }

    /// Validates the current process environment against the declarations.
    ///
    /// Presence only; variable contents are never checked.
    pub fn validate_environment(&self) -> Result<PrecheckReport, MacforgeError> {
        self.validate_environment_against(&std::env::vars().collect())
    }

    /// Validates an explicit environment snapshot against the declarations.
    ///
    /// Violations come out in declaration order, one fixed-template message
    /// per missing variable.
    pub fn validate_environment_against(
        &self,
        environment: &BTreeMap<String, String>,
    ) -> Result<PrecheckReport, MacforgeError> {
        let declarations: Vec<PrecheckDeclaration> =
            serde_json::from_value(self.document.clone())
                .map_err(|_| MacforgeError::PrecheckValidation(SYNTAX_ERROR.to_string()))?;

        let violations: Vec<String> = declarations
            .iter()
            .filter(|declaration| !environment.contains_key(&declaration.name))
            .map(|declaration| violation_message(declaration))
            .collect();

        Ok(PrecheckReport {
            is_valid: violations.is_empty(),
            violations,
        })
    }
}

fn violation_message(declaration: &PrecheckDeclaration) -> String {
    format!(
        "ERROR: environment variable {} is undefined.\nDESCRIPTION: {}\n",
        declaration.name, declaration.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_DOCUMENT: &str = concat!(
        "- name: JUMPCLOUD_CONNECT_KEY\n",
        "  description: The JumpCloud enrollment key for this machine.\n",
        "- name: HOMEBREW_GITHUB_API_TOKEN\n",
        "  description: A GitHub API token for Homebrew.\n",
    );

    fn environment(keys: &[&str]) -> BTreeMap<String, String> {
        keys.iter().map(|k| (k.to_string(), "set".to_string())).collect()
    }

    #[test]
    fn unparseable_yaml_is_a_syntax_error() {
        let result = PrecheckValidator::new("{unbalanced: [");
        match result {
            Err(MacforgeError::PrecheckValidation(message)) => {
                assert_eq!(message, "Invalid YAML syntax.");
            }
            other => panic!("expected PrecheckValidation, got: {:?}", other),
        }
    }

    #[test]
    fn valid_document_passes_config_validation() {
        let validator = PrecheckValidator::new(VALID_DOCUMENT).unwrap();
        assert!(validator.validate_config().is_ok());
    }

    #[test]
    fn wrong_shape_reuses_the_syntax_error_message() {
        // Well-formed YAML, but a mapping instead of a list.
        let validator = PrecheckValidator::new("name: X\ndescription: Y\n").unwrap();
        let err = validator.validate_config().unwrap_err();
        match err {
            MacforgeError::PrecheckValidation(message) => {
                assert_eq!(message, "Invalid YAML syntax.");
            }
            other => panic!("expected PrecheckValidation, got: {:?}", other),
        }
    }

    #[test]
    fn missing_field_fails_config_validation() {
        let validator = PrecheckValidator::new("- name: ONLY_A_NAME\n").unwrap();
        assert!(validator.validate_config().is_err());
    }

    #[test]
    fn fully_satisfied_environment_is_valid() {
        let validator = PrecheckValidator::new(VALID_DOCUMENT).unwrap();
        let report = validator
            .validate_environment_against(&environment(&[
                "JUMPCLOUD_CONNECT_KEY",
                "HOMEBREW_GITHUB_API_TOKEN",
            ]))
            .unwrap();
        assert!(report.is_valid);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn missing_variable_produces_the_fixed_template() {
        let validator = PrecheckValidator::new(VALID_DOCUMENT).unwrap();
        let report = validator
            .validate_environment_against(&environment(&["JUMPCLOUD_CONNECT_KEY"]))
            .unwrap();
        assert!(!report.is_valid);
        assert_eq!(
            report.violations,
            vec![
                "ERROR: environment variable HOMEBREW_GITHUB_API_TOKEN is undefined.\n\
                 DESCRIPTION: A GitHub API token for Homebrew.\n"
                    .to_string()
            ]
        );
    }

    #[test]
    fn violations_follow_declaration_order() {
        let validator = PrecheckValidator::new(VALID_DOCUMENT).unwrap();
        let report = validator.validate_environment_against(&environment(&[])).unwrap();
        assert_eq!(report.violations.len(), 2);
        assert!(report.violations[0].contains("JUMPCLOUD_CONNECT_KEY"));
        assert!(report.violations[1].contains("HOMEBREW_GITHUB_API_TOKEN"));
    }

    #[test]
    fn repeated_validation_is_deterministic() {
        let validator = PrecheckValidator::new(VALID_DOCUMENT).unwrap();
        let env = environment(&["HOMEBREW_GITHUB_API_TOKEN"]);
        let first = validator.validate_environment_against(&env).unwrap();
        let second = validator.validate_environment_against(&env).unwrap();
        assert_eq!(first, second);
    }
}
