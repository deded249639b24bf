//! Python interpreter discovery for the generated inventory.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::MacforgeError;

/// The local Python interpreter Ansible should use.
///
/// Discovery probes a short fixed list of conventional locations in order;
/// the first existing one wins.
#[derive(Debug, Clone)]
pub struct Interpreter {
    options: Vec<Utf8PathBuf>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self {
            options: vec![
                Utf8PathBuf::from("/usr/bin/python"),
                Utf8PathBuf::from("/usr/bin/python3"),
            ],
        }
    }
}

impl Interpreter {
    /// Creates an interpreter probe with an explicit candidate list.
    pub fn with_options(options: Vec<Utf8PathBuf>) -> Self {
        Self { options }
    }

    /// Returns the first existing candidate path.
    ///
    /// # Errors
    ///
    /// Returns [`MacforgeError::InterpreterNotFound`] when no candidate
    /// exists on this system.
    pub fn discover(&self) -> Result<&Utf8Path, MacforgeError> {
        self.options
            .iter()
            .find(|candidate| candidate.exists())
            .map(Utf8PathBuf::as_path)
            .ok_or(MacforgeError::InterpreterNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_fails_when_no_candidate_exists() {
        let interpreter = Interpreter::with_options(vec![
            Utf8PathBuf::from("/nonexistent/python"),
            Utf8PathBuf::from("/also/nonexistent/python3"),
        ]);
        assert!(matches!(
            interpreter.discover(),
            Err(MacforgeError::InterpreterNotFound)
        ));
    }

    #[test]
    fn discovery_returns_the_first_existing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Utf8PathBuf::from(dir.path().join("missing").to_str().unwrap());
        let present = Utf8PathBuf::from(dir.path().join("python3").to_str().unwrap());
        std::fs::write(&present, "").unwrap();

        let interpreter = Interpreter::with_options(vec![missing, present.clone()]);
        assert_eq!(interpreter.discover().unwrap(), present);
    }
}
