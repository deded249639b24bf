//! Generated runtime inventory file.

use std::fs;

use tracing::debug;

use crate::error::MacforgeError;
use crate::spec::Spec;

use super::Interpreter;

/// Writer for the fixed-format local-execution inventory artifact.
pub struct InventoryFile<'a> {
    spec: &'a Spec,
    interpreter: Interpreter,
}

impl<'a> InventoryFile<'a> {
    /// Creates an inventory writer for `spec` with the default interpreter
    /// probe list.
    pub fn new(spec: &'a Spec) -> Self {
        Self {
            spec,
            interpreter: Interpreter::default(),
        }
    }

    /// Overrides the interpreter probe.
    #[must_use]
    pub fn with_interpreter(mut self, interpreter: Interpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Writes the inventory file to the location named by the spec.
    ///
    /// If the target file already exists this is a no-op: re-running never
    /// overwrites a hand-edited inventory. Parent directories are created
    /// as needed.
    pub fn write(&self) -> Result<(), MacforgeError> {
        if self.spec.inventory.exists() {
            debug!("inventory already present at: {}", self.spec.inventory);
            return Ok(());
        }

        let interpreter = self.interpreter.discover()?;

        fs::create_dir_all(&self.spec.profile_data_path).map_err(|e| {
            MacforgeError::io(
                format!("failed to create profile data path: {}", self.spec.profile_data_path),
                e,
            )
        })?;

        let content = format!(
            "[all]\nlocalhost\tansible_connection=local\tansible_python_interpreter={}\n",
            interpreter
        );
        fs::write(&self.spec.inventory, content)
            .map_err(|e| MacforgeError::io(self.spec.inventory.as_str(), e))?;

        debug!("inventory has been written to: {}", self.spec.inventory);
        Ok(())
    }
}
