//! Ansible invocation layer.
//!
//! This module turns a loaded [`crate::spec::Spec`] into the three-command
//! Ansible sequence (role install, collection install, playbook run), plus
//! the runtime artifacts that sequence depends on: the generated inventory
//! file and the composed environment map.

pub mod environment;
pub mod interpreter;
pub mod inventory;
pub mod runner;

pub use interpreter::Interpreter;
pub use inventory::InventoryFile;
pub use runner::{AnsibleRunner, RunOutcome};
