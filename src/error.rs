//! Domain-specific error types for macforge.
//!
//! This module defines `MacforgeError`, a `thiserror`-based enum with typed
//! variants for the failure modes of profile resolution, validation and
//! provisioning. Public API functions return `Result<T, MacforgeError>` or
//! `anyhow::Result` at orchestration boundaries; `MacforgeError` converts
//! into `anyhow::Error` via `?`.

use std::io;

/// Formats an IO error kind into a human-readable message.
///
/// Common kinds get a short fixed message (e.g. "I/O error: not found")
/// instead of the OS-level text; unrecognized kinds fall back to the OS
/// message. Path context is carried separately in `MacforgeError::Io`.
pub(crate) fn io_error_kind_message(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => "I/O error: not found".to_string(),
        io::ErrorKind::PermissionDenied => "I/O error: permission denied".to_string(),
        io::ErrorKind::IsADirectory => "I/O error: is a directory".to_string(),
        _ => format!("I/O error: {}", err),
    }
}

/// Domain-specific error type for macforge.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MacforgeError {
    /// A repository URL could not be parsed as a GitHub repository.
    #[error("invalid GitHub repository: {0}")]
    InvalidRepository(String),

    /// A remote GitHub repository could not be retrieved.
    #[error("communication error with GitHub: {url}: {message}")]
    RemoteCommunication {
        /// The URL that was being fetched.
        url: String,
        /// Transport or HTTP status failure description.
        message: String,
    },

    /// Copying a local profile folder into the workspace failed.
    #[error("failed to stage profile folder: {context}: {message}")]
    StagingCopy {
        /// The source or destination path involved in the copy.
        context: String,
        /// Human-readable description of the I/O failure.
        message: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The workspace was used before a profile source was added.
    #[error("invalid workspace: {0}")]
    WorkspaceInvalid(String),

    /// A spec file failed schema validation.
    ///
    /// Holds every violation message, sorted alphabetically.
    #[error("spec file validation failed: {0:?}")]
    SpecValidation(Vec<String>),

    /// A precheck environment document failed to parse or validate.
    #[error("{0}")]
    PrecheckValidation(String),

    /// No usable Python interpreter was found on this system.
    #[error("no Python interpreter found")]
    InterpreterNotFound,

    /// A command execution failed (spawn failure, wait failure, etc.).
    #[error("command execution failed: {command}: {status}")]
    Execution {
        /// The command that was executed.
        command: String,
        /// Human-readable reason for the failure.
        status: String,
    },

    /// An I/O operation failed with contextual information.
    #[error("{context}: {message}")]
    Io {
        /// A file path, or an operation description naming a path.
        context: String,
        /// Description derived from [`io_error_kind_message`].
        message: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl MacforgeError {
    /// Creates an `Io` variant with the `message` field derived from the
    /// `source` via [`io_error_kind_message`].
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            message: io_error_kind_message(&source),
            source,
        }
    }

    /// Creates a `StagingCopy` variant with the `message` field derived from
    /// the `source` via [`io_error_kind_message`].
    pub(crate) fn staging_copy(context: impl Into<String>, source: io::Error) -> Self {
        Self::StagingCopy {
            context: context.into(),
            message: io_error_kind_message(&source),
            source,
        }
    }
}
