//! Error types for plugin build operations.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias using `BuildError`.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors that can occur while packaging, installing, or uploading a plugin.
#[derive(Error, Debug)]
pub enum BuildError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Plugin source directory does not exist.
    #[error("plugin source directory not found: {path}")]
    SourceNotFound {
        /// The missing source directory.
        path: PathBuf,
    },

    /// Project configuration is missing or invalid.
    #[error("configuration error: {reason}")]
    Config {
        /// Description of the problem.
        reason: String,
    },

    /// An exclusion pattern could not be compiled.
    #[error("invalid exclusion pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The offending glob pattern.
        pattern: String,
        /// Why compilation failed.
        reason: String,
    },

    /// The requirements file is missing its section divider.
    #[error("expected to find {divider:?} in {path}")]
    MissingDivider {
        /// The requirements file.
        path: PathBuf,
        /// The divider line that was not found.
        divider: String,
    },

    /// An external command exited with a non-zero status.
    #[error("command `{program}` failed with {status}")]
    CommandFailed {
        /// The program that was invoked.
        program: String,
        /// Its exit status.
        status: ExitStatus,
    },

    /// The remote repository answered the upload call with a fault.
    #[error("upload fault {code}: {message}")]
    UploadFault {
        /// Fault code assigned by the server.
        code: i32,
        /// Fault description.
        message: String,
    },

    /// The upload call failed before a fault could be decoded.
    #[error("upload transport error: {message}")]
    Transport {
        /// Underlying transport failure, including any HTTP status.
        message: String,
    },

    /// The server's upload response had an unexpected shape.
    #[error("unexpected upload response: {reason}")]
    InvalidReceipt {
        /// What was wrong with the response.
        reason: String,
    },
}

impl BuildError {
    /// Returns `true` if this error came from the upload call itself.
    ///
    /// Upload failures are reported rather than fatal: the locally written
    /// archive is kept so the upload can be retried or inspected.
    #[must_use]
    pub fn is_upload_failure(&self) -> bool {
        matches!(self, Self::UploadFault { .. } | Self::Transport { .. })
    }
}
