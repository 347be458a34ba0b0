//! Error conversion utilities for CLI.
//!
//! Converts plugpack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use plugpack_core::BuildError;

/// Converts `BuildError` to user-friendly anyhow error with context
pub fn convert_build_error(err: BuildError) -> anyhow::Error {
    match err {
        BuildError::SourceNotFound { path } => {
            anyhow!(
                "Plugin source directory not found: {}\n\
                 HINT: Check the [plugin] source_dir setting in plugpack.toml.",
                path.display()
            )
        }
        BuildError::MissingDivider { path, divider } => {
            anyhow!(
                "Requirements file {} has no {divider:?} line\n\
                 HINT: Separate runtime from test requirements with that exact line.",
                path.display()
            )
        }
        BuildError::InvalidPattern { pattern, reason } => {
            anyhow!(
                "Invalid exclusion pattern {pattern:?}: {reason}\n\
                 HINT: Check the [plugin] skip_exclude entries in plugpack.toml."
            )
        }
        BuildError::CommandFailed { program, status } => {
            anyhow!(
                "Command `{program}` failed with {status}\n\
                 HINT: Make sure {program} is installed and on your PATH."
            )
        }
        BuildError::Transport { message } if message.contains("403") => {
            anyhow!(
                "Upload rejected: {message}\n\
                 HINT: Invalid user name or password. Pass them with -u and -p."
            )
        }
        BuildError::UploadFault { code, message } => {
            anyhow!("Upload rejected by the repository (fault {code}): {message}")
        }
        BuildError::Config { reason } => anyhow!("Configuration error: {reason}"),
        _ => anyhow::Error::from(err),
    }
}
