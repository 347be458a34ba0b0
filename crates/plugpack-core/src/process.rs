//! External command invocation.

use crate::error::BuildError;
use crate::error::Result;
use std::ffi::OsStr;
use std::process::Command;

/// Runs `program` with `args`, inheriting stdio. A non-zero exit status is
/// a `CommandFailed` error.
pub(crate) fn run_command<I, S>(program: &str, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let status = Command::new(program).args(args).status().map_err(|e| {
        BuildError::Io(std::io::Error::other(format!(
            "failed to run `{program}`: {e}"
        )))
    })?;
    if !status.success() {
        return Err(BuildError::CommandFailed {
            program: program.to_string(),
            status,
        });
    }
    Ok(())
}
