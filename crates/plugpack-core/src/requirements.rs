//! Two-tier requirements file parsing.
//!
//! `requirements.txt` lists runtime requirements, then a literal divider
//! comment, then test requirements. A missing divider is a fatal
//! configuration error, never silently skipped.

use crate::error::BuildError;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// The literal divider line separating runtime from test requirements.
pub const TEST_DIVIDER: &str = "# test requirements";

/// Parsed requirement lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirements {
    /// Requirements above the divider.
    pub runtime: Vec<String>,
    /// Requirements below the divider.
    pub test: Vec<String>,
}

impl Requirements {
    /// All requirements, runtime first.
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        let mut all = self.runtime.clone();
        all.extend(self.test.iter().cloned());
        all
    }
}

/// Reads and parses the requirements file at `path`.
///
/// # Errors
///
/// Returns `BuildError::MissingDivider` if the divider line is absent, or
/// an I/O error if the file cannot be read.
pub fn read_requirements(path: &Path) -> Result<Requirements> {
    let text = fs::read_to_string(path)?;
    parse_requirements(&text).ok_or_else(|| BuildError::MissingDivider {
        path: path.to_path_buf(),
        divider: TEST_DIVIDER.to_string(),
    })
}

/// Parses requirements text; `None` when the divider is missing.
fn parse_requirements(text: &str) -> Option<Requirements> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let idx = lines.iter().position(|l| *l == TEST_DIVIDER)?;

    let not_comments = |slice: &[&str]| {
        slice
            .iter()
            .filter(|l| !l.starts_with('#'))
            .map(|l| (*l).to_string())
            .collect()
    };

    Some(Requirements {
        runtime: not_comments(&lines[..idx]),
        test: not_comments(&lines[idx + 1..]),
    })
}
