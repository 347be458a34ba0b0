//! Command implementations.

pub mod completion;
pub mod docs;
pub mod install;
pub mod package;
pub mod setup;
pub mod upload;

use crate::error::convert_build_error;
use anyhow::Result;
use plugpack_core::ProjectConfig;
use std::path::Path;

/// Loads the project configuration for `root`, converting errors for display.
fn load_config(root: &Path) -> Result<ProjectConfig> {
    ProjectConfig::load(root).map_err(convert_build_error)
}
