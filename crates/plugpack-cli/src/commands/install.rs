//! Install command implementation.

use crate::error::convert_build_error;
use crate::output::OutputFormatter;
use anyhow::Result;
use plugpack_core::install_plugin;
use std::path::Path;

pub fn execute(root: &Path, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = super::load_config(root)?;
    let (dest, outcome) = install_plugin(&config).map_err(convert_build_error)?;
    formatter.format_install_result(&dest, outcome)
}
