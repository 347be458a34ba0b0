//! Docs command implementation.

use crate::cli::DocsArgs;
use crate::error::convert_build_error;
use crate::output::OutputFormatter;
use anyhow::Result;
use plugpack_core::build_docs;
use std::path::Path;

pub fn execute(args: &DocsArgs, root: &Path, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = super::load_config(root)?;
    build_docs(&config, args.clean, args.sphinx_theme.as_deref())
        .map_err(convert_build_error)?;
    formatter.format_success(
        "docs",
        &format!(
            "Documentation built in {}",
            config.docs.builddir.join("html").display()
        ),
    );
    Ok(())
}
