//! Setup command implementation.

use crate::cli::SetupArgs;
use crate::error::convert_build_error;
use crate::output::OutputFormatter;
use anyhow::Result;
use plugpack_core::SetupOptions;
use plugpack_core::install_dependencies;
use std::path::Path;

pub fn execute(args: &SetupArgs, root: &Path, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = super::load_config(root)?;
    let opts = SetupOptions {
        clean: args.clean,
        develop: args.develop,
    };

    install_dependencies(&config, opts).map_err(convert_build_error)?;
    formatter.format_success(
        "setup",
        &format!(
            "Dependencies installed into {}",
            config.plugin.ext_libs.display()
        ),
    );
    Ok(())
}
