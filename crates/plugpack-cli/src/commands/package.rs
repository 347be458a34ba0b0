//! Package command implementation.

use crate::cli::PackageArgs;
use crate::error::convert_build_error;
use crate::output::OutputFormatter;
use anyhow::Result;
use plugpack_core::ExclusionProfile;
use plugpack_core::package_plugin;
use std::path::Path;

pub fn execute(
    args: &PackageArgs,
    profile: ExclusionProfile,
    root: &Path,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let mut config = super::load_config(root)?;

    if let Some(dir) = &args.package_dir {
        config.plugin.package_dir = if dir.is_absolute() {
            dir.clone()
        } else {
            root.join(dir)
        };
    }

    let (output_path, report) =
        package_plugin(&config, profile).map_err(convert_build_error)?;
    formatter.format_package_result(&output_path, &report)
}
