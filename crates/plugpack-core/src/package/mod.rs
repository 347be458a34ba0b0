//! Filtered zip packaging of a plugin source tree.
//!
//! The packaging pipeline is a single synchronous pass: compile an
//! [`ExclusionPolicy`], walk the source tree with a [`walker::PackageWalker`]
//! (pruning excluded directories), and stream the surviving files into a
//! deflate-compressed zip whose entry names are rooted at the plugin's
//! top-level directory name.

pub mod policy;
pub mod report;
pub mod walker;
pub mod zip;

pub use policy::ExclusionPolicy;
pub use policy::ExclusionProfile;
pub use report::PackageReport;

use crate::config::ProjectConfig;
use crate::error::Result;
use std::path::PathBuf;

/// Packages the configured plugin into `<package_dir>/<name>.zip`.
///
/// Returns the archive path together with the packaging report.
///
/// # Errors
///
/// Returns an error if the exclusion patterns fail to compile, the source
/// directory is missing, or the archive cannot be written.
pub fn package_plugin(
    config: &ProjectConfig,
    profile: ExclusionProfile,
) -> Result<(PathBuf, PackageReport)> {
    let policy = ExclusionPolicy::for_profile(profile, &config.plugin.skip_exclude)?;
    std::fs::create_dir_all(&config.plugin.package_dir)?;
    let output = config.archive_path();
    let report = zip::write_package(&output, &config.plugin.source_dir, &policy)?;
    Ok((output, report))
}
