//! Local installation into the host application's plugin directory.

use crate::config::ProjectConfig;
use crate::error::BuildError;
use crate::error::Result;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// How the plugin ended up in the host plugin directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// A symlink to the source tree was created.
    Linked,
    /// The source tree was copied (platforms without symlinks).
    Copied,
    /// The destination already existed; nothing was done.
    AlreadyInstalled,
}

/// Installs the plugin source tree into `~/.qgis2/python/plugins/<name>`.
///
/// On Unix the source tree is symlinked so local edits are picked up by
/// the host application without reinstalling. Elsewhere any existing
/// destination is replaced with a copy of the tree.
///
/// # Errors
///
/// Returns an error if the home directory cannot be resolved, the source
/// tree is missing, or filesystem operations fail.
pub fn install_plugin(config: &ProjectConfig) -> Result<(PathBuf, InstallOutcome)> {
    let src = &config.plugin.source_dir;
    if !src.is_dir() {
        return Err(BuildError::SourceNotFound {
            path: src.clone(),
        });
    }

    let home = dirs::home_dir().ok_or_else(|| BuildError::Config {
        reason: "cannot determine home directory".to_string(),
    })?;
    let dst = home
        .join(".qgis2")
        .join("python")
        .join("plugins")
        .join(&config.plugin.name);

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }

    let outcome = install_tree(src, &dst)?;
    Ok((dst, outcome))
}

#[cfg(unix)]
fn install_tree(src: &Path, dst: &Path) -> Result<InstallOutcome> {
    if dst.symlink_metadata().is_ok() {
        return Ok(InstallOutcome::AlreadyInstalled);
    }
    std::os::unix::fs::symlink(src, dst)?;
    Ok(InstallOutcome::Linked)
}

#[cfg(not(unix))]
fn install_tree(src: &Path, dst: &Path) -> Result<InstallOutcome> {
    if dst.exists() {
        fs::remove_dir_all(dst)?;
    }
    copy_tree(src, dst)?;
    Ok(InstallOutcome::Copied)
}

#[cfg(not(unix))]
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in walkdir::WalkDir::new(src) {
        let entry = entry
            .map_err(|e| BuildError::Io(std::io::Error::other(format!("walk error: {e}"))))?;
        let rel = entry.path().strip_prefix(src).map_err(|_| {
            BuildError::Io(std::io::Error::other(format!(
                "path {} is not under {}",
                entry.path().display(),
                src.display()
            )))
        })?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
