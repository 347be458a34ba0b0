//! Dependency installation into the bundled `ext-libs` directory.
//!
//! pip is an opaque collaborator: each requirement is handed to it as a
//! subprocess and a non-zero exit aborts the build. Editable requirements
//! (`-e url#egg=name`) are fetched into `ext_src` first, then installed
//! from the checkout.

use crate::config::ProjectConfig;
use crate::error::BuildError;
use crate::error::Result;
use crate::process::run_command;
use crate::requirements::read_requirements;
use std::fs;

/// Flags for the setup operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetupOptions {
    /// Remove `ext_libs` before installing.
    pub clean: bool,
    /// Leave existing source checkouts in `ext_src` untouched.
    pub develop: bool,
}

/// Installs runtime and test dependencies into `ext_libs`.
///
/// # Errors
///
/// Returns an error if the requirements file is missing its divider, an
/// editable requirement lacks an `#egg=` name, or pip fails.
pub fn install_dependencies(config: &ProjectConfig, opts: SetupOptions) -> Result<()> {
    let ext_libs = &config.plugin.ext_libs;
    let ext_src = &config.plugin.ext_src;

    if opts.clean && ext_libs.exists() {
        fs::remove_dir_all(ext_libs)?;
    }
    fs::create_dir_all(ext_libs)?;

    let reqs = read_requirements(&config.requirements_path())?;
    for req in reqs.all() {
        let spec = if let Some(url) = req.strip_prefix("-e") {
            let url = url.trim();
            if !opts.develop {
                run_command(
                    "pip",
                    [
                        "download".to_string(),
                        format!("--dest={}", std::env::temp_dir().display()),
                        "--exists-action=w".to_string(),
                        format!("--src={}", ext_src.display()),
                        url.to_string(),
                    ],
                )?;
            }
            ext_src
                .join(editable_checkout_name(url)?)
                .display()
                .to_string()
        } else {
            req.clone()
        };

        run_command(
            "pip",
            [
                "install".to_string(),
                "--upgrade".to_string(),
                format!("--target={}", ext_libs.display()),
                spec,
            ],
        )?;
    }

    Ok(())
}

/// Extracts the `#egg=` project name from an editable requirement URL.
fn editable_checkout_name(url: &str) -> Result<String> {
    url.split_once("#egg=")
        .map(|(_, name)| name.to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| BuildError::Config {
            reason: format!("editable requirement {url:?} is missing an #egg= name"),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_editable_checkout_name() {
        let name =
            editable_checkout_name("git+https://example.org/owslib.git#egg=OWSLib").unwrap();
        assert_eq!(name, "OWSLib");
    }

    #[test]
    fn test_editable_checkout_name_missing_egg() {
        let err = editable_checkout_name("git+https://example.org/owslib.git").unwrap_err();
        assert!(matches!(err, BuildError::Config { .. }));

        let err = editable_checkout_name("git+https://example.org/x.git#egg=").unwrap_err();
        assert!(matches!(err, BuildError::Config { .. }));
    }

    #[test]
    fn test_missing_requirements_divider_aborts() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("requirements.txt"), "httplib2\n").unwrap();
        let config = ProjectConfig::with_defaults(temp.path());

        let err = install_dependencies(&config, SetupOptions::default()).unwrap_err();
        assert!(matches!(err, BuildError::MissingDivider { .. }));
    }

    #[test]
    fn test_clean_recreates_ext_libs() {
        let temp = tempfile::TempDir::new().unwrap();
        // Empty requirement lists mean no pip invocation at all
        std::fs::write(
            temp.path().join("requirements.txt"),
            "# test requirements\n",
        )
        .unwrap();
        let config = ProjectConfig::with_defaults(temp.path());

        std::fs::create_dir_all(&config.plugin.ext_libs).unwrap();
        std::fs::write(config.plugin.ext_libs.join("stale.py"), "").unwrap();

        install_dependencies(
            &config,
            SetupOptions {
                clean: true,
                develop: false,
            },
        )
        .unwrap();

        assert!(config.plugin.ext_libs.is_dir());
        assert!(!config.plugin.ext_libs.join("stale.py").exists());
    }
}
