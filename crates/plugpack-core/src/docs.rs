//! Documentation build.
//!
//! Sphinx is an opaque collaborator invoked as a subprocess. Before the
//! build, a settings reference page is regenerated from the plugin's
//! `settings.json` when that file exists.

use crate::config::ProjectConfig;
use crate::error::BuildError;
use crate::error::Result;
use crate::process::run_command;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;

/// One entry of the plugin's `settings.json`.
#[derive(Debug, Clone, Deserialize)]
struct Setting {
    group: String,
    label: String,
    description: String,
}

/// Builds the HTML documentation with `sphinx-build`.
///
/// A `theme` overrides the `html_theme` configured in the sphinx project.
///
/// # Errors
///
/// Returns an error if the settings page cannot be written or the sphinx
/// subprocess fails.
pub fn build_docs(config: &ProjectConfig, clean: bool, theme: Option<&str>) -> Result<()> {
    generate_settings_docs(config)?;

    let builddir = &config.docs.builddir;
    if clean && builddir.exists() {
        fs::remove_dir_all(builddir)?;
    }
    fs::create_dir_all(builddir)?;

    run_command("sphinx-build", sphinx_args(config, theme))
}

fn sphinx_args(config: &ProjectConfig, theme: Option<&str>) -> Vec<String> {
    let mut args = vec!["-b".to_string(), "html".to_string()];
    if let Some(theme) = theme {
        args.push("-D".to_string());
        args.push(format!("html_theme={theme}"));
    }
    args.push(config.docs.sourcedir.display().to_string());
    args.push(config.docs.builddir.join("html").display().to_string());
    args
}

/// Regenerates `settingsconf.rst` from `<source_dir>/settings.json`.
///
/// Returns `false` when the plugin has no settings file, which is not an
/// error. Settings are grouped and rendered as one list-table per group.
pub fn generate_settings_docs(config: &ProjectConfig) -> Result<bool> {
    let settings_file = config.plugin.source_dir.join("settings.json");
    if !settings_file.exists() {
        return Ok(false);
    }

    let text = fs::read_to_string(&settings_file)?;
    let settings: Vec<Setting> = serde_json::from_str(&text).map_err(|e| BuildError::Config {
        reason: format!("{}: {e}", settings_file.display()),
    })?;

    let mut grouped: BTreeMap<String, Vec<Setting>> = BTreeMap::new();
    for setting in settings {
        grouped.entry(setting.group.clone()).or_default().push(setting);
    }

    let mut out = String::from(
        ".. _plugin_settings:\n\n\
         Plugin settings\n===============\n\n\
         The plugin can be adjusted using the following settings, \
         to be found in its settings dialog (|path_to_settings|).\n",
    );
    for (group, settings) in &grouped {
        let marks = "-".repeat(group.len());
        let _ = write!(
            out,
            "\n{group}\n{marks}\n\n\
             .. list-table::\n   \
             :header-rows: 1\n   \
             :stub-columns: 1\n   \
             :widths: 20 80\n   \
             :class: non-responsive\n\n   \
             * - Option\n     \
             - Description\n"
        );
        for setting in settings {
            let _ = write!(
                out,
                "   * - {}\n     - {}\n",
                setting.label, setting.description
            );
        }
    }

    fs::create_dir_all(&config.docs.sourcedir)?;
    fs::write(config.docs.sourcedir.join("settingsconf.rst"), out)?;
    Ok(true)
}
