//! Project configuration for plugin build operations.
//!
//! Configuration is an explicit immutable value constructed once per
//! invocation, either from built-in defaults or from an optional
//! `plugpack.toml` at the project root. Relative paths in the file are
//! resolved against the project root at load time.

use crate::error::BuildError;
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// Name of the optional configuration file at the project root.
pub const CONFIG_FILE: &str = "plugpack.toml";

/// Immutable configuration for one build invocation.
///
/// # Examples
///
/// ```no_run
/// use plugpack_core::ProjectConfig;
/// use std::path::Path;
///
/// let config = ProjectConfig::load(Path::new("."))?;
/// println!("packaging {}", config.plugin.name);
/// # Ok::<(), plugpack_core::BuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Project root the configuration was loaded from.
    pub root: PathBuf,
    /// Plugin layout and naming.
    pub plugin: PluginConfig,
    /// Default parameters for the remote plugin repository.
    pub server: ServerConfig,
    /// Documentation tree layout.
    pub docs: DocsConfig,
}

/// Plugin layout: where sources live and what the package is called.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Plugin name; also the archive's top-level directory name.
    pub name: String,
    /// Root of the plugin source tree.
    pub source_dir: PathBuf,
    /// Directory the release archive is written into.
    pub package_dir: PathBuf,
    /// Directory bundled runtime dependencies are installed into.
    pub ext_libs: PathBuf,
    /// Directory editable source checkouts are fetched into.
    pub ext_src: PathBuf,
    /// Literal filenames exempt from exclusion even when pattern-matched.
    pub skip_exclude: Vec<String>,
}

/// Connection parameters for the remote plugin repository.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// URL scheme, `http` or `https`.
    pub protocol: String,
    /// Repository host name.
    pub host: String,
    /// Repository port.
    pub port: u16,
    /// XML-RPC endpoint path.
    pub endpoint: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            host: "plugins.qgis.org".to_string(),
            port: 80,
            endpoint: "/RPC2/".to_string(),
        }
    }
}

impl ServerConfig {
    /// Composes the full endpoint URL.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.protocol, self.host, self.port, self.endpoint
        )
    }

    /// Sets the host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the endpoint path.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the URL scheme.
    #[must_use]
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }
}

/// Sphinx documentation tree layout.
#[derive(Debug, Clone)]
pub struct DocsConfig {
    /// Documentation root directory.
    pub docroot: PathBuf,
    /// Sphinx source directory.
    pub sourcedir: PathBuf,
    /// Sphinx build output directory.
    pub builddir: PathBuf,
}

impl ProjectConfig {
    /// Loads configuration for the project rooted at `root`.
    ///
    /// Reads `plugpack.toml` when present; a missing file yields pure
    /// defaults, a malformed file is a fatal configuration error. Relative
    /// paths are resolved against `root`.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        let file = if path.exists() {
            let text = fs::read_to_string(&path)?;
            toml::from_str(&text).map_err(|e| BuildError::Config {
                reason: format!("{}: {e}", path.display()),
            })?
        } else {
            ConfigFile::default()
        };
        Ok(Self::from_file(root, file))
    }

    /// Builds a configuration from defaults only, ignoring any config file.
    #[must_use]
    pub fn with_defaults(root: &Path) -> Self {
        Self::from_file(root, ConfigFile::default())
    }

    fn from_file(root: &Path, file: ConfigFile) -> Self {
        let name = file.plugin.name.unwrap_or_else(|| "plugin".to_string());
        let source_dir = resolve(
            root,
            file.plugin
                .source_dir
                .unwrap_or_else(|| Path::new("src").join(&name)),
        );
        let plugin = PluginConfig {
            package_dir: file
                .plugin
                .package_dir
                .map_or_else(|| root.to_path_buf(), |p| resolve(root, p)),
            ext_libs: file
                .plugin
                .ext_libs
                .map_or_else(|| source_dir.join("ext-libs"), |p| resolve(root, p)),
            ext_src: file
                .plugin
                .ext_src
                .map_or_else(|| source_dir.join("ext-src"), |p| resolve(root, p)),
            skip_exclude: file
                .plugin
                .skip_exclude
                .unwrap_or_else(|| vec!["coverage.xsd".to_string()]),
            name,
            source_dir,
        };

        let defaults = ServerConfig::default();
        let server = ServerConfig {
            protocol: file.server.protocol.unwrap_or(defaults.protocol),
            host: file.server.host.unwrap_or(defaults.host),
            port: file.server.port.unwrap_or(defaults.port),
            endpoint: file.server.endpoint.unwrap_or(defaults.endpoint),
        };

        let docs = DocsConfig {
            docroot: file
                .docs
                .docroot
                .map_or_else(|| root.join("docs"), |p| resolve(root, p)),
            sourcedir: file
                .docs
                .sourcedir
                .map_or_else(|| root.join("docs").join("source"), |p| resolve(root, p)),
            builddir: file
                .docs
                .builddir
                .map_or_else(|| root.join("docs").join("build"), |p| resolve(root, p)),
        };

        Self {
            root: root.to_path_buf(),
            plugin,
            server,
            docs,
        }
    }

    /// Path the release archive is written to: `<package_dir>/<name>.zip`.
    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        self.plugin
            .package_dir
            .join(format!("{}.zip", self.plugin.name))
    }

    /// Path of the two-tier requirements file: `<root>/requirements.txt`.
    #[must_use]
    pub fn requirements_path(&self) -> PathBuf {
        self.root.join("requirements.txt")
    }
}

fn resolve(root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}

/// On-disk `plugpack.toml` shape. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    plugin: PluginSection,
    server: ServerSection,
    docs: DocsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PluginSection {
    name: Option<String>,
    source_dir: Option<PathBuf>,
    package_dir: Option<PathBuf>,
    ext_libs: Option<PathBuf>,
    ext_src: Option<PathBuf>,
    skip_exclude: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ServerSection {
    protocol: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    endpoint: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DocsSection {
    docroot: Option<PathBuf>,
    sourcedir: Option<PathBuf>,
    builddir: Option<PathBuf>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config_file() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig::load(temp.path()).unwrap();

        assert_eq!(config.plugin.name, "plugin");
        assert_eq!(config.plugin.source_dir, temp.path().join("src/plugin"));
        assert_eq!(config.plugin.package_dir, temp.path());
        assert_eq!(
            config.plugin.ext_libs,
            temp.path().join("src/plugin/ext-libs")
        );
        assert_eq!(config.plugin.skip_exclude, vec!["coverage.xsd"]);
        assert_eq!(config.server.url(), "http://plugins.qgis.org:80/RPC2/");
        assert_eq!(config.docs.sourcedir, temp.path().join("docs/source"));
    }

    #[test]
    fn test_load_config_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE),
            r#"
[plugin]
name = "opengeo"
skip_exclude = ["coverage.xsd", "schema.xsd"]

[server]
host = "qgis.example.org"
port = 8080
"#,
        )
        .unwrap();

        let config = ProjectConfig::load(temp.path()).unwrap();
        assert_eq!(config.plugin.name, "opengeo");
        assert_eq!(config.plugin.source_dir, temp.path().join("src/opengeo"));
        assert_eq!(config.plugin.skip_exclude.len(), 2);
        assert_eq!(config.server.host, "qgis.example.org");
        assert_eq!(config.server.port, 8080);
        // Untouched sections keep their defaults
        assert_eq!(config.server.endpoint, "/RPC2/");
    }

    #[test]
    fn test_malformed_config_is_fatal() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "[plugin]\nname = 42\n").unwrap();

        let result = ProjectConfig::load(temp.path());
        assert!(matches!(result, Err(BuildError::Config { .. })));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "[plugin]\nnmae = \"x\"\n").unwrap();

        assert!(ProjectConfig::load(temp.path()).is_err());
    }

    #[test]
    fn test_absolute_paths_not_rejoined() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE),
            "[plugin]\nsource_dir = \"/opt/plugin\"\n",
        )
        .unwrap();

        let config = ProjectConfig::load(temp.path()).unwrap();
        assert_eq!(config.plugin.source_dir, Path::new("/opt/plugin"));
        // ext-libs defaults follow the overridden source dir
        assert_eq!(config.plugin.ext_libs, Path::new("/opt/plugin/ext-libs"));
    }

    #[test]
    fn test_archive_path() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig::with_defaults(temp.path());
        assert_eq!(config.archive_path(), temp.path().join("plugin.zip"));
    }

    #[test]
    fn test_server_builders() {
        let server = ServerConfig::default()
            .with_protocol("https")
            .with_host("repo.example.org")
            .with_port(443)
            .with_endpoint("/rpc/");
        assert_eq!(server.url(), "https://repo.example.org:443/rpc/");
    }
}
