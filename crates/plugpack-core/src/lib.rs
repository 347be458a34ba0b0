//! Build automation library for QGIS-style desktop plugins.
//!
//! `plugpack-core` packages a plugin source tree into a filtered zip
//! archive, installs the plugin into the host application's plugin
//! directory, installs its Python dependencies, builds its documentation,
//! and uploads release archives to a remote plugin repository over XML-RPC.
//!
//! # Examples
//!
//! ```no_run
//! use plugpack_core::ExclusionProfile;
//! use plugpack_core::ProjectConfig;
//! use plugpack_core::package_plugin;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProjectConfig::load(Path::new("."))?;
//! let (archive, report) = package_plugin(&config, ExclusionProfile::Full)?;
//! println!("wrote {} ({} files)", archive.display(), report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod docs;
pub mod error;
pub mod install;
pub mod package;
mod process;
pub mod requirements;
pub mod setup;
pub mod upload;

// Re-export main API types
pub use config::CONFIG_FILE;
pub use config::DocsConfig;
pub use config::PluginConfig;
pub use config::ProjectConfig;
pub use config::ServerConfig;
pub use docs::build_docs;
pub use docs::generate_settings_docs;
pub use error::BuildError;
pub use error::Result;
pub use install::InstallOutcome;
pub use install::install_plugin;
pub use package::ExclusionPolicy;
pub use package::ExclusionProfile;
pub use package::PackageReport;
pub use package::package_plugin;
pub use requirements::Requirements;
pub use requirements::read_requirements;
pub use setup::SetupOptions;
pub use setup::install_dependencies;
pub use upload::Credentials;
pub use upload::RepositoryClient;
pub use upload::UploadReceipt;
