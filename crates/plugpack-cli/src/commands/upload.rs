//! Upload command implementation.
//!
//! Packages a release archive, then uploads it over XML-RPC. A failed
//! upload is reported but keeps the archive on disk so the attempt can
//! be retried without repackaging.

use crate::cli::UploadArgs;
use crate::error::convert_build_error;
use crate::output::OutputFormatter;
use anyhow::Result;
use plugpack_core::Credentials;
use plugpack_core::ExclusionProfile;
use plugpack_core::RepositoryClient;
use plugpack_core::package_plugin;
use std::fs;
use std::path::Path;

pub fn execute(args: &UploadArgs, root: &Path, formatter: &dyn OutputFormatter) -> Result<()> {
    let mut config = super::load_config(root)?;
    apply_server_overrides(&mut config.server, args);

    let credentials =
        Credentials::new(&args.user, &args.passwd).map_err(convert_build_error)?;

    let (archive, report) =
        package_plugin(&config, ExclusionProfile::Full).map_err(convert_build_error)?;
    formatter.format_package_result(&archive, &report)?;

    let client = RepositoryClient::new(&config.server, credentials);
    formatter.format_success("upload", &format!("Uploading to {}", client.url()));

    match client.upload_archive(&archive) {
        Ok(receipt) => {
            fs::remove_file(&archive)?;
            formatter.format_upload_result(&receipt)
        }
        Err(err) if err.is_upload_failure() => {
            formatter.format_error("upload", &convert_build_error(err));
            formatter.format_warning(
                "upload",
                &format!("Upload failed; archive kept at {}", archive.display()),
            );
            Ok(())
        }
        Err(err) => Err(convert_build_error(err)),
    }
}

fn apply_server_overrides(server: &mut plugpack_core::ServerConfig, args: &UploadArgs) {
    if let Some(host) = &args.server {
        server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    if let Some(endpoint) = &args.end_point {
        server.endpoint.clone_from(endpoint);
    }
    if let Some(protocol) = &args.protocol {
        server.protocol.clone_from(protocol);
    }
}
