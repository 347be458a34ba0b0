//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use plugpack_core::InstallOutcome;
use plugpack_core::PackageReport;
use plugpack_core::UploadReceipt;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_package_result(&self, output_path: &Path, report: &PackageReport) -> Result<()> {
        #[derive(Serialize)]
        struct PackageOutput {
            output_path: String,
            files_added: usize,
            files_excluded: usize,
            bytes_written: u64,
            bytes_compressed: u64,
            compression_ratio: f64,
            duration_ms: u128,
        }

        let data = PackageOutput {
            output_path: output_path.display().to_string(),
            files_added: report.files_added,
            files_excluded: report.files_excluded,
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            duration_ms: report.duration.as_millis(),
        };

        let output = JsonOutput::success("package", data);
        Self::output(&output)
    }

    fn format_install_result(&self, dest: &Path, outcome: InstallOutcome) -> Result<()> {
        #[derive(Serialize)]
        struct InstallOutput {
            destination: String,
            outcome: &'static str,
        }

        let data = InstallOutput {
            destination: dest.display().to_string(),
            outcome: match outcome {
                InstallOutcome::Linked => "linked",
                InstallOutcome::Copied => "copied",
                InstallOutcome::AlreadyInstalled => "already-installed",
            },
        };

        let output = JsonOutput::success("install", data);
        Self::output(&output)
    }

    fn format_upload_result(&self, receipt: &UploadReceipt) -> Result<()> {
        #[derive(Serialize)]
        struct UploadOutput {
            plugin_id: i64,
            version_id: i64,
        }

        let data = UploadOutput {
            plugin_id: receipt.plugin_id,
            version_id: receipt.version_id,
        };

        let output = JsonOutput::success("upload", data);
        Self::output(&output)
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error(operation, format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_success(&self, operation: &str, message: &str) {
        #[derive(Serialize)]
        struct SuccessData {
            message: String,
        }

        let output = JsonOutput::success(
            operation,
            SuccessData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }

    fn format_warning(&self, operation: &str, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            warning: String,
        }

        let output = JsonOutput::success(
            operation,
            WarningData {
                warning: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
