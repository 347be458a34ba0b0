//! Output formatter trait for CLI results.

use anyhow::Result;
use plugpack_core::InstallOutcome;
use plugpack_core::PackageReport;
use plugpack_core::UploadReceipt;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format packaging result
    fn format_package_result(&self, output_path: &Path, report: &PackageReport) -> Result<()>;

    /// Format installation result
    fn format_install_result(&self, dest: &Path, outcome: InstallOutcome) -> Result<()>;

    /// Format upload result
    fn format_upload_result(&self, receipt: &UploadReceipt) -> Result<()>;

    /// Format error message for the named operation
    fn format_error(&self, operation: &str, error: &anyhow::Error);

    /// Format success message for the named operation
    fn format_success(&self, operation: &str, message: &str);

    /// Format warning message for the named operation
    fn format_warning(&self, operation: &str, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
