//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use plugpack_core::InstallOutcome;
use plugpack_core::PackageReport;
use plugpack_core::UploadReceipt;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn headline(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_package_result(&self, output_path: &Path, report: &PackageReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!("Package created: {}", output_path.display()));

        let _ = self
            .term
            .write_line(&format!("  Files added: {}", report.files_added));
        let _ = self
            .term
            .write_line(&format!("  Files excluded: {}", report.files_excluded));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));
        let _ = self.term.write_line(&format!(
            "  Archive size: {}",
            Self::format_size(report.bytes_compressed)
        ));

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Compression ratio: {:.1}:1",
                report.compression_ratio()
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
        }

        Ok(())
    }

    fn format_install_result(&self, dest: &Path, outcome: InstallOutcome) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        match outcome {
            InstallOutcome::Linked => {
                self.headline(&format!("Plugin linked at {}", dest.display()));
            }
            InstallOutcome::Copied => {
                self.headline(&format!("Plugin copied to {}", dest.display()));
            }
            InstallOutcome::AlreadyInstalled => {
                let _ = self
                    .term
                    .write_line(&format!("Plugin already installed at {}", dest.display()));
            }
        }

        Ok(())
    }

    fn format_upload_result(&self, receipt: &UploadReceipt) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline("Upload complete");
        let _ = self
            .term
            .write_line(&format!("  Plugin ID: {}", receipt.plugin_id));
        let _ = self
            .term
            .write_line(&format!("  Version ID: {}", receipt.version_id));

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        let stderr = Term::stderr();
        if self.use_colors {
            let _ = stderr.write_line(&format!("{} {error:#}", style("✗").red().bold()));
        } else {
            let _ = stderr.write_line(&format!("Error: {error:#}"));
        }
    }

    fn format_success(&self, _operation: &str, message: &str) {
        if self.quiet {
            return;
        }
        self.headline(message);
    }

    fn format_warning(&self, _operation: &str, message: &str) {
        if self.quiet {
            return;
        }
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("Warning: {message}"));
        }
    }
}
