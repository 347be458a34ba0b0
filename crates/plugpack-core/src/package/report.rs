//! Packaging operation reporting.

use std::time::Duration;

/// Statistics from one packaging operation.
///
/// # Examples
///
/// ```
/// use plugpack_core::PackageReport;
///
/// let mut report = PackageReport::default();
/// report.files_added = 4;
/// report.bytes_written = 1000;
/// report.bytes_compressed = 250;
/// assert_eq!(report.compression_ratio(), 4.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageReport {
    /// Number of files written into the archive.
    pub files_added: usize,

    /// Number of names rejected by the exclusion policy. An excluded
    /// directory counts once; its subtree is never visited.
    pub files_excluded: usize,

    /// Total uncompressed bytes written.
    pub bytes_written: u64,

    /// Size of the finished archive on disk.
    pub bytes_compressed: u64,

    /// Duration of the packaging operation.
    pub duration: Duration,
}

impl PackageReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compression ratio (uncompressed / archive size); 0.0 when either
    /// side is zero.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            self.bytes_written as f64 / self.bytes_compressed as f64
        }
    }
}
