//! Zip archive writing.
//!
//! Entries are deflate-compressed with fixed timestamps and file-name-sorted
//! order, so packaging the same tree twice yields byte-identical archives.

use crate::error::Result;
use crate::package::policy::ExclusionPolicy;
use crate::package::report::PackageReport;
use crate::package::walker::ArchiveEntry;
use crate::package::walker::PackageWalker;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes a filtered package of `source_dir` to `output`.
///
/// The walk happens before the sink is opened, so a missing source
/// directory fails without creating any output. If writing fails after the
/// sink was opened, the partial archive is removed; there is no
/// partial-success state.
///
/// # Examples
///
/// ```no_run
/// use plugpack_core::ExclusionPolicy;
/// use plugpack_core::package::zip::write_package;
/// use std::path::Path;
///
/// let policy = ExclusionPolicy::full(&["coverage.xsd".to_string()])?;
/// let report = write_package(Path::new("plugin.zip"), Path::new("src/plugin"), &policy)?;
/// println!("{} files", report.files_added);
/// # Ok::<(), plugpack_core::BuildError>(())
/// ```
///
/// # Errors
///
/// Returns an error if the source directory does not exist, the output
/// file cannot be created, or any traversal or write step fails.
pub fn write_package(
    output: &Path,
    source_dir: &Path,
    policy: &ExclusionPolicy,
) -> Result<PackageReport> {
    let start = std::time::Instant::now();
    let walk = PackageWalker::new(source_dir, policy).walk()?;

    let file = File::create(output)?;
    let mut report = match write_entries(file, &walk.entries) {
        Ok(report) => report,
        Err(e) => {
            // A non-finalized archive is garbage
            let _ = fs::remove_file(output);
            return Err(e);
        }
    };

    report.files_excluded = walk.files_excluded;
    report.bytes_compressed = fs::metadata(output)?.len();
    report.duration = start.elapsed();
    Ok(report)
}

/// Writes the given entries into any seekable sink.
fn write_entries<W: Write + Seek>(writer: W, entries: &[ArchiveEntry]) -> Result<PackageReport> {
    let mut zip = ZipWriter::new(writer);
    let mut report = PackageReport::default();

    // Fixed timestamp keeps repeated runs byte-identical
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut buffer = vec![0u8; 64 * 1024];
    for entry in entries {
        let name = normalize_zip_path(&entry.archive_path)?;
        zip.start_file(&name, options)
            .map_err(|e| std::io::Error::other(format!("failed to start file in zip: {e}")))?;

        let mut file = File::open(&entry.path)?;
        loop {
            let bytes_read = file.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            zip.write_all(&buffer[..bytes_read])?;
            report.bytes_written += bytes_read as u64;
        }
        report.files_added += 1;
    }

    zip.finish()
        .map_err(|e| std::io::Error::other(format!("failed to finish zip archive: {e}")))?;

    Ok(report)
}

/// Converts a path to zip entry format (forward slashes, UTF-8).
fn normalize_zip_path(path: &Path) -> Result<String> {
    let path_str = path.to_str().ok_or_else(|| {
        crate::error::BuildError::Io(std::io::Error::other(format!(
            "path is not valid UTF-8: {}",
            path.display()
        )))
    })?;

    #[cfg(windows)]
    let normalized = path_str.replace('\\', "/");

    #[cfg(not(windows))]
    let normalized = path_str.to_string();

    Ok(normalized)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn skip() -> Vec<String> {
        vec!["coverage.xsd".to_string()]
    }

    fn archive_names(path: &Path) -> BTreeSet<String> {
        let file = File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    fn sample_tree(root: &Path) -> std::path::PathBuf {
        let src = root.join("src/plugin");
        fs::create_dir_all(src.join("test")).unwrap();
        fs::write(src.join("a.py"), "print('a')").unwrap();
        fs::write(src.join("a.pyc"), b"\x00\x01").unwrap();
        fs::write(src.join("test/t.py"), "print('t')").unwrap();
        fs::write(src.join("coverage.xsd"), "<xsd/>").unwrap();
        src
    }

    #[test]
    fn test_release_package_contents() {
        let temp = TempDir::new().unwrap();
        let src = sample_tree(temp.path());
        let output = temp.path().join("plugin.zip");

        let policy = ExclusionPolicy::full(&skip()).unwrap();
        let report = write_package(&output, &src, &policy).unwrap();

        assert_eq!(report.files_added, 2);
        assert_eq!(report.files_excluded, 2);
        let names = archive_names(&output);
        assert!(names.contains("plugin/a.py"));
        assert!(names.contains("plugin/coverage.xsd"));
        assert!(!names.contains("plugin/a.pyc"));
        assert!(!names.iter().any(|n| n.contains("test/")));
    }

    #[test]
    fn test_minimal_package_retains_tests() {
        let temp = TempDir::new().unwrap();
        let src = sample_tree(temp.path());
        let output = temp.path().join("plugin.zip");

        let policy = ExclusionPolicy::minimal(&skip()).unwrap();
        write_package(&output, &src, &policy).unwrap();

        let names = archive_names(&output);
        assert!(names.contains("plugin/test/t.py"));
        assert!(!names.contains("plugin/a.pyc"));
    }

    #[test]
    fn test_deflate_compression_used() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("plugin");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("data.txt"), "a".repeat(10_000)).unwrap();
        let output = temp.path().join("plugin.zip");

        let policy = ExclusionPolicy::full(&skip()).unwrap();
        let report = write_package(&output, &src, &policy).unwrap();

        assert_eq!(&fs::read(&output).unwrap()[0..4], b"PK\x03\x04");
        assert!(report.bytes_compressed < report.bytes_written);
        assert!(report.compression_ratio() > 1.0);
    }

    #[test]
    fn test_idempotent_output() {
        let temp = TempDir::new().unwrap();
        let src = sample_tree(temp.path());
        let first = temp.path().join("one.zip");
        let second = temp.path().join("two.zip");

        let policy = ExclusionPolicy::full(&skip()).unwrap();
        write_package(&first, &src, &policy).unwrap();
        write_package(&second, &src, &policy).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_empty_source_yields_empty_archive() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("plugin");
        fs::create_dir_all(&src).unwrap();
        let output = temp.path().join("plugin.zip");

        let policy = ExclusionPolicy::full(&skip()).unwrap();
        let report = write_package(&output, &src, &policy).unwrap();

        assert_eq!(report.files_added, 0);
        assert_eq!(report.files_excluded, 0);
        assert!(output.exists());
        assert!(archive_names(&output).is_empty());
    }

    #[test]
    fn test_missing_source_creates_no_output() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("plugin.zip");

        let policy = ExclusionPolicy::full(&skip()).unwrap();
        let result = write_package(&output, &temp.path().join("missing"), &policy);

        assert!(matches!(result, Err(BuildError::SourceNotFound { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_unwritable_sink_fails_fast() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("plugin");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.py"), "").unwrap();

        let policy = ExclusionPolicy::full(&skip()).unwrap();
        let result = write_package(
            &temp.path().join("no/such/dir/plugin.zip"),
            &src,
            &policy,
        );

        assert!(matches!(result, Err(BuildError::Io(_))));
    }

    #[test]
    fn test_normalize_zip_path() {
        assert_eq!(
            normalize_zip_path(Path::new("plugin/sub/file.py")).unwrap(),
            "plugin/sub/file.py"
        );
        assert_eq!(normalize_zip_path(Path::new("file.py")).unwrap(), "file.py");
    }
}
