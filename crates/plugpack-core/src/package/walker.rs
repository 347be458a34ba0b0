//! Pruning directory traversal for packaging.
//!
//! Walks the plugin source tree depth-first, testing each entry's name
//! (one path segment, never the full path) against the exclusion policy.
//! Excluded directories are pruned: their subtrees are never visited, so
//! the skip list cannot rescue files beneath them.

use crate::error::BuildError;
use crate::error::Result;
use crate::package::policy::ExclusionPolicy;
use std::cell::Cell;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// A file that survived filtering, paired with the path it is stored
/// under inside the archive.
///
/// The archive path is relative to the source root's *parent*, so the
/// plugin's top-level directory name is preserved inside the archive
/// regardless of the filesystem's absolute layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Full filesystem path to the file.
    pub path: PathBuf,

    /// Path the file is stored under in the archive.
    pub archive_path: PathBuf,

    /// Size in bytes.
    pub size: u64,
}

/// Result of one walk: the surviving files plus a count of what the
/// policy rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOutcome {
    /// Surviving files in deterministic (file-name-sorted) order.
    pub entries: Vec<ArchiveEntry>,

    /// Names rejected by the policy. An excluded directory counts once;
    /// its subtree is never visited.
    pub files_excluded: usize,
}

/// Walks a plugin source tree, applying an `ExclusionPolicy`.
pub struct PackageWalker<'a> {
    root: &'a Path,
    policy: &'a ExclusionPolicy,
}

impl<'a> PackageWalker<'a> {
    /// Creates a walker over `root` with the given policy.
    #[must_use]
    pub fn new(root: &'a Path, policy: &'a ExclusionPolicy) -> Self {
        Self { root, policy }
    }

    /// Collects the surviving files in deterministic (file-name-sorted)
    /// order.
    pub fn entries(&self) -> Result<Vec<ArchiveEntry>> {
        self.walk().map(|outcome| outcome.entries)
    }

    /// Walks the tree, collecting surviving files and counting the names
    /// the policy rejected.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::SourceNotFound` if the root is not an existing
    /// directory; traversal errors (unreadable directory, broken entry)
    /// propagate and abort the whole walk.
    pub fn walk(&self) -> Result<WalkOutcome> {
        if !self.root.is_dir() {
            return Err(BuildError::SourceNotFound {
                path: self.root.to_path_buf(),
            });
        }

        // Entry names are rooted at the source directory's parent so the
        // top-level directory name survives into the archive.
        let base = self.root.parent().unwrap_or(self.root);

        let policy = self.policy;
        let excluded = Cell::new(0usize);
        let walker = WalkDir::new(self.root)
            .sort_by_file_name()
            .into_iter()
            // depth 0 is the source root itself, which is never excluded
            .filter_entry(|e| {
                if e.depth() > 0 && excluded_entry(policy, e.file_name()) {
                    excluded.set(excluded.get() + 1);
                    return false;
                }
                true
            });

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                BuildError::Io(std::io::Error::other(format!("walk error: {e}")))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let metadata = entry.metadata().map_err(|e| {
                BuildError::Io(std::io::Error::other(format!(
                    "cannot read metadata for {}: {e}",
                    entry.path().display()
                )))
            })?;

            let archive_path = entry
                .path()
                .strip_prefix(base)
                .map_err(|_| BuildError::Io(std::io::Error::other(format!(
                    "path {} is not under {}",
                    entry.path().display(),
                    base.display()
                ))))?
                .to_path_buf();

            entries.push(ArchiveEntry {
                path: entry.path().to_path_buf(),
                archive_path,
                size: metadata.len(),
            });
        }

        Ok(WalkOutcome {
            entries,
            files_excluded: excluded.get(),
        })
    }
}

/// Tests one entry name against the policy. Names that are not valid
/// UTF-8 cannot match a pattern and are kept.
fn excluded_entry(policy: &ExclusionPolicy, name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|n| policy.excluded(n))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::package::policy::ExclusionPolicy;
    use std::fs;
    use tempfile::TempDir;

    fn skip() -> Vec<String> {
        vec!["coverage.xsd".to_string()]
    }

    fn names(entries: &[ArchiveEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.archive_path.to_str().unwrap().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_entries_rooted_at_source_parent() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src/plugin");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.py"), "print()").unwrap();

        let policy = ExclusionPolicy::full(&skip()).unwrap();
        let entries = PackageWalker::new(&src, &policy).entries().unwrap();

        assert_eq!(names(&entries), vec!["plugin/a.py"]);
    }

    #[test]
    fn test_excluded_directory_is_pruned() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src/plugin");
        fs::create_dir_all(src.join("test")).unwrap();
        fs::write(src.join("a.py"), "").unwrap();
        fs::write(src.join("test/t.py"), "").unwrap();
        // Even a skip-listed file under an excluded dir stays excluded
        fs::write(src.join("test/coverage.xsd"), "").unwrap();

        let policy = ExclusionPolicy::full(&skip()).unwrap();
        let entries = PackageWalker::new(&src, &policy).entries().unwrap();

        assert_eq!(names(&entries), vec!["plugin/a.py"]);
    }

    #[test]
    fn test_walk_counts_excluded_names() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src/plugin");
        fs::create_dir_all(src.join("test")).unwrap();
        fs::write(src.join("a.py"), "").unwrap();
        fs::write(src.join("a.pyc"), "").unwrap();
        // Pruned as one name; its contents are never seen
        fs::write(src.join("test/t.py"), "").unwrap();
        fs::write(src.join("test/u.py"), "").unwrap();

        let policy = ExclusionPolicy::full(&skip()).unwrap();
        let outcome = PackageWalker::new(&src, &policy).walk().unwrap();

        assert_eq!(names(&outcome.entries), vec!["plugin/a.py"]);
        assert_eq!(outcome.files_excluded, 2);
    }

    #[test]
    fn test_walk_with_nothing_excluded() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("plugin");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.py"), "").unwrap();

        let policy = ExclusionPolicy::full(&skip()).unwrap();
        let outcome = PackageWalker::new(&src, &policy).walk().unwrap();

        assert_eq!(outcome.files_excluded, 0);
    }

    #[test]
    fn test_minimal_policy_retains_test_dir() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src/plugin");
        fs::create_dir_all(src.join("test")).unwrap();
        fs::write(src.join("a.py"), "").unwrap();
        fs::write(src.join("test/t.py"), "").unwrap();

        let policy = ExclusionPolicy::minimal(&skip()).unwrap();
        let entries = PackageWalker::new(&src, &policy).entries().unwrap();

        assert_eq!(names(&entries), vec!["plugin/a.py", "plugin/test/t.py"]);
    }

    #[test]
    fn test_skip_listed_file_kept() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src/plugin");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("coverage.xsd"), "<xsd/>").unwrap();
        fs::write(src.join("coverage.xml"), "<xml/>").unwrap();

        let policy = ExclusionPolicy::full(&skip()).unwrap();
        let entries = PackageWalker::new(&src, &policy).entries().unwrap();

        assert_eq!(names(&entries), vec!["plugin/coverage.xsd"]);
    }

    #[test]
    fn test_name_matching_at_any_depth() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src/plugin");
        fs::create_dir_all(src.join("sub/test")).unwrap();
        fs::write(src.join("sub/test/deep.py"), "").unwrap();
        fs::write(src.join("sub/keep.py"), "").unwrap();

        let policy = ExclusionPolicy::full(&skip()).unwrap();
        let entries = PackageWalker::new(&src, &policy).entries().unwrap();

        assert_eq!(names(&entries), vec!["plugin/sub/keep.py"]);
    }

    #[test]
    fn test_root_named_like_pattern_is_exempt() {
        // The source root is chosen explicitly by the caller; only its
        // children are subject to exclusion.
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("test");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.py"), "").unwrap();

        let policy = ExclusionPolicy::full(&skip()).unwrap();
        let entries = PackageWalker::new(&src, &policy).entries().unwrap();

        assert_eq!(names(&entries), vec!["test/a.py"]);
    }

    #[test]
    fn test_empty_source_dir() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("plugin");
        fs::create_dir_all(&src).unwrap();

        let policy = ExclusionPolicy::full(&skip()).unwrap();
        let entries = PackageWalker::new(&src, &policy).entries().unwrap();

        assert!(entries.is_empty());
    }

    #[test]
    fn test_missing_source_dir() {
        let policy = ExclusionPolicy::full(&skip()).unwrap();
        let result = PackageWalker::new(Path::new("/nonexistent/plugin"), &policy).entries();

        assert!(matches!(result, Err(BuildError::SourceNotFound { .. })));
    }

    #[test]
    fn test_deterministic_order() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("plugin");
        fs::create_dir_all(src.join("zz")).unwrap();
        fs::write(src.join("b.py"), "").unwrap();
        fs::write(src.join("a.py"), "").unwrap();
        fs::write(src.join("zz/c.py"), "").unwrap();

        let policy = ExclusionPolicy::minimal(&skip()).unwrap();
        let first = PackageWalker::new(&src, &policy).entries().unwrap();
        let second = PackageWalker::new(&src, &policy).entries().unwrap();

        assert_eq!(first, second);
        assert_eq!(
            names(&first),
            vec!["plugin/a.py", "plugin/b.py", "plugin/zz/c.py"]
        );
    }
}
